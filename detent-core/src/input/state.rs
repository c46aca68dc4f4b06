//! Shared edge accumulator
//!
//! Written from interrupt context, drained from the GUI polling loop.
//!
//! Both counters live in one 64-bit word (left in the low half, right in
//! the high half), so a producer touches them with a single `fetch_add`
//! and a drain takes both with a single `swap`. No edge can land between
//! "read" and "reset". On cores without 64-bit atomics `portable-atomic`
//! (with its `critical-section` feature) masks interrupts around each
//! operation instead.
//!
//! Each drain window must see fewer than 2^32 edges per line, otherwise the
//! left half carries into the right half.

use portable_atomic::{AtomicBool, AtomicU64, Ordering};

/// One right edge in the packed counter word
const RIGHT_ONE: u64 = 1 << 32;

/// One left edge in the packed counter word
const LEFT_ONE: u64 = 1;

/// Timestamp slot value before a line has ever fired
const NEVER: u64 = u64::MAX;

/// Input lines tracked by the accumulator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Line {
    /// Backward step button
    Left,
    /// Forward step button
    Right,
    /// Select button
    Press,
}

impl Line {
    /// All lines, in registration order
    pub const ALL: [Line; 3] = [Line::Left, Line::Right, Line::Press];

    const fn index(self) -> usize {
        match self {
            Line::Left => 0,
            Line::Right => 1,
            Line::Press => 2,
        }
    }
}

/// Raw edge counts taken in one atomic snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EdgeCounts {
    /// Left edges in the window
    pub left: u32,
    /// Right edges in the window
    pub right: u32,
}

impl EdgeCounts {
    fn unpack(word: u64) -> Self {
        Self {
            left: word as u32,
            right: (word >> 32) as u32,
        }
    }

    /// Net motion: `right - left`
    pub fn diff(&self) -> i32 {
        self.right.wrapping_sub(self.left) as i32
    }
}

/// Interrupt-safe encoder accumulator
///
/// All methods take `&self`, so one instance can sit in a `static` and be
/// shared between interrupt handlers (producers) and the polling loop
/// (consumer).
#[derive(Debug)]
pub struct EncoderState {
    /// Packed `[right:32 | left:32]` edge counts
    counts: AtomicU64,
    /// Latest press level (true = pressed)
    pressed: AtomicBool,
    /// Last event time per line in ms (`NEVER` until first event)
    last_event_ms: [AtomicU64; 3],
}

impl Default for EncoderState {
    fn default() -> Self {
        Self::new()
    }
}

impl EncoderState {
    /// Create an empty accumulator
    pub const fn new() -> Self {
        Self {
            counts: AtomicU64::new(0),
            pressed: AtomicBool::new(false),
            last_event_ms: [
                AtomicU64::new(NEVER),
                AtomicU64::new(NEVER),
                AtomicU64::new(NEVER),
            ],
        }
    }

    /// Record one left edge (producer side, never blocks)
    pub fn record_left(&self, now_ms: u64) {
        self.stamp(Line::Left, now_ms);
        self.counts.fetch_add(LEFT_ONE, Ordering::AcqRel);
    }

    /// Record one right edge (producer side, never blocks)
    pub fn record_right(&self, now_ms: u64) {
        self.stamp(Line::Right, now_ms);
        self.counts.fetch_add(RIGHT_ONE, Ordering::AcqRel);
    }

    /// Record the current press level (producer side, never blocks)
    ///
    /// Only the latest level is kept; a press/release pair between two
    /// reads is not queued.
    pub fn record_press(&self, pressed: bool, now_ms: u64) {
        self.stamp(Line::Press, now_ms);
        self.pressed.store(pressed, Ordering::Release);
    }

    /// Net motion without resetting
    pub fn diff_peek(&self) -> i32 {
        self.peek_counts().diff()
    }

    /// Net motion since the last drain; resets both counters atomically
    pub fn diff(&self) -> i32 {
        self.drain_counts().diff()
    }

    /// Raw counts without resetting
    pub fn peek_counts(&self) -> EdgeCounts {
        EdgeCounts::unpack(self.counts.load(Ordering::Acquire))
    }

    /// Raw counts since the last drain; resets both counters atomically
    pub fn drain_counts(&self) -> EdgeCounts {
        EdgeCounts::unpack(self.counts.swap(0, Ordering::AcqRel))
    }

    /// Latest press level
    pub fn pressed(&self) -> bool {
        self.pressed.load(Ordering::Acquire)
    }

    /// Time of the most recent event on a line, if it ever fired
    pub fn last_event(&self, line: Line) -> Option<u64> {
        match self.last_event_ms[line.index()].load(Ordering::Acquire) {
            NEVER => None,
            ms => Some(ms),
        }
    }

    fn stamp(&self, line: Line, now_ms: u64) {
        // Keep the sentinel reserved
        let ms = now_ms.min(NEVER - 1);
        self.last_event_ms[line.index()].store(ms, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_diff_counts_right_minus_left() {
        let state = EncoderState::new();
        state.record_right(1);
        state.record_right(2);
        state.record_right(3);
        state.record_left(4);

        assert_eq!(state.diff(), 2);
        assert_eq!(state.diff(), 0);
    }

    #[test]
    fn test_negative_diff() {
        let state = EncoderState::new();
        for t in 0..5 {
            state.record_left(t);
        }
        assert_eq!(state.diff_peek(), -5);
        assert_eq!(state.diff(), -5);
    }

    #[test]
    fn test_peek_does_not_reset() {
        let state = EncoderState::new();
        state.record_right(10);
        state.record_right(11);

        for _ in 0..10 {
            assert_eq!(state.diff_peek(), 2);
        }
        assert_eq!(state.peek_counts(), EdgeCounts { left: 0, right: 2 });
        assert_eq!(state.diff(), 2);
    }

    #[test]
    fn test_left_and_right_in_same_window_both_count() {
        let state = EncoderState::new();
        state.record_left(5);
        state.record_right(5);

        assert_eq!(state.drain_counts(), EdgeCounts { left: 1, right: 1 });
        assert_eq!(state.peek_counts(), EdgeCounts::default());
    }

    #[test]
    fn test_pressed_tracks_latest_level() {
        let state = EncoderState::new();
        assert!(!state.pressed());

        state.record_press(true, 1);
        state.record_press(false, 2);
        state.record_press(true, 3);

        assert!(state.pressed());
    }

    #[test]
    fn test_timestamps_per_line() {
        let state = EncoderState::new();
        assert_eq!(state.last_event(Line::Left), None);
        assert_eq!(state.last_event(Line::Press), None);

        state.record_left(100);
        state.record_press(true, 250);

        assert_eq!(state.last_event(Line::Left), Some(100));
        assert_eq!(state.last_event(Line::Right), None);
        assert_eq!(state.last_event(Line::Press), Some(250));

        // Draining does not clear diagnostics
        state.diff();
        assert_eq!(state.last_event(Line::Left), Some(100));
    }

    #[test]
    fn test_timestamp_sentinel_reserved() {
        let state = EncoderState::new();
        state.record_right(u64::MAX);
        assert_eq!(state.last_event(Line::Right), Some(u64::MAX - 1));
    }

    #[test]
    fn test_concurrent_producers_and_drains_lose_nothing() {
        use std::thread;

        const EDGES_PER_THREAD: u32 = 50_000;
        let state = EncoderState::new();
        let mut left_total: u64 = 0;
        let mut right_total: u64 = 0;

        thread::scope(|s| {
            let right = s.spawn(|| {
                for t in 0..EDGES_PER_THREAD {
                    state.record_right(u64::from(t));
                }
            });
            let left = s.spawn(|| {
                for t in 0..EDGES_PER_THREAD {
                    state.record_left(u64::from(t));
                }
            });

            while !(right.is_finished() && left.is_finished()) {
                let counts = state.drain_counts();
                left_total += u64::from(counts.left);
                right_total += u64::from(counts.right);
            }
        });
        let counts = state.drain_counts();
        left_total += u64::from(counts.left);
        right_total += u64::from(counts.right);

        // Net motion is zero; each line has to add up on its own
        assert_eq!(left_total, u64::from(EDGES_PER_THREAD));
        assert_eq!(right_total, u64::from(EDGES_PER_THREAD));
        assert_eq!(state.drain_counts(), EdgeCounts::default());
    }

    #[derive(Debug, Clone, Copy)]
    enum Op {
        Left,
        Right,
        Drain,
        Peek,
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            Just(Op::Left),
            Just(Op::Right),
            Just(Op::Drain),
            Just(Op::Peek),
        ]
    }

    proptest! {
        #[test]
        fn prop_drains_match_injected_edges(ops in proptest::collection::vec(op(), 0..256)) {
            let state = EncoderState::new();
            let mut lefts = 0i32;
            let mut rights = 0i32;
            let mut total_drained = 0i64;
            let mut total_injected = 0i64;

            for (t, op) in ops.iter().enumerate() {
                match op {
                    Op::Left => {
                        state.record_left(t as u64);
                        lefts += 1;
                        total_injected -= 1;
                    }
                    Op::Right => {
                        state.record_right(t as u64);
                        rights += 1;
                        total_injected += 1;
                    }
                    Op::Peek => {
                        prop_assert_eq!(state.diff_peek(), rights - lefts);
                        prop_assert_eq!(state.diff_peek(), rights - lefts);
                    }
                    Op::Drain => {
                        let d = state.diff();
                        prop_assert_eq!(d, rights - lefts);
                        prop_assert_eq!(state.diff(), 0);
                        total_drained += i64::from(d);
                        lefts = 0;
                        rights = 0;
                    }
                }
            }
            total_drained += i64::from(state.diff());
            prop_assert_eq!(total_drained, total_injected);
        }
    }
}
