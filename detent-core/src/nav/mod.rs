//! Focus navigation
//!
//! Host-side model of what the GUI library does with an encoder input
//! device: poll the driver on its own cadence, walk the bound group's
//! focus by the relative motion, and turn press/release edges into widget
//! events.
//!
//! A rising press edge activates the focused widget (`Pressed`). A press
//! held for `long_press_ms` fires `LongPressed`, then `LongPressedRepeat`
//! every `long_press_repeat_ms`. Release fires `ShortClicked` and `Clicked`
//! unless a long press fired, then `Released`.

pub mod group;

pub use group::{FocusChange, FocusGroup, GroupId, GroupTable, NavError, WidgetId, MAX_GROUP_WIDGETS};

use heapless::Vec;

use crate::config::NavConfig;
use crate::driver::{EncoderInputDriver, EncoderReading, IndevState};
use crate::input::EncoderSource;
use crate::observer::{EventKind, WidgetEvent};

/// Most events a single poll can produce
pub const EVENT_QUEUE_LEN: usize = 8;

/// Events produced by one poll, in dispatch order
pub type EventQueue = Vec<WidgetEvent, EVENT_QUEUE_LEN>;

/// Press tracking for the routed group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PressPhase {
    /// Button up
    Idle,
    /// Ignore the button until it is seen released
    WaitRelease,
    /// Button down on `target`
    Held {
        target: WidgetId,
        since_ms: u64,
        long_fired: bool,
        last_repeat_ms: u64,
    },
}

/// Routes one encoder input device into focus groups
#[derive(Debug, Clone)]
pub struct Navigator {
    long_press_ms: u32,
    long_press_repeat_ms: u32,
    /// Group the press tracking belongs to
    routed: Option<GroupId>,
    phase: PressPhase,
}

impl Navigator {
    /// Create a navigator with the given timing
    pub fn new(config: &NavConfig) -> Self {
        Self {
            long_press_ms: config.long_press_ms,
            long_press_repeat_ms: config.long_press_repeat_ms,
            routed: None,
            phase: PressPhase::Idle,
        }
    }

    /// One GUI input tick
    ///
    /// Unbound drivers are not read, so their motion stays queued in the
    /// source. A binding change drops any press in progress and waits for
    /// a release before the new group sees a press.
    ///
    /// # Panics
    /// If the driver is bound to a group that `groups` does not contain.
    pub fn poll<S: EncoderSource, const N: usize>(
        &mut self,
        driver: &mut EncoderInputDriver<S>,
        groups: &mut GroupTable<N>,
        now_ms: u64,
    ) -> EventQueue {
        let mut events = EventQueue::new();

        let Some(group_id) = driver.group() else {
            self.routed = None;
            self.phase = PressPhase::Idle;
            return events;
        };

        if self.routed != Some(group_id) {
            self.routed = Some(group_id);
            self.phase = PressPhase::WaitRelease;
        }

        let Some(group) = groups.get_mut(group_id) else {
            panic!("encoder driver bound to unknown group {}", group_id.0);
        };

        let reading = driver.read();
        self.route(group, reading, now_ms, &mut events);
        events
    }

    /// Apply one reading to a group
    pub fn route(
        &mut self,
        group: &mut FocusGroup,
        reading: EncoderReading,
        now_ms: u64,
        events: &mut EventQueue,
    ) {
        if reading.diff != 0 {
            if let Some(change) = group.step(reading.diff) {
                push(events, change.from, EventKind::Defocused);
                push(events, change.to, EventKind::Focused);
            }
        }

        self.phase = match (self.phase, reading.state) {
            (PressPhase::Idle, IndevState::Released) => PressPhase::Idle,
            (PressPhase::Idle, IndevState::Pressed) => match group.focused() {
                Some(target) => {
                    push(events, target, EventKind::Pressed);
                    PressPhase::Held {
                        target,
                        since_ms: now_ms,
                        long_fired: false,
                        last_repeat_ms: now_ms,
                    }
                }
                None => PressPhase::WaitRelease,
            },

            (PressPhase::WaitRelease, IndevState::Released) => PressPhase::Idle,
            (PressPhase::WaitRelease, IndevState::Pressed) => PressPhase::WaitRelease,

            (
                PressPhase::Held {
                    target,
                    since_ms,
                    long_fired,
                    last_repeat_ms,
                },
                IndevState::Pressed,
            ) => {
                if !long_fired && now_ms.saturating_sub(since_ms) >= u64::from(self.long_press_ms) {
                    push(events, target, EventKind::LongPressed);
                    PressPhase::Held {
                        target,
                        since_ms,
                        long_fired: true,
                        last_repeat_ms: now_ms,
                    }
                } else if long_fired
                    && now_ms.saturating_sub(last_repeat_ms) >= u64::from(self.long_press_repeat_ms)
                {
                    push(events, target, EventKind::LongPressedRepeat);
                    PressPhase::Held {
                        target,
                        since_ms,
                        long_fired,
                        last_repeat_ms: now_ms,
                    }
                } else {
                    self.phase
                }
            }
            (PressPhase::Held { target, long_fired, .. }, IndevState::Released) => {
                if !long_fired {
                    push(events, target, EventKind::ShortClicked);
                    push(events, target, EventKind::Clicked);
                }
                push(events, target, EventKind::Released);
                PressPhase::Idle
            }
        };
    }

    /// Group the navigator is currently routing into
    pub fn routed_group(&self) -> Option<GroupId> {
        self.routed
    }

    /// Check if a press is being tracked
    pub fn is_holding(&self) -> bool {
        matches!(self.phase, PressPhase::Held { .. })
    }
}

fn push(events: &mut EventQueue, widget: WidgetId, kind: EventKind) {
    // Capacity covers the worst case of a single poll
    let _ = events.push(WidgetEvent { widget, kind });
}
