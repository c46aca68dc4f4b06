//! Three-button encoder source
//!
//! Left and right buttons step the selection, the press button selects.
//! Each line fires a handler from interrupt context; the handlers only
//! touch the atomic [`EncoderState`], so they never block and never race
//! with the drain on the polling side.

use detent_hal::{InputPin, LineConfig};

use super::state::{EncoderState, Line};
use super::EncoderSource;

/// Pin assignment for the three buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(deny_unknown_fields))]
pub struct ButtonPins {
    /// Step backward
    pub left: u8,
    /// Step forward
    pub right: u8,
    /// Select (tracked on both edges)
    pub press: u8,
}

impl ButtonPins {
    /// M5Stack front buttons A, C and B
    pub const M5STACK: Self = Self {
        left: 39,
        right: 38,
        press: 37,
    };

    /// Check that no pin is used twice
    pub fn are_distinct(&self) -> bool {
        self.left != self.right && self.left != self.press && self.right != self.press
    }

    /// Pin number of a line
    pub fn pin(&self, line: Line) -> u8 {
        match line {
            Line::Left => self.left,
            Line::Right => self.right,
            Line::Press => self.press,
        }
    }
}

impl Default for ButtonPins {
    fn default() -> Self {
        Self::M5STACK
    }
}

/// Encoder source driven by three active-low push buttons
///
/// Construct it in a `static` and hand `&'static` references to both the
/// interrupt handlers and the input driver:
///
/// ```ignore
/// static BUTTONS: ButtonsInputEncoder = ButtonsInputEncoder::new(ButtonPins::M5STACK);
/// ```
#[derive(Debug)]
pub struct ButtonsInputEncoder {
    pins: ButtonPins,
    state: EncoderState,
}

impl ButtonsInputEncoder {
    /// Create a source for the given pins
    pub const fn new(pins: ButtonPins) -> Self {
        Self {
            pins,
            state: EncoderState::new(),
        }
    }

    /// Pin assignment
    pub fn pins(&self) -> ButtonPins {
        self.pins
    }

    /// Interrupt registrations for the three lines
    ///
    /// Left and right trigger on the falling edge (press of an active-low
    /// button); the press line triggers on both edges so release is seen.
    pub fn lines(&self) -> [(Line, LineConfig); 3] {
        Line::ALL.map(|line| (line, self.line_config(line)))
    }

    /// Interrupt registration for one line
    pub fn line_config(&self, line: Line) -> LineConfig {
        match line {
            Line::Left | Line::Right => LineConfig::falling_pull_up(self.pins.pin(line)),
            Line::Press => LineConfig::toggle_pull_up(self.pins.press),
        }
    }

    /// Left button falling edge
    pub fn on_press_left(&self, now_ms: u64) {
        self.state.record_left(now_ms);
    }

    /// Right button falling edge
    pub fn on_press_right(&self, now_ms: u64) {
        self.state.record_right(now_ms);
    }

    /// Press button edge (either direction)
    ///
    /// `pin_high` is the line level sampled in the handler. The line is
    /// active-low, so pressed = `!pin_high`.
    pub fn on_toggle_press(&self, pin_high: bool, now_ms: u64) {
        self.state.record_press(!pin_high, now_ms);
    }

    /// Route an edge from a shared interrupt trampoline
    ///
    /// `pin_high` is ignored for the step lines.
    pub fn dispatch(&self, line: Line, pin_high: bool, now_ms: u64) {
        match line {
            Line::Left => self.on_press_left(now_ms),
            Line::Right => self.on_press_right(now_ms),
            Line::Press => self.on_toggle_press(pin_high, now_ms),
        }
    }

    /// Seed the press level from the pin before interrupts are enabled
    pub fn sync_press_level<P: InputPin>(&self, pin: &P, now_ms: u64) {
        self.on_toggle_press(pin.is_high(), now_ms);
    }

    /// Net motion without resetting
    pub fn diff_peek(&self) -> i32 {
        self.state.diff_peek()
    }

    /// Net motion since the last drain; resets atomically
    pub fn diff(&self) -> i32 {
        self.state.diff()
    }

    /// Latest press level
    pub fn pressed(&self) -> bool {
        self.state.pressed()
    }

    /// Time of the most recent edge on a line
    pub fn last_event(&self, line: Line) -> Option<u64> {
        self.state.last_event(line)
    }

    /// Underlying accumulator (diagnostics)
    pub fn state(&self) -> &EncoderState {
        &self.state
    }
}

impl EncoderSource for ButtonsInputEncoder {
    fn diff(&mut self) -> i32 {
        ButtonsInputEncoder::diff(self)
    }

    fn diff_peek(&self) -> i32 {
        ButtonsInputEncoder::diff_peek(self)
    }

    fn pressed(&self) -> bool {
        ButtonsInputEncoder::pressed(self)
    }
}

impl EncoderSource for &ButtonsInputEncoder {
    fn diff(&mut self) -> i32 {
        ButtonsInputEncoder::diff(self)
    }

    fn diff_peek(&self) -> i32 {
        ButtonsInputEncoder::diff_peek(self)
    }

    fn pressed(&self) -> bool {
        ButtonsInputEncoder::pressed(self)
    }
}
