//! Encoder sources
//!
//! A source turns hardware activity into a drainable relative-motion
//! counter plus a pressed level. Two variants exist:
//!
//! - [`ButtonsInputEncoder`]: three push buttons, written from interrupt
//!   context through the lock-free [`EncoderState`]
//! - [`I2cEncoder`]: a rotary encoder peripheral polled over I2C

pub mod buttons;
pub mod i2c;
pub mod state;

pub use buttons::{ButtonPins, ButtonsInputEncoder};
pub use i2c::{EncoderError, I2cEncoder, I2cEncoderState, Rgb};
pub use state::{EdgeCounts, EncoderState, Line};

/// Capability shared by every encoder source
///
/// The input driver only ever sees this trait, so sources can be swapped
/// without touching the GUI side.
pub trait EncoderSource {
    /// Return the motion accumulated since the last drain and reset it
    ///
    /// Positive values move forward (right / clockwise).
    fn diff(&mut self) -> i32;

    /// Return the accumulated motion without resetting it
    fn diff_peek(&self) -> i32;

    /// Latest observed button level
    fn pressed(&self) -> bool;
}

impl<S: EncoderSource + ?Sized> EncoderSource for &mut S {
    fn diff(&mut self) -> i32 {
        S::diff(self)
    }

    fn diff_peek(&self) -> i32 {
        S::diff_peek(self)
    }

    fn pressed(&self) -> bool {
        S::pressed(self)
    }
}
