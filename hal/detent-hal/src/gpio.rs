//! GPIO pin abstractions
//!
//! Provides the digital input trait and the configuration record used to
//! register an edge-triggered interrupt on a line.

/// Digital input pin
///
/// Implementations should handle the actual hardware register reading
/// for the specific chip.
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&self) -> bool {
        !self.is_high()
    }
}

/// Edge that triggers a line interrupt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    /// High-to-low transition
    Falling,
    /// Low-to-high transition
    Rising,
    /// Either transition
    Both,
}

impl Edge {
    /// Check if a falling transition fires this trigger
    pub fn fires_on_falling(&self) -> bool {
        matches!(self, Edge::Falling | Edge::Both)
    }

    /// Check if a rising transition fires this trigger
    pub fn fires_on_rising(&self) -> bool {
        matches!(self, Edge::Rising | Edge::Both)
    }
}

/// Internal bias resistor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Pull {
    /// Floating input
    #[default]
    None,
    /// Pull-up (active-low buttons)
    Up,
    /// Pull-down
    Down,
}

/// Interrupt line registration record
///
/// One per digital input that drives a handler from interrupt context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LineConfig {
    /// GPIO pin number
    pub pin: u8,
    /// Trigger direction
    pub edge: Edge,
    /// Bias configuration
    pub pull: Pull,
}

impl LineConfig {
    /// Falling-edge line with pull-up (typical active-low push button)
    pub const fn falling_pull_up(pin: u8) -> Self {
        Self {
            pin,
            edge: Edge::Falling,
            pull: Pull::Up,
        }
    }

    /// Both-edge line with pull-up (tracks press and release)
    pub const fn toggle_pull_up(pin: u8) -> Self {
        Self {
            pin,
            edge: Edge::Both,
            pull: Pull::Up,
        }
    }
}
