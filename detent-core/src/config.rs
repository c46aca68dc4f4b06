//! Configuration type definitions
//!
//! These types describe which encoder source the board uses and how the
//! GUI side polls it. The firmware embeds them as a `const` generated from
//! `input.toml` at build time.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use detent_hal::i2c::MAX_ADDRESS;

use crate::input::i2c::{DEFAULT_ADDRESS, DEFAULT_UPDATE_PERIOD_MS};

pub use crate::input::ButtonPins;

/// Which encoder source feeds the input driver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SourceKind {
    /// Three edge-triggered buttons
    #[default]
    Buttons,
    /// Polled I2C encoder board
    I2c,
}

/// I2C encoder board configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct I2cEncoderConfig {
    /// 7-bit device address
    pub address: u8,
    /// Minimum time between polls (ms)
    pub update_period_ms: u32,
}

impl Default for I2cEncoderConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS,
            update_period_ms: DEFAULT_UPDATE_PERIOD_MS,
        }
    }
}

/// GUI-side polling and press timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct NavConfig {
    /// Input device read period (ms)
    pub read_period_ms: u32,
    /// Hold time before a long press fires (ms)
    pub long_press_ms: u32,
    /// Interval between long press repeats (ms)
    pub long_press_repeat_ms: u32,
    /// Focus wraps around group ends
    pub wrap: bool,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            read_period_ms: 30,
            long_press_ms: 400,
            long_press_repeat_ms: 100,
            wrap: true,
        }
    }
}

/// Complete input configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(deny_unknown_fields))]
pub struct InputConfig {
    pub source: SourceKind,
    pub buttons: ButtonPins,
    #[cfg_attr(feature = "serde", serde(default))]
    pub i2c: I2cEncoderConfig,
    #[cfg_attr(feature = "serde", serde(default))]
    pub nav: NavConfig,
}

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Two button lines share a pin
    DuplicateButtonPin(u8),
    /// Address does not fit in 7 bits
    InvalidI2cAddress(u8),
    /// I2C update period is zero
    ZeroUpdatePeriod,
    /// GUI read period is zero
    ZeroReadPeriod,
    /// Long press threshold is zero
    ZeroLongPress,
    /// Long press repeat interval is zero
    ZeroRepeatPeriod,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::DuplicateButtonPin(pin) => write!(f, "pin {} used by two buttons", pin),
            ConfigError::InvalidI2cAddress(addr) => {
                write!(f, "i2c address 0x{:02x} is not 7-bit", addr)
            }
            ConfigError::ZeroUpdatePeriod => f.write_str("i2c update period must be non-zero"),
            ConfigError::ZeroReadPeriod => f.write_str("read period must be non-zero"),
            ConfigError::ZeroLongPress => f.write_str("long press time must be non-zero"),
            ConfigError::ZeroRepeatPeriod => f.write_str("long press repeat must be non-zero"),
        }
    }
}

impl ButtonPins {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.left == self.right || self.left == self.press {
            return Err(ConfigError::DuplicateButtonPin(self.left));
        }
        if self.right == self.press {
            return Err(ConfigError::DuplicateButtonPin(self.right));
        }
        Ok(())
    }
}

impl I2cEncoderConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.address > MAX_ADDRESS {
            return Err(ConfigError::InvalidI2cAddress(self.address));
        }
        if self.update_period_ms == 0 {
            return Err(ConfigError::ZeroUpdatePeriod);
        }
        Ok(())
    }
}

impl NavConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.read_period_ms == 0 {
            return Err(ConfigError::ZeroReadPeriod);
        }
        if self.long_press_ms == 0 {
            return Err(ConfigError::ZeroLongPress);
        }
        if self.long_press_repeat_ms == 0 {
            return Err(ConfigError::ZeroRepeatPeriod);
        }
        Ok(())
    }
}

impl InputConfig {
    /// Check the whole configuration
    ///
    /// Only the section of the selected source is checked, so an unused
    /// I2C block may keep placeholder values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.source {
            SourceKind::Buttons => self.buttons.validate()?,
            SourceKind::I2c => self.i2c.validate()?,
        }
        self.nav.validate()
    }
}
