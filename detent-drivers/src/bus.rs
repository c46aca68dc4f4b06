//! embedded-hal adapters
//!
//! Wrap `embedded-hal` 1.0 peripherals so they satisfy the detent-hal
//! traits used by the encoder sources.

use core::cell::RefCell;

use embedded_hal::digital::InputPin as EhInputPin;
use embedded_hal::i2c::{Error as _, ErrorKind, I2c};

use detent_hal::{I2cBus, InputPin};

/// Transport errors reported by an adapted I2C bus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusError {
    /// Bus error (misplaced start/stop)
    Bus,
    /// Another master won arbitration
    ArbitrationLost,
    /// Device did not acknowledge
    Nack,
    /// Data overrun
    Overrun,
    /// Anything else the HAL reports
    Other,
}

impl From<ErrorKind> for BusError {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::Bus => BusError::Bus,
            ErrorKind::ArbitrationLoss => BusError::ArbitrationLost,
            ErrorKind::NoAcknowledge(_) => BusError::Nack,
            ErrorKind::Overrun => BusError::Overrun,
            _ => BusError::Other,
        }
    }
}

impl core::fmt::Display for BusError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let msg = match self {
            BusError::Bus => "bus error",
            BusError::ArbitrationLost => "arbitration lost",
            BusError::Nack => "no acknowledge",
            BusError::Overrun => "overrun",
            BusError::Other => "i2c error",
        };
        f.write_str(msg)
    }
}

/// `I2cBus` over any blocking `embedded_hal::i2c::I2c`
pub struct HalI2c<T> {
    inner: T,
}

impl<T: I2c> HalI2c<T> {
    pub fn new(inner: T) -> Self {
        Self { inner }
    }

    /// Return the wrapped peripheral
    pub fn into_inner(self) -> T {
        self.inner
    }
}

impl<T: I2c> I2cBus for HalI2c<T> {
    type Error = BusError;

    fn write(&mut self, addr: u8, bytes: &[u8]) -> Result<(), Self::Error> {
        self.inner
            .write(addr, bytes)
            .map_err(|e| BusError::from(e.kind()))
    }

    fn read(&mut self, addr: u8, buffer: &mut [u8]) -> Result<(), Self::Error> {
        self.inner
            .read(addr, buffer)
            .map_err(|e| BusError::from(e.kind()))
    }

    fn write_read(&mut self, addr: u8, bytes: &[u8], buffer: &mut [u8]) -> Result<(), Self::Error> {
        self.inner
            .write_read(addr, bytes, buffer)
            .map_err(|e| BusError::from(e.kind()))
    }
}

/// `InputPin` over any `embedded_hal::digital::InputPin`
///
/// A failed read is reported as high, which is "released" for the
/// active-low button lines.
pub struct HalInput<P> {
    pin: RefCell<P>,
}

impl<P: EhInputPin> HalInput<P> {
    pub fn new(pin: P) -> Self {
        Self {
            pin: RefCell::new(pin),
        }
    }

    pub fn into_inner(self) -> P {
        self.pin.into_inner()
    }
}

impl<P: EhInputPin> InputPin for HalInput<P> {
    fn is_high(&self) -> bool {
        self.pin.borrow_mut().is_high().unwrap_or(true)
    }
}
