//! I2C master
//!
//! The polled encoder talks to its peripheral through [`I2cBus`]. Any
//! transport failure comes back as the implementation's `Error`; nothing
//! here retries.

/// Largest valid 7-bit address
pub const MAX_ADDRESS: u8 = 0x7F;

/// Blocking I2C master
///
/// Every method is one complete transaction, and `&mut self` keeps two
/// transactions on the same handle from interleaving. A poll and an LED
/// write issued through one handle are therefore serialized.
pub trait I2cBus {
    type Error;

    /// Send `data` to the device at `address`
    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error>;

    /// Fill `buf` from the device at `address`
    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error>;

    /// Write then read with a repeated start
    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), Self::Error>;
}

impl<T: I2cBus + ?Sized> I2cBus for &mut T {
    type Error = T::Error;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        T::write(self, address, data)
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        T::read(self, address, buf)
    }

    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), Self::Error> {
        T::write_read(self, address, write_data, read_buf)
    }
}

/// Bus clock selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct I2cConfig {
    /// SCL frequency in Hz
    pub frequency: u32,
}

impl I2cConfig {
    /// 100 kHz
    pub const STANDARD: Self = Self { frequency: 100_000 };
    /// 400 kHz
    pub const FAST: Self = Self { frequency: 400_000 };
    /// 1 MHz
    pub const FAST_PLUS: Self = Self {
        frequency: 1_000_000,
    };
}

impl Default for I2cConfig {
    fn default() -> Self {
        Self::STANDARD
    }
}
