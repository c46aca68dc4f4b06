//! Hardware adapters for Detent
//!
//! This crate connects the board-agnostic sources in detent-core to real
//! peripherals:
//!
//! - `embedded-hal` I2C and input pins as detent-hal traits
//! - Async edge watchers that feed a button source from GPIO waits
//! - A mutex-shared source for I2C encoders polled from another context

#![no_std]
#![deny(unsafe_code)]

pub mod bus;
pub mod edge;
pub mod shared;

pub use bus::{BusError, HalI2c, HalInput};
pub use edge::watch_line;
pub use shared::SharedSource;
