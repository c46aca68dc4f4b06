//! Detent Hardware Abstraction Layer
//!
//! This crate defines the hardware traits the encoder sources are written
//! against. Chip support lives elsewhere (`detent-drivers` adapts any
//! `embedded-hal` implementation), so the same source code runs on the
//! target and against mocks on the host.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  detent-core (encoder sources, driver)  │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  detent-hal (this crate - traits)       │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ detent-drivers│       │  test mocks   │
//! │ (embedded-hal)│       │  (host)       │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::InputPin`] - Digital input level
//! - [`i2c::I2cBus`] - I2C bus master operations
//!
//! Interrupt-driven lines are described by [`gpio::LineConfig`]; the
//! composition root registers them with whatever edge-interrupt mechanism
//! the chip offers.

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod i2c;

// Re-export key traits at crate root for convenience
pub use gpio::{Edge, InputPin, LineConfig, Pull};
pub use i2c::{I2cBus, I2cConfig};
