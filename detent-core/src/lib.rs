//! Board-agnostic encoder input logic
//!
//! This crate contains everything between the hardware lines and the GUI
//! polling loop that does not depend on a specific chip:
//!
//! - Race-free edge accumulator shared with interrupt handlers
//! - Button-based and I2C-polled encoder sources
//! - Input driver adapting any source to the GUI "encoder" contract
//! - Focus groups and the navigator that routes readings into them
//! - Event observer for the fixed GUI event vocabulary
//! - Configuration type definitions

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod driver;
pub mod input;
pub mod nav;
pub mod observer;

pub use driver::{Binding, EncoderInputDriver, EncoderReading, IndevState};
pub use input::{ButtonsInputEncoder, EncoderSource, EncoderState, I2cEncoder, Line};
pub use nav::{FocusGroup, GroupId, GroupTable, Navigator, WidgetId};
pub use observer::{EventKind, WidgetEvent};
