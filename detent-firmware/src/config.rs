//! Input configuration
//!
//! `INPUT_CONFIG` is generated by build.rs from input.toml.

pub use detent_core::config::{
    ButtonPins, I2cEncoderConfig, InputConfig, NavConfig, SourceKind,
};

include!(concat!(env!("OUT_DIR"), "/input_config.rs"));
