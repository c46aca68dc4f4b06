//! Display side of Detent
//!
//! This crate provides:
//! - `PanelDriver`, the `init` + `flush(region, pixels)` contract the GUI
//!   library's renderer drives, with M5Stack ILI9341 defaults
//! - `DisplayBackend` for text-mode output
//! - `Screen`, a character buffer that renders a focus group as a menu
//!
//! # Architecture
//!
//! Panel timing and SPI sequencing belong to the panel driver. This crate
//! only fixes the interface so the firmware can swap panels, and keeps a
//! small text renderer for boards (or debug consoles) without a pixel
//! pipeline.

#![no_std]

pub mod backend;
pub mod panel;
pub mod screen;

pub use backend::{DisplayBackend, DisplayError};
pub use panel::{Area, ColourOrder, PanelConfig, PanelDriver, PanelError, SpiPins};
pub use screen::{Screen, SCREEN_COLS, SCREEN_ROWS};
