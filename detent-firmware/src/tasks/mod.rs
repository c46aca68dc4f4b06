//! Embassy async tasks
//!
//! Edge watchers or the I2C poll task produce encoder motion; the GUI task
//! drains it on its own cadence.

pub mod buttons;
pub mod gui;
pub mod i2c_poll;

use embassy_rp::i2c::{Blocking, I2c};
use embassy_rp::peripherals::I2C1;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;

use detent_core::I2cEncoder;
use detent_drivers::{HalI2c, SharedSource};

pub use buttons::button_line_task;
pub use gui::{gui_buttons_task, gui_i2c_task};
pub use i2c_poll::i2c_poll_task;

/// I2C encoder on the board's I2C1 bus
pub type FwI2cEncoder = I2cEncoder<HalI2c<I2c<'static, I2C1, Blocking>>>;

/// Handle to the mutex-shared I2C encoder
pub type SharedEncoder = SharedSource<'static, CriticalSectionRawMutex, FwI2cEncoder>;
