//! Detent - Encoder Input Demo Firmware
//!
//! RP2040 composition root: builds one encoder source, one input driver and
//! the focus groups of a small menu, then hands each to its task.
//!
//! Named after the click-stops of a rotary knob.

#![no_std]
#![no_main]

use core::cell::RefCell;

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Input, Pull};
use embassy_rp::i2c::{self, I2c};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_time::Instant;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use detent_core::input::{ButtonsInputEncoder, I2cEncoder, Line, Rgb};
use detent_core::EncoderInputDriver;
use detent_drivers::{HalI2c, HalInput, SharedSource};
use detent_hal::I2cConfig;

mod config;
mod console;
mod tasks;

use config::{SourceKind, INPUT_CONFIG};
use tasks::{FwI2cEncoder, SharedEncoder};

/// Button source shared with the edge watchers
static BUTTONS: ButtonsInputEncoder = ButtonsInputEncoder::new(INPUT_CONFIG.buttons);

/// I2C encoder shared between the poll task and the GUI task
static I2C_ENCODER: StaticCell<Mutex<CriticalSectionRawMutex, RefCell<FwI2cEncoder>>> =
    StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Detent firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    info!("Input source: {}", INPUT_CONFIG.source);

    match INPUT_CONFIG.source {
        SourceKind::Buttons => {
            // Pin assignment is board-specific (see input.toml [buttons])
            let left = Input::new(p.PIN_2, Pull::Up);
            let right = Input::new(p.PIN_3, Pull::Up);
            let press = Input::new(p.PIN_4, Pull::Up);

            for (line, cfg) in BUTTONS.lines() {
                info!("Line {}: GPIO{} {} {}", line, cfg.pin, cfg.edge, cfg.pull);
            }

            // Seed the press level before the watcher sees its first edge
            let press = HalInput::new(press);
            BUTTONS.sync_press_level(&press, Instant::now().as_millis());
            let press = press.into_inner();

            spawner
                .spawn(tasks::button_line_task(left, Line::Left, &BUTTONS))
                .unwrap();
            spawner
                .spawn(tasks::button_line_task(right, Line::Right, &BUTTONS))
                .unwrap();
            spawner
                .spawn(tasks::button_line_task(press, Line::Press, &BUTTONS))
                .unwrap();

            let driver = EncoderInputDriver::new(&BUTTONS);
            spawner
                .spawn(tasks::gui_buttons_task(driver, INPUT_CONFIG.nav))
                .unwrap();
        }
        SourceKind::I2c => {
            let mut i2c_config = i2c::Config::default();
            i2c_config.frequency = I2cConfig::STANDARD.frequency;
            // I2C1: SDA GPIO6, SCL GPIO7
            let bus = I2c::new_blocking(p.I2C1, p.PIN_7, p.PIN_6, i2c_config);

            let mut encoder = I2cEncoder::with_address(
                HalI2c::new(bus),
                INPUT_CONFIG.i2c.address,
                INPUT_CONFIG.i2c.update_period_ms,
            );
            if let Err(e) = encoder.set_led(0, Rgb::new(0, 0, 32)) {
                warn!("Encoder LED write failed: {}", e);
            }

            let mutex = I2C_ENCODER.init(Mutex::new(RefCell::new(encoder)));
            let shared: SharedEncoder = SharedSource::new(mutex);

            spawner.spawn(tasks::i2c_poll_task(shared)).unwrap();
            spawner
                .spawn(tasks::gui_i2c_task(EncoderInputDriver::new(shared), INPUT_CONFIG.nav))
                .unwrap();
        }
    }

    info!("All tasks spawned");
}
