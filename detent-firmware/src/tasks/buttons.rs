//! Button edge watcher task
//!
//! One instance per line. Each awaits the line's GPIO edge and records it
//! in the shared button source.

use defmt::*;
use embassy_rp::gpio::Input;
use embassy_time::Instant;

use detent_core::input::{ButtonsInputEncoder, Line};
use detent_drivers::watch_line;

#[embassy_executor::task(pool_size = 3)]
pub async fn button_line_task(
    mut pin: Input<'static>,
    line: Line,
    encoder: &'static ButtonsInputEncoder,
) {
    info!("Button watcher started: {}", line);

    match watch_line(&mut pin, line, encoder, || Instant::now().as_millis()).await {
        Ok(never) => match never {},
        Err(_) => error!("Button watcher stopped: {}", line),
    }
}
