//! I2C encoder poll task
//!
//! Polls the encoder board at its configured cadence. Transport errors are
//! logged and the next tick simply tries again.

use defmt::*;
use embassy_time::{Duration, Instant, Ticker};

use super::SharedEncoder;

#[embassy_executor::task]
pub async fn i2c_poll_task(encoder: SharedEncoder) {
    let (address, period_ms) = encoder.update_with(|enc| (enc.address(), enc.update_period_ms()));
    info!("I2C encoder poll started: addr={=u8:#x}, every {=u32}ms", address, period_ms);

    let mut ticker = Ticker::every(Duration::from_millis(u64::from(period_ms)));
    let mut failures: u32 = 0;

    loop {
        ticker.next().await;
        let now_ms = Instant::now().as_millis();

        match encoder.update_with(|enc| enc.update(now_ms)) {
            Ok(0) => {}
            Ok(delta) => trace!("Encoder delta {}", delta),
            Err(e) => {
                failures = failures.wrapping_add(1);
                // Log the 1st, 2nd, 4th, 8th... failure
                if failures.is_power_of_two() {
                    warn!("Encoder poll failed ({} so far): {}", failures, e);
                }
            }
        }
    }
}
