//! Async edge watchers
//!
//! On embassy the "interrupt handler" of a button line is a task awaiting
//! the GPIO edge. Each watcher waits for the trigger registered for its
//! line and forwards the edge to the button source's producer handler.

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, InputPin};
use embedded_hal_async::digital::Wait;

use detent_core::input::{ButtonsInputEncoder, Line};
use detent_hal::Edge;

/// Wait for the next trigger of `edge`
async fn wait_for<P: Wait>(pin: &mut P, edge: Edge) -> Result<(), P::Error> {
    match edge {
        Edge::Falling => pin.wait_for_falling_edge().await,
        Edge::Rising => pin.wait_for_rising_edge().await,
        Edge::Both => pin.wait_for_any_edge().await,
    }
}

/// Feed one button line into `encoder` forever
///
/// The level is sampled right after the edge so the press line reports
/// the state it settled in. `now_ms` supplies the timestamp for the
/// diagnostic last-event record.
///
/// Only returns if the pin reports an error.
pub async fn watch_line<P, F>(
    pin: &mut P,
    line: Line,
    encoder: &ButtonsInputEncoder,
    now_ms: F,
) -> Result<Infallible, <P as ErrorType>::Error>
where
    P: Wait + InputPin,
    F: Fn() -> u64,
{
    let edge = encoder.line_config(line).edge;

    loop {
        wait_for(pin, edge).await?;
        let pin_high = match line {
            Line::Press => pin.is_high()?,
            Line::Left | Line::Right => false,
        };
        encoder.dispatch(line, pin_high, now_ms());
    }
}
