//! defmt text console
//!
//! `DisplayBackend` that prints the menu screen over RTT. Stands in for a
//! panel on boards that have none.

use defmt::*;

use detent_display::{DisplayBackend, DisplayError, SCREEN_COLS, SCREEN_ROWS};

#[derive(Default)]
pub struct DefmtConsole {
    frames: u32,
}

impl DefmtConsole {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DisplayBackend for DefmtConsole {
    fn clear(&mut self) -> Result<(), DisplayError> {
        self.frames = self.frames.wrapping_add(1);
        debug!("---- frame {} ----", self.frames);
        Ok(())
    }

    fn draw_text(&mut self, row: u8, col: u8, text: &str) -> Result<(), DisplayError> {
        if usize::from(row) >= SCREEN_ROWS || usize::from(col) >= SCREEN_COLS {
            return Err(DisplayError::InvalidCoordinates);
        }
        debug!("{=u8}: {=str}", row, text);
        Ok(())
    }

    fn invert_region(&mut self, row: u8, _start_col: u8, _end_col: u8) -> Result<(), DisplayError> {
        trace!("highlight row {=u8}", row);
        Ok(())
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        Ok(())
    }

    fn dimensions(&self) -> (u8, u8) {
        (SCREEN_COLS as u8, SCREEN_ROWS as u8)
    }
}
