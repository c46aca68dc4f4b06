//! Text display backend
//!
//! Character-cell output used by [`Screen`](crate::Screen).

/// Display backend errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Communication error with display
    Communication,
    /// Row or column outside the display
    InvalidCoordinates,
    /// Display not initialized
    NotInitialized,
}

/// Text-mode display
pub trait DisplayBackend {
    /// Clear the entire display
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Draw text starting at a character cell
    fn draw_text(&mut self, row: u8, col: u8, text: &str) -> Result<(), DisplayError>;

    /// Invert columns `start_col..end_col` of a row (focus highlight)
    fn invert_region(&mut self, row: u8, start_col: u8, end_col: u8) -> Result<(), DisplayError>;

    /// Push buffered content to the hardware
    fn flush(&mut self) -> Result<(), DisplayError>;

    /// (columns, rows) in character cells
    fn dimensions(&self) -> (u8, u8);
}
