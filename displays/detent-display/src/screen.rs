//! Menu screen
//!
//! Character buffer that shows the widgets of a focus group as a list,
//! with the focused entry highlighted and scrolled into view.

use heapless::String;

use crate::backend::{DisplayBackend, DisplayError};

/// Visible menu rows
pub const SCREEN_ROWS: usize = 6;

/// Characters per row
pub const SCREEN_COLS: usize = 20;

/// Prefix drawn before the focused entry
const CURSOR: &str = "> ";
const NO_CURSOR: &str = "  ";

#[derive(Clone)]
pub struct Screen {
    lines: [String<SCREEN_COLS>; SCREEN_ROWS],
    /// Row holding the highlight, if any
    highlight: Option<usize>,
    /// Index of the first entry shown
    first: usize,
    dirty: bool,
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen {
    pub fn new() -> Self {
        Self {
            lines: core::array::from_fn(|_| String::new()),
            highlight: None,
            first: 0,
            dirty: true,
        }
    }

    pub fn clear(&mut self) {
        for line in &mut self.lines {
            line.clear();
        }
        self.highlight = None;
        self.first = 0;
        self.dirty = true;
    }

    /// Set the content of a row, truncating to the row width
    pub fn set_line(&mut self, row: usize, text: &str) {
        let Some(line) = self.lines.get_mut(row) else {
            return;
        };
        line.clear();
        for ch in text.chars() {
            if line.push(ch).is_err() {
                break;
            }
        }
        self.dirty = true;
    }

    pub fn line(&self, row: usize) -> Option<&str> {
        self.lines.get(row).map(|s| s.as_str())
    }

    /// Show a menu with `selected` highlighted
    ///
    /// The window only scrolls when the selection would leave it, so a
    /// wrap from the last entry to the first jumps back to the top.
    pub fn show_menu(&mut self, labels: &[&str], selected: Option<usize>) {
        let selected = selected.filter(|&i| i < labels.len());

        if let Some(sel) = selected {
            if sel < self.first {
                self.first = sel;
            } else if sel >= self.first + SCREEN_ROWS {
                self.first = sel + 1 - SCREEN_ROWS;
            }
        }
        self.first = self.first.min(labels.len().saturating_sub(SCREEN_ROWS));

        self.highlight = None;
        for row in 0..SCREEN_ROWS {
            let index = self.first + row;
            let line = &mut self.lines[row];
            line.clear();
            let Some(label) = labels.get(index) else {
                continue;
            };
            let prefix = if selected == Some(index) {
                self.highlight = Some(row);
                CURSOR
            } else {
                NO_CURSOR
            };
            for ch in prefix.chars().chain(label.chars()) {
                if line.push(ch).is_err() {
                    break;
                }
            }
        }
        self.dirty = true;
    }

    /// Row holding the focused entry
    pub fn highlighted_row(&self) -> Option<usize> {
        self.highlight
    }

    /// Index of the first entry on screen
    pub fn scroll_offset(&self) -> usize {
        self.first
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Draw to a backend if anything changed
    pub fn render<B: DisplayBackend>(&mut self, backend: &mut B) -> Result<(), DisplayError> {
        if !self.dirty {
            return Ok(());
        }

        let (cols, rows) = backend.dimensions();
        backend.clear()?;
        for (row, line) in self.lines.iter().enumerate().take(usize::from(rows)) {
            if !line.is_empty() {
                backend.draw_text(row as u8, 0, line.as_str())?;
            }
        }
        if let Some(row) = self.highlight.filter(|&r| r < usize::from(rows)) {
            backend.invert_region(row as u8, 0, cols.min(SCREEN_COLS as u8))?;
        }
        backend.flush()?;

        self.dirty = false;
        Ok(())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Screen {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Screen[first={}, ", self.first);
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                defmt::write!(f, " | ");
            }
            defmt::write!(f, "{}", line.as_str());
        }
        defmt::write!(f, "]");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records draw calls
    struct MockBackend {
        text: [String<SCREEN_COLS>; SCREEN_ROWS],
        inverted: Option<(u8, u8, u8)>,
        flushes: usize,
        fail: bool,
    }

    impl MockBackend {
        fn new() -> Self {
            Self {
                text: core::array::from_fn(|_| String::new()),
                inverted: None,
                flushes: 0,
                fail: false,
            }
        }
    }

    impl DisplayBackend for MockBackend {
        fn clear(&mut self) -> Result<(), DisplayError> {
            if self.fail {
                return Err(DisplayError::Communication);
            }
            for line in &mut self.text {
                line.clear();
            }
            self.inverted = None;
            Ok(())
        }

        fn draw_text(&mut self, row: u8, _col: u8, text: &str) -> Result<(), DisplayError> {
            let line = self
                .text
                .get_mut(usize::from(row))
                .ok_or(DisplayError::InvalidCoordinates)?;
            line.clear();
            line.push_str(text).map_err(|_| DisplayError::InvalidCoordinates)
        }

        fn invert_region(&mut self, row: u8, start: u8, end: u8) -> Result<(), DisplayError> {
            self.inverted = Some((row, start, end));
            Ok(())
        }

        fn flush(&mut self) -> Result<(), DisplayError> {
            self.flushes += 1;
            Ok(())
        }

        fn dimensions(&self) -> (u8, u8) {
            (SCREEN_COLS as u8, SCREEN_ROWS as u8)
        }
    }

    const LABELS: [&str; 9] = ["Zero", "One", "Two", "Three", "Four", "Five", "Six", "Seven", "Eight"];

    #[test]
    fn test_menu_highlights_selection() {
        let mut screen = Screen::new();
        screen.show_menu(&LABELS[..3], Some(1));

        assert_eq!(screen.line(0), Some("  Zero"));
        assert_eq!(screen.line(1), Some("> One"));
        assert_eq!(screen.line(3), Some(""));
        assert_eq!(screen.highlighted_row(), Some(1));
    }

    #[test]
    fn test_menu_scrolls_to_keep_focus_visible() {
        let mut screen = Screen::new();
        screen.show_menu(&LABELS, Some(0));
        assert_eq!(screen.scroll_offset(), 0);

        screen.show_menu(&LABELS, Some(7));
        assert_eq!(screen.scroll_offset(), 2);
        assert_eq!(screen.highlighted_row(), Some(5));

        // Moving up inside the window does not scroll
        screen.show_menu(&LABELS, Some(4));
        assert_eq!(screen.scroll_offset(), 2);
        assert_eq!(screen.line(2), Some("> Four"));

        // Wrap to the top
        screen.show_menu(&LABELS, Some(0));
        assert_eq!(screen.scroll_offset(), 0);
        assert_eq!(screen.highlighted_row(), Some(0));
    }

    #[test]
    fn test_long_labels_truncate() {
        let mut screen = Screen::new();
        screen.show_menu(&["An exceedingly long label"], Some(0));
        assert_eq!(screen.line(0).map(str::len), Some(SCREEN_COLS));
    }

    #[test]
    fn test_render_only_when_dirty() {
        let mut screen = Screen::new();
        let mut backend = MockBackend::new();
        screen.show_menu(&LABELS[..2], Some(1));

        screen.render(&mut backend).unwrap();
        assert_eq!(backend.text[1].as_str(), "> One");
        assert_eq!(backend.inverted, Some((1, 0, SCREEN_COLS as u8)));
        assert_eq!(backend.flushes, 1);
        assert!(!screen.is_dirty());

        screen.render(&mut backend).unwrap();
        assert_eq!(backend.flushes, 1);
    }

    #[test]
    fn test_render_error_keeps_dirty() {
        let mut screen = Screen::new();
        let mut backend = MockBackend::new();
        backend.fail = true;
        screen.show_menu(&LABELS[..2], None);

        assert_eq!(screen.render(&mut backend), Err(DisplayError::Communication));
        assert!(screen.is_dirty());
    }
}
