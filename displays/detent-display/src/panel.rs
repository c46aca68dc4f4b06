//! Panel driver interface
//!
//! The GUI library renders into a partial draw buffer and hands each
//! finished region to the panel driver. Regions are inclusive on both
//! ends, pixels are RGB565.

use core::fmt;

/// Inclusive pixel rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Area {
    pub x1: u16,
    pub y1: u16,
    pub x2: u16,
    pub y2: u16,
}

impl Area {
    pub const fn new(x1: u16, y1: u16, x2: u16, y2: u16) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Width in pixels (0 for an inverted rectangle)
    pub fn width(&self) -> u32 {
        if self.x2 < self.x1 {
            0
        } else {
            u32::from(self.x2 - self.x1) + 1
        }
    }

    /// Height in pixels (0 for an inverted rectangle)
    pub fn height(&self) -> u32 {
        if self.y2 < self.y1 {
            0
        } else {
            u32::from(self.y2 - self.y1) + 1
        }
    }

    /// Pixels covered, saturating at `usize::MAX` on narrow targets
    pub fn pixel_count(&self) -> usize {
        let count = u64::from(self.width()) * u64::from(self.height());
        usize::try_from(count).unwrap_or(usize::MAX)
    }
}

/// Errors from a checked flush
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelError<E> {
    /// Pixel buffer does not match the area
    BufferMismatch { expected: usize, actual: usize },
    /// Area extends past the panel
    OutOfBounds,
    /// The driver failed
    Driver(E),
}

impl<E: fmt::Debug> fmt::Display for PanelError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PanelError::BufferMismatch { expected, actual } => {
                write!(f, "expected {} pixels, got {}", expected, actual)
            }
            PanelError::OutOfBounds => f.write_str("area outside panel"),
            PanelError::Driver(e) => write!(f, "panel driver error: {:?}", e),
        }
    }
}

/// Display panel consumed by the GUI renderer
pub trait PanelDriver {
    type Error;

    /// Bring the panel up (reset, controller init, backlight)
    fn init(&mut self) -> Result<(), Self::Error>;

    /// Write one rendered region
    fn flush(&mut self, area: Area, pixels: &[u16]) -> Result<(), Self::Error>;
}

/// Pixel order of the panel controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ColourOrder {
    Rgb,
    #[default]
    Bgr,
}

/// SPI and control pins of the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpiPins {
    pub mosi: u8,
    pub miso: u8,
    pub clk: u8,
    pub cs: u8,
    pub dc: u8,
    pub rst: u8,
    pub backlight: u8,
}

/// Panel configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PanelConfig {
    pub width: u16,
    pub height: u16,
    pub pins: SpiPins,
    pub colour_order: ColourOrder,
    /// Invert colours (the M5Stack ILI9341 needs this)
    pub invert: bool,
    /// Lines held by the partial draw buffer
    pub buffer_lines: u16,
}

impl PanelConfig {
    /// M5Stack Core ILI9341, landscape
    pub const M5STACK_ILI9341: Self = Self {
        width: 320,
        height: 240,
        pins: SpiPins {
            mosi: 23,
            miso: 19,
            clk: 18,
            cs: 14,
            dc: 27,
            rst: 33,
            backlight: 32,
        },
        colour_order: ColourOrder::Bgr,
        invert: true,
        buffer_lines: 10,
    };

    /// Pixels in the partial draw buffer
    pub fn draw_buffer_len(&self) -> usize {
        usize::from(self.width) * usize::from(self.buffer_lines)
    }

    /// Full-screen area
    pub fn full_area(&self) -> Area {
        Area::new(0, 0, self.width - 1, self.height - 1)
    }

    /// Check that `area` lies on the panel
    pub fn contains(&self, area: &Area) -> bool {
        area.x1 <= area.x2 && area.y1 <= area.y2 && area.x2 < self.width && area.y2 < self.height
    }
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self::M5STACK_ILI9341
    }
}

/// Flush after checking area bounds and buffer length
pub fn flush_checked<D: PanelDriver>(
    driver: &mut D,
    config: &PanelConfig,
    area: Area,
    pixels: &[u16],
) -> Result<(), PanelError<D::Error>> {
    if !config.contains(&area) {
        return Err(PanelError::OutOfBounds);
    }
    let expected = area.pixel_count();
    if pixels.len() != expected {
        return Err(PanelError::BufferMismatch {
            expected,
            actual: pixels.len(),
        });
    }
    driver.flush(area, pixels).map_err(PanelError::Driver)
}
