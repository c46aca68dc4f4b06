//! General event observer
//!
//! Logs every widget event of the fixed GUI vocabulary as one
//! human-readable line.

use core::fmt;

use crate::nav::WidgetId;

/// GUI event vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EventKind {
    Pressed,
    ShortClicked,
    Clicked,
    LongPressed,
    LongPressedRepeat,
    Released,
    DragBegin,
    DragEnd,
    DragThrowBegin,
    Focused,
    Defocused,
}

impl EventKind {
    /// Every kind, in vocabulary order
    pub const ALL: [EventKind; 11] = [
        EventKind::Pressed,
        EventKind::ShortClicked,
        EventKind::Clicked,
        EventKind::LongPressed,
        EventKind::LongPressedRepeat,
        EventKind::Released,
        EventKind::DragBegin,
        EventKind::DragEnd,
        EventKind::DragThrowBegin,
        EventKind::Focused,
        EventKind::Defocused,
    ];

    /// Log line for this event
    pub fn label(&self) -> &'static str {
        match self {
            EventKind::Pressed => "Pressed",
            EventKind::ShortClicked => "Short clicked",
            EventKind::Clicked => "Clicked",
            EventKind::LongPressed => "Long press",
            EventKind::LongPressedRepeat => "Long press repeat",
            EventKind::Released => "Released",
            EventKind::DragBegin => "Drag begin",
            EventKind::DragEnd => "Drag end",
            EventKind::DragThrowBegin => "Drag throw begin",
            EventKind::Focused => "Focused",
            EventKind::Defocused => "Defocused",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// An event delivered to a widget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WidgetEvent {
    pub widget: WidgetId,
    pub kind: EventKind,
}

/// Write the log line for one event
pub fn write_event<W: fmt::Write>(out: &mut W, widget: WidgetId, kind: EventKind) -> fmt::Result {
    writeln!(out, "{} (widget {})", kind.label(), widget.0)
}

/// Observer attachable to any widget
///
/// Emits the event label through `defmt`; without the `defmt` feature the
/// call compiles to nothing.
pub fn general_event_handler(widget: WidgetId, kind: EventKind) {
    #[cfg(feature = "defmt")]
    defmt::info!("{=str} (widget {=u16})", kind.label(), widget.0);

    #[cfg(not(feature = "defmt"))]
    let _ = (widget, kind);
}
