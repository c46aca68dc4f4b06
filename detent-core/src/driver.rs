//! Encoder input driver
//!
//! Adapts any [`EncoderSource`] to the GUI "encoder" input-device contract:
//! each poll yields a relative motion and a pressed/released state. The
//! driver also carries the association to at most one focus group.
//!
//! # Binding state machine
//!
//! ```text
//!            set_group(Some(g))          set_group(Some(h))
//! Unbound ────────────────────▶ Bound(g) ──────────────────▶ Bound(h)
//!    ▲                             │
//!    └──────── set_group(None) ────┘
//! ```
//!
//! There is no terminal state; the driver lives as long as its source.

use crate::input::EncoderSource;
use crate::nav::GroupId;

/// Button state reported to the GUI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IndevState {
    Pressed,
    Released,
}

impl IndevState {
    pub fn is_pressed(&self) -> bool {
        matches!(self, IndevState::Pressed)
    }
}

impl From<bool> for IndevState {
    fn from(pressed: bool) -> Self {
        if pressed {
            IndevState::Pressed
        } else {
            IndevState::Released
        }
    }
}

/// One poll of the input device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EncoderReading {
    /// Relative motion since the previous read
    pub diff: i32,
    /// Current button state
    pub state: IndevState,
}

/// Focus group association of a driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Binding {
    /// No group; input is not delivered
    Unbound,
    /// Input drives this group
    Bound(GroupId),
}

/// GUI-facing encoder input device
///
/// Holds exactly one source and a group relation (never the group itself).
pub struct EncoderInputDriver<S> {
    source: S,
    group: Option<GroupId>,
}

impl<S: EncoderSource> EncoderInputDriver<S> {
    /// Create an unbound driver
    pub fn new(source: S) -> Self {
        Self {
            source,
            group: None,
        }
    }

    /// Create a driver already bound to a group
    pub fn with_group(source: S, group: GroupId) -> Self {
        Self {
            source,
            group: Some(group),
        }
    }

    /// Poll callback invoked by the GUI loop
    ///
    /// Drains the source's motion and samples its button level.
    ///
    /// # Panics
    /// If the driver is unbound. Polling an unbound device is a sequencing
    /// bug in the caller; the navigator never does it.
    pub fn read(&mut self) -> EncoderReading {
        assert!(
            self.group.is_some(),
            "encoder input driver read while unbound"
        );

        EncoderReading {
            diff: self.source.diff(),
            state: IndevState::from(self.source.pressed()),
        }
    }

    /// Currently bound group
    pub fn group(&self) -> Option<GroupId> {
        self.group
    }

    /// Replace the group association
    ///
    /// Returns the previous association, which is simply dropped: the old
    /// group keeps existing but receives no further input.
    pub fn set_group(&mut self, group: Option<GroupId>) -> Option<GroupId> {
        core::mem::replace(&mut self.group, group)
    }

    /// Binding state
    pub fn binding(&self) -> Binding {
        match self.group {
            Some(group) => Binding::Bound(group),
            None => Binding::Unbound,
        }
    }

    /// Check if a group is bound
    pub fn is_bound(&self) -> bool {
        self.group.is_some()
    }

    /// Wrapped source
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Wrapped source (mutable, e.g. for LED writes)
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }
}
