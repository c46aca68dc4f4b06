//! Focus groups
//!
//! An ordered set of focusable widgets plus the index of the focused one.
//! Relative encoder motion walks the order; the group never owns widgets,
//! it only records their handles.

use heapless::Vec;

/// Maximum widgets per group
pub const MAX_GROUP_WIDGETS: usize = 16;

/// Handle of a widget owned by the GUI library
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WidgetId(pub u16);

/// Handle of a focus group in a [`GroupTable`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GroupId(pub u8);

/// Focus navigation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NavError {
    /// No room for another group
    GroupTableFull,
    /// No room for another widget in the group
    GroupFull,
    /// Group handle does not exist
    UnknownGroup,
    /// Widget already in the group
    DuplicateWidget,
}

/// A change of focus inside one group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FocusChange {
    pub from: WidgetId,
    pub to: WidgetId,
}

/// Ordered focus group
#[derive(Debug, Clone)]
pub struct FocusGroup {
    widgets: Vec<WidgetId, MAX_GROUP_WIDGETS>,
    /// Index into `widgets`; `None` only while empty
    focused: Option<usize>,
    /// Stepping past either end wraps around
    wrap: bool,
}

impl Default for FocusGroup {
    fn default() -> Self {
        Self::new()
    }
}

impl FocusGroup {
    /// Create an empty group that wraps around
    pub const fn new() -> Self {
        Self::with_wrap(true)
    }

    /// Create an empty group with explicit wrap behaviour
    pub const fn with_wrap(wrap: bool) -> Self {
        Self {
            widgets: Vec::new(),
            focused: None,
            wrap,
        }
    }

    /// Append a widget; the first widget added receives focus
    pub fn add_widget(&mut self, widget: WidgetId) -> Result<(), NavError> {
        if self.widgets.contains(&widget) {
            return Err(NavError::DuplicateWidget);
        }
        self.widgets.push(widget).map_err(|_| NavError::GroupFull)?;
        if self.focused.is_none() {
            self.focused = Some(0);
        }
        Ok(())
    }

    /// Remove a widget, keeping the order of the rest
    ///
    /// If the focused widget is removed, focus moves to the widget that
    /// took its place (or the new last one).
    pub fn remove_widget(&mut self, widget: WidgetId) -> bool {
        let Some(index) = self.widgets.iter().position(|w| *w == widget) else {
            return false;
        };
        self.widgets.remove(index);

        self.focused = match self.focused {
            _ if self.widgets.is_empty() => None,
            Some(f) if f > index => Some(f - 1),
            Some(f) => Some(f.min(self.widgets.len() - 1)),
            None => None,
        };
        true
    }

    /// Widgets in navigation order
    pub fn widgets(&self) -> &[WidgetId] {
        &self.widgets
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    pub fn wraps(&self) -> bool {
        self.wrap
    }

    /// Focused widget
    pub fn focused(&self) -> Option<WidgetId> {
        self.focused.map(|i| self.widgets[i])
    }

    /// Index of the focused widget
    pub fn focused_index(&self) -> Option<usize> {
        self.focused
    }

    /// Focus a specific widget
    pub fn focus(&mut self, widget: WidgetId) -> Option<FocusChange> {
        let target = self.widgets.iter().position(|w| *w == widget)?;
        self.move_to(target)
    }

    /// Focus the next widget
    pub fn focus_next(&mut self) -> Option<FocusChange> {
        self.step(1)
    }

    /// Focus the previous widget
    pub fn focus_prev(&mut self) -> Option<FocusChange> {
        self.step(-1)
    }

    /// Move focus by a relative number of positions
    ///
    /// Returns the change, or `None` if focus stayed where it was.
    pub fn step(&mut self, steps: i32) -> Option<FocusChange> {
        let current = self.focused?;
        let len = self.widgets.len() as i64;
        let raw = current as i64 + i64::from(steps);

        let target = if self.wrap {
            raw.rem_euclid(len)
        } else {
            raw.clamp(0, len - 1)
        };

        self.move_to(target as usize)
    }

    fn move_to(&mut self, target: usize) -> Option<FocusChange> {
        let current = self.focused?;
        if target == current {
            return None;
        }
        self.focused = Some(target);
        Some(FocusChange {
            from: self.widgets[current],
            to: self.widgets[target],
        })
    }
}

/// Fixed-capacity table of focus groups
///
/// Stands in for the GUI library's group registry: `create_group` hands
/// out handles, `add_widget` fills them.
#[derive(Debug, Clone)]
pub struct GroupTable<const N: usize> {
    groups: Vec<FocusGroup, N>,
}

impl<const N: usize> Default for GroupTable<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> GroupTable<N> {
    pub const fn new() -> Self {
        Self { groups: Vec::new() }
    }

    /// Create a wrapping group
    pub fn create_group(&mut self) -> Result<GroupId, NavError> {
        self.create_group_with(true)
    }

    /// Create a group with explicit wrap behaviour
    pub fn create_group_with(&mut self, wrap: bool) -> Result<GroupId, NavError> {
        let id = u8::try_from(self.groups.len()).map_err(|_| NavError::GroupTableFull)?;
        self.groups
            .push(FocusGroup::with_wrap(wrap))
            .map_err(|_| NavError::GroupTableFull)?;
        Ok(GroupId(id))
    }

    /// Add a widget to a group
    pub fn add_widget(&mut self, group: GroupId, widget: WidgetId) -> Result<(), NavError> {
        self.get_mut(group)
            .ok_or(NavError::UnknownGroup)?
            .add_widget(widget)
    }

    pub fn get(&self, group: GroupId) -> Option<&FocusGroup> {
        self.groups.get(usize::from(group.0))
    }

    pub fn get_mut(&mut self, group: GroupId) -> Option<&mut FocusGroup> {
        self.groups.get_mut(usize::from(group.0))
    }

    pub fn contains(&self, group: GroupId) -> bool {
        usize::from(group.0) < self.groups.len()
    }

    /// Number of groups created
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group_of(n: u16, wrap: bool) -> FocusGroup {
        let mut group = FocusGroup::with_wrap(wrap);
        for i in 0..n {
            group.add_widget(WidgetId(i)).unwrap();
        }
        group
    }

    #[test]
    fn test_first_widget_gets_focus() {
        let mut group = FocusGroup::new();
        assert_eq!(group.focused(), None);

        group.add_widget(WidgetId(7)).unwrap();
        group.add_widget(WidgetId(8)).unwrap();
        assert_eq!(group.focused(), Some(WidgetId(7)));
    }

    #[test]
    fn test_duplicate_widget_rejected() {
        let mut group = FocusGroup::new();
        group.add_widget(WidgetId(1)).unwrap();
        assert_eq!(group.add_widget(WidgetId(1)), Err(NavError::DuplicateWidget));
    }

    #[test]
    fn test_group_full() {
        let mut group = group_of(MAX_GROUP_WIDGETS as u16, true);
        assert_eq!(group.add_widget(WidgetId(999)), Err(NavError::GroupFull));
    }

    #[test]
    fn test_step_wraps() {
        let mut group = group_of(3, true);

        assert_eq!(
            group.focus_prev(),
            Some(FocusChange { from: WidgetId(0), to: WidgetId(2) })
        );
        assert_eq!(
            group.step(2),
            Some(FocusChange { from: WidgetId(2), to: WidgetId(1) })
        );
        // Full turn lands on the same widget
        assert_eq!(group.step(3), None);
        assert_eq!(group.focused(), Some(WidgetId(1)));
    }

    #[test]
    fn test_step_clamps_without_wrap() {
        let mut group = group_of(3, false);

        assert_eq!(group.focus_prev(), None);
        assert_eq!(
            group.step(10),
            Some(FocusChange { from: WidgetId(0), to: WidgetId(2) })
        );
        assert_eq!(group.focus_next(), None);
    }

    #[test]
    fn test_step_extreme_values() {
        let mut group = group_of(5, true);
        group.step(i32::MIN);
        group.step(i32::MAX);
        assert!(group.focused_index().unwrap() < 5);
    }

    #[test]
    fn test_step_on_empty_group() {
        let mut group = FocusGroup::new();
        assert_eq!(group.step(1), None);
    }

    #[test]
    fn test_focus_specific_widget() {
        let mut group = group_of(4, true);
        assert_eq!(
            group.focus(WidgetId(3)),
            Some(FocusChange { from: WidgetId(0), to: WidgetId(3) })
        );
        assert_eq!(group.focus(WidgetId(3)), None);
        assert_eq!(group.focus(WidgetId(42)), None);
    }

    #[test]
    fn test_remove_widget_adjusts_focus() {
        let mut group = group_of(4, true);
        group.focus(WidgetId(2));

        // Removing before the focus shifts the index
        assert!(group.remove_widget(WidgetId(0)));
        assert_eq!(group.focused(), Some(WidgetId(2)));

        // Removing the focused last widget moves focus to the new last
        group.focus(WidgetId(3));
        assert!(group.remove_widget(WidgetId(3)));
        assert_eq!(group.focused(), Some(WidgetId(2)));

        assert!(group.remove_widget(WidgetId(1)));
        assert!(group.remove_widget(WidgetId(2)));
        assert_eq!(group.focused(), None);
        assert!(!group.remove_widget(WidgetId(2)));
    }

    #[test]
    fn test_group_table() {
        let mut table: GroupTable<2> = GroupTable::new();
        let a = table.create_group().unwrap();
        let b = table.create_group_with(false).unwrap();
        assert_ne!(a, b);
        assert_eq!(table.create_group(), Err(NavError::GroupTableFull));

        table.add_widget(a, WidgetId(1)).unwrap();
        assert_eq!(
            table.add_widget(GroupId(9), WidgetId(1)),
            Err(NavError::UnknownGroup)
        );

        assert!(table.contains(b));
        assert!(!table.contains(GroupId(2)));
        assert!(!table.get(b).unwrap().wraps());
        assert_eq!(table.get(a).unwrap().focused(), Some(WidgetId(1)));
    }
}
