use crate::menu::MenuItem;

/// Single source of truth for "what is highlighted". Holds the selectable
/// items only (separators are not addressable) and at most one active index.
#[derive(Debug)]
pub struct SelectionModel {
    items: Vec<MenuItem>,
    active: Option<usize>,
}

impl SelectionModel {
    /// The first item starts highlighted when the list is non-empty.
    pub fn new(items: Vec<MenuItem>) -> Self {
        let active = if items.is_empty() { None } else { Some(0) };
        Self { items, active }
    }

    /// Move the highlight by `delta`, wrapping in both directions.
    /// Returns the new index when the list is non-empty.
    pub fn move_by(&mut self, delta: isize) -> Option<usize> {
        if self.items.is_empty() {
            return None;
        }
        let len = self.items.len() as isize;
        let current = self.active.unwrap_or(0) as isize;
        let next = (current + delta).rem_euclid(len) as usize;
        self.active = Some(next);
        self.active
    }

    /// Absolute highlight assignment from pointer hover. Out-of-range
    /// indices are a defensive no-op.
    pub fn set_active(&mut self, index: usize) -> Option<usize> {
        if index < self.items.len() {
            self.active = Some(index);
            self.active
        } else {
            None
        }
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    pub fn current(&self) -> Option<&MenuItem> {
        self.active.and_then(|i| self.items.get(i))
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
