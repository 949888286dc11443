use alloc::string::String;

use crate::key::KeyMap;

/// Recyclable view type of a native item.
pub type ViewType = u32;

/// Lazily hands out view types to native items.
///
/// Every native item gets its own type on first query, so a host recycler never rebinds one
/// native view into another. Types count up from 1 and are never handed out twice, even after
/// the item that held one is gone.
#[derive(Clone, Debug, Default)]
pub struct ViewTypeAssigner {
    last: ViewType,
    assigned: KeyMap<ViewType>,
}

impl ViewTypeAssigner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the type assigned to `key`, assigning the next one if there is none yet.
    pub fn view_type_for(&mut self, key: &str) -> ViewType {
        if let Some(&view_type) = self.assigned.get(key) {
            return view_type;
        }
        self.last += 1;
        ftrace!(key, view_type = self.last, "assign view type");
        self.assigned.insert(String::from(key), self.last);
        self.last
    }

    pub fn get(&self, key: &str) -> Option<ViewType> {
        self.assigned.get(key).copied()
    }

    /// Reverse lookup. Linear in the number of live assignments.
    pub fn key_for(&self, view_type: ViewType) -> Option<&str> {
        self.assigned
            .iter()
            .find(|(_, assigned)| **assigned == view_type)
            .map(|(key, _)| key.as_str())
    }

    /// Drops the assignment of an item that left the list. Its type is retired, not recycled.
    pub fn forget(&mut self, key: &str) -> Option<ViewType> {
        self.assigned.remove(key)
    }

    pub(crate) fn forget_all(&mut self) {
        self.assigned.clear();
    }

    /// Number of live assignments.
    pub fn assigned_len(&self) -> usize {
        self.assigned.len()
    }

    /// The most recently assigned type, or 0 if none was ever assigned.
    pub fn last_assigned(&self) -> ViewType {
        self.last
    }
}
