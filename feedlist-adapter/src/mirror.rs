use alloc::vec::Vec;

use feedlist::{Change, ContentItem, ContentList};

/// A renderer-side copy of a [`ContentList`]: one slot per item holding whatever the host bound
/// for it (a view handle, a row model, ...).
///
/// Replaying the list's changes keeps bound slots attached to their items as they move; slots
/// opened by an insertion or invalidated by an update are left empty until
/// [`ViewMirror::rebind`] fills them from the list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewMirror<T> {
    slots: Vec<Option<T>>,
}

impl<T> Default for ViewMirror<T> {
    fn default() -> Self {
        Self { slots: Vec::new() }
    }
}

impl<T> ViewMirror<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds every item of `list`.
    pub fn from_list<N>(
        list: &ContentList<N>,
        mut bind: impl FnMut(&ContentItem<N>) -> T,
    ) -> Self {
        Self {
            slots: list.iter().map(|item| Some(bind(item))).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slots(&self) -> &[Option<T>] {
        &self.slots
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    /// Number of slots waiting for [`ViewMirror::rebind`].
    pub fn unbound(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_none()).count()
    }

    /// Applies one change. Returns `false` (and leaves the mirror untouched) if the change does
    /// not fit the mirror, which means the mirror missed an earlier change.
    pub fn apply(&mut self, change: Change) -> bool {
        let len = self.slots.len();
        let fits = match change {
            Change::Inserted { start, .. } => start <= len,
            Change::Removed { start, count } | Change::Changed { start, count } => {
                start.checked_add(count).is_some_and(|end| end <= len)
            }
            Change::Moved { from, to } => from < len && to < len,
        };
        if !fits {
            #[cfg(feature = "tracing")]
            tracing::warn!(
                target: "feedlist_adapter",
                ?change,
                len,
                "ViewMirror: change out of bounds"
            );
            return false;
        }

        match change {
            Change::Inserted { start, count } => {
                self.slots
                    .splice(start..start, core::iter::repeat_with(|| None).take(count));
            }
            Change::Removed { start, count } => {
                self.slots.drain(start..start + count);
            }
            Change::Changed { start, count } => {
                for slot in &mut self.slots[start..start + count] {
                    *slot = None;
                }
            }
            Change::Moved { from, to } => {
                let slot = self.slots.remove(from);
                self.slots.insert(to, slot);
            }
        }
        true
    }

    /// Applies changes in order, stopping at the first one that does not fit.
    ///
    /// Returns how many were applied.
    pub fn apply_all(&mut self, changes: impl IntoIterator<Item = Change>) -> usize {
        let mut applied = 0;
        for change in changes {
            if !self.apply(change) {
                break;
            }
            applied += 1;
        }
        applied
    }

    /// Binds every empty slot from the item now at its index. Returns how many were bound.
    ///
    /// Call this after replaying all pending changes, when the mirror and the list line up.
    pub fn rebind<N>(
        &mut self,
        list: &ContentList<N>,
        mut bind: impl FnMut(&ContentItem<N>) -> T,
    ) -> usize {
        debug_assert_eq!(self.slots.len(), list.len(), "mirror out of sync with list");
        let mut bound = 0;
        for (slot, item) in self.slots.iter_mut().zip(list.iter()) {
            if slot.is_none() {
                *slot = Some(bind(item));
                bound += 1;
            }
        }
        bound
    }
}
