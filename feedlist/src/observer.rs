use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;

/// A single structural change to a [`crate::ContentList`].
///
/// Indices refer to the list as it is *after* the change was applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Change {
    Inserted { start: usize, count: usize },
    Removed { start: usize, count: usize },
    Changed { start: usize, count: usize },
    Moved { from: usize, to: usize },
}

impl Change {
    /// Delivers this change to the matching [`ChangeObserver`] method.
    pub fn dispatch(self, observer: &dyn ChangeObserver) {
        match self {
            Self::Inserted { start, count } => observer.range_inserted(start, count),
            Self::Removed { start, count } => observer.range_removed(start, count),
            Self::Changed { start, count } => observer.range_changed(start, count),
            Self::Moved { from, to } => observer.item_moved(from, to),
        }
    }
}

/// Receives the structural changes of a [`crate::ContentList`].
///
/// Calls are synchronous and arrive in the order the mutations happened, one call per mutating
/// primitive. Methods take `&self`: observers that keep state use interior mutability.
///
/// Any `Fn(Change)` closure is an observer.
pub trait ChangeObserver {
    fn range_inserted(&self, start: usize, count: usize);
    fn range_removed(&self, start: usize, count: usize);
    fn range_changed(&self, start: usize, count: usize);
    fn item_moved(&self, from: usize, to: usize);
}

impl<F: Fn(Change)> ChangeObserver for F {
    fn range_inserted(&self, start: usize, count: usize) {
        self(Change::Inserted { start, count });
    }

    fn range_removed(&self, start: usize, count: usize) {
        self(Change::Removed { start, count });
    }

    fn range_changed(&self, start: usize, count: usize) {
        self(Change::Changed { start, count });
    }

    fn item_moved(&self, from: usize, to: usize) {
        self(Change::Moved { from, to });
    }
}

/// Identifies a registered observer.
pub type ObserverId = u64;

struct Registry {
    entries: Vec<(ObserverId, Rc<dyn ChangeObserver>)>,
    next_id: ObserverId,
}

/// The observers registered on a list.
///
/// This is a shared handle: clones refer to the same registry, so an observer holding a clone
/// may remove itself (or others) while a notification is being delivered. Delivery iterates over
/// a snapshot taken when the change is emitted; registry edits take effect for the next change.
#[derive(Clone)]
pub struct Observers {
    inner: Rc<RefCell<Registry>>,
}

impl Default for Observers {
    fn default() -> Self {
        Self::new()
    }
}

impl Observers {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(Registry {
                entries: Vec::new(),
                next_id: 1,
            })),
        }
    }

    pub fn add(&self, observer: impl ChangeObserver + 'static) -> ObserverId {
        self.add_shared(Rc::new(observer))
    }

    /// Registers an observer the caller keeps a handle to (e.g. to read what it recorded).
    pub fn add_shared(&self, observer: Rc<dyn ChangeObserver>) -> ObserverId {
        let mut registry = self.inner.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.entries.push((id, observer));
        id
    }

    /// Returns `true` if the observer was registered.
    pub fn remove(&self, id: ObserverId) -> bool {
        let mut registry = self.inner.borrow_mut();
        let before = registry.entries.len();
        registry.entries.retain(|(entry_id, _)| *entry_id != id);
        registry.entries.len() != before
    }

    pub fn clear(&self) {
        self.inner.borrow_mut().entries.clear();
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().entries.is_empty()
    }

    pub(crate) fn notify(&self, change: Change) {
        let snapshot: Vec<Rc<dyn ChangeObserver>> = {
            let registry = self.inner.borrow();
            if registry.entries.is_empty() {
                return;
            }
            registry
                .entries
                .iter()
                .map(|(_, observer)| Rc::clone(observer))
                .collect()
        };
        ftrace!(?change, observers = snapshot.len(), "notify");
        for observer in &snapshot {
            change.dispatch(observer.as_ref());
        }
    }
}

impl fmt::Debug for Observers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registry = self.inner.borrow();
        f.debug_struct("Observers")
            .field(
                "ids",
                &registry
                    .entries
                    .iter()
                    .map(|(id, _)| *id)
                    .collect::<Vec<_>>(),
            )
            .finish_non_exhaustive()
    }
}
