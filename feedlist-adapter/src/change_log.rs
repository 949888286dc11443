use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;

use feedlist::{Change, ChangeObserver, ContentList, ObserverId};

/// An observer that records every change in delivery order.
///
/// Hosts that apply changes lazily (e.g. once per frame) attach one of these and drain it with
/// [`ChangeLog::take`].
#[derive(Debug, Default)]
pub struct ChangeLog {
    changes: RefCell<Vec<Change>>,
}

impl ChangeLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new log on `list` and returns it with its observer id.
    pub fn attach<N>(list: &ContentList<N>) -> (Rc<Self>, ObserverId) {
        let log = Rc::new(Self::new());
        let id = list.observers().add_shared(log.clone());
        (log, id)
    }

    /// Drains the recorded changes.
    pub fn take(&self) -> Vec<Change> {
        core::mem::take(&mut *self.changes.borrow_mut())
    }

    pub fn snapshot(&self) -> Vec<Change> {
        self.changes.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.changes.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.borrow().is_empty()
    }

    fn push(&self, change: Change) {
        self.changes.borrow_mut().push(change);
    }
}

impl ChangeObserver for ChangeLog {
    fn range_inserted(&self, start: usize, count: usize) {
        self.push(Change::Inserted { start, count });
    }

    fn range_removed(&self, start: usize, count: usize) {
        self.push(Change::Removed { start, count });
    }

    fn range_changed(&self, start: usize, count: usize) {
        self.push(Change::Changed { start, count });
    }

    fn item_moved(&self, from: usize, to: usize) {
        self.push(Change::Moved { from, to });
    }
}
