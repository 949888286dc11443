use alloc::vec::Vec;
use core::fmt;
use core::ops::Range;

use crate::context::{self, ContextValues, Handlers};
use crate::key::{KeyIndexMap, KeySet};
use crate::{
    Change, ChangeObserver, ContentItem, ContentListOptions, Error, ObserverId, Observers, Result,
    ViewType, ViewTypeAssigner,
};

/// An ordered list of keyed content items backing a scrolling view.
///
/// The list is the single source of truth for what the host renders and in which order. Every
/// mutation is reported to the registered [`ChangeObserver`]s right after it is applied, so the
/// host can patch its view instead of rebuilding it. Keys are unique at all times; a key → index
/// map is kept current by every primitive so lookups never rescan.
///
/// The list is single-threaded: observers run inline on the mutating call, and they only ever see
/// indices, never the list itself, so they cannot re-enter it.
pub struct ContentList<N = ()> {
    items: Vec<ContentItem<N>>,
    index: KeyIndexMap,
    view_types: ViewTypeAssigner,
    handlers: Handlers,
    observers: Observers,
}

impl<N> Default for ContentList<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N> ContentList<N> {
    pub fn new() -> Self {
        Self::with_options(ContentListOptions::default())
    }

    pub fn with_options(options: ContentListOptions) -> Self {
        fdebug!(
            capacity = options.capacity,
            handlers = options.handlers.len(),
            "ContentList::with_options"
        );
        #[cfg(feature = "std")]
        let index = KeyIndexMap::with_capacity(options.capacity);
        #[cfg(not(feature = "std"))]
        let index = KeyIndexMap::new();
        Self {
            items: Vec::with_capacity(options.capacity),
            index,
            view_types: ViewTypeAssigner::new(),
            handlers: options.handlers,
            observers: Observers::new(),
        }
    }

    /// The observer registry. Clone it to keep a handle that outlives this borrow.
    pub fn observers(&self) -> &Observers {
        &self.observers
    }

    pub fn add_observer(&self, observer: impl ChangeObserver + 'static) -> ObserverId {
        self.observers.add(observer)
    }

    pub fn remove_observer(&self, id: ObserverId) -> bool {
        self.observers.remove(id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ContentItem<N>> {
        self.items.get(index)
    }

    /// The whole content list in render order.
    pub fn items(&self) -> &[ContentItem<N>] {
        &self.items
    }

    pub fn iter(&self) -> core::slice::Iter<'_, ContentItem<N>> {
        self.items.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.items.iter().map(ContentItem::key)
    }

    pub fn find_by_key(&self, key: &str) -> Option<usize> {
        self.index.get(key).copied()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Inserts `items` before `index`, keeping their order.
    ///
    /// Fails without touching the list if `index > len`, if a key is empty, or if a key is
    /// already stored or repeated within `items`.
    pub fn insert(
        &mut self,
        index: usize,
        items: impl IntoIterator<Item = ContentItem<N>>,
    ) -> Result<()> {
        let items: Vec<ContentItem<N>> = items.into_iter().collect();
        let checked = self
            .check_position(index)
            .and_then(|()| self.check_new_keys(&items, index..index));
        if let Err(err) = checked {
            fwarn!(index, count = items.len(), error = %err, "ContentList::insert rejected");
            return Err(err);
        }
        let count = items.len();
        if count == 0 {
            return Ok(());
        }

        for (offset, item) in items.iter().enumerate() {
            self.index.insert(item.key().into(), index + offset);
        }
        self.items.splice(index..index, items);
        self.reindex(index + count..self.items.len());

        ftrace!(index, count, "ContentList::insert");
        self.observers.notify(Change::Inserted {
            start: index,
            count,
        });
        Ok(())
    }

    /// Removes the `count` items starting at `index`.
    pub fn remove(&mut self, index: usize, count: usize) -> Result<()> {
        if let Err(err) = self.check_range(index, count) {
            fwarn!(index, count, error = %err, "ContentList::remove rejected");
            return Err(err);
        }
        if count == 0 {
            return Ok(());
        }

        for item in self.items.drain(index..index + count) {
            self.index.remove(item.key());
            self.view_types.forget(item.key());
        }
        self.reindex(index..self.items.len());

        ftrace!(index, count, "ContentList::remove");
        self.observers.notify(Change::Removed {
            start: index,
            count,
        });
        Ok(())
    }

    /// Replaces the items starting at `index` with `items`, without moving anything.
    ///
    /// A replacement may reuse a key from the replaced span, but must not collide with any other
    /// stored key. Replaced items lose their view types.
    pub fn update(
        &mut self,
        index: usize,
        items: impl IntoIterator<Item = ContentItem<N>>,
    ) -> Result<()> {
        let items: Vec<ContentItem<N>> = items.into_iter().collect();
        let count = items.len();
        let checked = self
            .check_range(index, count)
            .and_then(|()| self.check_new_keys(&items, index..index + count));
        if let Err(err) = checked {
            fwarn!(index, count, error = %err, "ContentList::update rejected");
            return Err(err);
        }
        if count == 0 {
            return Ok(());
        }

        for old in &self.items[index..index + count] {
            self.index.remove(old.key());
            self.view_types.forget(old.key());
        }
        for (offset, item) in items.into_iter().enumerate() {
            self.index.insert(item.key().into(), index + offset);
            self.items[index + offset] = item;
        }

        ftrace!(index, count, "ContentList::update");
        self.observers.notify(Change::Changed {
            start: index,
            count,
        });
        Ok(())
    }

    /// Moves the item at `from` to `to`; every item in between shifts by one slot.
    pub fn move_item(&mut self, from: usize, to: usize) -> Result<()> {
        let checked = self
            .check_index(from)
            .and_then(|()| self.check_index(to));
        if let Err(err) = checked {
            fwarn!(from, to, error = %err, "ContentList::move_item rejected");
            return Err(err);
        }
        if from == to {
            return Ok(());
        }

        if from < to {
            self.items[from..=to].rotate_left(1);
        } else {
            self.items[to..=from].rotate_right(1);
        }
        self.reindex(from.min(to)..from.max(to) + 1);

        ftrace!(from, to, "ContentList::move_item");
        self.observers.notify(Change::Moved { from, to });
        Ok(())
    }

    /// Removes everything. Emits a single removal when the list was not empty.
    pub fn clear(&mut self) {
        let len = self.items.len();
        if len == 0 {
            return;
        }
        self.items.clear();
        self.index.clear();
        self.view_types.forget_all();
        ftrace!(count = len, "ContentList::clear");
        self.observers.notify(Change::Removed {
            start: 0,
            count: len,
        });
    }

    /// The view type of the item at `index`: a stable per-item type for native items, `None`
    /// for external ones (the external renderer types those itself).
    pub fn view_type(&mut self, index: usize) -> Result<Option<ViewType>> {
        self.check_index(index)?;
        let item = &self.items[index];
        if !item.is_native() {
            return Ok(None);
        }
        Ok(Some(self.view_types.view_type_for(item.key())))
    }

    /// The live native item currently holding `view_type`.
    pub fn item_for_view_type(&self, view_type: ViewType) -> Option<&ContentItem<N>> {
        let key = self.view_types.key_for(view_type)?;
        self.find_by_key(key).map(|index| &self.items[index])
    }

    pub fn view_types(&self) -> &ViewTypeAssigner {
        &self.view_types
    }

    pub fn handlers(&self) -> &Handlers {
        &self.handlers
    }

    pub fn set_handlers(&mut self, handlers: Handlers) {
        fdebug!(handlers = handlers.len(), "ContentList::set_handlers");
        self.handlers = handlers;
    }

    /// The store-wide handlers merged with the logging params of the item at `index`, which are
    /// exposed under [`crate::LOGGING_PARAMETERS_KEY`] and win over a handler of that name.
    pub fn context_values(&self, index: usize) -> Result<ContextValues> {
        self.check_index(index)?;
        Ok(context::merge(
            &self.handlers,
            self.items[index].logging_params(),
        ))
    }

    fn reindex(&mut self, range: Range<usize>) {
        for position in range {
            if let Some(slot) = self.index.get_mut(self.items[position].key()) {
                *slot = position;
            }
        }
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.items.len() {
            Ok(())
        } else {
            Err(Error::IndexOutOfBounds {
                index,
                len: self.items.len(),
            })
        }
    }

    fn check_position(&self, index: usize) -> Result<()> {
        if index <= self.items.len() {
            Ok(())
        } else {
            Err(Error::IndexOutOfBounds {
                index,
                len: self.items.len(),
            })
        }
    }

    pub(crate) fn check_range(&self, start: usize, count: usize) -> Result<()> {
        match start.checked_add(count) {
            Some(end) if end <= self.items.len() => Ok(()),
            _ => Err(Error::RangeOutOfBounds {
                start,
                count,
                len: self.items.len(),
            }),
        }
    }

    /// Checks that `items` may take the place of the span `replacing`: keys are non-empty,
    /// distinct, and not stored anywhere outside that span.
    pub(crate) fn check_new_keys(
        &self,
        items: &[ContentItem<N>],
        replacing: Range<usize>,
    ) -> Result<()> {
        let mut seen = KeySet::new();
        for item in items {
            let key = item.key();
            if key.is_empty() {
                return Err(Error::EmptyKey);
            }
            if !seen.insert(key) {
                return Err(Error::duplicate_key(key));
            }
            if let Some(position) = self.index.get(key) {
                if !replacing.contains(position) {
                    return Err(Error::duplicate_key(key));
                }
            }
        }
        Ok(())
    }
}

impl<'a, N> IntoIterator for &'a ContentList<N> {
    type Item = &'a ContentItem<N>;
    type IntoIter = core::slice::Iter<'a, ContentItem<N>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<N: fmt::Debug> fmt::Debug for ContentList<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentList")
            .field("items", &self.items)
            .field("view_types", &self.view_types)
            .field("handlers", &self.handlers.keys())
            .field("observers", &self.observers)
            .finish()
    }
}
