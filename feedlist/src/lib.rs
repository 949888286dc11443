//! A keyed content list with a minimal-edit reconciler, for hosts that patch a scrolling view
//! incrementally instead of rebuilding it.
//!
//! For renderer-side helpers (change logs, view mirrors, scroll anchors), see the
//! `feedlist-adapter` crate.
//!
//! The crate owns three things:
//! - [`ContentList`]: the ordered items, a key → index map, and insert/remove/update/move
//!   primitives that each report exactly one change.
//! - [`ContentList::replace_range`]: turns a sub-range into a new keyed list with the fewest
//!   removals, insertions and moves, keeping surviving items (and so their host views) alive.
//! - [`ViewTypeAssigner`]: stable per-item view types for natively rendered items.
//!
//! It is UI-agnostic. The host is expected to:
//! - build [`ContentItem`]s from its content updates
//! - register a [`ChangeObserver`] that forwards changes to its view
//! - bind views by reading items back by index
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod context;
mod error;
mod item;
mod key;
mod list;
mod observer;
mod options;
mod reconcile;
mod view_type;

#[cfg(test)]
mod tests;

pub use context::{ContextValue, ContextValues, Handler, Handlers, LOGGING_PARAMETERS_KEY};
pub use error::{Error, Result};
pub use item::{
    ContentItem, ContentKind, ExternalContent, LoggingParams, NativeContent, TemplateRef,
};
pub use list::ContentList;
pub use observer::{Change, ChangeObserver, ObserverId, Observers};
pub use options::ContentListOptions;
pub use reconcile::ReconcileSummary;
pub use view_type::{ViewType, ViewTypeAssigner};
