//! Adapter utilities for the `feedlist` crate.
//!
//! The `feedlist` crate owns the content and emits structural changes. This crate provides
//! small, framework-neutral helpers a host renderer commonly needs on the receiving end:
//!
//! - Recording changes for deferred application ([`ChangeLog`])
//! - Keeping a renderer-side copy of the list in step with it ([`ViewMirror`])
//! - Keeping the viewport on the same item across content updates ([`ScrollAnchor`])
//!
//! This crate is intentionally framework-agnostic (no widget toolkit bindings).
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

mod anchor;
mod change_log;
mod mirror;


pub use anchor::{AnchorTarget, ScrollAnchor, capture_anchor, resolve_anchor};
pub use change_log::ChangeLog;
pub use mirror::ViewMirror;
