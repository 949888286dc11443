use alloc::string::String;

use feedlist::ContentList;

/// A scroll position expressed against an item identity rather than an index.
///
/// Typical use: capture before a content update (or before saving UI state), restore once the
/// list has been reconciled, so the viewport stays on the same item even if items were inserted
/// or removed above it.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollAnchor {
    pub key: String,
    /// Pixel offset of the viewport top from the anchor item's top.
    pub offset: i32,
}

/// Where to scroll to restore an anchor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnchorTarget {
    pub index: usize,
    pub offset: i32,
}

/// Captures an anchor on the item at `index`.
///
/// Returns `None` if there is no such item, or if it is native: native items (spinners,
/// placeholders, zero states) come and go with loading state and make poor anchors.
pub fn capture_anchor<N>(
    list: &ContentList<N>,
    index: usize,
    offset: i32,
) -> Option<ScrollAnchor> {
    let item = list.get(index)?;
    if item.is_native() {
        return None;
    }
    Some(ScrollAnchor {
        key: String::from(item.key()),
        offset,
    })
}

/// Resolves a previously captured anchor against the current list.
///
/// Returns `None` when the anchor item is gone, or has been replaced by a native item under the
/// same key.
pub fn resolve_anchor<N>(list: &ContentList<N>, anchor: &ScrollAnchor) -> Option<AnchorTarget> {
    let index = list.find_by_key(&anchor.key)?;
    if list.get(index)?.is_native() {
        return None;
    }
    Some(AnchorTarget {
        index,
        offset: anchor.offset,
    })
}
