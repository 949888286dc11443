use alloc::vec;
use alloc::vec::Vec;

use crate::key::KeySet;
use crate::{ContentItem, ContentList, Result};

/// What one reconciliation pass did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReconcileSummary {
    /// Contiguous runs removed (one `range_removed` each).
    pub removed_runs: usize,
    pub removed_items: usize,
    /// Contiguous runs inserted (one `range_inserted` each).
    pub inserted_runs: usize,
    pub inserted_items: usize,
    /// Surviving items that had to move (one `item_moved` each).
    pub moves: usize,
}

impl ReconcileSummary {
    pub fn has_change(&self) -> bool {
        self.removed_runs > 0 || self.inserted_runs > 0 || self.moves > 0
    }
}

impl<N> ContentList<N> {
    /// Replaces `range_start..range_start + count` with `new_list`, emitting a minimal edit
    /// script instead of a full remove + insert.
    ///
    /// Items whose key appears in both the old range and `new_list` survive: the stored item is
    /// kept (and moved if needed), the incoming item with the same key is dropped. Returns `true`
    /// if anything was removed, inserted or moved.
    ///
    /// See [`ContentList::reconcile_range`] for the edit script itself.
    pub fn replace_range(
        &mut self,
        range_start: usize,
        count: usize,
        new_list: impl IntoIterator<Item = ContentItem<N>>,
    ) -> Result<bool> {
        self.reconcile_range(range_start, count, new_list)
            .map(|summary| summary.has_change())
    }

    /// Same as [`ContentList::replace_range`], reporting what was done.
    ///
    /// The arguments are validated before anything is touched: the range must be in bounds and
    /// `new_list` keys must be non-empty, distinct, and not stored outside the range. The edit
    /// script is then:
    ///
    /// 1. Right to left over the old range, every maximal run of items whose key is not in
    ///    `new_list` is removed with one `remove`. Going backwards keeps the positions still to
    ///    visit valid.
    /// 2. Left to right over `new_list`, a surviving item not yet at its target position is moved
    ///    there with one `move_item`; every maximal run of new items is inserted with one
    ///    `insert`.
    ///
    /// All removals are therefore notified before any insertion or move.
    pub fn reconcile_range(
        &mut self,
        range_start: usize,
        count: usize,
        new_list: impl IntoIterator<Item = ContentItem<N>>,
    ) -> Result<ReconcileSummary> {
        let new_list: Vec<ContentItem<N>> = new_list.into_iter().collect();
        let checked = self.check_range(range_start, count).and_then(|()| {
            self.check_new_keys(&new_list, range_start..range_start + count)
        });
        if let Err(err) = checked {
            fwarn!(
                range_start,
                count,
                new_len = new_list.len(),
                error = %err,
                "ContentList::replace_range rejected"
            );
            return Err(err);
        }

        let mut summary = ReconcileSummary::default();

        {
            let new_keys: KeySet<'_> = new_list.iter().map(ContentItem::key).collect();
            let survives = |item: &ContentItem<N>| new_keys.contains(item.key());

            let mut cursor = range_start + count;
            while cursor > range_start {
                if survives(&self.items()[cursor - 1]) {
                    cursor -= 1;
                    continue;
                }
                let run_end = cursor;
                while cursor > range_start && !survives(&self.items()[cursor - 1]) {
                    cursor -= 1;
                }
                self.remove(cursor, run_end - cursor)?;
                summary.removed_runs += 1;
                summary.removed_items += run_end - cursor;
            }
        }

        // Only survivors of the old range are still stored under a `new_list` key now.
        let mut pending = new_list.into_iter().peekable();
        let mut target = range_start;
        while let Some(item) = pending.next() {
            if let Some(current) = self.find_by_key(item.key()) {
                if current != target {
                    self.move_item(current, target)?;
                    summary.moves += 1;
                }
                target += 1;
                continue;
            }

            let mut run = vec![item];
            while let Some(next) = pending.next_if(|next| !self.contains_key(next.key())) {
                run.push(next);
            }
            let run_len = run.len();
            self.insert(target, run)?;
            summary.inserted_runs += 1;
            summary.inserted_items += run_len;
            target += run_len;
        }

        fdebug!(
            range_start,
            count,
            len = self.len(),
            removed_runs = summary.removed_runs,
            inserted_runs = summary.inserted_runs,
            moves = summary.moves,
            "ContentList::replace_range"
        );
        Ok(summary)
    }
}
