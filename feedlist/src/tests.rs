use crate::*;

use alloc::format;
use alloc::rc::Rc;
use alloc::string::{String, ToString};
use alloc::vec;
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};

#[derive(Clone, Copy, Debug)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u64(&mut self) -> u64 {
        // Deterministic, dependency-free PRNG for tests.
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0 >> 11
    }

    fn gen_range_usize(&mut self, start: usize, end_exclusive: usize) -> usize {
        debug_assert!(start < end_exclusive);
        start + (self.next_u64() % (end_exclusive - start) as u64) as usize
    }

    fn gen_bool(&mut self) -> bool {
        (self.next_u64() & 1) == 1
    }
}

fn ext(key: &str) -> ContentItem {
    ContentItem::external(key, key.as_bytes().to_vec())
}

fn items(keys: &[&str]) -> Vec<ContentItem> {
    keys.iter().map(|k| ext(k)).collect()
}

fn list_of(keys: &[&str]) -> ContentList {
    let mut list = ContentList::new();
    list.insert(0, items(keys)).unwrap();
    list
}

fn keys_of<N>(list: &ContentList<N>) -> Vec<String> {
    list.keys().map(String::from).collect()
}

fn record<N>(list: &ContentList<N>) -> Rc<RefCell<Vec<Change>>> {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    list.add_observer(move |change: Change| sink.borrow_mut().push(change));
    log
}

fn assert_index_consistent<N>(list: &ContentList<N>) {
    for (i, item) in list.iter().enumerate() {
        assert_eq!(list.find_by_key(item.key()), Some(i), "key {}", item.key());
    }
    let mut seen: Vec<&str> = list.keys().collect();
    seen.sort_unstable();
    seen.dedup();
    assert_eq!(seen.len(), list.len(), "keys must be unique");
}

/// Applies `changes` to a copy of the old keys the way a host view would: moved and surviving
/// slots carry their key along, inserted and changed slots are rebound from the final list.
fn replay(before: &[String], changes: &[Change], after: &ContentList) -> Vec<String> {
    let mut slots: Vec<Option<String>> = before.iter().cloned().map(Some).collect();
    for change in changes {
        match *change {
            Change::Inserted { start, count } => {
                for offset in 0..count {
                    slots.insert(start + offset, None);
                }
            }
            Change::Removed { start, count } => {
                slots.drain(start..start + count);
            }
            Change::Changed { start, count } => {
                for slot in &mut slots[start..start + count] {
                    *slot = None;
                }
            }
            Change::Moved { from, to } => {
                let slot = slots.remove(from);
                slots.insert(to, slot);
            }
        }
    }
    slots
        .into_iter()
        .enumerate()
        .map(|(i, slot)| slot.unwrap_or_else(|| after.get(i).unwrap().key().to_string()))
        .collect()
}

#[test]
fn insert_preserves_order_and_notifies_once() {
    let mut list = list_of(&["a", "d"]);
    let log = record(&list);

    list.insert(1, items(&["b", "c"])).unwrap();

    assert_eq!(keys_of(&list), ["a", "b", "c", "d"]);
    assert_eq!(*log.borrow(), [Change::Inserted { start: 1, count: 2 }]);
    assert_index_consistent(&list);
}

#[test]
fn insert_at_end_is_allowed() {
    let mut list = list_of(&["a"]);
    list.insert(1, items(&["b"])).unwrap();
    assert_eq!(keys_of(&list), ["a", "b"]);
}

#[test]
fn insert_rejects_bad_arguments_without_mutating() {
    let mut list = list_of(&["a", "b"]);
    let log = record(&list);

    assert_eq!(
        list.insert(3, items(&["x"])),
        Err(Error::IndexOutOfBounds { index: 3, len: 2 })
    );
    assert_eq!(
        list.insert(0, items(&["x", "b"])),
        Err(Error::DuplicateKey { key: "b".into() })
    );
    assert_eq!(
        list.insert(0, items(&["x", "x"])),
        Err(Error::DuplicateKey { key: "x".into() })
    );
    assert_eq!(list.insert(0, items(&[""])), Err(Error::EmptyKey));

    assert_eq!(keys_of(&list), ["a", "b"]);
    assert!(log.borrow().is_empty());
    assert!(!list.contains_key("x"));
}

#[test]
fn empty_primitives_are_silent_no_ops() {
    let mut list = list_of(&["a", "b"]);
    let log = record(&list);

    list.insert(1, Vec::new()).unwrap();
    list.remove(2, 0).unwrap();
    list.update(0, Vec::new()).unwrap();
    list.move_item(1, 1).unwrap();

    assert!(log.borrow().is_empty());
}

#[test]
fn remove_span_reindexes_tail() {
    let mut list = list_of(&["a", "b", "c", "d", "e"]);
    let log = record(&list);

    list.remove(1, 2).unwrap();

    assert_eq!(keys_of(&list), ["a", "d", "e"]);
    assert_eq!(list.find_by_key("b"), None);
    assert_eq!(list.find_by_key("e"), Some(2));
    assert_eq!(*log.borrow(), [Change::Removed { start: 1, count: 2 }]);
}

#[test]
fn remove_rejects_out_of_range_span() {
    let mut list = list_of(&["a", "b"]);
    assert_eq!(
        list.remove(1, 2),
        Err(Error::RangeOutOfBounds {
            start: 1,
            count: 2,
            len: 2
        })
    );
    assert_eq!(
        list.remove(usize::MAX, 2),
        Err(Error::RangeOutOfBounds {
            start: usize::MAX,
            count: 2,
            len: 2
        })
    );
    assert_eq!(list.len(), 2);
}

#[test]
fn update_replaces_in_place() {
    let mut list = list_of(&["a", "b", "c"]);
    let log = record(&list);

    list.update(1, vec![ContentItem::external("b", b"new".to_vec())])
        .unwrap();

    assert_eq!(keys_of(&list), ["a", "b", "c"]);
    assert_eq!(list.get(1).unwrap().as_external().unwrap().payload, b"new");
    assert_eq!(*log.borrow(), [Change::Changed { start: 1, count: 1 }]);
}

#[test]
fn update_may_swap_keys_within_the_span() {
    let mut list = list_of(&["a", "b", "c"]);
    list.update(0, items(&["b", "a"])).unwrap();
    assert_eq!(keys_of(&list), ["b", "a", "c"]);
    assert_index_consistent(&list);
}

#[test]
fn update_rejects_collision_outside_the_span() {
    let mut list = list_of(&["a", "b", "c"]);
    assert_eq!(
        list.update(0, items(&["c"])),
        Err(Error::DuplicateKey { key: "c".into() })
    );
    assert_eq!(
        list.update(2, items(&["x", "y"])),
        Err(Error::RangeOutOfBounds {
            start: 2,
            count: 2,
            len: 3
        })
    );
    assert_eq!(keys_of(&list), ["a", "b", "c"]);
}

#[test]
fn move_item_rotates_span_forward_and_backward() {
    let mut list = list_of(&["a", "b", "c", "d"]);
    let log = record(&list);

    list.move_item(0, 2).unwrap();
    assert_eq!(keys_of(&list), ["b", "c", "a", "d"]);

    list.move_item(3, 0).unwrap();
    assert_eq!(keys_of(&list), ["d", "b", "c", "a"]);

    assert_eq!(
        *log.borrow(),
        [
            Change::Moved { from: 0, to: 2 },
            Change::Moved { from: 3, to: 0 }
        ]
    );
    assert_index_consistent(&list);
    assert_eq!(
        list.move_item(0, 4),
        Err(Error::IndexOutOfBounds { index: 4, len: 4 })
    );
}

#[test]
fn clear_emits_one_removal() {
    let mut list = list_of(&["a", "b", "c"]);
    let log = record(&list);

    list.clear();
    list.clear();

    assert!(list.is_empty());
    assert!(!list.contains_key("a"));
    assert_eq!(*log.borrow(), [Change::Removed { start: 0, count: 3 }]);
}

#[test]
fn random_primitives_keep_index_consistent() {
    let mut rng = Lcg::new(0x5eed);
    let mut list: ContentList = ContentList::new();
    let mut next_key = 0usize;

    for _ in 0..2_000 {
        let len = list.len();
        match rng.gen_range_usize(0, 4) {
            0 => {
                let count = rng.gen_range_usize(1, 4);
                let batch: Vec<ContentItem> = (0..count)
                    .map(|_| {
                        next_key += 1;
                        ext(&format!("k{next_key}"))
                    })
                    .collect();
                list.insert(rng.gen_range_usize(0, len + 1), batch).unwrap();
            }
            1 if len > 0 => {
                let start = rng.gen_range_usize(0, len);
                let count = rng.gen_range_usize(0, len - start + 1);
                list.remove(start, count).unwrap();
            }
            2 if len > 0 => {
                let from = rng.gen_range_usize(0, len);
                let to = rng.gen_range_usize(0, len);
                list.move_item(from, to).unwrap();
            }
            3 if len > 0 => {
                let at = rng.gen_range_usize(0, len);
                let key = if rng.gen_bool() {
                    list.get(at).unwrap().key().to_string()
                } else {
                    next_key += 1;
                    format!("k{next_key}")
                };
                list.update(at, vec![ext(&key)]).unwrap();
            }
            _ => {}
        }
        assert_index_consistent(&list);
    }
}

#[test]
fn replace_range_removes_then_inserts_runs() {
    let mut list = list_of(&["a", "b", "c"]);
    let log = record(&list);

    assert!(list.replace_range(0, 3, items(&["a", "d", "e", "c"])).unwrap());

    assert_eq!(keys_of(&list), ["a", "d", "e", "c"]);
    assert_eq!(
        *log.borrow(),
        [
            Change::Removed { start: 1, count: 1 },
            Change::Inserted { start: 1, count: 2 }
        ]
    );
}

#[test]
fn replace_range_moves_survivors() {
    let mut list = list_of(&["a", "b", "c"]);
    let log = record(&list);

    assert!(list.replace_range(0, 3, items(&["b", "c", "a"])).unwrap());

    assert_eq!(keys_of(&list), ["b", "c", "a"]);
    assert_eq!(
        *log.borrow(),
        [
            Change::Moved { from: 1, to: 0 },
            Change::Moved { from: 2, to: 1 }
        ]
    );
}

#[test]
fn replace_range_to_empty_is_one_removal() {
    let mut list = list_of(&["a", "b", "c"]);
    let log = record(&list);

    assert!(list.replace_range(0, 3, Vec::new()).unwrap());

    assert!(list.is_empty());
    assert_eq!(*log.borrow(), [Change::Removed { start: 0, count: 3 }]);
}

#[test]
fn replace_range_from_empty_is_one_insertion() {
    let mut list = ContentList::new();
    let log = record(&list);

    assert!(list.replace_range(0, 0, items(&["x", "y"])).unwrap());

    assert_eq!(keys_of(&list), ["x", "y"]);
    assert_eq!(*log.borrow(), [Change::Inserted { start: 0, count: 2 }]);
}

#[test]
fn replace_range_on_identical_range_is_silent() {
    let mut list = list_of(&["a", "b", "c"]);
    let log = record(&list);

    assert!(!list.replace_range(0, 3, items(&["a", "b", "c"])).unwrap());
    assert!(log.borrow().is_empty());
}

#[test]
fn replace_range_twice_changes_only_once() {
    let mut list = list_of(&["a", "b", "c", "d"]);
    let target = ["d", "x", "b", "y"];

    assert!(list.replace_range(0, 4, items(&target)).unwrap());
    assert!(!list.replace_range(0, 4, items(&target)).unwrap());
    assert_eq!(keys_of(&list), target);
}

#[test]
fn replace_range_groups_removal_runs_back_to_front() {
    let mut list = list_of(&["a", "b", "c", "d", "e", "f"]);
    let log = record(&list);

    let summary = list.reconcile_range(0, 6, items(&["a", "d", "f"])).unwrap();

    assert_eq!(
        *log.borrow(),
        [
            Change::Removed { start: 4, count: 1 },
            Change::Removed { start: 1, count: 2 }
        ]
    );
    assert_eq!(
        summary,
        ReconcileSummary {
            removed_runs: 2,
            removed_items: 3,
            inserted_runs: 0,
            inserted_items: 0,
            moves: 0,
        }
    );
}

#[test]
fn replace_range_leaves_items_outside_the_range_alone() {
    let mut list = list_of(&["header", "a", "b", "footer"]);
    let log = record(&list);

    assert!(list.replace_range(1, 2, items(&["b", "c", "a"])).unwrap());

    assert_eq!(keys_of(&list), ["header", "b", "c", "a", "footer"]);
    assert_eq!(
        *log.borrow(),
        [
            Change::Moved { from: 2, to: 1 },
            Change::Inserted { start: 2, count: 1 }
        ]
    );
}

#[test]
fn replace_range_rejects_bad_arguments_up_front() {
    let mut list = list_of(&["header", "a", "b"]);
    let log = record(&list);

    assert_eq!(
        list.replace_range(1, 3, items(&["a"])),
        Err(Error::RangeOutOfBounds {
            start: 1,
            count: 3,
            len: 3
        })
    );
    assert_eq!(
        list.replace_range(1, 2, items(&["x", "x"])),
        Err(Error::DuplicateKey { key: "x".into() })
    );
    assert_eq!(
        list.replace_range(1, 2, items(&["a", "header"])),
        Err(Error::DuplicateKey {
            key: "header".into()
        })
    );

    assert_eq!(keys_of(&list), ["header", "a", "b"]);
    assert!(log.borrow().is_empty());
}

#[test]
fn replace_range_keeps_the_stored_item_for_surviving_keys() {
    let mut list: ContentList = ContentList::new();
    list.insert(0, vec![ContentItem::external("a", b"old".to_vec())])
        .unwrap();

    let changed = list
        .replace_range(0, 1, vec![ContentItem::external("a", b"new".to_vec())])
        .unwrap();

    assert!(!changed);
    assert_eq!(list.get(0).unwrap().as_external().unwrap().payload, b"old");
}

fn pick<'a>(rng: &mut Lcg, pool: &'a [String]) -> Vec<&'a str> {
    pool.iter()
        .filter(|_| rng.gen_bool())
        .map(String::as_str)
        .collect()
}

#[test]
fn replace_range_replays_onto_old_state() {
    let mut rng = Lcg::new(42);
    let pool: Vec<String> = (0..12).map(|i| format!("s{i}")).collect();

    for _ in 0..300 {
        let mut old = pick(&mut rng, &pool);
        let mut new = pick(&mut rng, &pool);
        // Shuffle so moves happen too.
        for i in (1..new.len()).rev() {
            new.swap(i, rng.gen_range_usize(0, i + 1));
        }
        for i in (1..old.len()).rev() {
            old.swap(i, rng.gen_range_usize(0, i + 1));
        }

        let mut list = list_of(&old);
        let before = keys_of(&list);
        let log = record(&list);

        let changed = list.replace_range(0, old.len(), items(&new)).unwrap();

        assert_eq!(keys_of(&list), new);
        assert_eq!(changed, old != new);
        assert_eq!(replay(&before, &log.borrow(), &list), new);
        assert_index_consistent(&list);
    }
}

#[test]
fn native_items_get_stable_increasing_view_types() {
    let mut list: ContentList<&'static str> = ContentList::new();
    list.insert(
        0,
        vec![
            ContentItem::native("spinner", TemplateRef(7), "spinner"),
            ContentItem::external("card", b"card".to_vec()),
            ContentItem::native("zero-state", TemplateRef(7), "zero"),
        ],
    )
    .unwrap();

    assert_eq!(list.view_type(2).unwrap(), Some(1));
    assert_eq!(list.view_type(0).unwrap(), Some(2));
    assert_eq!(list.view_type(1).unwrap(), None);
    assert_eq!(list.view_type(2).unwrap(), Some(1));
    assert_eq!(
        list.view_type(3),
        Err(Error::IndexOutOfBounds { index: 3, len: 3 })
    );

    list.move_item(2, 0).unwrap();
    assert_eq!(list.view_type(0).unwrap(), Some(1));

    assert_eq!(list.item_for_view_type(2).unwrap().key(), "spinner");
    assert!(list.item_for_view_type(99).is_none());
}

#[test]
fn view_types_are_never_reused() {
    let mut list: ContentList = ContentList::new();
    list.insert(0, vec![ContentItem::native("n", TemplateRef(1), ())])
        .unwrap();
    assert_eq!(list.view_type(0).unwrap(), Some(1));

    list.remove(0, 1).unwrap();
    assert!(list.item_for_view_type(1).is_none());
    assert_eq!(list.view_types().assigned_len(), 0);

    list.insert(0, vec![ContentItem::native("n", TemplateRef(1), ())])
        .unwrap();
    assert_eq!(list.view_type(0).unwrap(), Some(2));

    list.update(0, vec![ContentItem::native("n", TemplateRef(2), ())])
        .unwrap();
    assert_eq!(list.view_type(0).unwrap(), Some(3));
    assert_eq!(list.view_types().last_assigned(), 3);
}

#[test]
fn surviving_native_item_keeps_its_view_type_through_reconcile() {
    let mut list: ContentList = ContentList::new();
    list.insert(
        0,
        vec![
            ContentItem::native("spinner", TemplateRef(1), ()),
            ContentItem::external("a", Vec::new()),
        ],
    )
    .unwrap();
    let spinner_type = list.view_type(0).unwrap();

    list.replace_range(
        0,
        2,
        vec![
            ContentItem::external("a", Vec::new()),
            ContentItem::external("b", Vec::new()),
            ContentItem::native("spinner", TemplateRef(1), ()),
        ],
    )
    .unwrap();

    assert_eq!(list.find_by_key("spinner"), Some(2));
    assert_eq!(list.view_type(2).unwrap(), spinner_type);
}

#[test]
fn observer_removed_mid_round_still_sees_that_round() {
    let mut list = list_of(&["a"]);
    let seen_by_b = Rc::new(Cell::new(0usize));
    let b_id = Rc::new(Cell::new(0));

    let registry = list.observers().clone();
    let b_to_remove = Rc::clone(&b_id);
    list.add_observer(move |_: Change| {
        registry.remove(b_to_remove.get());
    });
    let counter = Rc::clone(&seen_by_b);
    b_id.set(list.add_observer(move |_: Change| counter.set(counter.get() + 1)));

    list.insert(1, items(&["b"])).unwrap();
    assert_eq!(seen_by_b.get(), 1);
    assert_eq!(list.observers().len(), 1);

    list.insert(2, items(&["c"])).unwrap();
    assert_eq!(seen_by_b.get(), 1);
}

#[test]
fn observer_added_mid_round_starts_with_the_next_change() {
    let mut list = list_of(&["a"]);
    let late = Rc::new(RefCell::new(Vec::new()));

    let registry = list.observers().clone();
    let late_sink = Rc::clone(&late);
    let added = Cell::new(false);
    list.add_observer(move |_: Change| {
        if !added.replace(true) {
            let sink = Rc::clone(&late_sink);
            registry.add(move |change: Change| sink.borrow_mut().push(change));
        }
    });

    list.remove(0, 1).unwrap();
    assert!(late.borrow().is_empty());

    list.insert(0, items(&["z"])).unwrap();
    assert_eq!(*late.borrow(), [Change::Inserted { start: 0, count: 1 }]);
}

#[test]
fn removed_observer_stops_receiving() {
    let mut list = list_of(&["a"]);
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    let id = list.add_observer(move |change: Change| sink.borrow_mut().push(change));

    assert!(list.remove_observer(id));
    assert!(!list.remove_observer(id));
    list.remove(0, 1).unwrap();
    assert!(log.borrow().is_empty());
}

struct Counting {
    calls: RefCell<Vec<&'static str>>,
}

impl ChangeObserver for Counting {
    fn range_inserted(&self, _start: usize, _count: usize) {
        self.calls.borrow_mut().push("inserted");
    }

    fn range_removed(&self, _start: usize, _count: usize) {
        self.calls.borrow_mut().push("removed");
    }

    fn range_changed(&self, _start: usize, _count: usize) {
        self.calls.borrow_mut().push("changed");
    }

    fn item_moved(&self, _from: usize, _to: usize) {
        self.calls.borrow_mut().push("moved");
    }
}

#[test]
fn trait_observers_receive_each_kind() {
    let mut list = list_of(&["a", "b"]);
    let observer = Rc::new(Counting {
        calls: RefCell::new(Vec::new()),
    });
    list.observers().add_shared(observer.clone());

    list.insert(0, items(&["c"])).unwrap();
    list.remove(0, 1).unwrap();
    list.update(0, items(&["a"])).unwrap();
    list.move_item(0, 1).unwrap();

    assert_eq!(
        *observer.calls.borrow(),
        ["inserted", "removed", "changed", "moved"]
    );
}

#[test]
fn context_values_merge_item_logging_params_over_handlers() {
    let options = ContentListOptions::new()
        .with_handler("actions", Rc::new(17u32))
        .with_handler(LOGGING_PARAMETERS_KEY, Rc::new("global"));
    let mut list: ContentList = ContentList::with_options(options);
    let params = LoggingParams::new().with("client", "feed");
    list.insert(
        0,
        vec![
            ContentItem::external("a", Vec::new()).with_logging_params(params.clone()),
            ContentItem::external("b", Vec::new()),
        ],
    )
    .unwrap();

    let a = list.context_values(0).unwrap();
    assert_eq!(a["actions"].downcast_handler::<u32>(), Some(&17));
    assert_eq!(a[LOGGING_PARAMETERS_KEY].as_logging_params(), Some(&params));

    let b = list.context_values(1).unwrap();
    assert!(b[LOGGING_PARAMETERS_KEY].as_handler().is_some());

    list.set_handlers(Handlers::new());
    assert!(list.context_values(1).unwrap().is_empty());
    assert_eq!(
        list.context_values(2).unwrap_err(),
        Error::IndexOutOfBounds { index: 2, len: 2 }
    );
}

#[test]
fn item_builders_only_touch_their_own_kind() {
    let native: ContentItem = ContentItem::native("n", TemplateRef(3), ())
        .with_logging_params(LoggingParams::new().with("x", "y"))
        .with_lateral_padding(16)
        .with_full_span(true);
    assert!(native.is_native());
    assert!(native.is_full_span());
    assert!(native.logging_params().is_none());
    assert_eq!(native.as_native().unwrap().lateral_padding, 16);

    let external: ContentItem = ContentItem::external("e", Vec::new()).with_lateral_padding(16);
    assert!(!external.is_native());
    assert!(!external.is_full_span());
    assert!(external.as_native().is_none());
}
