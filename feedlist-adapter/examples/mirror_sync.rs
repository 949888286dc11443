// Example: a host keeps rendered rows in step with the list, then restores its scroll anchor.
use feedlist::{ContentItem, ContentList};
use feedlist_adapter::{ChangeLog, ViewMirror, capture_anchor, resolve_anchor};

fn card(key: &str) -> ContentItem {
    ContentItem::external(key, Vec::new())
}

fn render(item: &ContentItem) -> String {
    format!("<row {}>", item.key())
}

fn main() {
    let mut list = ContentList::new();
    list.insert(0, ["a", "b", "c"].map(card)).unwrap();

    let mut rows = ViewMirror::from_list(&list, render);
    let (log, _) = ChangeLog::attach(&list);
    let anchor = capture_anchor(&list, 1, 12).unwrap();

    // Newer content arrives on top, "c" is gone.
    list.replace_range(0, list.len(), ["x", "y", "a", "b"].map(card))
        .unwrap();

    let applied = rows.apply_all(log.take());
    let rendered = rows.rebind(&list, render);
    println!("applied {applied} changes, rendered {rendered} new rows");
    println!("rows: {:?}", rows.slots());
    println!("scroll to {:?}", resolve_anchor(&list, &anchor));
}
