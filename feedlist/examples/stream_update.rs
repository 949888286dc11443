// Example: applying successive stream updates below fixed headers.
use feedlist::{Change, ContentItem, ContentList, LoggingParams, TemplateRef};

const HEADER_COUNT: usize = 1;

fn card(key: &str) -> ContentItem {
    ContentItem::external(key, key.as_bytes().to_vec())
        .with_logging_params(LoggingParams::new().with("stream", "for-you"))
}

fn spinner() -> ContentItem {
    ContentItem::native("loading-spinner", TemplateRef(1), ()).with_full_span(true)
}

fn apply(list: &mut ContentList, update: Vec<ContentItem>) {
    // Headers stay put; everything after them follows the update.
    let count = list.len() - HEADER_COUNT;
    let changed = list.replace_range(HEADER_COUNT, count, update).unwrap();
    let keys: Vec<&str> = list.keys().collect();
    println!("changed={changed} -> {keys:?}");
}

fn main() {
    let mut list = ContentList::new();
    list.insert(0, [ContentItem::native("header", TemplateRef(0), ())])
        .unwrap();
    list.add_observer(|change: Change| println!("  {change:?}"));

    // First page is loading.
    apply(&mut list, vec![spinner()]);
    // Cards arrive, spinner moves to the bottom.
    apply(&mut list, vec![card("c1"), card("c2"), spinner()]);
    // More cards, one dismissed.
    apply(
        &mut list,
        vec![card("c2"), card("c3"), card("c4"), spinner()],
    );
    // Nothing new.
    apply(
        &mut list,
        vec![card("c2"), card("c3"), card("c4"), spinner()],
    );
}
