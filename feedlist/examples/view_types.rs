// Example: per-item view types for natively rendered content.
use feedlist::{ContentItem, ContentList, TemplateRef};

fn main() {
    let mut list: ContentList<&'static str> = ContentList::new();
    list.insert(
        0,
        [
            ContentItem::native("header", TemplateRef(10), "header view"),
            ContentItem::external("card", b"frame".to_vec()),
            ContentItem::native("spinner", TemplateRef(11), "spinner view"),
        ],
    )
    .unwrap();

    for index in 0..list.len() {
        let view_type = list.view_type(index).unwrap();
        println!("{index}: {} -> {view_type:?}", list.get(index).unwrap().key());
    }

    // A recycler asks which native item a type stands for when it creates a view holder.
    if let Some(item) = list.item_for_view_type(2) {
        println!("type 2 inflates {:?}", item.as_native().map(|n| n.payload));
    }

    // Removing the spinner retires its type; a new spinner gets a fresh one.
    list.remove(2, 1).unwrap();
    list.insert(2, [ContentItem::native("spinner", TemplateRef(11), "spinner view")])
        .unwrap();
    println!("new spinner -> {:?}", list.view_type(2).unwrap());
}
