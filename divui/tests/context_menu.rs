use std::sync::{Arc, Mutex};

use divdom::{Document, EventKind};
use divui::widgets::{ContextMenu, ContextMenuItem, ItemState};
use divui::{Component, ContainerWidget, Widget};

#[derive(Debug)]
struct File {
    name: &'static str,
    read_only: bool,
}

fn file(name: &'static str, read_only: bool) -> File {
    File { name, read_only }
}

fn setup() -> (Document, ContextMenu<File>) {
    let doc = Document::new();
    let menu = ContextMenu::new(&doc);
    doc.append_child(doc.body(), menu.display_node()).unwrap();
    (doc, menu)
}

fn recording_item(doc: &Document, text: &str) -> (ContextMenuItem<File>, Arc<Mutex<Vec<String>>>) {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let log = calls.clone();
    let item = ContextMenuItem::new(doc, text)
        .with_click_handler(move |f: &File| log.lock().unwrap().push(f.name.to_string()));
    (item, calls)
}

// ============================================================================
// Showing and hiding
// ============================================================================

#[test]
fn test_menu_starts_hidden() {
    let (doc, menu) = setup();
    assert!(!menu.is_shown());
    assert_eq!(
        doc.style(menu.display_node(), "position").as_deref(),
        Some("absolute")
    );
    assert!(menu.context().is_none());
}

#[test]
fn test_show_positions_and_stores_context() {
    let (doc, menu) = setup();
    menu.show(file("a.txt", false), 120, 45);

    let node = menu.display_node();
    assert!(menu.is_shown());
    assert_eq!(doc.style(node, "left").as_deref(), Some("120px"));
    assert_eq!(doc.style(node, "top").as_deref(), Some("45px"));
    assert_eq!(menu.context().unwrap().name, "a.txt");

    menu.hide();
    assert!(!menu.is_shown());
}

#[test]
fn test_click_outside_hides_menu() {
    let (doc, menu) = setup();
    let elsewhere = doc.create_element("div");
    doc.append_child(doc.body(), elsewhere).unwrap();
    menu.show(file("a.txt", false), 0, 0);

    doc.click(menu.display_node()).unwrap();
    assert!(menu.is_shown());

    doc.click(elsewhere).unwrap();
    assert!(!menu.is_shown());
}

#[test]
fn test_dispose_stops_outside_clicks() {
    let (doc, menu) = setup();
    menu.show(file("a.txt", false), 0, 0);
    menu.dispose();

    doc.click(doc.body()).unwrap();
    assert!(menu.is_shown());
}

#[test]
fn test_dropping_menu_releases_subscription() {
    let doc = Document::new();
    let root = doc.root();
    let before = doc.listener_count(root);

    let menu: ContextMenu<File> = ContextMenu::new(&doc);
    assert_eq!(doc.listener_count(root), before + 1);

    drop(menu);
    assert_eq!(doc.listener_count(root), before);
}

// ============================================================================
// Items
// ============================================================================

#[test]
fn test_enabled_click_runs_handler_once_and_hides() {
    let (doc, menu) = setup();
    let (item, calls) = recording_item(&doc, "Open");
    let item = menu.add_item(item).unwrap();
    menu.show(file("a.txt", false), 10, 10);

    let event = doc.click(item.display_node()).unwrap();

    assert_eq!(*calls.lock().unwrap(), vec!["a.txt".to_string()]);
    assert!(!menu.is_shown());
    assert!(event.is_propagation_stopped());
}

#[test]
fn test_disabled_click_does_nothing() {
    let (doc, menu) = setup();
    let (item, calls) = recording_item(&doc, "Delete");
    let item = menu
        .add_item(item.with_enable_predicate(|f: &File| {
            if f.read_only {
                ItemState::Disabled
            } else {
                ItemState::Enabled
            }
        }))
        .unwrap();
    menu.show(file("locked.txt", true), 0, 0);

    assert!(!item.is_enabled());
    assert_eq!(
        doc.style(item.display_node(), "color").as_deref(),
        Some("rgb(100,100,100)")
    );

    doc.click(item.display_node()).unwrap();
    assert!(calls.lock().unwrap().is_empty());
    assert!(menu.is_shown());
}

#[test]
fn test_predicate_is_consulted_on_every_show() {
    let (doc, menu) = setup();
    let item = menu
        .add_item(
            ContextMenuItem::new(&doc, "Rename").with_enable_predicate(|f: &File| {
                if f.read_only {
                    ItemState::Hidden
                } else {
                    ItemState::Enabled
                }
            }),
        )
        .unwrap();

    menu.show(file("locked.txt", true), 0, 0);
    assert!(!item.is_shown());

    menu.show(file("open.txt", false), 0, 0);
    assert!(item.is_shown());
    assert!(item.is_enabled());
    assert_eq!(
        doc.style(item.display_node(), "display").as_deref(),
        Some("block")
    );
}

#[test]
fn test_items_default_to_enabled() {
    let (doc, menu) = setup();
    let item = menu.add_item(ContextMenuItem::new(&doc, "Copy")).unwrap();
    item.disable();

    menu.show(file("a.txt", true), 0, 0);
    assert!(item.is_enabled());
    assert_eq!(
        doc.style(item.display_node(), "color").as_deref(),
        Some("rgb(0,0,0)")
    );
}

#[test]
fn test_item_hover_highlight() {
    let doc = Document::new();
    let item: ContextMenuItem<File> = ContextMenuItem::new(&doc, "Open");
    let node = item.display_node();

    doc.dispatch(node, EventKind::MouseOver).unwrap();
    assert_eq!(
        doc.style(node, "background-color").as_deref(),
        Some("rgba(255,255,255,1.0)")
    );

    doc.dispatch(node, EventKind::MouseDown).unwrap();
    assert_eq!(
        doc.style(node, "background-color").as_deref(),
        Some("rgba(100,100,200,1.0)")
    );

    doc.dispatch(node, EventKind::MouseOut).unwrap();
    item.disable();
    doc.dispatch(node, EventKind::MouseDown).unwrap();
    assert_eq!(
        doc.style(node, "background-color").as_deref(),
        Some("rgba(255,255,255,0.0)")
    );
}

#[test]
fn test_plain_components_are_not_items() {
    let (doc, menu) = setup();
    menu.add(Component::new(&doc)).unwrap();
    menu.add_item(ContextMenuItem::new(&doc, "Open")).unwrap();

    assert_eq!(menu.component_count(), 2);
    assert_eq!(menu.item_count(), 1);
    assert_eq!(menu.item(0).unwrap().display_node(), menu.component_at(1).unwrap().display_node());
}

#[test]
fn test_removing_item_deregisters_it() {
    let (doc, menu) = setup();
    let (item, calls) = recording_item(&doc, "Open");
    let item = menu.add_item(item).unwrap();
    let listeners = doc.listener_count(item.display_node());

    menu.remove(&item).unwrap();

    assert_eq!(menu.item_count(), 0);
    assert_eq!(doc.listener_count(item.display_node()), listeners - 1);

    menu.show(file("a.txt", false), 0, 0);
    doc.click(item.display_node()).unwrap();
    assert!(calls.lock().unwrap().is_empty());
}
