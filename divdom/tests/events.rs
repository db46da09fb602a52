use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use divdom::{hit_test, Document, EventKind, Rect};

fn counter() -> Arc<AtomicUsize> {
    Arc::new(AtomicUsize::new(0))
}

// ============================================================================
// Dispatch
// ============================================================================

#[test]
fn test_click_bubbles_to_ancestors() {
    let doc = Document::new();
    let outer = doc.create_element("div");
    let inner = doc.create_element("div");
    doc.append_child(doc.body(), outer).unwrap();
    doc.append_child(outer, inner).unwrap();

    let order = Arc::new(Mutex::new(Vec::new()));
    for (node, name) in [(inner, "inner"), (outer, "outer")] {
        let order = order.clone();
        doc.add_listener(node, EventKind::Click, move |_| {
            order.lock().unwrap().push(name);
        })
        .unwrap();
    }

    let event = doc.click(inner).unwrap();
    assert_eq!(event.target, inner);
    assert_eq!(*order.lock().unwrap(), vec!["inner", "outer"]);
}

#[test]
fn test_stop_propagation() {
    let doc = Document::new();
    let outer = doc.create_element("div");
    let inner = doc.create_element("div");
    doc.append_child(outer, inner).unwrap();

    let outer_hits = counter();
    let hits = outer_hits.clone();
    doc.add_listener(outer, EventKind::Click, move |_| {
        hits.fetch_add(1, Ordering::SeqCst);
    })
    .unwrap();
    doc.add_listener(inner, EventKind::Click, |event| event.stop_propagation())
        .unwrap();

    let event = doc.click(inner).unwrap();
    assert!(event.is_propagation_stopped());
    assert_eq!(outer_hits.load(Ordering::SeqCst), 0);
}

#[test]
fn test_listeners_filter_by_kind() {
    let doc = Document::new();
    let node = doc.create_element("div");
    let hits = counter();
    let h = hits.clone();
    doc.add_listener(node, EventKind::MouseOver, move |_| {
        h.fetch_add(1, Ordering::SeqCst);
    })
    .unwrap();

    doc.click(node).unwrap();
    assert_eq!(hits.load(Ordering::SeqCst), 0);
    doc.dispatch(node, EventKind::MouseOver).unwrap();
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[test]
fn test_remove_listener() {
    let doc = Document::new();
    let node = doc.create_element("div");
    let hits = counter();
    let h = hits.clone();
    let id = doc
        .add_listener(node, EventKind::Click, move |_| {
            h.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap();
    assert_eq!(doc.listener_count(node), 1);

    assert!(doc.remove_listener(id));
    assert!(!doc.remove_listener(id));
    doc.click(node).unwrap();
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[test]
fn test_listener_can_mutate_document() {
    let doc = Document::new();
    let node = doc.create_element("div");
    let handle = doc.clone();
    doc.add_listener(node, EventKind::Click, move |event| {
        handle.set_style(event.current_target, "color", "red");
        let child = handle.create_element("span");
        handle.append_child(event.current_target, child).unwrap();
    })
    .unwrap();

    doc.click(node).unwrap();
    assert_eq!(doc.style(node, "color").as_deref(), Some("red"));
    assert_eq!(doc.children(node).len(), 1);
}

// ============================================================================
// Document Subscriptions
// ============================================================================

#[test]
fn test_subscription_sees_bubbling_clicks() {
    let doc = Document::new();
    let node = doc.create_element("div");
    doc.append_child(doc.body(), node).unwrap();

    let hits = counter();
    let h = hits.clone();
    let _subscription = doc.subscribe(EventKind::Click, move |_| {
        h.fetch_add(1, Ordering::SeqCst);
    });

    doc.click(node).unwrap();
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[test]
fn test_subscription_ignores_detached_nodes() {
    let doc = Document::new();
    let detached = doc.create_element("div");

    let hits = counter();
    let h = hits.clone();
    let _subscription = doc.subscribe(EventKind::Click, move |_| {
        h.fetch_add(1, Ordering::SeqCst);
    });

    doc.click(detached).unwrap();
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[test]
fn test_dropping_subscription_unregisters() {
    let doc = Document::new();
    let hits = counter();
    let h = hits.clone();
    let subscription = doc.subscribe(EventKind::Click, move |_| {
        h.fetch_add(1, Ordering::SeqCst);
    });
    assert_eq!(doc.listener_count(doc.root()), 1);

    drop(subscription);
    assert_eq!(doc.listener_count(doc.root()), 0);
    doc.click(doc.body()).unwrap();
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[test]
fn test_cancel_is_idempotent() {
    let doc = Document::new();
    let mut subscription = doc.subscribe(EventKind::Click, |_| {});
    assert!(subscription.id().is_some());
    subscription.cancel();
    subscription.cancel();
    assert!(subscription.id().is_none());
    assert_eq!(doc.listener_count(doc.root()), 0);
}

// ============================================================================
// Hit Testing
// ============================================================================

#[test]
fn test_hit_test_finds_deepest_node() {
    let doc = Document::new();
    let panel = doc.create_element("div");
    let button = doc.create_element("div");
    doc.append_child(doc.body(), panel).unwrap();
    doc.append_child(panel, button).unwrap();
    doc.set_layout(panel, Rect::new(0, 0, 100, 50));
    doc.set_layout(button, Rect::new(10, 10, 30, 5));

    assert_eq!(hit_test(&doc, 15, 12), Some(button));
    assert_eq!(hit_test(&doc, 5, 5), Some(panel));
    assert_eq!(hit_test(&doc, 150, 150), None);
}

#[test]
fn test_hit_test_later_sibling_on_top() {
    let doc = Document::new();
    let bottom = doc.create_element("div");
    let top = doc.create_element("div");
    doc.append_child(doc.body(), bottom).unwrap();
    doc.append_child(doc.body(), top).unwrap();
    doc.set_layout(bottom, Rect::new(10, 10, 50, 50));
    doc.set_layout(top, Rect::new(30, 30, 50, 50));

    assert_eq!(hit_test(&doc, 40, 40), Some(top));
    assert_eq!(hit_test(&doc, 15, 15), Some(bottom));
}

#[test]
fn test_hit_test_skips_hidden_nodes() {
    let doc = Document::new();
    let panel = doc.create_element("div");
    let overlay = doc.create_element("div");
    doc.append_child(doc.body(), panel).unwrap();
    doc.append_child(doc.body(), overlay).unwrap();
    doc.set_layout(panel, Rect::new(0, 0, 100, 100));
    doc.set_layout(overlay, Rect::new(0, 0, 100, 100));

    doc.set_style(overlay, "display", "none");
    assert_eq!(hit_test(&doc, 5, 5), Some(panel));

    doc.set_style(overlay, "display", "block");
    doc.set_style(overlay, "visibility", "hidden");
    assert_eq!(hit_test(&doc, 5, 5), Some(panel));
}

#[test]
fn test_click_at_falls_back_to_root() {
    let doc = Document::new();
    let hits = counter();
    let h = hits.clone();
    let _subscription = doc.subscribe(EventKind::Click, move |event| {
        assert_eq!(event.position, Some((500, 500)));
        h.fetch_add(1, Ordering::SeqCst);
    });

    let event = doc.click_at(500, 500);
    assert_eq!(event.target, doc.root());
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}
