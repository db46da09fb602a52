use divdom::Document;
use divui::widgets::{Label, Tab, TabbedPane};
use divui::{Component, Container, Style, Widget, WidgetError};

fn selected_tabs(pane: &TabbedPane) -> Vec<usize> {
    pane.tabs()
        .iter()
        .enumerate()
        .filter(|(_, t)| t.is_selected())
        .map(|(i, _)| i)
        .collect()
}

fn visible_contents(pane: &TabbedPane) -> Vec<usize> {
    pane.components()
        .iter()
        .enumerate()
        .filter(|(_, c)| c.is_visible())
        .map(|(i, _)| i)
        .collect()
}

fn pane_with(doc: &Document, labels: &[&str]) -> (TabbedPane, Vec<Label>) {
    let pane = TabbedPane::new(doc).unwrap();
    let contents = labels
        .iter()
        .map(|l| pane.add(*l, Label::new(doc, l)).unwrap())
        .collect();
    (pane, contents)
}

fn assert_paired(pane: &TabbedPane) {
    let strip = pane.document().children(pane.tab_strip_node());
    let contents = pane.document().children(pane.switch_pane_node());
    assert_eq!(pane.tabs().len(), pane.component_count());
    assert_eq!(strip.len(), pane.component_count());
    assert_eq!(contents.len(), pane.component_count());
}

// ============================================================================
// Tabs
// ============================================================================

#[test]
fn test_tab_default_styles() {
    let doc = Document::new();
    let tab = Tab::new(&doc, "A").unwrap();
    let node = tab.display_node();

    assert!(!tab.is_selected());
    assert_eq!(doc.style(node, "float").as_deref(), Some("left"));
    assert_eq!(doc.style(node, "background-color").as_deref(), Some("lightgrey"));
    assert_eq!(doc.style(node, "padding-bottom").as_deref(), Some("1px"));

    tab.set_selected(true);
    assert_eq!(doc.style(node, "background-color").as_deref(), Some("white"));
    assert_eq!(doc.style(node, "top").as_deref(), Some("1px"));
    assert_eq!(doc.style(node, "padding-bottom"), None);
    assert_eq!(doc.style(node, "cursor").as_deref(), Some("pointer"));
}

#[test]
fn test_tab_style_setter_reapplies_current_state() {
    let doc = Document::new();
    let tab = Tab::new(&doc, "A").unwrap();
    tab.set_selected(true);

    tab.set_selected_style(Style::new([("backgroundColor", "yellow")]));

    let node = tab.display_node();
    assert_eq!(doc.style(node, "background-color").as_deref(), Some("yellow"));
    assert_eq!(doc.style(node, "top"), None);
}

#[test]
fn test_tab_style_classes_replace_inline_styles() {
    let doc = Document::new();
    let tab = Tab::new(&doc, "A").unwrap();
    let node = tab.display_node();

    tab.set_style_classes("tab", "tab-on", "tab-off");
    assert_eq!(doc.class_name(node), "tab tab-off");
    assert_eq!(doc.style(node, "float"), None);
    assert_eq!(tab.base_style(), None);

    tab.set_selected(true);
    assert_eq!(doc.class_name(node), "tab tab-on");

    tab.set_base_style(Style::new([("float", "right")]));
    assert_eq!(doc.class_name(node), "");
    assert_eq!(doc.style(node, "float").as_deref(), Some("right"));
}

#[test]
fn test_tab_label_can_be_a_widget() {
    let doc = Document::new();
    let icon = Component::with_tag(&doc, "img");
    let tab = Tab::new(&doc, icon.clone()).unwrap();
    assert_eq!(doc.children(tab.display_node()), vec![icon.display_node()]);
    assert_eq!(tab.label_widget(), Some(icon));
    assert!(Tab::new(&doc, "A").unwrap().label_widget().is_none());
}

// ============================================================================
// Adding and selecting
// ============================================================================

#[test]
fn test_first_added_is_selected() {
    let doc = Document::new();
    let (pane, _) = pane_with(&doc, &["A", "B", "C"]);

    assert_paired(&pane);
    assert_eq!(pane.selected_index(), Some(0));
    assert_eq!(selected_tabs(&pane), vec![0]);
    assert_eq!(visible_contents(&pane), vec![0]);
    assert_eq!(pane.tab(1).unwrap().label(), "B");
}

#[test]
fn test_set_selected_index() {
    let doc = Document::new();
    let (pane, contents) = pane_with(&doc, &["A", "B", "C"]);

    pane.set_selected_index(2).unwrap();
    assert_eq!(selected_tabs(&pane), vec![2]);
    assert_eq!(visible_contents(&pane), vec![2]);

    pane.set_selected_component(&contents[1]).unwrap();
    assert_eq!(selected_tabs(&pane), vec![1]);
    assert_eq!(visible_contents(&pane), vec![1]);
}

#[test]
fn test_select_out_of_range() {
    let doc = Document::new();
    let (pane, _) = pane_with(&doc, &["A"]);

    assert!(matches!(
        pane.set_selected_index(4),
        Err(WidgetError::IndexOutOfRange { index: 4, len: 1 })
    ));
    let stranger = Label::new(&doc, "x");
    assert_eq!(
        pane.set_selected_component(&stranger),
        Err(WidgetError::NotFound)
    );
    assert_eq!(selected_tabs(&pane), vec![0]);
}

#[test]
fn test_clicking_tab_selects_its_content() {
    let doc = Document::new();
    let (pane, _) = pane_with(&doc, &["A", "B"]);

    doc.click(pane.tab(1).unwrap().display_node()).unwrap();

    assert_eq!(selected_tabs(&pane), vec![1]);
    assert_eq!(visible_contents(&pane), vec![1]);
}

#[test]
fn test_readding_content_replaces_its_tab() {
    let doc = Document::new();
    let (pane, contents) = pane_with(&doc, &["A", "B"]);

    pane.add("A again", contents[0].clone()).unwrap();

    assert_paired(&pane);
    assert_eq!(pane.component_count(), 2);
    assert_eq!(pane.index_of(&contents[0]), Some(1));
    assert_eq!(pane.tab(1).unwrap().label(), "A again");
    assert_eq!(selected_tabs(&pane).len(), 1);
}

// ============================================================================
// Removing
// ============================================================================

#[test]
fn test_remove_drops_tab_and_listener() {
    let doc = Document::new();
    let (pane, contents) = pane_with(&doc, &["A", "B", "C"]);
    let tab = pane.tab(1).unwrap();

    let removed = pane.remove(&contents[1]).unwrap();

    assert_eq!(&removed, contents[1].component());
    assert_paired(&pane);
    assert_eq!(pane.component_count(), 2);
    assert_eq!(tab.parent(), None);
    assert_eq!(doc.listener_count(tab.display_node()), 0);
    assert_eq!(pane.tab(1).unwrap().label(), "C");
}

#[test]
fn test_removing_selected_selects_neighbour() {
    let doc = Document::new();
    let (pane, _) = pane_with(&doc, &["A", "B", "C"]);
    pane.set_selected_index(1).unwrap();

    pane.remove(1usize).unwrap();

    assert_eq!(selected_tabs(&pane), vec![1]);
    assert_eq!(visible_contents(&pane), vec![1]);
}

#[test]
fn test_remove_all() {
    let doc = Document::new();
    let (pane, _) = pane_with(&doc, &["A", "B"]);

    let removed = pane.remove_all().unwrap();

    assert_eq!(removed.len(), 2);
    assert_eq!(pane.component_count(), 0);
    assert!(pane.tabs().is_empty());
    assert!(doc.children(pane.tab_strip_node()).is_empty());
    assert_eq!(pane.selected_index(), None);
}

#[test]
fn test_moving_content_elsewhere_removes_tab() {
    let doc = Document::new();
    let (pane, contents) = pane_with(&doc, &["A", "B"]);
    let other = Container::new(&doc);

    other.add(contents[0].clone()).unwrap();

    assert_paired(&pane);
    assert_eq!(pane.component_count(), 1);
    assert_eq!(pane.tab(0).unwrap().label(), "B");
    assert_eq!(selected_tabs(&pane), vec![0]);
}

#[test]
fn test_moving_tab_elsewhere_removes_content() {
    let doc = Document::new();
    let (pane, contents) = pane_with(&doc, &["A", "B"]);
    let other = Container::new(&doc);

    other.add(pane.tab(0).unwrap()).unwrap();

    assert_paired(&pane);
    assert_eq!(pane.index_of(&contents[0]), None);
    assert_eq!(contents[0].parent(), None);
    assert_eq!(selected_tabs(&pane), vec![0]);
}

#[test]
fn test_pane_structure() {
    let doc = Document::new();
    let pane = TabbedPane::new(&doc).unwrap();
    let node = pane.display_node();

    assert_eq!(
        doc.children(node),
        vec![
            pane.tab_strip_node(),
            pane.switch_pane_node()
        ]
    );
    assert_eq!(
        doc.style(pane.tab_strip_node(), "display").as_deref(),
        Some("table-row")
    );
}
