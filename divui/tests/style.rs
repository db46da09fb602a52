use divdom::Document;
use divui::Style;

#[test]
fn test_names_are_normalised() {
    let style = Style::new([("borderTopLeftRadius", "5px"), ("cursor", "pointer")]);
    assert_eq!(style.property("border-top-left-radius"), Some("5px"));
    assert_eq!(style.property("borderTopLeftRadius"), Some("5px"));
    assert_eq!(
        style.properties(),
        vec![
            ("border-top-left-radius".to_string(), "5px".to_string()),
            ("cursor".to_string(), "pointer".to_string()),
        ]
    );
}

#[test]
fn test_apply_only_touches_own_properties() {
    let doc = Document::new();
    let node = doc.create_element("div");
    doc.set_style(node, "color", "red");

    let style = Style::new([("float", "left"), ("top", "1px")]);
    style.apply_to(&doc, node);
    assert_eq!(doc.css_text(node), "color: red; float: left; top: 1px");

    style.remove_from(&doc, node);
    assert_eq!(doc.css_text(node), "color: red");
}

#[test]
fn test_merged_overrides() {
    let base = Style::new([("float", "left"), ("top", "0px")]);
    let merged = base.merged(&Style::new([("top", "1px")]));

    assert_eq!(merged.property("top"), Some("1px"));
    assert_eq!(merged.property("float"), Some("left"));
    assert_eq!(base.property("top"), Some("0px"));
}

#[test]
fn test_empty_style() {
    let doc = Document::new();
    let node = doc.create_element("div");
    Style::empty().apply_to(&doc, node);
    assert!(Style::empty().is_empty());
    assert_eq!(doc.css_text(node), "");
}
