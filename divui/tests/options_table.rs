use divdom::{Document, EventKind};
use divui::WidgetError;
use divui::widgets::{OptionSettings, OptionSpec, OptionsTable};
use serde_json::json;

fn specs() -> Vec<OptionSpec> {
    vec![
        OptionSpec::new("verbose", "print more"),
        OptionSpec::new("zig", "for great justice")
            .param("zigs", "# of zigs moved")
            .param("justice", "amount of justice used"),
    ]
}

fn setup() -> (Document, OptionsTable) {
    let doc = Document::new();
    let table = OptionsTable::new(&doc, doc.body(), specs()).unwrap();
    (doc, table)
}

// ============================================================================
// Definitions
// ============================================================================

#[test]
fn test_parse_option_list() {
    let options = OptionSpec::list_from_json(
        r#"[
            {"name": "verbose", "description": "print more"},
            {"name": "zig", "description": "for great justice",
             "params": "zigs, justice", "param_description": "count,amount"}
        ]"#,
    )
    .unwrap();

    assert_eq!(options[0], OptionSpec::new("verbose", "print more"));
    assert!(options[0].params.is_empty());
    assert_eq!(
        options[1],
        OptionSpec::new("zig", "for great justice")
            .param("zigs", "count")
            .param("justice", "amount")
    );
}

#[test]
fn test_missing_param_descriptions_are_empty() {
    let options =
        OptionSpec::list_from_json(r#"[{"name": "o", "params": "a,b", "param_description": "x"}]"#)
            .unwrap();
    assert_eq!(options[0].params[1].name, "b");
    assert_eq!(options[0].params[1].description, "");
    assert_eq!(options[0].description, "");
}

// ============================================================================
// Structure
// ============================================================================

#[test]
fn test_table_is_built_inside_container() {
    let (doc, table) = setup();
    assert_eq!(doc.parent(table.node()), Some(doc.body()));
    assert_eq!(table.option_ids(), vec!["verbose", "zig"]);
    assert_eq!(table.parameter_ids("zig"), vec!["zigs", "justice"]);
    assert!(table.parameter_ids("verbose").is_empty());
    assert_eq!(
        doc.style(table.node(), "border-color").as_deref(),
        Some("#BBAA88")
    );
}

#[test]
fn test_checkbox_and_param_inputs() {
    let (doc, table) = setup();
    let checkbox = table.checkbox("zig").unwrap();
    assert_eq!(doc.attribute(checkbox, "type").as_deref(), Some("checkbox"));
    assert_eq!(
        doc.attribute(checkbox, "value").as_deref(),
        Some("for great justice")
    );

    let input = table.param_input("zig", "justice").unwrap();
    assert_eq!(
        doc.attribute(input, "placeholder").as_deref(),
        Some("amount of justice used")
    );
    // 22 characters plus one, at 7px each
    assert_eq!(doc.style(input, "width").as_deref(), Some("161px"));
}

#[test]
fn test_duplicate_option_is_rejected() {
    let (_, mut table) = setup();
    assert!(matches!(
        table.add_option(OptionSpec::new("zig", "again")),
        Err(WidgetError::InvalidArgument(_))
    ));
    assert_eq!(table.option_ids().len(), 2);
}

// ============================================================================
// Checking
// ============================================================================

#[test]
fn test_params_hidden_until_checked() {
    let (_, table) = setup();
    assert!(!table.is_checked("zig"));
    assert!(!table.params_shown("zig"));

    table.set_checked("zig", true);
    assert!(table.is_checked("zig"));
    assert!(table.params_shown("zig"));

    table.set_checked("zig", false);
    assert!(!table.params_shown("zig"));
}

#[test]
fn test_change_event_toggles_params() {
    let (doc, table) = setup();
    let checkbox = table.checkbox("zig").unwrap();

    doc.set_attribute(checkbox, "checked", "");
    doc.dispatch(checkbox, EventKind::Change).unwrap();
    assert!(table.params_shown("zig"));

    doc.remove_attribute(checkbox, "checked");
    doc.dispatch(checkbox, EventKind::Change).unwrap();
    assert!(!table.params_shown("zig"));
}

#[test]
fn test_unknown_ids_answer_defaults() {
    let (_, table) = setup();
    assert!(!table.is_checked("nope"));
    assert!(table.parameter_ids("nope").is_empty());
    assert_eq!(table.param_value("zig", "nope"), "");
    assert_eq!(table.param_value("nope", "zigs"), "");
    assert!(table.checkbox("nope").is_none());

    table.set_checked("nope", true);
    table.set_param_value("zig", "nope", "1");
    assert_eq!(table.settings().len(), 2);
}

// ============================================================================
// Export
// ============================================================================

#[test]
fn test_param_values() {
    let (_, table) = setup();
    assert_eq!(table.param_value("zig", "zigs"), "");

    table.set_param_value("zig", "zigs", "3");
    assert_eq!(table.param_value("zig", "zigs"), "3");
}

#[test]
fn test_settings_and_json() {
    let (_, table) = setup();
    table.set_checked("zig", true);
    table.set_param_value("zig", "zigs", "3");

    let settings = table.settings();
    assert_eq!(settings["verbose"], OptionSettings::default());
    assert!(settings["zig"].checked);

    assert_eq!(
        table.to_json(),
        json!({
            "verbose": {"checked": false, "params": {}},
            "zig": {"checked": true, "params": {"justice": "", "zigs": "3"}}
        })
    );

    let back: std::collections::BTreeMap<String, OptionSettings> =
        serde_json::from_value(table.to_json()).unwrap();
    assert_eq!(back, settings);
}
