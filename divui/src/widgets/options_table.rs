//! Options table - a form of on/off options, each with optional string
//! parameters that are only shown while the option is checked.

use std::collections::BTreeMap;

use divdom::{Display, Document, EventKind, NodeId, WeakDocument};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::{Result, WidgetError};
use crate::style::Style;

// =============================================================================
// Option definitions
// =============================================================================

/// One string parameter of an option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamSpec {
    pub name: String,
    pub description: String,
}

/// Definition of one option.
///
/// Deserialises from objects whose parameters are comma-delimited:
///
/// ```
/// use divui::widgets::OptionSpec;
///
/// let spec: OptionSpec = serde_json::from_str(r##"{
///     "name": "zig",
///     "description": "for great justice",
///     "params": "zigs,justice",
///     "param_description": "# of zigs moved, amount of justice used"
/// }"##).unwrap();
/// assert_eq!(spec.params[1].name, "justice");
/// assert_eq!(spec.params[1].description, "amount of justice used");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RawOptionSpec")]
pub struct OptionSpec {
    pub name: String,
    pub description: String,
    pub params: Vec<ParamSpec>,
}

#[derive(Deserialize)]
struct RawOptionSpec {
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    params: Option<String>,
    #[serde(default)]
    param_description: Option<String>,
}

impl From<RawOptionSpec> for OptionSpec {
    fn from(raw: RawOptionSpec) -> Self {
        let descriptions = raw
            .param_description
            .as_deref()
            .map(|d| d.split(',').map(str::trim).collect::<Vec<_>>())
            .unwrap_or_default();
        let params = raw
            .params
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .map(|p| {
                p.split(',')
                    .enumerate()
                    .map(|(i, name)| ParamSpec {
                        name: name.trim().to_string(),
                        description: descriptions.get(i).copied().unwrap_or_default().to_string(),
                    })
                    .collect()
            })
            .unwrap_or_default();
        Self {
            name: raw.name,
            description: raw.description,
            params,
        }
    }
}

impl OptionSpec {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            params: Vec::new(),
        }
    }

    pub fn param(mut self, name: impl Into<String>, description: impl Into<String>) -> Self {
        self.params.push(ParamSpec {
            name: name.into(),
            description: description.into(),
        });
        self
    }

    /// Parse a JSON array of option definitions.
    pub fn list_from_json(json: &str) -> serde_json::Result<Vec<OptionSpec>> {
        serde_json::from_str(json)
    }
}

/// The chosen settings of one option, as reported by
/// [`OptionsTable::settings`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionSettings {
    pub checked: bool,
    pub params: BTreeMap<String, String>,
}

// =============================================================================
// OptionsTable
// =============================================================================

struct OptionEntry {
    id: String,
    checkbox: NodeId,
    params_node: NodeId,
    params: Vec<(String, NodeId)>,
}

/// A bordered list of options rendered into a host node.
///
/// Lookups of unknown option or parameter ids log a warning and answer with
/// a default instead of failing.
pub struct OptionsTable {
    doc: Document,
    node: NodeId,
    options: Vec<OptionEntry>,
}

fn cell(doc: &Document, padding: Option<(&str, &str)>) -> NodeId {
    let cell = doc.create_element("div");
    doc.set_style(cell, Display::PROPERTY, Display::TableCell.as_css());
    if let Some((property, value)) = padding {
        doc.set_style(cell, property, value);
    }
    cell
}

/// Show the parameters while `checkbox` is checked.
fn sync_params(doc: &Document, checkbox: NodeId, params_node: NodeId) {
    let display = if doc.attribute(checkbox, "checked").is_some() {
        Display::Table
    } else {
        Display::None
    };
    doc.set_style(params_node, Display::PROPERTY, display.as_css());
}

impl OptionsTable {
    /// Build the table inside `container` with one row per option.
    pub fn new(
        doc: &Document,
        container: NodeId,
        options: impl IntoIterator<Item = OptionSpec>,
    ) -> Result<Self> {
        let node = doc.create_element("div");
        Style::new([
            ("border", "solid"),
            ("border-width", "1px"),
            ("border-color", "#BBAA88"),
        ])
        .apply_to(doc, node);
        doc.append_child(container, node)?;

        let mut table = Self {
            doc: doc.clone(),
            node,
            options: Vec::new(),
        };
        for option in options {
            table.add_option(option)?;
        }
        Ok(table)
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Append an option. Option names must be unique.
    pub fn add_option(&mut self, option: OptionSpec) -> Result<()> {
        if self.entry(&option.name).is_some() {
            return Err(WidgetError::InvalidArgument(format!(
                "option `{}` already exists",
                option.name
            )));
        }
        let doc = &self.doc;

        let row = doc.create_element("div");
        doc.set_style(row, Display::PROPERTY, Display::TableRow.as_css());
        doc.append_child(self.node, row)?;

        let checkbox_cell = cell(doc, Some(("padding-right", "10px")));
        doc.append_child(row, checkbox_cell)?;
        let checkbox = doc.create_element("input");
        doc.set_attribute(checkbox, "type", "checkbox");
        doc.set_attribute(checkbox, "value", &option.description);
        doc.append_child(checkbox_cell, checkbox)?;

        let name_cell = cell(doc, Some(("padding-right", "10px")));
        doc.set_text(name_cell, &format!("<b>{}</b>", option.name));
        doc.append_child(row, name_cell)?;

        let description_cell = cell(doc, Some(("padding-right", "20px")));
        doc.set_text(description_cell, &option.description);
        doc.append_child(row, description_cell)?;

        let (params_node, params) = self.build_params(&option)?;

        let weak: WeakDocument = doc.downgrade();
        doc.add_listener(checkbox, EventKind::Change, move |_| {
            if let Some(doc) = weak.upgrade() {
                sync_params(&doc, checkbox, params_node);
            }
        })?;

        debug!("option `{}` added with {} params", option.name, params.len());
        self.options.push(OptionEntry {
            id: option.name,
            checkbox,
            params_node,
            params,
        });
        Ok(())
    }

    fn build_params(&self, option: &OptionSpec) -> Result<(NodeId, Vec<(String, NodeId)>)> {
        let doc = &self.doc;
        let params_node = doc.create_element("div");
        doc.set_style(params_node, Display::PROPERTY, Display::None.as_css());
        doc.set_style(params_node, "padding-left", "40px");
        doc.append_child(self.node, params_node)?;

        let mut params = Vec::with_capacity(option.params.len());
        for param in &option.params {
            let row = doc.create_element("div");
            doc.set_style(row, Display::PROPERTY, Display::TableRow.as_css());
            doc.append_child(params_node, row)?;

            let label = cell(doc, None);
            doc.set_text(label, &param.name);
            doc.append_child(row, label)?;

            let input_cell = cell(doc, Some(("padding-left", "20px")));
            doc.append_child(row, input_cell)?;
            let input = doc.create_element("input");
            doc.set_attribute(input, "placeholder", &param.description);
            let width = (param.description.chars().count() + 1) * 7;
            doc.set_style(input, "width", &format!("{width}px"));
            doc.append_child(input_cell, input)?;

            params.push((param.name.clone(), input));
        }
        Ok((params_node, params))
    }

    fn entry(&self, id: &str) -> Option<&OptionEntry> {
        self.options.iter().find(|o| o.id == id)
    }

    fn known_entry(&self, id: &str) -> Option<&OptionEntry> {
        let entry = self.entry(id);
        if entry.is_none() {
            warn!("option `{id}` doesn't exist");
        }
        entry
    }

    fn find_param(&self, id: &str, param: &str) -> Option<NodeId> {
        let entry = self.known_entry(id)?;
        let input = entry
            .params
            .iter()
            .find(|(name, _)| name == param)
            .map(|(_, input)| *input);
        if input.is_none() {
            warn!("parameter `{param}` doesn't exist for option `{id}`");
        }
        input
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// Option ids in display order.
    pub fn option_ids(&self) -> Vec<String> {
        self.options.iter().map(|o| o.id.clone()).collect()
    }

    pub fn parameter_ids(&self, id: &str) -> Vec<String> {
        self.known_entry(id)
            .map(|o| o.params.iter().map(|(name, _)| name.clone()).collect())
            .unwrap_or_default()
    }

    pub fn is_checked(&self, id: &str) -> bool {
        self.known_entry(id)
            .is_some_and(|o| self.doc.attribute(o.checkbox, "checked").is_some())
    }

    /// Check or uncheck an option, showing or hiding its parameters.
    pub fn set_checked(&self, id: &str, checked: bool) {
        let Some(entry) = self.known_entry(id) else {
            return;
        };
        if checked {
            self.doc.set_attribute(entry.checkbox, "checked", "");
        } else {
            self.doc.remove_attribute(entry.checkbox, "checked");
        }
        sync_params(&self.doc, entry.checkbox, entry.params_node);
    }

    pub fn param_value(&self, id: &str, param: &str) -> String {
        self.find_param(id, param)
            .and_then(|input| self.doc.attribute(input, "value"))
            .unwrap_or_default()
    }

    pub fn set_param_value(&self, id: &str, param: &str, value: &str) {
        if let Some(input) = self.find_param(id, param) {
            self.doc.set_attribute(input, "value", value);
        }
    }

    /// The checkbox input of an option, for hosts that forward user input.
    pub fn checkbox(&self, id: &str) -> Option<NodeId> {
        self.known_entry(id).map(|o| o.checkbox)
    }

    /// The text input of an option parameter.
    pub fn param_input(&self, id: &str, param: &str) -> Option<NodeId> {
        self.find_param(id, param)
    }

    /// Whether an option's parameters are currently shown.
    pub fn params_shown(&self, id: &str) -> bool {
        self.known_entry(id).is_some_and(|o| {
            self.doc
                .style(o.params_node, Display::PROPERTY)
                .is_some_and(|d| d != Display::None.as_css())
        })
    }

    // -------------------------------------------------------------------------
    // Export
    // -------------------------------------------------------------------------

    /// The current settings of every option, keyed by option id.
    pub fn settings(&self) -> BTreeMap<String, OptionSettings> {
        self.options
            .iter()
            .map(|o| {
                let params = o
                    .params
                    .iter()
                    .map(|(name, input)| {
                        let value = self.doc.attribute(*input, "value").unwrap_or_default();
                        (name.clone(), value)
                    })
                    .collect();
                let settings = OptionSettings {
                    checked: self.doc.attribute(o.checkbox, "checked").is_some(),
                    params,
                };
                (o.id.clone(), settings)
            })
            .collect()
    }

    /// `{option_id: {"checked": bool, "params": {param_id: value}}}`.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self.settings()).unwrap_or_else(|err| {
            warn!("options could not be serialised: {err}");
            serde_json::Value::Null
        })
    }
}

impl std::fmt::Debug for OptionsTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OptionsTable")
            .field("node", &self.node)
            .field("options", &self.option_ids())
            .finish()
    }
}
