use divdom::{Document, NodeId, StyleMap};

/// An immutable set of style properties that can be applied to any node.
///
/// Property names may be given in camelCase or kebab-case; they are stored
/// in their CSS form. Applying a style only touches the properties it
/// defines.
///
/// ```
/// use divui::Style;
///
/// let style = Style::new([("backgroundColor", "grey"), ("position", "relative")]);
/// assert_eq!(style.property("background-color"), Some("grey"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Style {
    props: StyleMap,
}

impl Style {
    pub fn new<K, V>(props: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut map = StyleMap::new();
        for (name, value) in props {
            map.set(name.as_ref(), value);
        }
        Self { props: map }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Write every property of this style onto `node`.
    pub fn apply_to(&self, doc: &Document, node: NodeId) {
        for (name, value) in self.props.iter() {
            doc.set_style(node, name, value);
        }
    }

    /// Remove from `node` every property this style defines.
    pub fn remove_from(&self, doc: &Document, node: NodeId) {
        for (name, _) in self.props.iter() {
            doc.remove_style(node, name);
        }
    }

    pub fn property(&self, name: &str) -> Option<&str> {
        self.props.get(name)
    }

    /// A copy of the property map.
    pub fn properties(&self) -> Vec<(String, String)> {
        self.props
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect()
    }

    /// A new style with `other`'s properties layered over this one.
    pub fn merged(&self, other: &Style) -> Style {
        let mut props = self.props.clone();
        for (name, value) in other.props.iter() {
            props.set(name, value);
        }
        Self { props }
    }

    pub fn is_empty(&self) -> bool {
        self.props.is_empty()
    }
}
