/// Normalise a style property name to its kebab-case CSS form.
///
/// `backgroundColor` and `background-color` both become `background-color`.
pub fn css_property_name(name: &str) -> String {
    let name = name.trim();
    let mut out = String::with_capacity(name.len() + 4);
    for ch in name.chars() {
        if ch.is_ascii_uppercase() {
            out.push('-');
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

/// Inline style declarations of a node, kept in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleMap {
    declarations: Vec<(String, String)>,
}

impl StyleMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        let property = css_property_name(property);
        self.declarations
            .iter()
            .find(|(name, _)| *name == property)
            .map(|(_, value)| value.as_str())
    }

    /// Set a declaration. An empty value removes it, as assigning `""` to a
    /// style property does in a browser.
    pub fn set(&mut self, property: &str, value: impl Into<String>) {
        let property = css_property_name(property);
        let value = value.into();
        if value.is_empty() {
            self.declarations.retain(|(name, _)| *name != property);
            return;
        }
        match self.declarations.iter_mut().find(|(name, _)| *name == property) {
            Some((_, existing)) => *existing = value,
            None => self.declarations.push((property, value)),
        }
    }

    pub fn remove(&mut self, property: &str) -> Option<String> {
        let property = css_property_name(property);
        let idx = self
            .declarations
            .iter()
            .position(|(name, _)| *name == property)?;
        Some(self.declarations.remove(idx).1)
    }

    pub fn clear(&mut self) {
        self.declarations.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.declarations
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Serialise as `name: value; name: value`.
    pub fn css_text(&self) -> String {
        self.iter()
            .map(|(name, value)| format!("{name}: {value}"))
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// Parse `name: value; ...` text, replacing every declaration.
    /// Malformed declarations are skipped.
    pub fn parse(css_text: &str) -> Self {
        let mut map = Self::new();
        for declaration in css_text.split(';') {
            if let Some((name, value)) = declaration.split_once(':') {
                let name = name.trim();
                if !name.is_empty() {
                    map.set(name, value.trim());
                }
            }
        }
        map
    }
}
