use divdom::{Document, TextAlign};

use crate::component::{Component, Widget};
use crate::error::Result;

/// A block of text with a horizontal alignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    component: Component,
}

impl Label {
    /// A left-aligned label.
    pub fn new(doc: &Document, text: &str) -> Self {
        Self::with_alignment(doc, text, TextAlign::Left)
    }

    pub fn with_alignment(doc: &Document, text: &str, alignment: TextAlign) -> Self {
        let label = Self {
            component: Component::new(doc),
        };
        label.set_text(text);
        label.set_alignment(alignment);
        label
    }

    pub fn text(&self) -> String {
        self.document().text(self.display_node())
    }

    /// Replace the label's text. Markup is kept as given.
    pub fn set_text(&self, text: &str) {
        self.document().set_text(self.display_node(), text);
    }

    /// `None` if the alignment was set to something other than a known
    /// keyword behind the label's back.
    pub fn alignment(&self) -> Option<TextAlign> {
        self.document()
            .style(self.display_node(), TextAlign::PROPERTY)?
            .parse()
            .ok()
    }

    pub fn set_alignment(&self, alignment: TextAlign) {
        self.document()
            .set_style(self.display_node(), TextAlign::PROPERTY, alignment.as_css());
    }

    /// Set the alignment from its CSS keyword (`left`, `center` or `right`).
    pub fn set_alignment_css(&self, value: &str) -> Result<()> {
        let alignment: TextAlign = value.trim().parse()?;
        self.set_alignment(alignment);
        Ok(())
    }
}

impl Widget for Label {
    fn component(&self) -> &Component {
        &self.component
    }
}
