mod enums;
mod style;

pub use enums::{Display, Overflow, ParseKeywordError, Position, TextAlign, Visibility};
pub use style::{css_property_name, StyleMap};
