use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Returned when a CSS keyword does not name a variant of the target enum.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{value:?} is not a valid {property} value")]
pub struct ParseKeywordError {
    pub property: &'static str,
    pub value: String,
}

macro_rules! css_keyword {
    (
        $(#[$meta:meta])*
        $name:ident, $property:literal {
            $($variant:ident => $css:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// Property this keyword is written to.
            pub const PROPERTY: &'static str = $property;

            pub const fn as_css(self) -> &'static str {
                match self {
                    $(Self::$variant => $css),+
                }
            }
        }

        impl FromStr for $name {
            type Err = ParseKeywordError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim() {
                    $($css => Ok(Self::$variant),)+
                    other => Err(ParseKeywordError {
                        property: $property,
                        value: other.to_string(),
                    }),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_css())
            }
        }
    };
}

css_keyword! {
    /// Box generation mode of a node.
    Display, "display" {
        None => "none",
        Inline => "inline",
        Block => "block",
        InlineBlock => "inline-block",
        Table => "table",
        TableRow => "table-row",
        TableRowGroup => "table-row-group",
        TableHeaderGroup => "table-header-group",
        TableCell => "table-cell",
    }
}

css_keyword! {
    Visibility, "visibility" {
        Visible => "visible",
        Hidden => "hidden",
    }
}

css_keyword! {
    Position, "position" {
        Static => "static",
        Relative => "relative",
        Absolute => "absolute",
    }
}

css_keyword! {
    /// Scroll behaviour of a box along one axis.
    Overflow, "overflow" {
        Visible => "visible",
        Hidden => "hidden",
        Scroll => "scroll",
        Auto => "auto",
    }
}

css_keyword! {
    TextAlign, "text-align" {
        Left => "left",
        Center => "center",
        Right => "right",
    }
}
