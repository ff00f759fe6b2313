//! Attribute values as stored on document objects.
//!
//! An attribute is either absolute (a number or a color) or symbolic, in
//! which case a [`StyleCascade`](crate::StyleCascade) resolves it.

use crate::color::Color;

/// A possibly symbolic attribute value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Attribute {
    /// An absolute number (e.g. a font size in bp).
    Number(f64),
    /// An absolute color.
    Color(Color),
    /// A name to be looked up in the cascade. For text sizes the cascade may
    /// also answer with a symbolic value, which is then a LaTeX size command.
    Symbolic(String),
}

impl Attribute {
    /// Shorthand for a symbolic attribute.
    pub fn symbolic(name: impl Into<String>) -> Self {
        Attribute::Symbolic(name.into())
    }

    /// The symbolic value `normal`, the default for sizes and styles.
    pub fn normal() -> Self {
        Attribute::symbolic("normal")
    }

    /// The symbolic value `black`, the default stroke.
    pub fn black() -> Self {
        Attribute::symbolic("black")
    }

    pub fn is_symbolic(&self) -> bool {
        matches!(self, Attribute::Symbolic(_))
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Attribute::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_color(&self) -> Option<Color> {
        match self {
            Attribute::Color(c) => Some(*c),
            _ => None,
        }
    }

    /// The name of a symbolic attribute.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Attribute::Symbolic(name) => Some(name),
            _ => None,
        }
    }
}

impl From<f64> for Attribute {
    fn from(n: f64) -> Self {
        Attribute::Number(n)
    }
}

impl From<Color> for Attribute {
    fn from(c: Color) -> Self {
        Attribute::Color(c)
    }
}

impl From<&str> for Attribute {
    fn from(name: &str) -> Self {
        Attribute::symbolic(name)
    }
}

/// Horizontal alignment of a text object relative to its position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HorizontalAlignment {
    #[default]
    Left,
    Right,
    Center,
}

/// Vertical alignment of a text object relative to its position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VerticalAlignment {
    Bottom,
    #[default]
    Baseline,
    Top,
    Center,
}
