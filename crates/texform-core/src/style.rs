//! Style resolution.
//!
//! [`StyleCascade`] is the lookup service the converter queries to turn
//! symbolic attributes into concrete values. [`StyleSheet`] is a simple
//! in-memory implementation; all of its tables are ordered so anything
//! derived from iterating them is deterministic.

use std::collections::BTreeMap;

use crate::attribute::{Attribute, HorizontalAlignment, VerticalAlignment};
use crate::color::Color;
use crate::geometry::Vector;
use crate::object::TextKind;

/// Style used to synthesize page-number texts.
#[derive(Debug, Clone, PartialEq)]
pub struct PageNumberStyle {
    pub color: Attribute,
    pub size: Attribute,
    pub horizontal_alignment: HorizontalAlignment,
    pub vertical_alignment: VerticalAlignment,
    /// LaTeX template; empty selects the built-in page/view template.
    pub text: String,
    pub position: Vector,
}

impl Default for PageNumberStyle {
    fn default() -> Self {
        Self {
            color: Attribute::black(),
            size: Attribute::normal(),
            horizontal_alignment: HorizontalAlignment::Left,
            vertical_alignment: VerticalAlignment::Baseline,
            text: String::new(),
            position: Vector::new(10.0, 10.0),
        }
    }
}

/// Style used to turn a page title into a text object.
#[derive(Debug, Clone, PartialEq)]
pub struct TitleStyle {
    pub position: Vector,
    pub size: Attribute,
    pub color: Attribute,
    pub horizontal_alignment: HorizontalAlignment,
    pub vertical_alignment: VerticalAlignment,
}

/// Resolves symbolic attributes to concrete values.
pub trait StyleCascade {
    /// Resolve a text size. The result is either a number (font size in bp)
    /// or a symbolic value holding a LaTeX size command such as `\large`.
    fn text_size(&self, size: &Attribute) -> Attribute;

    /// Horizontal stretch factor for a symbolic text size.
    fn text_stretch(&self, size: &Attribute) -> f64;

    /// Resolve a color attribute.
    fn color(&self, color: &Attribute) -> Color;

    /// All symbolic color names, in a stable order.
    fn color_names(&self) -> Vec<String>;

    /// Style wrapper for a text of the given kind. A NUL byte separates the
    /// code placed before the text from the code placed after it.
    fn text_style(&self, kind: TextKind, style: &Attribute) -> String;

    /// LaTeX preamble contributed by the style sheets.
    fn preamble(&self) -> String;

    fn page_number_style(&self) -> PageNumberStyle;

    /// Style for page titles; `None` means titles are not rendered.
    fn title_style(&self) -> Option<TitleStyle>;
}

/// In-memory [`StyleCascade`].
#[derive(Debug, Clone, Default)]
pub struct StyleSheet {
    colors: BTreeMap<String, Color>,
    text_sizes: BTreeMap<String, Attribute>,
    text_stretches: BTreeMap<String, f64>,
    text_styles: BTreeMap<String, String>,
    label_styles: BTreeMap<String, String>,
    preamble: String,
    page_number_style: PageNumberStyle,
    title_style: Option<TitleStyle>,
}

impl StyleSheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_color(mut self, name: impl Into<String>, color: Color) -> Self {
        self.colors.insert(name.into(), color);
        self
    }

    /// Map a symbolic size to a number or to a LaTeX size command.
    pub fn with_text_size(mut self, name: impl Into<String>, value: impl Into<Attribute>) -> Self {
        self.text_sizes.insert(name.into(), value.into());
        self
    }

    pub fn with_text_stretch(mut self, name: impl Into<String>, stretch: f64) -> Self {
        self.text_stretches.insert(name.into(), stretch);
        self
    }

    pub fn with_text_style(mut self, name: impl Into<String>, style: impl Into<String>) -> Self {
        self.text_styles.insert(name.into(), style.into());
        self
    }

    pub fn with_label_style(mut self, name: impl Into<String>, style: impl Into<String>) -> Self {
        self.label_styles.insert(name.into(), style.into());
        self
    }

    pub fn with_preamble(mut self, preamble: impl Into<String>) -> Self {
        self.preamble = preamble.into();
        self
    }

    pub fn with_page_number_style(mut self, style: PageNumberStyle) -> Self {
        self.page_number_style = style;
        self
    }

    pub fn with_title_style(mut self, style: TitleStyle) -> Self {
        self.title_style = Some(style);
        self
    }
}

fn lookup_or_normal<'s, T>(table: &'s BTreeMap<String, T>, key: &Attribute) -> Option<&'s T> {
    key.as_str()
        .and_then(|name| table.get(name))
        .or_else(|| table.get("normal"))
}

impl StyleCascade for StyleSheet {
    fn text_size(&self, size: &Attribute) -> Attribute {
        match size {
            Attribute::Symbolic(_) => lookup_or_normal(&self.text_sizes, size)
                .cloned()
                .unwrap_or(Attribute::Number(10.0)),
            other => other.clone(),
        }
    }

    fn text_stretch(&self, size: &Attribute) -> f64 {
        match size {
            Attribute::Symbolic(name) => self.text_stretches.get(name).copied().unwrap_or(1.0),
            _ => 1.0,
        }
    }

    fn color(&self, color: &Attribute) -> Color {
        match color {
            Attribute::Color(c) => *c,
            Attribute::Number(level) => Color::gray(*level),
            Attribute::Symbolic(name) => match name.as_str() {
                "black" => Color::black(),
                "white" => Color::white(),
                _ => self.colors.get(name).copied().unwrap_or_default(),
            },
        }
    }

    fn color_names(&self) -> Vec<String> {
        self.colors.keys().cloned().collect()
    }

    fn text_style(&self, kind: TextKind, style: &Attribute) -> String {
        let table = match kind {
            TextKind::Minipage => &self.text_styles,
            TextKind::Label => &self.label_styles,
        };
        lookup_or_normal(table, style).cloned().unwrap_or_default()
    }

    fn preamble(&self) -> String {
        self.preamble.clone()
    }

    fn page_number_style(&self) -> PageNumberStyle {
        self.page_number_style.clone()
    }

    fn title_style(&self) -> Option<TitleStyle> {
        self.title_style.clone()
    }
}
