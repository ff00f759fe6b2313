//! Collection of the text leaves of a document tree.

use std::ops::Deref;
use std::rc::Rc;

use texform_core::{Attribute, Text, Visitor};

/// Where the text of a fragment lives.
#[derive(Debug, Clone)]
pub enum FragmentText<'a> {
    /// A text object of the caller's document tree.
    Document(&'a Text),
    /// A page-number text synthesized by the converter. It is shared with
    /// the [`PageNumber`](crate::PageNumber) record handed to the caller.
    PageNumber(Rc<Text>),
}

impl Deref for FragmentText<'_> {
    type Target = Text;

    fn deref(&self) -> &Text {
        match self {
            FragmentText::Document(text) => text,
            FragmentText::PageNumber(text) => text,
        }
    }
}

/// A text object queued for compilation, with the size it is compiled at.
///
/// A fragment's position (1-based, in collection order) is its only
/// correlation key with the compiled forms.
#[derive(Debug, Clone)]
pub struct TextFragment<'a> {
    text: FragmentText<'a>,
    size: Attribute,
}

impl<'a> TextFragment<'a> {
    pub fn new(text: FragmentText<'a>) -> Self {
        let size = text.size().clone();
        Self { text, size }
    }

    pub fn text(&self) -> &Text {
        &self.text
    }

    /// The size attribute captured when the fragment was collected.
    pub fn size(&self) -> &Attribute {
        &self.size
    }

    pub fn is_page_number(&self) -> bool {
        matches!(self.text, FragmentText::PageNumber(_))
    }
}

/// Visitor appending every text leaf to a fragment list, in pre-order.
///
/// References are skipped; symbols are not expanded.
#[derive(Debug)]
pub struct TextCollector<'a, 'l> {
    fragments: &'l mut Vec<TextFragment<'a>>,
    text_found: bool,
}

impl<'a, 'l> TextCollector<'a, 'l> {
    pub fn new(fragments: &'l mut Vec<TextFragment<'a>>) -> Self {
        Self {
            fragments,
            text_found: false,
        }
    }

    /// Whether a text was found since the last [`reset`](Self::reset).
    pub fn text_found(&self) -> bool {
        self.text_found
    }

    pub fn reset(&mut self) {
        self.text_found = false;
    }
}

impl<'a> Visitor<'a> for TextCollector<'a, '_> {
    fn visit_text(&mut self, text: &'a Text) {
        self.fragments
            .push(TextFragment::new(FragmentText::Document(text)));
        self.text_found = true;
    }
}
