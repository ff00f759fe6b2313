//! Document object tree.
//!
//! Objects form a closed set of variants ([`Object`]). Traversal goes
//! through the [`Visitor`] trait, which has one method per variant; groups
//! recurse into their children by default.

use std::cell::{Ref, RefCell};

use crate::attribute::{Attribute, HorizontalAlignment, VerticalAlignment};
use crate::form::GeneratedForm;
use crate::geometry::Vector;

/// Layout kind of a text object.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextKind {
    /// Inline label: a single `\hbox` line.
    #[default]
    Label,
    /// Block text typeset in a `minipage` of the object's width.
    Minipage,
}

/// A text object holding LaTeX source.
///
/// The compiled form is cached behind a `RefCell` so a converter holding
/// shared references to the tree can bind new forms. Objects are therefore
/// not `Sync`.
#[derive(Debug, Clone)]
pub struct Text {
    text: String,
    kind: TextKind,
    position: Vector,
    width: f64,
    size: Attribute,
    style: Attribute,
    stroke: Attribute,
    horizontal_alignment: HorizontalAlignment,
    vertical_alignment: VerticalAlignment,
    form: RefCell<Option<GeneratedForm>>,
}

impl Text {
    /// Create an inline label at `position`.
    pub fn label(text: impl Into<String>, position: Vector) -> Self {
        Self {
            text: text.into(),
            kind: TextKind::Label,
            position,
            width: 0.0,
            size: Attribute::normal(),
            style: Attribute::normal(),
            stroke: Attribute::black(),
            horizontal_alignment: HorizontalAlignment::Left,
            vertical_alignment: VerticalAlignment::Baseline,
            form: RefCell::new(None),
        }
    }

    /// Create a block text of the given width (bp), anchored at its top.
    pub fn minipage(text: impl Into<String>, position: Vector, width: f64) -> Self {
        Self {
            kind: TextKind::Minipage,
            width,
            vertical_alignment: VerticalAlignment::Top,
            ..Self::label(text, position)
        }
    }

    pub fn with_size(mut self, size: impl Into<Attribute>) -> Self {
        self.size = size.into();
        self
    }

    pub fn with_style(mut self, style: impl Into<Attribute>) -> Self {
        self.style = style.into();
        self
    }

    pub fn with_stroke(mut self, stroke: impl Into<Attribute>) -> Self {
        self.stroke = stroke.into();
        self
    }

    pub fn with_alignment(
        mut self,
        horizontal: HorizontalAlignment,
        vertical: VerticalAlignment,
    ) -> Self {
        self.horizontal_alignment = horizontal;
        self.vertical_alignment = vertical;
        self
    }

    /// LaTeX source of the text.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn kind(&self) -> TextKind {
        self.kind
    }

    pub fn is_minipage(&self) -> bool {
        self.kind == TextKind::Minipage
    }

    pub fn position(&self) -> Vector {
        self.position
    }

    /// Width in bp; only meaningful for minipages.
    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn size(&self) -> &Attribute {
        &self.size
    }

    pub fn style(&self) -> &Attribute {
        &self.style
    }

    pub fn stroke(&self) -> &Attribute {
        &self.stroke
    }

    pub fn horizontal_alignment(&self) -> HorizontalAlignment {
        self.horizontal_alignment
    }

    pub fn vertical_alignment(&self) -> VerticalAlignment {
        self.vertical_alignment
    }

    /// Cached compiled form, if the text has been typeset.
    pub fn form(&self) -> Ref<'_, Option<GeneratedForm>> {
        self.form.borrow()
    }

    pub fn has_form(&self) -> bool {
        self.form.borrow().is_some()
    }

    /// Replace the cached form, returning the previous one.
    pub fn set_form(&self, form: GeneratedForm) -> Option<GeneratedForm> {
        self.form.replace(Some(form))
    }

    /// Drop the cached form, e.g. after the source changed.
    pub fn clear_form(&self) -> Option<GeneratedForm> {
        self.form.take()
    }

    /// Whether `other` would typeset to the same form: every attribute
    /// except the cached form is equal.
    pub fn typesets_like(&self, other: &Text) -> bool {
        self.text == other.text
            && self.kind == other.kind
            && self.position == other.position
            && self.width == other.width
            && self.size == other.size
            && self.style == other.style
            && self.stroke == other.stroke
            && self.horizontal_alignment == other.horizontal_alignment
            && self.vertical_alignment == other.vertical_alignment
    }
}

/// An ordered collection of objects.
#[derive(Debug, Clone, Default)]
pub struct Group {
    objects: Vec<Object>,
}

impl Group {
    pub fn new(objects: Vec<Object>) -> Self {
        Self { objects }
    }

    pub fn push(&mut self, object: impl Into<Object>) {
        self.objects.push(object.into());
    }

    pub fn objects(&self) -> &[Object] {
        &self.objects
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

/// A placement of a named symbol from the style sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct Reference {
    pub name: String,
    pub position: Vector,
}

impl Reference {
    pub fn new(name: impl Into<String>, position: Vector) -> Self {
        Self {
            name: name.into(),
            position,
        }
    }
}

/// A drawn shape. Only its paint attributes are modeled.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    pub stroke: Option<Attribute>,
    pub fill: Option<Attribute>,
}

impl Path {
    pub fn stroked(stroke: impl Into<Attribute>) -> Self {
        Self {
            stroke: Some(stroke.into()),
            fill: None,
        }
    }
}

/// A node of the document tree.
#[derive(Debug, Clone)]
pub enum Object {
    Text(Text),
    Group(Group),
    Reference(Reference),
    Path(Path),
}

impl Object {
    /// Dispatch to the visitor method for this variant.
    pub fn accept<'a, V: Visitor<'a> + ?Sized>(&'a self, visitor: &mut V) {
        match self {
            Object::Text(text) => visitor.visit_text(text),
            Object::Group(group) => visitor.visit_group(group),
            Object::Reference(reference) => visitor.visit_reference(reference),
            Object::Path(path) => visitor.visit_path(path),
        }
    }

    /// True if this object is or contains a text object.
    pub fn contains_text(&self) -> bool {
        match self {
            Object::Text(_) => true,
            Object::Group(group) => group.objects().iter().any(Object::contains_text),
            Object::Reference(_) | Object::Path(_) => false,
        }
    }
}

impl From<Text> for Object {
    fn from(text: Text) -> Self {
        Object::Text(text)
    }
}

impl From<Group> for Object {
    fn from(group: Group) -> Self {
        Object::Group(group)
    }
}

impl From<Reference> for Object {
    fn from(reference: Reference) -> Self {
        Object::Reference(reference)
    }
}

impl From<Path> for Object {
    fn from(path: Path) -> Self {
        Object::Path(path)
    }
}

/// Callbacks for walking an object tree.
///
/// `'a` is the lifetime of the tree, so visitors may keep references to
/// the nodes they see.
pub trait Visitor<'a> {
    fn visit_text(&mut self, text: &'a Text);

    /// Visit the children of a group in order.
    fn visit_group(&mut self, group: &'a Group) {
        for object in group.objects() {
            object.accept(self);
        }
    }

    fn visit_reference(&mut self, _reference: &'a Reference) {}

    fn visit_path(&mut self, _path: &'a Path) {}
}
