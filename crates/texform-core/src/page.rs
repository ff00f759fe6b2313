//! Pages of a document.

use crate::geometry::BBox;
use crate::object::{Object, Text};
use crate::style::StyleCascade;

/// A top-level object on a page, with its cached bounding box.
#[derive(Debug, Clone)]
pub struct PageObject {
    pub object: Object,
    bbox: Option<BBox>,
}

impl PageObject {
    pub fn bbox(&self) -> Option<BBox> {
        self.bbox
    }
}

/// A page: a title plus an ordered list of top-level objects.
#[derive(Debug, Clone, Default)]
pub struct Page {
    title: String,
    title_text: Option<Text>,
    objects: Vec<PageObject>,
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Set the page title. A changed title drops the title text until
    /// [`apply_title_style`](Self::apply_title_style) rebuilds it.
    pub fn set_title(&mut self, title: impl Into<String>) {
        let title = title.into();
        if title != self.title {
            self.title = title;
            self.title_text = None;
        }
    }

    /// Rebuild the title text object from the cascade's title style.
    ///
    /// A title text that would typeset the same way is kept, together with
    /// its cached form.
    pub fn apply_title_style(&mut self, cascade: &dyn StyleCascade) {
        let styled = match cascade.title_style() {
            Some(ts) if !self.title.is_empty() => Text::label(self.title.clone(), ts.position)
                .with_size(ts.size)
                .with_stroke(ts.color)
                .with_alignment(ts.horizontal_alignment, ts.vertical_alignment),
            _ => {
                self.title_text = None;
                return;
            }
        };
        match &self.title_text {
            Some(current) if current.typesets_like(&styled) => {}
            _ => self.title_text = Some(styled),
        }
    }

    /// The styled title text, if a title is set and a title style applies.
    pub fn title_text(&self) -> Option<&Text> {
        self.title_text.as_ref()
    }

    pub fn push(&mut self, object: impl Into<Object>) {
        self.objects.push(PageObject {
            object: object.into(),
            bbox: None,
        });
    }

    pub fn count(&self) -> usize {
        self.objects.len()
    }

    pub fn object(&self, index: usize) -> &Object {
        &self.objects[index].object
    }

    pub fn objects(&self) -> impl Iterator<Item = &Object> {
        self.objects.iter().map(|po| &po.object)
    }

    pub fn bbox(&self, index: usize) -> Option<BBox> {
        self.objects[index].bbox
    }

    pub fn set_bbox(&mut self, index: usize, bbox: BBox) {
        self.objects[index].bbox = Some(bbox);
    }

    /// Forget the cached bounding box of an object whose rendering changed.
    pub fn invalidate_bbox(&mut self, index: usize) {
        self.objects[index].bbox = None;
    }
}
