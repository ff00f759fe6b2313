//! Builders for synthetic engine output used by unit tests.

use lopdf::{Dictionary, Document, Object, ObjectId, Stream, dictionary};

/// Numeric object: Integer when whole, Real otherwise.
pub(crate) fn num(v: f64) -> Object {
    if v.fract() == 0.0 {
        Object::Integer(v as i64)
    } else {
        Object::Real(v as _)
    }
}

pub(crate) fn nums(values: &[f64]) -> Object {
    Object::Array(values.iter().copied().map(num).collect())
}

/// A Form XObject stream with the given geometry plus extra entries.
pub(crate) fn form_stream(bbox: &[f64], matrix: &[f64], extra: Dictionary) -> Stream {
    let mut dict = dictionary! {
        "Type" => "XObject",
        "Subtype" => "Form",
        "FormType" => 1i64,
        "BBox" => nums(bbox),
        "Matrix" => nums(matrix),
    };
    for (key, value) in extra.iter() {
        dict.set(key.clone(), value.clone());
    }
    Stream::new(dict, b"BT ET".to_vec())
}

/// Metadata entries as pdfTeX writes them from `\pdfxform attr{...}`.
pub(crate) fn form_attrs(id: i64, stretch: f64, depth: i64) -> Dictionary {
    dictionary! {
        "TexformId" => id,
        "TexformStretch" => num(stretch),
        "TexformDepth" => depth,
    }
}

/// Single-page document builder.
pub(crate) struct PdfBuilder {
    doc: Document,
    pages_id: ObjectId,
}

impl PdfBuilder {
    pub(crate) fn new() -> Self {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        Self { doc, pages_id }
    }

    pub(crate) fn add(&mut self, object: impl Into<Object>) -> ObjectId {
        self.doc.add_object(object)
    }

    pub(crate) fn replace(&mut self, id: ObjectId, object: impl Into<Object>) {
        self.doc.objects.insert(id, object.into());
    }

    /// Finish with the given `/Resources` on the page itself.
    pub(crate) fn finish_with_resources(self, resources: impl Into<Object>) -> Vec<u8> {
        self.finish(Some(resources.into()), None)
    }

    /// Finish with `/Resources` on the `/Pages` node only.
    pub(crate) fn finish_with_inherited_resources(self, resources: Dictionary) -> Vec<u8> {
        self.finish(None, Some(Object::Dictionary(resources)))
    }

    fn finish(mut self, page_resources: Option<Object>, pages_resources: Option<Object>) -> Vec<u8> {
        let content_id = self.doc.add_object(Stream::new(Dictionary::new(), b"q Q".to_vec()));
        let mut page = dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            "Contents" => content_id,
        };
        if let Some(res) = page_resources {
            page.set("Resources", res);
        }
        let page_id = self.doc.add_object(page);

        let mut pages = dictionary! {
            "Type" => "Pages",
            "Kids" => vec![Object::from(page_id)],
            "Count" => 1i64,
        };
        if let Some(res) = pages_resources {
            pages.set("Resources", res);
        }
        self.doc.objects.insert(self.pages_id, Object::Dictionary(pages));

        let catalog_id = self.doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => self.pages_id,
        });
        self.doc.trailer.set("Root", catalog_id);

        let mut buf = Vec::new();
        self.doc.save_to(&mut buf).expect("failed to save test PDF");
        buf
    }
}

/// Create a minimal valid PDF document with the given number of empty pages.
pub(crate) fn create_test_pdf(page_count: usize) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id: ObjectId = doc.new_object_id();

    let mut page_ids: Vec<Object> = Vec::new();
    for _ in 0..page_count {
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        });
        page_ids.push(page_id.into());
    }

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => page_ids,
            "Count" => page_count as i64,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf).expect("failed to save test PDF");
    buf
}
