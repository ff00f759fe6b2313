//! Shared helpers for the integration tests.
//!
//! [`FakeEngine`] stands in for pdflatex/xelatex/lualatex: it reads the
//! `/TexformId` and `/TexformStretch` tags from the generated program and
//! answers with a PDF built by lopdf that has the shape the real engine
//! output would have for that variant.

#![allow(dead_code)]

use lopdf::{Dictionary, Document, Object, ObjectId, Stream, dictionary};
use texform::{EngineError, EngineKind, TexEngine};

/// Translation part of every generated form matrix.
pub const SHIFT: (f64, f64) = (5.0, 7.0);

/// One tagged fragment found in a LaTeX program.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tag {
    pub id: usize,
    pub stretch: f64,
}

/// Extract the tags in program order.
pub fn tags(source: &str) -> Vec<Tag> {
    let mut out = Vec::new();
    let mut rest = source;
    while let Some(start) = rest.find("/TexformId ") {
        rest = &rest[start + "/TexformId ".len()..];
        let id = leading_token(rest).parse().expect("numeric id");
        let at = rest.find("/TexformStretch ").expect("stretch follows id");
        let stretch = leading_token(&rest[at + "/TexformStretch ".len()..])
            .parse()
            .expect("numeric stretch");
        out.push(Tag { id, stretch });
    }
    out
}

fn leading_token(s: &str) -> &str {
    s.split_whitespace().next().unwrap_or("")
}

/// Bounding box the fake engine gives form `id`.
pub fn bbox_of(id: usize) -> [f64; 4] {
    [0.0, -2.0, 10.0 * id as f64, 8.0]
}

/// Depth (0.01 bp) the fake engine gives form `id`.
pub fn depth_of(id: usize) -> i64 {
    100 * id as i64
}

fn num(v: f64) -> Object {
    if v.fract() == 0.0 {
        Object::Integer(v as i64)
    } else {
        Object::Real(v as _)
    }
}

fn nums(values: &[f64]) -> Object {
    Object::Array(values.iter().copied().map(num).collect())
}

fn form(id: usize, matrix: [f64; 6], extra: Dictionary) -> Stream {
    let mut dict = dictionary! {
        "Type" => "XObject",
        "Subtype" => "Form",
        "FormType" => 1i64,
        "BBox" => nums(&bbox_of(id)),
        "Matrix" => nums(&matrix),
    };
    for (key, value) in extra.iter() {
        dict.set(key.clone(), value.clone());
    }
    Stream::new(dict, b"0 0 m 1 1 l S".to_vec())
}

fn attrs(tag: Tag) -> Dictionary {
    dictionary! {
        "TexformId" => tag.id as i64,
        "TexformStretch" => num(tag.stretch),
        "TexformDepth" => depth_of(tag.id),
    }
}

fn single_page(mut doc: Document, pages_id: ObjectId, resources: Dictionary) -> Vec<u8> {
    let content_id = doc.add_object(Stream::new(Dictionary::new(), b"q Q".to_vec()));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        "Contents" => content_id,
        "Resources" => resources,
    });
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![Object::from(page_id)],
            "Count" => 1i64,
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

/// pdfTeX/LuaTeX shape: metadata on the forms in `/XObject`.
pub fn native_pdf(tags: &[Tag], matrix: [f64; 6]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "CMR10",
    });
    let mut xobjects = Dictionary::new();
    for &tag in tags {
        let mut stream = form(tag.id, matrix, attrs(tag));
        stream.dict.set(
            "Resources",
            dictionary! { "Font" => dictionary! { "F1" => font_id } },
        );
        let id = doc.add_object(stream);
        xobjects.set(format!("Fm{}", tag.id), id);
    }
    single_page(doc, pages_id, dictionary! { "XObject" => xobjects })
}

/// XeTeX shape: plain forms plus a `/Texform` array of metadata
/// dictionaries.
pub fn side_channel_pdf(tags: &[Tag], matrix: [f64; 6]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let mut xobjects = Dictionary::new();
    let mut infos = Vec::new();
    for &tag in tags {
        let form_id = doc.add_object(form(tag.id, matrix, Dictionary::new()));
        xobjects.set(format!("Im{}", tag.id), form_id);
        let mut info = attrs(tag);
        info.set("TexformXForm", form_id);
        infos.push(Object::Reference(doc.add_object(info)));
    }
    let link = doc.add_object(Object::Array(infos));
    single_page(
        doc,
        pages_id,
        dictionary! { "XObject" => xobjects, "Texform" => link },
    )
}

/// A scripted LaTeX engine.
#[derive(Debug, Default)]
pub struct FakeEngine {
    pub kind: EngineKind,
    /// Ids the engine "loses".
    pub skip: Vec<usize>,
    /// Ids of surplus forms the engine adds.
    pub extra: Vec<usize>,
    /// Form matrix; the identity translated by [`SHIFT`] unless changed.
    pub matrix: Option<[f64; 6]>,
    /// Fail with this log instead of producing a PDF.
    pub fail: Option<String>,
    pub runs: usize,
    pub last_source: String,
}

impl FakeEngine {
    pub fn new(kind: EngineKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }
}

impl TexEngine for FakeEngine {
    fn run(&mut self, source: &[u8]) -> Result<Vec<u8>, EngineError> {
        self.runs += 1;
        self.last_source = String::from_utf8_lossy(source).into_owned();
        if let Some(log) = &self.fail {
            return Err(EngineError::Failed(log.clone()));
        }
        let mut tags: Vec<Tag> = tags(&self.last_source)
            .into_iter()
            .filter(|tag| !self.skip.contains(&tag.id))
            .collect();
        tags.extend(self.extra.iter().map(|&id| Tag { id, stretch: 1.0 }));
        let matrix = self
            .matrix
            .unwrap_or([1.0, 0.0, 0.0, 1.0, SHIFT.0, SHIFT.1]);
        Ok(if self.kind.uses_side_channel() {
            side_channel_pdf(&tags, matrix)
        } else {
            native_pdf(&tags, matrix)
        })
    }
}
