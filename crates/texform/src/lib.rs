//! texform: typeset the text of a vector document with LaTeX.
//!
//! A [`Latex`] converter collects the text objects of a document tree,
//! writes one LaTeX program that ships every text out as a PDF Form
//! XObject tagged with its position, runs the engine through a
//! [`TexEngine`], and binds each extracted [`GeneratedForm`] back to the
//! text that produced it.
//!
//! ```ignore
//! use texform::{EngineKind, Latex, LatexOptions, StyleSheet};
//!
//! let sheet = StyleSheet::new();
//! let mut latex = Latex::new(&sheet, LatexOptions::from_env(EngineKind::Pdftex));
//! latex.scan_page(&mut page);
//! latex.compile(&mut engine, "")?;
//! ```
//!
//! The crate re-exports the types of texform-core, so most callers only
//! need this one.

mod collector;
mod converter;
mod engine;
mod matcher;
mod options;
mod source;

pub use collector::{FragmentText, TextCollector, TextFragment};
pub use converter::{DEFAULT_PAGE_NUMBER, FormResources, Latex, PageNumber};
pub use engine::{EngineError, TexEngine};
pub use matcher::{FormPool, bind_forms};
pub use options::{ANCIENT_PDFTEX_ENV, LatexOptions};
pub use source::SourceGenerator;

pub use texform_core::{
    Attribute, BBox, Color, CompileError, EngineKind, GeneratedForm, Group, HorizontalAlignment,
    Object, Page, PageNumberStyle, Path, Reference, StyleCascade, StyleSheet, Text, TextKind,
    TitleStyle, Vector, VerticalAlignment, Visitor,
};
pub use texform_parse::{BackendError, CompiledDocument, FormExtractor, ResourceRegistry};
