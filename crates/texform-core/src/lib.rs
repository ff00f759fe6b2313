//! texform-core: backend-independent data types.
//!
//! This crate provides the document tree (texts, groups, references),
//! the style cascade interface, geometry and color types, the compiled
//! [`GeneratedForm`] record and the [`CompileError`] type shared by the
//! parse layer and the public facade.

pub mod attribute;
pub mod color;
pub mod engine;
pub mod error;
pub mod form;
pub mod geometry;
pub mod object;
pub mod page;
pub mod style;

pub use attribute::{Attribute, HorizontalAlignment, VerticalAlignment};
pub use color::Color;
pub use engine::EngineKind;
pub use error::CompileError;
pub use form::GeneratedForm;
pub use geometry::{BBox, Vector};
pub use object::{Group, Object, Path, Reference, Text, TextKind, Visitor};
pub use page::{Page, PageObject};
pub use style::{PageNumberStyle, StyleCascade, StyleSheet, TitleStyle};
