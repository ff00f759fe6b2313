//! Extraction and validation of the Form XObjects produced by LaTeX.
//!
//! pdfTeX and LuaTeX attach the metadata (`/TexformId`, `/TexformDepth`,
//! `/TexformStretch`) to each Form XObject through `\pdfxform attr`, so the
//! forms are found by iterating the page's `/XObject` resources. XeTeX
//! cannot do that; instead it writes one metadata dictionary per form into
//! an array linked from the page resources as `/Texform`, each pointing at
//! its form through `/TexformXForm`. The resource name of such a form is
//! recovered by scanning `/XObject` for the entry referencing it.

use texform_core::engine::keys;
use texform_core::{BBox, EngineKind, GeneratedForm, Vector};

use crate::error::BackendError;
use crate::lopdf_backend::{object_dict, object_to_f64};
use crate::resources::ResourceRegistry;

/// Extracts [`GeneratedForm`]s from a collected [`ResourceRegistry`].
#[derive(Debug, Clone, Copy)]
pub struct FormExtractor<'r> {
    registry: &'r ResourceRegistry,
    engine: EngineKind,
}

impl<'r> FormExtractor<'r> {
    pub fn new(registry: &'r ResourceRegistry, engine: EngineKind) -> Self {
        Self { registry, engine }
    }

    /// Extract every form, failing on the first invalid one.
    ///
    /// # Errors
    ///
    /// Returns the document-level error (missing link or `/XObject`
    /// dictionary) or the error of the first form that fails validation.
    pub fn extract_all(&self) -> Result<Vec<GeneratedForm>, BackendError> {
        self.extract_each()?.into_iter().collect()
    }

    /// Extract each form independently. The outer error is for the
    /// document as a whole; each entry carries the outcome for one form.
    pub fn extract_each(&self) -> Result<Vec<Result<GeneratedForm, BackendError>>, BackendError> {
        if self.engine.uses_side_channel() {
            let link = self.metadata_link()?;
            Ok(link
                .iter()
                .map(|entry| {
                    let info = object_dict(self.registry.resolve(entry)).ok_or_else(|| {
                        BackendError::Parse(format!("/{} entry is not a dictionary", keys::LINK))
                    })?;
                    self.extract_side_channel(info)
                })
                .collect())
        } else {
            let xobjects = self.registry.resources_of_kind("XObject").ok_or_else(|| {
                tracing::warn!("page 1 has no form XObjects");
                BackendError::ResourceMissing("page 1 has no /XObject resources".to_string())
            })?;
            Ok(xobjects
                .iter()
                .map(|(key, _)| self.extract_native(key))
                .collect())
        }
    }

    fn metadata_link(&self) -> Result<&'r [lopdf::Object], BackendError> {
        let registry = self.registry;
        let link = registry
            .resources()
            .get(keys::LINK.as_bytes())
            .ok()
            .map(|obj| registry.resolve(obj))
            .and_then(|obj| obj.as_array().ok());
        match link {
            Some(array) => Ok(array.as_slice()),
            None => {
                tracing::warn!("page 1 has no /{} link", keys::LINK);
                Err(BackendError::ResourceMissing(format!(
                    "page 1 has no /{} link",
                    keys::LINK
                )))
            }
        }
    }

    /// Extract the form stored under `key` in the `/XObject` resources,
    /// reading the metadata from the form dictionary itself.
    pub fn extract_native(&self, key: &[u8]) -> Result<GeneratedForm, BackendError> {
        let name = String::from_utf8_lossy(key).into_owned();
        let form = self
            .registry
            .find_resource("XObject", key)
            .and_then(object_dict)
            .ok_or_else(|| {
                BackendError::ResourceMissing(format!("XObject /{name} is not a form"))
            })?;
        build_form(self.registry, name, form, form)
    }

    /// Extract the form described by a side-channel metadata dictionary.
    pub fn extract_side_channel(
        &self,
        info: &lopdf::Dictionary,
    ) -> Result<GeneratedForm, BackendError> {
        let form_num = match info.get(keys::XFORM.as_bytes()) {
            Ok(lopdf::Object::Reference(id)) => id.0,
            _ => return Err(BackendError::field(keys::XFORM, "metadata dictionary")),
        };
        let form = self
            .registry
            .object(form_num)
            .and_then(object_dict)
            .ok_or_else(|| {
                BackendError::ResourceMissing(format!("form object {form_num} not found"))
            })?;
        let name = self.resource_name_of(form_num)?;
        build_form(self.registry, name, info, form)
    }

    /// Linear scan of `/XObject` for the key whose value references `num`.
    fn resource_name_of(&self, num: u32) -> Result<String, BackendError> {
        let xobjects = self.registry.resources_of_kind("XObject").ok_or_else(|| {
            BackendError::ResourceMissing("page 1 has no /XObject resources".to_string())
        })?;
        xobjects
            .iter()
            .find(|(_, value)| matches!(value, lopdf::Object::Reference(id) if id.0 == num))
            .map(|(key, _)| String::from_utf8_lossy(key).into_owned())
            .ok_or_else(|| {
                BackendError::ResourceMissing(format!(
                    "no /XObject resource refers to form object {num}"
                ))
            })
    }
}

/// Build and validate a form. `info` holds the metadata, `form` the
/// geometry; for pdfTeX and LuaTeX both are the same dictionary.
fn build_form(
    registry: &ResourceRegistry,
    name: String,
    info: &lopdf::Dictionary,
    form: &lopdf::Dictionary,
) -> Result<GeneratedForm, BackendError> {
    let id = number_field(registry, info, keys::ID, &name)?;
    if !(id >= 1.0 && id.fract() == 0.0) {
        return Err(BackendError::field(keys::ID, name));
    }
    let depth = number_field(registry, info, keys::DEPTH, &name)?;
    let stretch = number_field(registry, info, keys::STRETCH, &name)?;

    let b = number_array(registry, form, "BBox", 4, &name)?;
    let bbox = BBox::from_corners(Vector::new(b[0], b[1]), Vector::new(b[2], b[3]));

    let m = number_array(registry, form, "Matrix", 6, &name)?;
    if m[0] != 1.0 || m[1] != 0.0 || m[2] != 0.0 || m[3] != 1.0 {
        tracing::debug!(form = %name, matrix = ?m, "PDF XObject has a non-trivial transformation");
        return Err(BackendError::Geometry(format!(
            "form {name} has a non-trivial transformation [{} {} {} {}]",
            m[0], m[1], m[2], m[3]
        )));
    }
    let translation = -Vector::new(m[4], m[5]) - bbox.bottom_left();

    tracing::trace!(form = %name, id, depth, stretch, "extracted form");
    Ok(GeneratedForm {
        name,
        id: id as usize,
        bbox,
        depth: depth as i32,
        stretch,
        translation,
    })
}

fn number_field(
    registry: &ResourceRegistry,
    dict: &lopdf::Dictionary,
    key: &str,
    form: &str,
) -> Result<f64, BackendError> {
    dict.get(key.as_bytes())
        .ok()
        .and_then(|obj| object_to_f64(registry.resolve(obj)).ok())
        .filter(|v| v.is_finite())
        .ok_or_else(|| BackendError::field(key, form))
}

fn number_array(
    registry: &ResourceRegistry,
    dict: &lopdf::Dictionary,
    key: &str,
    len: usize,
    form: &str,
) -> Result<Vec<f64>, BackendError> {
    let array = dict
        .get(key.as_bytes())
        .ok()
        .map(|obj| registry.resolve(obj))
        .and_then(|obj| obj.as_array().ok())
        .ok_or_else(|| BackendError::field(key, form))?;
    if array.len() != len {
        return Err(BackendError::Geometry(format!(
            "form {form}: expected {len}-element /{key}, got {}",
            array.len()
        )));
    }
    array
        .iter()
        .map(|obj| {
            object_to_f64(registry.resolve(obj)).map_err(|_| {
                BackendError::Geometry(format!("form {form}: non-numeric entry in /{key}"))
            })
        })
        .collect()
}
