//! lopdf-based reader for the PDF produced by the LaTeX engine.
//!
//! Wraps [`lopdf::Document`] as a read-only [`CompiledDocument`] and
//! provides the object-level helpers (reference resolution, number
//! conversion, inherited page attributes) the extractor builds on.

use crate::error::BackendError;

/// The parsed output of the LaTeX engine.
pub struct CompiledDocument {
    /// The underlying lopdf document.
    inner: lopdf::Document,
    /// Cached ordered list of page ObjectIds (indexed by 0-based page number).
    page_ids: Vec<lopdf::ObjectId>,
}

impl std::fmt::Debug for CompiledDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompiledDocument")
            .field("page_count", &self.page_ids.len())
            .field("object_count", &self.inner.objects.len())
            .finish_non_exhaustive()
    }
}

impl CompiledDocument {
    /// Parse PDF bytes.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::Parse`] if the bytes are not a valid PDF.
    pub fn open(bytes: &[u8]) -> Result<Self, BackendError> {
        let inner = lopdf::Document::load_mem(bytes).map_err(|e| {
            tracing::warn!("cannot parse the PDF file produced by LaTeX: {e}");
            BackendError::Parse(format!("failed to parse PDF: {e}"))
        })?;

        // get_pages returns BTreeMap<u32, ObjectId> with 1-based keys
        let page_ids: Vec<lopdf::ObjectId> = inner.get_pages().values().copied().collect();

        Ok(CompiledDocument { inner, page_ids })
    }

    /// Access the underlying lopdf document.
    pub fn inner(&self) -> &lopdf::Document {
        &self.inner
    }

    pub fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    /// Resource dictionary of a page (0-based), inherited through the page
    /// tree and with indirect references resolved.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::ResourceMissing`] if the page does not exist
    /// or has no resources.
    pub fn page_resources(&self, index: usize) -> Result<&lopdf::Dictionary, BackendError> {
        let page_id = *self.page_ids.get(index).ok_or_else(|| {
            BackendError::ResourceMissing(format!(
                "page {} not found (document has {} pages)",
                index + 1,
                self.page_ids.len()
            ))
        })?;
        let obj = resolve_inherited(&self.inner, page_id, b"Resources")?.ok_or_else(|| {
            BackendError::ResourceMissing(format!("page {} has no /Resources", index + 1))
        })?;
        let obj = match obj {
            lopdf::Object::Reference(id) => self.inner.get_object(*id).map_err(|e| {
                BackendError::Parse(format!("failed to resolve /Resources reference: {e}"))
            })?,
            other => other,
        };
        match obj {
            lopdf::Object::Dictionary(dict) => Ok(dict),
            lopdf::Object::Null => Err(BackendError::ResourceMissing(format!(
                "page {} has null /Resources",
                index + 1
            ))),
            _ => Err(BackendError::Parse("/Resources is not a dictionary".to_string())),
        }
    }
}

/// Look up a key in the page dictionary, walking up the page tree
/// (via /Parent) if the key is not found on the page itself.
///
/// Returns `None` if the key is not found anywhere in the tree.
fn resolve_inherited<'a>(
    doc: &'a lopdf::Document,
    page_id: lopdf::ObjectId,
    key: &[u8],
) -> Result<Option<&'a lopdf::Object>, BackendError> {
    let mut current_id = page_id;
    loop {
        let dict = doc
            .get_object(current_id)
            .and_then(|o| o.as_dict())
            .map_err(|e| BackendError::Parse(format!("failed to get page dictionary: {e}")))?;

        if let Ok(value) = dict.get(key) {
            return Ok(Some(value));
        }

        match dict.get(b"Parent") {
            Ok(parent_obj) => {
                current_id = parent_obj
                    .as_reference()
                    .map_err(|e| BackendError::Parse(format!("invalid /Parent reference: {e}")))?;
            }
            Err(_) => return Ok(None),
        }
    }
}

/// Convert a lopdf numeric object (Integer or Real) to f64.
pub(crate) fn object_to_f64(obj: &lopdf::Object) -> Result<f64, BackendError> {
    match obj {
        lopdf::Object::Integer(i) => Ok(*i as f64),
        lopdf::Object::Real(f) => Ok(*f as f64),
        _ => Err(BackendError::Parse(format!("expected number, got {obj:?}"))),
    }
}

/// The dictionary of a dictionary or stream object.
pub(crate) fn object_dict(obj: &lopdf::Object) -> Option<&lopdf::Dictionary> {
    match obj {
        lopdf::Object::Dictionary(dict) => Some(dict),
        lopdf::Object::Stream(stream) => Some(&stream.dict),
        _ => None,
    }
}
