//! Registry of the objects reachable from a page's resources.
//!
//! After a compile the caller keeps the forms but drops the engine's PDF,
//! so every object the page resources depend on (form streams, fonts,
//! encodings, metadata dictionaries) is copied out into a table keyed by
//! object number.

use std::collections::{BTreeMap, HashSet};

use crate::error::BackendError;
use crate::lopdf_backend::{CompiledDocument, object_dict};

/// Objects reachable from one resource dictionary.
#[derive(Debug, Clone, Default)]
pub struct ResourceRegistry {
    resources: lopdf::Dictionary,
    objects: BTreeMap<u32, lopdf::Object>,
}

impl ResourceRegistry {
    /// Copy `resources` and everything reachable from it out of `doc`.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::Parse`] if a reference cannot be resolved.
    pub fn collect(
        doc: &CompiledDocument,
        resources: &lopdf::Dictionary,
    ) -> Result<Self, BackendError> {
        let inner = doc.inner();
        let mut objects = BTreeMap::new();
        let mut seen = HashSet::new();
        let mut pending: Vec<lopdf::ObjectId> = Vec::new();

        for (_, value) in resources.iter() {
            push_references(value, &mut pending);
        }
        while let Some(id) = pending.pop() {
            if !seen.insert(id) {
                continue;
            }
            let obj = inner.get_object(id).map_err(|e| {
                BackendError::Parse(format!("broken reference {} {} R: {e}", id.0, id.1))
            })?;
            push_references(obj, &mut pending);
            objects.insert(id.0, obj.clone());
        }

        Ok(Self {
            resources: resources.clone(),
            objects,
        })
    }

    /// The resource dictionary itself.
    pub fn resources(&self) -> &lopdf::Dictionary {
        &self.resources
    }

    /// Object by object number.
    pub fn object(&self, num: u32) -> Option<&lopdf::Object> {
        self.objects.get(&num)
    }

    /// Follow one level of indirection; unknown references resolve to themselves.
    pub fn resolve<'s>(&'s self, obj: &'s lopdf::Object) -> &'s lopdf::Object {
        match obj {
            lopdf::Object::Reference(id) => self.object(id.0).unwrap_or(obj),
            _ => obj,
        }
    }

    /// Sub-dictionary of the resources for a kind such as `XObject` or `Font`.
    pub fn resources_of_kind(&self, kind: &str) -> Option<&lopdf::Dictionary> {
        let obj = self.resources.get(kind.as_bytes()).ok()?;
        object_dict(self.resolve(obj))
    }

    /// Resolved resource of `kind` named `name`.
    pub fn find_resource(&self, kind: &str, name: &[u8]) -> Option<&lopdf::Object> {
        let obj = self.resources_of_kind(kind)?.get(name).ok()?;
        Some(self.resolve(obj))
    }

    /// Number of collected indirect objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Collected objects in object-number order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &lopdf::Object)> {
        self.objects.iter().map(|(num, obj)| (*num, obj))
    }
}

fn push_references(obj: &lopdf::Object, out: &mut Vec<lopdf::ObjectId>) {
    match obj {
        lopdf::Object::Reference(id) => out.push(*id),
        lopdf::Object::Array(items) => {
            for item in items {
                push_references(item, out);
            }
        }
        lopdf::Object::Dictionary(dict) => {
            for (_, value) in dict.iter() {
                push_references(value, out);
            }
        }
        lopdf::Object::Stream(stream) => {
            for (_, value) in stream.dict.iter() {
                push_references(value, out);
            }
        }
        _ => {}
    }
}
