//! Binding of extracted forms to the fragments that produced them.

use texform_core::{CompileError, GeneratedForm};

use crate::collector::TextFragment;

/// Forms extracted from one engine run, not yet bound to a fragment.
#[derive(Debug, Clone, Default)]
pub struct FormPool {
    forms: Vec<GeneratedForm>,
}

impl FormPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, form: GeneratedForm) {
        self.forms.push(form);
    }

    pub fn len(&self) -> usize {
        self.forms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }

    pub fn forms(&self) -> &[GeneratedForm] {
        &self.forms
    }

    /// Index of the first form carrying correlation identifier `id`.
    pub fn position_of(&self, id: usize) -> Option<usize> {
        self.forms.iter().position(|form| form.id == id)
    }

    fn take(&mut self, index: usize) -> GeneratedForm {
        self.forms.swap_remove(index)
    }

    /// Drop every remaining form, returning how many there were.
    pub fn clear(&mut self) -> usize {
        let n = self.forms.len();
        self.forms.clear();
        n
    }
}

impl Extend<GeneratedForm> for FormPool {
    fn extend<I: IntoIterator<Item = GeneratedForm>>(&mut self, iter: I) {
        self.forms.extend(iter);
    }
}

impl FromIterator<GeneratedForm> for FormPool {
    fn from_iter<I: IntoIterator<Item = GeneratedForm>>(iter: I) -> Self {
        Self {
            forms: iter.into_iter().collect(),
        }
    }
}

/// Bind the form with `id == n` to the fragment at position `n`, for every
/// position.
///
/// Either every fragment is bound or none is: all forms are located first,
/// and if some position has no form the pool is left as it was. Forms left
/// over after a successful bind are logged and discarded, so the pool is
/// always empty on success.
///
/// # Errors
///
/// Returns [`CompileError::Correlation`] with the first unmatched position.
pub fn bind_forms(fragments: &[TextFragment<'_>], pool: &mut FormPool) -> Result<(), CompileError> {
    let mut located = Vec::with_capacity(fragments.len());
    for position in 1..=fragments.len() {
        match pool.position_of(position) {
            Some(index) => located.push(pool.take(index)),
            None => {
                pool.extend(located);
                return Err(CompileError::Correlation { position });
            }
        }
    }

    for (fragment, form) in fragments.iter().zip(located) {
        fragment.text().set_form(form);
    }

    if !pool.is_empty() {
        let ids: Vec<usize> = pool.forms().iter().map(|form| form.id).collect();
        tracing::warn!(?ids, "discarding forms that match no text fragment");
        pool.clear();
    }
    Ok(())
}
