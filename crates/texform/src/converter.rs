//! The converter driving one compile attempt.

use std::io::Write;
use std::rc::Rc;

use texform_core::{CompileError, Object, Page, StyleCascade, Text, Visitor};
use texform_parse::{CompiledDocument, FormExtractor, ResourceRegistry};

use crate::collector::{FragmentText, TextCollector, TextFragment};
use crate::engine::TexEngine;
use crate::matcher::{FormPool, bind_forms};
use crate::options::LatexOptions;
use crate::source::SourceGenerator;

/// Page-number template used when the style does not provide one.
pub const DEFAULT_PAGE_NUMBER: &str =
    "\\tfNumber{\\arabic{tfPage}}{\\arabic{tfPage} - \\arabic{tfView}}";

/// A page-number text synthesized for one view of a page.
#[derive(Debug, Clone)]
pub struct PageNumber {
    /// 0-based page index.
    pub page: usize,
    /// 0-based view index.
    pub view: usize,
    /// The text, which receives its form when the attempt succeeds.
    pub text: Rc<Text>,
}

/// What a compile attempt leaves to the caller besides the bound forms.
#[derive(Debug, Clone, Default)]
pub struct FormResources {
    registry: ResourceRegistry,
    page_numbers: Vec<PageNumber>,
}

impl FormResources {
    /// Objects reachable from the resources of the compiled page. Bound
    /// forms refer to them by resource name.
    pub fn registry(&self) -> &ResourceRegistry {
        &self.registry
    }

    pub fn page_numbers(&self) -> &[PageNumber] {
        &self.page_numbers
    }

    /// The page-number text for a page and view, if one was added.
    pub fn page_number(&self, page: usize, view: usize) -> Option<&Text> {
        self.page_numbers
            .iter()
            .find(|pn| pn.page == page && pn.view == view)
            .map(|pn| pn.text.as_ref())
    }
}

/// Converts the text objects of a document into PDF forms with LaTeX.
///
/// One instance serves one compile attempt: collect the fragments with
/// [`scan_page`](Self::scan_page), [`scan_object`](Self::scan_object) and
/// [`add_page_number`](Self::add_page_number), then either call
/// [`compile`](Self::compile) or drive the steps by hand:
///
/// ```ignore
/// let mut latex = Latex::new(&sheet, LatexOptions::from_env(EngineKind::Pdftex));
/// latex.scan_page(&mut page);
/// latex.create_latex_source(&mut file, preamble)?;
/// // ... run pdflatex on the file ...
/// latex.read_pdf(&pdf_bytes)?;
/// latex.update_text_objects()?;
/// let resources = latex.take_resources();
/// ```
pub struct Latex<'a> {
    cascade: &'a dyn StyleCascade,
    options: LatexOptions,
    fragments: Vec<TextFragment<'a>>,
    pool: FormPool,
    resources: FormResources,
}

impl<'a> Latex<'a> {
    pub fn new(cascade: &'a dyn StyleCascade, options: LatexOptions) -> Self {
        Self {
            cascade,
            options,
            fragments: Vec::new(),
            pool: FormPool::new(),
            resources: FormResources::default(),
        }
    }

    pub fn options(&self) -> LatexOptions {
        self.options
    }

    /// Fragments collected so far, in position order.
    pub fn fragments(&self) -> &[TextFragment<'a>] {
        &self.fragments
    }

    /// Forms read from the engine output and not bound yet.
    pub fn pending_forms(&self) -> &FormPool {
        &self.pool
    }

    /// Collect the text leaves of `object`. Returns the total number of
    /// fragments collected so far.
    pub fn scan_object(&mut self, object: &'a Object) -> usize {
        let mut collector = TextCollector::new(&mut self.fragments);
        object.accept(&mut collector);
        self.fragments.len()
    }

    /// Collect the page title and then the text leaves of every object on
    /// the page. Objects containing text get their cached bounding box
    /// invalidated. Returns the total number of fragments collected so far.
    pub fn scan_page(&mut self, page: &'a mut Page) -> usize {
        page.apply_title_style(self.cascade);
        for index in 0..page.count() {
            if page.object(index).contains_text() {
                page.invalidate_bbox(index);
            }
        }

        let page: &'a Page = page;
        let mut collector = TextCollector::new(&mut self.fragments);
        if let Some(title) = page.title_text() {
            collector.visit_text(title);
        }
        for object in page.objects() {
            object.accept(&mut collector);
        }
        self.fragments.len()
    }

    /// Add a text rendering the page number of view `view` (0-based) of
    /// page `page` (0-based), in a document with `pages` pages where this
    /// page has `views` views.
    pub fn add_page_number(&mut self, page: usize, view: usize, pages: usize, views: usize) {
        let style = self.cascade.page_number_style();
        let template = if style.text.is_empty() {
            DEFAULT_PAGE_NUMBER
        } else {
            style.text.as_str()
        };
        let source = format!(
            "\\def\\tfNumber#1#2{{#{}}}\
             \\setcounter{{tfPage}}{{{}}}\\setcounter{{tfView}}{{{}}}\
             \\setcounter{{tfPages}}{{{}}}\\setcounter{{tfViews}}{{{}}}{template}",
            if views > 1 { 2 } else { 1 },
            page + 1,
            view + 1,
            pages,
            views,
        );
        let text = Rc::new(
            Text::label(source, style.position)
                .with_size(style.size)
                .with_stroke(style.color)
                .with_alignment(style.horizontal_alignment, style.vertical_alignment),
        );
        self.fragments
            .push(TextFragment::new(FragmentText::PageNumber(Rc::clone(&text))));
        self.resources
            .page_numbers
            .push(PageNumber { page, view, text });
    }

    /// Write the LaTeX program for the collected fragments.
    ///
    /// Returns the number of fragments that have no form yet.
    pub fn create_latex_source<W: Write + ?Sized>(
        &self,
        out: &mut W,
        preamble: &str,
    ) -> Result<usize, CompileError> {
        SourceGenerator::new(self.cascade, self.options).write(out, &self.fragments, preamble)
    }

    /// Parse the PDF produced by the engine and extract its forms into the
    /// pending pool.
    ///
    /// # Errors
    ///
    /// Fails if the PDF cannot be parsed, page 1 lacks the expected
    /// resources, or any form fails validation. Nothing is added to the
    /// pool in that case.
    pub fn read_pdf(&mut self, bytes: &[u8]) -> Result<(), CompileError> {
        let doc = CompiledDocument::open(bytes)?;
        let registry = ResourceRegistry::collect(&doc, doc.page_resources(0)?)?;
        let forms = FormExtractor::new(&registry, self.options.engine).extract_all()?;
        tracing::debug!(forms = forms.len(), objects = registry.len(), "read LaTeX output");
        self.pool.extend(forms);
        self.resources.registry = registry;
        Ok(())
    }

    /// Bind the pending forms to the fragments, all or nothing.
    pub fn update_text_objects(&mut self) -> Result<(), CompileError> {
        bind_forms(&self.fragments, &mut self.pool)
    }

    /// Hand the resource registry and the page-number texts to the caller.
    pub fn take_resources(&mut self) -> FormResources {
        std::mem::take(&mut self.resources)
    }

    /// Run the whole attempt: generate the source, run `engine` on it, read
    /// the result and bind the forms.
    ///
    /// Returns the number of fragments that had no form before the run. With
    /// no fragments collected the engine is not run.
    pub fn compile(
        &mut self,
        engine: &mut dyn TexEngine,
        preamble: &str,
    ) -> Result<usize, CompileError> {
        if self.fragments.is_empty() {
            return Ok(0);
        }
        let mut source = Vec::new();
        let pending = self.create_latex_source(&mut source, preamble)?;
        tracing::debug!(
            fragments = self.fragments.len(),
            pending,
            engine = self.options.engine.program(),
            "running LaTeX"
        );
        let pdf = engine.run(&source)?;
        self.read_pdf(&pdf)?;
        self.update_text_objects()?;
        Ok(pending)
    }
}
