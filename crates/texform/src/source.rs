//! Generation of the LaTeX program that typesets every fragment.
//!
//! Each fragment is boxed, measured and shipped out as a Form XObject that
//! carries its 1-based position as `/TexformId`, its stretch factor and its
//! depth. pdfTeX and LuaTeX attach these through `\pdfxform attr`; XeTeX
//! builds an array of metadata dictionaries named `@tfforms` and links it
//! from the page resources as `/Texform`.
//!
//! The output depends only on the fragments, the preamble, the cascade and
//! the options, so running the generator twice yields identical bytes.

use std::fmt;
use std::io::Write;

use texform_core::{Attribute, CompileError, EngineKind, StyleCascade, TextKind};

use crate::collector::TextFragment;
use crate::options::{ANCIENT_PDFTEX_ENV, LatexOptions};

/// Writes LaTeX source for a list of fragments.
pub struct SourceGenerator<'c> {
    cascade: &'c dyn StyleCascade,
    options: LatexOptions,
}

impl<'c> SourceGenerator<'c> {
    pub fn new(cascade: &'c dyn StyleCascade, options: LatexOptions) -> Self {
        Self { cascade, options }
    }

    /// Write the complete program to `out`.
    ///
    /// Returns the number of fragments whose text has no cached form yet.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError::Other`] before writing anything if the
    /// cascade gives a fragment a stretch that is not a positive finite
    /// number, and [`CompileError::StreamWrite`] if writing fails.
    pub fn write<W: Write + ?Sized>(
        &self,
        out: &mut W,
        fragments: &[TextFragment<'_>],
        preamble: &str,
    ) -> Result<usize, CompileError> {
        let stretches = fragments
            .iter()
            .map(|fragment| self.stretch_of(fragment))
            .collect::<Result<Vec<_>, _>>()?;

        self.write_header(out, preamble)?;
        let mut count = 0;
        for (index, (fragment, stretch)) in fragments.iter().zip(stretches).enumerate() {
            if !fragment.text().has_form() {
                count += 1;
            }
            self.write_fragment(out, index + 1, fragment, stretch)?;
        }
        self.write_trailer(out)?;
        out.flush()?;
        Ok(count)
    }

    /// Stretch factor of a symbolic size; numeric sizes are absolute.
    fn stretch_of(&self, fragment: &TextFragment<'_>) -> Result<f64, CompileError> {
        let size = fragment.size();
        if !size.is_symbolic() {
            return Ok(1.0);
        }
        let stretch = self.cascade.text_stretch(size);
        if stretch.is_finite() && stretch > 0.0 {
            Ok(stretch)
        } else {
            Err(CompileError::Other(format!(
                "invalid stretch {stretch} for text size {size:?}"
            )))
        }
    }

    fn xetex(&self) -> bool {
        self.options.engine == EngineKind::Xetex
    }

    fn write_header<W: Write + ?Sized>(&self, out: &mut W, preamble: &str) -> std::io::Result<()> {
        let ancient = self.options.ancient_pdftex;
        let engine = self.options.engine;

        out.write_all(b"\\nonstopmode\n")?;
        if !self.xetex() {
            out.write_all(
                b"\\expandafter\\ifx\\csname pdfobjcompresslevel\\endcsname\
                  \\relax\\else\\pdfobjcompresslevel0\\fi\n",
            )?;
            if !ancient && engine != EngineKind::Luatex {
                writeln!(
                    out,
                    "\\ifnum\\the\\pdftexversion<140\
                     \\errmessage{{Pdftex is too old. \
                     Set {ANCIENT_PDFTEX_ENV} environment variable!}}\\fi"
                )?;
            }
            if engine == EngineKind::Luatex {
                out.write_all(
                    b"\\expandafter\\ifx\\csname pdfcolorstack\\endcsname\\relax\
                      \\RequirePackage{luatex85}\\fi\n",
                )?;
            }
        }

        out.write_all(
            b"\\documentclass{article}\n\
              \\newdimen\\tffs\n\
              \\newcounter{tfPage}\\newcounter{tfView}\n\
              \\newcounter{tfPages}\\newcounter{tfViews}\n\
              \\newcommand{\\PageTitle}[1]{#1}\n\
              \\newcommand{\\tfsymbol}[4]{$\\bullet$}\n",
        )?;
        out.write_all(
            b"\\def\\tfdefinecolors#1{\\tfcolorpreamble{#1}\\let\\tfcolorpreamble\\relax}\n\
              \\def\\tfcolorpreamble#1{\\usepackage[#1]{xcolor}\n",
        )?;
        for name in self.cascade.color_names() {
            let color = self.cascade.color(&Attribute::symbolic(name.as_str()));
            if color.is_gray() {
                writeln!(out, "\\definecolor{{{name}}}{{gray}}{{{}}}", Num(color.r))?;
            } else {
                writeln!(
                    out,
                    "\\definecolor{{{name}}}{{rgb}}{{{},{},{}}}",
                    Num(color.r),
                    Num(color.g),
                    Num(color.b)
                )?;
            }
        }
        out.write_all(b"}\n")?;

        if self.xetex() {
            out.write_all(
                b"\\def\\tfsetcolor#1#2#3{\\special{pdf:bc [#1 #2 #3]}}\n\
                  \\def\\tfresetcolor{\\special{pdf:ec}}\n",
            )?;
        } else if !ancient {
            out.write_all(
                b"\\makeatletter\n\
                  \\def\\tfsetcolor#1#2#3{\\def\\current@color{#1 #2 #3 rg #1 #2 #3 RG}\
                  \\pdfcolorstack\\@pdfcolorstack push{\\current@color}}\n\
                  \\def\\tfresetcolor{\\pdfcolorstack\\@pdfcolorstack pop}\n\
                  \\makeatother\n",
            )?;
        } else {
            out.write_all(
                b"\\def\\tfsetcolor#1#2#3{\\color[rgb]{#1,#2,#3}}\n\
                  \\def\\tfresetcolor{}\n",
            )?;
        }

        writeln!(out, "{}", self.cascade.preamble())?;
        writeln!(out, "{preamble}")?;
        out.write_all(
            b"\\tfdefinecolors{}\n\
              \\pagestyle{empty}\n\
              \\newcount\\bigpoint\\dimen0=0.01bp\\bigpoint=\\dimen0\n\
              \\begin{document}\n\
              \\begin{picture}(500,500)\n",
        )?;
        if self.xetex() {
            out.write_all(b"\\special{pdf:obj @tfforms []}\n")?;
        }
        Ok(())
    }

    fn write_fragment<W: Write + ?Sized>(
        &self,
        out: &mut W,
        n: usize,
        fragment: &TextFragment<'_>,
        stretch: f64,
    ) -> std::io::Result<()> {
        let text = fragment.text();
        let size = fragment.size();

        out.write_all(b"\\setbox0=\\hbox{")?;
        if text.is_minipage() {
            write!(out, "\\begin{{minipage}}{{{}bp}}", Num(text.width() / stretch))?;
        }

        match self.cascade.text_size(size) {
            Attribute::Number(fs) => writeln!(
                out,
                "\\fontsize{{{}}}{{{}bp}}\\selectfont",
                Num(fs),
                Num(fs * 1.2)
            )?,
            other => writeln!(out, "{}", other.as_str().unwrap_or_default())?,
        }

        let color = self.cascade.color(text.stroke());
        writeln!(
            out,
            "\\tfsetcolor{{{}}}{{{}}}{{{}}}%",
            Num(color.r),
            Num(color.g),
            Num(color.b)
        )?;

        let style = self.cascade.text_style(text.kind(), text.style());
        let (before, after) = style.split_once('\0').unwrap_or((style.as_str(), ""));
        out.write_all(before.as_bytes())?;
        out.write_all(text.text().as_bytes())?;
        match text.kind() {
            TextKind::Minipage => {
                if !text.text().is_empty() && !text.text().ends_with('\n') {
                    out.write_all(b"\n")?;
                }
                out.write_all(after.as_bytes())?;
                out.write_all(b"\\end{minipage}")?;
            }
            TextKind::Label => writeln!(out, "{after}%")?,
        }

        out.write_all(
            b"\\tfresetcolor}\n\
              \\count0=\\dp0\\divide\\count0 by \\bigpoint\n",
        )?;

        if self.xetex() {
            writeln!(out, "\\special{{ pdf:bxobj @tfform{n}")?;
            out.write_all(
                b"width \\the\\wd0 \\space height \\the\\ht0 \\space depth \\the\\dp0}%\n\
                  \\usebox0%\n\
                  \\special{pdf:exobj}%\n",
            )?;
            writeln!(
                out,
                "\\special{{pdf:obj @tfinfo{n} << /TexformId {n} /TexformStretch {} \
                 /TexformDepth \\the\\count0 /TexformXForm @tfform{n} >>}}",
                Num(stretch)
            )?;
            writeln!(out, "\\special{{pdf:close @tfinfo{n}}}")?;
            writeln!(out, "\\special{{pdf:put @tfforms @tfinfo{n}}}")?;
            writeln!(out, "\\put(0,0){{\\special{{pdf:uxobj @tfform{n}}}}}")?;
        } else {
            writeln!(
                out,
                "\\pdfxform attr{{/TexformId {n} /TexformStretch {} /TexformDepth \\the\\count0}}\
                 0\\put(0,0){{\\pdfrefxform\\pdflastxform}}",
                Num(stretch)
            )?;
        }
        Ok(())
    }

    fn write_trailer<W: Write + ?Sized>(&self, out: &mut W) -> std::io::Result<()> {
        out.write_all(b"\\end{picture}\n")?;
        if self.xetex() {
            out.write_all(
                b"\\special{pdf:close @tfforms}\n\
                  \\special{pdf:put @resources << /Texform @tfforms >>}\n",
            )?;
        }
        out.write_all(b"\\end{document}\n")
    }
}

/// Decimal rendering for TeX: at most four decimals, no trailing zeros,
/// no exponent.
struct Num(f64);

impl fmt::Display for Num {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = (self.0 * 10_000.0).round() / 10_000.0;
        if !v.is_finite() || v == 0.0 {
            return f.write_str("0");
        }
        let s = format!("{v:.4}");
        f.write_str(s.trim_end_matches('0').trim_end_matches('.'))
    }
}
