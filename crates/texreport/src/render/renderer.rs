//! Pre-compiled report renderer.

use minijinja::{Environment, UndefinedBehavior};
use tracing::debug;

use super::context::ReportContext;
use super::filters::register_filters;
use crate::assets::AssetPlan;
use crate::document::Report;
use crate::error::Result;
use crate::theme::Theme;

/// The LaTeX sources for one report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedReport {
    /// Name of the generated class; the class file is `<class_name>.cls`.
    pub class_name: String,
    pub class_source: String,
    pub document_source: String,
    /// Files to copy next to the sources.
    pub assets: AssetPlan,
    /// The class loads font files with `fontspec`, which needs XeLaTeX or
    /// LuaLaTeX rather than pdfLaTeX.
    pub uses_fontspec: bool,
}

/// A renderer with a theme's templates compiled.
///
/// Create one per theme and reuse it for any number of reports.
///
/// # Example
///
/// ```rust
/// use texreport::{Metadata, Report, ReportRenderer, Theme};
///
/// let renderer = ReportRenderer::new(Theme::builtin()).unwrap();
///
/// let mut report = Report::new(Metadata::new("Report").author("A. Author"));
/// report.chapter("Introduction").paragraph("Hello.");
///
/// let rendered = renderer.render(&report).unwrap();
/// assert!(rendered.document_source.contains(r"\chapter{Introduction}"));
/// ```
pub struct ReportRenderer {
    env: Environment<'static>,
    theme: Theme,
}

impl ReportRenderer {
    /// Compiles the theme's templates.
    ///
    /// # Errors
    ///
    /// Returns an error if any attribute alias is invalid (dangling or
    /// cyclic), a template file cannot be read, or a template has a syntax
    /// error.
    pub fn new(theme: Theme) -> Result<Self> {
        theme.validate()?;

        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.set_keep_trailing_newline(true);
        register_filters(&mut env);

        for name in theme.templates().names() {
            let source = theme.templates().get_content(name)?;
            env.add_template_owned(name.to_string(), source)?;
            debug!(theme = theme.name(), template = name, "compiled template");
        }

        Ok(Self { env, theme })
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Renders the class and document sources for `report`.
    ///
    /// # Errors
    ///
    /// [`ReportError::MissingResource`](crate::ReportError::MissingResource)
    /// if the cover image, logo, a font file or a figure is absent;
    /// template errors if a template refers to an attribute that isn't
    /// defined.
    pub fn render(&self, report: &Report) -> Result<RenderedReport> {
        let (context, assets) = ReportContext::build(&self.theme, report)?;

        let class_source = self.env.get_template("class")?.render(&context)?;
        let document_source = self.env.get_template("document")?.render(&context)?;
        debug!(
            class = self.theme.name(),
            bytes = document_source.len(),
            assets = assets.copies().len(),
            "rendered report"
        );

        Ok(RenderedReport {
            uses_fontspec: context.uses_fontspec(),
            class_name: self.theme.name().to_string(),
            class_source,
            document_source,
            assets,
        })
    }
}
