//! Report configuration files.
//!
//! A configuration describes a whole report (theme, output location,
//! compiler, metadata and content) so it can be built without writing code:
//!
//! ```yaml
//! theme: theme.yaml
//! output:
//!   folder: build
//!   filename: annual
//! compiler:
//!   program: pdflatex
//!   passes: 2
//! metadata:
//!   title: Annual Report
//!   author: A. Author
//! content:
//!   - chapter: Introduction
//!   - paragraph: Some text.
//!   - clearpage
//!   - figure: { path: plot.png, caption: A plot, width: 4in }
//!   - table: { source: data.csv, caption: Data, column_width_cm: 2.5 }
//!   - listing: { code: "print(1)", language: Python }
//!   - latex: '\newpage'
//! ```
//!
//! Relative paths are taken relative to the configuration file.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::build::{BuildOptions, LatexCompiler};
use crate::document::{Figure, Listing, Metadata, Report, Table};
use crate::error::{ReportError, Result};
use crate::theme::Theme;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReportConfig {
    /// Theme file; the built-in theme when unset.
    #[serde(default)]
    pub theme: Option<PathBuf>,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub compiler: CompilerConfig,
    pub metadata: Metadata,
    #[serde(default)]
    pub content: Vec<ContentEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    pub folder: PathBuf,
    pub filename: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            folder: PathBuf::from("."),
            filename: "report".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompilerConfig {
    pub program: String,
    pub passes: u8,
    /// Extra engine arguments.
    pub args: Vec<String>,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            program: "pdflatex".to_string(),
            passes: 2,
            args: Vec::new(),
        }
    }
}

impl CompilerConfig {
    pub fn compiler(&self) -> LatexCompiler {
        self.args
            .iter()
            .fold(LatexCompiler::new(&self.program), |c, arg| c.arg(arg))
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FigureEntry {
    pub path: PathBuf,
    #[serde(default)]
    pub width: Option<String>,
    #[serde(default)]
    pub caption: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TableEntry {
    pub source: PathBuf,
    #[serde(default)]
    pub column_width_cm: Option<f32>,
    #[serde(default)]
    pub caption: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ListingEntry {
    pub code: String,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub caption: Option<String>,
}

/// One item of the `content` list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentEntry {
    Chapter(String),
    Section(String),
    Subsection(String),
    Clearpage,
    Paragraph(String),
    Figure(FigureEntry),
    Table(TableEntry),
    Listing(ListingEntry),
    /// Raw LaTeX, emitted unescaped.
    Latex(String),
}

impl ReportConfig {
    /// Reads a configuration file and anchors its relative paths.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| ReportError::io(path, e))?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        Self::from_yaml_str(&source, path, base)
    }

    /// Parses configuration YAML. `origin` names the source in errors;
    /// relative paths are resolved against `base`.
    pub fn from_yaml_str(source: &str, origin: &Path, base: &Path) -> Result<Self> {
        let mut config: ReportConfig =
            serde_yaml::from_str(source).map_err(|e| ReportError::Config {
                path: origin.to_path_buf(),
                source: e,
            })?;
        config.anchor_paths(base);
        debug!(
            config = %origin.display(),
            blocks = config.content.len(),
            "loaded report configuration"
        );
        Ok(config)
    }

    fn anchor_paths(&mut self, base: &Path) {
        let anchor = |path: &mut PathBuf| {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        };

        if let Some(theme) = self.theme.as_mut() {
            anchor(theme);
        }
        anchor(&mut self.output.folder);
        if let Some(cover) = self.metadata.cover_image.as_mut() {
            anchor(cover);
        }
        for entry in &mut self.content {
            match entry {
                ContentEntry::Figure(figure) => anchor(&mut figure.path),
                ContentEntry::Table(table) => anchor(&mut table.source),
                _ => {}
            }
        }
    }

    /// The configured theme, or the built-in one.
    pub fn theme(&self) -> Result<Theme> {
        match &self.theme {
            Some(path) => Theme::load(path),
            None => Ok(Theme::builtin()),
        }
    }

    pub fn build_options(&self) -> BuildOptions {
        BuildOptions::new(&self.output.folder, &self.output.filename).passes(self.compiler.passes)
    }

    /// Assembles the report, checking figures and reading tables.
    pub fn to_report(&self) -> Result<Report> {
        let mut report = Report::new(self.metadata.clone());
        for entry in &self.content {
            match entry {
                ContentEntry::Chapter(title) => {
                    report.chapter(title.as_str());
                }
                ContentEntry::Section(title) => {
                    report.section(title.as_str());
                }
                ContentEntry::Subsection(title) => {
                    report.subsection(title.as_str());
                }
                ContentEntry::Clearpage => {
                    report.clearpage();
                }
                ContentEntry::Paragraph(text) => {
                    report.paragraph(text.as_str());
                }
                ContentEntry::Figure(entry) => {
                    let mut figure = Figure::new(&entry.path);
                    figure.width = entry.width.clone();
                    figure.caption = entry.caption.clone();
                    report.figure(figure)?;
                }
                ContentEntry::Table(entry) => {
                    let mut table = Table::new(&entry.source);
                    table.column_width_cm = entry.column_width_cm;
                    table.caption = entry.caption.clone();
                    report.table(table)?;
                }
                ContentEntry::Latex(source) => {
                    report.latex(source.as_str());
                }
                ContentEntry::Listing(entry) => {
                    report.listing(Listing {
                        code: entry.code.clone(),
                        language: entry.language.clone(),
                        caption: entry.caption.clone(),
                    });
                }
            }
        }
        Ok(report)
    }
}
