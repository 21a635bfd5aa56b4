//! # texreport
//!
//! Themed LaTeX report generation.
//!
//! A [`Theme`] is the template configuration: a registry of named
//! presentation attributes (fonts, page geometry, colors, header and footer
//! content, cover and title page sizing, code-listing styling) plus the
//! MiniJinja templates that apply them. A [`Report`] is the content:
//! [`Metadata`] for the cover and title page and an ordered list of blocks.
//! [`ReportRenderer`] combines the two into a LaTeX class and document, and
//! [`build`] writes them out with their assets and runs a LaTeX engine.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use texreport::{build, BuildOptions, Figure, LatexCompiler, Metadata, Report, ReportRenderer, Theme};
//!
//! # fn main() -> texreport::Result<()> {
//! let mut report = Report::new(
//!     Metadata::new("MIBLAB report")
//!         .subtitle("Kidney perfusion")
//!         .author("A. Author"),
//! );
//! report.chapter("Results");
//! report.figure(Figure::new("plot.png").caption("Perfusion maps"))?;
//!
//! let rendered = ReportRenderer::new(Theme::builtin())?.render(&report)?;
//! let output = build(
//!     &rendered,
//!     &BuildOptions::new("out", "miblab_report"),
//!     Some(&LatexCompiler::pdflatex()),
//! )?;
//! println!("{}", output.pdf_path.unwrap().display());
//! # Ok(())
//! # }
//! ```
//!
//! ## Guarantees
//!
//! - Rendering is deterministic: the same theme and report give the same bytes.
//! - A referenced file that does not exist fails the render with
//!   `missing resource: <path>`; nothing is silently left out.
//! - Unset optional metadata (subtitle, subject, affiliation, contact table)
//!   produces no output at all, not an empty placeholder.

pub mod assets;
mod build;
pub mod config;
pub mod document;
mod error;
pub mod render;
pub mod style;
mod table;
pub mod theme;

pub use assets::{AssetCopy, AssetPlan};
pub use build::{build, BuildOptions, BuildOutput, Compiler, LatexCompiler};
pub use config::ReportConfig;
pub use document::{
    AuthorEntry, Authorship, Block, ContactDetails, Figure, Listing, Metadata, Report, Table,
};
pub use error::{ReportError, Result};
pub use render::{escape_latex, RenderedReport, ReportRenderer};
pub use table::TableData;
pub use theme::Theme;
