//! Rendering a report into LaTeX sources.
//!
//! - [`TemplateRegistry`]: where a theme's templates come from
//! - [`ReportRenderer`]: compiles a theme's templates once, renders reports
//! - [`RenderedReport`]: the class and document sources plus the asset plan

mod context;
mod filters;
mod registry;
mod renderer;

pub use filters::escape_latex;
pub use registry::{
    walk_template_dir, RegistryError, ResolvedTemplate, TemplateFile, TemplateRegistry,
    TEMPLATE_EXTENSIONS,
};
pub use renderer::{RenderedReport, ReportRenderer};
