//! Themes: the template configuration applied to every report.
//!
//! A [`Theme`] bundles a name (used as the generated LaTeX class name), a
//! [`Styles`](crate::style::Styles) registry layered over the built-in
//! defaults, and the templates that turn a report into LaTeX.

mod defaults;
#[allow(clippy::module_inception)]
mod theme;

pub use defaults::{BUILTIN_THEME_NAME, DEFAULT_STYLES};
pub use theme::Theme;
