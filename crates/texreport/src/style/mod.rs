//! Style configuration: named presentation attributes and aliases.
//!
//! - [`AttrValue`]: a concrete attribute value (literal text or an asset path)
//! - [`StyleValue`]: either a concrete value or an alias to another attribute
//! - [`Styles`]: the registry of named attributes
//! - [`StyleError`]: validation and lookup failures
//!
//! Attributes are layered the same way as styles in a terminal theme: a
//! semantic attribute (`heading.color`) may alias a visual one
//! (`color.title`) which carries the concrete value.

mod error;
mod registry;
mod value;

pub use error::StyleError;
pub use registry::Styles;
pub use value::{AttrValue, StyleValue};
