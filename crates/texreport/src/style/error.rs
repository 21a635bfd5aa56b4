//! Style validation errors.

/// Error returned when a style configuration is invalid or incomplete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleError {
    /// An alias references an attribute that doesn't exist
    UnresolvedAlias { from: String, to: String },
    /// A cycle was detected in alias resolution
    CycleDetected { path: Vec<String> },
    /// The same attribute name was inserted twice
    DuplicateAttribute { name: String },
    /// A template or the renderer asked for an attribute that isn't defined
    UnknownAttribute { name: String },
    /// Text was expected but the attribute holds an asset path
    ExpectedText { name: String },
    /// Two `color.*` attributes map to the same LaTeX color name
    ColorNameClash {
        color: String,
        first: String,
        second: String,
    },
}

impl std::fmt::Display for StyleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StyleError::UnresolvedAlias { from, to } => {
                write!(f, "attribute '{}' aliases non-existent attribute '{}'", from, to)
            }
            StyleError::CycleDetected { path } => {
                write!(f, "cycle detected in attribute aliases: {}", path.join(" -> "))
            }
            StyleError::DuplicateAttribute { name } => {
                write!(f, "attribute '{}' is defined more than once", name)
            }
            StyleError::UnknownAttribute { name } => {
                write!(f, "unknown attribute '{}'", name)
            }
            StyleError::ExpectedText { name } => {
                write!(f, "attribute '{}' is an asset, expected a text value", name)
            }
            StyleError::ColorNameClash {
                color,
                first,
                second,
            } => {
                write!(
                    f,
                    "attributes '{}' and '{}' both define LaTeX color '{}'",
                    first, second, color
                )
            }
        }
    }
}

impl std::error::Error for StyleError {}
