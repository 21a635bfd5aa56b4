//! Attribute values.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// A concrete attribute value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    /// Literal directive text, emitted into the LaTeX sources as-is.
    ///
    /// Lengths (`11pt`), colors (`FF0000`), package names (`helvet`) and
    /// raw LaTeX fragments (`\sffamily\bfseries`) are all text.
    Text(String),
    /// Path to an external file (image or font) that must exist at render time.
    Asset(PathBuf),
}

impl AttrValue {
    /// Returns the text if this is a [`AttrValue::Text`].
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttrValue::Text(text) => Some(text),
            AttrValue::Asset(_) => None,
        }
    }

    /// Returns the path if this is an [`AttrValue::Asset`].
    pub fn as_asset(&self) -> Option<&Path> {
        match self {
            AttrValue::Asset(path) => Some(path),
            AttrValue::Text(_) => None,
        }
    }
}

/// An attribute entry: either a concrete value or an alias.
///
/// `&str` and `String` convert into [`StyleValue::Value`] text, which keeps
/// the builder terse. Aliases are created explicitly with [`StyleValue::alias`].
///
/// # Example
///
/// ```rust
/// use texreport::style::{StyleValue, Styles};
///
/// let styles = Styles::new()
///     .add("color.title", "FF0000")
///     .add("heading.color", StyleValue::alias("color.title"));
///
/// assert_eq!(styles.resolve_text("heading.color").unwrap(), "FF0000");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawStyleValue")]
pub enum StyleValue {
    Value(AttrValue),
    Alias(String),
}

impl StyleValue {
    pub fn alias(target: impl Into<String>) -> Self {
        StyleValue::Alias(target.into())
    }

    pub fn asset(path: impl Into<PathBuf>) -> Self {
        StyleValue::Value(AttrValue::Asset(path.into()))
    }

    pub fn is_alias(&self) -> bool {
        matches!(self, StyleValue::Alias(_))
    }
}

/// The YAML shapes an attribute value can take.
///
/// ```yaml
/// page.geometry: "margin=2cm"          # text
/// chapter.title.size: 30               # integers and booleans become text
/// header.rule: "0.4pt"                 # anything else numeric must be quoted
/// cover.image: { asset: cover.jpg }    # asset
/// heading.color: { alias: color.title }
/// ```
#[derive(Deserialize)]
#[serde(untagged)]
enum RawStyleValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Asset { asset: PathBuf },
    Alias { alias: String },
}

impl TryFrom<RawStyleValue> for StyleValue {
    type Error = String;

    fn try_from(raw: RawStyleValue) -> Result<Self, Self::Error> {
        Ok(match raw {
            RawStyleValue::Text(text) => text.into(),
            RawStyleValue::Integer(n) => n.to_string().into(),
            // YAML reads `1.50` or `123E45` as floats and loses the original
            // spelling, so there is no faithful text to keep.
            RawStyleValue::Float(n) => {
                return Err(format!(
                    "numeric value {} is not an integer; quote it to keep it as text",
                    n
                ))
            }
            RawStyleValue::Bool(b) => b.to_string().into(),
            RawStyleValue::Asset { asset } => StyleValue::asset(asset),
            RawStyleValue::Alias { alias } => StyleValue::Alias(alias),
        })
    }
}

impl From<AttrValue> for StyleValue {
    fn from(value: AttrValue) -> Self {
        StyleValue::Value(value)
    }
}

impl From<&str> for StyleValue {
    fn from(text: &str) -> Self {
        StyleValue::Value(AttrValue::Text(text.to_string()))
    }
}

impl From<String> for StyleValue {
    fn from(text: String) -> Self {
        StyleValue::Value(AttrValue::Text(text))
    }
}
