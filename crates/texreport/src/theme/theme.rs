//! Theme struct and theme files.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use super::defaults::{BUILTIN_TEMPLATES, BUILTIN_THEME_NAME, DEFAULT_STYLES};
use crate::error::{ReportError, Result};
use crate::render::{walk_template_dir, TemplateRegistry};
use crate::style::{StyleError, StyleValue, Styles};

/// A named template configuration.
///
/// # Example
///
/// ```rust
/// use texreport::style::StyleValue;
/// use texreport::Theme;
///
/// let theme = Theme::builtin()
///     .named("labreport")
///     .add("color.title", "0065BD")
///     .add("titlepage.logo", StyleValue::asset("images/logo.png"));
///
/// assert_eq!(theme.name(), "labreport");
/// assert_eq!(theme.styles().resolve_text("cover.title.color").unwrap(), "0065BD");
/// ```
#[derive(Debug, Clone)]
pub struct Theme {
    name: String,
    styles: Styles,
    templates: TemplateRegistry,
}

/// On-disk shape of a theme file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ThemeFile {
    #[serde(default)]
    name: Option<String>,
    /// Override template directories, relative to the theme file.
    #[serde(default)]
    templates: Option<TemplateDirs>,
    #[serde(default)]
    attributes: Styles,
}

/// `templates: dir` or `templates: [dir, ...]`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TemplateDirs {
    One(PathBuf),
    Many(Vec<PathBuf>),
}

impl TemplateDirs {
    fn into_vec(self) -> Vec<PathBuf> {
        match self {
            TemplateDirs::One(dir) => vec![dir],
            TemplateDirs::Many(dirs) => dirs,
        }
    }
}

impl Theme {
    /// The built-in theme: default attributes and templates.
    pub fn builtin() -> Self {
        let mut templates = TemplateRegistry::new();
        templates.add_embedded(BUILTIN_TEMPLATES.iter().copied());
        Self {
            name: BUILTIN_THEME_NAME.to_string(),
            styles: DEFAULT_STYLES.clone(),
            templates,
        }
    }

    /// Renames the theme. The name becomes the LaTeX class name, so it is
    /// reduced to ASCII letters, digits and dashes.
    pub fn named(mut self, name: &str) -> Self {
        self.name = class_name(name);
        self
    }

    /// Adds or overrides an attribute, returning the updated theme for chaining.
    pub fn add<V: Into<StyleValue>>(mut self, name: &str, value: V) -> Self {
        self.styles = self.styles.add(name, value);
        self
    }

    /// Overrides a template with inline source.
    pub fn template(mut self, name: &str, source: &str) -> Self {
        self.templates.add_inline(name, source);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn styles(&self) -> &Styles {
        &self.styles
    }

    pub fn templates(&self) -> &TemplateRegistry {
        &self.templates
    }

    /// Validates that all attribute aliases resolve.
    ///
    /// This is called when a renderer is created, but can be called
    /// explicitly for early error detection.
    pub fn validate(&self) -> Result<(), StyleError> {
        self.styles.validate()
    }

    /// Reads a theme file layered over the built-in theme.
    ///
    /// Relative asset paths and the `templates` directories are taken
    /// relative to the file's directory.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| ReportError::io(path, e))?;
        Self::from_yaml_str(&source, path)
    }

    /// Parses theme YAML. `origin` is the file it came from.
    pub fn from_yaml_str(source: &str, origin: &Path) -> Result<Self> {
        let file: ThemeFile =
            serde_yaml::from_str(source).map_err(|e| ReportError::Config {
                path: origin.to_path_buf(),
                source: e,
            })?;
        let base = origin.parent().unwrap_or_else(|| Path::new(""));

        let mut theme = Self::builtin();
        if let Some(name) = file.name {
            theme = theme.named(&name);
        }

        let mut attributes = file.attributes;
        attributes.anchor_assets(base);
        debug!(
            theme = %theme.name,
            overrides = attributes.len(),
            "loading theme attributes"
        );
        theme.styles = theme.styles.merge(attributes);

        // A name found in two of the directories is a collision, not an override.
        for dir in file.templates.map(TemplateDirs::into_vec).unwrap_or_default() {
            let dir = base.join(dir);
            let files = walk_template_dir(&dir).map_err(|e| ReportError::io(&dir, e))?;
            debug!(dir = %dir.display(), count = files.len(), "loading theme templates");
            theme.templates.add_from_files(files)?;
        }

        Ok(theme)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::builtin()
    }
}

fn class_name(name: &str) -> String {
    let cleaned: String = deunicode::deunicode(name)
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect();
    let cleaned = cleaned.trim_matches('-');
    if cleaned.is_empty() {
        BUILTIN_THEME_NAME.to_string()
    } else {
        cleaned.to_string()
    }
}
