//! Template registry for embedded, file-based and inline LaTeX templates.
//!
//! A theme's templates come from three tiers, resolved in this order:
//!
//! 1. **Inline templates** added via [`TemplateRegistry::add_inline`]
//! 2. **File templates** from override directories, in registration order
//! 3. **Embedded templates** compiled into the crate (the built-in theme)
//!
//! So a theme directory containing `cover.tmpl` replaces the built-in cover
//! while every other template keeps its built-in source.
//!
//! Names can be given with or without extension: both `"cover"` and
//! `"cover.tmpl"` resolve. Recognized extensions, in priority order:
//!
//! | Priority | Extension |
//! |----------|-----------|
//! | 1 (highest) | `.tmpl` |
//! | 2 | `.jinja2` |
//! | 3 (lowest) | `.j2` |
//!
//! Within one directory the higher-priority extension wins. The same name
//! coming from two different override directories is a
//! [`RegistryError::Collision`].

use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};

/// Recognized template file extensions in priority order.
pub const TEMPLATE_EXTENSIONS: &[&str] = &[".tmpl", ".jinja2", ".j2"];

/// A template file discovered during directory walking.
///
/// For `/themes/lab/templates/cover.tmpl` with root `/themes/lab/templates`
/// the name is `"cover"` and `name_with_ext` is `"cover.tmpl"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateFile {
    /// Resolution name without extension
    pub name: String,
    /// Resolution name with extension
    pub name_with_ext: String,
    /// Absolute path to the template file
    pub absolute_path: PathBuf,
    /// The template directory root this file belongs to
    pub source_dir: PathBuf,
}

impl TemplateFile {
    pub fn new(
        name: impl Into<String>,
        name_with_ext: impl Into<String>,
        absolute_path: impl Into<PathBuf>,
        source_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            name_with_ext: name_with_ext.into(),
            absolute_path: absolute_path.into(),
            source_dir: source_dir.into(),
        }
    }

    /// Returns the extension priority (lower is higher priority).
    ///
    /// Returns `usize::MAX` if the extension is not recognized.
    pub fn extension_priority(&self) -> usize {
        TEMPLATE_EXTENSIONS
            .iter()
            .position(|ext| self.name_with_ext.ends_with(ext))
            .unwrap_or(usize::MAX)
    }
}

/// How a template's content is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedTemplate {
    /// Content held in memory (inline and embedded templates).
    Inline(String),
    /// Content read from disk when requested.
    File(PathBuf),
}

/// Error type for template registry operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Two override directories contain files that resolve to the same name.
    Collision {
        name: String,
        existing_path: PathBuf,
        existing_dir: PathBuf,
        conflicting_path: PathBuf,
        conflicting_dir: PathBuf,
    },

    /// Template not found in any tier.
    NotFound { name: String },

    /// Failed to read a template file from disk.
    ReadError { path: PathBuf, message: String },
}

impl std::fmt::Display for RegistryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistryError::Collision {
                name,
                existing_path,
                existing_dir,
                conflicting_path,
                conflicting_dir,
            } => {
                write!(
                    f,
                    "Template collision detected for \"{}\":\n  \
                     - {} (from {})\n  \
                     - {} (from {})",
                    name,
                    existing_path.display(),
                    existing_dir.display(),
                    conflicting_path.display(),
                    conflicting_dir.display()
                )
            }
            RegistryError::NotFound { name } => {
                write!(f, "Template not found: \"{}\"", name)
            }
            RegistryError::ReadError { path, message } => {
                write!(
                    f,
                    "Failed to read template \"{}\": {}",
                    path.display(),
                    message
                )
            }
        }
    }
}

impl std::error::Error for RegistryError {}

/// Registry resolving template names across the inline, file and embedded tiers.
#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
    inline: HashMap<String, ResolvedTemplate>,

    /// File templates, stored under both the extensionless name and the
    /// name with extension.
    files: HashMap<String, ResolvedTemplate>,

    /// Canonical name -> (path, source_dir), for collision detection.
    sources: HashMap<String, (PathBuf, PathBuf)>,

    embedded: HashMap<String, ResolvedTemplate>,
}

impl TemplateRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an inline template. Inline templates shadow every other tier.
    pub fn add_inline(&mut self, name: impl Into<String>, content: impl Into<String>) {
        self.inline
            .insert(name.into(), ResolvedTemplate::Inline(content.into()));
    }

    /// Adds templates discovered by [`walk_template_dir`].
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Collision`] if templates from different
    /// directories resolve to the same name.
    pub fn add_from_files(&mut self, files: Vec<TemplateFile>) -> Result<(), RegistryError> {
        let mut sorted_files = files;
        sorted_files.sort_by_key(|f| f.extension_priority());

        for file in sorted_files {
            if let Some((existing_path, existing_dir)) = self.sources.get(&file.name) {
                if existing_dir != &file.source_dir {
                    return Err(RegistryError::Collision {
                        name: file.name.clone(),
                        existing_path: existing_path.clone(),
                        existing_dir: existing_dir.clone(),
                        conflicting_path: file.absolute_path.clone(),
                        conflicting_dir: file.source_dir.clone(),
                    });
                }
                // Same directory, lower-priority extension: still reachable by full name.
                self.files.insert(
                    file.name_with_ext.clone(),
                    ResolvedTemplate::File(file.absolute_path.clone()),
                );
                continue;
            }

            let resolved = ResolvedTemplate::File(file.absolute_path.clone());
            self.files.insert(file.name.clone(), resolved.clone());
            self.sources.insert(
                file.name.clone(),
                (file.absolute_path.clone(), file.source_dir.clone()),
            );
            self.files.insert(file.name_with_ext.clone(), resolved);
        }

        Ok(())
    }

    /// Adds templates compiled into the binary, keyed by extensionless name.
    ///
    /// Each one is also reachable as `<name>.tmpl`.
    pub fn add_embedded<'a>(&mut self, templates: impl IntoIterator<Item = (&'a str, &'a str)>) {
        for (name, content) in templates {
            let resolved = ResolvedTemplate::Inline(content.to_string());
            self.embedded
                .insert(format!("{}{}", name, TEMPLATE_EXTENSIONS[0]), resolved.clone());
            self.embedded.insert(name.to_string(), resolved);
        }
    }

    /// Looks up a template by name, with or without extension.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] if no tier has the template.
    pub fn get(&self, name: &str) -> Result<&ResolvedTemplate, RegistryError> {
        self.inline
            .get(name)
            .or_else(|| self.files.get(name))
            .or_else(|| self.embedded.get(name))
            .ok_or_else(|| RegistryError::NotFound {
                name: name.to_string(),
            })
    }

    /// Gets the content of a template, reading from disk if necessary.
    pub fn get_content(&self, name: &str) -> Result<String, RegistryError> {
        match self.get(name)? {
            ResolvedTemplate::Inline(content) => Ok(content.clone()),
            ResolvedTemplate::File(path) => {
                std::fs::read_to_string(path).map_err(|e| RegistryError::ReadError {
                    path: path.clone(),
                    message: e.to_string(),
                })
            }
        }
    }

    /// Number of distinct names across all tiers.
    pub fn len(&self) -> usize {
        self.names().count()
    }

    pub fn is_empty(&self) -> bool {
        self.inline.is_empty() && self.files.is_empty() && self.embedded.is_empty()
    }

    /// All resolvable names, sorted and without duplicates.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.inline
            .keys()
            .chain(self.files.keys())
            .chain(self.embedded.keys())
            .map(|s| s.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
    }
}

/// Walks a template directory recursively and collects template files.
pub fn walk_template_dir(root: impl AsRef<Path>) -> Result<Vec<TemplateFile>, std::io::Error> {
    let root_canonical = root.as_ref().canonicalize()?;
    let mut files = Vec::new();
    walk_dir_recursive(&root_canonical, &root_canonical, &mut files)?;
    Ok(files)
}

fn walk_dir_recursive(
    current: &Path,
    root: &Path,
    files: &mut Vec<TemplateFile>,
) -> Result<(), std::io::Error> {
    for entry in std::fs::read_dir(current)? {
        let path = entry?.path();

        if path.is_dir() {
            walk_dir_recursive(&path, root, files)?;
        } else if path.is_file() {
            if let Some(template_file) = try_parse_template_file(&path, root) {
                files.push(template_file);
            }
        }
    }

    Ok(())
}

fn try_parse_template_file(path: &Path, root: &Path) -> Option<TemplateFile> {
    let path_str = path.to_string_lossy();

    let extension = TEMPLATE_EXTENSIONS
        .iter()
        .find(|ext| path_str.ends_with(*ext))?;

    let relative = path.strip_prefix(root).ok()?;
    // Forward slashes on every platform
    let name_with_ext = relative
        .to_string_lossy()
        .replace(std::path::MAIN_SEPARATOR, "/");
    let name = name_with_ext.strip_suffix(extension)?.to_string();

    Some(TemplateFile::new(name, name_with_ext, path, root))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_file_extension_priority() {
        let tmpl = TemplateFile::new("cover", "cover.tmpl", "/a/cover.tmpl", "/a");
        let jinja2 = TemplateFile::new("cover", "cover.jinja2", "/a/cover.jinja2", "/a");
        let j2 = TemplateFile::new("cover", "cover.j2", "/a/cover.j2", "/a");
        let unknown = TemplateFile::new("cover", "cover.tex", "/a/cover.tex", "/a");

        assert_eq!(tmpl.extension_priority(), 0);
        assert_eq!(jinja2.extension_priority(), 1);
        assert_eq!(j2.extension_priority(), 2);
        assert_eq!(unknown.extension_priority(), usize::MAX);
    }

    #[test]
    fn test_embedded_reachable_with_and_without_extension() {
        let mut registry = TemplateRegistry::new();
        registry.add_embedded([("cover", "\\title{x}")]);

        assert_eq!(registry.get_content("cover").unwrap(), "\\title{x}");
        assert_eq!(registry.get_content("cover.tmpl").unwrap(), "\\title{x}");
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_inline_shadows_embedded() {
        let mut registry = TemplateRegistry::new();
        registry.add_embedded([("cover", "builtin")]);
        registry.add_inline("cover", "custom");

        assert_eq!(registry.get_content("cover").unwrap(), "custom");
        // The extension-qualified name still reaches the built-in
        assert_eq!(registry.get_content("cover.tmpl").unwrap(), "builtin");
    }

    #[test]
    fn test_file_shadows_embedded() {
        let mut registry = TemplateRegistry::new();
        registry.add_embedded([("cover", "builtin")]);
        registry
            .add_from_files(vec![TemplateFile::new(
                "cover",
                "cover.tmpl",
                "/themes/lab/cover.tmpl",
                "/themes/lab",
            )])
            .unwrap();

        assert_eq!(
            registry.get("cover").unwrap(),
            &ResolvedTemplate::File(PathBuf::from("/themes/lab/cover.tmpl"))
        );
    }

    #[test]
    fn test_registry_extension_priority() {
        let mut registry = TemplateRegistry::new();
        let files = vec![
            TemplateFile::new("cover", "cover.j2", "/t/cover.j2", "/t"),
            TemplateFile::new("cover", "cover.tmpl", "/t/cover.tmpl", "/t"),
        ];
        registry.add_from_files(files).unwrap();

        match registry.get("cover").unwrap() {
            ResolvedTemplate::File(path) => {
                assert!(path.to_string_lossy().ends_with("cover.tmpl"));
            }
            _ => panic!("Expected file template"),
        }
        assert!(registry.get("cover.j2").is_ok());
    }

    #[test]
    fn test_registry_collision_different_dirs() {
        let mut registry = TemplateRegistry::new();
        let files = vec![
            TemplateFile::new("cover", "cover.tmpl", "/a/cover.tmpl", "/a"),
            TemplateFile::new("cover", "cover.tmpl", "/b/cover.tmpl", "/b"),
        ];

        match registry.add_from_files(files) {
            Err(RegistryError::Collision { name, .. }) => assert_eq!(name, "cover"),
            other => panic!("expected collision, got {:?}", other),
        }
    }

    #[test]
    fn test_registry_not_found() {
        let registry = TemplateRegistry::new();
        assert!(matches!(
            registry.get("document"),
            Err(RegistryError::NotFound { .. })
        ));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_names_sorted_and_deduplicated() {
        let mut registry = TemplateRegistry::new();
        registry.add_embedded([("document", ""), ("block", "")]);
        registry.add_inline("block", "");

        let names: Vec<&str> = registry.names().collect();
        assert_eq!(names, vec!["block", "block.tmpl", "document", "document.tmpl"]);
    }

    #[test]
    fn test_walk_template_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("parts")).unwrap();
        std::fs::write(dir.path().join("cover.tmpl"), "c").unwrap();
        std::fs::write(dir.path().join("parts/intro.j2"), "i").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let mut files = walk_template_dir(dir.path()).unwrap();
        files.sort_by(|a, b| a.name.cmp(&b.name));

        let names: Vec<&str> = files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["cover", "parts/intro"]);
        assert_eq!(files[1].name_with_ext, "parts/intro.j2");
    }

    #[test]
    fn test_error_display_collision() {
        let err = RegistryError::Collision {
            name: "cover".to_string(),
            existing_path: PathBuf::from("/a/cover.tmpl"),
            existing_dir: PathBuf::from("/a"),
            conflicting_path: PathBuf::from("/b/cover.tmpl"),
            conflicting_dir: PathBuf::from("/b"),
        };

        let display = err.to_string();
        assert!(display.contains("cover"));
        assert!(display.contains("/a/cover.tmpl"));
        assert!(display.contains("/b/cover.tmpl"));
    }
}
