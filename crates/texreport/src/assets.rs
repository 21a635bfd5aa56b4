//! Asset planning: checking referenced files and naming their copies.
//!
//! Every external file a report references (theme assets, the cover image,
//! figures) is copied into the source folder under a generated name, so
//! the LaTeX sources only ever see short ASCII relative paths.

use std::path::{Path, PathBuf};

use crate::error::{ReportError, Result};

/// A file to copy into the source folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetCopy {
    pub source: PathBuf,
    /// Path relative to the source folder, with forward slashes.
    pub target: String,
}

/// The ordered list of copies a rendered report needs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetPlan {
    copies: Vec<AssetCopy>,
}

impl AssetPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Plans a copy of `source` to `<dir>/<stem>.<ext>` and returns the target.
    ///
    /// A target already taken by an earlier copy gets a `-2`, `-3`, ...
    /// suffix on the stem.
    ///
    /// # Errors
    ///
    /// [`ReportError::MissingResource`] if `source` is not an existing file.
    pub fn add(&mut self, source: &Path, dir: &str, stem: &str) -> Result<String> {
        if !source.is_file() {
            return Err(ReportError::MissingResource {
                path: source.to_path_buf(),
            });
        }

        let stem = sanitize(stem);
        let ext = source
            .extension()
            .map(|ext| format!(".{}", sanitize(&ext.to_string_lossy()).to_ascii_lowercase()))
            .unwrap_or_default();

        // Distinct names can sanitize to the same stem; number the later ones.
        let mut target = format!("{}/{}{}", dir, stem, ext);
        let mut n = 1;
        while self.copies.iter().any(|copy| copy.target == target) {
            n += 1;
            target = format!("{}/{}-{}{}", dir, stem, n, ext);
        }

        self.copies.push(AssetCopy {
            source: source.to_path_buf(),
            target: target.clone(),
        });
        Ok(target)
    }

    pub fn copies(&self) -> &[AssetCopy] {
        &self.copies
    }

    pub fn is_empty(&self) -> bool {
        self.copies.is_empty()
    }

    /// Re-checks that every planned source still exists.
    pub fn verify(&self) -> Result<()> {
        match self.copies.iter().find(|copy| !copy.source.is_file()) {
            Some(copy) => Err(ReportError::MissingResource {
                path: copy.source.clone(),
            }),
            None => Ok(()),
        }
    }
}

/// Reduces a name to ASCII letters, digits and dashes.
///
/// Dots are replaced too: `graphicx` treats everything after the first dot
/// as the file extension.
///
/// Non-ASCII letters are transliterated first, so `Straße plot` becomes
/// `Strasse-plot`.
pub fn sanitize(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in deunicode::deunicode(name).chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c);
        } else if !out.ends_with('-') {
            out.push('-');
        }
    }
    let trimmed = out.trim_matches('-');
    if trimmed.is_empty() {
        "asset".to_string()
    } else {
        trimmed.to_string()
    }
}
