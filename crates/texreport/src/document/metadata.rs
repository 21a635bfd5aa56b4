//! Cover and title page metadata.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// One row of an author table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuthorEntry {
    pub name: String,
    #[serde(default)]
    pub affiliation: Option<String>,
}

impl AuthorEntry {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            affiliation: None,
        }
    }

    pub fn affiliation(mut self, affiliation: impl Into<String>) -> Self {
        self.affiliation = Some(affiliation.into());
        self
    }
}

/// Who wrote the report: a single author line, or a table that replaces it.
///
/// In YAML a plain string is a single author and a list is a table:
///
/// ```yaml
/// author: A. Author
/// # or
/// author:
///   - { name: A. Author, affiliation: Sheffield }
///   - { name: B. Author }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Authorship {
    Single(String),
    Table(Vec<AuthorEntry>),
}

/// The information table at the foot of the title page.
///
/// Only the rows that are set are printed. When no row is set the table is
/// left out altogether.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContactDetails {
    #[serde(default)]
    pub compiled_by: Option<String>,
    #[serde(default)]
    pub institute: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl ContactDetails {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn compiled_by(mut self, name: impl Into<String>) -> Self {
        self.compiled_by = Some(name.into());
        self
    }

    pub fn institute(mut self, institute: impl Into<String>) -> Self {
        self.institute = Some(institute.into());
        self
    }

    pub fn department(mut self, department: impl Into<String>) -> Self {
        self.department = Some(department.into());
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Labelled rows for the fields that are set, in display order.
    pub fn rows(&self) -> Vec<(&'static str, &str)> {
        [
            ("Report compiled by", &self.compiled_by),
            ("Institute", &self.institute),
            ("Department", &self.department),
            ("Email", &self.email),
        ]
        .into_iter()
        .filter_map(|(label, value)| value.as_deref().map(|v| (label, v)))
        .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.rows().is_empty()
    }
}

/// Document metadata substituted into the cover and title page.
///
/// # Example
///
/// ```rust
/// use texreport::{AuthorEntry, Metadata};
///
/// let single = Metadata::new("Report").author("A. Author");
/// let table = Metadata::new("Report").authors(vec![
///     AuthorEntry::new("A. Author").affiliation("Sheffield"),
///     AuthorEntry::new("B. Author"),
/// ]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Metadata {
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub affiliation: Option<String>,
    #[serde(default)]
    pub author: Option<Authorship>,
    /// Overrides the theme's `cover.image` attribute.
    #[serde(default)]
    pub cover_image: Option<PathBuf>,
    #[serde(default)]
    pub contact: Option<ContactDetails>,
}

impl Metadata {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn affiliation(mut self, affiliation: impl Into<String>) -> Self {
        self.affiliation = Some(affiliation.into());
        self
    }

    /// Sets a single author line.
    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(Authorship::Single(author.into()));
        self
    }

    /// Sets an author table, replacing any single author.
    pub fn authors(mut self, authors: Vec<AuthorEntry>) -> Self {
        self.author = Some(Authorship::Table(authors));
        self
    }

    pub fn cover_image(mut self, path: impl Into<PathBuf>) -> Self {
        self.cover_image = Some(path.into());
        self
    }

    pub fn contact(mut self, contact: ContactDetails) -> Self {
        self.contact = Some(contact);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authors_replaces_single_author() {
        let meta = Metadata::new("Report")
            .author("A. Author")
            .authors(vec![AuthorEntry::new("B. Author")]);
        assert_eq!(
            meta.author,
            Some(Authorship::Table(vec![AuthorEntry::new("B. Author")]))
        );
    }

    #[test]
    fn test_contact_rows_skip_unset_fields() {
        let contact = ContactDetails::new()
            .institute("University of Sheffield")
            .email("someone@example.org");
        assert_eq!(
            contact.rows(),
            vec![
                ("Institute", "University of Sheffield"),
                ("Email", "someone@example.org"),
            ]
        );
        assert!(ContactDetails::new().is_empty());
    }

    #[test]
    fn test_deserialize_single_author() {
        let meta: Metadata = serde_yaml::from_str("title: Report\nauthor: A. Author\n").unwrap();
        assert_eq!(meta.author, Some(Authorship::Single("A. Author".into())));
        assert_eq!(meta.subtitle, None);
    }

    #[test]
    fn test_deserialize_author_table() {
        let yaml = "title: Report\nauthor:\n  - name: A. Author\n    affiliation: Lab\n  - name: B. Author\n";
        let meta: Metadata = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            meta.author,
            Some(Authorship::Table(vec![
                AuthorEntry::new("A. Author").affiliation("Lab"),
                AuthorEntry::new("B. Author"),
            ]))
        );
    }

    #[test]
    fn test_deserialize_rejects_unknown_field() {
        let result: Result<Metadata, _> = serde_yaml::from_str("title: Report\nsubtitel: typo\n");
        assert!(result.is_err());
    }
}
