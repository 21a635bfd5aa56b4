//! The attribute registry.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use serde::de::{self, Deserialize, Deserializer, MapAccess, Visitor};

use super::error::StyleError;
use super::value::{AttrValue, StyleValue};

/// A registry of named presentation attributes.
///
/// Names are unique. [`Styles::add`] is the fluent builder used for
/// defaults and overwrites silently; [`Styles::insert`] is the strict form
/// used when reading a single configuration, where a repeated name is an
/// error.
///
/// Entries are kept ordered by name so that anything derived from a
/// registry (generated LaTeX, printed listings) is stable across runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Styles {
    entries: BTreeMap<String, StyleValue>,
}

impl Styles {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an attribute, returning the updated registry for chaining.
    pub fn add<V: Into<StyleValue>>(mut self, name: &str, value: V) -> Self {
        self.entries.insert(name.to_string(), value.into());
        self
    }

    /// Inserts an attribute, failing if the name is already taken.
    pub fn insert<V: Into<StyleValue>>(&mut self, name: &str, value: V) -> Result<(), StyleError> {
        if self.entries.contains_key(name) {
            return Err(StyleError::DuplicateAttribute {
                name: name.to_string(),
            });
        }
        self.entries.insert(name.to_string(), value.into());
        Ok(())
    }

    /// Layers `overrides` on top of this registry. Entries in `overrides` win.
    pub fn merge(mut self, overrides: Styles) -> Self {
        self.entries.extend(overrides.entries);
        self
    }

    pub fn has(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&StyleValue> {
        self.entries.get(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates attribute names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(|s| s.as_str())
    }

    /// Follows aliases from `name` to its concrete value.
    ///
    /// # Errors
    ///
    /// - [`StyleError::UnknownAttribute`] if `name` itself is not defined
    /// - [`StyleError::UnresolvedAlias`] if an alias on the way dangles
    /// - [`StyleError::CycleDetected`] if the aliases loop
    pub fn resolve(&self, name: &str) -> Result<&AttrValue, StyleError> {
        let mut current = name;
        let mut path = vec![name.to_string()];

        let mut entry = self
            .entries
            .get(name)
            .ok_or_else(|| StyleError::UnknownAttribute {
                name: name.to_string(),
            })?;

        loop {
            match entry {
                StyleValue::Value(value) => return Ok(value),
                StyleValue::Alias(target) => {
                    if path.iter().any(|seen| seen == target) {
                        path.push(target.clone());
                        return Err(StyleError::CycleDetected { path });
                    }
                    entry = self
                        .entries
                        .get(target)
                        .ok_or_else(|| StyleError::UnresolvedAlias {
                            from: current.to_string(),
                            to: target.clone(),
                        })?;
                    path.push(target.clone());
                    current = target;
                }
            }
        }
    }

    /// Resolves `name` and requires a text value.
    pub fn resolve_text(&self, name: &str) -> Result<&str, StyleError> {
        self.resolve(name)?
            .as_text()
            .ok_or_else(|| StyleError::ExpectedText {
                name: name.to_string(),
            })
    }

    /// Resolves every attribute, in name order.
    pub fn resolved(&self) -> Result<BTreeMap<String, AttrValue>, StyleError> {
        self.entries
            .keys()
            .map(|name| Ok((name.clone(), self.resolve(name)?.clone())))
            .collect()
    }

    /// Makes relative asset paths relative to `base` instead of the working directory.
    pub(crate) fn anchor_assets(&mut self, base: &Path) {
        for value in self.entries.values_mut() {
            if let StyleValue::Value(AttrValue::Asset(path)) = value {
                if path.is_relative() {
                    *path = base.join(&*path);
                }
            }
        }
    }

    /// Checks that every alias resolves to a concrete value.
    pub fn validate(&self) -> Result<(), StyleError> {
        for name in self.entries.keys() {
            self.resolve(name)?;
        }
        Ok(())
    }
}

/// Deserializes from a map, rejecting repeated attribute names.
impl<'de> Deserialize<'de> for Styles {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct StylesVisitor;

        impl<'de> Visitor<'de> for StylesVisitor {
            type Value = Styles;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of attribute names to values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Styles, A::Error> {
                let mut styles = Styles::new();
                while let Some((name, value)) = map.next_entry::<String, StyleValue>()? {
                    styles.insert(&name, value).map_err(de::Error::custom)?;
                }
                Ok(styles)
            }
        }

        deserializer.deserialize_map(StylesVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_resolve_concrete() {
        let styles = Styles::new().add("page.paper", "a4paper");
        assert_eq!(
            styles.resolve("page.paper").unwrap(),
            &AttrValue::Text("a4paper".into())
        );
    }

    #[test]
    fn test_resolve_alias_chain() {
        let styles = Styles::new()
            .add("color.red", "FF0000")
            .add("color.title", StyleValue::alias("color.red"))
            .add("heading.color", StyleValue::alias("color.title"));

        assert_eq!(styles.resolve_text("heading.color").unwrap(), "FF0000");
    }

    #[test]
    fn test_resolve_unknown() {
        let styles = Styles::new();
        assert_eq!(
            styles.resolve("nope"),
            Err(StyleError::UnknownAttribute {
                name: "nope".into()
            })
        );
    }

    #[test]
    fn test_resolve_dangling_alias() {
        let styles = Styles::new()
            .add("a", StyleValue::alias("b"))
            .add("b", StyleValue::alias("c"));

        assert_eq!(
            styles.resolve("a"),
            Err(StyleError::UnresolvedAlias {
                from: "b".into(),
                to: "c".into()
            })
        );
    }

    #[test]
    fn test_resolve_cycle() {
        let styles = Styles::new()
            .add("a", StyleValue::alias("b"))
            .add("b", StyleValue::alias("a"));

        match styles.resolve("a") {
            Err(StyleError::CycleDetected { path }) => {
                assert_eq!(path, vec!["a", "b", "a"]);
            }
            other => panic!("expected cycle, got {:?}", other),
        }
    }

    #[test]
    fn test_self_alias_is_cycle() {
        let styles = Styles::new().add("a", StyleValue::alias("a"));
        assert!(matches!(
            styles.validate(),
            Err(StyleError::CycleDetected { .. })
        ));
    }

    #[test]
    fn test_resolve_text_rejects_asset() {
        let styles = Styles::new().add("cover.image", StyleValue::asset("cover.jpg"));
        assert_eq!(
            styles.resolve_text("cover.image"),
            Err(StyleError::ExpectedText {
                name: "cover.image".into()
            })
        );
        assert_eq!(
            styles.resolve("cover.image").unwrap().as_asset(),
            Some(PathBuf::from("cover.jpg").as_path())
        );
    }

    #[test]
    fn test_insert_rejects_duplicates() {
        let mut styles = Styles::new();
        styles.insert("color.title", "FF0000").unwrap();
        let err = styles.insert("color.title", "00FF00").unwrap_err();
        assert_eq!(
            err,
            StyleError::DuplicateAttribute {
                name: "color.title".into()
            }
        );
        assert_eq!(styles.resolve_text("color.title").unwrap(), "FF0000");
    }

    #[test]
    fn test_add_overwrites() {
        let styles = Styles::new().add("x", "1").add("x", "2");
        assert_eq!(styles.len(), 1);
        assert_eq!(styles.resolve_text("x").unwrap(), "2");
    }

    #[test]
    fn test_merge_overrides_win() {
        let defaults = Styles::new().add("a", "1").add("b", "2");
        let overrides = Styles::new().add("b", "3").add("c", "4");
        let merged = defaults.merge(overrides);

        assert_eq!(merged.resolve_text("a").unwrap(), "1");
        assert_eq!(merged.resolve_text("b").unwrap(), "3");
        assert_eq!(merged.resolve_text("c").unwrap(), "4");
    }

    #[test]
    fn test_deserialize_rejects_repeated_names() {
        let result: Result<Styles, _> =
            serde_yaml::from_str("color.title: FF0000\ncolor.title: 00FF00\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_anchor_assets() {
        let mut styles = Styles::new()
            .add("cover.image", StyleValue::asset("img/cover.jpg"))
            .add("titlepage.logo", StyleValue::asset("/abs/logo.png"));
        styles.anchor_assets(Path::new("/themes/lab"));

        assert_eq!(
            styles.resolve("cover.image").unwrap().as_asset(),
            Some(Path::new("/themes/lab/img/cover.jpg"))
        );
        assert_eq!(
            styles.resolve("titlepage.logo").unwrap().as_asset(),
            Some(Path::new("/abs/logo.png"))
        );
    }

    #[test]
    fn test_resolved_is_sorted() {
        let styles = Styles::new()
            .add("z", "1")
            .add("a", StyleValue::alias("z"));
        let resolved = styles.resolved().unwrap();
        let names: Vec<&str> = resolved.keys().map(|s| s.as_str()).collect();
        assert_eq!(names, vec!["a", "z"]);
        assert_eq!(resolved["a"], AttrValue::Text("1".into()));
    }
}
