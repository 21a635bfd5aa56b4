//! The data handed to the templates.
//!
//! Building the context is where the configuration meets the content:
//! attributes are resolved, referenced files are checked and given target
//! names, and blocks are flattened into template-friendly views. Everything
//! is kept in ordered collections so that the same input always renders
//! the same bytes.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::warn;

use super::filters::escape_latex;
use crate::assets::AssetPlan;
use crate::document::{AuthorEntry, Authorship, Block, Report};
use crate::error::Result;
use crate::style::{AttrValue, StyleError};
use crate::theme::Theme;

const ASSET_DIR: &str = "assets";
const FIGURE_DIR: &str = "figures";
const COVER_IMAGE: &str = "cover.image";
const LOGO: &str = "titlepage.logo";
const LISTING_END: &str = r"\end{lstlisting}";

const FONT_ROLES: &[(&str, &str)] = &[
    ("font.main", "setmainfont"),
    ("font.sans", "setsansfont"),
    ("font.mono", "setmonofont"),
];

#[derive(Debug, Serialize)]
pub(crate) struct ReportContext<'a> {
    class_name: &'a str,
    metadata: MetadataView<'a>,
    contact: Option<Vec<ContactRow<'a>>>,
    /// Text attributes by name.
    attrs: BTreeMap<String, String>,
    /// Asset attributes by name, as paths inside the source folder.
    assets: BTreeMap<String, String>,
    colors: Vec<ColorView>,
    fonts: Vec<FontView>,
    uses_fontspec: bool,
    cover_image: Option<String>,
    logo: Option<String>,
    blocks: Vec<BlockView<'a>>,
}

#[derive(Debug, Serialize)]
struct MetadataView<'a> {
    title: &'a str,
    subtitle: Option<&'a str>,
    subject: Option<&'a str>,
    affiliation: Option<&'a str>,
    /// Set for a single author; `authors` is then unset.
    author: Option<&'a str>,
    authors: Option<&'a [AuthorEntry]>,
}

#[derive(Debug, Serialize)]
struct ContactRow<'a> {
    label: &'static str,
    value: &'a str,
}

#[derive(Debug, Serialize)]
struct ColorView {
    name: String,
    hex: String,
}

#[derive(Debug, Serialize)]
struct FontView {
    command: &'static str,
    package: Option<String>,
    file: Option<String>,
    dir: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum BlockView<'a> {
    Chapter {
        title: &'a str,
    },
    Section {
        title: &'a str,
    },
    Subsection {
        title: &'a str,
    },
    Clearpage,
    Paragraph {
        text: &'a str,
    },
    Figure {
        path: String,
        width: &'a str,
        caption: Option<&'a str>,
    },
    Table {
        spec: String,
        header: &'a [String],
        rows: &'a [Vec<String>],
        caption: Option<&'a str>,
    },
    Listing {
        code: &'a str,
        options: Option<String>,
    },
    Latex {
        source: &'a str,
    },
}

impl<'a> ReportContext<'a> {
    /// Resolves `theme` against `report`, returning the context and the
    /// copies the source folder will need.
    pub(crate) fn build(theme: &'a Theme, report: &'a Report) -> Result<(Self, AssetPlan)> {
        let metadata = report.metadata();
        let mut plan = AssetPlan::new();
        let mut attrs = BTreeMap::new();
        let mut assets = BTreeMap::new();

        for (name, value) in theme.styles().resolved()? {
            match value {
                AttrValue::Text(text) => {
                    attrs.insert(name, text);
                }
                AttrValue::Asset(path) => {
                    // Replaced by the report's own cover image, so never referenced.
                    if name == COVER_IMAGE && metadata.cover_image.is_some() {
                        continue;
                    }
                    let target = plan.add(&path, ASSET_DIR, &name)?;
                    assets.insert(name, target);
                }
            }
        }

        let cover_image = match &metadata.cover_image {
            Some(path) => Some(plan.add(path, ASSET_DIR, COVER_IMAGE)?),
            None => assets.get(COVER_IMAGE).cloned(),
        };
        let logo = assets.get(LOGO).cloned();

        let colors = palette(&attrs)?;

        let fonts: Vec<FontView> = FONT_ROLES
            .iter()
            .filter_map(|&(name, command)| font_view(name, command, &attrs, &assets))
            .collect();
        let uses_fontspec = fonts.iter().any(|font| font.file.is_some());

        let (author, authors) = match &metadata.author {
            Some(Authorship::Single(name)) => (Some(name.as_str()), None),
            Some(Authorship::Table(entries)) => (None, Some(entries.as_slice())),
            None => (None, None),
        };

        let contact = metadata
            .contact
            .as_ref()
            .map(|contact| {
                contact
                    .rows()
                    .into_iter()
                    .map(|(label, value)| ContactRow { label, value })
                    .collect::<Vec<_>>()
            })
            .filter(|rows| !rows.is_empty());

        let default_width = theme.styles().resolve_text("figure.width")?;
        let mut figure_count = 0;
        let mut blocks = Vec::with_capacity(report.blocks().len());
        for block in report.blocks() {
            let view = match block {
                Block::Chapter(title) => BlockView::Chapter { title },
                Block::Section(title) => BlockView::Section { title },
                Block::Subsection(title) => BlockView::Subsection { title },
                Block::ClearPage => BlockView::Clearpage,
                Block::Paragraph(text) => BlockView::Paragraph { text },
                Block::Figure(figure) => {
                    figure_count += 1;
                    let stem = figure
                        .path
                        .file_stem()
                        .map(|s| s.to_string_lossy().into_owned())
                        .unwrap_or_default();
                    let path = plan.add(
                        &figure.path,
                        FIGURE_DIR,
                        &format!("{:02}-{}", figure_count, stem),
                    )?;
                    BlockView::Figure {
                        path,
                        width: figure.width.as_deref().unwrap_or(default_width),
                        caption: figure.caption.as_deref(),
                    }
                }
                Block::Table(table, data) => BlockView::Table {
                    spec: data.column_spec(table.column_width_cm),
                    header: &data.header,
                    rows: &data.rows,
                    caption: table.caption.as_deref(),
                },
                Block::Listing(listing) => {
                    if listing.code.contains(LISTING_END) {
                        warn!(
                            "listing code contains {}; the listing will end early",
                            LISTING_END
                        );
                    }
                    let mut options = Vec::new();
                    if let Some(language) = &listing.language {
                        options.push(format!("language={}", language));
                    }
                    if let Some(caption) = &listing.caption {
                        options.push(format!("caption={{{}}}", escape_latex(caption)));
                    }
                    BlockView::Listing {
                        code: listing.code.trim_end_matches('\n'),
                        options: (!options.is_empty()).then(|| options.join(",")),
                    }
                }
                Block::Latex(source) => BlockView::Latex { source },
            };
            blocks.push(view);
        }

        let context = Self {
            class_name: theme.name(),
            metadata: MetadataView {
                title: &metadata.title,
                subtitle: metadata.subtitle.as_deref(),
                subject: metadata.subject.as_deref(),
                affiliation: metadata.affiliation.as_deref(),
                author,
                authors,
            },
            contact,
            attrs,
            assets,
            colors,
            fonts,
            uses_fontspec,
            cover_image,
            logo,
            blocks,
        };
        Ok((context, plan))
    }

    /// Whether the class loads font files through `fontspec`.
    pub(crate) fn uses_fontspec(&self) -> bool {
        self.uses_fontspec
    }
}

/// `color.*` attributes as LaTeX color definitions.
///
/// The LaTeX name keeps only the ASCII letters and digits of the suffix, so
/// two attributes that reduce to the same name are rejected.
fn palette(attrs: &BTreeMap<String, String>) -> Result<Vec<ColorView>, StyleError> {
    let mut seen: BTreeMap<String, &str> = BTreeMap::new();
    let mut colors = Vec::new();
    for (attr, hex) in attrs {
        let Some(suffix) = attr.strip_prefix("color.") else {
            continue;
        };
        let name: String = suffix.chars().filter(|c| c.is_ascii_alphanumeric()).collect();
        if let Some(first) = seen.insert(name.clone(), attr.as_str()) {
            return Err(StyleError::ColorNameClash {
                color: name,
                first: first.to_string(),
                second: attr.clone(),
            });
        }
        colors.push(ColorView {
            name,
            hex: hex.clone(),
        });
    }
    Ok(colors)
}

fn font_view(
    name: &str,
    command: &'static str,
    attrs: &BTreeMap<String, String>,
    assets: &BTreeMap<String, String>,
) -> Option<FontView> {
    if let Some(target) = assets.get(name) {
        let (dir, file) = target.rsplit_once('/')?;
        return Some(FontView {
            command,
            package: None,
            file: Some(file.to_string()),
            dir: Some(format!("{}/", dir)),
        });
    }
    attrs
        .get(name)
        .filter(|package| !package.is_empty())
        .map(|package| FontView {
            command,
            package: Some(package.clone()),
            file: None,
            dir: None,
        })
}
