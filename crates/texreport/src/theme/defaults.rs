//! Built-in attributes and templates.

use once_cell::sync::Lazy;

use crate::style::{StyleValue, Styles};

pub const BUILTIN_THEME_NAME: &str = "texreport";

/// Templates shipped with the crate, keyed by resolution name.
pub(crate) const BUILTIN_TEMPLATES: &[(&str, &str)] = &[
    ("class", include_str!("../../templates/report/class.tmpl")),
    ("document", include_str!("../../templates/report/document.tmpl")),
    ("cover", include_str!("../../templates/report/cover.tmpl")),
    ("titlepage", include_str!("../../templates/report/titlepage.tmpl")),
    ("authors", include_str!("../../templates/report/authors.tmpl")),
    ("block", include_str!("../../templates/report/block.tmpl")),
];

/// Default attributes every theme starts from.
///
/// Colors are six-digit HTML hex values. Sizes without a unit are points.
/// The `*.color` attributes alias the `color.*` palette.
pub static DEFAULT_STYLES: Lazy<Styles> = Lazy::new(|| {
    Styles::new()
        // Page layout
        .add("page.class_options", "11pt,a4paper,twoside,openright")
        .add("page.geometry", "top=3cm,bottom=3cm,inner=3cm,outer=2.5cm")
        .add("toc.depth", "2")
        // Fonts: a package name, or an asset (font file, loaded via fontspec)
        .add("font.main", "lmodern")
        .add("font.sans", "helvet")
        .add("font.mono", "")
        // Palette
        .add("color.title", "FF0000")
        .add("color.heading", "1F3A68")
        .add("color.listing_background", "F5F5F5")
        .add("color.listing_keyword", "1F3A68")
        .add("color.listing_comment", "6A737D")
        .add("color.listing_string", "A31515")
        // Title styles
        .add("title.style", r"\sffamily")
        .add("title.style.large", r"\sffamily\bfseries")
        // Cover
        .add("cover.title.size", "45")
        .add("cover.title.color", StyleValue::alias("color.title"))
        .add("cover.subtitle.size", "20")
        .add("cover.author.size", "25")
        // Title page
        .add("titlepage.title.size", StyleValue::alias("cover.title.size"))
        .add("titlepage.subtitle.size", StyleValue::alias("cover.subtitle.size"))
        .add("titlepage.logo.width", "2in")
        // Headings
        .add("chapter.title.size", "30")
        .add("chapter.title.color", StyleValue::alias("color.heading"))
        .add("section.title.color", StyleValue::alias("color.heading"))
        // Headers and footers: even (left) and odd (right) pages
        .add("header.even", r"\leftmark")
        .add("header.odd", r"\rightmark")
        .add("footer.even", r"\thepage")
        .add("footer.odd", r"\thepage")
        .add("header.rule", "0.4pt")
        // Figures
        .add("figure.width", "6in")
        .add("figure.position", "h!")
        // Code listings
        .add("listing.basic_style", r"\ttfamily\small")
        .add("listing.background", StyleValue::alias("color.listing_background"))
        .add("listing.keyword_color", StyleValue::alias("color.listing_keyword"))
        .add("listing.comment_color", StyleValue::alias("color.listing_comment"))
        .add("listing.string_color", StyleValue::alias("color.listing_string"))
        .add("listing.numbers", "left")
        .add("listing.number_style", r"\tiny")
        .add("listing.frame", "single")
});
