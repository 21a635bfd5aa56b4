//! Body content blocks.

use std::path::PathBuf;

use crate::table::TableData;

/// An image placed in a floating figure.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    pub path: PathBuf,
    /// LaTeX length; the theme's `figure.width` when unset.
    pub width: Option<String>,
    pub caption: Option<String>,
}

impl Figure {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            width: None,
            caption: None,
        }
    }

    pub fn width(mut self, width: impl Into<String>) -> Self {
        self.width = Some(width.into());
        self
    }

    pub fn caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }
}

/// A table read from a CSV file when it is added to a report.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub source: PathBuf,
    /// Fixed column width in centimetres; automatic alignment when unset.
    pub column_width_cm: Option<f32>,
    pub caption: Option<String>,
}

impl Table {
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            column_width_cm: None,
            caption: None,
        }
    }

    pub fn column_width_cm(mut self, width: f32) -> Self {
        self.column_width_cm = Some(width);
        self
    }

    pub fn caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }
}

/// A code listing, typeset with the theme's `listing.*` attributes.
///
/// The code is placed verbatim inside a `lstlisting` environment, so a line
/// containing `\end{lstlisting}` ends the listing early. Rendering logs a
/// warning when that happens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    pub code: String,
    pub language: Option<String>,
    pub caption: Option<String>,
}

impl Listing {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            language: None,
            caption: None,
        }
    }

    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }
}

/// One element of the report body, in reading order.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// Chapters always start on a new page.
    Chapter(String),
    Section(String),
    Subsection(String),
    ClearPage,
    Paragraph(String),
    Figure(Figure),
    Table(Table, TableData),
    Listing(Listing),
    /// LaTeX source emitted as-is, for anything the other blocks don't cover.
    Latex(String),
}
