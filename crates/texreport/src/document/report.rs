//! The report builder.

use tracing::debug;

use super::block::{Block, Figure, Listing, Table};
use super::metadata::Metadata;
use crate::error::{ReportError, Result};
use crate::table::TableData;

/// A report: metadata plus body blocks in reading order.
///
/// Figures and tables are checked when added, so a missing file is reported
/// at the call that referenced it.
///
/// # Example
///
/// ```rust,no_run
/// use texreport::{Figure, Metadata, Report, Table};
///
/// # fn main() -> texreport::Result<()> {
/// let mut report = Report::new(Metadata::new("My Report").author("Me"));
/// report.chapter("Chapter 1");
/// report.section("Section 1");
/// report.clearpage();
/// report.subsection("Section 1.1");
/// report.figure(Figure::new("figure.png").caption("This is a figure."))?;
/// report.table(Table::new("table.csv").caption("This is a table."))?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    metadata: Metadata,
    blocks: Vec<Block>,
}

impl Report {
    pub fn new(metadata: Metadata) -> Self {
        Self {
            metadata,
            blocks: Vec::new(),
        }
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Appends a block as-is, without the checks the typed methods perform.
    pub fn push(&mut self, block: Block) -> &mut Self {
        self.blocks.push(block);
        self
    }

    pub fn chapter(&mut self, title: impl Into<String>) -> &mut Self {
        self.push(Block::Chapter(title.into()))
    }

    pub fn section(&mut self, title: impl Into<String>) -> &mut Self {
        self.push(Block::Section(title.into()))
    }

    pub fn subsection(&mut self, title: impl Into<String>) -> &mut Self {
        self.push(Block::Subsection(title.into()))
    }

    /// Continues on a new page.
    pub fn clearpage(&mut self) -> &mut Self {
        self.push(Block::ClearPage)
    }

    pub fn paragraph(&mut self, text: impl Into<String>) -> &mut Self {
        self.push(Block::Paragraph(text.into()))
    }

    pub fn listing(&mut self, listing: Listing) -> &mut Self {
        self.push(Block::Listing(listing))
    }

    /// Appends raw LaTeX. Unlike [`Report::paragraph`] nothing is escaped.
    ///
    /// ```rust
    /// use texreport::{Metadata, Report};
    ///
    /// let mut report = Report::new(Metadata::new("Report"));
    /// report.latex(r"\begin{center}$E = mc^2$\end{center}");
    /// ```
    pub fn latex(&mut self, source: impl Into<String>) -> &mut Self {
        self.push(Block::Latex(source.into()))
    }

    /// Adds a figure.
    ///
    /// # Errors
    ///
    /// [`ReportError::MissingResource`] if the image file does not exist.
    pub fn figure(&mut self, figure: Figure) -> Result<&mut Self> {
        if !figure.path.is_file() {
            return Err(ReportError::MissingResource { path: figure.path });
        }
        debug!(path = %figure.path.display(), "adding figure");
        Ok(self.push(Block::Figure(figure)))
    }

    /// Adds a table, reading its CSV source immediately.
    ///
    /// # Errors
    ///
    /// Whatever [`TableData::from_csv`] reports for the source file.
    pub fn table(&mut self, table: Table) -> Result<&mut Self> {
        let data = TableData::from_csv(&table.source)?;
        debug!(
            path = %table.source.display(),
            rows = data.rows.len(),
            "adding table"
        );
        Ok(self.push(Block::Table(table, data)))
    }
}
