//! Error type for report rendering and building.

use std::path::PathBuf;
use std::process::ExitStatus;

use crate::render::RegistryError;
use crate::style::StyleError;

/// Everything that can go wrong between loading a configuration and moving
/// the finished PDF into place.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// A referenced file (cover image, logo, font, figure, table) does not exist.
    #[error("missing resource: {}", path.display())]
    MissingResource { path: PathBuf },

    #[error(transparent)]
    Style(#[from] StyleError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("cannot read table {}: {source}", path.display())]
    Table {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("table {} has no header row", path.display())]
    EmptyTable { path: PathBuf },

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("cannot run `{program}`: {source}")]
    CompilerUnavailable {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{program}` failed ({status})\n{log}")]
    Compile {
        program: String,
        status: ExitStatus,
        log: String,
    },
}

impl ReportError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ReportError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T, E = ReportError> = std::result::Result<T, E>;
