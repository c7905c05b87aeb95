//! Error type for header renaming
//!
//! Every failure is an I/O failure: the input could not be opened, the output
//! could not be created, or reading/writing broke partway through. Malformed
//! FASTA is never an error.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenameError {
    #[error("Cannot open input {}: {source}", .path.display())]
    OpenInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Cannot create output {}: {source}", .path.display())]
    CreateOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Input and output refer to the same file: {}", .path.display())]
    SameFile { path: PathBuf },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl RenameError {
    pub fn open_input<P: Into<PathBuf>>(path: P, source: std::io::Error) -> Self {
        Self::OpenInput { path: path.into(), source }
    }

    pub fn create_output<P: Into<PathBuf>>(path: P, source: std::io::Error) -> Self {
        Self::CreateOutput { path: path.into(), source }
    }

    /// The underlying `io::ErrorKind`, when there is one.
    pub fn io_kind(&self) -> Option<std::io::ErrorKind> {
        match self {
            Self::OpenInput { source, .. } | Self::CreateOutput { source, .. } => Some(source.kind()),
            Self::Io(err) => Some(err.kind()),
            Self::SameFile { .. } => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, RenameError>;
