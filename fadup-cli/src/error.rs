//! Error handling for fadup CLI

use fadup_core::RenameError;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for fadup CLI operations
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Input/Output error: {message}")]
    Io { message: String },

    #[error("File not found: {}", .path.display())]
    FileNotFound { path: PathBuf },

    #[error("Input and output are the same file: {}", .path.display())]
    SameFile { path: PathBuf },
}

impl CliError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config { message: message.into() }
    }

    pub fn io<S: Into<String>>(message: S) -> Self {
        Self::Io { message: message.into() }
    }

    pub fn file_not_found(path: PathBuf) -> Self {
        Self::FileNotFound { path }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::io(err.to_string())
    }
}

impl From<RenameError> for CliError {
    fn from(err: RenameError) -> Self {
        match err {
            RenameError::OpenInput { path, source } if source.kind() == std::io::ErrorKind::NotFound => {
                Self::file_not_found(path)
            }
            RenameError::SameFile { path } => Self::SameFile { path },
            other => Self::io(other.to_string()),
        }
    }
}

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Provide helpful error messages and suggestions
pub fn format_error_with_suggestions(error: &CliError) -> String {
    let mut message = error.to_string();

    match error {
        CliError::FileNotFound { path } => {
            message.push_str(&format!(
                "\n\nSuggestions:\n\
                 • Check that the file path is correct: {}\n\
                 • Use '-' to read the input from stdin",
                path.display()
            ));
        }

        CliError::SameFile { .. } => {
            message.push_str(
                "\n\nSuggestions:\n\
                 • Write to a different output path and move it over the input afterwards"
            );
        }

        CliError::Config { .. } => {
            message.push_str(
                "\n\nSuggestions:\n\
                 • Check your fadup.toml configuration file\n\
                 • Verify that all configuration values are valid"
            );
        }

        CliError::Io { .. } => {
            message.push_str(
                "\n\nSuggestions:\n\
                 • Ensure you have read permission for the input and write permission for the output directory\n\
                 • Check that there is enough free disk space"
            );
        }
    }

    message
}

/// Print error with helpful suggestions and exit
pub fn print_error_and_exit(error: &CliError) -> ! {
    eprintln!("Error: {}", format_error_with_suggestions(error));
    std::process::exit(1);
}
