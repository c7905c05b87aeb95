//! fadup Core Library
//!
//! Renames duplicated FASTA header lines by appending `_2`, `_3`, ... to every
//! repeat of an exact header text, passing sequence lines through untouched.

pub mod error;
pub mod rename;
pub mod io;

// Re-export commonly used types and functions
pub use error::{RenameError, Result};
pub use rename::{classify, rename, HeaderCounter, HeaderRenamer, Line, RenameStats};
pub use io::{rename_file, rename_file_with, IoOptions};

/// Version information for the fadup core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
