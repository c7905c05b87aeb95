//! Rename command implementation - rewrite duplicated FASTA headers

use fadup_core::{rename_file_with, RenameStats};
use std::path::Path;

use crate::config::Config;
use crate::error::CliResult;

pub fn execute(config: &Config, input: &Path, output: &Path) -> CliResult<RenameStats> {
    log::info!("Renaming duplicated headers");
    log::info!("Input file: {}", input.display());
    log::info!("Output file: {}", output.display());

    let stats = rename_file_with(input, output, &config.io_options())?;

    log::info!("Processed {}", stats);
    if stats.renamed == 0 {
        log::info!("No duplicated headers found");
    }

    Ok(stats)
}
