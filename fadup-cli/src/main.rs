use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

mod commands;
mod config;
mod error;

use config::Config;
use error::CliError;

#[derive(Parser, Debug)]
#[command(name = "fadup")]
#[command(about = "fadup - Rename duplicated FASTA headers")]
#[command(version)]
#[command(long_about = "
fadup makes FASTA header lines unique. The first occurrence of a header is kept
as-is; every later occurrence of the exact same header text gets a numeric
suffix (_2, _3, ...). Sequence lines are copied unchanged.

Examples:
  fadup assembly.fa assembly.renamed.fa
  fadup reads.fa.gz reads.renamed.fa.gz --compression-level 9
  zcat reads.fa.gz | fadup - - > renamed.fa
")]
pub struct Cli {
    /// Input FASTA file ('-' for stdin, '.gz' is decompressed)
    pub input: PathBuf,

    /// Output FASTA file, created or overwritten ('-' for stdout, '.gz' is compressed)
    pub output: PathBuf,

    /// Configuration file path (defaults to ./fadup.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Read/write buffer size in bytes
    #[arg(long, value_name = "BYTES")]
    pub buffer_size: Option<usize>,

    /// Gzip compression level for '.gz' output
    #[arg(long, value_name = "LEVEL", value_parser = clap::value_parser!(u32).range(0..=9))]
    pub compression_level: Option<u32>,

    /// Verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

fn setup_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?
        .with_overrides(cli.buffer_size, cli.compression_level);
    config.validate()?;

    commands::rename::execute(&config, &cli.input, &cli.output)?;

    Ok(())
}

fn main() {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    if let Err(err) = run(cli) {
        match err.downcast_ref::<CliError>() {
            Some(cli_err) => error::print_error_and_exit(cli_err),
            None => {
                eprintln!("Error: {:#}", err);
                std::process::exit(1);
            }
        }
    }
}
