//! CLI for the tagfetch audio tagger.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use crate::{batch, config};

/// Top-level CLI: tag audio files from their source web pages and file them
/// into album folders.
#[derive(Debug, Parser)]
#[command(name = "tagfetch")]
#[command(
    about = "Tag audio files from their source web pages and sort them into album folders",
    long_about = None
)]
pub struct Cli {
    /// Fallback page URL for files whose names carry no URL of their own.
    /// Without it such files are skipped.
    pub fallback_url: Option<String>,

    /// Directory of audio files to process.
    #[arg(long, default_value = ".", value_name = "PATH")]
    pub dir: PathBuf,
}

impl Cli {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);
        batch::run(&cli.dir, &cfg, cli.fallback_url.as_deref())?;
        Ok(())
    }
}
