//! Command line configuration.

use anyhow::{Result, bail};
use clap::Parser;
use std::path::PathBuf;

/// Command line configuration for mortem.
#[derive(Debug, Clone, Parser)]
#[command(name = "mortem", version, about, long_about = None)]
pub struct Config {
    /// Submission store (JSON document)
    #[arg(default_value = "data.json")]
    pub store: PathBuf,

    /// Output directory
    #[arg(short, long, default_value = "dist")]
    pub output: PathBuf,

    /// Site name used in page titles and headers
    #[arg(long, default_value = "postmortem.club")]
    pub site_name: String,

    /// Seed the store with N sample retrospectives before generating
    #[arg(long)]
    pub seed: Option<usize>,
}

impl Config {
    /// Parses configuration from command line arguments.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Validates configuration.
    ///
    /// # Errors
    ///
    /// Returns error when the store file is missing and no seeding was
    /// requested; generation would have nothing to do.
    pub fn validate(&self) -> Result<()> {
        if self.seed.is_none() && !self.store.exists() {
            bail!(
                "Store file does not exist: {} (pass --seed N to create sample content)",
                self.store.display()
            );
        }

        Ok(())
    }
}
