//! Shared input selection for subcommands.

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

/// Where the bytes to hash come from. Stdin when neither flag is given.
#[derive(Args, Debug, Clone, Default)]
pub struct InputArgs {
    /// Literal text, hashed as UTF-8.
    #[arg(long, conflicts_with = "file")]
    pub text: Option<String>,

    /// File whose raw contents are hashed.
    #[arg(long)]
    pub file: Option<PathBuf>,
}

impl InputArgs {
    /// Read the selected input fully into memory.
    pub fn read(&self) -> Result<Vec<u8>> {
        if let Some(text) = &self.text {
            return Ok(text.as_bytes().to_vec());
        }
        if let Some(path) = &self.file {
            return std::fs::read(path)
                .with_context(|| format!("failed to read input file: {}", path.display()));
        }
        let mut buf = Vec::new();
        std::io::stdin()
            .read_to_end(&mut buf)
            .context("failed to read stdin")?;
        Ok(buf)
    }
}
