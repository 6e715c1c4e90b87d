//! # Hash Subcommand
//!
//! Digests the selected input through a `HashOrchestrator` built from the
//! resolved configuration.

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use wsh_engine::{EngineConfig, HashOrchestrator, WordDigest};

use crate::input::InputArgs;

/// Arguments for the hash subcommand.
#[derive(Args, Debug)]
pub struct HashArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Emit a JSON record instead of the bare hex digest.
    #[arg(long)]
    pub json: bool,
}

/// JSON output of `wsh hash --json`.
#[derive(Debug, Serialize)]
pub struct DigestRecord {
    pub algorithm: &'static str,
    pub digest: WordDigest,
    pub length: usize,
    pub blocks: u32,
}

/// Execute the hash subcommand.
pub fn run_hash(args: &HashArgs, config: &EngineConfig) -> Result<u8> {
    let data = args.input.read()?;
    let mut orchestrator =
        HashOrchestrator::from_config(config).context("failed to start digest engine")?;
    println!("{}", render_hash(&mut orchestrator, &data, args.json)?);
    Ok(0)
}

/// Hash `data` and format the result for output.
pub fn render_hash(orchestrator: &mut HashOrchestrator, data: &[u8], json: bool) -> Result<String> {
    let (digest, blocks) = orchestrator
        .digest_with_block_count(data)
        .with_context(|| format!("failed to hash {} bytes", data.len()))?;

    if !json {
        return Ok(digest.to_hex());
    }
    let record = DigestRecord {
        algorithm: "sha256",
        digest,
        length: data.len(),
        blocks,
    };
    serde_json::to_string_pretty(&record).context("failed to serialize digest record")
}
