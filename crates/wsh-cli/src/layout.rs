//! # Layout Subcommand
//!
//! Writes the input into a fresh arena exactly as the orchestrator would and
//! dumps the padded blocks, one 16-byte row per line:
//!
//! ```text
//! blocks: 1
//! 0x00010000  61 62 63 80 00 00 00 00 00 00 00 00 00 00 00 00
//! ...
//! 0x00010030  00 00 00 00 00 00 00 00 00 00 00 00 00 00 00 18
//! ```

use anyhow::{Context, Result};
use clap::Args;

use wsh_arena::write_padded_message;
use wsh_core::{to_hex, to_hex_prefixed, BLOCK_SIZE, MESSAGE_BASE_OFFSET, RESERVED_SCRATCH_BYTES};
use wsh_engine::EngineConfig;

use crate::input::InputArgs;

const ROW: usize = 16;

/// Arguments for the layout subcommand.
#[derive(Args, Debug)]
pub struct LayoutArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

/// Execute the layout subcommand.
pub fn run_layout(args: &LayoutArgs, config: &EngineConfig) -> Result<u8> {
    let data = args.input.read()?;
    print!("{}", render_layout(&data, config)?);
    Ok(0)
}

/// Lay out `data` in an arena sized by `config` and render the padded blocks.
pub fn render_layout(data: &[u8], config: &EngineConfig) -> Result<String> {
    let mut arena = config.build_arena().context("failed to allocate arena")?;
    let blocks = write_padded_message(&mut arena, MESSAGE_BASE_OFFSET, RESERVED_SCRATCH_BYTES, data)
        .context("failed to lay out message")?;
    let padded = arena.view(MESSAGE_BASE_OFFSET, blocks as usize * BLOCK_SIZE)?;

    let mut out = format!("blocks: {blocks}\n");
    for (i, row) in padded.chunks(ROW).enumerate() {
        let offset = (MESSAGE_BASE_OFFSET + i * ROW) as u64;
        let bytes: Vec<String> = row.iter().map(|&b| to_hex(8, u64::from(b))).collect();
        out.push_str(&format!("{}  {}\n", to_hex_prefixed(32, offset), bytes.join(" ")));
    }
    Ok(out)
}
