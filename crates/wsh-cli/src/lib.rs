//! # wsh-cli — Arena SHA-256 Command-Line Interface
//!
//! ## Subcommands
//!
//! - `hash`: Digest text, a file, or stdin through the configured engine
//! - `layout`: Show the padded message blocks the engine would receive
//!
//! ## Crate Policy
//!
//! - Argument parsing is separated from the handlers.
//! - Handlers delegate to `wsh-engine` and `wsh-arena`; no hashing logic here.

pub mod hash;
pub mod input;
pub mod layout;
