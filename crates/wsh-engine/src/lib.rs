//! # wsh-engine — Digest Engines and the Hash Orchestrator
//!
//! ## Architecture
//!
//! - **Trait** (`engine.rs`): `DigestEngine` is the host/engine boundary.
//!   An engine receives the arena and a block count, computes in place, and
//!   returns the byte offset of an 8-word digest.
//!
//! - **Native** (`native.rs`): `NativeEngine` honours the same memory
//!   contract in-process, using the SHA-256 compression function from `sha2`.
//!
//! - **Wasm** (`wasm.rs`, feature `wasm`): `WasmEngine` loads a compiled
//!   engine module with `wasmtime` and mirrors the arena into its imported
//!   memory.
//!
//! - **Orchestrator** (`orchestrator.rs`): `HashOrchestrator` owns one arena
//!   and one engine and runs the layout → compute → read → render cycle.
//!   `hash` takes `&mut self`, so one orchestrator never has two operations
//!   in flight.
//!
//! ## Crate Policy
//!
//! - Depends on `wsh-core` and `wsh-arena` internally.
//! - No process-wide engine state. Engines are built from an explicit
//!   `EngineConfig` and handed to the orchestrator.

pub mod config;
pub mod digest;
pub mod engine;
pub mod native;
pub mod orchestrator;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use config::{EngineConfig, EngineKind};
pub use digest::WordDigest;
pub use engine::{create_engine, DigestEngine};
pub use native::{NativeEngine, NATIVE_DIGEST_OFFSET};
pub use orchestrator::HashOrchestrator;

#[cfg(feature = "wasm")]
pub use wasm::WasmEngine;
