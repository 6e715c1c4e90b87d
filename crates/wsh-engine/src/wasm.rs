//! # WebAssembly Digest Engine
//!
//! Loads a compiled SHA-256 engine module and drives its digest export.
//!
//! ## Module contract
//!
//! - Imports its linear memory as `memory.pages` (minimum `MIN_PAGES`).
//! - Exports `export_name : (block_count: i32) -> i32`, returning the byte
//!   offset of the 8-word digest.
//!
//! The host memory handed to the module is a wasmtime `Memory`, while the
//! orchestrator works on a `MemoryArena`. Each call grows the instance memory
//! to the arena size, copies the arena in, invokes the export, and copies the
//! instance memory back. The arena stays the single source of truth between
//! calls.

use std::path::{Path, PathBuf};

use wasmtime::{Engine, Linker, Memory, MemoryType, Module, Store, TypedFunc};
use wsh_arena::MemoryArena;
use wsh_core::{mem_pages, HashError, PAGE_SIZE};

use crate::config::EngineConfig;
use crate::engine::DigestEngine;

/// Import module name for the shared memory.
pub const MEMORY_IMPORT_MODULE: &str = "memory";
/// Import field name for the shared memory.
pub const MEMORY_IMPORT_NAME: &str = "pages";

/// Digest engine backed by a wasmtime instance.
pub struct WasmEngine {
    store: Store<()>,
    memory: Memory,
    digest: TypedFunc<u32, u32>,
    module_path: PathBuf,
}

impl WasmEngine {
    /// Load, link, and instantiate the module named by `config.module_path`.
    pub fn load(config: &EngineConfig) -> Result<Self, HashError> {
        let module_path = config
            .module_path
            .clone()
            .ok_or_else(|| HashError::EngineLoad("no module_path configured".into()))?;
        let load_err = |stage: &str, e: wasmtime::Error| {
            HashError::EngineLoad(format!("{stage} {}: {e:#}", module_path.display()))
        };

        let initial_pages = u32::try_from(config.initial_pages)
            .map_err(|_| HashError::EngineLoad(format!("initial_pages {} too large", config.initial_pages)))?;

        let engine = Engine::default();
        let module = Module::from_file(&engine, &module_path).map_err(|e| load_err("compiling", e))?;
        let mut store = Store::new(&engine, ());
        let memory = Memory::new(&mut store, MemoryType::new(initial_pages, None))
            .map_err(|e| load_err("allocating memory for", e))?;

        let mut linker = Linker::new(&engine);
        linker
            .define(&store, MEMORY_IMPORT_MODULE, MEMORY_IMPORT_NAME, memory)
            .map_err(|e| load_err("linking memory for", e))?;
        let instance = linker
            .instantiate(&mut store, &module)
            .map_err(|e| load_err("instantiating", e))?;
        let digest = instance
            .get_typed_func::<u32, u32>(&mut store, &config.export_name)
            .map_err(|e| load_err(&format!("resolving export `{}` in", config.export_name), e))?;

        tracing::info!(
            module = %module_path.display(),
            export = %config.export_name,
            initial_pages,
            "loaded wasm digest engine"
        );
        Ok(Self {
            store,
            memory,
            digest,
            module_path,
        })
    }

    /// Path of the loaded module.
    pub fn module_path(&self) -> &Path {
        &self.module_path
    }

    fn sync_into_instance(&mut self, arena: &MemoryArena) -> Result<(), HashError> {
        let arena_len = arena.capacity();
        let instance_len = self.memory.data_size(&self.store);
        if arena_len > instance_len {
            let delta = ((arena_len - instance_len) / PAGE_SIZE) as u64;
            self.memory.grow(&mut self.store, delta).map_err(|_| HashError::Allocation {
                current_pages: instance_len / PAGE_SIZE,
                requested_pages: delta as usize,
                max_pages: arena.max_pages(),
            })?;
        }
        self.memory.data_mut(&mut self.store)[..arena_len].copy_from_slice(arena.as_bytes());
        Ok(())
    }

    fn sync_into_arena(&self, arena: &mut MemoryArena) -> Result<(), HashError> {
        let instance = self.memory.data(&self.store);
        if instance.len() > arena.capacity() {
            arena.grow_by(mem_pages(instance.len() - arena.capacity()))?;
        }
        arena.write_bytes(0, instance)
    }
}

impl DigestEngine for WasmEngine {
    fn compute_digest(&mut self, arena: &mut MemoryArena, block_count: u32) -> Result<u32, HashError> {
        self.sync_into_instance(arena)?;
        let offset = self
            .digest
            .call(&mut self.store, block_count)
            .map_err(|e| HashError::Engine(format!("{}: {e:#}", self.module_path().display())))?;
        self.sync_into_arena(arena)?;
        Ok(offset)
    }

    fn engine_name(&self) -> &str {
        "wasm"
    }
}
