//! # Engine Configuration
//!
//! Selects the digest engine and sizes its arena. Values are layered:
//!
//! 1. built-in defaults (native engine, 2 initial pages, 32-bit page limit),
//! 2. an optional YAML file,
//! 3. environment variables:
//!
//! | variable                  | field           |
//! |---------------------------|-----------------|
//! | `WSH_ENGINE`              | `engine`        |
//! | `WSH_ENGINE_MODULE`       | `module_path`   |
//! | `WSH_ENGINE_EXPORT`       | `export_name`   |
//! | `WSH_ARENA_INITIAL_PAGES` | `initial_pages` |
//! | `WSH_ARENA_MAX_PAGES`     | `max_pages`     |
//!
//! ## Example
//!
//! ```yaml
//! engine: wasm
//! module_path: dist/sha256.wasm
//! export_name: digest
//! initial_pages: 2
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use wsh_arena::MemoryArena;
use wsh_core::{HashError, MIN_PAGES, WASM32_MAX_PAGES};

/// Which digest engine backs the orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineKind {
    /// In-process SHA-256 compression.
    #[default]
    Native,
    /// Compiled WebAssembly module loaded at startup.
    Wasm,
}

impl EngineKind {
    /// Returns the configuration identifier string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Native => "native",
            Self::Wasm => "wasm",
        }
    }
}

impl std::str::FromStr for EngineKind {
    type Err = HashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "native" => Ok(Self::Native),
            "wasm" => Ok(Self::Wasm),
            other => Err(HashError::Config(format!(
                "unknown engine type: {other} (expected: native, wasm)"
            ))),
        }
    }
}

impl std::fmt::Display for EngineKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Engine selection and arena sizing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Engine backend.
    pub engine: EngineKind,
    /// Compiled engine module; required for `EngineKind::Wasm`.
    pub module_path: Option<PathBuf>,
    /// Export invoked as `compute_digest(block_count) -> offset`.
    pub export_name: String,
    /// Pages allocated when the arena is created.
    pub initial_pages: usize,
    /// Pages the arena may grow to.
    pub max_pages: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            engine: EngineKind::Native,
            module_path: None,
            export_name: "digest".to_string(),
            initial_pages: MIN_PAGES,
            max_pages: WASM32_MAX_PAGES,
        }
    }
}

impl EngineConfig {
    /// Parse a YAML document. Missing fields keep their defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, HashError> {
        serde_yaml::from_str(yaml).map_err(|e| HashError::Config(format!("invalid config: {e}")))
    }

    /// Read and parse a YAML file.
    pub fn from_yaml_file(path: &Path) -> Result<Self, HashError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| HashError::Config(format!("cannot read {}: {e}", path.display())))?;
        Self::from_yaml_str(&text)
    }

    /// Defaults, then `path` if given, then the process environment.
    pub fn load(path: Option<&Path>) -> Result<Self, HashError> {
        let base = match path {
            Some(p) => Self::from_yaml_file(p)?,
            None => Self::default(),
        };
        let config = base.with_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `WSH_*` overrides supplied by `lookup`.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, HashError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("WSH_ENGINE") {
            self.engine = v.parse()?;
        }
        if let Some(v) = lookup("WSH_ENGINE_MODULE") {
            self.module_path = Some(PathBuf::from(v));
        }
        if let Some(v) = lookup("WSH_ENGINE_EXPORT") {
            self.export_name = v;
        }
        if let Some(v) = lookup("WSH_ARENA_INITIAL_PAGES") {
            self.initial_pages = parse_pages("WSH_ARENA_INITIAL_PAGES", &v)?;
        }
        if let Some(v) = lookup("WSH_ARENA_MAX_PAGES") {
            self.max_pages = parse_pages("WSH_ARENA_MAX_PAGES", &v)?;
        }
        Ok(self)
    }

    /// Check the values against the layout contract.
    pub fn validate(&self) -> Result<(), HashError> {
        if self.initial_pages < MIN_PAGES {
            return Err(HashError::Config(format!(
                "initial_pages must be at least {MIN_PAGES}, got {}",
                self.initial_pages
            )));
        }
        if self.max_pages < self.initial_pages || self.max_pages > WASM32_MAX_PAGES {
            return Err(HashError::Config(format!(
                "max_pages must lie in {}..={WASM32_MAX_PAGES}, got {}",
                self.initial_pages, self.max_pages
            )));
        }
        if self.engine == EngineKind::Wasm && self.module_path.is_none() {
            return Err(HashError::Config("wasm engine requires module_path".into()));
        }
        if self.export_name.is_empty() {
            return Err(HashError::Config("export_name must not be empty".into()));
        }
        Ok(())
    }

    /// Allocate an arena sized by this configuration.
    pub fn build_arena(&self) -> Result<MemoryArena, HashError> {
        MemoryArena::with_limit(self.initial_pages, self.max_pages)
    }
}

fn parse_pages(var: &str, value: &str) -> Result<usize, HashError> {
    value
        .trim()
        .parse()
        .map_err(|e| HashError::Config(format!("{var}={value:?} is not a page count: {e}")))
}
