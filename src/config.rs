use std::path::PathBuf;

use crate::store::memory::DEFAULT_CAPACITY;

/// Which storage backend to run. Chosen once at startup; there is no
/// run-time switching.
#[derive(Debug, Clone)]
pub enum StorageMode {
    /// Bounded in-process store.
    Memory { capacity: usize },
    /// Persistent key-value service.
    Redis { url: String },
}

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub storage: StorageMode,
    /// Optional JSON corpus bulk-ingested before serving.
    pub corpus_path: Option<PathBuf>,
}

impl ServerConfig {
    /// Load configuration from environment.
    ///
    /// - `CONTEXT_STORAGE` (optional, default `memory`) — `memory` or `redis`
    /// - `CONTEXT_REDIS_URL` (required when `CONTEXT_STORAGE=redis`)
    /// - `CONTEXT_STORE_CAPACITY` (optional, default 10000) — in-memory cap
    /// - `CONTEXT_CORPUS_PATH` (optional) — seed corpus file
    pub fn from_env() -> Result<Self, String> {
        let mode = std::env::var("CONTEXT_STORAGE").unwrap_or_else(|_| "memory".to_string());

        let storage = match mode.as_str() {
            "memory" => {
                let capacity = match std::env::var("CONTEXT_STORE_CAPACITY") {
                    Ok(val) => val.parse::<usize>().map_err(|_| {
                        "CONTEXT_STORE_CAPACITY must be a positive integer".to_string()
                    })?,
                    Err(_) => DEFAULT_CAPACITY,
                };
                StorageMode::Memory { capacity }
            }
            "redis" => {
                let url = std::env::var("CONTEXT_REDIS_URL").map_err(|_| {
                    "CONTEXT_REDIS_URL must be set when CONTEXT_STORAGE=redis".to_string()
                })?;
                StorageMode::Redis { url }
            }
            other => {
                return Err(format!(
                    "CONTEXT_STORAGE must be \"memory\" or \"redis\", got {other:?}"
                ));
            }
        };

        let corpus_path = std::env::var("CONTEXT_CORPUS_PATH").ok().map(PathBuf::from);

        Ok(Self {
            storage,
            corpus_path,
        })
    }
}
