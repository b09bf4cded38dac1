use crate::error::Result;
use crate::paths;
use crate::registry::Registry;
use std::path::{Path, PathBuf};

/// Durable home of the [`Registry`].
///
/// Controllers load the whole registry, mutate it, and save it back in the
/// same call; there is no implicit write-back.
pub trait Store {
    fn load(&self) -> Result<Registry>;
    fn save(&mut self, registry: &Registry) -> Result<()>;
}

// ---------------------------------------------------------------------------
// JsonStore
// ---------------------------------------------------------------------------

/// Registry persisted as a JSON file (`<data_dir>/lcdb.json`).
#[derive(Debug, Clone)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    /// Open the store in `data_dir`, creating an empty registry on first use.
    pub fn open(data_dir: &Path) -> Result<Self> {
        let store = Self {
            path: paths::db_path(data_dir),
        };
        if !store.path.exists() {
            tracing::debug!(path = %store.path.display(), "creating empty registry");
            crate::io::write_json(&store.path, &Registry::default())?;
        }
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Store for JsonStore {
    fn load(&self) -> Result<Registry> {
        let data = std::fs::read_to_string(&self.path)?;
        let registry: Registry = serde_json::from_str(&data)?;
        tracing::debug!(
            path = %self.path.display(),
            projects = registry.projects.len(),
            "loaded registry"
        );
        Ok(registry)
    }

    fn save(&mut self, registry: &Registry) -> Result<()> {
        tracing::debug!(path = %self.path.display(), "saving registry");
        crate::io::write_json(&self.path, registry)
    }
}

// ---------------------------------------------------------------------------
// MemoryStore
// ---------------------------------------------------------------------------

/// In-memory store. Also counts saves, which lets callers check that a
/// rejected operation never persisted anything.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    registry: Registry,
    saves: usize,
}

impl MemoryStore {
    pub fn new(registry: Registry) -> Self {
        Self { registry, saves: 0 }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl Store for MemoryStore {
    fn load(&self) -> Result<Registry> {
        Ok(self.registry.clone())
    }

    fn save(&mut self, registry: &Registry) -> Result<()> {
        self.registry = registry.clone();
        self.saves += 1;
        Ok(())
    }
}
