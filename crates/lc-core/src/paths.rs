use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// File and directory names
// ---------------------------------------------------------------------------

/// Name of the per-user data directory under the platform data dir.
pub const APP_DIR: &str = "LordCommander";

/// Fallback data directory when the platform has no data dir.
pub const FALLBACK_DIR: &str = ".lordcommander";

pub const DB_FILE: &str = "lcdb.json";
pub const CONFIG_FILE: &str = "config.yaml";
pub const DUMP_FILE: &str = "lcdb_dump.json";

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "LC_DATA_DIR";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

/// Resolve the data directory.
///
/// Priority:
/// 1. `--data-dir` flag / `LC_DATA_DIR` env var (passed in as `explicit`)
/// 2. `<platform data dir>/LordCommander`
/// 3. `./.lordcommander`
pub fn resolve_data_dir(explicit: Option<&Path>) -> PathBuf {
    if let Some(p) = explicit {
        return p.to_path_buf();
    }
    match dirs::data_dir() {
        Some(base) => base.join(APP_DIR),
        None => PathBuf::from(FALLBACK_DIR),
    }
}

pub fn db_path(data_dir: &Path) -> PathBuf {
    data_dir.join(DB_FILE)
}

pub fn config_path(data_dir: &Path) -> PathBuf {
    data_dir.join(CONFIG_FILE)
}

pub fn dump_path(dir: &Path) -> PathBuf {
    dir.join(DUMP_FILE)
}
