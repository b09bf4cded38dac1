use crate::confirm::{Confirm, RESTORE_PROMPT};
use crate::error::{LcError, Result};
use crate::paths;
use crate::registry::{check_instance_name, check_project_name, Registry};
use crate::store::Store;
use std::path::{Path, PathBuf};

const TOP_LEVEL_KEYS: [&str; 2] = ["active", "projects"];

/// Write the whole registry to `<dir>/lcdb_dump.json` and return that path.
pub fn dump(store: &impl Store, dir: &Path) -> Result<PathBuf> {
    if !dir.is_dir() {
        return Err(LcError::PathNotFound(dir.to_path_buf()));
    }
    let registry = store.load()?;
    let file = paths::dump_path(dir);
    crate::io::write_json(&file, &registry)?;
    tracing::debug!(file = %file.display(), "dumped registry");
    Ok(file)
}

/// Parse and validate backup contents without touching any store.
///
/// The document must be an object with exactly `active` and `projects`,
/// `active` must be empty or name one of the projects, and every project and
/// instance name must be one `lc` itself would accept.
pub fn parse(data: &str) -> Result<Registry> {
    let value: serde_json::Value =
        serde_json::from_str(data).map_err(|e| LcError::MalformedBackup(e.to_string()))?;
    let object = value
        .as_object()
        .ok_or_else(|| LcError::MalformedBackup("expected a JSON object".to_string()))?;

    let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
    keys.sort_unstable();
    if keys != TOP_LEVEL_KEYS {
        return Err(LcError::MalformedBackup(format!(
            "top-level keys must be exactly {TOP_LEVEL_KEYS:?}, found {keys:?}"
        )));
    }

    let registry: Registry =
        serde_json::from_value(value).map_err(|e| LcError::MalformedBackup(e.to_string()))?;
    for (name, project) in &registry.projects {
        check_project_name(name).map_err(|e| LcError::MalformedBackup(e.to_string()))?;
        for instance in &project.instances {
            check_instance_name(instance)
                .map_err(|e| LcError::MalformedBackup(e.to_string()))?;
        }
    }
    if !registry.active_is_consistent() {
        return Err(LcError::MalformedBackup(format!(
            "active project '{}' is not among the projects",
            registry.active
        )));
    }
    Ok(registry)
}

/// Replace the store contents with the backup at `file`, after confirmation.
pub fn restore(store: &mut impl Store, file: &Path, confirm: &mut impl Confirm) -> Result<()> {
    if !file.is_file() {
        return Err(LcError::PathNotFound(file.to_path_buf()));
    }
    let data = std::fs::read_to_string(file)?;
    let registry = parse(&data)?;

    if !confirm.confirm(RESTORE_PROMPT) {
        return Err(LcError::Declined);
    }
    store.save(&registry)?;
    tracing::debug!(
        file = %file.display(),
        projects = registry.projects.len(),
        "restored registry"
    );
    Ok(())
}
