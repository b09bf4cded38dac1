use crate::error::{LcError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

// ---------------------------------------------------------------------------
// Project
// ---------------------------------------------------------------------------

/// A named root directory plus the ordered instance directories under it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Project {
    pub root: PathBuf,
    #[serde(default)]
    pub instances: Vec<String>,
}

impl Project {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            instances: Vec::new(),
        }
    }

    /// Position of `name` in the instance list.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.instances.iter().position(|i| i == name)
    }
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// Everything `lc` persists: the active project pointer and the project map.
///
/// An empty `active` means no project is selected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Registry {
    pub active: String,
    pub projects: BTreeMap<String, Project>,
}

impl Registry {
    /// Name of the active project, if one is set and still registered.
    pub fn active_name(&self) -> Option<&str> {
        if self.active.is_empty() || !self.projects.contains_key(&self.active) {
            return None;
        }
        Some(&self.active)
    }

    pub fn active_project(&self) -> Option<&Project> {
        self.active_name().and_then(|name| self.projects.get(name))
    }

    pub fn active_project_mut(&mut self) -> Option<&mut Project> {
        if self.active_name().is_none() {
            return None;
        }
        self.projects.get_mut(&self.active)
    }

    pub fn is_active(&self, name: &str) -> bool {
        !self.active.is_empty() && self.active == name
    }

    /// True when `active` is empty or names a registered project.
    pub fn active_is_consistent(&self) -> bool {
        self.active.is_empty() || self.projects.contains_key(&self.active)
    }
}

// ---------------------------------------------------------------------------
// Name checks
// ---------------------------------------------------------------------------

/// A project key must contain something other than whitespace.
pub fn check_project_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(LcError::InvalidProjectName(name.to_string()));
    }
    Ok(())
}

/// An instance must name exactly one directory directly under the root.
pub fn check_instance_name(name: &str) -> Result<()> {
    let mut parts = Path::new(name).components();
    match (parts.next(), parts.next()) {
        (Some(Component::Normal(_)), None) if !name.contains(std::path::is_separator) => Ok(()),
        _ => Err(LcError::InvalidInstanceName(name.to_string())),
    }
}
