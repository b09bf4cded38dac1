use crate::confirm::{Confirm, CLEAR_PROJECT_PROMPT};
use crate::error::{LcError, Result};
use crate::registry::{check_project_name, Project};
use crate::store::Store;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// One row of `proj view`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectSummary {
    pub name: String,
    pub root: PathBuf,
    pub active: bool,
    pub instances: usize,
}

/// Adds, lists, renames and removes projects, and selects the active one.
pub struct ProjectController<'s, S: Store> {
    store: &'s mut S,
}

impl<'s, S: Store> ProjectController<'s, S> {
    pub fn new(store: &'s mut S) -> Self {
        Self { store }
    }

    pub fn set_active(&mut self, name: &str) -> Result<()> {
        let mut registry = self.store.load()?;
        if !registry.projects.contains_key(name) {
            return Err(LcError::ProjectNotFound(name.to_string()));
        }
        registry.active = name.to_string();
        self.store.save(&registry)?;
        tracing::debug!(project = name, "set active project");
        Ok(())
    }

    /// Register `path` as a project and return the name it was stored under.
    ///
    /// The name defaults to the last component of `path`.
    pub fn add(&mut self, path: &Path, name: Option<&str>) -> Result<String> {
        if !path.is_absolute() {
            return Err(LcError::NotAnAbsolutePath(path.to_path_buf()));
        }
        if !path.exists() {
            return Err(LcError::PathNotFound(path.to_path_buf()));
        }

        let project_name = match name.filter(|n| !n.is_empty()) {
            Some(n) => n.to_string(),
            None => path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .ok_or_else(|| LcError::InvalidProjectName(path.display().to_string()))?,
        };
        check_project_name(&project_name)?;

        let mut registry = self.store.load()?;
        if registry.projects.contains_key(&project_name) {
            return Err(LcError::ProjectExists(project_name));
        }
        registry
            .projects
            .insert(project_name.clone(), Project::new(path));
        self.store.save(&registry)?;
        tracing::debug!(project = %project_name, root = %path.display(), "added project");
        Ok(project_name)
    }

    pub fn view(&self) -> Result<Vec<ProjectSummary>> {
        let registry = self.store.load()?;
        if registry.projects.is_empty() {
            return Err(LcError::NoProjects);
        }
        Ok(registry
            .projects
            .iter()
            .map(|(name, project)| ProjectSummary {
                name: name.clone(),
                root: project.root.clone(),
                active: registry.is_active(name),
                instances: project.instances.len(),
            })
            .collect())
    }

    /// Remove a project along with its instances, after confirmation.
    pub fn clear(&mut self, name: &str, confirm: &mut impl Confirm) -> Result<()> {
        let mut registry = self.store.load()?;
        if !registry.projects.contains_key(name) {
            return Err(LcError::ProjectNotFound(name.to_string()));
        }
        if !confirm.confirm(CLEAR_PROJECT_PROMPT) {
            return Err(LcError::Declined);
        }

        if registry.is_active(name) {
            registry.active.clear();
        }
        registry.projects.remove(name);
        self.store.save(&registry)?;
        tracing::debug!(project = name, "removed project");
        Ok(())
    }

    /// Move a project to a new key. The active pointer follows it.
    pub fn rename(&mut self, old: &str, new: &str) -> Result<()> {
        check_project_name(new)?;
        let mut registry = self.store.load()?;
        if !registry.projects.contains_key(old) {
            return Err(LcError::ProjectNotFound(old.to_string()));
        }
        if old == new {
            return Ok(());
        }
        if registry.projects.contains_key(new) {
            return Err(LcError::ProjectExists(new.to_string()));
        }

        if let Some(project) = registry.projects.remove(old) {
            registry.projects.insert(new.to_string(), project);
        }
        if registry.active == old {
            registry.active = new.to_string();
        }
        self.store.save(&registry)?;
        tracing::debug!(from = old, to = new, "renamed project");
        Ok(())
    }
}
