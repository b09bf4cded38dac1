use crate::confirm::{Confirm, CLEAR_INSTANCES_PROMPT};
use crate::error::{LcError, Result};
use crate::registry::{check_instance_name, Registry};
use crate::store::Store;
use serde::Serialize;

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// An instance together with its position in the underlying list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstanceEntry {
    pub index: usize,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstanceListing {
    pub project: String,
    pub entries: Vec<InstanceEntry>,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "name", rename_all = "snake_case")]
pub enum Removal {
    Removed(String),
    NotFound(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Cleared {
    /// The whole list was emptied; holds the number of instances dropped.
    All(usize),
    /// Per-key outcome, in the order the keys were given.
    Keys(Vec<Removal>),
}

// ---------------------------------------------------------------------------
// InstanceController
// ---------------------------------------------------------------------------

/// Manages the instance list of whichever project is active.
pub struct InstanceController<'s, S: Store> {
    store: &'s mut S,
}

impl<'s, S: Store> InstanceController<'s, S> {
    pub fn new(store: &'s mut S) -> Self {
        Self { store }
    }

    /// Append `names` to the active project, skipping ones already present.
    /// Returns the names that were actually appended. Nothing is stored if
    /// any name is not a plain directory name.
    pub fn add(&mut self, names: &[String]) -> Result<Vec<String>> {
        if names.is_empty() {
            return Err(LcError::ArgumentNotProvided);
        }
        for name in names {
            check_instance_name(name)?;
        }
        let mut registry = self.store.load()?;
        let instances = &mut active_mut(&mut registry)?.instances;

        let mut added = Vec::new();
        for name in names {
            if !instances.contains(name) {
                instances.push(name.clone());
                added.push(name.clone());
            }
        }
        self.store.save(&registry)?;
        tracing::debug!(added = added.len(), "added instances");
        Ok(added)
    }

    /// List the active project's instances. Sorting only affects the
    /// returned order; indices always refer to the stored order.
    pub fn view(&self, sort: bool) -> Result<InstanceListing> {
        let registry = self.store.load()?;
        let project = registry
            .active_project()
            .ok_or(LcError::ActiveProjectNotSet)?;

        let mut entries: Vec<InstanceEntry> = project
            .instances
            .iter()
            .enumerate()
            .map(|(index, name)| InstanceEntry {
                index,
                name: name.clone(),
            })
            .collect();
        if sort {
            entries.sort_by(|a, b| a.name.cmp(&b.name));
        }

        Ok(InstanceListing {
            project: registry.active.clone(),
            total: entries.len(),
            entries,
        })
    }

    /// Remove the given instances, or the whole list when `full` is set.
    pub fn clear(
        &mut self,
        names: &[String],
        full: bool,
        confirm: &mut impl Confirm,
    ) -> Result<Cleared> {
        if names.is_empty() && !full {
            return Err(LcError::ArgumentNotProvided);
        }
        let mut registry = self.store.load()?;
        let instances = &mut active_mut(&mut registry)?.instances;

        let cleared = if full {
            if !confirm.confirm(CLEAR_INSTANCES_PROMPT) {
                return Err(LcError::Declined);
            }
            let count = instances.len();
            instances.clear();
            Cleared::All(count)
        } else {
            let mut seen: Vec<&String> = Vec::new();
            let mut outcome = Vec::new();
            for name in names {
                if seen.contains(&name) {
                    continue;
                }
                seen.push(name);
                match instances.iter().position(|i| i == name) {
                    Some(pos) => {
                        instances.remove(pos);
                        outcome.push(Removal::Removed(name.clone()));
                    }
                    None => outcome.push(Removal::NotFound(name.clone())),
                }
            }
            Cleared::Keys(outcome)
        };

        self.store.save(&registry)?;
        Ok(cleared)
    }

    /// Index of `name` in the active project, if registered.
    pub fn search(&self, name: &str) -> Result<Option<usize>> {
        let registry = self.store.load()?;
        let project = registry
            .active_project()
            .ok_or(LcError::ActiveProjectNotSet)?;
        Ok(project.index_of(name))
    }

    pub fn total(&self) -> Result<usize> {
        let registry = self.store.load()?;
        registry
            .active_project()
            .map(|p| p.instances.len())
            .ok_or(LcError::ActiveProjectNotSet)
    }
}

fn active_mut(registry: &mut Registry) -> Result<&mut crate::registry::Project> {
    registry
        .active_project_mut()
        .ok_or(LcError::ActiveProjectNotSet)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
