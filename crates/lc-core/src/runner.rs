//! Runs one shell command across the selected instances of a project.
//!
//! Instances are visited one at a time, in list order. For each, the process
//! working directory is switched to `<root>/<instance>` before the command
//! runs; the directory the run started from is restored when `run` returns,
//! whichever way it returns.

use crate::config::Config;
use crate::error::{LcError, Result};
use crate::registry::Project;
use crate::selection::Selection;
use serde::Serialize;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

// ---------------------------------------------------------------------------
// Shell
// ---------------------------------------------------------------------------

/// Executes a command string in the current working directory and waits for it.
///
/// Returns the child's exit code (`None` when killed by a signal). An `Err`
/// means the command could not be started at all.
pub trait Shell {
    fn execute(&mut self, command: &str) -> io::Result<Option<i32>>;
}

/// The configured system shell, with stdio inherited from `lc`.
#[derive(Debug, Clone)]
pub struct SystemShell {
    program: PathBuf,
    args: Vec<String>,
}

impl SystemShell {
    pub fn from_config(config: &Config) -> Result<Self> {
        let program = which::which(&config.shell)
            .map_err(|_| LcError::ShellNotFound(config.shell.clone()))?;
        Ok(Self {
            program,
            args: config.shell_args.clone(),
        })
    }
}

impl Shell for SystemShell {
    fn execute(&mut self, command: &str) -> io::Result<Option<i32>> {
        let status = Command::new(&self.program)
            .args(&self.args)
            .arg(command)
            .status()?;
        Ok(status.code())
    }
}

// ---------------------------------------------------------------------------
// Events and summary
// ---------------------------------------------------------------------------

/// Progress notifications emitted while a run is underway.
#[derive(Debug)]
pub enum RunEvent<'a> {
    /// The selection matched no instances.
    NoInstances,
    Missing { instance: &'a str },
    NotADirectory { instance: &'a str },
    Running { path: &'a Path, command: &'a str },
    Exited { instance: &'a str, code: Option<i32> },
    /// Changing into the instance or starting the command failed.
    Failed { instance: &'a str, error: &'a io::Error },
}

#[derive(Debug, Default, Serialize)]
pub struct RunSummary {
    pub succeeded: usize,
    pub failed: usize,
    /// Set when the run was rejected before any instance was visited.
    #[serde(skip)]
    pub aborted: Option<LcError>,
}

// ---------------------------------------------------------------------------
// Working directory guard
// ---------------------------------------------------------------------------

/// Restores the captured working directory on drop.
struct CwdGuard {
    original: PathBuf,
}

impl CwdGuard {
    fn capture() -> io::Result<Self> {
        Ok(Self {
            original: std::env::current_dir()?,
        })
    }
}

impl Drop for CwdGuard {
    fn drop(&mut self) {
        if let Err(e) = std::env::set_current_dir(&self.original) {
            tracing::warn!(
                dir = %self.original.display(),
                error = %e,
                "failed to restore working directory"
            );
        }
    }
}

// ---------------------------------------------------------------------------
// run
// ---------------------------------------------------------------------------

/// Run `command` in every selected instance of `project`.
///
/// Counts an instance as succeeded once its command was started, whatever
/// its exit code. Missing paths, non-directories and OS failures count as
/// failed and never stop the loop. The summary is always returned; when the
/// selection is invalid it carries the error and zero counters.
pub fn run<X: Shell>(
    project: &Project,
    command: &str,
    selection: &Selection,
    shell: &mut X,
    mut on_event: impl FnMut(RunEvent<'_>),
) -> RunSummary {
    let mut summary = RunSummary::default();

    if let Err(e) = selection.validate() {
        summary.aborted = Some(e);
        return summary;
    }
    let _guard = match CwdGuard::capture() {
        Ok(guard) => guard,
        Err(e) => {
            summary.aborted = Some(e.into());
            return summary;
        }
    };

    let instances = selection.apply(&project.instances);
    tracing::info!(
        root = %project.root.display(),
        selected = instances.len(),
        command,
        "starting run"
    );
    if instances.is_empty() {
        on_event(RunEvent::NoInstances);
    }

    for (_, instance) in instances {
        let path = project.root.join(instance);
        if !path.exists() {
            on_event(RunEvent::Missing { instance });
            summary.failed += 1;
            continue;
        }
        if !path.is_dir() {
            on_event(RunEvent::NotADirectory { instance });
            summary.failed += 1;
            continue;
        }

        on_event(RunEvent::Running {
            path: &path,
            command,
        });
        match execute_in(shell, &path, command) {
            Ok(code) => {
                tracing::debug!(instance, ?code, "command finished");
                on_event(RunEvent::Exited { instance, code });
                summary.succeeded += 1;
            }
            Err(error) => {
                tracing::debug!(instance, %error, "command could not run");
                on_event(RunEvent::Failed {
                    instance,
                    error: &error,
                });
                summary.failed += 1;
            }
        }
    }

    summary
}

fn execute_in<X: Shell>(shell: &mut X, dir: &Path, command: &str) -> io::Result<Option<i32>> {
    std::env::set_current_dir(dir)?;
    shell.execute(command)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
