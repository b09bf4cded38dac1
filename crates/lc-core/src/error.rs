use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LcError {
    #[error("Project {0} is not found in the list, to see available projects run 'proj view'.")]
    ProjectNotFound(String),

    #[error("No project has been found in the list.")]
    NoProjects,

    #[error("Project {0} already exists!")]
    ProjectExists(String),

    #[error("Invalid project name '{0}'.")]
    InvalidProjectName(String),

    #[error("Invalid directory name '{0}', it should be a single directory under the project root.")]
    InvalidInstanceName(String),

    #[error("Invalid path '{}', it should be absolute.", .0.display())]
    NotAnAbsolutePath(PathBuf),

    #[error("Path '{}' does not exist, please enter a valid path.", .0.display())]
    PathNotFound(PathBuf),

    #[error("Aborting! No argument has been provided.")]
    ArgumentNotProvided,

    #[error("May be no active project has been set. Please check.")]
    ActiveProjectNotSet,

    #[error("You can not use --ex and --inc together.")]
    ConflictingSelection,

    #[error("Aborted! Nothing is changed.")]
    Declined,

    #[error("Failed! Not a valid LordCommander backup: {0}")]
    MalformedBackup(String),

    #[error("shell '{0}' was not found on PATH")]
    ShellNotFound(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl LcError {
    /// True when the user answered "no" to a confirmation prompt.
    pub fn is_declined(&self) -> bool {
        matches!(self, LcError::Declined)
    }
}

pub type Result<T> = std::result::Result<T, LcError>;
