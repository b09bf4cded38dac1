use crate::error::Result;
use crate::paths;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// User settings read from `<data_dir>/config.yaml`.
///
/// ```yaml
/// shell: bash
/// shell_args: ["-lc"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Program used to run commands, resolved on PATH.
    #[serde(default = "default_shell")]
    pub shell: String,
    /// Arguments placed between the shell and the command string.
    #[serde(default = "default_shell_args")]
    pub shell_args: Vec<String>,
}

fn default_shell() -> String {
    "sh".to_string()
}

fn default_shell_args() -> Vec<String> {
    vec!["-c".to_string()]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            shell: default_shell(),
            shell_args: default_shell_args(),
        }
    }
}

impl Config {
    /// Load the config, falling back to defaults when the file is absent.
    pub fn load(data_dir: &Path) -> Result<Self> {
        let path = paths::config_path(data_dir);
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(&path)?;
        let config: Config = serde_yaml::from_str(&data)?;
        tracing::debug!(path = %path.display(), shell = %config.shell, "loaded config");
        Ok(config)
    }
}
