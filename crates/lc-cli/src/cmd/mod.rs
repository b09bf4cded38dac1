pub mod instance;
pub mod project;
pub mod run;
pub mod utility;

use crate::prompt::Prompt;

/// Flags shared by every subcommand.
#[derive(Debug, Clone, Copy)]
pub struct Opts {
    pub json: bool,
    pub yes: bool,
}

impl Opts {
    pub fn prompt(&self) -> Prompt {
        Prompt::new(self.yes, self.json)
    }
}
