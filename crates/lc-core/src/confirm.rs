/// Answers a yes/no question before a destructive operation.
///
/// Core operations never read the terminal themselves; the CLI supplies an
/// implementation backed by stdin, tests pass a plain `bool`.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

/// A pre-resolved answer.
impl Confirm for bool {
    fn confirm(&mut self, _prompt: &str) -> bool {
        *self
    }
}

pub const CLEAR_PROJECT_PROMPT: &str =
    "Caution! This cannot be undone. Do you want to proceed? (yes/no)[no]:";
pub const CLEAR_INSTANCES_PROMPT: &str =
    "This will clear the entire list, are you sure? (yes/no) [no]:";
pub const RESTORE_PROMPT: &str =
    "This will remove existing data completely. Are you sure? (yes/no)[no]:";

/// Interpret a typed answer; only `y`/`yes` confirm.
pub fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
