use crate::output::Output;
use lc_core::confirm::{is_yes, Confirm};
use std::io::Write;

/// Asks on the terminal and reads the answer from stdin.
///
/// With `assume_yes` every question is answered yes without reading input.
/// In JSON mode the question goes to stderr so stdout stays machine-readable.
pub struct Prompt {
    assume_yes: bool,
    json: bool,
}

impl Prompt {
    pub fn new(assume_yes: bool, json: bool) -> Self {
        Self { assume_yes, json }
    }
}

fn ask<W: Write>(mut out: Output<W>, prompt: &str) {
    out.warning(prompt);
    out.inline(">> ");
}

impl Confirm for Prompt {
    fn confirm(&mut self, prompt: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        if self.json {
            ask(Output::stderr(), prompt);
        } else {
            ask(Output::stdout(), prompt);
        }

        let mut answer = String::new();
        match std::io::stdin().read_line(&mut answer) {
            Ok(_) => is_yes(&answer),
            Err(e) => {
                tracing::warn!(error = %e, "could not read confirmation");
                false
            }
        }
    }
}
