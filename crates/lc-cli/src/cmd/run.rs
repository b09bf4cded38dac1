use super::Opts;
use crate::output::{print_json, seg, Output, Severity};
use clap::Args;
use lc_core::config::Config;
use lc_core::error::LcError;
use lc_core::runner::{self, RunEvent, RunSummary, SystemShell};
use lc_core::selection::Selection;
use lc_core::store::Store;
use std::io::Stdout;
use std::path::Path;

#[derive(Args)]
pub struct RunArgs {
    /// Shell command to run in every selected instance
    command: String,
    /// Lower index of the instance slice (inclusive)
    #[arg(long, allow_negative_numbers = true)]
    li: Option<isize>,
    /// Upper index of the instance slice (exclusive)
    #[arg(long, allow_negative_numbers = true)]
    ui: Option<isize>,
    /// Comma-separated instance indices to skip
    #[arg(long, value_delimiter = ',')]
    ex: Vec<usize>,
    /// Comma-separated instance indices to run exclusively
    #[arg(long, value_delimiter = ',')]
    inc: Vec<usize>,
}

pub fn run(
    store: &impl Store,
    data_dir: &Path,
    args: RunArgs,
    opts: Opts,
) -> anyhow::Result<()> {
    let registry = store.load()?;
    let project = registry
        .active_project()
        .ok_or(LcError::ActiveProjectNotSet)?;
    let config = Config::load(data_dir)?;
    let mut shell = SystemShell::from_config(&config)?;

    let selection = Selection {
        lower: args.li,
        upper: args.ui,
        exclude: args.ex,
        include: args.inc,
    };

    let mut out = Output::stdout();
    let summary = runner::run(project, &args.command, &selection, &mut shell, |event| {
        if !opts.json {
            report(&mut out, event);
        }
    });

    if opts.json {
        print_json(&serde_json::json!({
            "project": registry.active,
            "succeeded": summary.succeeded,
            "failed": summary.failed,
            "error": summary.aborted.as_ref().map(|e| e.to_string()),
        }))?;
    } else {
        tally(&mut out, &summary);
    }

    match summary.aborted {
        Some(e) => Err(e.into()),
        None => Ok(()),
    }
}

fn report(out: &mut Output<Stdout>, event: RunEvent<'_>) {
    match event {
        RunEvent::NoInstances => out.warning("No instances have been found in the list."),
        RunEvent::Missing { instance } => {
            out.blank();
            out.line(&[
                seg("Directory", Severity::Danger),
                seg(format!("'{instance}'"), Severity::Warning),
                seg("is not found! Skipping...", Severity::Danger),
            ]);
        }
        RunEvent::NotADirectory { instance } => {
            out.blank();
            out.line(&[
                seg(format!("'{instance}'"), Severity::Warning),
                seg("is not a directory. Skipping...", Severity::Info),
            ]);
        }
        RunEvent::Running { path, command } => {
            out.blank();
            out.line(&[
                seg("Changed directory to", Severity::Info),
                seg(format!("'{}'", path.display()), Severity::Warning),
                seg("and running", Severity::Info),
                seg(format!("'{command}'"), Severity::Warning),
            ]);
        }
        RunEvent::Exited { instance, code } => match code {
            Some(0) => {}
            Some(code) => out.write(
                format!("'{instance}' exited with status {code}"),
                Severity::Muted,
            ),
            None => out.write(
                format!("'{instance}' was terminated by a signal"),
                Severity::Muted,
            ),
        },
        RunEvent::Failed { instance, error } => out.danger(format!("'{instance}': {error}")),
    }
}

fn tally(out: &mut Output<Stdout>, summary: &RunSummary) {
    out.blank();
    out.line(&[
        seg("Successful run:", Severity::Normal),
        seg(summary.succeeded, Severity::Success),
    ]);
    out.line(&[
        seg("Failed run:", Severity::Normal),
        seg(summary.failed, Severity::Danger),
    ]);
}
