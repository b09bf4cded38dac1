use super::Opts;
use crate::output::{print_json, Output};
use clap::Subcommand;
use lc_core::instance::{Cleared, InstanceController, Removal};
use lc_core::store::Store;
use std::io::Stdout;

#[derive(Subcommand)]
pub enum DirsSubcommand {
    /// Add instance directories to the active project
    Add { names: Vec<String> },
    /// List the active project's instances with their indices
    View {
        /// Sort alphabetically (indices keep their stored positions)
        #[arg(long)]
        sort: bool,
    },
    /// Remove the named instances, or all of them with --full
    Clear {
        names: Vec<String>,
        /// Clear the entire list
        #[arg(long)]
        full: bool,
    },
}

pub fn run(store: &mut impl Store, subcmd: DirsSubcommand, opts: Opts) -> anyhow::Result<()> {
    let mut ic = InstanceController::new(store);
    let mut out = Output::stdout();

    match subcmd {
        DirsSubcommand::Add { names } => {
            let added = ic.add(&names)?;
            if opts.json {
                let listing = ic.view(false)?;
                return print_json(&serde_json::json!({ "added": added, "listing": listing }));
            }
            out.success("Success!");
            show(&ic, &mut out, false)?;
        }
        DirsSubcommand::View { sort } => {
            if opts.json {
                return print_json(&ic.view(sort)?);
            }
            show(&ic, &mut out, sort)?;
        }
        DirsSubcommand::Clear { names, full } => {
            let cleared = ic.clear(&names, full, &mut opts.prompt())?;
            if opts.json {
                return print_json(&cleared);
            }
            match cleared {
                Cleared::All(_) => out.success("Directory list cleared!"),
                Cleared::Keys(removals) => {
                    for removal in removals {
                        match removal {
                            Removal::Removed(name) => {
                                out.warning(format!("Removing {name}..."));
                                out.success("Success!");
                            }
                            Removal::NotFound(name) => {
                                out.danger(format!("{name} is not found in the list! Skipping..."));
                            }
                        }
                    }
                    show(&ic, &mut out, false)?;
                }
            }
        }
    }
    Ok(())
}

fn show<S: Store>(
    ic: &InstanceController<'_, S>,
    out: &mut Output<Stdout>,
    sort: bool,
) -> anyhow::Result<()> {
    let listing = ic.view(sort)?;
    out.info("Listing directories...");
    for entry in &listing.entries {
        out.normal(format!("- {} ({})", entry.name, entry.index));
    }
    out.blank();
    out.normal(format!("Total {} directories listed.", listing.total));
    Ok(())
}
