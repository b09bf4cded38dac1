use super::Opts;
use crate::output::{print_json, seg, Output, Severity};
use clap::Subcommand;
use lc_core::{project::ProjectController, store::Store};
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum ProjSubcommand {
    /// Register an existing directory as a project
    Add {
        /// Absolute path to the project root
        path: PathBuf,
        /// Project name (default: last component of the path)
        name: Option<String>,
    },
    /// List projects; the active one is checked
    View,
    /// Set the active project
    Active { name: String },
    /// Rename a project
    Rename { old: String, new: String },
    /// Remove a project along with its instances
    Clear { name: String },
}

pub fn run(store: &mut impl Store, subcmd: ProjSubcommand, opts: Opts) -> anyhow::Result<()> {
    let mut pc = ProjectController::new(store);
    let mut out = Output::stdout();

    match subcmd {
        ProjSubcommand::Add { path, name } => {
            let name = pc.add(&path, name.as_deref())?;
            if opts.json {
                print_json(&serde_json::json!({ "name": name, "root": path }))?;
            } else {
                out.success(format!("{name} is added to project list."));
            }
        }
        ProjSubcommand::View => {
            let projects = pc.view()?;
            if opts.json {
                return print_json(&projects);
            }
            out.info("Listing projects...");
            for p in &projects {
                let mark = if p.active { '✓' } else { ' ' };
                out.line(&[
                    seg(format!("[{mark}] {}:", p.name), Severity::Normal),
                    seg(p.root.display(), Severity::Muted),
                ]);
            }
            out.blank();
            out.normal(format!("Total {} projects listed.", projects.len()));
        }
        ProjSubcommand::Active { name } => {
            pc.set_active(&name)?;
            if opts.json {
                print_json(&serde_json::json!({ "active": name }))?;
            } else {
                out.success(format!("{name} is set as active project."));
            }
        }
        ProjSubcommand::Rename { old, new } => {
            pc.rename(&old, &new)?;
            if opts.json {
                print_json(&serde_json::json!({ "from": old, "to": new }))?;
            } else {
                out.success(format!("Project {old} is renamed to {new}."));
            }
        }
        ProjSubcommand::Clear { name } => {
            pc.clear(&name, &mut opts.prompt())?;
            if opts.json {
                print_json(&serde_json::json!({ "removed": name }))?;
            } else {
                out.success(format!("{name} is removed from LordCommander."));
            }
        }
    }
    Ok(())
}
