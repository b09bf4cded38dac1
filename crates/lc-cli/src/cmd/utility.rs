use super::Opts;
use crate::output::{print_json, Output};
use lc_core::backup;
use lc_core::instance::InstanceController;
use lc_core::store::Store;
use std::path::Path;

pub fn search(store: &mut impl Store, name: &str, opts: Opts) -> anyhow::Result<()> {
    let index = InstanceController::new(store).search(name)?;
    if opts.json {
        return print_json(&serde_json::json!({ "name": name, "index": index }));
    }
    let mut out = Output::stdout();
    match index {
        Some(i) => out.success(format!("Found! Index: {i}")),
        None => out.danger("Not found!"),
    }
    Ok(())
}

pub fn total(store: &mut impl Store, opts: Opts) -> anyhow::Result<()> {
    let total = InstanceController::new(store).total()?;
    if opts.json {
        return print_json(&serde_json::json!({ "total": total }));
    }
    Output::stdout().info(format!("Total {total} directories listed."));
    Ok(())
}

pub fn dump(store: &impl Store, dir: &Path, opts: Opts) -> anyhow::Result<()> {
    let file = backup::dump(store, dir)?;
    if opts.json {
        return print_json(&serde_json::json!({ "file": file }));
    }
    Output::stdout().success(format!(
        "Data dumping successful. Output file: {}",
        file.display()
    ));
    Ok(())
}

pub fn restore(store: &mut impl Store, file: &Path, opts: Opts) -> anyhow::Result<()> {
    backup::restore(store, file, &mut opts.prompt())?;
    if opts.json {
        return print_json(&serde_json::json!({ "restored": file }));
    }
    Output::stdout().success("Data has been imported successfully.");
    Ok(())
}
