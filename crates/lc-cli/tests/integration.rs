#![allow(deprecated)]
use assert_cmd::Command;
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn lc(data: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("lc").unwrap();
    cmd.env("LC_DATA_DIR", data.path())
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

fn json(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.arg("--json").output().unwrap();
    assert!(output.status.success(), "command failed: {output:?}");
    serde_json::from_slice(&output.stdout).unwrap()
}

/// Create `<workspace>/<name>` with the given instance subdirectories.
fn project_root(workspace: &TempDir, name: &str, instances: &[&str]) -> PathBuf {
    let root = workspace.path().join(name);
    for ins in instances {
        std::fs::create_dir_all(root.join(ins)).unwrap();
    }
    std::fs::create_dir_all(&root).unwrap();
    root
}

/// Register `root` as the active project with the given instances.
fn activate(data: &TempDir, root: &Path, name: &str, instances: &[&str]) {
    lc(data)
        .args(["proj", "add"])
        .arg(root)
        .arg(name)
        .assert()
        .success();
    lc(data).args(["proj", "active", name]).assert().success();
    if !instances.is_empty() {
        lc(data).args(["dirs", "add"]).args(instances).assert().success();
    }
}

fn instances(data: &TempDir) -> Vec<String> {
    let listing = json(lc(data).args(["dirs", "view"]));
    listing["entries"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["name"].as_str().unwrap().to_string())
        .collect()
}

// ---------------------------------------------------------------------------
// lc proj
// ---------------------------------------------------------------------------

#[test]
fn proj_view_on_empty_registry_fails() {
    let data = TempDir::new().unwrap();
    lc(&data)
        .args(["proj", "view"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No project has been found in the list."));
}

#[test]
fn proj_add_and_view() {
    let data = TempDir::new().unwrap();
    let ws = TempDir::new().unwrap();
    let root = project_root(&ws, "project1", &[]);

    lc(&data)
        .args(["proj", "add"])
        .arg(&root)
        .assert()
        .success()
        .stdout(predicate::str::contains("project1 is added to project list."));

    lc(&data)
        .args(["proj", "view"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[ ] project1:"))
        .stdout(predicate::str::contains(root.display().to_string()))
        .stdout(predicate::str::contains("Total 1 projects listed."));
}

#[test]
fn proj_add_rejects_relative_and_missing_paths() {
    let data = TempDir::new().unwrap();
    lc(&data)
        .args(["proj", "add", "relative/path"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("it should be absolute"));

    let ws = TempDir::new().unwrap();
    lc(&data)
        .args(["proj", "add"])
        .arg(ws.path().join("missing"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn proj_add_duplicate_fails() {
    let data = TempDir::new().unwrap();
    let ws = TempDir::new().unwrap();
    let root = project_root(&ws, "project1", &[]);

    lc(&data).args(["proj", "add"]).arg(&root).assert().success();
    lc(&data)
        .args(["proj", "add"])
        .arg(&root)
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn proj_active_unknown_fails() {
    let data = TempDir::new().unwrap();
    lc(&data)
        .args(["proj", "active", "doesnotexists"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Project doesnotexists is not found in the list",
        ));
}

#[test]
fn proj_rename_follows_active() {
    let data = TempDir::new().unwrap();
    let ws = TempDir::new().unwrap();
    let root = project_root(&ws, "project2", &["pro2ins1"]);
    activate(&data, &root, "project2", &["pro2ins1"]);

    lc(&data)
        .args(["proj", "rename", "project2", "custom_name"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Project project2 is renamed to custom_name.",
        ));

    let projects = json(lc(&data).args(["proj", "view"]));
    let projects = projects.as_array().unwrap();
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0]["name"], "custom_name");
    assert_eq!(projects[0]["active"], true);
    assert_eq!(instances(&data), vec!["pro2ins1"]);
}

#[test]
fn proj_rename_to_blank_name_fails() {
    let data = TempDir::new().unwrap();
    let ws = TempDir::new().unwrap();
    let root = project_root(&ws, "project2", &[]);
    activate(&data, &root, "project2", &[]);

    lc(&data)
        .args(["proj", "rename", "project2", ""])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid project name"));

    let projects = json(lc(&data).args(["proj", "view"]));
    assert_eq!(projects[0]["name"], "project2");
    assert_eq!(projects[0]["active"], true);
}

#[test]
fn proj_clear_respects_confirmation() {
    let data = TempDir::new().unwrap();
    let ws = TempDir::new().unwrap();
    let root = project_root(&ws, "project1", &[]);
    activate(&data, &root, "project1", &[]);

    lc(&data)
        .args(["proj", "clear", "project1"])
        .write_stdin("no\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Aborted! Nothing is changed."));
    lc(&data)
        .args(["proj", "view"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[✓] project1:"));

    lc(&data)
        .args(["proj", "clear", "project1"])
        .write_stdin("y\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("project1 is removed from LordCommander."));
    lc(&data).args(["proj", "view"]).assert().failure();
    lc(&data)
        .args(["dirs", "view"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no active project"));
}

// ---------------------------------------------------------------------------
// lc dirs
// ---------------------------------------------------------------------------

#[test]
fn dirs_add_without_active_project_fails() {
    let data = TempDir::new().unwrap();
    lc(&data)
        .args(["dirs", "add", "web"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "May be no active project has been set.",
        ));
}

#[test]
fn dirs_add_without_names_fails() {
    let data = TempDir::new().unwrap();
    lc(&data)
        .args(["dirs", "add"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No argument has been provided."));
}

#[test]
fn dirs_add_rejects_paths() {
    let data = TempDir::new().unwrap();
    let ws = TempDir::new().unwrap();
    let root = project_root(&ws, "project1", &[]);
    activate(&data, &root, "project1", &["web"]);

    for bad in ["../escape", "a/b", ""] {
        lc(&data)
            .args(["dirs", "add", "api", bad])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid directory name"));
    }
    assert_eq!(instances(&data), vec!["web"]);
}

#[test]
fn dirs_add_is_idempotent_and_listed() {
    let data = TempDir::new().unwrap();
    let ws = TempDir::new().unwrap();
    let root = project_root(&ws, "project1", &[]);
    activate(&data, &root, "project1", &["web", "api"]);

    lc(&data)
        .args(["dirs", "add", "web", "cron"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Success!"))
        .stdout(predicate::str::contains("- cron (2)"))
        .stdout(predicate::str::contains("Total 3 directories listed."));

    assert_eq!(instances(&data), vec!["web", "api", "cron"]);

    lc(&data)
        .args(["dirs", "view", "--sort"])
        .assert()
        .success()
        .stdout(predicate::str::contains("- api (1)\n- cron (2)\n- web (0)"));
}

#[test]
fn dirs_clear_keys_skips_unknown() {
    let data = TempDir::new().unwrap();
    let ws = TempDir::new().unwrap();
    let root = project_root(&ws, "project1", &[]);
    activate(&data, &root, "project1", &["a", "b", "c"]);

    lc(&data)
        .args(["dirs", "clear", "b", "zzz"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removing b..."))
        .stdout(predicate::str::contains(
            "zzz is not found in the list! Skipping...",
        ));
    assert_eq!(instances(&data), vec!["a", "c"]);
}

#[test]
fn dirs_clear_full_needs_confirmation() {
    let data = TempDir::new().unwrap();
    let ws = TempDir::new().unwrap();
    let root = project_root(&ws, "project1", &[]);
    activate(&data, &root, "project1", &["a", "b"]);

    lc(&data)
        .args(["dirs", "clear", "--full"])
        .write_stdin("nope\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Aborted! Nothing is changed."));
    assert_eq!(instances(&data), vec!["a", "b"]);

    lc(&data)
        .args(["dirs", "clear", "--full"])
        .write_stdin("yes\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Directory list cleared!"));
    assert!(instances(&data).is_empty());
}

// ---------------------------------------------------------------------------
// lc run
// ---------------------------------------------------------------------------

#[test]
fn run_tallies_missing_file_and_directory() {
    let data = TempDir::new().unwrap();
    let ws = TempDir::new().unwrap();
    let root = project_root(&ws, "project1", &["present"]);
    std::fs::write(root.join("file.txt"), b"x").unwrap();
    activate(&data, &root, "project1", &["missing", "file.txt", "present"]);

    lc(&data)
        .args(["run", "touch marker"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Directory 'missing' is not found! Skipping..."))
        .stdout(predicate::str::contains("'file.txt' is not a directory. Skipping..."))
        .stdout(predicate::str::contains("and running 'touch marker'"))
        .stdout(predicate::str::contains("Successful run: 1"))
        .stdout(predicate::str::contains("Failed run: 2"));

    assert!(root.join("present/marker").exists());
}

#[test]
fn run_respects_slice_and_exclude() {
    let data = TempDir::new().unwrap();
    let ws = TempDir::new().unwrap();
    let names = ["a", "b", "c", "d"];
    let root = project_root(&ws, "project1", &names);
    activate(&data, &root, "project1", &names);

    lc(&data)
        .args(["run", "touch marker", "--li", "1", "--ui", "3", "--ex", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Successful run: 1"));

    for (name, expected) in [("a", false), ("b", true), ("c", false), ("d", false)] {
        assert_eq!(root.join(name).join("marker").exists(), expected, "{name}");
    }
}

#[test]
fn run_include_list() {
    let data = TempDir::new().unwrap();
    let ws = TempDir::new().unwrap();
    let names = ["a", "b", "c"];
    let root = project_root(&ws, "project1", &names);
    activate(&data, &root, "project1", &names);

    let summary = json(lc(&data).args(["run", "touch marker", "--inc", "0,2"]));
    assert_eq!(summary["succeeded"], 2);
    assert_eq!(summary["failed"], 0);
    assert!(root.join("a/marker").exists());
    assert!(!root.join("b/marker").exists());
    assert!(root.join("c/marker").exists());
}

#[test]
fn run_with_ex_and_inc_touches_nothing() {
    let data = TempDir::new().unwrap();
    let ws = TempDir::new().unwrap();
    let root = project_root(&ws, "project1", &["a", "b"]);
    activate(&data, &root, "project1", &["a", "b"]);

    lc(&data)
        .args(["run", "touch marker", "--ex", "0", "--inc", "1"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Successful run: 0"))
        .stderr(predicate::str::contains("You can not use --ex and --inc together."));

    assert!(!root.join("a/marker").exists());
    assert!(!root.join("b/marker").exists());
}

#[test]
fn run_rejects_non_integer_bounds() {
    let data = TempDir::new().unwrap();
    lc(&data)
        .args(["run", "true", "--li", "abc"])
        .assert()
        .failure();
}

#[test]
fn run_without_active_project_fails() {
    let data = TempDir::new().unwrap();
    lc(&data)
        .args(["run", "true"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no active project"));
}

#[test]
fn run_with_no_instances_warns() {
    let data = TempDir::new().unwrap();
    let ws = TempDir::new().unwrap();
    let root = project_root(&ws, "project1", &[]);
    activate(&data, &root, "project1", &[]);

    lc(&data)
        .args(["run", "true"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No instances have been found"))
        .stdout(predicate::str::contains("Failed run: 0"));
}

#[test]
fn run_with_unknown_shell_fails() {
    let data = TempDir::new().unwrap();
    let ws = TempDir::new().unwrap();
    let root = project_root(&ws, "project1", &["a"]);
    activate(&data, &root, "project1", &["a"]);
    std::fs::write(
        data.path().join("config.yaml"),
        "shell: definitely-not-a-shell-lc\n",
    )
    .unwrap();

    lc(&data)
        .args(["run", "true"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("was not found on PATH"));
}

// ---------------------------------------------------------------------------
// lc search / total / dump / restore
// ---------------------------------------------------------------------------

#[test]
fn search_and_total() {
    let data = TempDir::new().unwrap();
    let ws = TempDir::new().unwrap();
    let root = project_root(&ws, "project1", &[]);
    activate(&data, &root, "project1", &["a", "b", "c"]);

    lc(&data)
        .args(["search", "c"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Found! Index: 2"));
    lc(&data)
        .args(["search", "zzz"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Not found!"));
    lc(&data)
        .arg("total")
        .assert()
        .success()
        .stdout(predicate::str::contains("Total 3 directories listed."));
}

#[test]
fn dump_and_restore_roundtrip() {
    let data = TempDir::new().unwrap();
    let ws = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let root = project_root(&ws, "project1", &[]);
    activate(&data, &root, "project1", &["a", "b"]);

    let before = std::fs::read_to_string(data.path().join("lcdb.json")).unwrap();
    lc(&data)
        .arg("dump")
        .arg(out.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Data dumping successful."));
    let dump_file = out.path().join("lcdb_dump.json");
    assert!(dump_file.exists());

    lc(&data)
        .args(["proj", "rename", "project1", "other"])
        .assert()
        .success();

    lc(&data)
        .arg("restore")
        .arg(&dump_file)
        .arg("--yes")
        .assert()
        .success()
        .stdout(predicate::str::contains("Data has been imported successfully."));

    let after = std::fs::read_to_string(data.path().join("lcdb.json")).unwrap();
    let before: serde_json::Value = serde_json::from_str(&before).unwrap();
    let after: serde_json::Value = serde_json::from_str(&after).unwrap();
    assert_eq!(before, after);
}

#[test]
fn dump_into_missing_directory_fails() {
    let data = TempDir::new().unwrap();
    let ws = TempDir::new().unwrap();
    lc(&data)
        .arg("dump")
        .arg(ws.path().join("missing"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn restore_rejects_extra_top_level_keys() {
    let data = TempDir::new().unwrap();
    let ws = TempDir::new().unwrap();
    let root = project_root(&ws, "project1", &[]);
    activate(&data, &root, "project1", &["a"]);
    let before = std::fs::read_to_string(data.path().join("lcdb.json")).unwrap();

    let file = ws.path().join("bad.json");
    std::fs::write(&file, r#"{"active": "", "projects": {}, "extra": 1}"#).unwrap();

    lc(&data)
        .arg("restore")
        .arg(&file)
        .arg("--yes")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not a valid LordCommander backup"));

    let after = std::fs::read_to_string(data.path().join("lcdb.json")).unwrap();
    assert_eq!(before, after);
}

#[test]
fn restore_declined_keeps_data() {
    let data = TempDir::new().unwrap();
    let ws = TempDir::new().unwrap();
    let root = project_root(&ws, "project1", &[]);
    activate(&data, &root, "project1", &["a"]);

    let file = ws.path().join("empty.json");
    std::fs::write(&file, r#"{"active": "", "projects": {}}"#).unwrap();

    lc(&data)
        .arg("restore")
        .arg(&file)
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Aborted! Nothing is changed."));
    assert_eq!(instances(&data), vec!["a"]);
}

#[test]
fn declined_prompt_in_json_mode_stays_json() {
    let data = TempDir::new().unwrap();
    let ws = TempDir::new().unwrap();
    let root = project_root(&ws, "project1", &[]);
    activate(&data, &root, "project1", &["a"]);

    let output = lc(&data)
        .args(["dirs", "clear", "--full", "--json"])
        .write_stdin("n\n")
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value, serde_json::json!({ "declined": true }));
    assert_eq!(instances(&data), vec!["a"]);
}
