mod common;

use assert_cmd::cargo;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::tempdir;

use common::{fixture_copy, snapshot};

fn write_cfg(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("config.xml");
    fs::write(&path, format!("<config>{body}</config>")).unwrap();
    path
}

fn smart_rename(cfg: &Path, args: &[&str]) -> Output {
    let me = cargo::cargo_bin!("smart_rename");
    Command::new(me)
        .env("SMART_RENAME_CONFIG", cfg)
        .args(args)
        .output()
        .expect("spawn binary")
}

fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).into_owned()
}

fn stderr(out: &Output) -> String {
    String::from_utf8_lossy(&out.stderr).into_owned()
}

#[test]
fn list_prints_numbered_deduplicated_pairs() {
    let td = tempdir().unwrap();
    let cfg = write_cfg(td.path(), "");
    let out = smart_rename(&cfg, &["-f", "CustomerAccess", "-r", "ClientAccess", "--list"]);

    assert!(out.status.success(), "stderr: {}", stderr(&out));
    let text = stdout(&out);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 11, "{text}");
    assert_eq!(lines[0], " 0  CustomerAccess -> ClientAccess");
    assert!(text.contains("customer_access -> client_access"));
    assert!(text.contains("CUSTOMER ACCESS -> CLIENT ACCESS"));
}

#[test]
fn list_honors_selection() {
    let td = tempdir().unwrap();
    let cfg = write_cfg(td.path(), "");
    let out = smart_rename(
        &cfg,
        &["-f", "CustomerAccess", "-r", "ClientAccess", "--list", "-s", "3,0"],
    );

    assert!(out.status.success(), "stderr: {}", stderr(&out));
    let text = stdout(&out);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines, vec!["0  customer_access -> client_access", "1  CustomerAccess -> ClientAccess"]);
}

#[test]
fn selection_out_of_range_fails() {
    let td = tempdir().unwrap();
    let cfg = write_cfg(td.path(), "");
    let out = smart_rename(&cfg, &["-f", "a", "-r", "b", "--literal", "--list", "-s", "1"]);

    assert!(!out.status.success());
    assert!(stderr(&out).contains("out of range"), "stderr: {}", stderr(&out));
}

#[test]
fn empty_phrase_is_rejected() {
    let td = tempdir().unwrap();
    let cfg = write_cfg(td.path(), "");
    let out = smart_rename(&cfg, &["-f", "   ", "-r", "b", "--list"]);

    assert!(!out.status.success());
    assert!(stderr(&out).contains("find phrase is empty"), "stderr: {}", stderr(&out));
}

#[test]
fn dry_run_reports_without_touching_tree() {
    let td = tempdir().unwrap();
    let cfg = write_cfg(td.path(), "");
    let work = td.path().join("work");
    fs::create_dir(&work).unwrap();
    let root = fixture_copy(&work);
    let before = snapshot(&work);

    let out = smart_rename(
        &cfg,
        &["-f", "CustomerAccess", "-r", "ClientAccess", "--dry-run", root.to_str().unwrap()],
    );

    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert_eq!(snapshot(&work), before);
    let text = stdout(&out);
    assert!(text.contains("would rename:"), "{text}");
    assert!(text.contains("(dry run)"), "{text}");
}

#[test]
fn run_renames_and_rewrites_tree() {
    let td = tempdir().unwrap();
    let cfg = write_cfg(td.path(), "");
    let work = td.path().join("work");
    fs::create_dir(&work).unwrap();
    let root = fixture_copy(&work);

    let out = smart_rename(&cfg, &["-f", "CustomerAccess", "-r", "ClientAccess", root.to_str().unwrap()]);

    assert!(out.status.success(), "stderr: {}", stderr(&out));
    let js = work.join("clientaccess").join("ClientAccess.js");
    assert!(fs::read_to_string(js).unwrap().contains("export class ClientAccess"));
    assert!(stdout(&out).contains("1 directory, 2 files renamed"), "{}", stdout(&out));
}

#[test]
fn config_file_defaults_apply() {
    let td = tempdir().unwrap();
    let cfg = write_cfg(td.path(), "<rename_directories>false</rename_directories><glob>*.test.js</glob>");
    let work = td.path().join("work");
    fs::create_dir(&work).unwrap();
    let root = fixture_copy(&work);

    let out = smart_rename(&cfg, &["-f", "CustomerAccess", "-r", "ClientAccess", root.to_str().unwrap()]);

    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert!(root.is_dir(), "directory rename disabled by config");
    assert!(root.join("ClientAccess.test.js").is_file());
    assert!(root.join("CustomerAccess.js").is_file(), "glob from config excludes it");
}

#[test]
fn cli_glob_overrides_config_glob() {
    let td = tempdir().unwrap();
    let cfg = write_cfg(td.path(), "<glob>*.md</glob>");
    let file = td.path().join("a.js");
    fs::write(&file, "foo").unwrap();

    let out = smart_rename(
        &cfg,
        &["-f", "foo", "-r", "bar", "--literal", "-g", "*.js", file.to_str().unwrap()],
    );

    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert_eq!(fs::read_to_string(&file).unwrap(), "bar");
}

#[test]
fn conflict_fails_with_structured_kind() {
    let td = tempdir().unwrap();
    let cfg = write_cfg(td.path(), "");
    let tree = td.path().join("tree");
    fs::create_dir(&tree).unwrap();
    fs::write(tree.join("foo.txt"), "1").unwrap();
    fs::write(tree.join("bar.txt"), "2").unwrap();

    let out = smart_rename(
        &cfg,
        &["-f", "foo", "-r", "bar", "--literal", "--json", tree.to_str().unwrap()],
    );

    assert!(!out.status.success());
    let err = stderr(&out);
    let kinds: Vec<String> = err
        .lines()
        .filter_map(|l| serde_json::from_str::<serde_json::Value>(l).ok())
        .filter_map(|v| v["fields"]["kind"].as_str().map(str::to_string))
        .collect();
    assert_eq!(kinds, vec!["target_exists".to_string()], "stderr: {err}");
    assert_eq!(fs::read_to_string(tree.join("bar.txt")).unwrap(), "2");
}

#[test]
fn conflict_skip_completes() {
    let td = tempdir().unwrap();
    let cfg = write_cfg(td.path(), "");
    let tree = td.path().join("tree");
    fs::create_dir(&tree).unwrap();
    fs::write(tree.join("foo.txt"), "1").unwrap();
    fs::write(tree.join("bar.txt"), "2").unwrap();

    let out = smart_rename(
        &cfg,
        &["-f", "foo", "-r", "bar", "--literal", "--on-conflict", "skip", tree.to_str().unwrap()],
    );

    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert!(stdout(&out).contains("skipped (target exists)"), "{}", stdout(&out));
    assert!(tree.join("foo.txt").is_file());
}

#[test]
fn json_logs_carry_rename_fields() {
    let td = tempdir().unwrap();
    let cfg = write_cfg(td.path(), "");
    let file = td.path().join("foo.txt");
    fs::write(&file, "x").unwrap();

    let out = smart_rename(
        &cfg,
        &["-f", "foo", "-r", "bar", "--literal", "--json", file.to_str().unwrap()],
    );

    assert!(out.status.success(), "stderr: {}", stderr(&out));
    let events: Vec<serde_json::Value> = stderr(&out)
        .lines()
        .filter_map(|l| serde_json::from_str(l).ok())
        .collect();
    let renamed = events
        .iter()
        .find(|v| v["fields"]["message"] == "renamed")
        .expect("a 'renamed' event");
    assert_eq!(renamed["level"], "INFO");
    assert!(renamed["fields"]["to"].as_str().unwrap().ends_with("bar.txt"));
}

#[test]
fn json_run_prints_summary_object() {
    let td = tempdir().unwrap();
    let cfg = write_cfg(td.path(), "");
    let file = td.path().join("foo.txt");
    fs::write(&file, "foo").unwrap();

    let out = smart_rename(
        &cfg,
        &["-f", "foo", "-r", "bar", "--literal", "--json", "-n", file.to_str().unwrap()],
    );

    assert!(out.status.success(), "stderr: {}", stderr(&out));
    let summary: serde_json::Value = serde_json::from_str(stdout(&out).trim()).unwrap();
    assert_eq!(summary["dry_run"], true);
    assert_eq!(summary["renamed"][0]["kind"], "file");
    assert!(summary["renamed"][0]["to"].as_str().unwrap().ends_with("bar.txt"));
    assert_eq!(summary["replaced"].as_array().unwrap().len(), 1);
    assert!(file.is_file());
}

#[test]
fn quiet_level_suppresses_info_logs() {
    let td = tempdir().unwrap();
    let cfg = write_cfg(td.path(), "<log_level>quiet</log_level>");
    let file = td.path().join("foo.txt");
    fs::write(&file, "x").unwrap();

    let out = smart_rename(&cfg, &["-f", "foo", "-r", "bar", "--literal", file.to_str().unwrap()]);

    assert!(out.status.success());
    assert!(!stderr(&out).contains("renamed"), "stderr: {}", stderr(&out));
}

#[test]
fn invalid_glob_is_reported() {
    let td = tempdir().unwrap();
    let cfg = write_cfg(td.path(), "");
    let out = smart_rename(&cfg, &["-f", "a", "-r", "b", "-g", "[", td.path().to_str().unwrap()]);

    assert!(!out.status.success());
    assert!(stderr(&out).contains("Invalid glob"), "stderr: {}", stderr(&out));
}

#[test]
fn missing_env_config_is_an_error() {
    let td = tempdir().unwrap();
    let out = smart_rename(&td.path().join("absent.xml"), &["-f", "a", "-r", "b", "--list"]);

    assert!(!out.status.success());
    assert!(stderr(&out).contains("SMART_RENAME_CONFIG"), "stderr: {}", stderr(&out));
}

#[test]
fn init_config_writes_loadable_template() {
    let td = tempdir().unwrap();
    let cfg = td.path().join("nested").join("config.xml");

    let out = smart_rename(&cfg, &["--init-config"]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert!(cfg.is_file());

    let again = smart_rename(&cfg, &["--init-config"]);
    assert!(!again.status.success(), "second init must not overwrite");

    let list = smart_rename(&cfg, &["-f", "a", "-r", "b", "--literal", "--list"]);
    assert!(list.status.success(), "stderr: {}", stderr(&list));
    assert_eq!(stdout(&list).trim(), "0  a -> b");
}

#[test]
fn print_config_names_env_path() {
    let td = tempdir().unwrap();
    let cfg = write_cfg(td.path(), "");
    let out = smart_rename(&cfg, &["--print-config"]);

    assert!(out.status.success());
    assert!(stdout(&out).contains(cfg.to_str().unwrap()), "{}", stdout(&out));
}
