//! Config file handling through the binary

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const CITEREF: &str = "LaTeX Warning: Citation `knuth84' on page 1 undefined on input line 5.\n";

fn filter_cmd(home: &TempDir) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_tex-filter"));
    cmd.env("HOME", home.path()).env_remove("TEX_FILTER_LOG");
    cmd
}

/// Write `~/.config/tex-filter/config.toml` under the fake HOME.
fn write_home_config(home: &TempDir, contents: &str) -> PathBuf {
    let dir = home.path().join(".config").join("tex-filter");
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join("config.toml");
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn home_config_is_picked_up() {
    let home = TempDir::new().unwrap();
    write_home_config(
        &home,
        "texmf_root = \"/opt/texlive/2020\"\n[filters]\nciteref = true\n",
    );
    filter_cmd(&home)
        .write_stdin(CITEREF)
        .assert()
        .success()
        .stdout("");
}

#[test]
fn flags_override_home_config() {
    let home = TempDir::new().unwrap();
    write_home_config(
        &home,
        "texmf_root = \"/opt/texlive/2020\"\n[filters]\nciteref = true\n",
    );
    filter_cmd(&home)
        .args(["--citeref", "0"])
        .write_stdin(CITEREF)
        .assert()
        .success()
        .stdout(CITEREF);
}

#[test]
fn detect_error_from_config() {
    let home = TempDir::new().unwrap();
    write_home_config(&home, "detect_error = false\n[filters]\npaths = false\n");
    filter_cmd(&home)
        .write_stdin("! Undefined control sequence.\n")
        .assert()
        .success();

    filter_cmd(&home)
        .args(["--detect-error", "1"])
        .write_stdin("! Undefined control sequence.\n")
        .assert()
        .code(1);
}

#[test]
fn explicit_config_replaces_home_config() {
    let home = TempDir::new().unwrap();
    write_home_config(&home, "[filters]\nciteref = true\n");
    let other = home.path().join("other.toml");
    fs::write(&other, "[filters]\npaths = false\n").unwrap();

    filter_cmd(&home)
        .arg("--config")
        .arg(&other)
        .write_stdin(CITEREF)
        .assert()
        .success()
        .stdout(CITEREF);
}

#[test]
fn unknown_filter_in_config_fails() {
    let home = TempDir::new().unwrap();
    let path = home.path().join("bad.toml");
    fs::write(&path, "[filters]\nfull_hbox = true\n").unwrap();

    filter_cmd(&home)
        .arg("--config")
        .arg(&path)
        .write_stdin("Hello\n")
        .assert()
        .failure()
        .stdout("")
        .stderr(predicate::str::contains("full_hbox"));
}

#[test]
fn missing_explicit_config_fails() {
    let home = TempDir::new().unwrap();
    filter_cmd(&home)
        .args(["--config", "/nonexistent/tex-filter.toml"])
        .write_stdin("Hello\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read config file"));
}
