//! End-to-end tests for the tex-filter binary.
//!
//! Every run gets an empty HOME so a developer's own config file cannot
//! leak into the results.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const ROOT: &str = "/opt/texlive/2020";

/// Helper to build a tex-filter command with an isolated HOME
fn filter_cmd(home: &TempDir) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_tex-filter"));
    cmd.env("HOME", home.path())
        .env("NO_COLOR", "1")
        .env_remove("TEX_FILTER_LOG");
    cmd
}

// ── Filtering ───────────────────────────────────────────────────────

#[test]
fn filters_stdin_to_stdout() {
    let home = TempDir::new().unwrap();
    filter_cmd(&home)
        .args(["--texmf-root", ROOT])
        .write_stdin("This is pdfTeX, Version 3.14\nHello\n[1]\n")
        .assert()
        .success()
        .stdout("Hello\n");
}

#[test]
fn stubs_paths_under_given_root() {
    let home = TempDir::new().unwrap();
    filter_cmd(&home)
        .args(["--texmf-root", "/opt/texlive/2020/"])
        .write_stdin("(/opt/texlive/2020/texmf-dist/tex/latex/foo/foo.sty Some message)\n")
        .assert()
        .success()
        .stdout("Some message\n");
}

#[test]
fn flags_toggle_rules() {
    let home = TempDir::new().unwrap();
    filter_cmd(&home)
        .args(["--texmf-root", ROOT, "--empty-lines", "0", "--page-numbers", "0"])
        .write_stdin("a\n\n\n[2]\n")
        .assert()
        .success()
        .stdout("a\n\n[2]\n");
}

#[test]
fn empty_input_gives_empty_output() {
    let home = TempDir::new().unwrap();
    filter_cmd(&home)
        .args(["--texmf-root", ROOT])
        .write_stdin("")
        .assert()
        .success()
        .stdout("");
}

// ── Exit status ─────────────────────────────────────────────────────

#[test]
fn fatal_error_sets_exit_status() {
    let home = TempDir::new().unwrap();
    filter_cmd(&home)
        .args(["--texmf-root", ROOT])
        .write_stdin("! Undefined control sequence.\n")
        .assert()
        .code(1)
        .stdout("! Undefined control sequence.\n");
}

#[test]
fn detect_error_off_keeps_success() {
    let home = TempDir::new().unwrap();
    filter_cmd(&home)
        .args(["--texmf-root", ROOT, "--detect-error", "0"])
        .write_stdin("! Undefined control sequence.\n")
        .assert()
        .success()
        .stdout("! Undefined control sequence.\n");
}

// ── Installation root ───────────────────────────────────────────────

#[test]
fn paths_off_needs_no_kpsewhich() {
    let home = TempDir::new().unwrap();
    filter_cmd(&home)
        .env("PATH", home.path())
        .args(["--paths", "0"])
        .write_stdin("Hello\n")
        .assert()
        .success()
        .stdout("Hello\n");
}

#[test]
fn missing_kpsewhich_is_reported() {
    let home = TempDir::new().unwrap();
    filter_cmd(&home)
        .env("PATH", home.path())
        .write_stdin("Hello\n")
        .assert()
        .failure()
        .stdout("")
        .stderr(predicate::str::contains("Could not locate the TeX installation"))
        .stderr(predicate::str::contains("kpsewhich"));
}

#[test]
fn filesystem_root_is_rejected_as_texmf_root() {
    let home = TempDir::new().unwrap();
    filter_cmd(&home)
        .args(["--texmf-root", "/"])
        .write_stdin("(/home/me/texmf-dist/tex/latex/mine/mine.sty loaded)\n")
        .assert()
        .failure()
        .stdout("")
        .stderr(predicate::str::contains("Invalid installation root"));
}

#[test]
fn relative_texmf_root_is_rejected() {
    let home = TempDir::new().unwrap();
    filter_cmd(&home)
        .args(["--texmf-root", "texlive/2020"])
        .write_stdin("Hello\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("absolute"));
}

// ── Command line ────────────────────────────────────────────────────

#[test]
fn unknown_flag_is_usage_error() {
    let home = TempDir::new().unwrap();
    filter_cmd(&home)
        .args(["--full-hbox", "1"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--full-hbox"));
}

#[test]
fn toggle_value_must_be_zero_or_one() {
    let home = TempDir::new().unwrap();
    filter_cmd(&home)
        .args(["--citeref", "yes"])
        .assert()
        .code(2);
}

#[test]
fn help_lists_every_rule_flag() {
    let home = TempDir::new().unwrap();
    let assert = filter_cmd(&home).arg("--help").assert().success();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).into_owned();
    for spec in tex_filter::filter::REGISTRY {
        assert!(stdout.contains(&format!("--{}", spec.flag)), "--{}", spec.flag);
    }
    assert!(stdout.contains("--detect-error"));
}

#[test]
fn list_filters_shows_effective_values() {
    let home = TempDir::new().unwrap();
    filter_cmd(&home)
        .args(["--list-filters", "--citeref", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--relative-paths 0"))
        .stdout(predicate::str::contains("1*"))
        .stdout(predicate::str::contains("--paths"));
}

#[test]
fn completions_are_generated() {
    let home = TempDir::new().unwrap();
    filter_cmd(&home)
        .args(["--completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("tex-filter"));
}
