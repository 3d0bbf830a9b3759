use assert_cmd::Command;
use regex::Regex;
use std::fs;
use tempfile::TempDir;

struct CmdOutput {
    code: Option<i32>,
    stdout: String,
    stderr: String,
}

fn run_deco_strip(args: &[&str]) -> CmdOutput {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("deco-strip"));
    cmd.args(args).env("NO_COLOR", "1").env("RUST_BACKTRACE", "0");

    let output = cmd.output().expect("command should run");
    CmdOutput {
        code: output.status.code(),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    }
}

/// Redact temp-dir paths so assertions stay stable across runs.
fn normalize_tmp_paths(text: &str) -> String {
    let re_tmp = Regex::new(r"/tmp/[^\s]+").unwrap();
    re_tmp.replace_all(text, "<TMP>").to_string()
}

fn expected_person_rewrite() -> String {
    let src = fs::read_to_string("tests/fixtures/person.ts").unwrap();
    src.replace("{\n        return 'yeah';\n    }", "{}")
        .replace("{\n        return 'nah';\n    }", "{}")
}

#[test]
fn help_lists_both_modes() {
    let out = run_deco_strip(&["--help"]);
    assert_eq!(out.code, Some(0));
    assert!(out.stdout.contains("inspect"));
    assert!(out.stdout.contains("rewrite"));
}

#[test]
fn inspect_reports_each_match_with_line_and_column() {
    let out = run_deco_strip(&["inspect", "tests/fixtures/person.ts"]);

    assert_eq!(out.code, Some(0));
    assert_eq!(
        out.stdout,
        "deco-strip: inspect\n\
         marker: remote\n\
         tests/fixtures/person.ts (12,5): annotated code removed\n\
         tests/fixtures/person.ts (17,5): annotated code removed\n\
         --- inspect summary ---\n\
         files processed: 1\n\
         files failed:    0\n\
         matches: 2\n\
         errors reported: 0\n"
    );
    assert_eq!(out.stderr, "");
}

#[test]
fn inspect_is_idempotent() {
    let first = run_deco_strip(&["inspect", "tests/fixtures/person.ts"]);
    let second = run_deco_strip(&["inspect", "tests/fixtures/person.ts"]);

    assert_eq!(first.code, Some(0));
    assert_eq!(first.stdout, second.stdout);
    assert_eq!(first.stderr, second.stderr);
}

#[test]
fn inspect_honors_a_custom_marker() {
    let out = run_deco_strip(&[
        "inspect",
        "tests/fixtures/person.ts",
        "--marker",
        "supertypeClass",
    ]);

    assert_eq!(out.code, Some(0));
    // The class decorator matches but a class is not a method, so the
    // excisor reports a missing body instead of recording a rewrite.
    assert!(out.stdout.contains("has no body"));
    assert!(!out.stdout.contains("annotated code removed"));
}

#[test]
fn rewrite_strips_bodies_but_keeps_delimiters() {
    let out = run_deco_strip(&["rewrite", "tests/fixtures/person.ts"]);

    assert_eq!(out.code, Some(0));
    assert_eq!(out.stdout, expected_person_rewrite());
    assert!(out.stdout.contains("doSomethingOnServer(): string {}"));
    assert!(out.stdout.contains("doSomethingOnClient(): string {}"));
    // The untouched method survives verbatim.
    assert!(out.stdout.contains("return 'sure';"));
    // Diagnostics go to stderr so stdout stays pure rewritten text.
    assert!(out.stderr.contains("(12,5): annotated code removed"));
    assert!(out.stderr.contains("(17,5): annotated code removed"));
}

#[test]
fn rewrite_without_matches_round_trips_byte_identical() {
    let src = fs::read_to_string("tests/fixtures/no_match.ts").unwrap();
    let out = run_deco_strip(&["rewrite", "tests/fixtures/no_match.ts"]);

    assert_eq!(out.code, Some(0));
    assert_eq!(out.stdout, src);
    assert!(out.stderr.contains("bodies stripped: 0"));
}

#[test]
fn rewrite_skips_a_bodyless_method_but_strips_its_sibling() {
    let out = run_deco_strip(&["rewrite", "tests/fixtures/missing_body.ts"]);

    // Missing body is reported but not fatal: exit status stays zero.
    assert_eq!(out.code, Some(0));
    assert!(out.stderr.contains("has no body"));
    assert!(out.stderr.contains("(5,5): annotated code removed"));
    assert!(out.stdout.contains("pong(): void {}"));
    assert!(out.stdout.contains("ping(): void;"));
}

#[test]
fn parse_failure_fails_the_run_but_not_the_batch() {
    let out = run_deco_strip(&[
        "rewrite",
        "tests/fixtures/broken.ts",
        "tests/fixtures/person.ts",
    ]);

    // The broken file is reported and produces no output; the good file is
    // still rewritten in full.
    assert_eq!(out.code, Some(1));
    assert!(out.stderr.contains("parse failure"));
    assert_eq!(out.stdout, expected_person_rewrite());
    assert!(out.stderr.contains("files failed:    1"));
}

#[test]
fn rewrite_in_place_overwrites_the_input() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("person.ts");
    fs::copy("tests/fixtures/person.ts", &target).unwrap();

    let out = run_deco_strip(&["rewrite", target.to_str().unwrap(), "--in-place"]);

    assert_eq!(out.code, Some(0));
    assert_eq!(out.stdout, "", "in-place mode writes nothing to stdout");
    assert_eq!(fs::read_to_string(&target).unwrap(), expected_person_rewrite());

    assert_eq!(
        normalize_tmp_paths(&out.stderr),
        "deco-strip: rewrite\n\
         marker: remote\n\
         <TMP> (12,5): annotated code removed\n\
         <TMP> (17,5): annotated code removed\n\
         --- rewrite summary ---\n\
         files processed: 1\n\
         files failed:    0\n\
         bodies stripped: 2\n\
         errors reported: 0\n"
    );
}

#[test]
fn rewrite_out_dir_leaves_the_input_alone() {
    let dir = TempDir::new().unwrap();
    let out_dir = dir.path().join("out");

    let before = fs::read_to_string("tests/fixtures/person.ts").unwrap();
    let out = run_deco_strip(&[
        "rewrite",
        "tests/fixtures/person.ts",
        "--out-dir",
        out_dir.to_str().unwrap(),
    ]);

    assert_eq!(out.code, Some(0));
    assert_eq!(
        fs::read_to_string(out_dir.join("person.ts")).unwrap(),
        expected_person_rewrite()
    );
    assert_eq!(
        fs::read_to_string("tests/fixtures/person.ts").unwrap(),
        before,
        "input file is untouched"
    );
}

#[test]
fn json_report_is_machine_readable_stdout() {
    let out = run_deco_strip(&["rewrite", "tests/fixtures/person.ts", "--json"]);

    assert_eq!(out.code, Some(0));
    let report: serde_json::Value =
        serde_json::from_str(&out.stdout).expect("stdout should be pure JSON");

    assert_eq!(report["tool"], "deco-strip");
    assert_eq!(report["marker"], "remote");
    assert_eq!(report["summary"]["rewrites"], 2);
    assert_eq!(report["summary"]["files_failed"], 0);
    assert_eq!(report["files"][0]["file"], "tests/fixtures/person.ts");
    assert_eq!(report["files"][0]["records"][0]["message"], "annotated code removed");
}

#[test]
fn missing_input_file_is_reported_and_fails_the_run() {
    let out = run_deco_strip(&["inspect", "tests/fixtures/does_not_exist.ts"]);

    assert_eq!(out.code, Some(1));
    assert!(out.stderr.contains("failed to read"));
}
