use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const VALID: &str = "%start s\n%%\ns: \"a\" t;\nt: ;\n";
const BROKEN: &str = "%start s\n%%\ns: \"a\"\nt: ;\nu \"b\";\n";

fn write_grammar(dir: &TempDir, name: &str, source: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, source).unwrap();
    path
}

#[test]
fn list_formats() {
    let mut cmd = cargo_bin_cmd!("par");
    cmd.arg("--list-formats");

    let output_pred = predicate::str::contains("Available formats:")
        .and(predicate::str::contains("token-raw-simple"))
        .and(predicate::str::contains("ast-treeviz"))
        .and(predicate::str::contains("ast-par"));

    cmd.assert().success().stdout(output_pred);
}

#[test]
fn renders_treeviz_by_default() {
    let dir = TempDir::new().unwrap();
    let path = write_grammar(&dir, "ok.par", VALID);

    let mut cmd = cargo_bin_cmd!("par");
    cmd.current_dir(dir.path()).arg(&path);

    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("⧉ 2 productions, start s"))
        .stderr(predicate::str::is_empty());
}

#[test]
fn renders_tokens() {
    let dir = TempDir::new().unwrap();
    let path = write_grammar(&dir, "ok.par", VALID);

    let mut cmd = cargo_bin_cmd!("par");
    cmd.current_dir(dir.path())
        .arg(&path)
        .arg("--format")
        .arg("token-simple");

    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("Start 0..6 \"%start\""));
}

#[test]
fn canonical_par_output() {
    let dir = TempDir::new().unwrap();
    let path = write_grammar(&dir, "ok.par", "%start s %% s :\"a\"   t ; t:;");

    let mut cmd = cargo_bin_cmd!("par");
    cmd.current_dir(dir.path()).arg(&path).args(["-f", "ast-par"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("s: \"a\" t;\nt:;\n"));
}

#[test]
fn check_passes_silently() {
    let dir = TempDir::new().unwrap();
    let path = write_grammar(&dir, "ok.par", VALID);

    let mut cmd = cargo_bin_cmd!("par");
    cmd.current_dir(dir.path()).arg(&path).arg("--check");

    cmd.assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::is_empty());
}

#[test]
fn check_reports_every_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = write_grammar(&dir, "broken.par", BROKEN);

    let mut cmd = cargo_bin_cmd!("par");
    cmd.current_dir(dir.path()).arg(&path).arg("--check");

    let output = cmd.assert().failure().code(1).get_output().stderr.clone();
    let stderr = String::from_utf8(output).unwrap();
    assert_eq!(stderr.matches("(parse-error)").count(), 2, "{}", stderr);
    assert!(stderr.contains("broken.par: error [parser]"));
}

#[test]
fn no_recover_stops_at_first_error() {
    let dir = TempDir::new().unwrap();
    let path = write_grammar(&dir, "broken.par", BROKEN);

    let mut cmd = cargo_bin_cmd!("par");
    cmd.current_dir(dir.path())
        .arg(&path)
        .arg("--check")
        .arg("--no-recover");

    let output = cmd.assert().failure().code(1).get_output().stderr.clone();
    let stderr = String::from_utf8(output).unwrap();
    assert_eq!(stderr.matches("(parse-error)").count(), 1, "{}", stderr);
}

#[test]
fn check_fails_on_lint_errors() {
    let dir = TempDir::new().unwrap();
    let path = write_grammar(&dir, "undefined.par", "%start s %% s: missing;");

    let mut cmd = cargo_bin_cmd!("par");
    cmd.current_dir(dir.path()).arg(&path).arg("--check");

    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("(undefined-non-terminal)"));
}

#[test]
fn rendering_reports_lints_without_failing() {
    let dir = TempDir::new().unwrap();
    let path = write_grammar(&dir, "undefined.par", "%start s %% s: missing;");

    let mut cmd = cargo_bin_cmd!("par");
    cmd.current_dir(dir.path()).arg(&path).args(["-f", "ast-tag"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("<non-terminal>missing</non-terminal>"))
        .stderr(predicate::str::contains("(undefined-non-terminal)"));
}

#[test]
fn unknown_format_is_a_usage_error() {
    let dir = TempDir::new().unwrap();
    let path = write_grammar(&dir, "ok.par", VALID);

    let mut cmd = cargo_bin_cmd!("par");
    cmd.current_dir(dir.path()).arg(&path).args(["--format", "ast-html"]);

    cmd.assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("--list-formats"));
}

#[test]
fn missing_file_fails() {
    let dir = TempDir::new().unwrap();

    let mut cmd = cargo_bin_cmd!("par");
    cmd.current_dir(dir.path()).arg("nope.par");

    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error reading file nope.par"));
}

#[test]
fn project_config_selects_the_format() {
    let dir = TempDir::new().unwrap();
    let path = write_grammar(&dir, "ok.par", VALID);
    fs::write(dir.path().join("par.toml"), "[output]\nformat = \"ast-tag\"\n").unwrap();

    let mut cmd = cargo_bin_cmd!("par");
    cmd.current_dir(dir.path()).arg(&path);

    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("<parol>2 productions, start s"));
}

#[test]
fn config_flag_disables_lints() {
    let dir = TempDir::new().unwrap();
    let path = write_grammar(&dir, "undefined.par", "%start s %% s: missing;");
    let config = dir.path().join("quiet.toml");
    fs::write(&config, "[lints]\nenabled = false\n").unwrap();

    let mut cmd = cargo_bin_cmd!("par");
    cmd.current_dir(dir.path())
        .arg(&path)
        .arg("--check")
        .arg("--config")
        .arg(&config);

    cmd.assert().success().stderr(predicate::str::is_empty());
}

#[test]
fn line_numbers_flag_prefixes_treeviz() {
    let dir = TempDir::new().unwrap();
    let path = write_grammar(&dir, "ok.par", VALID);

    let mut cmd = cargo_bin_cmd!("par");
    cmd.current_dir(dir.path()).arg(&path).arg("--line-numbers");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("01 ├─ § %start s"))
        .stdout(predicate::str::contains("03   ├─ ≔ s"));
}
