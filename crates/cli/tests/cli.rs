//! End-to-end tests for the mahkrab binary

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{Value, json};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn mahkrab() -> Command {
    let mut cmd = Command::cargo_bin("mahkrab").unwrap();
    cmd.env_remove("MAHKRAB_INTERPRETER")
        .env_remove("MAHKRAB_PROJECT_ROOT")
        .env("CC", "gcc");
    cmd
}

fn write_config(dir: &Path, config: Value) {
    fs::write(
        dir.join(".mahkrab.json"),
        serde_json::to_string_pretty(&config).unwrap(),
    )
    .unwrap();
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn test_derive_prints_script_contract() {
    let temp_dir = TempDir::new().unwrap();
    let src = temp_dir.path().join("hello.c");
    fs::write(&src, "#include <math.h>\nint main(void){return 0;}\n").unwrap();

    let output = mahkrab()
        .args(["derive", "--file"])
        .arg(&src)
        .arg("--cwd")
        .arg(temp_dir.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let payload: Value = serde_json::from_slice(&output.stdout).unwrap();
    let full = payload["full"].as_str().unwrap();
    assert!(full.starts_with("cd "));
    assert!(full.contains(" -lm && "));
    assert!(full.ends_with("&& ./build/hello"));
    assert_eq!(payload["run"], json!("./build/hello"));
    assert!(payload["compile"].as_str().unwrap().starts_with("gcc "));
}

#[test]
fn test_derive_missing_file_exits_with_code_2() {
    let temp_dir = TempDir::new().unwrap();

    mahkrab()
        .args(["derive", "--file"])
        .arg(temp_dir.path().join("missing.c"))
        .arg("--cwd")
        .arg(temp_dir.path())
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("ERROR: file not found"));
}

#[test]
fn test_configure_writes_executor_map_and_keeps_other_languages() {
    let temp_dir = TempDir::new().unwrap();
    let settings = temp_dir.path().join("settings.json");
    write_config(
        temp_dir.path(),
        json!({"executor": {"settings_path": "settings.json"}}),
    );
    fs::write(
        &settings,
        serde_json::to_string(&json!({
            "editor.tabSize": 4,
            "code-runner.executorMap": {"python": "python a.py"}
        }))
        .unwrap(),
    )
    .unwrap();
    let src = temp_dir.path().join("main.c");
    fs::write(&src, "int main(void){return 0;}\n").unwrap();

    mahkrab()
        .arg("configure")
        .arg(&src)
        .assert()
        .success()
        .stdout(predicate::str::contains("Code Runner command updated for C."));

    let written = read_json(&settings);
    assert_eq!(written["editor.tabSize"], json!(4));
    assert_eq!(written["code-runner.runInTerminal"], json!(true));
    let map = written["code-runner.executorMap"].as_object().unwrap();
    assert_eq!(map["python"], json!("python a.py"));
    assert!(map["c"].as_str().unwrap().ends_with("&& ./build/main"));
}

#[test]
fn test_configure_ignores_other_languages() {
    let temp_dir = TempDir::new().unwrap();
    write_config(
        temp_dir.path(),
        json!({"executor": {"settings_path": "settings.json"}}),
    );
    let src = temp_dir.path().join("script.py");
    fs::write(&src, "print('hi')\n").unwrap();

    mahkrab()
        .arg("configure")
        .arg(&src)
        .assert()
        .success()
        .stdout(predicate::str::contains("nothing to do"));

    assert!(!temp_dir.path().join("settings.json").exists());
}

#[test]
fn test_configure_honours_language_id() {
    let temp_dir = TempDir::new().unwrap();
    write_config(
        temp_dir.path(),
        json!({"executor": {"settings_path": "settings.json"}}),
    );
    let src = temp_dir.path().join("prog");
    fs::write(&src, "int main(void){return 0;}\n").unwrap();

    mahkrab()
        .args(["configure", "--language-id", "c", "--trigger", "active"])
        .arg(&src)
        .assert()
        .success();

    let written = read_json(&temp_dir.path().join("settings.json"));
    assert!(written["code-runner.executorMap"]["c"].is_string());
}

#[cfg(unix)]
#[test]
fn test_configure_reports_malformed_resolver_output() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("resolver.sh"), "echo 'not json'\n").unwrap();
    write_config(
        temp_dir.path(),
        json!({
            "resolver": {"interpreter": "sh", "script": "resolver.sh"},
            "executor": {"settings_path": "settings.json"}
        }),
    );
    let src = temp_dir.path().join("main.c");
    fs::write(&src, "int main(void){return 0;}\n").unwrap();

    mahkrab()
        .arg("configure")
        .arg(&src)
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "MahkrabMaker: resolver did not return valid JSON",
        ));

    assert!(!temp_dir.path().join("settings.json").exists());
}

#[test]
fn test_configure_with_standalone_resolver_program() {
    let temp_dir = TempDir::new().unwrap();
    write_config(
        temp_dir.path(),
        json!({
            "resolver": {"program": env!("CARGO_BIN_EXE_mahkrab"), "args": ["derive"]},
            "executor": {"settings_path": "settings.json"}
        }),
    );
    let src = temp_dir.path().join("main.c");
    fs::write(&src, "#include <pthread.h>\nint main(void){return 0;}\n").unwrap();

    mahkrab().arg("configure").arg(&src).assert().success();

    let written = read_json(&temp_dir.path().join("settings.json"));
    let command = written["code-runner.executorMap"]["c"].as_str().unwrap();
    assert!(command.contains(" -pthread && "));
    assert!(command.ends_with("&& ./build/main"));
}

#[test]
fn test_configure_reports_missing_interpreter() {
    let temp_dir = TempDir::new().unwrap();
    write_config(
        temp_dir.path(),
        json!({
            "resolver": {"script": "main.py"},
            "executor": {"settings_path": "settings.json"}
        }),
    );
    let src = temp_dir.path().join("main.c");
    fs::write(&src, "int main(void){return 0;}\n").unwrap();

    mahkrab()
        .env("MAHKRAB_INTERPRETER", "mahkrab-no-such-python")
        .arg("configure")
        .arg(&src)
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "failed to start resolver (mahkrab-no-such-python)",
        ));
}

#[test]
fn test_show_prints_mapping_as_json() {
    let temp_dir = TempDir::new().unwrap();
    write_config(
        temp_dir.path(),
        json!({"executor": {"settings_path": "settings.json"}}),
    );
    fs::write(
        temp_dir.path().join("settings.json"),
        r#"{"code-runner.executorMap": {"c": "gcc a.c && ./a"}}"#,
    )
    .unwrap();

    let output = mahkrab()
        .args(["show", "--json"])
        .arg(temp_dir.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let mapping: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(mapping, json!({"c": "gcc a.c && ./a"}));
}

#[test]
fn test_init_refuses_to_overwrite_without_force() {
    let temp_dir = TempDir::new().unwrap();

    mahkrab()
        .args(["init", "--cwd"])
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Created config"));

    let config = read_json(&temp_dir.path().join(".mahkrab.json"));
    assert_eq!(config["resolver"]["interpreter"], json!("python"));
    assert_eq!(config["language"]["id"], json!("c"));

    mahkrab()
        .args(["init", "--cwd"])
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Config already exists"));

    mahkrab()
        .args(["init", "--force", "--script", "tools/main.py", "--cwd"])
        .arg(temp_dir.path())
        .assert()
        .success();
    let config = read_json(&temp_dir.path().join(".mahkrab.json"));
    assert_eq!(config["resolver"]["script"], json!("tools/main.py"));
}
