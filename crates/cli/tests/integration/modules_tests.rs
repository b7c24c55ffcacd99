//! Tests for the `modbox modules` command.

use predicates::prelude::*;

use super::common::TestEnv;

const CONFIG: &str = r#"
modules:
  zlib:
    configure: cmake ..
    build: [make, [make install]]
  app:
    build: make
    run: ./app
"#;

#[test]
fn lists_modules_with_phases() {
  let env = TestEnv::new(CONFIG, &["zlib", "app"]);

  env
    .modbox_cmd()
    .arg("modules")
    .assert()
    .success()
    .stdout(predicate::str::contains("zlib configure, build (unconfigured, 3 command(s))"))
    .stdout(predicate::str::contains("app build, run (unconfigured, 2 command(s))"));
}

#[test]
fn json_output_reports_state() {
  let env = TestEnv::new(CONFIG, &["zlib", "app"]);
  std::fs::create_dir(env.path().join("app/build")).unwrap();

  let output = env
    .modbox_cmd()
    .args(["modules", "--output", "json"])
    .output()
    .unwrap();
  assert!(output.status.success());

  let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  let modules = json.as_array().unwrap();
  assert_eq!(modules.len(), 2);
  assert_eq!(modules[0]["name"], "zlib");
  assert_eq!(modules[0]["state"], "unconfigured");
  assert_eq!(modules[0]["commands"], 3);
  assert_eq!(modules[1]["name"], "app");
  assert_eq!(modules[1]["phases"], serde_json::json!(["build", "run"]));
  assert_eq!(modules[1]["state"], "configured");
}

#[test]
fn listing_does_not_create_build_directories() {
  let env = TestEnv::new(CONFIG, &["zlib", "app"]);

  env.modbox_cmd().arg("modules").assert().success();

  assert!(!env.exists("zlib/build"));
  assert!(!env.exists("app/build"));
}
