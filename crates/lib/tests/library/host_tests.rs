//! End-to-end lifecycle tests against the host sandbox.
//!
//! A config is parsed from YAML and driven through the public orchestrator
//! API, running real shell commands in a temporary project directory.

use std::path::Path;

use modbox_lib::config::BoxConfig;
use modbox_lib::execute::{ExecuteError, HostSandbox};
use modbox_lib::orchestrator::{BuildState, ModuleOrchestrator, OrchestratorError, Phase};
use modbox_lib::workdir::WorkdirManager;
use tempfile::TempDir;

const CONFIG: &str = r#"
settings:
  test_prefix: "echo prefixed >> ../log;"
modules:
  core:
    configure: echo configure >> ${srcdir}/log
    build: [[echo compile >> ../log, echo link >> ../log], echo done >> ../log]
    test: echo test >> ../log
  tool:
    configure: echo configure >> ../log
    build: echo build >> ../log
    run: echo run >> ../log
"#;

fn setup(yaml: &str) -> (TempDir, ModuleOrchestrator<HostSandbox>) {
  let config = BoxConfig::parse(yaml).unwrap();
  let temp = TempDir::new().unwrap();
  for name in config.modules.keys() {
    std::fs::create_dir(temp.path().join(name)).unwrap();
  }

  let project_dir = dunce::canonicalize(temp.path()).unwrap();
  let sandbox = HostSandbox::from_settings(&config.settings, &project_dir);
  let orchestrator = ModuleOrchestrator::new(config, sandbox, WorkdirManager::new(&project_dir));
  (temp, orchestrator)
}

fn log(project: &Path, module: &str) -> Vec<String> {
  std::fs::read_to_string(project.join(module).join("log"))
    .unwrap_or_default()
    .lines()
    .map(str::to_string)
    .collect()
}

#[tokio::test]
async fn build_all_runs_nested_steps_in_order() {
  let (temp, mut orch) = setup(CONFIG);

  orch.build(None).await.unwrap();

  assert_eq!(log(temp.path(), "core"), vec!["configure", "compile", "link", "done"]);
  assert_eq!(log(temp.path(), "tool"), vec!["configure", "build"]);
  assert_eq!(orch.state("core").await.unwrap(), BuildState::Built);
}

#[tokio::test]
async fn test_phase_prefixes_only_test_commands() {
  let (temp, mut orch) = setup(CONFIG);

  orch.test(Some("core")).await.unwrap();

  assert_eq!(
    log(temp.path(), "core"),
    vec!["configure", "compile", "link", "done", "prefixed", "test"]
  );
  assert!(log(temp.path(), "tool").is_empty());
}

#[tokio::test]
async fn rerun_after_restart_skips_configure() {
  let (temp, mut first) = setup(CONFIG);
  first.build(Some("tool")).await.unwrap();

  let config = first.config().clone();
  let project_dir = dunce::canonicalize(temp.path()).unwrap();
  let sandbox = HostSandbox::from_settings(&config.settings, &project_dir);
  let mut second = ModuleOrchestrator::new(config, sandbox, WorkdirManager::new(&project_dir));

  assert_eq!(second.state("tool").await.unwrap(), BuildState::Configured);
  second.run(Some("tool")).await.unwrap();

  assert_eq!(log(temp.path(), "tool"), vec!["configure", "build", "build", "run"]);
}

#[tokio::test]
async fn failing_command_reports_module_phase_and_exit_code() {
  let yaml = "modules:\n  broken:\n    configure: 'true'\n    build: [echo one >> ../log, exit 4, echo two >> ../log]\n  after:\n    build: echo after >> ../log\n";
  let (temp, mut orch) = setup(yaml);

  let err = orch.build(None).await.unwrap_err();

  match err {
    OrchestratorError::Execute { module, phase, source } => {
      assert_eq!(module, "broken");
      assert_eq!(phase, Phase::Build);
      assert!(matches!(source, ExecuteError::CmdFailed { code: Some(4), .. }));
    }
    other => panic!("unexpected error: {other}"),
  }
  assert_eq!(log(temp.path(), "broken"), vec!["one"]);
  assert!(log(temp.path(), "after").is_empty());
}
