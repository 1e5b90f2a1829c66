//! End-to-end tests that run the kontext binary.
//!
//! Each test gets its own XDG directories through the child's environment, so
//! nothing here touches the test process's own environment.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

struct Sandbox {
    _dir: TempDir,
    config_home: PathBuf,
    data_home: PathBuf,
    home: PathBuf,
}

impl Sandbox {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let config_home = dir.path().join("config");
        let data_home = dir.path().join("data");
        let home = dir.path().join("home");
        for path in [&config_home, &data_home, &home] {
            fs::create_dir_all(path).unwrap();
        }
        Self {
            _dir: dir,
            config_home,
            data_home,
            home,
        }
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut command = Command::new(env!("CARGO_BIN_EXE_kontext"));
        command
            .env("XDG_CONFIG_HOME", self.config_home.as_os_str())
            .env("XDG_DATA_HOME", self.data_home.as_os_str())
            .env("HOME", self.home.as_os_str())
            .env_remove("KONTEXT_LOG")
            .env_remove("KONTEXT_LOG_FORMAT")
            .env_remove("KONTEXT_LOG_OUTPUT")
            .env_remove("KONTEXT_REGISTRY__BACKEND")
            .args(args);
        command
    }

    fn kontext(&self, args: &[&str]) -> Output {
        self.command(args).output().unwrap()
    }

    fn log_file(&self) -> PathBuf {
        self.data_home.join("kontext").join("kontext.log")
    }
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn meta_files(config_home: &Path) -> usize {
    let meta = config_home.join("kontext").join("contexts").join("meta");
    fs::read_dir(meta).map(|entries| entries.count()).unwrap_or(0)
}

#[test]
fn test_create_prints_name_on_stdout() {
    let sandbox = Sandbox::new();
    let output = sandbox.kontext(&["context", "create", "kubernetes", "prod"]);

    assert!(
        output.status.success(),
        "create should succeed: stderr={:?}",
        stderr(&output)
    );
    assert_eq!(stdout(&output).trim(), "prod");
    assert_eq!(meta_files(&sandbox.config_home), 1);
}

#[test]
fn test_duplicate_create_exit_code_and_message() {
    let sandbox = Sandbox::new();
    assert!(sandbox
        .kontext(&["context", "create", "local", "laptop"])
        .status
        .success());

    let output = sandbox.kontext(&["context", "create", "local", "laptop"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stdout(&output).is_empty());
    assert!(
        stderr(&output).contains("context \"laptop\": already exists"),
        "stderr={:?}",
        stderr(&output)
    );
    assert_eq!(meta_files(&sandbox.config_home), 1);
}

#[test]
fn test_ecs_resolution_failure_exit_code() {
    let sandbox = Sandbox::new();
    let output = sandbox.kontext(&["context", "create", "ecs", "aws"]);
    assert_eq!(output.status.code(), Some(3));
    assert_eq!(meta_files(&sandbox.config_home), 0);
}

#[test]
fn test_create_help_lists_backends() {
    let sandbox = Sandbox::new();
    let output = sandbox.kontext(&["context", "create", "--help"]);
    assert!(output.status.success());

    let help = stdout(&output);
    assert!(help.contains("Backends:"), "help={}", help);
    let kube = help.find("kontext context create kubernetes").unwrap();
    let ecs = help.find("kontext context create ecs").unwrap();
    let local = help.find("kontext context create local").unwrap();
    assert!(kube < ecs && ecs < local);
}

#[test]
fn test_default_logging_keeps_stdout_clean() {
    let sandbox = Sandbox::new();
    let output = sandbox.kontext(&["--log-level", "info", "context", "create", "local", "box"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output).trim(), "box");
    assert!(
        stderr(&output).contains("Context created"),
        "info logs should go to stderr: {:?}",
        stderr(&output)
    );
}

#[test]
fn test_file_logging_writes_default_log_file() {
    let sandbox = Sandbox::new();
    let output = sandbox.kontext(&[
        "--log-output",
        "file",
        "--log-level",
        "info",
        "context",
        "create",
        "local",
        "box",
    ]);
    assert!(
        output.status.success(),
        "stderr={:?}",
        stderr(&output)
    );

    let log_path = sandbox.log_file();
    assert!(log_path.exists(), "log file should exist at {}", log_path.display());
    let content = fs::read_to_string(&log_path).unwrap();
    assert!(content.contains("Kontext CLI starting"), "log={}", content);
    assert!(stderr(&output).trim().is_empty());
}

#[test]
fn test_quiet_suppresses_logs() {
    let sandbox = Sandbox::new();
    let output = sandbox.kontext(&["--quiet", "--log-level", "debug", "context", "ls"]);
    assert!(output.status.success());
    assert!(stderr(&output).is_empty(), "stderr={:?}", stderr(&output));
    assert!(stdout(&output).contains("default"));
}

/// Start several processes creating the same name at once and collect their
/// exit codes.
fn race_creates(sandbox: &Sandbox, backend: &str, processes: usize) -> Vec<Option<i32>> {
    let children: Vec<_> = (0..processes)
        .map(|_| {
            sandbox
                .command(&["--quiet", "context", "create", "kubernetes", "race"])
                .env("KONTEXT_REGISTRY__BACKEND", backend)
                .stdout(Stdio::null())
                .stderr(Stdio::piped())
                .spawn()
                .unwrap()
        })
        .collect();

    children
        .into_iter()
        .map(|child| {
            let output = child.wait_with_output().unwrap();
            if !matches!(output.status.code(), Some(0) | Some(2)) {
                panic!("{}: unexpected failure: {:?}", backend, stderr(&output));
            }
            output.status.code()
        })
        .collect()
}

#[test]
fn test_concurrent_processes_create_one_context() {
    for backend in ["file", "sled"] {
        let sandbox = Sandbox::new();
        let codes = race_creates(&sandbox, backend, 6);

        let created = codes.iter().filter(|c| **c == Some(0)).count();
        let rejected = codes.iter().filter(|c| **c == Some(2)).count();
        assert_eq!(created, 1, "{}: exit codes {:?}", backend, codes);
        assert_eq!(rejected, 5, "{}: exit codes {:?}", backend, codes);

        let inspect = sandbox
            .command(&["--quiet", "context", "inspect", "race"])
            .env("KONTEXT_REGISTRY__BACKEND", backend)
            .output()
            .unwrap();
        assert!(inspect.status.success(), "{}: {:?}", backend, stderr(&inspect));
    }
}
