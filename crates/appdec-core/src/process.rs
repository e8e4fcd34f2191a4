//! Sequential shell command execution
//!
//! The runner reports only that a command failed, never which one. Output of
//! the child processes is streamed to the terminal while they run.

use colored::Colorize;
use std::io;
use std::path::Path;
use std::process::{ExitStatus, Stdio};
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command as TokioCommand;

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("Failed to start command")]
    Spawn(#[source] io::Error),

    #[error("Command failed with {}", exit_label(.code))]
    Exited { code: Option<i32> },
}

/// Runs an ordered list of commands, stopping at the first failure
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    async fn run(&self, commands: &[String], working_dir: &Path) -> Result<(), RunnerError>;
}

/// Runs commands through the platform shell
///
/// With `debug` set, commands are only echoed and every run succeeds.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellRunner {
    debug: bool,
}

impl ShellRunner {
    pub fn new(debug: bool) -> Self {
        Self { debug }
    }

    async fn run_one(&self, cmd: &str, working_dir: &Path) -> Result<(), RunnerError> {
        println!("{} {}", "Running:".dimmed(), cmd.yellow());

        let mut child = shell(cmd)
            .current_dir(working_dir)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(RunnerError::Spawn)?;

        if let (Some(stdout), Some(stderr)) = (child.stdout.take(), child.stderr.take()) {
            // Lines are read as bytes so output that isn't UTF-8 keeps the
            // pipes drained; a full pipe would block the child forever.
            let mut stdout_reader = BufReader::new(stdout);
            let mut stderr_reader = BufReader::new(stderr);
            let mut stdout_line = Vec::new();
            let mut stderr_line = Vec::new();
            let mut stdout_open = true;
            let mut stderr_open = true;

            while stdout_open || stderr_open {
                tokio::select! {
                    read = stdout_reader.read_until(b'\n', &mut stdout_line), if stdout_open => match read {
                        Ok(0) => stdout_open = false,
                        Ok(_) => {
                            println!("  {}", line_text(&stdout_line));
                            stdout_line.clear();
                        }
                        Err(e) => {
                            eprintln!("{} {}", "Error reading stdout:".red(), e);
                            stdout_open = false;
                        }
                    },
                    read = stderr_reader.read_until(b'\n', &mut stderr_line), if stderr_open => match read {
                        Ok(0) => stderr_open = false,
                        Ok(_) => {
                            eprintln!("  {}", line_text(&stderr_line).yellow());
                            stderr_line.clear();
                        }
                        Err(e) => {
                            eprintln!("{} {}", "Error reading stderr:".red(), e);
                            stderr_open = false;
                        }
                    },
                }
            }
        }

        let status = child.wait().await.map_err(RunnerError::Spawn)?;
        check_status(status)
    }
}

impl CommandRunner for ShellRunner {
    async fn run(&self, commands: &[String], working_dir: &Path) -> Result<(), RunnerError> {
        for cmd in commands {
            if self.debug {
                tracing::debug!(command = %cmd, dir = %working_dir.display(), "dry run");
                println!("{} {}", "Debug:".dimmed(), cmd);
                continue;
            }

            tracing::debug!(command = %cmd, dir = %working_dir.display(), "running");
            self.run_one(cmd, working_dir).await?;
        }
        Ok(())
    }
}

#[cfg(unix)]
fn shell(cmd: &str) -> TokioCommand {
    let mut command = TokioCommand::new("sh");
    command.arg("-c").arg(cmd);
    command
}

#[cfg(windows)]
fn shell(cmd: &str) -> TokioCommand {
    let mut command = TokioCommand::new("cmd");
    command.arg("/C").arg(cmd);
    command
}

fn line_text(line: &[u8]) -> String {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    let line = line.strip_suffix(b"\r").unwrap_or(line);
    String::from_utf8_lossy(line).into_owned()
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code: {}", code),
        None => "no exit code (terminated by signal)".to_string(),
    }
}

fn check_status(status: ExitStatus) -> Result<(), RunnerError> {
    if status.success() {
        Ok(())
    } else {
        Err(RunnerError::Exited {
            code: status.code(),
        })
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn cmds(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_runs_in_working_dir_in_order() {
        let tmp = TempDir::new().unwrap();
        let runner = ShellRunner::new(false);

        runner
            .run(
                &cmds(&["echo one > log.txt", "echo two >> log.txt"]),
                tmp.path(),
            )
            .await
            .unwrap();

        let log = std::fs::read_to_string(tmp.path().join("log.txt")).unwrap();
        assert_eq!(log, "one\ntwo\n");
    }

    #[tokio::test]
    async fn test_stops_at_first_failure() {
        let tmp = TempDir::new().unwrap();
        let runner = ShellRunner::new(false);

        let err = runner
            .run(&cmds(&["true", "exit 3", "touch after"]), tmp.path())
            .await
            .unwrap_err();

        assert!(matches!(err, RunnerError::Exited { code: Some(3) }));
        assert!(!tmp.path().join("after").exists());
    }

    #[tokio::test]
    async fn test_invalid_utf8_output_does_not_stall() {
        let tmp = TempDir::new().unwrap();
        let runner = ShellRunner::new(false);
        let noisy = "printf '\\377\\n'; head -c 300000 /dev/zero | tr '\\0' a; touch done";

        let result = tokio::time::timeout(
            std::time::Duration::from_secs(30),
            runner.run(&cmds(&[noisy]), tmp.path()),
        )
        .await
        .expect("runner stalled on undecodable output");

        assert!(result.is_ok());
        assert!(tmp.path().join("done").exists());
    }

    #[test]
    fn test_line_text_is_lossy_and_trimmed() {
        assert_eq!(line_text(b"added 3 packages\r\n"), "added 3 packages");
        assert_eq!(line_text(b"caf\xe9\n"), "caf\u{fffd}");
        assert_eq!(line_text(b"no newline"), "no newline");
    }

    #[tokio::test]
    async fn test_debug_executes_nothing() {
        let tmp = TempDir::new().unwrap();
        let runner = ShellRunner::new(true);

        runner
            .run(&cmds(&["touch created", "exit 1"]), tmp.path())
            .await
            .unwrap();

        assert!(!tmp.path().join("created").exists());
    }

    #[tokio::test]
    async fn test_missing_working_dir_fails_to_spawn() {
        let tmp = TempDir::new().unwrap();
        let runner = ShellRunner::new(false);

        let err = runner
            .run(&cmds(&["true"]), &tmp.path().join("missing"))
            .await
            .unwrap_err();

        assert!(matches!(err, RunnerError::Spawn(_)));
    }
}
