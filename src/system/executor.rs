// src/system/executor.rs

//! Spawning and awaiting shell command lines.

use crate::{
    core::report,
    models::ShellConfig,
    system::process_registry::ChildRegistry,
};
use colored::Colorize;
use std::fs::File;
use std::io;
use std::process::{ExitStatus, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::process::Command;

/// Failures of a single job. They are reported and never abort sibling jobs.
#[derive(Error, Debug)]
pub enum ExecutionError {
    /// A stream handle could not be duplicated for the child.
    #[error("Could not set up the standard streams for '{0}': {1}")]
    StreamSetup(String, io::Error),
    /// The shell could not be spawned.
    #[error("Failed to execute command '{0}': {1}")]
    CommandFailed(String, io::Error),
    /// The child was reaped before its pid was read.
    #[error("Command '{0}' exited before its process id could be read.")]
    MissingPid(String),
    /// Waiting on the child failed.
    #[error("Failed while waiting for command '{0}': {1}")]
    WaitFailed(String, io::Error),
}

/// Where a child's standard input comes from.
#[derive(Debug, Clone, Default)]
pub enum InputSource {
    /// The caller's stdin.
    #[default]
    Inherit,
    /// Nothing to read.
    Null,
}

/// Where a child's standard output or error goes.
#[derive(Debug, Clone, Default)]
pub enum OutputSink {
    /// The caller's own stream.
    #[default]
    Inherit,
    /// Every child writes into a duplicate of this handle.
    File(Arc<File>),
}

impl OutputSink {
    /// Sends output into `file`.
    pub fn file(file: File) -> Self {
        Self::File(Arc::new(file))
    }

    fn to_stdio(&self) -> io::Result<Stdio> {
        match self {
            Self::Inherit => Ok(Stdio::inherit()),
            Self::File(file) => Ok(Stdio::from(file.try_clone()?)),
        }
    }
}

impl InputSource {
    fn to_stdio(&self) -> Stdio {
        match self {
            Self::Inherit => Stdio::inherit(),
            Self::Null => Stdio::null(),
        }
    }
}

/// The three standard streams handed to every child. Defaults to the caller's own.
#[derive(Debug, Clone, Default)]
pub struct StdStreams {
    /// Standard input.
    pub stdin: InputSource,
    /// Standard output.
    pub stdout: OutputSink,
    /// Standard error.
    pub stderr: OutputSink,
}

impl StdStreams {
    /// Null input, and both output streams written into `file`.
    pub fn captured(file: File) -> Self {
        let sink = OutputSink::file(file);
        Self {
            stdin: InputSource::Null,
            stdout: sink.clone(),
            stderr: sink,
        }
    }
}

/// What the runner observed about one finished child.
#[derive(Debug, Clone)]
pub struct JobOutcome {
    /// OS process id of the shell.
    pub pid: u32,
    /// The shell line that ran.
    pub command: String,
    /// Exit status, never treated as an error.
    pub status: ExitStatus,
    /// Wall time from spawn to exit.
    pub elapsed: Duration,
}

/// Spawns shell command lines as tracked child processes.
///
/// Each child is registered in the [`ChildRegistry`] right after it is spawned and
/// removed right after it is reaped, so the signal relay can reach it meanwhile.
/// The child's exit status is reported back but never treated as a failure.
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    shell: ShellConfig,
    registry: ChildRegistry,
}

impl ProcessRunner {
    /// A runner using `shell` that tracks children in `registry`.
    pub fn new(shell: ShellConfig, registry: ChildRegistry) -> Self {
        Self { shell, registry }
    }

    /// The registry children are tracked in.
    pub fn registry(&self) -> &ChildRegistry {
        &self.registry
    }

    /// Runs `command_line` as one shell invocation and waits for it.
    ///
    /// Spawn failures are printed as diagnostics and yield `None`.
    pub async fn run_sequential(&self, command_line: &str, streams: &StdStreams) -> Option<JobOutcome> {
        match self.spawn_and_wait(command_line, streams, |_| {}).await {
            Ok(outcome) => {
                report::print_time_taken(outcome.elapsed, "");
                Some(outcome)
            }
            Err(e) => {
                report::print_error(&e.to_string());
                None
            }
        }
    }

    /// Runs one job of a parallel alias. Same lifecycle as [`Self::run_sequential`], but
    /// the start announcement and the timing report carry the job's PID and command.
    pub async fn run_parallel_job(&self, command_line: &str, streams: &StdStreams) -> Option<JobOutcome> {
        let announce = |pid: u32| {
            println!(
                "{}",
                format!("Started [PID:{}] {}...", pid, command_line).dimmed()
            );
        };
        match self.spawn_and_wait(command_line, streams, announce).await {
            Ok(outcome) => {
                let title = format!("[PID:{}] {} ", outcome.pid, outcome.command);
                report::print_time_taken(outcome.elapsed, &title);
                Some(outcome)
            }
            Err(e) => {
                report::print_error(&e.to_string());
                None
            }
        }
    }

    fn build_command(&self, command_line: &str, streams: &StdStreams) -> Result<Command, ExecutionError> {
        let stream_error = |e: io::Error| ExecutionError::StreamSetup(command_line.to_string(), e);

        let mut command = Command::new(&self.shell.program);
        command
            .args(&self.shell.args)
            .arg(command_line)
            .stdin(streams.stdin.to_stdio())
            .stdout(streams.stdout.to_stdio().map_err(stream_error)?)
            .stderr(streams.stderr.to_stdio().map_err(stream_error)?);
        Ok(command)
    }

    /// Spawn, register, wait, deregister. `on_started` runs once the child is registered.
    async fn spawn_and_wait<F>(
        &self,
        command_line: &str,
        streams: &StdStreams,
        on_started: F,
    ) -> Result<JobOutcome, ExecutionError>
    where
        F: FnOnce(u32),
    {
        let mut command = self.build_command(command_line, streams)?;

        let start = Instant::now();
        let mut child = command
            .spawn()
            .map_err(|e| ExecutionError::CommandFailed(command_line.to_string(), e))?;
        let pid = child
            .id()
            .ok_or_else(|| ExecutionError::MissingPid(command_line.to_string()))?;

        self.registry.register(pid, command_line);
        let registry = self.registry.clone();
        let _deregister = scopeguard::guard(pid, move |pid| {
            registry.deregister(pid);
        });

        on_started(pid);

        let status = child
            .wait()
            .await
            .map_err(|e| ExecutionError::WaitFailed(command_line.to_string(), e))?;
        let elapsed = start.elapsed();
        log::debug!(
            "[PID:{}] '{}' finished with {} after {:?}",
            pid,
            command_line,
            status,
            elapsed
        );

        Ok(JobOutcome {
            pid,
            command: command_line.to_string(),
            status,
            elapsed,
        })
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn runner() -> ProcessRunner {
        ProcessRunner::new(ShellConfig::default(), ChildRegistry::new())
    }

    fn capture(dir: &TempDir) -> (PathBuf, StdStreams) {
        let path = dir.path().join("output.log");
        let file = File::create(&path).expect("create capture file");
        (path, StdStreams::captured(file))
    }

    #[tokio::test]
    async fn sequential_run_forwards_output() {
        let dir = TempDir::new().expect("temp dir");
        let (path, streams) = capture(&dir);

        let outcome = runner()
            .run_sequential("echo 'test_runCommandsEcho'", &streams)
            .await
            .expect("spawned");
        assert!(outcome.status.success());

        let output = fs::read_to_string(path).expect("read");
        assert!(output.contains("test_runCommandsEcho"));
    }

    #[tokio::test]
    async fn shell_operators_work_within_one_line() {
        let dir = TempDir::new().expect("temp dir");
        let (path, streams) = capture(&dir);

        runner()
            .run_sequential("echo first && echo second | tr a-z A-Z", &streams)
            .await
            .expect("spawned");

        let output = fs::read_to_string(path).expect("read");
        assert!(output.contains("first"));
        assert!(output.contains("SECOND"));
    }

    #[tokio::test]
    async fn failing_command_is_not_an_error() {
        let dir = TempDir::new().expect("temp dir");
        let (path, streams) = capture(&dir);

        let outcome = runner()
            .run_sequential("false", &streams)
            .await
            .expect("spawned");
        assert!(!outcome.status.success());
        assert!(fs::read_to_string(path).expect("read").is_empty());
    }

    #[tokio::test]
    async fn unknown_program_is_reported_by_the_shell() {
        let dir = TempDir::new().expect("temp dir");
        let (path, streams) = capture(&dir);

        let outcome = runner()
            .run_sequential("nonexistent_command_12345", &streams)
            .await
            .expect("the shell itself spawns");
        assert!(!outcome.status.success());
        let output = fs::read_to_string(path).expect("read").to_lowercase();
        assert!(output.contains("not found"));
    }

    #[tokio::test]
    async fn empty_command_line_runs_cleanly() {
        let dir = TempDir::new().expect("temp dir");
        let (path, streams) = capture(&dir);

        let outcome = runner().run_sequential("", &streams).await.expect("spawned");
        assert!(outcome.status.success());
        assert!(fs::read_to_string(path).expect("read").is_empty());
    }

    #[tokio::test]
    async fn missing_shell_yields_none() {
        let shell = ShellConfig {
            program: PathBuf::from("/definitely/not/a/shell"),
            args: vec!["-c".to_string()],
        };
        let runner = ProcessRunner::new(shell, ChildRegistry::new());
        assert!(
            runner
                .run_sequential("echo hi", &StdStreams::default())
                .await
                .is_none()
        );
        assert!(runner.registry().is_empty());
    }

    #[tokio::test]
    async fn child_is_registered_only_while_running() {
        let dir = TempDir::new().expect("temp dir");
        let (_path, streams) = capture(&dir);
        let runner = runner();

        let job = {
            let runner = runner.clone();
            tokio::spawn(async move { runner.run_parallel_job("sleep 1", &streams).await })
        };

        let mut seen_pid = None;
        for _ in 0..50 {
            if let Some(pid) = runner.registry().pids().first().copied() {
                seen_pid = Some(pid);
                break;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }

        let outcome = job.await.expect("join").expect("spawned");
        assert_eq!(seen_pid, Some(outcome.pid));
        assert!(runner.registry().is_empty());
        assert!(outcome.elapsed >= Duration::from_millis(900));
    }
}
