//! Runs an alias's command list in its execution mode.

use crate::{
    models::{AliasDefinition, ExecutionMode},
    system::executor::{JobOutcome, ProcessRunner, StdStreams},
};
use colored::*;
use std::io::Write;
use tokio::task::JoinSet;

// --- Main Public Function ---

/// Executes an alias according to its execution mode and returns once every child
/// has finished.
///
/// - `Sequential`: the commands are joined with single spaces into one shell line and
///   run as a single child. Shell operators inside the tokens (`&&`, `;`, `|`) keep
///   their meaning; nothing is short-circuited by `ez` itself.
/// - `Parallel`: one child per command, all started before any is awaited.
///
/// The returned outcomes cover the children that were actually spawned. Exit codes of
/// the user's commands are not treated as failures.
pub async fn execute(
    definition: &AliasDefinition,
    runner: &ProcessRunner,
    streams: &StdStreams,
) -> Vec<JobOutcome> {
    match definition.execution_mode() {
        ExecutionMode::Sequential => runner
            .run_sequential(&definition.joined_command_line(), streams)
            .await
            .into_iter()
            .collect(),
        ExecutionMode::Parallel => execute_parallel(definition.commands(), runner, streams).await,
    }
}

// --- Execution Helpers ---

/// Fan-out/fan-in over the command list. A job that cannot be spawned is reported by
/// the runner and does not affect its siblings.
async fn execute_parallel(
    commands: &[String],
    runner: &ProcessRunner,
    streams: &StdStreams,
) -> Vec<JobOutcome> {
    println!(
        "{}",
        format!("🐘 Running in parallel: {}", commands.join(", "))
            .green()
            .bold()
    );
    flush_stdout();

    if log::log_enabled!(log::Level::Trace) {
        for (i, cmd) in commands.iter().enumerate() {
            log::trace!("  - Job[{}]: {}", i, cmd);
        }
    }

    let mut jobs = JoinSet::new();
    for command in commands {
        let runner = runner.clone();
        let streams = streams.clone();
        let command = command.clone();
        jobs.spawn(async move {
            let outcome = runner.run_parallel_job(&command, &streams).await;
            flush_stdout();
            outcome
        });
    }

    let mut outcomes = Vec::with_capacity(commands.len());
    while let Some(joined) = jobs.join_next().await {
        match joined {
            Ok(Some(outcome)) => outcomes.push(outcome),
            Ok(None) => {}
            Err(e) => log::warn!("A parallel job task did not complete: {}", e),
        }
    }
    outcomes
}

fn flush_stdout() {
    if let Err(e) = std::io::stdout().flush() {
        log::debug!("Could not flush stdout: {}", e);
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::{models::ShellConfig, system::process_registry::ChildRegistry};
    use std::fs::{self, File};
    use std::path::PathBuf;
    use std::time::{Duration, Instant};
    use tempfile::TempDir;

    fn runner() -> ProcessRunner {
        ProcessRunner::new(ShellConfig::default(), ChildRegistry::new())
    }

    fn alias(mode: ExecutionMode, commands: &[&str]) -> AliasDefinition {
        AliasDefinition::new(mode, commands.iter().map(|c| c.to_string()).collect(), None)
    }

    fn capture(dir: &TempDir) -> (PathBuf, StdStreams) {
        let path = dir.path().join("combined.log");
        let file = File::create(&path).expect("create capture file");
        (path, StdStreams::captured(file))
    }

    #[tokio::test]
    async fn parallel_alias_runs_every_command() {
        let dir = TempDir::new().expect("temp dir");
        let (path, streams) = capture(&dir);
        let def = alias(ExecutionMode::Parallel, &["echo 'parallelA'", "echo 'parallelB'"]);

        let outcomes = execute(&def, &runner(), &streams).await;
        assert_eq!(outcomes.len(), 2);

        let output = fs::read_to_string(path).expect("read");
        assert!(output.contains("parallelA"));
        assert!(output.contains("parallelB"));
    }

    #[tokio::test]
    async fn parallel_jobs_overlap_in_time() {
        let dir = TempDir::new().expect("temp dir");
        let (_path, streams) = capture(&dir);
        let def = alias(ExecutionMode::Parallel, &["sleep 1", "sleep 1", "sleep 1"]);

        let start = Instant::now();
        let outcomes = execute(&def, &runner(), &streams).await;
        assert_eq!(outcomes.len(), 3);
        assert!(start.elapsed() < Duration::from_millis(2500));
    }

    #[tokio::test]
    async fn failing_parallel_job_does_not_stop_its_siblings() {
        let dir = TempDir::new().expect("temp dir");
        let (path, streams) = capture(&dir);
        let def = alias(ExecutionMode::Parallel, &["false", "echo 'parallelC'"]);

        let outcomes = execute(&def, &runner(), &streams).await;
        assert_eq!(outcomes.len(), 2);
        assert_eq!(outcomes.iter().filter(|o| o.status.success()).count(), 1);
        assert!(fs::read_to_string(path).expect("read").contains("parallelC"));
    }

    #[tokio::test]
    async fn unspawnable_jobs_are_skipped() {
        let shell = ShellConfig {
            program: PathBuf::from("/definitely/not/a/shell"),
            args: vec!["-c".to_string()],
        };
        let runner = ProcessRunner::new(shell, ChildRegistry::new());
        let def = alias(ExecutionMode::Parallel, &["echo a", "echo b"]);

        let outcomes = execute(&def, &runner, &StdStreams::default()).await;
        assert!(outcomes.is_empty());
        assert!(runner.registry().is_empty());
    }

    #[tokio::test]
    async fn sequential_alias_is_one_shell_line() {
        let dir = TempDir::new().expect("temp dir");
        let (path, streams) = capture(&dir);
        let def = alias(ExecutionMode::Sequential, &["echo", "one", "&&", "echo", "two"]);

        let outcomes = execute(&def, &runner(), &streams).await;
        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes.first().map(|o| o.command.as_str()), Some("echo one && echo two"));

        let output = fs::read_to_string(path).expect("read");
        assert_eq!(output, "one\ntwo\n");
    }

    #[tokio::test]
    async fn sequential_failure_returns_normally() {
        let dir = TempDir::new().expect("temp dir");
        let (path, streams) = capture(&dir);
        let def = alias(ExecutionMode::Sequential, &["false"]);

        let outcomes = execute(&def, &runner(), &streams).await;
        assert_eq!(outcomes.len(), 1);
        assert!(fs::read_to_string(path).expect("read").is_empty());
    }

    #[tokio::test]
    async fn registry_is_empty_after_execution() {
        let dir = TempDir::new().expect("temp dir");
        let (_path, streams) = capture(&dir);
        let runner = runner();
        let def = alias(ExecutionMode::Parallel, &["true", "true", "true"]);

        execute(&def, &runner, &streams).await;
        assert!(runner.registry().is_empty());
    }
}
