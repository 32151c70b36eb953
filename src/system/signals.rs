// src/system/signals.rs
//
// Relays lifecycle signals received by `ez` to every child in the registry.
//
// The OS-level handlers only wake a tokio task; the registry is locked and the children
// are signalled from that task, never from signal context.

use crate::system::process_registry::ChildRegistry;
use std::io;
use tokio::task::JoinHandle;

/// What the relay does to every registered child.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayAction {
    /// Received SIGINT: children get SIGINT.
    Interrupt,
    /// Received SIGTERM, SIGQUIT or SIGHUP: children get SIGTERM.
    Terminate,
    /// Received SIGTSTP: children get SIGSTOP, then `ez` stops itself.
    Suspend,
    /// Received SIGCONT: children get SIGCONT.
    Resume,
}

impl RelayAction {
    fn verb(self) -> &'static str {
        match self {
            Self::Interrupt => "Interrupting",
            Self::Terminate => "Terminating",
            Self::Suspend => "Stopping",
            Self::Resume => "Continuing",
        }
    }

    #[cfg(unix)]
    fn child_signal(self) -> nix::sys::signal::Signal {
        use nix::sys::signal::Signal;
        match self {
            Self::Interrupt => Signal::SIGINT,
            Self::Terminate => Signal::SIGTERM,
            Self::Suspend => Signal::SIGSTOP,
            Self::Resume => Signal::SIGCONT,
        }
    }
}

/// Sends the signal of `action` to every registered child. Best effort: a child that
/// exits concurrently is skipped with a warning. Returns the number of children visited.
#[cfg(unix)]
pub fn relay(registry: &ChildRegistry, action: RelayAction) -> usize {
    use nix::sys::signal::kill;
    use nix::unistd::Pid;

    registry.for_each_child(|child| {
        println!("{} subprocess {}...", action.verb(), child.pid);
        let Ok(raw_pid) = i32::try_from(child.pid) else {
            log::warn!("PID {} does not fit a pid_t; not signalled.", child.pid);
            return;
        };
        if let Err(e) = kill(Pid::from_raw(raw_pid), action.child_signal()) {
            log::warn!(
                "Could not deliver {:?} to [PID:{}] {}: {}",
                action.child_signal(),
                child.pid,
                child.command,
                e
            );
        }
    })
}

/// Installs the handlers and starts the relay task.
///
/// SIGKILL and SIGSTOP cannot be caught by any process; SIGTSTP (terminal stop) is
/// relayed instead.
#[cfg(unix)]
pub fn spawn_signal_relay(registry: ChildRegistry) -> io::Result<JoinHandle<()>> {
    use nix::sys::signal::Signal;
    use tokio::signal::unix::{SignalKind, signal};

    let mut interrupt = signal(SignalKind::interrupt())?;
    let mut terminate = signal(SignalKind::terminate())?;
    let mut quit = signal(SignalKind::quit())?;
    let mut hangup = signal(SignalKind::hangup())?;
    let mut terminal_stop = signal(SignalKind::from_raw(Signal::SIGTSTP as i32))?;
    let mut resume = signal(SignalKind::from_raw(Signal::SIGCONT as i32))?;

    Ok(tokio::spawn(async move {
        loop {
            let action = tokio::select! {
                Some(()) = interrupt.recv() => RelayAction::Interrupt,
                Some(()) = terminate.recv() => RelayAction::Terminate,
                Some(()) = quit.recv() => RelayAction::Terminate,
                Some(()) = hangup.recv() => RelayAction::Terminate,
                Some(()) = terminal_stop.recv() => RelayAction::Suspend,
                Some(()) = resume.recv() => RelayAction::Resume,
                else => break,
            };
            log::debug!("Relaying {:?} to {} child(ren).", action, registry.len());
            relay(&registry, action);

            if action == RelayAction::Suspend
                && let Err(e) = nix::sys::signal::raise(Signal::SIGSTOP)
            {
                log::warn!("Could not stop ez itself: {}", e);
            }
        }
    }))
}

/// Windows consoles deliver Ctrl+C to every attached process, children included, so
/// there is nothing to relay; the task only keeps `ez` alive until its children exit.
#[cfg(not(unix))]
pub fn spawn_signal_relay(registry: ChildRegistry) -> io::Result<JoinHandle<()>> {
    Ok(tokio::spawn(async move {
        while tokio::signal::ctrl_c().await.is_ok() {
            for pid in registry.pids() {
                println!("{} subprocess {}...", RelayAction::Interrupt.verb(), pid);
            }
        }
    }))
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::os::unix::process::ExitStatusExt;
    use std::process::Command;

    #[test]
    fn relay_on_empty_registry_visits_nothing() {
        let registry = ChildRegistry::new();
        assert_eq!(relay(&registry, RelayAction::Terminate), 0);
    }

    #[test]
    fn terminate_reaches_registered_children() {
        let registry = ChildRegistry::new();
        let mut child = Command::new("sleep").arg("30").spawn().expect("spawn sleep");
        registry.register(child.id(), "sleep 30");

        assert_eq!(relay(&registry, RelayAction::Terminate), 1);

        let status = child.wait().expect("wait");
        assert_eq!(status.signal(), Some(nix::sys::signal::Signal::SIGTERM as i32));
    }

    #[test]
    fn interrupt_reaches_registered_children() {
        let registry = ChildRegistry::new();
        let mut child = Command::new("sleep").arg("30").spawn().expect("spawn sleep");
        registry.register(child.id(), "sleep 30");

        relay(&registry, RelayAction::Interrupt);

        let status = child.wait().expect("wait");
        assert_eq!(status.signal(), Some(nix::sys::signal::Signal::SIGINT as i32));
    }

    /// Scheduler state letter from `/proc/<pid>/stat` (`T` when stopped).
    #[cfg(target_os = "linux")]
    fn process_state(pid: u32) -> Option<char> {
        let stat = std::fs::read_to_string(format!("/proc/{}/stat", pid)).ok()?;
        let (_, fields) = stat.rsplit_once(')')?;
        fields.trim_start().chars().next()
    }

    #[cfg(target_os = "linux")]
    fn wait_for_state(pid: u32, wanted: impl Fn(char) -> bool) -> bool {
        for _ in 0..250 {
            if process_state(pid).is_some_and(&wanted) {
                return true;
            }
            std::thread::sleep(std::time::Duration::from_millis(20));
        }
        false
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn suspend_stops_and_resume_continues_children() {
        let registry = ChildRegistry::new();
        let mut child = Command::new("sleep").arg("30").spawn().expect("spawn sleep");
        let pid = child.id();
        registry.register(pid, "sleep 30");

        assert_eq!(relay(&registry, RelayAction::Suspend), 1);
        let stopped = wait_for_state(pid, |state| state == 'T');

        relay(&registry, RelayAction::Resume);
        let resumed = wait_for_state(pid, |state| state != 'T');

        child.kill().expect("kill sleep");
        child.wait().expect("wait");
        assert!(stopped, "child was not stopped");
        assert!(resumed, "child was not continued");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn hangup_received_by_ez_terminates_children() {
        use nix::sys::signal::{Signal, kill};
        use nix::unistd::Pid;
        use std::time::Duration;

        let registry = ChildRegistry::new();
        let relay_task = spawn_signal_relay(registry.clone()).expect("install handlers");

        let mut child = tokio::process::Command::new("sleep")
            .arg("30")
            .spawn()
            .expect("spawn sleep");
        let pid = child.id().expect("running child has a pid");
        registry.register(pid, "sleep 30");

        kill(Pid::this(), Signal::SIGHUP).expect("signal self");

        let status = tokio::time::timeout(Duration::from_secs(10), child.wait()).await;
        relay_task.abort();
        let status = match status {
            Ok(status) => status.expect("wait"),
            Err(_) => {
                child.kill().await.expect("kill sleep");
                panic!("child survived SIGHUP sent to ez");
            }
        };
        assert_eq!(status.signal(), Some(Signal::SIGTERM as i32));
    }

    #[test]
    fn stale_pid_is_skipped_without_panicking() {
        let registry = ChildRegistry::new();
        let mut child = Command::new("true").spawn().expect("spawn true");
        let pid = child.id();
        child.wait().expect("wait");
        registry.register(pid, "true");

        assert_eq!(relay(&registry, RelayAction::Resume), 1);
    }
}
