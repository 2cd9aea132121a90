/*!
`start` - launch the backend unless it already answers, then wait for it.

The waiting itself lives in `crate::poller`; this module only narrates.
*/

use std::io::Write;

use super::dispatch::{Dispatcher, Outcome};
use super::format::Role;
use crate::poller::{PollOutcome, ReadinessPoller};

pub fn execute_start<W: Write>(d: &mut Dispatcher<'_, W>) -> Outcome {
    d.console
        .tell("rocket", Role::Warning, "Trying to start the server...");

    let poller = ReadinessPoller::new(d.config.poll_attempts, d.config.poll_interval);
    tracing::debug!(
        command = %d.config.launch.display_line(),
        ceiling_ms = poller.ceiling().as_millis() as u64,
        "starting backend"
    );

    let console = &mut d.console;
    let outcome = poller.wait_until_ready_notify(
        d.service,
        d.launcher,
        &d.config.launch,
        d.interrupt,
        |pid| {
            tracing::debug!(?pid, "backend spawned");
            console.tell("wait", Role::Warning, "Waiting for the server to start...");
        },
    );

    match outcome {
        PollOutcome::AlreadyReady => {
            d.console
                .tell("success", Role::Success, "Server is already running!");
            Outcome::Success
        }
        PollOutcome::BecameReady { attempts } => {
            tracing::debug!(attempts, "backend ready");
            d.console
                .tell("success", Role::Success, "Server started successfully!");
            Outcome::Success
        }
        PollOutcome::TimedOut => {
            d.console.tell(
                "error",
                Role::Error,
                "Timed out waiting for the server to start",
            );
            Outcome::Failure
        }
        PollOutcome::Interrupted => {
            d.console.tell(
                "stop",
                Role::Warning,
                "Interrupted; the server process was stopped",
            );
            Outcome::Interrupted
        }
        PollOutcome::LaunchFailed(err) => {
            d.console.tell("error", Role::Error, err.to_string());
            d.console.tell("hint", Role::Warning, err.remediation());
            Outcome::Failure
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::dispatch::testing::{FakeService, Rig, output};
    use super::*;

    #[test]
    fn already_running_spawns_nothing() {
        let rig = Rig::new(FakeService::online());
        let mut d = rig.dispatcher();
        assert_eq!(execute_start(&mut d), Outcome::Success);
        let out = output(d);
        assert!(out.contains("Server is already running!"));
        assert!(!out.contains("Waiting"));
        assert!(rig.launcher.spawned.borrow().is_empty());
    }

    #[test]
    fn never_ready_times_out_and_terminates() {
        let rig = Rig::new(FakeService::default());
        let mut d = rig.dispatcher();
        assert_eq!(execute_start(&mut d), Outcome::Failure);
        let out = output(d);
        assert!(out.contains("Waiting for the server to start..."));
        assert!(out.contains("Timed out waiting for the server to start"));
        assert_eq!(rig.launcher.spawned.borrow().len(), 1);
        assert_eq!(rig.launcher.spawned.borrow()[0].program, "npm");
        assert_eq!(rig.launcher.terminated.get(), 1);
    }

    #[test]
    fn missing_npm_suggests_node() {
        let mut rig = Rig::new(FakeService::default());
        rig.launcher.fail_not_found = true;
        let mut d = rig.dispatcher();
        assert_eq!(execute_start(&mut d), Outcome::Failure);
        let out = output(d);
        assert!(out.contains("'npm' not found"));
        assert!(out.contains("Install Node.js first."));
        assert!(!out.contains("Waiting"));
    }

    #[test]
    fn ctrl_c_while_waiting_stops_the_spawned_server() {
        let rig = Rig::ctrl_c_on_check(2);
        let mut d = rig.dispatcher();
        assert_eq!(execute_start(&mut d), Outcome::Interrupted);
        let out = output(d);
        assert!(out.contains("Waiting for the server to start..."));
        assert!(out.contains("Interrupted; the server process was stopped"));
        assert!(!out.contains("Timed out"));
        assert_eq!(rig.launcher.spawned.borrow().len(), 1);
        assert_eq!(rig.launcher.terminated.get(), 1);
    }
}
