/*!
`status` - server liveness, metadata and backup summary.

ONLINE requires `/api/status` to answer with `ok: true`; anything else
(absent, `ok: false`) is OFFLINE plus a hint on how to start the server.
*/

use std::io::Write;

use super::console::Console;
use super::dispatch::{Dispatcher, Outcome};
use super::format::Role;
use crate::client::{BackupStatus, ServiceStatus};

const NA: &str = "N/A";

pub fn execute_status<W: Write>(d: &mut Dispatcher<'_, W>) -> Outcome {
    d.console
        .tell("search", Role::Warning, "Checking system status...");

    match d.service.get_status() {
        Some(status) if status.ok => {
            d.console.tell("success", Role::Success, "Server: ONLINE");
            render_status(&mut d.console, &status);
            if let Some(backup) = d.service.get_backup_status() {
                render_backup(&mut d.console, &backup);
            }
            Outcome::Success
        }
        _ => {
            d.console.tell("error", Role::Error, "Server: OFFLINE");
            d.console.tell(
                "hint",
                Role::Warning,
                format!(
                    "Make sure the server is running with '{}'",
                    d.config.launch_command
                ),
            );
            Outcome::Failure
        }
    }
}

fn render_status<W: Write>(c: &mut Console<W>, s: &ServiceStatus) {
    let or_na = |v: &Option<String>| v.clone().unwrap_or_else(|| NA.to_string());
    c.tell("clock", Role::Plain, format!("Timestamp: {}", or_na(&s.timestamp)));
    c.tell(
        "db",
        Role::Plain,
        format!("MongoDB: {}", or_na(&s.mongodb).to_uppercase()),
    );
    c.tell(
        "globe",
        Role::Plain,
        format!("Environment: {}", or_na(&s.environment)),
    );
    c.tell("chart", Role::Plain, format!("Version: {}", or_na(&s.version)));
}

fn render_backup<W: Write>(c: &mut Console<W>, b: &BackupStatus) {
    c.blank();
    c.tell("package", Role::Primary, "Backup system:");
    let (state, role) = if b.running {
        ("ACTIVE", Role::Success)
    } else {
        ("INACTIVE", Role::Error)
    };
    c.say(role, format!("   Status: {state}"));
    c.say(
        Role::Plain,
        format!(
            "   Interval: {} hours",
            b.interval_hours.as_deref().unwrap_or(NA)
        ),
    );
    c.say(
        Role::Plain,
        format!(
            "   Total backups: {}",
            b.total_backups.as_deref().unwrap_or(NA)
        ),
    );
    if let Some(last) = &b.last_backup {
        c.say(Role::Plain, format!("   Last backup: {last}"));
    }
}

#[cfg(test)]
mod tests {
    use super::super::dispatch::testing::{FakeService, Rig, output};
    use super::*;
    use crate::client::ServiceStatus;

    #[test]
    fn online_renders_all_fields() {
        let rig = Rig::new(FakeService::online());
        let mut d = rig.dispatcher();
        assert_eq!(execute_status(&mut d), Outcome::Success);
        let out = output(d);
        assert!(out.contains("Server: ONLINE"));
        assert!(out.contains("Timestamp: T"));
        assert!(out.contains("MongoDB: CONNECTED"));
        assert!(out.contains("Environment: dev"));
        assert!(out.contains("Version: 1.0"));
        assert!(!out.contains("Backup system"));
    }

    #[test]
    fn missing_fields_render_as_na() {
        let rig = Rig::new(FakeService {
            status: Some(ServiceStatus {
                ok: true,
                ..Default::default()
            }),
            ..Default::default()
        });
        let mut d = rig.dispatcher();
        execute_status(&mut d);
        let out = output(d);
        assert!(out.contains("Timestamp: N/A"));
        assert!(out.contains("MongoDB: N/A"));
    }

    #[test]
    fn backup_block_when_present() {
        let rig = Rig::new(FakeService {
            backup_status: Some(BackupStatus {
                running: false,
                interval_hours: Some("6".into()),
                total_backups: None,
                last_backup: Some("2024-01-01T00:00:00Z".into()),
            }),
            ..FakeService::online()
        });
        let mut d = rig.dispatcher();
        execute_status(&mut d);
        let out = output(d);
        assert!(out.contains("Backup system:"));
        assert!(out.contains("Status: INACTIVE"));
        assert!(out.contains("Interval: 6 hours"));
        assert!(out.contains("Total backups: N/A"));
        assert!(out.contains("Last backup: 2024-01-01T00:00:00Z"));
    }

    #[test]
    fn unreachable_is_offline_with_hint() {
        let rig = Rig::new(FakeService::default());
        let mut d = rig.dispatcher();
        assert_eq!(execute_status(&mut d), Outcome::Failure);
        let out = output(d);
        assert!(out.contains("Server: OFFLINE"));
        assert!(out.contains("npm run dev"));
        assert!(!out.contains("ONLINE"));
    }

    #[test]
    fn ok_false_is_offline() {
        let rig = Rig::new(FakeService {
            status: Some(ServiceStatus::default()),
            ..Default::default()
        });
        let mut d = rig.dispatcher();
        execute_status(&mut d);
        assert!(output(d).contains("Server: OFFLINE"));
    }
}
