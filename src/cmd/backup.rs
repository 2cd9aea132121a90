use std::io::Write;

use super::dispatch::{Dispatcher, Outcome};
use super::format::Role;

/// `backup` - ask the backend for a manual backup.
pub fn execute_backup<W: Write>(d: &mut Dispatcher<'_, W>) -> Outcome {
    d.console
        .tell("package", Role::Warning, "Creating manual backup...");

    let Some(receipt) = d.service.create_backup() else {
        d.console.tell(
            "error",
            Role::Error,
            "Failed to create backup: service unavailable",
        );
        return Outcome::Failure;
    };

    if receipt.success {
        d.console
            .tell("success", Role::Success, "Backup created successfully!");
        if let Some(path) = receipt.path() {
            d.console.tell("folder", Role::Plain, format!("Path: {path}"));
        }
        Outcome::Success
    } else {
        let reason = receipt.message.as_deref().unwrap_or("unknown error");
        d.console.tell(
            "error",
            Role::Error,
            format!("Failed to create backup: {reason}"),
        );
        Outcome::Failure
    }
}
