/*!
`create-note` - post a timestamped test note to the strategic notes API.

A failed call is reported as a failure; nothing is simulated.
*/

use std::io::Write;

use chrono::Local;

use super::dispatch::{Dispatcher, Outcome};
use super::format::Role;
use crate::client::NoteRequest;

pub const NOTE_KIND: &str = "manual-test";
pub const NOTE_SOURCE: &str = "matriz-cli";

pub fn execute_create_note<W: Write>(d: &mut Dispatcher<'_, W>) -> Outcome {
    d.console
        .tell("note", Role::Warning, "Creating a manual test note...");

    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    let note = build_note(&timestamp);
    tracing::debug!(title = %note.title, "posting note");

    match d.service.create_note(&note) {
        Some(receipt) if receipt.success => {
            d.console
                .tell("success", Role::Success, "Note created successfully!");
            d.console.tell(
                "note",
                Role::Primary,
                "The note will be synced to Obsidian automatically",
            );
            d.console
                .tell("tag", Role::Plain, format!("Title: {}", note.title));
            Outcome::Success
        }
        Some(receipt) => {
            let reason = receipt.message.as_deref().unwrap_or("unknown error");
            d.console.tell(
                "error",
                Role::Error,
                format!("Failed to create note: {reason}"),
            );
            Outcome::Failure
        }
        None => {
            d.console.tell(
                "error",
                Role::Error,
                "Failed to create note: service unavailable",
            );
            Outcome::Failure
        }
    }
}

/// The note posted by `create-note`, stamped with `timestamp`.
pub fn build_note(timestamp: &str) -> NoteRequest {
    let title = format!("Manual CLI Test - {timestamp}");
    let content = format!(
        "# {title}

## Note details

- **Created at:** {timestamp}
- **Source:** Matriz CLI
- **Type:** Manual test
- **Status:** Test

## Content

This note was created by hand through the **Matriz CLI** to exercise the
notes API and its Obsidian synchronization.

### Checks
1. The notes API is reachable
2. A markdown file is produced
3. Metadata is structured
4. The file lands in the vault

## Related

- [[AI Responses]] - automatic AI answers
- [[Tests]] - other test notes
- [[Matriz CLI]] - CLI documentation

---
*Created automatically by Matriz CLI*
"
    );
    NoteRequest {
        title,
        content,
        kind: NOTE_KIND.to_string(),
        source: NOTE_SOURCE.to_string(),
    }
}
