/*!
Command layer.

  command.rs      Command / Input parsing (both modes)
  dispatch.rs     Dispatcher: Command -> operation, banner, usage errors
  interactive.rs  prompt loop
  page.rs         PageTarget (open / pages)
  console.rs      Console writer, format.rs styling helpers

One file per operation, each exposing a single `execute_*` function that
takes the dispatcher and returns an `Outcome`:
  status.rs pages.rs help.rs start.rs backup.rs ai.rs note.rs open.rs
*/

pub mod command;
pub mod console;
pub mod dispatch;
pub mod format;
pub mod interactive;
pub mod page;

mod ai;
mod backup;
mod help;
mod note;
mod open;
mod pages;
mod start;
mod status;

pub use command::{Command, UsageError};
pub use console::Console;
pub use dispatch::{Dispatcher, INTERRUPTED_EXIT_CODE, VERSION_LINE, one_shot_exit_code};
pub use interactive::{FAREWELL, run_interactive};
