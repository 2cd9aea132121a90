/*!
The transition table.

`Dispatcher::execute` is the single place mapping a `Command` to its
operation; one-shot mode feeds it one parsed argument vector, interactive
mode feeds it parsed lines (see `interactive.rs`).
*/

use std::io::Write;

use super::command::{Command, UsageError};
use super::console::Console;
use super::format::{Role, box_header};
use super::page::PageTarget;
use super::{ai, backup, help, note, open, pages, start, status};
use crate::client::ServiceApi;
use crate::config::Config;
use crate::launcher::Launcher;
use crate::launcher::browser::BrowserOpener;
use crate::poller::Interrupt;

pub const VERSION_LINE: &str = concat!("Matriz CLI v", env!("CARGO_PKG_VERSION"));

/// How a single command went, from the user's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure,
    /// Ctrl-C cut the command short; ends the session.
    Interrupted,
}

/// Conventional status for a run stopped by SIGINT.
pub const INTERRUPTED_EXIT_CODE: i32 = 130;

/// One-shot exit status: only `open` reports failure through the exit code;
/// the other commands already reported their result on the console.
pub fn one_shot_exit_code(cmd: &Command, outcome: Outcome) -> i32 {
    match (cmd, outcome) {
        (_, Outcome::Interrupted) => INTERRUPTED_EXIT_CODE,
        (Command::Open(_), Outcome::Failure) => 1,
        _ => 0,
    }
}

pub struct Dispatcher<'a, W: Write> {
    pub config: &'a Config,
    pub service: &'a dyn ServiceApi,
    pub launcher: &'a dyn Launcher,
    pub browser: &'a dyn BrowserOpener,
    /// Shared with the Ctrl-C handler.
    pub interrupt: &'a Interrupt,
    pub console: Console<W>,
}

impl<'a, W: Write> Dispatcher<'a, W> {
    pub fn new(
        config: &'a Config,
        service: &'a dyn ServiceApi,
        launcher: &'a dyn Launcher,
        browser: &'a dyn BrowserOpener,
        interrupt: &'a Interrupt,
        console: Console<W>,
    ) -> Self {
        Dispatcher {
            config,
            service,
            launcher,
            browser,
            interrupt,
            console,
        }
    }

    pub fn execute(&mut self, cmd: &Command) -> Outcome {
        tracing::debug!(command = cmd.name(), "dispatching");
        match cmd {
            Command::Status => status::execute_status(self),
            Command::Pages => pages::execute_pages(self),
            Command::Help => help::execute_help(self),
            Command::Start => start::execute_start(self),
            Command::Backup => backup::execute_backup(self),
            Command::TestAi => ai::execute_test_ai(self),
            Command::CreateNote => note::execute_create_note(self),
            Command::Open(target) => open::execute_open(self, target),
        }
    }

    pub fn banner(&mut self) {
        let header = box_header(
            VERSION_LINE.to_uppercase(),
            Some("Terminal control for the Matriz platform"),
            self.console.style(),
        );
        self.console.blank();
        self.console.raw(header);
        self.console.blank();
    }

    pub fn report_usage(&mut self, err: &UsageError) {
        self.console.tell("error", Role::Error, err.to_string());
        if matches!(err, UsageError::MissingTarget | UsageError::TooManyTargets(_)) {
            self.console.say(
                Role::Warning,
                format!("Available pages: {}", PageTarget::names_joined()),
            );
        }
    }
}
