/*!
Interactive mode: banner, then prompt / parse / dispatch until the user leaves.

Stops on exit/quit/q, on end of input, or when stdin itself fails. Usage
errors and undecodable lines are reported and the loop keeps going.
Ctrl-C at the prompt is handled by the signal handler in `main.rs`; Ctrl-C
during `start` comes back here as `Outcome::Interrupted` and ends the session.
*/

use std::io::{BufRead, ErrorKind, Write};

use super::command::{Input, parse_line};
use super::dispatch::{Dispatcher, Outcome};
use super::format::{Role, color};

pub const PROMPT: &str = "matriz-cli> ";
pub const FAREWELL: &str = "Interrupted by user. Exiting...";
const SEPARATOR_WIDTH: usize = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stopped {
    Quit,
    EndOfInput,
    InputFailed,
    Interrupted,
}

pub fn run_interactive<R: BufRead, W: Write>(d: &mut Dispatcher<'_, W>, mut input: R) -> Stopped {
    d.banner();
    let mut line = String::new();
    loop {
        d.console.blank();
        d.console
            .say(Role::Accent, "=".repeat(SEPARATOR_WIDTH));
        let prompt = color(Role::Primary, PROMPT, d.console.style());
        d.console.prompt(prompt);

        line.clear();
        match input.read_line(&mut line) {
            Ok(0) => {
                d.console.blank();
                d.console.tell("wave", Role::Warning, "Exiting...");
                return Stopped::EndOfInput;
            }
            Ok(_) => {}
            Err(e) if e.kind() == ErrorKind::InvalidData => {
                d.console
                    .tell("error", Role::Error, "Input is not valid UTF-8, ignored.");
                continue;
            }
            Err(e) => {
                tracing::warn!(error = %e, "reading stdin failed");
                return Stopped::InputFailed;
            }
        }

        match parse_line(&line) {
            Ok(Input::Empty) => continue,
            Ok(Input::Quit) => {
                d.console.tell("wave", Role::Warning, "Exiting... Goodbye!");
                return Stopped::Quit;
            }
            Ok(Input::Run(cmd)) => {
                if d.execute(&cmd) == Outcome::Interrupted {
                    d.console.blank();
                    d.console.tell("wave", Role::Warning, FAREWELL);
                    return Stopped::Interrupted;
                }
            }
            Err(err) => d.report_usage(&err),
        }
    }
}
