/*!
Command parsing shared by one-shot and interactive mode.

  Command::parse(name, args)  -> Command | UsageError   (both modes)
  parse_line(line)            -> Input   | UsageError   (interactive only;
                                 adds the exit sentinels and empty input)
*/

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Status,
    Pages,
    Help,
    Start,
    Backup,
    TestAi,
    CreateNote,
    /// Raw target name; validated against `PageTarget` when executed.
    Open(String),
}

/// One line of interactive input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Empty,
    Quit,
    Run(Command),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UsageError {
    #[error("Command '{0}' not recognized. Type 'help' for help.")]
    Unknown(String),
    #[error("Specify a page to open, e.g. 'open dashboard'.")]
    MissingTarget,
    #[error("'open' takes a single page, got: {0}")]
    TooManyTargets(String),
    #[error("'{command}' takes no arguments (got '{argument}').")]
    UnexpectedArgument { command: String, argument: String },
}

impl Command {
    /// Names accepted in both modes, in help order.
    pub const NAMES: &'static [&'static str] = &[
        "status",
        "pages",
        "help",
        "start",
        "backup",
        "test-ai",
        "create-note",
        "open",
    ];

    pub fn parse(name: &str, args: &[&str]) -> Result<Command, UsageError> {
        let norm = name.trim().to_ascii_lowercase();
        let cmd = match norm.as_str() {
            "status" => Command::Status,
            "pages" => Command::Pages,
            "help" => Command::Help,
            "start" => Command::Start,
            "backup" => Command::Backup,
            "test-ai" => Command::TestAi,
            "create-note" => Command::CreateNote,
            "open" => {
                return match args {
                    [] => Err(UsageError::MissingTarget),
                    [target] if !target.trim().is_empty() => {
                        Ok(Command::Open(target.trim().to_string()))
                    }
                    [_] => Err(UsageError::MissingTarget),
                    many => Err(UsageError::TooManyTargets(many.join(" "))),
                };
            }
            _ => return Err(UsageError::Unknown(name.trim().to_string())),
        };
        match args.first() {
            Some(arg) => Err(UsageError::UnexpectedArgument {
                command: norm,
                argument: arg.to_string(),
            }),
            None => Ok(cmd),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Command::Status => "status",
            Command::Pages => "pages",
            Command::Help => "help",
            Command::Start => "start",
            Command::Backup => "backup",
            Command::TestAi => "test-ai",
            Command::CreateNote => "create-note",
            Command::Open(_) => "open",
        }
    }
}

/// Interactive line: blank -> Empty, exit/quit/q (any case) -> Quit.
pub fn parse_line(line: &str) -> Result<Input, UsageError> {
    let mut words = line.split_whitespace();
    let Some(name) = words.next() else {
        return Ok(Input::Empty);
    };
    if matches!(name.to_ascii_lowercase().as_str(), "exit" | "quit" | "q") {
        return Ok(Input::Quit);
    }
    let args: Vec<&str> = words.collect();
    Command::parse(name, &args).map(Input::Run)
}
