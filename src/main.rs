use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{CommandFactory, Parser};

mod client;
mod cmd;
mod config;
mod launcher;
mod poller;
mod utils;

use client::ServiceClient;
use cmd::format::{Role, color, tagged};
use cmd::{
    Command, Console, Dispatcher, FAREWELL, INTERRUPTED_EXIT_CODE, UsageError, VERSION_LINE,
};
use config::{Config, ConfigError, Overrides};
use launcher::SystemLauncher;
use launcher::browser::SystemBrowser;
use poller::Interrupt;

/// Matriz CLI - terminal control for the Matriz platform
///
/// Checks server and backup status, opens application pages in the browser,
/// starts the development server and exercises the backup, AI and notes APIs.
///
/// Modes:
///   matriz-cli                   interactive prompt (exit, quit or q to leave)
///   matriz-cli <command> [page]  run one command and exit
///
/// Global flags / env:
///   -v / -vv          Increase verbosity (diagnostics go to stderr)
///   -q / --quiet      Errors only
///   --url URL         Backend base address (or MATRIZ_URL env)
///   -c / --config     YAML or JSON config file (or MATRIZ_CONFIG env)
///   --no-color        No ANSI colors, no emoji
///   BROWSER           Browser command used by `open`
#[derive(Parser, Debug)]
#[command(
    name = "matriz-cli",
    author,
    about = "Matriz CLI - terminal control for the Matriz platform",
    disable_version_flag = true,
    after_help = "Examples:
  matriz-cli                    # interactive mode
  matriz-cli status             # show system status
  matriz-cli open dashboard     # open the dashboard in the browser
  matriz-cli backup             # create a manual backup"
)]
pub struct Cli {
    /// Command to run: status, pages, help, start, backup, test-ai, create-note, open
    #[arg(value_name = "COMMAND")]
    command: Option<String>,

    /// Command target (e.g. the page for `open`)
    #[arg(value_name = "TARGET")]
    target: Vec<String>,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Backend base address
    #[arg(long, value_name = "URL", global = true)]
    url: Option<String>,

    /// Config file (YAML or JSON)
    #[arg(short = 'c', long = "config", value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    /// Disable colors and emoji
    #[arg(long, global = true)]
    no_color: bool,

    /// Print version
    #[arg(short = 'V', long = "version", action = clap::ArgAction::SetTrue)]
    version: bool,
}

fn main() {
    let cli = Cli::parse();

    if cli.version {
        println!("{VERSION_LINE}");
        return;
    }

    let level = utils::derive_level(cli.verbose, cli.quiet);
    utils::init_logging(level);

    let code = match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            1
        }
    };
    std::process::exit(code);
}

/// Everything owned here is dropped before `main` exits the process.
fn run(cli: Cli) -> Result<i32> {
    let config = match load_config(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Invalid configuration: {e}");
            return Ok(2);
        }
    };
    tracing::debug!(url = %config.base_url, launch = %config.launch.display_line(), "configuration loaded");

    let service = ServiceClient::new(&config)?;
    let launcher = SystemLauncher::new(config.server_log.clone());
    let browser = SystemBrowser::new(config.browser.clone());
    let console = Console::stdout(config.style.clone());
    let interrupt = Arc::new(Interrupt::default());
    install_interrupt_handler(&config, Arc::clone(&interrupt), cli.command.is_none());
    let mut dispatcher =
        Dispatcher::new(&config, &service, &launcher, &browser, &interrupt, console);

    let Some(name) = cli.command.as_deref() else {
        let stopped = cmd::run_interactive(&mut dispatcher, io::stdin().lock());
        tracing::debug!(?stopped, "interactive session ended");
        return Ok(0);
    };

    let args: Vec<&str> = cli.target.iter().map(String::as_str).collect();
    match Command::parse(name, &args) {
        Ok(command) => {
            dispatcher.banner();
            let outcome = dispatcher.execute(&command);
            Ok(cmd::one_shot_exit_code(&command, outcome))
        }
        Err(err) => {
            dispatcher.report_usage(&err);
            if matches!(err, UsageError::Unknown(_)) {
                let _ = Cli::command().print_help();
                println!();
            }
            Ok(1)
        }
    }
}

/// Layering: flag > env > file > defaults.
fn load_config(cli: &Cli) -> Result<Config, ConfigError> {
    let config_path = cli.config.clone().or_else(|| env_nonempty("MATRIZ_CONFIG").map(PathBuf::from));
    let file = match &config_path {
        Some(path) => config::load_file(path)?,
        None => Default::default(),
    };
    let overrides = Overrides {
        url: cli.url.clone().or_else(|| env_nonempty("MATRIZ_URL")),
        browser: env_nonempty("BROWSER"),
        no_color: cli.no_color,
    };
    Config::build(file, overrides)
}

fn env_nonempty(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|s| !s.trim().is_empty())
}

/// Ctrl-C while `start` waits is handed to the poller, which stops the
/// backend it spawned. Anywhere else it ends the process: a farewell and
/// status 0 at the interactive prompt, status 130 in one-shot mode.
fn install_interrupt_handler(config: &Config, interrupt: Arc<Interrupt>, interactive: bool) {
    let farewell = color(
        Role::Warning,
        tagged("wave", FAREWELL, &config.style),
        &config.style,
    );
    if let Err(e) = ctrlc::set_handler(move || {
        if interrupt.request() {
            return;
        }
        if interactive {
            println!();
            println!("{farewell}");
            std::process::exit(0);
        }
        std::process::exit(INTERRUPTED_EXIT_CODE);
    }) {
        tracing::warn!(error = %e, "could not install the Ctrl-C handler");
    }
}
