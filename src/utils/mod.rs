//! Utilities: logging setup.
//!
//! Key items:
//!   derive_level / init_logging
//!
//! Diagnostics go to stderr through `tracing`; stdout is reserved for the
//! user-facing console output.

/// Logging helpers.
pub mod logging {
    use tracing_subscriber::EnvFilter;

    #[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd)]
    pub enum LogLevel {
        Error = 0,
        Warn = 1,
        Debug = 2,
        Trace = 3,
    }

    impl LogLevel {
        pub fn as_str(&self) -> &'static str {
            match self {
                LogLevel::Error => "error",
                LogLevel::Warn => "warn",
                LogLevel::Debug => "debug",
                LogLevel::Trace => "trace",
            }
        }

        /// Directive for this crate; dependencies stay at warn unless tracing.
        pub fn directive(&self) -> String {
            match self {
                LogLevel::Trace => "debug,matriz_cli=trace".to_string(),
                other => format!("warn,matriz_cli={}", other.as_str()),
            }
        }
    }

    pub fn derive_level(verbose: u8, quiet: bool) -> LogLevel {
        if quiet {
            return LogLevel::Error;
        }
        match verbose {
            0 => LogLevel::Warn,
            1 => LogLevel::Debug,
            _ => LogLevel::Trace,
        }
    }

    /// Install the stderr subscriber. `RUST_LOG`, when set and valid, wins
    /// over the flag-derived level. Calling twice is a no-op.
    pub fn init_logging(level: LogLevel) {
        let filter = std::env::var("RUST_LOG")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .and_then(|v| EnvFilter::try_new(v).ok())
            .unwrap_or_else(|| EnvFilter::new(level.directive()));

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn quiet_wins_over_verbose() {
            assert_eq!(derive_level(2, true), LogLevel::Error);
        }

        #[test]
        fn verbosity_steps() {
            assert_eq!(derive_level(0, false), LogLevel::Warn);
            assert_eq!(derive_level(1, false), LogLevel::Debug);
            assert_eq!(derive_level(5, false), LogLevel::Trace);
        }

        #[test]
        fn directives_scope_the_crate() {
            assert_eq!(LogLevel::Warn.directive(), "warn,matriz_cli=warn");
            assert_eq!(LogLevel::Debug.directive(), "warn,matriz_cli=debug");
            assert_eq!(LogLevel::Trace.directive(), "debug,matriz_cli=trace");
        }
    }
}

pub use logging::{derive_level, init_logging};
