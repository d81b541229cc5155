//! Bankline CLI.

use clap::{ColorChoice, Parser};
use std::io::{self, IsTerminal};

use bankline_cli::cli::{Cli, Command, LogLevelArg};
use bankline_cli::commands::{run_fields, run_pipeline};
use bankline_cli::logging::{LogConfig, init_logging};
use bankline_cli::summary::print_summary;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    init_logging(&log_config_from_cli(&cli));
    let exit_code = match cli.command {
        Command::Run(args) => match run_pipeline(&args) {
            Ok(summary) => {
                print_summary(&summary);
                0
            }
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
        Command::Fields => match run_fields() {
            Ok(()) => 0,
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
    };
    std::process::exit(exit_code);
}

/// Build logging configuration from CLI flags.
///
/// An explicit `--log-level` wins over the `-v`/`-q` counters, and
/// either one disables the `RUST_LOG` override.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let explicit = cli.log_level.map(LogLevelArg::level_filter);
    LogConfig {
        level_filter: explicit.unwrap_or_else(|| cli.verbosity.tracing_level_filter()),
        use_env_filter: explicit.is_none() && !cli.verbosity.is_present(),
        format: cli.log_format.into(),
        with_ansi: match cli.color.color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => io::stderr().is_terminal(),
        },
        ..LogConfig::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::level_filters::LevelFilter;

    #[test]
    fn explicit_log_level_overrides_verbosity_flags() {
        let cli = Cli::try_parse_from(["bankline", "-v", "--log-level", "debug", "fields"])
            .unwrap();
        let config = log_config_from_cli(&cli);
        assert_eq!(config.level_filter, LevelFilter::DEBUG);
        assert!(!config.use_env_filter);
    }

    #[test]
    fn default_flags_keep_the_env_override() {
        let cli = Cli::try_parse_from(["bankline", "fields"]).unwrap();
        let config = log_config_from_cli(&cli);
        assert_eq!(config.level_filter, LevelFilter::WARN);
        assert!(config.use_env_filter);
    }
}
