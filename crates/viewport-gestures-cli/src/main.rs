//! gesture-replay - replay scripted pointer input through the gesture recognizer.

#![allow(clippy::doc_markdown, clippy::needless_pass_by_value)]

mod script;

use clap::{Parser, Subcommand};
use script::{Format, ReplayError, Script};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use viewport_gestures::{MoveDirection, Point};

#[derive(Parser)]
#[command(name = "gesture-replay")]
#[command(about = "Replay pointer input scripts through the viewport gesture recognizer")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a script and print every recognized gesture
    Run {
        /// Path to the script file
        script: PathBuf,

        /// Gesture config file (YAML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Only print these gesture kinds (comma separated)
        #[arg(long, value_delimiter = ',')]
        only: Vec<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },

    /// Print the effective gesture config as YAML
    Config {
        /// Gesture config file (YAML)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Print the direction label for an offset
    Direction {
        /// Horizontal offset
        #[arg(allow_negative_numbers = true)]
        dx: f32,

        /// Vertical offset
        #[arg(allow_negative_numbers = true)]
        dy: f32,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match execute(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn execute(command: Commands) -> Result<(), ReplayError> {
    match command {
        Commands::Run {
            script,
            config,
            only,
            format,
        } => run(&script, config.as_deref(), &only, format),
        Commands::Config { config } => {
            let config = script::load_config(config.as_deref())?;
            print!("{}", config.to_yaml_string()?);
            Ok(())
        }
        Commands::Direction { dx, dy } => {
            let direction = MoveDirection::classify(Point::new(dx, dy));
            if direction == MoveDirection::None {
                println!("(none)");
            } else {
                println!("{direction}");
            }
            Ok(())
        }
    }
}

fn run(
    path: &std::path::Path,
    config: Option<&std::path::Path>,
    only: &[String],
    format: Format,
) -> Result<(), ReplayError> {
    let only = script::parse_kinds(only)?;
    let config = script::load_config(config)?;
    let script = Script::load(path)?;
    tracing::debug!(
        events = script.events.len(),
        resizes = script.resizes.len(),
        "replaying script"
    );

    let gestures = script::replay(&script, config);
    for line in script::render(&gestures, &only, format)? {
        println!("{line}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_run_arguments() {
        let cli = Cli::try_parse_from([
            "gesture-replay",
            "run",
            "session.yaml",
            "--only",
            "click,dblclick",
            "--format",
            "json",
        ])
        .unwrap();
        match cli.command {
            Commands::Run {
                script,
                config,
                only,
                format,
            } => {
                assert_eq!(script, PathBuf::from("session.yaml"));
                assert!(config.is_none());
                assert_eq!(only, vec!["click", "dblclick"]);
                assert_eq!(format, Format::Json);
            }
            _ => panic!("expected run"),
        }
    }

    #[test]
    fn test_parse_negative_direction() {
        let cli = Cli::try_parse_from(["gesture-replay", "direction", "-10", "-10"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Direction { dx, dy } if dx == -10.0 && dy == -10.0
        ));
    }

    #[test]
    fn test_run_reports_unknown_kind() {
        let err = run(
            std::path::Path::new("unused.yaml"),
            None,
            &["tap".to_string()],
            Format::Text,
        )
        .unwrap_err();
        assert!(matches!(err, ReplayError::Kind(_)));
    }
}
