//! CLI entry point for rgpd-audit.
//!
//! Argument parsing, logging setup, file I/O and exit codes live here.
//! All evaluation logic lives in `rgpd-audit-core`.

mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use rgpd_audit_core::DocumentFormat;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "rgpd-audit",
    version,
    about = "GDPR (RGPD) compliance self-audit reports"
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(long, short, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Print machine-readable JSON for `validate` and `questions`.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Evaluate an answers file and write the report.
    Evaluate {
        /// Answers file (YAML, or JSON with a .json extension).
        #[arg(long, short)]
        answers: PathBuf,

        /// Questionnaire file; the built-in RGPD questionnaire when omitted.
        #[arg(long, short)]
        questionnaire: Option<PathBuf>,

        /// Report format.
        #[arg(long, short, value_enum, default_value_t = OutputFormat::Markdown)]
        format: OutputFormat,

        /// Where to write the report (stdout when omitted).
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Load and validate a questionnaire file.
    Validate {
        /// Path to the questionnaire (YAML or JSON).
        questionnaire: PathBuf,
    },

    /// List the questions of a questionnaire.
    Questions {
        /// Questionnaire file; the built-in RGPD questionnaire when omitted.
        #[arg(long, short)]
        questionnaire: Option<PathBuf>,
    },

    /// Print an answers-file skeleton for a questionnaire.
    Template {
        /// Questionnaire file; the built-in RGPD questionnaire when omitted.
        #[arg(long, short)]
        questionnaire: Option<PathBuf>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    Markdown,
    Json,
}

impl From<OutputFormat> for DocumentFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Markdown => DocumentFormat::Markdown,
            OutputFormat::Json => DocumentFormat::Json,
        }
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.cmd {
        Commands::Evaluate {
            answers,
            questionnaire,
            format,
            output,
        } => commands::cmd_evaluate(
            &answers,
            questionnaire.as_deref(),
            format.into(),
            output.as_deref(),
        ),
        Commands::Validate { questionnaire } => commands::cmd_validate(&questionnaire, cli.json),
        Commands::Questions { questionnaire } => {
            commands::cmd_questions(questionnaire.as_deref(), cli.json)
        }
        Commands::Template { questionnaire } => commands::cmd_template(questionnaire.as_deref()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn evaluate_defaults_to_markdown() {
        let cli = Cli::parse_from(["rgpd-audit", "evaluate", "--answers", "answers.yaml"]);
        match cli.cmd {
            Commands::Evaluate {
                format,
                questionnaire,
                output,
                ..
            } => {
                assert_eq!(format, OutputFormat::Markdown);
                assert!(questionnaire.is_none());
                assert!(output.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn json_flag_is_global() {
        let cli = Cli::parse_from(["rgpd-audit", "questions", "--json"]);
        assert!(cli.json);
    }

    #[test]
    fn verbosity_counts() {
        let cli = Cli::parse_from(["rgpd-audit", "-vv", "template"]);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn output_format_maps_to_document_format() {
        assert_eq!(DocumentFormat::from(OutputFormat::Json), DocumentFormat::Json);
        assert_eq!(
            DocumentFormat::from(OutputFormat::Markdown),
            DocumentFormat::Markdown
        );
    }
}
