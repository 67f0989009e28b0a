//! CLI command definitions and handlers

mod analyze;
mod init;
mod rules;
mod watch;

use crate::models::Severity;
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use analyze::AnalyzeOptions;

/// secanalyzer - pattern-based security analysis
///
/// Local rules run offline. `--ai` additionally sends the file to an
/// OpenAI-compatible endpoint.
#[derive(Parser, Debug)]
#[command(name = "secanalyzer")]
#[command(
    version,
    about = "Pattern-based security analysis with a 0-100 security score",
    after_help = "\
Examples:
  secanalyzer analyze app.js                    Analyze a file
  cat app.js | secanalyzer analyze -            Analyze stdin
  secanalyzer analyze app.js --format json      JSON output for scripting
  secanalyzer analyze app.js --format sarif -o results.sarif.json
  secanalyzer analyze app.js --ai               Add an LLM review (needs OPENAI_API_KEY)
  secanalyzer analyze app.js --fail-on high     Exit code 1 if high findings (CI mode)
  secanalyzer watch src/                        Re-analyze files as they are saved
  secanalyzer rules                             List built-in rules"
)]
pub struct Cli {
    /// Log level (error, warn, info, debug, trace). RUST_LOG takes priority.
    #[arg(long, global = true, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze a source file and print its findings and security score
    Analyze {
        /// File to analyze, or `-` for stdin
        path: PathBuf,

        /// Output format: text, json, sarif
        #[arg(long, short = 'f', default_value = "text", value_parser = ["text", "json", "sarif"])]
        format: String,

        /// Output file path (default: stdout)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Also run the AI review and append its findings
        #[arg(long)]
        ai: bool,

        /// Minimum severity to display (score still counts every finding)
        #[arg(long, value_parser = ["high", "medium", "low"])]
        severity: Option<String>,

        /// Exit with code 1 if findings at this severity or higher exist
        #[arg(long, value_parser = ["high", "medium", "low"])]
        fail_on: Option<String>,

        /// Disable ANSI colors in text output
        #[arg(long)]
        no_color: bool,
    },

    /// Watch a file or directory and re-analyze each file when it is saved
    Watch {
        /// File or directory to watch
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// List the built-in detection rules
    Rules,

    /// Create ~/.config/secanalyzer/config.toml with example settings
    Init,
}

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Analyze {
            path,
            format,
            output,
            ai,
            severity,
            fail_on,
            no_color,
        } => analyze::run(AnalyzeOptions {
            path,
            format: format.parse()?,
            output,
            ai,
            min_severity: parse_severity(severity.as_deref())?,
            fail_on: parse_severity(fail_on.as_deref())?,
            no_color,
        }),
        Commands::Watch { path } => watch::run(&path),
        Commands::Rules => rules::run(),
        Commands::Init => init::run(),
    }
}

fn parse_severity(value: Option<&str>) -> Result<Option<Severity>> {
    value
        .map(|v| v.parse::<Severity>().map_err(anyhow::Error::msg))
        .transpose()
}
