//! CLI command definitions

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for game results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Transcript followed by the guess
    Full,
    /// Only the guess line
    Summary,
    /// JSON output
    Json,
}

impl From<OutputFormat> for twentyq_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Full => twentyq_domain::OutputFormat::Full,
            OutputFormat::Summary => twentyq_domain::OutputFormat::Summary,
            OutputFormat::Json => twentyq_domain::OutputFormat::Json,
        }
    }
}

/// Dataset file layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DatasetLayout {
    /// Detect from the first record
    Auto,
    /// One rating per line
    Long,
    /// One entity per line
    Wide,
}

/// What to keep for repeated (noun, property) rows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OnDuplicate {
    #[default]
    Last,
    First,
    Mean,
}

/// CLI arguments for twentyq
#[derive(Parser, Debug)]
#[command(name = "twentyq")]
#[command(author, version, about = "Twenty questions over an attribute dataset")]
#[command(long_about = r#"
twentyq guesses the thing you are thinking of by asking yes/no questions.

Each question is chosen to split the remaining candidates as evenly as
possible. When the dataset's attributes run out, it falls back to questions
about the word itself ("Does the word contain the letter R?").

Configuration files are loaded from (in priority order):
1. --config <path>                  Explicit config file
2. ./twentyq.toml                   Project-level config
3. ~/.config/twentyq/config.toml    Global config

Example:
  twentyq play --dataset nouns.jsonl
  twentyq play --dataset nouns.jsonl --category animals --answers 1,0,1,1
  twentyq convert long.jsonl wide.jsonl --on-duplicate mean
  twentyq report --dataset wide.jsonl --out-dir reports
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Write diagnostic logs to this file instead of stderr
    #[arg(long, value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Play a game (default)
    Play(PlayArgs),
    /// Convert a long-format dataset to wide format
    Convert(ConvertArgs),
    /// Check _meta.category on every line of a wide-format dataset
    Check(CheckArgs),
    /// Write category count and grouping reports for a dataset
    Report(ReportArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct PlayArgs {
    /// Dataset file (JSON Lines)
    #[arg(short, long, value_name = "PATH")]
    pub dataset: Option<PathBuf>,

    /// Dataset layout
    #[arg(long, value_enum)]
    pub format: Option<DatasetLayout>,

    /// Start from this category instead of the whole dataset
    #[arg(long, value_name = "LABEL", conflicts_with = "category_tree")]
    pub category: Option<String>,

    /// Category tree JSON used to pick a category first
    #[arg(long, value_name = "PATH")]
    pub category_tree: Option<PathBuf>,

    /// Predicate catalog TOML replacing the built-in catalog
    #[arg(long, value_name = "PATH")]
    pub catalog: Option<PathBuf>,

    /// Scripted answers, comma separated (e.g. "1,0,y,n")
    #[arg(long, value_name = "TOKENS")]
    pub answers: Option<String>,

    /// Seconds to wait for each answer
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// Questions asked before guessing
    #[arg(long, value_name = "N")]
    pub max_turns: Option<usize>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Append session events to this JSONL file
    #[arg(long, value_name = "PATH")]
    pub session_log: Option<PathBuf>,
}

impl PlayArgs {
    /// The `--answers` tokens, if given
    pub fn scripted_answers(&self) -> Option<Vec<String>> {
        self.answers.as_ref().map(|answers| {
            answers
                .split(',')
                .map(|token| token.trim().to_string())
                .filter(|token| !token.is_empty())
                .collect()
        })
    }
}

#[derive(Args, Debug, Clone)]
pub struct ConvertArgs {
    /// Long-format input file
    pub input: PathBuf,

    /// Wide-format output file
    pub output: PathBuf,

    /// Which rating to keep for repeated (noun, property) rows
    #[arg(long, value_enum, default_value = "last")]
    pub on_duplicate: OnDuplicate,
}

#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    /// Wide-format file to check
    pub input: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct ReportArgs {
    /// Dataset file (JSON Lines)
    #[arg(short, long, value_name = "PATH")]
    pub dataset: Option<PathBuf>,

    /// Dataset layout
    #[arg(long, value_enum)]
    pub format: Option<DatasetLayout>,

    /// Directory for the report files
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub out_dir: PathBuf,
}
