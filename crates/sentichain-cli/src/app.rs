//! CLI argument definitions

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sentichain")]
#[command(
    author,
    version,
    about = "Sentiment analysis over OpenAI-compatible LLM services"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "cli")]
    pub format: OutputFormat,

    /// Config file (defaults to the user config directory)
    #[arg(long, global = true, env = "SENTICHAIN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze the sentiment of one or more texts
    Analyze(AnalyzeArgs),

    /// Extract a sentiment from a raw model reply without calling a model
    Extract(ExtractArgs),

    /// Show the prompt that would be sent for a text
    Prompt(PromptArgs),

    /// Show or initialize configuration
    Config(ConfigArgs),
}

/// Chain settings that can be overridden per invocation
#[derive(Args, Clone, Default)]
pub struct ChainOverrides {
    /// Result shape: json or text
    #[arg(long)]
    pub output_format: Option<String>,

    /// Leave the numeric score out of results
    #[arg(long)]
    pub no_score: bool,

    /// Rename a label, e.g. --label-map Positive=POS (repeatable)
    #[arg(long = "label-map", value_name = "FROM=TO", value_parser = parse_label_pair)]
    pub label_map: Vec<(String, String)>,

    /// Read the prompt template from a file
    #[arg(long)]
    pub prompt_file: Option<PathBuf>,
}

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Texts to analyze (several texts run as a batch)
    pub texts: Vec<String>,

    /// Read one text per line from stdin
    #[arg(long)]
    pub stdin: bool,

    /// Always return a list, even for a single text
    #[arg(long)]
    pub batch: bool,

    /// Model calls in flight during a batch
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// Per-text deadline in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    #[command(flatten)]
    pub overrides: ChainOverrides,
}

#[derive(Args)]
pub struct ExtractArgs {
    /// Raw model reply ("-" reads stdin)
    pub response: String,

    #[command(flatten)]
    pub overrides: ChainOverrides,
}

#[derive(Args)]
pub struct PromptArgs {
    /// Text to substitute into the template
    pub text: String,

    /// Read the prompt template from a file
    #[arg(long)]
    pub prompt_file: Option<PathBuf>,
}

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Cli,
    Json,
}

fn parse_label_pair(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((from, to)) if !from.trim().is_empty() => {
            Ok((from.trim().to_string(), to.trim().to_string()))
        }
        _ => Err(format!("expected FROM=TO, got '{}'", s)),
    }
}
