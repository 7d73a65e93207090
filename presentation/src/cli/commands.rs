//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use ttseval_domain::WorkflowVariant;

/// Workflow variant selectable on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum VariantArg {
    /// Absolute 0-100 scores for one model
    Single,
    /// Two models on the same utterances, scored in turn
    Paired,
    /// Paired scoring followed by a blind A/B preference
    Blind,
    /// 0-10 scores on reference samples with expected scores
    Calibration,
}

impl From<VariantArg> for WorkflowVariant {
    fn from(arg: VariantArg) -> Self {
        match arg {
            VariantArg::Single => WorkflowVariant::Single,
            VariantArg::Paired => WorkflowVariant::Paired,
            VariantArg::Blind => WorkflowVariant::Blind,
            VariantArg::Calibration => WorkflowVariant::Calibration,
        }
    }
}

/// CLI arguments for ttseval
#[derive(Parser, Debug)]
#[command(name = "ttseval")]
#[command(author, version, about = "Guided listening sessions for rating synthesized speech")]
#[command(long_about = r#"
ttseval walks a rater through a listening session and records every rating
exactly once per (rater, sample), even across restarts and re-ratings.

The session has up to four steps:
1. Identify: enter your name
2. Select: pick a model, a model pair or the calibration set
3. Rate: score each sample (0-100, or 0-10 for calibration)
4. Blind compare: pick the better side of each pair (blind variant only)

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./ttseval.toml      Project-level config
3. ~/.config/ttseval/config.toml   Global config

Example:
  ttseval --name Alex
  ttseval --variant blind --catalog data/list.csv --audio-dir data/audios
  ttseval --variant calibration -v
"#)]
pub struct Cli {
    /// Workflow to run (overrides [session] variant)
    #[arg(long, value_enum)]
    pub variant: Option<VariantArg>,

    /// Rater name; skips the name prompt
    #[arg(short, long, value_name = "NAME")]
    pub name: Option<String>,

    /// Catalog CSV (overrides [catalog] path)
    #[arg(long, value_name = "PATH")]
    pub catalog: Option<PathBuf>,

    /// Audio root directory (overrides [catalog] audio_dir)
    #[arg(long, value_name = "DIR")]
    pub audio_dir: Option<PathBuf>,

    /// Result store file (overrides the per-variant default)
    #[arg(long, value_name = "PATH")]
    pub store: Option<PathBuf>,

    /// Keep ratings in memory only; nothing is written
    #[arg(long)]
    pub dry_run: bool,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Write logs to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}
