//! Command line argument parsing for the orthocluster CLI using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::distance::DistanceBackend;
use crate::error::{OrthoError, Result};
use crate::phonetic::{EncoderConfig, PhoneticEncoder, RuleSet};
use crate::pipeline::PipelineConfig;
use crate::report::ReportConfig;

/// orthocluster - cluster the spelling variants of a corpus
#[derive(Parser, Debug, Clone)]
#[command(name = "orthocluster")]
#[command(about = "Cluster spelling variants by phonetic code and edit distance")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct OrthoclusterArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human", global = true)]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl OrthoclusterArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1,
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List the spelling-variant clusters of a corpus
    Clusters(ClustersArgs),

    /// Histogram of character edits inside clusters
    Edits(PipelineArgs),

    /// Histogram of block diffs inside clusters
    Diffs(PipelineArgs),

    /// Print the phonetic codes of words
    Encode(EncodeArgs),

    /// Print the distance and alignment of two words
    Distance(DistanceArgs),
}

/// Phonetic encoder options. Unset values fall back to the configuration.
#[derive(Args, Debug, Clone, Default)]
pub struct EncoderArgs {
    /// Language of the built-in rule set (eng, eng-us, kre, syl)
    #[arg(short, long)]
    pub language: Option<String>,

    /// Characters copied verbatim at the start of a code
    #[arg(long)]
    pub prefix_length: Option<usize>,

    /// Length of every phonetic code
    #[arg(long)]
    pub code_length: Option<usize>,

    /// Custom rule set file (JSON); replaces the built-in language
    #[arg(long, value_name = "RULES_FILE")]
    pub rules: Option<PathBuf>,
}

impl EncoderArgs {
    /// Apply the flags on top of `base`.
    pub fn merge(&self, base: &EncoderConfig) -> EncoderConfig {
        EncoderConfig {
            language: self.language.clone().unwrap_or_else(|| base.language.clone()),
            prefix_length: self.prefix_length.unwrap_or(base.prefix_length),
            code_length: self.code_length.unwrap_or(base.code_length),
        }
    }

    /// Build the encoder described by the flags on top of `base`.
    pub fn build_encoder(&self, base: &EncoderConfig) -> Result<PhoneticEncoder> {
        let config = self.merge(base);
        if config.code_length == 0 {
            return Err(OrthoError::invalid_argument("code length must be at least 1"));
        }
        match &self.rules {
            Some(path) => Ok(PhoneticEncoder::new(&RuleSet::load_from_file(path)?)?
                .with_prefix_length(config.prefix_length)
                .with_code_length(config.code_length)),
            None => PhoneticEncoder::from_config(&config),
        }
    }
}

/// Options shared by the commands that cluster a corpus.
#[derive(Args, Debug, Clone, Default)]
pub struct PipelineArgs {
    /// Corpus file (reads standard input when absent)
    #[arg(short, long, value_name = "CORPUS")]
    pub input: Option<PathBuf>,

    #[command(flatten)]
    pub encoder: EncoderArgs,

    /// Maximum edit distance between linked words
    #[arg(short = 'd', long)]
    pub max_distance: Option<usize>,

    /// Pipeline configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Cluster phonetic groups in parallel
    #[arg(long)]
    pub parallel: bool,
}

impl PipelineArgs {
    /// The configuration file (or defaults) overridden by the flags.
    pub fn pipeline_config(&self) -> Result<PipelineConfig> {
        let base = match &self.config {
            Some(path) => PipelineConfig::load_from_file(path)?,
            None => PipelineConfig::default(),
        };
        Ok(PipelineConfig {
            encoder: self.encoder.merge(&base.encoder),
            max_distance: self.max_distance.unwrap_or(base.max_distance),
            parallel: self.parallel || base.parallel,
        })
    }
}

/// Arguments for listing clusters
#[derive(Args, Debug, Clone)]
pub struct ClustersArgs {
    #[command(flatten)]
    pub pipeline: PipelineArgs,

    /// Word list of accepted spellings, marked with `*`
    #[arg(short, long, value_name = "WORDLIST")]
    pub accepted: Option<PathBuf>,

    /// Hide members occurring fewer times than this
    #[arg(long)]
    pub min_frequency: Option<u64>,

    /// Hide clusters with fewer members than this
    #[arg(long)]
    pub min_cluster_size: Option<usize>,
}

impl ClustersArgs {
    pub fn report_config(&self) -> ReportConfig {
        let defaults = ReportConfig::default();
        ReportConfig {
            min_frequency: self.min_frequency.unwrap_or(defaults.min_frequency),
            min_cluster_size: self.min_cluster_size.unwrap_or(defaults.min_cluster_size),
            ..defaults
        }
    }
}

/// Arguments for encoding words
#[derive(Args, Debug, Clone)]
pub struct EncodeArgs {
    /// Words to encode
    #[arg(value_name = "WORD", required = true)]
    pub words: Vec<String>,

    #[command(flatten)]
    pub encoder: EncoderArgs,
}

/// Arguments for comparing two words
#[derive(Args, Debug, Clone)]
pub struct DistanceArgs {
    /// Start of the alignment
    #[arg(value_name = "FROM")]
    pub from: String,

    /// End of the alignment
    #[arg(value_name = "TO")]
    pub to: String,

    /// Distance backend
    #[arg(short, long, default_value = "levenshtein")]
    pub backend: BackendChoice,
}

/// Distance backends selectable on the command line
#[derive(ValueEnum, Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendChoice {
    /// Character-level Levenshtein distance
    Levenshtein,
    /// Match-block diff
    Diff,
}

impl From<BackendChoice> for DistanceBackend {
    fn from(choice: BackendChoice) -> Self {
        match choice {
            BackendChoice::Levenshtein => DistanceBackend::Levenshtein,
            BackendChoice::Diff => DistanceBackend::Diff,
        }
    }
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
