//! # repometer-config
//!
//! **Tier 4 (Configuration)**
//!
//! This crate defines the CLI arguments, the `repometer.toml` file structures
//! and the resolution of both into the settings the pipeline runs with.
//!
//! ## What belongs here
//! * Clap `Parser`, `Args`, `Subcommand` structs
//! * Configuration file struct definitions (Serde)
//! * Default values and precedence (CLI > file > built-in)
//!
//! ## What does NOT belong here
//! * Business logic
//! * I/O operations (except config file loading)

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use repometer_walk::Exclusions;
use serde::{Deserialize, Serialize};

/// File name looked up in the working directory when `--config` is absent.
pub const CONFIG_FILE_NAME: &str = "repometer.toml";
pub const DEFAULT_ROOT: &str = "repos";
pub const DEFAULT_OUTPUT: &str = "results/analysis.json";
pub const DEFAULT_MIN_COUNT: usize = 2;
pub const DEFAULT_TOP: usize = 50;

/// Per-file code metrics for a folder of repositories.
#[derive(Parser, Debug)]
#[command(name = "repometer", version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Verbose output (repeat for more detail).
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors.
    #[arg(short = 'q', long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Configuration file (default: ./repometer.toml when present).
    #[arg(long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Analyze every repository under ROOT and write the JSON report.
    Scan(ScanArgs),

    /// Print a Markdown summary of a written report.
    Summary(SummaryArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct ScanArgs {
    /// Directory whose subdirectories are repositories (default: repos).
    #[arg(value_name = "ROOT")]
    pub root: Option<PathBuf>,

    /// Where to write the JSON report (default: results/analysis.json).
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Directory name to skip, replacing the default list. Repeatable.
    #[arg(long = "exclude", value_name = "NAME")]
    pub exclude: Vec<String>,

    /// Directory name to skip in addition to the defaults. Repeatable.
    #[arg(long = "extend-exclude", value_name = "NAME")]
    pub extend_exclude: Vec<String>,

    /// Files larger than this many bytes are recorded as too large.
    #[arg(long, value_name = "N")]
    pub max_file_bytes: Option<u64>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct SummaryArgs {
    /// Report to summarize (default: the configured scan output).
    #[arg(value_name = "REPORT")]
    pub report: Option<PathBuf>,

    /// Hide imports used fewer than N times.
    #[arg(long, value_name = "N")]
    pub min_count: Option<usize>,

    /// Show at most N imports (0 = all).
    #[arg(long, value_name = "N")]
    pub top: Option<usize>,
}

// =============================================================================
// TOML Configuration File Structures
// =============================================================================

/// Root TOML configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub scan: ScanConfig,
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    pub root: Option<String>,
    pub output: Option<String>,
    /// Replaces the default exclusion list.
    pub exclude: Option<Vec<String>>,
    /// Added to the exclusion list.
    pub extend_exclude: Option<Vec<String>>,
    pub max_file_bytes: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub min_count: Option<usize>,
    pub top: Option<usize>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {}", path.display())]
    NotFound { path: PathBuf },
    #[error("failed to read config file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid TOML in {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl TomlConfig {
    /// Load configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Load configuration from a file path.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load `explicit` if given (it must exist), otherwise `repometer.toml`
    /// in `dir` if present, otherwise the empty configuration.
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(ConfigError::NotFound {
                    path: path.to_path_buf(),
                });
            }
            return Self::from_file(path);
        }
        let candidate = dir.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            Self::from_file(&candidate)
        } else {
            Ok(Self::default())
        }
    }
}

// =============================================================================
// Resolved settings
// =============================================================================

/// Everything `scan` needs, after precedence has been applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanSettings {
    pub root: PathBuf,
    pub output: PathBuf,
    pub exclusions: Exclusions,
    pub max_file_bytes: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummarySettings {
    pub report: PathBuf,
    pub min_count: usize,
    pub top: usize,
}

fn configured_output(config: &TomlConfig) -> PathBuf {
    config
        .scan
        .output
        .as_deref()
        .map_or_else(|| PathBuf::from(DEFAULT_OUTPUT), PathBuf::from)
}

impl ScanSettings {
    pub fn resolve(args: &ScanArgs, config: &TomlConfig) -> Self {
        let scan = &config.scan;

        let mut exclusions = if !args.exclude.is_empty() {
            Exclusions::new(args.exclude.iter().cloned())
        } else if let Some(names) = &scan.exclude {
            Exclusions::new(names.iter().cloned())
        } else {
            Exclusions::default()
        };
        if let Some(extra) = &scan.extend_exclude {
            exclusions.extend(extra.iter().cloned());
        }
        exclusions.extend(args.extend_exclude.iter().cloned());

        Self {
            root: args.root.clone().unwrap_or_else(|| {
                PathBuf::from(scan.root.as_deref().unwrap_or(DEFAULT_ROOT))
            }),
            output: args.output.clone().unwrap_or_else(|| configured_output(config)),
            exclusions,
            max_file_bytes: args
                .max_file_bytes
                .or(scan.max_file_bytes)
                .unwrap_or(repometer_content::DEFAULT_MAX_FILE_BYTES),
        }
    }
}

impl SummarySettings {
    pub fn resolve(args: &SummaryArgs, config: &TomlConfig) -> Self {
        Self {
            report: args.report.clone().unwrap_or_else(|| configured_output(config)),
            min_count: args
                .min_count
                .or(config.report.min_count)
                .unwrap_or(DEFAULT_MIN_COUNT),
            top: args.top.or(config.report.top).unwrap_or(DEFAULT_TOP),
        }
    }
}
