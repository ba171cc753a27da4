//! # repometer-analysis
//!
//! **Tier 3 (Orchestration)**
//!
//! The per-file analyzer. Reads one classified file, applies the text
//! metrics every language gets, adds Python structure and exact complexity
//! where available, and returns a typed [`FileOutcome`].
//!
//! ## What belongs here
//! * Complexity strategy selection
//! * Mapping read and parse failures onto degrade reasons
//!
//! ## What does NOT belong here
//! * Aggregation (use repometer-model)
//! * Output formatting (use repometer-format)

use repometer_content::{DEFAULT_MAX_FILE_BYTES, line_stats, pseudo_complexity, read_source};
use repometer_lang::LanguageSpec;
use repometer_python::{ParseError, ParsedModule};
use repometer_types::{ComplexityStats, DegradeReason, FileMetrics, FileOutcome};
use repometer_walk::ClassifiedFile;
use tracing::{debug, warn};

/// How exact cyclomatic complexity is obtained for parseable files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComplexityStrategy {
    /// Radon-style block scores from the parse tree.
    Exact,
    /// Built without the `cyclomatic` feature; complexity stays empty.
    Unavailable,
}

impl ComplexityStrategy {
    /// Pick the strategy this build supports. Call once per run: the
    /// unavailable case logs a warning.
    pub fn detect() -> Self {
        if cfg!(feature = "cyclomatic") {
            ComplexityStrategy::Exact
        } else {
            warn!("built without the `cyclomatic` feature; complexity metrics will be empty");
            ComplexityStrategy::Unavailable
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalyzerSettings {
    pub max_file_bytes: u64,
    pub complexity: ComplexityStrategy,
}

impl Default for AnalyzerSettings {
    fn default() -> Self {
        Self {
            max_file_bytes: DEFAULT_MAX_FILE_BYTES,
            complexity: if cfg!(feature = "cyclomatic") {
                ComplexityStrategy::Exact
            } else {
                ComplexityStrategy::Unavailable
            },
        }
    }
}

/// Analyze one file from disk.
///
/// Read failures and oversized files yield an all-zero degraded record that
/// still carries the file's language and category.
pub fn analyze_file(file: &ClassifiedFile, settings: &AnalyzerSettings) -> FileOutcome {
    match read_source(&file.path, settings.max_file_bytes) {
        Ok(text) => analyze_text(&text, file.language, settings.complexity),
        Err(reason) => {
            debug!(path = %file.relative, reason = reason.code(), "file degraded");
            FileOutcome::degraded(FileMetrics::empty(file.language(), file.category()), reason)
        }
    }
}

/// Analyze source text already in memory.
pub fn analyze_text(text: &str, language: &LanguageSpec, strategy: ComplexityStrategy) -> FileOutcome {
    let mut metrics = FileMetrics::empty(language.name, language.category.as_str());
    metrics.source.lines = line_stats(text, language.comments);
    metrics.pseudo_complexity = pseudo_complexity(text);

    if !language.is_parseable() {
        return FileOutcome::Analyzed(metrics);
    }

    match repometer_python::parse(text) {
        Ok(module) => {
            let structure = module.structure();
            metrics.num_functions = structure.function_names.len();
            metrics.function_names = structure.function_names;
            metrics.num_classes = structure.num_classes;
            metrics.imports = structure.imports;
            metrics.function_calls = structure.function_calls;
            metrics.complexity = exact_complexity(&module, strategy);
            FileOutcome::Analyzed(metrics)
        }
        Err(ParseError::Syntax { line }) => {
            debug!(line, "syntax error; keeping text metrics only");
            FileOutcome::degraded(metrics, DegradeReason::SyntaxError)
        }
        Err(err) => {
            warn!(error = %err, "python parser failed; keeping text metrics only");
            FileOutcome::degraded(metrics, DegradeReason::SyntaxError)
        }
    }
}

#[cfg_attr(not(feature = "cyclomatic"), allow(unused_variables))]
fn exact_complexity(module: &ParsedModule<'_>, strategy: ComplexityStrategy) -> ComplexityStats {
    match strategy {
        #[cfg(feature = "cyclomatic")]
        ComplexityStrategy::Exact => ComplexityStats::from_values(module.cyclomatic()),
        _ => ComplexityStats::default(),
    }
}
