//! # repometer-types
//!
//! **Tier 0 (Core Types)**
//!
//! This crate defines the data structures written to (and read back from) the
//! `analysis.json` report. It contains only data types and their Serde shape.
//!
//! ## Stability Policy
//!
//! **JSON-first stability**: the primary contract is the JSON document, not
//! Rust struct literals. Key names are relied on by downstream rendering
//! scripts; renaming or removing one is a breaking change.
//!
//! ## What belongs here
//! * Per-file records (`SourceFile`, `FileMetrics`, `FileOutcome`)
//! * Rollups (`RepositoryReport`, `LanguageSummary`, `CategorySummary`, `GlobalSummary`)
//! * The top-level `AnalysisReport` and its reserved keys
//!
//! ## What does NOT belong here
//! * File I/O
//! * CLI argument parsing
//! * Aggregation logic (use repometer-model)

use std::collections::BTreeMap;
use std::fmt;

use indexmap::IndexMap;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Top-level key holding the [`GlobalSummary`].
pub const GLOBAL_KEY: &str = "_global";
/// Top-level key holding the per-language rollups.
pub const LANGUAGES_KEY: &str = "_languages";
/// Top-level key holding the per-category rollups.
pub const CATEGORIES_KEY: &str = "_categories";

/// Keys that can never be used as a repository name.
pub const RESERVED_KEYS: [&str; 3] = [GLOBAL_KEY, LANGUAGES_KEY, CATEGORIES_KEY];

/// Returns `true` when `name` collides with a reserved top-level key.
pub fn is_reserved_key(name: &str) -> bool {
    RESERVED_KEYS.contains(&name)
}

/// Module name -> occurrence count, in first-seen order.
pub type ImportCounts = IndexMap<String, usize>;

/// `[module, count]` pairs sorted by descending count.
pub type RankedCounts = Vec<(String, usize)>;

/// `[module, ratio]` pairs sorted by descending ratio.
pub type RankedRatios = Vec<(String, f64)>;

// ---------------------------------------------------------------------------
// Per-file records
// ---------------------------------------------------------------------------

/// Plain-text line statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineStats {
    /// Total line count, blank and comment lines included.
    pub loc: usize,
    pub num_comments: usize,
    pub num_blank: usize,
}

impl LineStats {
    /// Lines that are neither blank nor whitespace-only.
    pub fn non_blank(&self) -> usize {
        self.loc - self.num_blank
    }
}

/// Identity-independent attributes of a discovered file.
///
/// The identity (repository name + relative path) is the key under which the
/// record is stored, so it is not repeated here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFile {
    pub language: String,
    pub category: String,
    #[serde(flatten)]
    pub lines: LineStats,
}

/// Exact (AST-based) cyclomatic complexity of one file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComplexityStats {
    pub avg_cc: f64,
    pub max_cc: f64,
    pub total_cc: f64,
    pub num_entities: usize,
    /// One score per function, method or class, in discovery order.
    pub cc_values: Vec<u32>,
}

impl ComplexityStats {
    /// Derive the summary fields from per-block scores.
    ///
    /// An empty list yields the all-zero record.
    pub fn from_values(cc_values: Vec<u32>) -> Self {
        if cc_values.is_empty() {
            return Self::default();
        }
        let total: u64 = cc_values.iter().map(|v| u64::from(*v)).sum();
        let max = cc_values.iter().copied().max().unwrap_or(0);
        let total_cc = total as f64;
        Self {
            avg_cc: total_cc / cc_values.len() as f64,
            max_cc: f64::from(max),
            total_cc,
            num_entities: cc_values.len(),
            cc_values,
        }
    }
}

/// Keyword-counting complexity estimate, available for any text file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PseudoComplexity {
    pub keyword_hits: usize,
    pub comprehensions: usize,
    /// `keyword_hits + comprehensions`.
    pub decision_points: usize,
}

impl PseudoComplexity {
    pub fn new(keyword_hits: usize, comprehensions: usize) -> Self {
        Self {
            keyword_hits,
            comprehensions,
            decision_points: keyword_hits + comprehensions,
        }
    }
}

/// Why a file's record carries less than a full analysis.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, thiserror::Error,
)]
#[serde(rename_all = "snake_case")]
pub enum DegradeReason {
    /// The file could not be opened or read; every field is zero.
    #[error("file could not be read")]
    Unreadable,
    /// The file exceeds the configured byte limit; every field is zero.
    #[error("file exceeds the size limit")]
    TooLarge,
    /// The source did not parse; only the plain-text fields are populated.
    #[error("source failed to parse")]
    SyntaxError,
}

impl DegradeReason {
    /// Stable reason code used in logs and the JSON document.
    pub fn code(self) -> &'static str {
        match self {
            DegradeReason::Unreadable => "unreadable",
            DegradeReason::TooLarge => "too_large",
            DegradeReason::SyntaxError => "syntax_error",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileStatus {
    #[default]
    Ok,
    Degraded(DegradeReason),
}

impl FileStatus {
    pub fn is_ok(self) -> bool {
        matches!(self, FileStatus::Ok)
    }
}

/// The metrics record stored for every discovered file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileMetrics {
    #[serde(flatten)]
    pub source: SourceFile,
    pub num_functions: usize,
    pub function_names: Vec<String>,
    pub num_classes: usize,
    pub imports: ImportCounts,
    pub function_calls: Vec<String>,
    pub complexity: ComplexityStats,
    pub pseudo_complexity: PseudoComplexity,
    #[serde(default)]
    pub status: FileStatus,
}

impl FileMetrics {
    /// An all-zero record that still carries its language labels.
    pub fn empty(language: &str, category: &str) -> Self {
        Self {
            source: SourceFile {
                language: language.to_string(),
                category: category.to_string(),
                lines: LineStats::default(),
            },
            ..Default::default()
        }
    }

    pub fn loc(&self) -> usize {
        self.source.lines.loc
    }

    pub fn language(&self) -> &str {
        &self.source.language
    }

    pub fn category(&self) -> &str {
        &self.source.category
    }
}

/// Result of analyzing one file: either a full record or a degraded one.
#[derive(Debug, Clone, PartialEq)]
pub enum FileOutcome {
    Analyzed(FileMetrics),
    Degraded {
        metrics: FileMetrics,
        reason: DegradeReason,
    },
}

impl FileOutcome {
    /// Build a degraded outcome, stamping the reason into the record status.
    pub fn degraded(mut metrics: FileMetrics, reason: DegradeReason) -> Self {
        metrics.status = FileStatus::Degraded(reason);
        FileOutcome::Degraded { metrics, reason }
    }

    pub fn reason(&self) -> Option<DegradeReason> {
        match self {
            FileOutcome::Analyzed(_) => None,
            FileOutcome::Degraded { reason, .. } => Some(*reason),
        }
    }

    pub fn metrics(&self) -> &FileMetrics {
        match self {
            FileOutcome::Analyzed(metrics) | FileOutcome::Degraded { metrics, .. } => metrics,
        }
    }

    pub fn into_metrics(self) -> FileMetrics {
        match self {
            FileOutcome::Analyzed(metrics) | FileOutcome::Degraded { metrics, .. } => metrics,
        }
    }
}

// ---------------------------------------------------------------------------
// Rollups
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RepositoryReport {
    pub total_lines: usize,
    pub num_source_files: usize,
    pub total_functions: usize,
    pub total_classes: usize,
    pub total_comments: usize,
    pub avg_functions_per_file: f64,
    pub imports: RankedCounts,
    /// Relative path -> record, in traversal order.
    pub files: IndexMap<String, FileMetrics>,
}

/// Sums shared by the language and category rollups.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RollupTotals {
    pub total_loc: usize,
    pub total_comments: usize,
    pub total_blank: usize,
    pub total_functions: usize,
    pub total_classes: usize,
    pub total_radon_complexity: f64,
    pub total_pseudo_complexity: usize,
    pub comment_ratio: f64,
    pub pseudo_complexity_per_kloc: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LanguageSummary {
    pub num_files: usize,
    #[serde(flatten)]
    pub totals: RollupTotals,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub total_files: usize,
    #[serde(flatten)]
    pub totals: RollupTotals,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GlobalSummary {
    pub total_source_files: usize,
    pub total_loc: usize,
    pub total_functions: usize,
    #[serde(default)]
    pub degraded_files: usize,
    pub global_import_counts: RankedCounts,
    pub global_import_relative_freq: RankedRatios,
}

// ---------------------------------------------------------------------------
// Top-level document
// ---------------------------------------------------------------------------

/// The complete report of one run.
///
/// Serializes as a single JSON object: one key per repository (traversal
/// order) followed by [`GLOBAL_KEY`], [`LANGUAGES_KEY`] and [`CATEGORIES_KEY`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalysisReport {
    pub repositories: IndexMap<String, RepositoryReport>,
    pub global: GlobalSummary,
    pub languages: BTreeMap<String, LanguageSummary>,
    pub categories: BTreeMap<String, CategorySummary>,
}

impl Serialize for AnalysisReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.repositories.len() + 3))?;
        for (name, repo) in &self.repositories {
            map.serialize_entry(name, repo)?;
        }
        map.serialize_entry(GLOBAL_KEY, &self.global)?;
        map.serialize_entry(LANGUAGES_KEY, &self.languages)?;
        map.serialize_entry(CATEGORIES_KEY, &self.categories)?;
        map.end()
    }
}

impl<'de> Deserialize<'de> for AnalysisReport {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ReportVisitor;

        impl<'de> Visitor<'de> for ReportVisitor {
            type Value = AnalysisReport;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a repometer analysis report object")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut report = AnalysisReport::default();
                while let Some(key) = access.next_key::<String>()? {
                    match key.as_str() {
                        GLOBAL_KEY => report.global = access.next_value()?,
                        LANGUAGES_KEY => report.languages = access.next_value()?,
                        CATEGORIES_KEY => report.categories = access.next_value()?,
                        _ => {
                            let repo: RepositoryReport = access.next_value()?;
                            report.repositories.insert(key, repo);
                        }
                    }
                }
                Ok(report)
            }
        }

        deserializer.deserialize_map(ReportVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complexity_from_empty_values_is_zero() {
        let stats = ComplexityStats::from_values(Vec::new());
        assert_eq!(stats, ComplexityStats::default());
    }

    #[test]
    fn complexity_from_values_derives_summary() {
        let stats = ComplexityStats::from_values(vec![1, 4, 1]);
        assert_eq!(stats.num_entities, 3);
        assert_eq!(stats.total_cc, 6.0);
        assert_eq!(stats.max_cc, 4.0);
        assert_eq!(stats.avg_cc, 2.0);
    }

    #[test]
    fn pseudo_complexity_sums_both_counts() {
        let pc = PseudoComplexity::new(3, 2);
        assert_eq!(pc.decision_points, 5);
    }

    #[test]
    fn degraded_outcome_stamps_status() {
        let outcome = FileOutcome::degraded(
            FileMetrics::empty("python", "code"),
            DegradeReason::SyntaxError,
        );
        assert_eq!(outcome.reason(), Some(DegradeReason::SyntaxError));
        assert_eq!(
            outcome.metrics().status,
            FileStatus::Degraded(DegradeReason::SyntaxError)
        );
    }

    #[test]
    fn reserved_keys_are_detected() {
        assert!(is_reserved_key("_global"));
        assert!(is_reserved_key("_languages"));
        assert!(!is_reserved_key("_private_repo"));
    }
}
