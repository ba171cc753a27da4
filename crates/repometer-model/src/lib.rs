//! # repometer-model
//!
//! **Tier 1 (Logic)**
//!
//! Folds per-file records into the report rollups. Every function here is
//! pure: the same records in the same order give the same report.
//!
//! ## What belongs here
//! * Repository accumulation
//! * Language, category and global summaries
//! * Import rankings and ratios
//! * Derived views read from a finished report (Python panel, complexity
//!   per repository)
//!
//! ## What does NOT belong here
//! * File analysis (use repometer-analysis)
//! * Serialization (use repometer-format)

use std::collections::BTreeMap;

use indexmap::IndexMap;
use repometer_types::{
    AnalysisReport, CategorySummary, FileMetrics, GlobalSummary, ImportCounts, LanguageSummary,
    RankedCounts, RankedRatios, RepositoryReport, RollupTotals,
};

/// `numer / denom`, or `0.0` when `denom` is zero.
pub fn ratio(numer: f64, denom: f64) -> f64 {
    if denom == 0.0 { 0.0 } else { numer / denom }
}

/// Counts sorted by descending count; equal counts keep first-seen order.
pub fn rank_counts(counts: &ImportCounts) -> RankedCounts {
    let mut ranked: RankedCounts = counts.iter().map(|(k, v)| (k.clone(), *v)).collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked
}

/// Each count divided by `total_files`, ranked like [`rank_counts`].
pub fn rank_ratios(counts: &ImportCounts, total_files: usize) -> RankedRatios {
    let mut ranked: RankedRatios = counts
        .iter()
        .map(|(k, v)| (k.clone(), ratio(*v as f64, total_files as f64)))
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked
}

fn merge_imports(into: &mut ImportCounts, from: &ImportCounts) {
    for (module, count) in from {
        *into.entry(module.clone()).or_insert(0) += count;
    }
}

/// Builds one [`RepositoryReport`] from files pushed in traversal order.
#[derive(Debug, Default)]
pub struct RepositoryAccumulator {
    report: RepositoryReport,
    imports: ImportCounts,
}

impl RepositoryAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, path: impl Into<String>, metrics: FileMetrics) {
        let r = &mut self.report;
        r.total_lines += metrics.loc();
        r.num_source_files += 1;
        r.total_functions += metrics.num_functions;
        r.total_classes += metrics.num_classes;
        r.total_comments += metrics.source.lines.num_comments;
        merge_imports(&mut self.imports, &metrics.imports);
        r.files.insert(path.into(), metrics);
    }

    pub fn len(&self) -> usize {
        self.report.num_source_files
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn finish(self) -> RepositoryReport {
        let mut report = self.report;
        report.avg_functions_per_file = ratio(
            report.total_functions as f64,
            report.num_source_files as f64,
        );
        report.imports = rank_counts(&self.imports);
        report
    }
}

fn add_file(totals: &mut RollupTotals, m: &FileMetrics) {
    totals.total_loc += m.loc();
    totals.total_comments += m.source.lines.num_comments;
    totals.total_blank += m.source.lines.num_blank;
    totals.total_functions += m.num_functions;
    totals.total_classes += m.num_classes;
    totals.total_radon_complexity += m.complexity.total_cc;
    totals.total_pseudo_complexity += m.pseudo_complexity.decision_points;
}

fn finish_totals(totals: &mut RollupTotals) {
    let loc = totals.total_loc as f64;
    totals.comment_ratio = ratio(totals.total_comments as f64, loc);
    totals.pseudo_complexity_per_kloc = ratio(totals.total_pseudo_complexity as f64, loc / 1000.0);
}

/// Cross-repository rollups.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Rollups {
    pub global: GlobalSummary,
    pub languages: BTreeMap<String, LanguageSummary>,
    pub categories: BTreeMap<String, CategorySummary>,
}

/// Summarize every file of every repository, visiting repositories and
/// files in map order.
pub fn summarize(repositories: &IndexMap<String, RepositoryReport>) -> Rollups {
    let mut rollups = Rollups::default();
    let mut imports = ImportCounts::new();

    for repo in repositories.values() {
        for metrics in repo.files.values() {
            let global = &mut rollups.global;
            global.total_source_files += 1;
            global.total_loc += metrics.loc();
            global.total_functions += metrics.num_functions;
            if !metrics.status.is_ok() {
                global.degraded_files += 1;
            }
            merge_imports(&mut imports, &metrics.imports);

            let lang = rollups
                .languages
                .entry(metrics.language().to_string())
                .or_default();
            lang.num_files += 1;
            add_file(&mut lang.totals, metrics);

            let cat = rollups
                .categories
                .entry(metrics.category().to_string())
                .or_default();
            cat.total_files += 1;
            add_file(&mut cat.totals, metrics);
        }
    }

    for lang in rollups.languages.values_mut() {
        finish_totals(&mut lang.totals);
    }
    for cat in rollups.categories.values_mut() {
        finish_totals(&mut cat.totals);
    }

    let total_files = rollups.global.total_source_files;
    rollups.global.global_import_counts = rank_counts(&imports);
    rollups.global.global_import_relative_freq = rank_ratios(&imports, total_files);
    rollups
}

/// Assemble the full report from finished repositories.
pub fn build_report(repositories: IndexMap<String, RepositoryReport>) -> AnalysisReport {
    let Rollups {
        global,
        languages,
        categories,
    } = summarize(&repositories);
    AnalysisReport {
        repositories,
        global,
        languages,
        categories,
    }
}

/// Python-only headline numbers derived from a finished report.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PythonPanel {
    pub files: usize,
    pub loc: usize,
    pub functions: usize,
    pub defs_per_file: f64,
    pub defs_per_kloc: f64,
    /// Mean over Python files with functions of `loc / num_functions`.
    pub avg_function_length: f64,
    /// Mean of every Python block score in every repository.
    pub avg_cyclomatic_complexity: f64,
    pub comment_ratio: f64,
}

pub fn python_panel(report: &AnalysisReport) -> PythonPanel {
    let totals = report
        .languages
        .get("python")
        .map(|lang| (lang.num_files, &lang.totals));
    let (files, loc, functions, comments) = totals.map_or((0, 0, 0, 0), |(n, t)| {
        (n, t.total_loc, t.total_functions, t.total_comments)
    });

    let mut lengths = Vec::new();
    let (mut cc_sum, mut cc_count) = (0u64, 0usize);
    for metrics in report.repositories.values().flat_map(|r| r.files.values()) {
        if metrics.language() != "python" {
            continue;
        }
        cc_sum += metrics.complexity.cc_values.iter().map(|&v| u64::from(v)).sum::<u64>();
        cc_count += metrics.complexity.cc_values.len();
        if metrics.num_functions > 0 {
            lengths.push(ratio(metrics.loc() as f64, metrics.num_functions as f64));
        }
    }

    PythonPanel {
        files,
        loc,
        functions,
        defs_per_file: ratio(functions as f64, files as f64),
        defs_per_kloc: ratio(functions as f64, loc as f64 / 1000.0),
        avg_function_length: ratio(lengths.iter().sum(), lengths.len() as f64),
        avg_cyclomatic_complexity: ratio(cc_sum as f64, cc_count as f64),
        comment_ratio: ratio(comments as f64, loc as f64),
    }
}

/// Block complexity of one repository, over files that have scored blocks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RepositoryComplexity {
    pub name: String,
    pub blocks: usize,
    /// Mean of the per-file `avg_cc`.
    pub avg_file_cc: f64,
    /// Largest per-file `max_cc`, `0` without scored files.
    pub max_file_cc: f64,
}

/// One entry per repository, in report order.
pub fn repository_complexity(report: &AnalysisReport) -> Vec<RepositoryComplexity> {
    report
        .repositories
        .iter()
        .map(|(name, repo)| {
            let scored: Vec<_> = repo
                .files
                .values()
                .map(|m| &m.complexity)
                .filter(|c| !c.cc_values.is_empty())
                .collect();
            let avg_sum: f64 = scored.iter().map(|c| c.avg_cc).sum();
            RepositoryComplexity {
                name: name.clone(),
                blocks: scored.iter().map(|c| c.cc_values.len()).sum(),
                avg_file_cc: ratio(avg_sum, scored.len() as f64),
                max_file_cc: scored.iter().map(|c| c.max_cc).fold(0.0, f64::max),
            }
        })
        .collect()
}
