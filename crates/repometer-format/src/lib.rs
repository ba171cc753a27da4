//! # repometer-format
//!
//! **Tier 2 (Formatting)**
//!
//! Persists the [`AnalysisReport`] as pretty JSON and renders a Markdown
//! summary from a written report.
//!
//! ## What belongs here
//! * JSON writing and reading
//! * Markdown table rendering
//!
//! ## What does NOT belong here
//! * Computing metrics or rollups

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use repometer_model::{python_panel, repository_complexity};
use repometer_types::AnalysisReport;
use tracing::debug;

/// Write `report` to `path` as 2-space indented JSON with a trailing newline.
///
/// Missing parent directories are created and an existing file is replaced.
pub fn write_report(path: &Path, report: &AnalysisReport) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory {}", parent.display()))?;
    }
    let file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    let mut out = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut out, report)
        .with_context(|| format!("Failed to write report to {}", path.display()))?;
    writeln!(out).with_context(|| format!("Failed to write report to {}", path.display()))?;
    out.flush()
        .with_context(|| format!("Failed to write report to {}", path.display()))?;
    debug!(path = %path.display(), "report written");
    Ok(())
}

/// Load a report previously produced by [`write_report`].
pub fn read_report(path: &Path) -> Result<AnalysisReport> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read report {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Invalid report JSON in {}", path.display()))
}

/// Render global totals, language and category tables, the Python panel,
/// complexity per repository, and the import ranking filtered to
/// `count >= min_count`, limited to `top` rows (0 = all).
pub fn render_markdown(report: &AnalysisReport, min_count: usize, top: usize) -> String {
    let mut s = String::new();
    let g = &report.global;

    s.push_str("# Repository metrics\n\n");
    s.push_str("|Repositories|Files|Lines|Functions|Degraded|\n");
    s.push_str("|---:|---:|---:|---:|---:|\n");
    s.push_str(&format!(
        "|{}|{}|{}|{}|{}|\n",
        report.repositories.len(),
        g.total_source_files,
        g.total_loc,
        g.total_functions,
        g.degraded_files
    ));

    s.push_str("\n## Languages\n\n");
    s.push_str("|Language|Files|Lines|Comments|Functions|Classes|Radon CC|Pseudo CC|Pseudo/kLOC|\n");
    s.push_str("|---|---:|---:|---:|---:|---:|---:|---:|---:|\n");
    for (name, lang) in &report.languages {
        let t = &lang.totals;
        s.push_str(&format!(
            "|{}|{}|{}|{}|{}|{}|{:.0}|{}|{:.1}|\n",
            name,
            lang.num_files,
            t.total_loc,
            t.total_comments,
            t.total_functions,
            t.total_classes,
            t.total_radon_complexity,
            t.total_pseudo_complexity,
            t.pseudo_complexity_per_kloc
        ));
    }

    s.push_str("\n## Categories\n\n");
    s.push_str("|Category|Files|Lines|Comments|Comment ratio|Pseudo CC|\n");
    s.push_str("|---|---:|---:|---:|---:|---:|\n");
    for (name, cat) in &report.categories {
        let t = &cat.totals;
        s.push_str(&format!(
            "|{}|{}|{}|{}|{:.2}|{}|\n",
            name,
            cat.total_files,
            t.total_loc,
            t.total_comments,
            t.comment_ratio,
            t.total_pseudo_complexity
        ));
    }

    let py = python_panel(report);
    s.push_str("\n## Python\n\n");
    s.push_str("|Files|Lines|Functions|Defs/file|Defs/kLOC|Avg function length|Avg CC|Comment ratio|\n");
    s.push_str("|---:|---:|---:|---:|---:|---:|---:|---:|\n");
    s.push_str(&format!(
        "|{}|{}|{}|{:.2}|{:.1}|{:.1}|{:.2}|{:.2}|\n",
        py.files,
        py.loc,
        py.functions,
        py.defs_per_file,
        py.defs_per_kloc,
        py.avg_function_length,
        py.avg_cyclomatic_complexity,
        py.comment_ratio
    ));

    s.push_str("\n## Complexity by repository\n\n");
    let repos = repository_complexity(report);
    if repos.is_empty() {
        s.push_str("_No repositories._\n");
    } else {
        s.push_str("|Repository|Blocks|Avg file CC|Max file CC|\n");
        s.push_str("|---|---:|---:|---:|\n");
        for r in &repos {
            s.push_str(&format!(
                "|{}|{}|{:.2}|{:.0}|\n",
                r.name, r.blocks, r.avg_file_cc, r.max_file_cc
            ));
        }
    }

    s.push_str(&format!("\n## Imports (count >= {min_count})\n\n"));
    let limit = if top == 0 { usize::MAX } else { top };
    let rows: Vec<_> = g
        .global_import_counts
        .iter()
        .filter(|(_, count)| *count >= min_count)
        .take(limit)
        .collect();
    if rows.is_empty() {
        s.push_str("_No imports at this threshold._\n");
        return s;
    }

    s.push_str("|Module|Count|Per file|\n");
    s.push_str("|---|---:|---:|\n");
    for (module, count) in rows {
        let per_file = g
            .global_import_relative_freq
            .iter()
            .find(|(m, _)| m == module)
            .map_or(0.0, |(_, f)| *f);
        s.push_str(&format!("|{module}|{count}|{per_file:.2}|\n"));
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_report_renders_placeholder_for_imports() {
        let md = render_markdown(&AnalysisReport::default(), 1, 0);
        assert!(md.starts_with("# Repository metrics\n"));
        assert!(md.contains("|0|0|0|0|0|"));
        assert!(md.contains("|0|0|0|0.00|0.0|0.0|0.00|0.00|"));
        assert!(md.contains("_No repositories._\n"));
        assert!(md.ends_with("_No imports at this threshold._\n"));
    }

    #[test]
    fn write_creates_parent_and_ends_with_newline() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/out/analysis.json");
        write_report(&path, &AnalysisReport::default()).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.ends_with("}\n"));
        assert!(text.contains("\n  \"_global\": {"));
    }

    #[test]
    fn read_report_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "not json").unwrap();
        let err = read_report(&path).unwrap_err();
        assert!(format!("{err:#}").contains("Invalid report JSON"));
    }
}
