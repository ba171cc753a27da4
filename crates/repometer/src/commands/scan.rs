use anyhow::Result;
use indexmap::IndexMap;
use repometer_analysis::{AnalyzerSettings, ComplexityStrategy, analyze_file};
use repometer_config::{ScanArgs, ScanSettings, TomlConfig};
use repometer_model::{RepositoryAccumulator, build_report};
use repometer_types::{AnalysisReport, RepositoryReport};
use repometer_walk::{Repository, classify_files, discover_repositories};
use tracing::{debug, info};

pub(crate) fn handle(args: &ScanArgs, config: &TomlConfig) -> Result<()> {
    let settings = ScanSettings::resolve(args, config);
    debug!(?settings, "resolved scan settings");

    let report = scan(&settings)?;
    repometer_format::write_report(&settings.output, &report)?;

    let g = &report.global;
    eprintln!(
        "Analyzed {} files ({} lines, {} degraded) in {} repositories -> {}",
        g.total_source_files,
        g.total_loc,
        g.degraded_files,
        report.repositories.len(),
        settings.output.display()
    );
    Ok(())
}

/// Run the whole pipeline over `settings.root` and assemble the report.
pub(crate) fn scan(settings: &ScanSettings) -> Result<AnalysisReport> {
    let analyzer = AnalyzerSettings {
        max_file_bytes: settings.max_file_bytes,
        complexity: ComplexityStrategy::detect(),
    };

    let repos = discover_repositories(&settings.root, &settings.exclusions)?;
    info!(root = %settings.root.display(), repositories = repos.len(), "scanning");

    let mut reports = IndexMap::with_capacity(repos.len());
    for repo in repos {
        let report = analyze_repository(&repo, settings, &analyzer);
        info!(
            repository = %repo.name,
            files = report.num_source_files,
            lines = report.total_lines,
            "repository analyzed"
        );
        reports.insert(repo.name, report);
    }

    Ok(build_report(reports))
}

fn analyze_repository(
    repo: &Repository,
    settings: &ScanSettings,
    analyzer: &AnalyzerSettings,
) -> RepositoryReport {
    let mut acc = RepositoryAccumulator::new();
    for file in classify_files(&repo.path, &settings.exclusions) {
        let outcome = analyze_file(&file, analyzer);
        acc.push(file.relative, outcome.into_metrics());
    }
    acc.finish()
}
