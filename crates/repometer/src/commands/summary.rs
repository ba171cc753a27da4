use std::io::Write;

use anyhow::{Context, Result};
use repometer_config::{SummaryArgs, SummarySettings, TomlConfig};

pub(crate) fn handle(args: &SummaryArgs, config: &TomlConfig) -> Result<()> {
    let settings = SummarySettings::resolve(args, config);
    let report = repometer_format::read_report(&settings.report)?;
    let markdown = repometer_format::render_markdown(&report, settings.min_count, settings.top);

    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(markdown.as_bytes())
        .context("Failed to write summary to stdout")?;
    stdout.flush().context("Failed to write summary to stdout")?;
    Ok(())
}
