use anyhow::Error;

pub(crate) fn format(err: &Error) -> String {
    let mut out = format!("Error: {err:#}");
    let hints = suggestions(err);
    if !hints.is_empty() {
        out.push_str("\n\nHints:\n");
        for hint in hints {
            out.push_str("- ");
            out.push_str(&hint);
            out.push('\n');
        }
    }
    out
}

fn suggestions(err: &Error) -> Vec<String> {
    let chain: Vec<String> = err.chain().map(|e| e.to_string()).collect();
    let haystack = chain.join(" | ").to_ascii_lowercase();
    let mut out: Vec<String> = Vec::new();

    if haystack.contains("input path does not exist")
        || haystack.contains("input path is not a directory")
    {
        push_hint(
            &mut out,
            "Pass the folder that contains one subdirectory per repository: `repometer scan <ROOT>`.",
        );
        push_hint(
            &mut out,
            "Use an absolute path to avoid working-directory confusion.",
        );
    }

    if haystack.contains("config file not found") {
        push_hint(
            &mut out,
            "Check the `--config` path, or drop the flag to use ./repometer.toml when present.",
        );
    }

    if haystack.contains("invalid toml") {
        push_hint(
            &mut out,
            "Check `repometer.toml` syntax and key names: sections are [scan] and [report].",
        );
    }

    if haystack.contains("failed to read report") {
        push_hint(
            &mut out,
            "Run `repometer scan` first, or pass the report path: `repometer summary <REPORT>`.",
        );
    }

    if haystack.contains("invalid report json") {
        push_hint(
            &mut out,
            "The file is not a repometer report; regenerate it with `repometer scan`.",
        );
    }

    if haystack.contains("failed to create") || haystack.contains("failed to write report") {
        push_hint(
            &mut out,
            "Choose a writable destination with `--output <PATH>`.",
        );
    }

    out
}

fn push_hint(out: &mut Vec<String>, hint: &str) {
    if !out.iter().any(|h| h == hint) {
        out.push(hint.to_string());
    }
}

#[cfg(test)]
mod tests {
    use anyhow::anyhow;

    use super::{format, suggestions};

    #[test]
    fn suggests_for_missing_root() {
        let err = anyhow!("input path does not exist: repos");
        let hints = suggestions(&err);
        assert!(hints.iter().any(|h| h.contains("repometer scan <ROOT>")));
    }

    #[test]
    fn suggests_for_missing_report() {
        let err = anyhow!("No such file or directory (os error 2)")
            .context("Failed to read report results/analysis.json");
        let hints = suggestions(&err);
        assert!(hints.iter().any(|h| h.contains("repometer summary <REPORT>")));
    }

    #[test]
    fn suggests_for_bad_toml() {
        let err = anyhow!("invalid TOML in repometer.toml");
        assert_eq!(suggestions(&err).len(), 1);
    }

    #[test]
    fn unknown_errors_have_no_hints() {
        let rendered = format(&anyhow!("something else"));
        assert_eq!(rendered, "Error: something else");
    }

    #[test]
    fn format_includes_hints_section() {
        let err = anyhow!("input path is not a directory: a.txt");
        let rendered = format(&err);
        assert!(rendered.starts_with("Error:"));
        assert!(rendered.contains("Hints:"));
    }
}
