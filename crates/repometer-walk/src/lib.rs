//! # repometer-walk
//!
//! **Tier 2 (Utilities)**
//!
//! Repository discovery and classified file listing. Turns a root directory
//! into repositories, and each repository into a lazy, deterministic sequence
//! of files tagged with their language and category.
//!
//! ## What belongs here
//! * Listing repositories under the input root
//! * Filesystem traversal with directory-name exclusions
//! * Mapping files onto the extension table
//!
//! ## What does NOT belong here
//! * Reading file contents (use repometer-content)
//! * Metric computation

use std::collections::BTreeSet;
use std::path::{Component, Path, PathBuf};

use anyhow::{Context, Result, bail};
use ignore::{DirEntry, Walk, WalkBuilder};
use repometer_lang::LanguageSpec;
use tracing::{debug, warn};

/// Directory names skipped unless the configuration says otherwise.
pub const DEFAULT_EXCLUDED_DIRS: &[&str] = &[
    ".git",
    ".hg",
    ".svn",
    "__pycache__",
    ".venv",
    "venv",
    "env",
    "node_modules",
    ".mypy_cache",
    ".pytest_cache",
    ".tox",
    ".ipynb_checkpoints",
    "site-packages",
    "build",
    "dist",
    "_exclude",
];

/// A set of directory names; any path with a matching component is skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exclusions {
    names: BTreeSet<String>,
}

impl Default for Exclusions {
    fn default() -> Self {
        Self::new(DEFAULT_EXCLUDED_DIRS.iter().copied())
    }
}

impl Exclusions {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names = names
            .into_iter()
            .map(Into::into)
            .filter(|name: &String| !name.is_empty())
            .collect();
        Self { names }
    }

    /// Add names on top of the current set.
    pub fn extend<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.names.extend(
            names
                .into_iter()
                .map(Into::into)
                .filter(|name: &String| !name.is_empty()),
        );
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

/// A repository directory directly under the input root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    pub name: String,
    pub path: PathBuf,
}

/// List repositories under `root`, sorted by name.
///
/// Plain files at the top level are ignored; symlinks to directories are
/// repositories. Directories whose name is excluded or collides with a
/// reserved report key are skipped.
pub fn discover_repositories(root: &Path, exclusions: &Exclusions) -> Result<Vec<Repository>> {
    if !root.exists() {
        bail!("input path does not exist: {}", root.display());
    }
    if !root.is_dir() {
        bail!("input path is not a directory: {}", root.display());
    }

    let entries = std::fs::read_dir(root)
        .with_context(|| format!("Failed to list repositories in {}", root.display()))?;

    let mut repos = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                debug!(error = %err, "skipping unreadable entry");
                continue;
            }
        };
        if !entry.path().is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().to_string();
        if exclusions.contains(&name) {
            debug!(repository = %name, "skipping excluded directory");
            continue;
        }
        if repometer_types::is_reserved_key(&name) {
            warn!(repository = %name, "skipping directory named like a reserved report key");
            continue;
        }
        repos.push(Repository {
            name,
            path: entry.path(),
        });
    }

    repos.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(repos)
}

/// A file whose extension appears in the extension table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedFile {
    pub path: PathBuf,
    /// Path relative to the walked root, `/`-separated.
    pub relative: String,
    pub language: &'static LanguageSpec,
}

impl ClassifiedFile {
    pub fn language(&self) -> &'static str {
        self.language.name
    }

    pub fn category(&self) -> &'static str {
        self.language.category.as_str()
    }
}

/// Lazy iterator returned by [`classify_files`].
pub struct ClassifiedFiles {
    root: PathBuf,
    walk: Walk,
}

impl Iterator for ClassifiedFiles {
    type Item = ClassifiedFile;

    fn next(&mut self) -> Option<ClassifiedFile> {
        loop {
            let entry = match self.walk.next()? {
                Ok(entry) => entry,
                Err(err) => {
                    debug!(error = %err, "skipping unreadable path");
                    continue;
                }
            };
            if let Some(file) = classify_entry(&self.root, &entry) {
                return Some(file);
            }
        }
    }
}

fn classify_entry(root: &Path, entry: &DirEntry) -> Option<ClassifiedFile> {
    if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
        return None;
    }
    let language = repometer_lang::from_path(entry.path())?;
    let path = entry.path().to_path_buf();
    let rel = path.strip_prefix(root).unwrap_or(&path);
    Some(ClassifiedFile {
        relative: normalize_rel_path(rel),
        path,
        language,
    })
}

/// Walk `root` and yield every recognized file, in file-name order.
///
/// Hidden files are included and ignore files are not consulted; only the
/// exclusion set prunes the walk. A symlinked `root` is resolved first;
/// symlinks below it are not followed.
pub fn classify_files(root: &Path, exclusions: &Exclusions) -> ClassifiedFiles {
    let root = if root.is_symlink() {
        std::fs::canonicalize(root).unwrap_or_else(|_| root.to_path_buf())
    } else {
        root.to_path_buf()
    };
    let excluded = exclusions.clone();
    let mut builder = WalkBuilder::new(&root);
    builder.standard_filters(false);
    builder.follow_links(false);
    builder.sort_by_file_name(|a, b| a.cmp(b));
    builder.filter_entry(move |entry| {
        let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
        entry.depth() == 0 || !is_dir || !excluded.contains(&entry.file_name().to_string_lossy())
    });

    ClassifiedFiles {
        root,
        walk: builder.build(),
    }
}

/// Render a relative path with `/` separators and no leading `./`.
pub fn normalize_rel_path(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
