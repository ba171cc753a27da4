//! Fixed extension table mapping source files to a language label, a category
//! label and the comment syntax used for line counting.
//!
//! The table is part of the design, not runtime configuration: labels are
//! stable keys of the JSON report.

#![forbid(unsafe_code)]

use std::path::Path;

use Category::{Code, Config, Data, Docs, Script, Web};
use CommentSyntax as Cs;

/// How comment lines are recognized in a language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommentSyntax {
    /// `# ...` line comments.
    Hash,
    /// `% ...` line comments.
    Percent,
    /// `// ...` line comments and `/* ... */` blocks.
    CStyle,
    /// `<!-- ... -->` blocks.
    Markup,
    /// No recognized comment syntax.
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Code,
    Web,
    Script,
    Docs,
    Data,
    Config,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Code => "code",
            Category::Web => "web",
            Category::Script => "script",
            Category::Docs => "docs",
            Category::Data => "data",
            Category::Config => "config",
        }
    }
}

/// One row of the extension table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageSpec {
    pub name: &'static str,
    pub category: Category,
    pub comments: CommentSyntax,
    /// Lowercase extensions without the leading dot.
    pub extensions: &'static [&'static str],
}

impl LanguageSpec {
    /// Whether a full parser (and therefore exact complexity) exists.
    pub fn is_parseable(&self) -> bool {
        self.name == PYTHON
    }
}

/// Label of the one language with a full parser.
pub const PYTHON: &str = "python";

const fn spec(
    name: &'static str,
    category: Category,
    comments: CommentSyntax,
    extensions: &'static [&'static str],
) -> LanguageSpec {
    LanguageSpec {
        name,
        category,
        comments,
        extensions,
    }
}

/// The extension table, in label order within each category.
pub const LANGUAGES: &[LanguageSpec] = &[
    spec(PYTHON, Code, Cs::Hash, &["py", "pyw"]),
    spec("matlab", Code, Cs::Percent, &["m"]),
    spec("r", Code, Cs::Hash, &["r"]),
    spec("julia", Code, Cs::Hash, &["jl"]),
    spec("c", Code, Cs::CStyle, &["c", "h"]),
    spec("cpp", Code, Cs::CStyle, &["cpp", "cc", "cxx", "hpp", "hh"]),
    spec("java", Code, Cs::CStyle, &["java"]),
    spec("csharp", Code, Cs::CStyle, &["cs"]),
    spec("go", Code, Cs::CStyle, &["go"]),
    spec("rust", Code, Cs::CStyle, &["rs"]),
    spec("javascript", Web, Cs::CStyle, &["js", "mjs", "cjs", "jsx"]),
    spec("typescript", Web, Cs::CStyle, &["ts", "tsx"]),
    spec("css", Web, Cs::CStyle, &["css", "scss"]),
    spec("html", Web, Cs::Markup, &["html", "htm"]),
    spec("shell", Script, Cs::Hash, &["sh", "bash", "zsh"]),
    spec("powershell", Script, Cs::Hash, &["ps1"]),
    spec("latex", Docs, Cs::Percent, &["tex"]),
    spec("markdown", Docs, Cs::Markup, &["md"]),
    spec("rst", Docs, Cs::None, &["rst"]),
    spec("text", Docs, Cs::None, &["txt"]),
    spec("xml", Data, Cs::Markup, &["xml", "svg"]),
    spec("json", Data, Cs::None, &["json"]),
    spec("csv", Data, Cs::None, &["csv", "tsv"]),
    spec("yaml", Config, Cs::Hash, &["yaml", "yml"]),
    spec("toml", Config, Cs::Hash, &["toml"]),
    spec("ini", Config, Cs::Hash, &["ini", "cfg"]),
];

/// Look up a language by extension (without the dot, any case).
pub fn from_extension(ext: &str) -> Option<&'static LanguageSpec> {
    let ext = ext.to_ascii_lowercase();
    LANGUAGES
        .iter()
        .find(|lang| lang.extensions.contains(&ext.as_str()))
}

/// Look up a language from a path's extension.
///
/// Files without an extension (including dotfiles such as `.bashrc`) are not
/// recognized.
pub fn from_path(path: &Path) -> Option<&'static LanguageSpec> {
    let ext = path.extension()?.to_str()?;
    from_extension(ext)
}

/// Look up a language by its report label.
pub fn by_name(name: &str) -> Option<&'static LanguageSpec> {
    LANGUAGES.iter().find(|lang| lang.name == name)
}

/// Comment syntax for a language label; unknown labels have none.
pub fn comment_syntax(name: &str) -> CommentSyntax {
    by_name(name)
        .map(|lang| lang.comments)
        .unwrap_or(CommentSyntax::None)
}
