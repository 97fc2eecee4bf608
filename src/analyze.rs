//! Heuristic per-file analysis.
//!
//! Everything in this module is regex-based and best-effort: language is
//! guessed from the extension, metrics are keyword counts, and import
//! extraction only looks at the first lines of a file. None of it claims
//! exactness and none of it parses the language for real.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::path::Path;

/// How many leading lines are scanned for import names.
const IMPORT_SCAN_LINES: usize = 50;
/// At most this many import names are reported.
const IMPORT_CAP: usize = 10;
/// Files with more physical lines than this get a large-file flag.
const LARGE_FILE_LINES: usize = 1200;

/// Result of analyzing one file.
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    /// Language tag guessed from the extension; empty when unknown.
    pub lang: String,
    /// Physical line count.
    pub loc: usize,
    /// Function-definition count proxy.
    pub fn_count: usize,
    /// Branch-keyword count.
    pub branch_count: usize,
    /// `1 + branch_count`: a crude complexity score, nothing more.
    pub cyclomatic_proxy: usize,
    /// Import names scanned from the head of the file, deduplicated.
    pub imports: Vec<String>,
    /// Human-readable heuristic warnings.
    pub smells: Vec<String>,
    pub has_imports: bool,
    pub has_exports: bool,
    /// TODO/FIXME/HACK/BUG token count.
    pub todos: usize,
    /// A language-appropriate header-comment template for this file.
    pub header_suggestion: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Family {
    JsLike,
    Python,
    Go,
    Shell,
    Other,
}

fn family_of(lang: &str) -> Family {
    match lang {
        "javascript" | "typescript" | "tsx" | "jsx" => Family::JsLike,
        "python" => Family::Python,
        "go" => Family::Go,
        "bash" | "shell" => Family::Shell,
        _ => Family::Other,
    }
}

static JS_IMPORT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?m)^\s*(import\s.+from\s+['"].+['"];?|const\s+\w+\s*=\s*require\(['"].+['"]\))"#)
        .unwrap()
});
static PY_IMPORT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^\s*(from\s+\w+(\.\w+)*\s+import\s+.+|import\s+\w+(\.\w+)*)").unwrap()
});
static GO_IMPORT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^\s*import\s*\(").unwrap());

static JS_EXPORT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bexport\s+(?:default\s+)?(?:class|function|const|let|var|\{)").unwrap());
static GO_EXPORT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bfunc\s+\w+\(").unwrap());
static PY_EXPORT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^\s*def\s+\w+\(").unwrap());

static JS_FN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bfunction\b|=>\s*\(").unwrap());
static PY_FN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^\s*def\s+\w+\s*\(").unwrap());
static GO_FN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bfunc\s+\w+\s*\(").unwrap());
static GENERIC_FN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bfunction\b|\bdef\b|\bproc\b").unwrap());

static BRANCH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(if|else if|elif|switch|case|for|while|catch|except)\b").unwrap()
});
static TODO_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(TODO|FIXME|HACK|BUG)\b").unwrap());
static JS_CONSOLE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)(^|\s)console\.").unwrap());
static PY_PRINT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^\s*print\(").unwrap());

static SECRET_ASSIGN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?i)(?:(?:AWS|AZURE|GCP|GOOGLE|OPENAI)[\w\-]*_?(?:KEY|SECRET|TOKEN)|secret_key|api[_-]?key|access[_-]?key)\s*[:=]\s*['"][A-Za-z0-9/\+\-_=\.:]{12,}['"]"#,
    )
    .unwrap()
});
static PEM_KEY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"-----BEGIN (?:RSA|EC|OPENSSH) PRIVATE KEY-----").unwrap());

static JS_IMPORT_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"import\s+.+?from\s+['"](.+?)['"]"#).unwrap());
static JS_REQUIRE_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"require\(['"](.+?)['"]\)"#).unwrap());
static PY_FROM_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\s*from\s+([\w\.]+)\s+import").unwrap());
static PY_IMPORT_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\s*import\s+([\w\.]+)").unwrap());
static GO_IMPORT_BLOCK: Lazy<Regex> = Lazy::new(|| Regex::new(r"import\s*\(([^)]+)\)").unwrap());
static GO_QUOTED: Lazy<Regex> = Lazy::new(|| Regex::new(r#""(.*?)""#).unwrap());
static GO_SINGLE_IMPORT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?m)^\s*import\s+"(.*?)""#).unwrap());

/// Analyzes one file. `content` must be the full untruncated text so that
/// the metrics describe the whole file even when only an excerpt is shown.
pub fn analyze(rel: &Path, content: &str) -> Analysis {
    let lang = language_for(rel).to_string();
    let family = family_of(&lang);
    let lines: Vec<&str> = content
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect();
    let loc = lines.len();

    let has_imports = match family {
        Family::JsLike => JS_IMPORT.is_match(content),
        Family::Python => PY_IMPORT.is_match(content),
        Family::Go => GO_IMPORT.is_match(content),
        Family::Shell | Family::Other => false,
    };
    let has_exports = match family {
        Family::JsLike => JS_EXPORT.is_match(content),
        Family::Go => GO_EXPORT.is_match(content),
        Family::Python => PY_EXPORT.is_match(content),
        Family::Shell | Family::Other => false,
    };

    let fn_count = match family {
        Family::JsLike => JS_FN.find_iter(content).count(),
        Family::Python => PY_FN.find_iter(content).count(),
        Family::Go => GO_FN.find_iter(content).count(),
        Family::Shell | Family::Other => GENERIC_FN.find_iter(content).count(),
    };
    let branch_count = BRANCH.find_iter(content).count();
    let cyclomatic_proxy = 1 + branch_count;

    let todos = TODO_TAG.find_iter(content).count();
    let has_console = family == Family::JsLike && JS_CONSOLE.is_match(content);
    let has_print = family == Family::Python && PY_PRINT.is_match(content);
    let suspicious_secrets = SECRET_ASSIGN.is_match(content) || PEM_KEY.is_match(content);
    let big_file = loc > LARGE_FILE_LINES;

    let mut smells = Vec::new();
    if todos > 0 {
        smells.push(format!("Has {todos} TODO/FIXME/HACK/BUG tags"));
    }
    if has_console {
        smells.push("Uses console.* (consider a logger)".to_string());
    }
    if has_print {
        smells.push("Uses print() (consider a logger)".to_string());
    }
    if suspicious_secrets {
        smells.push("⚠️ Possible secrets in file".to_string());
    }
    if big_file {
        smells.push(format!("Large file ({loc} LOC)"));
    }

    let head = lines
        .iter()
        .take(IMPORT_SCAN_LINES)
        .copied()
        .collect::<Vec<_>>()
        .join("\n");
    let imports = extract_imports(family, &head);

    let header_suggestion = header_template(family, rel);

    Analysis {
        lang,
        loc,
        fn_count,
        branch_count,
        cyclomatic_proxy,
        imports,
        smells,
        has_imports,
        has_exports,
        todos,
        header_suggestion,
    }
}

fn extract_imports(family: Family, head: &str) -> Vec<String> {
    let mut imports = Vec::new();
    let mut push = |name: &str| {
        if imports.len() < IMPORT_CAP && !imports.iter().any(|existing| existing == name) {
            imports.push(name.to_string());
        }
    };
    match family {
        Family::JsLike => {
            for caps in JS_IMPORT_NAME.captures_iter(head) {
                push(&caps[1]);
            }
            for caps in JS_REQUIRE_NAME.captures_iter(head) {
                push(&caps[1]);
            }
        }
        Family::Python => {
            for caps in PY_FROM_NAME.captures_iter(head) {
                push(&caps[1]);
            }
            for caps in PY_IMPORT_NAME.captures_iter(head) {
                push(&caps[1]);
            }
        }
        Family::Go => {
            if let Some(block) = GO_IMPORT_BLOCK.captures(head) {
                for caps in GO_QUOTED.captures_iter(&block[1]) {
                    push(&caps[1]);
                }
            } else {
                for caps in GO_SINGLE_IMPORT.captures_iter(head) {
                    push(&caps[1]);
                }
            }
        }
        Family::Shell | Family::Other => {}
    }
    imports
}

fn header_template(family: Family, rel: &Path) -> String {
    let rel = rel.display();
    match family {
        Family::JsLike => format!(
            "/**\n * File: {rel}\n * Purpose: …\n * Key exports: …\n * Notes: …\n */"
        ),
        Family::Python => format!(
            "\"\"\"\nFile: {rel}\nPurpose: …\nKey functions/classes: …\nNotes: …\n\"\"\""
        ),
        Family::Go => format!(
            "// File: {rel}\n// Purpose: …\n// Key functions: …\n// Notes: …"
        ),
        Family::Shell | Family::Other => {
            format!("# File: {rel}\n# Purpose: …\n# Notes: …")
        }
    }
}

/// Language tag for a relative path: the literal filename `Dockerfile`
/// (case-insensitive) wins, otherwise the lowercase extension decides.
/// Unknown extensions give an empty tag.
pub(crate) fn language_for(rel: &Path) -> &'static str {
    if let Some(name) = rel.file_name().and_then(|n| n.to_str()) {
        if name.eq_ignore_ascii_case("dockerfile") {
            return "dockerfile";
        }
    }
    let ext = rel
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "js" | "mjs" | "cjs" => "javascript",
        "ts" => "typescript",
        "tsx" => "tsx",
        "jsx" => "jsx",
        "json" => "json",
        "yml" | "yaml" => "yaml",
        "toml" => "toml",
        "md" => "markdown",
        "txt" => "text",
        "py" => "python",
        "rb" => "ruby",
        "php" => "php",
        "java" => "java",
        "kt" => "kotlin",
        "swift" => "swift",
        "c" | "h" => "c",
        "cpp" | "cc" | "hpp" => "cpp",
        "cs" => "csharp",
        "go" => "go",
        "rs" => "rust",
        "sh" => "bash",
        "bat" => "batch",
        "ps1" => "powershell",
        "sql" => "sql",
        "ini" => "ini",
        "conf" => "conf",
        "env" => "dotenv",
        "html" => "html",
        "css" => "css",
        "scss" => "scss",
        "xml" => "xml",
        "vue" => "vue",
        "svelte" => "svelte",
        "lua" => "lua",
        "pl" => "perl",
        "r" => "r",
        "gradle" | "groovy" => "groovy",
        "makefile" | "mk" => "makefile",
        "cmake" => "cmake",
        "dockerfile" => "dockerfile",
        _ => "",
    }
}

/// The default extension whitelist: every extension with a known language
/// tag, lowercase and dot-prefixed.
pub fn default_text_extensions() -> Vec<String> {
    [
        ".js", ".mjs", ".cjs", ".ts", ".tsx", ".jsx", ".json", ".yml", ".yaml", ".toml", ".md",
        ".txt", ".py", ".rb", ".php", ".java", ".kt", ".swift", ".c", ".h", ".cpp", ".cc", ".hpp",
        ".cs", ".go", ".rs", ".sh", ".bat", ".ps1", ".sql", ".ini", ".conf", ".env", ".html",
        ".css", ".scss", ".xml", ".vue", ".svelte", ".lua", ".pl", ".r", ".gradle", ".groovy",
        ".makefile", ".mk", ".cmake", ".dockerfile",
    ]
    .iter()
    .map(|ext| ext.to_string())
    .collect()
}
