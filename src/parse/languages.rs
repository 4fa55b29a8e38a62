//! Language detection and entry-point recognition

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Languages recognised by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    TypeScript,
    TypeScriptReact,
    JavaScript,
    JavaScriptReact,
    Python,
    Go,
    Rust,
    Java,
    Kotlin,
    C,
    Cpp,
    CSharp,
    Ruby,
    Php,
    Swift,
    Scala,
    Shell,
    Vue,
    Svelte,
}

/// Canonical filenames treated as likely program starts
const ENTRY_POINT_NAMES: &[&str] = &[
    // Go / Rust
    "main.go",
    "main.rs",
    "lib.rs",
    // JavaScript/TypeScript
    "index.ts",
    "index.tsx",
    "index.js",
    "index.jsx",
    "index.mjs",
    "main.ts",
    "main.js",
    "app.ts",
    "app.tsx",
    "app.js",
    "app.jsx",
    "server.ts",
    "server.js",
    // Python
    "__main__.py",
    "main.py",
    "app.py",
    "manage.py",
    "wsgi.py",
    // Others
    "Main.java",
    "Program.cs",
    "main.c",
    "main.cpp",
    "main.swift",
    "index.php",
    "App.vue",
];

impl Language {
    /// Detect language from a file extension (without the dot)
    pub fn from_extension(ext: &str) -> Option<Self> {
        let language = match ext.to_lowercase().as_str() {
            "ts" | "mts" | "cts" => Language::TypeScript,
            "tsx" => Language::TypeScriptReact,
            "js" | "mjs" | "cjs" => Language::JavaScript,
            "jsx" => Language::JavaScriptReact,
            "py" | "pyi" => Language::Python,
            "go" => Language::Go,
            "rs" => Language::Rust,
            "java" => Language::Java,
            "kt" | "kts" => Language::Kotlin,
            "c" | "h" => Language::C,
            "cpp" | "cc" | "cxx" | "hpp" | "hxx" | "hh" => Language::Cpp,
            "cs" => Language::CSharp,
            "rb" => Language::Ruby,
            "php" => Language::Php,
            "swift" => Language::Swift,
            "scala" => Language::Scala,
            "sh" | "bash" | "zsh" => Language::Shell,
            "vue" => Language::Vue,
            "svelte" => Language::Svelte,
            _ => return None,
        };
        Some(language)
    }

    /// Detect language from file path
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }

    /// Get the language name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::TypeScript => "typescript",
            Language::TypeScriptReact => "typescriptreact",
            Language::JavaScript => "javascript",
            Language::JavaScriptReact => "javascriptreact",
            Language::Python => "python",
            Language::Go => "go",
            Language::Rust => "rust",
            Language::Java => "java",
            Language::Kotlin => "kotlin",
            Language::C => "c",
            Language::Cpp => "cpp",
            Language::CSharp => "csharp",
            Language::Ruby => "ruby",
            Language::Php => "php",
            Language::Swift => "swift",
            Language::Scala => "scala",
            Language::Shell => "shell",
            Language::Vue => "vue",
            Language::Svelte => "svelte",
        }
    }

    /// Languages whose sources use ES-module `import`/`require` syntax
    pub fn is_ecmascript(&self) -> bool {
        matches!(
            self,
            Language::TypeScript
                | Language::TypeScriptReact
                | Language::JavaScript
                | Language::JavaScriptReact
                | Language::Vue
                | Language::Svelte
        )
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Check whether a basename is one of the canonical entry-point filenames
pub fn is_entry_point(basename: &str) -> bool {
    ENTRY_POINT_NAMES.contains(&basename)
}
