//! Regex-Based Import Extraction
//!
//! Pulls raw module/path targets out of source text. This is a lexical scan,
//! not a parser: it recognises ES-module and CommonJS forms for the
//! JavaScript/TypeScript family and `import`/`from ... import` for Python.
//! Every other language yields no imports.
//!
//! @module parse/imports

use once_cell::sync::Lazy;
use regex::Regex;

use super::languages::Language;

// =============================================================================
// COMPILED REGEX PATTERNS
// =============================================================================

/// `import x from 'mod'`, `import 'mod'`, `export { x } from 'mod'`
static ES_MODULE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?m)(?:^|[;{}\s])(?:import|export)\s+(?:[^'"`;()]*?\s*\bfrom\s*)?['"]([^'"\n]+)['"]"#)
        .unwrap()
});

/// `require('mod')` and dynamic `import('mod')`
static REQUIRE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\b(?:require|import)\s*\(\s*['"`]([^'"`\n]+)['"`]\s*\)"#).unwrap()
});

/// `from pkg.mod import x` or `import pkg.mod`
static PYTHON_IMPORT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^[\t ]*(?:from\s+([\w.]+)\s+import\b|import\s+([\w.]+))").unwrap()
});

// =============================================================================
// EXTRACTION
// =============================================================================

/// Extract raw import targets from source text
///
/// For the JavaScript/TypeScript family, module-syntax imports come first
/// (in source order), followed by `require`/dynamic-import calls (in source
/// order).
pub fn extract_imports(content: &str, language: Language) -> Vec<String> {
    if language.is_ecmascript() {
        let mut imports = capture_all(&ES_MODULE_PATTERN, content);
        imports.extend(capture_all(&REQUIRE_PATTERN, content));
        imports
    } else if language == Language::Python {
        PYTHON_IMPORT_PATTERN
            .captures_iter(content)
            .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)))
            .map(|m| m.as_str().to_string())
            .collect()
    } else {
        Vec::new()
    }
}

fn capture_all(pattern: &Regex, content: &str) -> Vec<String> {
    pattern
        .captures_iter(content)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|target| !target.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_imports_javascript() {
        let code = r#"
import { foo, bar } from './module';
import defaultExport from 'package';
import './side-effect.css';
const path = require('path');
export * from "../shared/types";
"#;

        let imports = extract_imports(code, Language::JavaScript);
        assert_eq!(
            imports,
            vec!["./module", "package", "./side-effect.css", "../shared/types", "path"]
        );
    }

    #[test]
    fn test_module_imports_precede_require_calls() {
        let code = r#"
const lazy = () => import('./lazy');
const fs = require("fs");
import { auth } from './auth';
"#;

        let imports = extract_imports(code, Language::TypeScript);
        assert_eq!(imports, vec!["./auth", "./lazy", "fs"]);
    }

    #[test]
    fn test_multiline_and_type_imports() {
        let code = r#"
import type { Config } from './config';
import {
  a,
  b,
} from '@scope/pkg';
"#;

        let imports = extract_imports(code, Language::TypeScriptReact);
        assert_eq!(imports, vec!["./config", "@scope/pkg"]);
    }

    #[test]
    fn test_export_without_from_is_not_an_import() {
        let code = "export const name = 'auth';\nexport function go() { return 'x'; }\n";
        assert!(extract_imports(code, Language::TypeScript).is_empty());
    }

    #[test]
    fn test_extract_imports_python() {
        let code = r#"
import os
from .models import User
from app.services.auth import verify, issue
    import json
x = "import nothing"
"#;

        let imports = extract_imports(code, Language::Python);
        assert_eq!(imports, vec!["os", ".models", "app.services.auth", "json"]);
    }

    #[test]
    fn test_other_languages_yield_nothing() {
        let code = "package main\n\nimport \"fmt\"\n";
        assert!(extract_imports(code, Language::Go).is_empty());
        assert!(extract_imports("use std::io;", Language::Rust).is_empty());
    }

    #[test]
    fn test_malformed_input_contributes_nothing() {
        assert!(extract_imports("import { from '", Language::JavaScript).is_empty());
        assert!(extract_imports("require(", Language::JavaScript).is_empty());
        assert!(extract_imports("", Language::Python).is_empty());
    }
}
