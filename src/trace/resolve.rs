//! Relative Import Resolution
//!
//! Only `./` and `../` targets are resolved. Package and alias imports are
//! never followed.
//!
//! @module trace/resolve

/// Suffixes tried, in order, after the joined import path
const RESOLVE_SUFFIXES: &[&str] = &[
    "",
    ".ts",
    ".tsx",
    ".js",
    ".jsx",
    ".mjs",
    ".cjs",
    ".py",
    "/index.ts",
    "/index.tsx",
    "/index.js",
    "/index.jsx",
    "/__init__.py",
];

/// Whether an import target is relative to the importing file
pub fn is_relative(target: &str) -> bool {
    target.starts_with("./") || target.starts_with("../")
}

/// Resolve a relative import from `from_file` to an indexed path
///
/// `exists` decides whether a candidate root-relative path is in the index.
pub fn resolve_import<F>(from_file: &str, target: &str, exists: F) -> Option<String>
where
    F: Fn(&str) -> bool,
{
    if !is_relative(target) {
        return None;
    }

    let base_dir = from_file.rsplit_once('/').map(|(dir, _)| dir).unwrap_or("");
    let joined = normalize(base_dir, target)?;

    RESOLVE_SUFFIXES
        .iter()
        .filter_map(|suffix| {
            if joined.is_empty() {
                // Import of the directory itself, e.g. `./`
                suffix.strip_prefix('/').map(str::to_string)
            } else if suffix.is_empty() {
                Some(joined.clone())
            } else {
                Some(format!("{joined}{suffix}"))
            }
        })
        .find(|candidate| exists(candidate))
}

/// Join `target` onto `base_dir`, folding `.` and `..`; None if it escapes the root
fn normalize(base_dir: &str, target: &str) -> Option<String> {
    let mut parts: Vec<&str> = base_dir.split('/').filter(|p| !p.is_empty()).collect();

    for segment in target.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                parts.pop()?;
            }
            other => parts.push(other),
        }
    }

    Some(parts.join("/"))
}
