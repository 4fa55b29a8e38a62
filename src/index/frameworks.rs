//! Framework detection from manifest files
//!
//! @module index/frameworks

use std::collections::BTreeSet;
use std::path::Path;

use serde_json::Value;
use tracing::debug;

use super::types::ProjectFile;

/// npm dependency name -> framework label
const NPM_FRAMEWORKS: &[(&str, &str)] = &[
    ("react", "React"),
    ("next", "Next.js"),
    ("vue", "Vue"),
    ("@angular/core", "Angular"),
    ("svelte", "Svelte"),
    ("express", "Express"),
    ("fastify", "Fastify"),
    ("koa", "Koa"),
    ("@nestjs/core", "NestJS"),
    ("nuxt", "Nuxt"),
    ("electron", "Electron"),
    ("react-native", "React Native"),
    ("typescript", "TypeScript"),
    ("vite", "Vite"),
    ("jest", "Jest"),
];

/// Manifests whose mere presence contributes a label
const MARKER_MANIFESTS: &[(&str, &str)] = &[
    ("go.mod", "Go"),
    ("Cargo.toml", "Rust"),
    ("requirements.txt", "Python"),
    ("pyproject.toml", "Python"),
    ("pom.xml", "Maven"),
    ("build.gradle", "Gradle"),
    ("build.gradle.kts", "Gradle"),
    ("Gemfile", "Ruby"),
    ("composer.json", "PHP"),
];

const NPM_DEPENDENCY_KEYS: &[&str] = &["dependencies", "devDependencies", "peerDependencies"];

/// Detect frameworks from root-level manifests among the discovered files
pub fn detect_frameworks(root: &Path, files: &[ProjectFile]) -> BTreeSet<String> {
    let mut frameworks = BTreeSet::new();

    for file in files.iter().filter(|f| !f.path.contains('/')) {
        if file.path == "package.json" {
            match std::fs::read_to_string(root.join(&file.path)) {
                Ok(content) => frameworks.extend(npm_frameworks(&content)),
                Err(e) => debug!(error = %e, "Failed to read package.json"),
            }
            continue;
        }

        if let Some((_, label)) = MARKER_MANIFESTS.iter().find(|(name, _)| *name == file.path) {
            frameworks.insert(label.to_string());
        }
    }

    frameworks
}

/// Map a package.json's dependency keys to framework labels
///
/// Malformed JSON yields no labels.
pub fn npm_frameworks(manifest: &str) -> BTreeSet<String> {
    let value: Value = match serde_json::from_str(manifest) {
        Ok(v) => v,
        Err(e) => {
            debug!(error = %e, "Ignoring malformed package.json");
            return BTreeSet::new();
        }
    };

    NPM_DEPENDENCY_KEYS
        .iter()
        .filter_map(|key| value.get(key).and_then(Value::as_object))
        .flat_map(|deps| deps.keys())
        .filter_map(|dep| {
            NPM_FRAMEWORKS
                .iter()
                .find(|(name, _)| *name == dep.as_str())
                .map(|(_, label)| label.to_string())
        })
        .collect()
}
