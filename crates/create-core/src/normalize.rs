//! Dependency manifest normalization
//!
//! Rewrites the generated `package.json` so its top-level keys follow the
//! conventional order and dependency maps are alphabetized.

use anyhow::{Context, Result};
use serde_json::{Map, Value};
use std::path::Path;

/// Known top-level keys, in output order. Unknown keys follow, unchanged in
/// relative order.
const KEY_ORDER: &[&str] = &[
    "$schema",
    "name",
    "displayName",
    "version",
    "private",
    "description",
    "productName",
    "categories",
    "keywords",
    "homepage",
    "bugs",
    "repository",
    "funding",
    "license",
    "author",
    "contributors",
    "type",
    "exports",
    "main",
    "module",
    "browser",
    "types",
    "typings",
    "bin",
    "files",
    "directories",
    "workspaces",
    "scripts",
    "config",
    "dependencies",
    "devDependencies",
    "peerDependencies",
    "peerDependenciesMeta",
    "optionalDependencies",
    "bundledDependencies",
    "resolutions",
    "overrides",
    "browserslist",
    "engines",
    "packageManager",
    "os",
    "cpu",
    "publishConfig",
];

/// Maps whose entries are sorted by key
const SORTED_MAPS: &[&str] = &[
    "dependencies",
    "devDependencies",
    "peerDependencies",
    "peerDependenciesMeta",
    "optionalDependencies",
    "resolutions",
    "overrides",
    "engines",
];

/// Normalize `<dir>/<file_name>` in place. A missing file is left alone.
pub fn sort_manifest(dir: &Path, file_name: &str) -> Result<()> {
    let path = dir.join(file_name);
    if !path.exists() {
        return Ok(());
    }

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let sorted = sort_manifest_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    std::fs::write(&path, sorted).with_context(|| format!("Failed to write {}", path.display()))
}

/// Normalize manifest JSON text
pub fn sort_manifest_str(content: &str) -> Result<String> {
    let value: Value = serde_json::from_str(content)?;
    let Value::Object(mut object) = value else {
        anyhow::bail!("manifest root is not a JSON object");
    };

    let mut sorted = Map::new();
    for key in KEY_ORDER {
        if let Some((key, value)) = object.shift_remove_entry(*key) {
            sorted.insert(key, value);
        }
    }
    sorted.extend(object);

    for key in SORTED_MAPS {
        if let Some(Value::Object(map)) = sorted.get_mut(*key) {
            let mut entries: Vec<_> = std::mem::take(map).into_iter().collect();
            entries.sort_by(|(a, _), (b, _)| a.cmp(b));
            map.extend(entries);
        }
    }

    let mut out = serde_json::to_string_pretty(&Value::Object(sorted))?;
    out.push('\n');
    Ok(out)
}
