//! Template file copying with feature filtering and placeholder rendering

use crate::scope::Scope;
use crate::templates::fetcher::TemplateFetcher;
use crate::templates::manifest::{render_file, TemplateManifest};
use anyhow::{Context, Result};
use std::path::Path;
use tokio::fs;

/// Copy template files to the target directory, skipping files whose feature
/// was not selected
pub async fn copy_template(
    fetcher: &mut TemplateFetcher,
    template_name: &str,
    manifest: &TemplateManifest,
    target_dir: &Path,
    scope: &Scope,
) -> Result<Vec<String>> {
    fs::create_dir_all(target_dir)
        .await
        .context("Failed to create target directory")?;

    let mut copied_files = Vec::new();

    for file_path in &manifest.files {
        if !manifest.includes(file_path, scope) {
            continue;
        }

        let target_path = target_dir.join(file_path);
        if let Some(parent) = target_path.parent() {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let mut content = fetcher.fetch_file_bytes(template_name, file_path).await?;
        if manifest.renders(file_path) {
            let text = String::from_utf8(content)
                .with_context(|| format!("Template file {} is not valid UTF-8", file_path))?;
            content = render_file(file_path, &text, scope).into_bytes();
        }

        fs::write(&target_path, &content)
            .await
            .with_context(|| format!("Failed to write file: {}", target_path.display()))?;

        copied_files.push(file_path.clone());
    }

    Ok(copied_files)
}

/// Remove everything inside `dir` except a `.git` folder
pub async fn empty_dir(dir: &Path) -> Result<()> {
    let mut entries = match fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to read directory: {}", dir.display()))
        }
    };

    while let Some(entry) = entries.next_entry().await? {
        if entry.file_name() == ".git" {
            continue;
        }

        let path = entry.path();
        let file_type = entry.file_type().await?;
        let removed = if file_type.is_dir() {
            fs::remove_dir_all(&path).await
        } else {
            fs::remove_file(&path).await
        };
        removed.with_context(|| format!("Failed to remove {}", path.display()))?;
    }

    Ok(())
}
