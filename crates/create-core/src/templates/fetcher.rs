//! Template fetching from a remote URL or a local directory
//!
//! Remote templates are served as one zip per project type
//! (`<base>/<type>.zip`); local templates are read straight from
//! `<dir>/<type>/`. Both end up in the same in-memory cache, so copying
//! behaves identically for either source.

use super::manifest::TemplateManifest;
use crate::product::ProductConfig;
use anyhow::{Context, Result};
use std::collections::HashMap;
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};
use url::Url;
use walkdir::WalkDir;
use zip::ZipArchive;

const MANIFEST_FILE: &str = "template.yaml";

/// Template source - either remote URL or local directory
#[derive(Debug, Clone)]
pub enum TemplateSource {
    Remote(Url),
    Local(PathBuf),
}

impl TemplateSource {
    /// Create a remote template source from a product config
    pub fn from_config<C: ProductConfig>(config: &C) -> Result<Self> {
        let url_str = std::env::var(config.template_url_env())
            .unwrap_or_else(|_| config.default_template_url().to_string());
        let url =
            Url::parse(&url_str).with_context(|| format!("Invalid template URL: {}", url_str))?;
        Ok(Self::Remote(url))
    }

    /// Create a local template source from a path
    pub fn local(path: PathBuf) -> Self {
        Self::Local(path)
    }
}

/// Extracted template contents
#[derive(Debug, Clone)]
struct TemplateCache {
    manifest: TemplateManifest,
    files: HashMap<String, Vec<u8>>,
}

/// Retrieves templates from their source and caches them per name
pub struct TemplateFetcher {
    source: TemplateSource,
    client: reqwest::Client,
    template_cache: HashMap<String, TemplateCache>,
}

impl TemplateFetcher {
    /// Create a new fetcher with a custom user agent
    pub fn new(source: TemplateSource, user_agent: &str) -> Self {
        Self {
            source,
            client: reqwest::Client::builder()
                .user_agent(user_agent)
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
            template_cache: HashMap::new(),
        }
    }

    /// Create a fetcher from a product config
    pub fn from_config<C: ProductConfig>(config: &C) -> Result<Self> {
        let source = TemplateSource::from_config(config)?;
        Ok(Self::new(source, config.user_agent()))
    }

    /// Create a fetcher for local templates
    pub fn from_local(path: PathBuf, user_agent: &str) -> Self {
        Self::new(TemplateSource::local(path), user_agent)
    }

    /// Build a URL by appending a path segment, preserving query parameters
    fn build_url(base: &Url, path_segment: &str) -> Result<Url> {
        let mut url = base.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow::anyhow!("URL cannot have path segments: {}", base))?
            .pop_if_empty()
            .push(path_segment);
        Ok(url)
    }

    fn parse_manifest(contents: &[u8], template_name: &str) -> Result<TemplateManifest> {
        let content_str = String::from_utf8_lossy(contents);
        serde_yaml::from_str(&content_str)
            .with_context(|| format!("Failed to parse template '{}' manifest", template_name))
    }

    /// Extract a zip into a template cache entry
    fn extract_zip(zip_bytes: &[u8], template_name: &str) -> Result<TemplateCache> {
        let mut archive = ZipArchive::new(Cursor::new(zip_bytes)).with_context(|| {
            format!(
                "Failed to read zip archive for template '{}'",
                template_name
            )
        })?;

        let mut files: HashMap<String, Vec<u8>> = HashMap::new();
        let mut manifest: Option<TemplateManifest> = None;

        // Entries are laid out as {template_name}/path/to/file
        let prefix = format!("{}/", template_name);

        for i in 0..archive.len() {
            let mut file = archive.by_index(i)?;
            if file.is_dir() {
                continue;
            }

            let full_path = file.name().to_string();
            let relative_path = full_path
                .strip_prefix(&prefix)
                .unwrap_or(&full_path)
                .to_string();

            let mut contents = Vec::new();
            file.read_to_end(&mut contents)?;

            if relative_path == MANIFEST_FILE {
                manifest = Some(Self::parse_manifest(&contents, template_name)?);
            }

            files.insert(relative_path, contents);
        }

        let manifest = manifest.ok_or_else(|| {
            anyhow::anyhow!("Template '{}' zip missing {}", template_name, MANIFEST_FILE)
        })?;

        Ok(TemplateCache { manifest, files })
    }

    /// Read a local template folder into a template cache entry
    fn read_local(root: &Path, template_name: &str) -> Result<TemplateCache> {
        let template_path = root.join(template_name);
        if !template_path.is_dir() {
            anyhow::bail!(
                "Template '{}' not found in {}",
                template_name,
                root.display()
            );
        }

        let mut files: HashMap<String, Vec<u8>> = HashMap::new();
        for entry in WalkDir::new(&template_path) {
            let entry = entry
                .with_context(|| format!("Failed to walk {}", template_path.display()))?;
            if !entry.file_type().is_file() {
                continue;
            }

            let relative_path = entry
                .path()
                .strip_prefix(&template_path)?
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            let contents = std::fs::read(entry.path())
                .with_context(|| format!("Failed to read {}", entry.path().display()))?;
            files.insert(relative_path, contents);
        }

        let manifest = files
            .get(MANIFEST_FILE)
            .map(|contents| Self::parse_manifest(contents, template_name))
            .transpose()?
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "Template '{}' is missing {}",
                    template_name,
                    MANIFEST_FILE
                )
            })?;

        Ok(TemplateCache { manifest, files })
    }

    /// Fetch and cache a template
    async fn fetch_and_cache_template(&mut self, template_name: &str) -> Result<&TemplateCache> {
        if !self.template_cache.contains_key(template_name) {
            let cache = match &self.source {
                TemplateSource::Remote(base_url) => {
                    let zip_url = Self::build_url(base_url, &format!("{}.zip", template_name))?;
                    let response = self
                        .client
                        .get(zip_url.clone())
                        .send()
                        .await
                        .with_context(|| {
                            format!("Failed to fetch template zip: {}", template_name)
                        })?;

                    if !response.status().is_success() {
                        anyhow::bail!(
                            "Failed to fetch template '{}' zip from {}: HTTP {}",
                            template_name,
                            zip_url,
                            response.status()
                        );
                    }

                    let zip_bytes = response.bytes().await?;
                    Self::extract_zip(&zip_bytes, template_name)?
                }
                TemplateSource::Local(path) => Self::read_local(path, template_name)?,
            };
            self.template_cache.insert(template_name.to_string(), cache);
        }

        self.template_cache
            .get(template_name)
            .ok_or_else(|| anyhow::anyhow!("Template '{}' not found in cache", template_name))
    }

    /// Fetch a specific template's manifest
    pub async fn fetch_template_manifest(
        &mut self,
        template_name: &str,
    ) -> Result<TemplateManifest> {
        let cache = self.fetch_and_cache_template(template_name).await?;
        Ok(cache.manifest.clone())
    }

    /// Fetch a file as bytes
    pub async fn fetch_file_bytes(
        &mut self,
        template_name: &str,
        file_path: &str,
    ) -> Result<Vec<u8>> {
        let cache = self.fetch_and_cache_template(template_name).await?;
        cache.files.get(file_path).cloned().ok_or_else(|| {
            anyhow::anyhow!(
                "File '{}' not found in template '{}'",
                file_path,
                template_name
            )
        })
    }
}
