//! Template dispatch, fetching, and copying
//!
//! This module provides:
//! - The [`TemplateGenerator`] seam and [`dispatch`] from project type to generator
//! - Template manifest types (`template.yaml`)
//! - Template fetching from remote URLs or local directories
//! - Template copying with feature filtering and placeholder rendering
//! - Version compatibility checking

pub mod copier;
pub mod fetcher;
pub mod generator;
pub mod manifest;
pub mod version;

use crate::scope::Scope;
use crate::tui::Ui;
use anyhow::Result;

pub use copier::copy_template;
pub use fetcher::{TemplateFetcher, TemplateSource};
pub use generator::{ManifestGenerator, TemplateGenerator};
pub use manifest::TemplateManifest;
pub use version::check_compatibility;

/// Hand the scope to the generator for `scope.project_type`.
///
/// Both the project type and folder must already be resolved.
pub async fn dispatch<G: TemplateGenerator, U: Ui>(
    generator: &mut G,
    scope: &mut Scope,
    ui: &mut U,
) -> Result<()> {
    let project_type = scope.project_type()?;
    scope.project_folder()?;
    generator.generate(project_type, scope, ui).await
}
