//! Template generators: turn a resolved scope into files on disk

use super::copier;
use super::fetcher::TemplateFetcher;
use super::version;
use crate::prompt::prompts;
use crate::scope::{ProjectType, Scope};
use crate::tui::Ui;
use anyhow::Result;

/// Materializes the project for one project type.
///
/// May run nested prompts and is expected to write files under
/// `scope.project_folder`. May set `scope.lint` and `scope.skip_deps_install`.
#[allow(async_fn_in_trait)]
pub trait TemplateGenerator {
    async fn generate<U: Ui>(
        &mut self,
        project_type: ProjectType,
        scope: &mut Scope,
        ui: &mut U,
    ) -> Result<()>;
}

/// Generator driven by `template.yaml` manifests, one template per project type
pub struct ManifestGenerator {
    fetcher: TemplateFetcher,
    cli_version: String,
    upgrade_command: String,
    version_requirement: Option<String>,
}

impl ManifestGenerator {
    pub fn new(fetcher: TemplateFetcher, cli_version: &str, upgrade_command: &str) -> Self {
        Self {
            fetcher,
            cli_version: cli_version.to_string(),
            upgrade_command: upgrade_command.to_string(),
            version_requirement: None,
        }
    }

    /// Require templates to satisfy a semver requirement (e.g. `2`, `^2.1`)
    pub fn with_version_requirement(mut self, requirement: Option<String>) -> Self {
        self.version_requirement = requirement;
        self
    }
}

impl TemplateGenerator for ManifestGenerator {
    async fn generate<U: Ui>(
        &mut self,
        project_type: ProjectType,
        scope: &mut Scope,
        ui: &mut U,
    ) -> Result<()> {
        let template_name = project_type.as_str();
        let manifest = self.fetcher.fetch_template_manifest(template_name).await?;

        if let Some(requirement) = &self.version_requirement {
            version::check_requirement(requirement, template_name, &manifest.version)?;
        }

        if let Some(warning) = version::check_compatibility(
            &self.cli_version,
            &manifest.version,
            &self.upgrade_command,
        ) {
            ui.warn(&format!(
                "Version warning: {}",
                warning.lines().next().unwrap_or(&warning)
            ));
        }

        ui.info(&format!(
            "Template: {} - {}",
            manifest.name, manifest.description
        ));

        let specs = manifest.prompt_specs(scope);
        prompts(scope, specs, ui, None)?;

        if let Some(lint) = &manifest.lint {
            scope.lint = scope.flag(lint);
        }
        if manifest.skip_deps_install {
            scope.skip_deps_install = true;
        }

        let target = scope.project_folder()?.to_path_buf();
        if scope.overwrite == Some(true) {
            copier::empty_dir(&target).await?;
        }

        let copied =
            copier::copy_template(&mut self.fetcher, template_name, &manifest, &target, scope)
                .await?;

        ui.success(&format!(
            "Created {} files in {}",
            copied.len(),
            target.display()
        ));

        Ok(())
    }
}
