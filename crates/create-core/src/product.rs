//! Product configuration trait for CLI binaries
//!
//! The core flow is product-agnostic; each binary implements this trait to
//! supply its names, template location, wording and closing instructions.

use crate::scope::{ProjectType, Scope};

/// Configuration trait for a scaffolding CLI product
pub trait ProductConfig: Clone + Send + Sync + 'static {
    /// Internal product name (used for CLI command, env vars)
    fn name(&self) -> &'static str;

    /// Human-readable display name
    fn display_name(&self) -> &'static str;

    /// Folder used when the user leaves the folder prompt blank
    fn default_project_folder(&self) -> &'static str;

    /// Dependency manifest written by every template
    fn manifest_file(&self) -> &'static str {
        "package.json"
    }

    /// Files whose presence marks a directory as an existing project
    fn project_markers(&self) -> &'static [&'static str];

    /// Title and hint shown for a project type in the first prompt
    fn project_type_choice(&self, project_type: ProjectType) -> (&'static str, &'static str);

    /// Default URL for fetching templates
    fn default_template_url(&self) -> &'static str;

    /// Environment variable name for overriding template URL
    fn template_url_env(&self) -> &'static str;

    /// URL for product documentation
    fn docs_url(&self) -> &'static str;

    /// Generate the "next steps" instructions from the final scope
    fn next_steps(&self, scope: &Scope) -> Vec<String>;

    /// Upgrade/install command shown in version warnings
    fn upgrade_command(&self) -> &'static str;

    /// User agent string for HTTP requests
    fn user_agent(&self) -> &'static str {
        self.name()
    }
}
