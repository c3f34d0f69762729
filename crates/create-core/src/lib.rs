//! Create Core - Shared library for project creation CLIs
//!
//! This library runs the interactive part of a `create-*` tool: it asks an
//! ordered, conditionally skippable series of questions that fill a [`Scope`],
//! hands the scope to a template generator, and then normalizes the generated
//! manifest, offers dependency installation and runs lint auto-fix.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Core Operations** - Template fetching/copying, manifest
//!   normalization, package manager detection, install/lint commands
//! - **Layer 2: Workflow Orchestration** - [`prompt::prompts`], template
//!   [`templates::dispatch`], the post-scaffold [`pipeline`] and [`run`]
//! - **Layer 3: CLI/TUI Interface** - cliclack-based [`tui::CliclackUi`]
//!   (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack terminal backend
//! - `test-support`: Exposes scripted collaborators for integration tests
//!
//! # Example Usage
//!
//! ```ignore
//! use create_core::{run, CreateArgs, ManifestGenerator, PackageManagerToolchain, TemplateFetcher};
//! use create_core::tui::CliclackUi;
//!
//! let fetcher = TemplateFetcher::from_config(&MyConfig)?;
//! let mut generator = ManifestGenerator::new(fetcher, "0.1.0", MyConfig.upgrade_command());
//! run(&MyConfig, CreateArgs::from_env()?, &mut CliclackUi::new(), &mut generator, &PackageManagerToolchain).await?;
//! ```

pub mod create;
pub mod error;
pub mod guard;
pub mod normalize;
pub mod pipeline;
pub mod product;
pub mod prompt;
pub mod report;
pub mod runtime;
pub mod scope;
pub mod templates;
pub mod tui;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

// Re-export main types for convenience
pub use create::{run, CreateArgs, RunOutcome};
pub use error::{PromptError, ScaffoldError, ToolError};
pub use pipeline::PipelineOutcome;
pub use product::ProductConfig;
pub use runtime::{PackageManagerToolchain, Toolchain};
pub use scope::{PackageManager, ProjectType, Scope, Value};
pub use templates::{ManifestGenerator, TemplateFetcher, TemplateGenerator, TemplateSource};
pub use tui::Ui;
