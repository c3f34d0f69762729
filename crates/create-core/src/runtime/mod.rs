//! External tooling: package manager detection and the install/lint commands
//!
//! The post-scaffold pipeline talks to these through the [`Toolchain`] trait
//! so tests can substitute scripted outcomes.

pub mod command;
pub mod package_manager;

pub use command::run_streaming;
pub use package_manager::{detect_running_package_manager, parse_user_agent};

use crate::error::ToolError;
use crate::scope::PackageManager;
use std::path::Path;

/// Install and lint collaborators used after the project files exist
#[allow(async_fn_in_trait)]
pub trait Toolchain {
    /// Install the dependencies of the project in `dir`
    async fn install_dependencies(&self, pm: PackageManager, dir: &Path) -> Result<(), ToolError>;

    /// Run the project's lint script with auto-fix enabled
    async fn lint_fix(&self, pm: PackageManager, dir: &Path) -> Result<(), ToolError>;
}

/// [`Toolchain`] that shells out to the chosen package manager
#[derive(Debug, Clone, Copy, Default)]
pub struct PackageManagerToolchain;

impl Toolchain for PackageManagerToolchain {
    async fn install_dependencies(&self, pm: PackageManager, dir: &Path) -> Result<(), ToolError> {
        run_streaming(pm.program(), pm.install_args(), dir).await
    }

    async fn lint_fix(&self, pm: PackageManager, dir: &Path) -> Result<(), ToolError> {
        run_streaming(pm.program(), pm.lint_fix_args(), dir).await
    }
}
