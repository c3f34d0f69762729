//! Package manager detection and command lines

use crate::scope::PackageManager;

/// Environment variable npm-compatible clients set for the scripts they run
const USER_AGENT_ENV: &str = "npm_config_user_agent";

/// Detect the package manager that launched this process (e.g. via
/// `yarn create` or `npm init`)
pub fn detect_running_package_manager() -> Option<PackageManager> {
    std::env::var(USER_AGENT_ENV)
        .ok()
        .and_then(|agent| parse_user_agent(&agent))
}

/// Parse a user agent like `yarn/1.22.19 npm/? node/v20.11.0 linux x64`
pub fn parse_user_agent(agent: &str) -> Option<PackageManager> {
    let first = agent.split_whitespace().next()?;
    let name = first.split('/').next()?;
    name.parse().ok()
}

impl PackageManager {
    /// Executable name, accounting for the `.cmd` shims on Windows
    pub fn program(&self) -> String {
        if cfg!(windows) {
            format!("{}.cmd", self.as_str())
        } else {
            self.as_str().to_string()
        }
    }

    pub fn install_args(&self) -> &'static [&'static str] {
        &["install"]
    }

    pub fn lint_fix_args(&self) -> &'static [&'static str] {
        match self {
            PackageManager::Npm => &["run", "lint", "--", "--fix"],
            PackageManager::Yarn => &["lint", "--fix"],
            PackageManager::Pnpm | PackageManager::Bun => &["run", "lint", "--fix"],
        }
    }

    /// Command a user would type to install dependencies themselves
    pub fn install_command(&self) -> String {
        match self {
            PackageManager::Yarn => "yarn".to_string(),
            _ => format!("{} install", self.as_str()),
        }
    }

    /// Command a user would type to lint-fix the project themselves
    pub fn lint_fix_command(&self) -> String {
        format!("{} {}", self.as_str(), self.lint_fix_args().join(" "))
    }
}
