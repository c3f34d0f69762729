//! Version checks between the CLI, the requested tool version and templates

use anyhow::Result;
use semver::{Version, VersionReq};

/// Compare CLI version against template version
/// Returns a warning message if the CLI is older than the template expects
pub fn check_compatibility(
    cli_version: &str,
    template_version: &str,
    upgrade_command: &str,
) -> Option<String> {
    let cli_ver = parse_version(cli_version).ok()?;
    let template_ver = parse_version(template_version).ok()?;

    if cli_ver < template_ver {
        Some(format!(
            "This template was designed for CLI version {} or newer.\n\
             You are running version {}.\n\
             Consider updating: {}",
            template_version, cli_version, upgrade_command
        ))
    } else {
        None
    }
}

/// Fail unless `template_version` satisfies the `--version` requirement
pub fn check_requirement(requirement: &str, template_name: &str, template_version: &str) -> Result<()> {
    let req = VersionReq::parse(requirement.strip_prefix('v').unwrap_or(requirement))
        .map_err(|e| anyhow::anyhow!("Invalid version requirement '{}': {}", requirement, e))?;
    let version = parse_version(template_version)?;

    if !req.matches(&version) {
        anyhow::bail!(
            "Template '{}' is version {}, which does not satisfy the requested version {}",
            template_name,
            version,
            requirement
        );
    }
    Ok(())
}

/// Parse version string, tolerating a leading 'v'
pub fn parse_version(version_str: &str) -> Result<Version> {
    let cleaned = version_str.strip_prefix('v').unwrap_or(version_str);
    Version::parse(cleaned).map_err(|e| anyhow::anyhow!("Invalid version '{}': {}", version_str, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_older_than_template() {
        let warning = check_compatibility("0.1.0", "0.2.0", "cargo install create-quasar --force");
        assert!(warning.is_some());
        assert!(warning.unwrap().contains("0.2.0"));
    }

    #[test]
    fn test_cli_same_or_newer_than_template() {
        assert!(check_compatibility("0.1.0", "0.1.0", "upgrade").is_none());
        assert!(check_compatibility("0.2.0", "v0.1.0", "upgrade").is_none());
    }

    #[test]
    fn test_invalid_versions_skip_warning() {
        assert!(check_compatibility("invalid", "0.1.0", "upgrade").is_none());
    }

    #[test]
    fn test_requirement_matching() {
        assert!(check_requirement("2", "app", "2.4.1").is_ok());
        assert!(check_requirement("^2.1", "app", "v2.4.1").is_ok());
        assert!(check_requirement("v2", "app", "2.0.0").is_ok());

        let err = check_requirement("1", "app", "2.4.1").unwrap_err();
        assert!(err.to_string().contains("does not satisfy"));
        assert!(check_requirement("not-a-req", "app", "2.4.1").is_err());
    }
}
