//! The run's accumulated decision record
//!
//! A single [`Scope`] is created per run and threaded by `&mut` through the
//! prompt passes, the template generator, the pipeline and the final report.
//! Fields only ever get filled in; nothing is removed.

use crate::error::ScaffoldError;
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Component, Path, PathBuf};
use std::str::FromStr;

/// Kind of project to scaffold; selects the template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum ProjectType {
    App,
    AppExtension,
    UiKit,
}

impl ProjectType {
    pub const ALL: [ProjectType; 3] = [
        ProjectType::App,
        ProjectType::AppExtension,
        ProjectType::UiKit,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectType::App => "app",
            ProjectType::AppExtension => "app-extension",
            ProjectType::UiKit => "ui-kit",
        }
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProjectType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| anyhow::anyhow!("Unknown project type: {}", s))
    }
}

/// Package managers that can install a generated project's dependencies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PackageManager {
    Npm,
    Yarn,
    Pnpm,
    Bun,
}

impl PackageManager {
    pub fn as_str(&self) -> &'static str {
        match self {
            PackageManager::Npm => "npm",
            PackageManager::Yarn => "yarn",
            PackageManager::Pnpm => "pnpm",
            PackageManager::Bun => "bun",
        }
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PackageManager {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "npm" => Ok(PackageManager::Npm),
            "yarn" => Ok(PackageManager::Yarn),
            "pnpm" => Ok(PackageManager::Pnpm),
            "bun" => Ok(PackageManager::Bun),
            _ => anyhow::bail!("Unknown package manager: {}", s),
        }
    }
}

/// A prompt answer as stored in the scope
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Bool(bool),
    Text(String),
    Path(PathBuf),
}

impl Value {
    pub fn text(s: impl Into<String>) -> Self {
        Value::Text(s.into())
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{}", b),
            Value::Text(s) => f.write_str(s),
            Value::Path(p) => write!(f, "{}", p.display()),
        }
    }
}

/// Accumulated decisions and derived values of one run
#[derive(Debug, Default)]
pub struct Scope {
    pub project_type: Option<ProjectType>,
    /// Absolute target path
    pub project_folder: Option<PathBuf>,
    /// Folder name as typed by the user (may be `.`), display only
    pub project_folder_name: Option<String>,
    /// Unset when the target was empty and no question was asked
    pub overwrite: Option<bool>,
    pub skip_deps_install: bool,
    pub lint: bool,
    /// Set once the lint auto-fix has run successfully
    pub lint_fixed: bool,
    /// `None` means "do not install" (or not decided yet)
    pub package_manager: Option<PackageManager>,
    /// Answers written by template generators for the final report
    pub answers: BTreeMap<String, Value>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `project_folder_name` and `project_folder` together from raw input.
    ///
    /// Blank input falls back to `default_name`. Returns the resolved folder.
    pub fn set_project_folder(&mut self, raw: &str, cwd: &Path, default_name: &str) -> PathBuf {
        let trimmed = raw.trim();
        let name = if trimmed.is_empty() {
            default_name
        } else {
            trimmed
        };
        let folder = resolve_folder(cwd, name);
        self.project_folder_name = Some(name.to_string());
        self.project_folder = Some(folder.clone());
        folder
    }

    /// Write a resolved prompt answer into the field named `name`.
    ///
    /// Known names land in typed fields; everything else goes to `answers`.
    /// An empty name writes nothing.
    pub fn apply(&mut self, name: &str, value: Value) {
        match (name, value) {
            ("", _) => {}
            ("projectType", Value::Text(s)) => {
                if let Ok(t) = s.parse() {
                    self.project_type = Some(t);
                }
            }
            ("projectFolder", Value::Path(p)) => self.project_folder = Some(p),
            ("projectFolder", Value::Text(s)) => self.project_folder = Some(PathBuf::from(s)),
            ("overwrite", Value::Bool(b)) => self.overwrite = Some(b),
            ("skipDepsInstall", Value::Bool(b)) => self.skip_deps_install = b,
            ("lint", Value::Bool(b)) => self.lint = b,
            ("packageManager", Value::Bool(false)) => self.package_manager = None,
            ("packageManager", Value::Text(s)) => self.package_manager = s.parse().ok(),
            (name, value) => {
                self.answers.insert(name.to_string(), value);
            }
        }
    }

    pub fn project_type(&self) -> Result<ProjectType, ScaffoldError> {
        self.project_type
            .ok_or(ScaffoldError::Unresolved { field: "projectType" })
    }

    pub fn project_folder(&self) -> Result<&Path, ScaffoldError> {
        self.project_folder
            .as_deref()
            .ok_or(ScaffoldError::Unresolved {
                field: "projectFolder",
            })
    }

    pub fn answer(&self, name: &str) -> Option<&Value> {
        self.answers.get(name)
    }

    /// True only for an explicit boolean `true` answer
    pub fn flag(&self, name: &str) -> bool {
        match name {
            "lint" => self.lint,
            "skipDepsInstall" => self.skip_deps_install,
            "overwrite" => self.overwrite == Some(true),
            _ => self
                .answer(name)
                .and_then(Value::as_bool)
                .unwrap_or(false),
        }
    }

    /// String form of a field for placeholder substitution
    pub fn lookup(&self, key: &str) -> Option<String> {
        match key {
            "projectType" => self.project_type.map(|t| t.to_string()),
            "projectFolder" => self
                .project_folder
                .as_ref()
                .map(|p| p.display().to_string()),
            "projectFolderName" => self.project_folder_name.clone(),
            "projectFolderBasename" => self
                .project_folder
                .as_ref()
                .and_then(|p| p.file_name())
                .map(|n| n.to_string_lossy().into_owned()),
            "packageManager" => self.package_manager.map(|pm| pm.to_string()),
            _ => self.answer(key).map(Value::to_string),
        }
    }
}

/// Join `name` onto `cwd`, collapsing `.` and `..` segments.
pub fn resolve_folder(cwd: &Path, name: &str) -> PathBuf {
    let name = Path::new(name);
    let mut path = if name.is_absolute() {
        PathBuf::new()
    } else {
        cwd.to_path_buf()
    };
    for component in name.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                path.pop();
            }
            Component::RootDir | Component::Prefix(_) | Component::Normal(_) => {
                path.push(component.as_os_str())
            }
        }
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dot_resolves_to_cwd() {
        let mut scope = Scope::new();
        let folder = scope.set_project_folder(".", Path::new("/work"), "quasar-project");
        assert_eq!(folder, PathBuf::from("/work"));
        assert_eq!(scope.project_folder_name.as_deref(), Some("."));
    }

    #[test]
    fn test_blank_input_uses_default_name() {
        let mut scope = Scope::new();
        scope.set_project_folder("   ", Path::new("/work"), "quasar-project");
        assert_eq!(
            scope.project_folder.as_deref(),
            Some(Path::new("/work/quasar-project"))
        );
        assert_eq!(scope.project_folder_name.as_deref(), Some("quasar-project"));
    }

    #[test]
    fn test_relative_segments_are_collapsed() {
        assert_eq!(
            resolve_folder(Path::new("/work/sub"), "../my-kit"),
            PathBuf::from("/work/my-kit")
        );
        assert_eq!(
            resolve_folder(Path::new("/work"), "/elsewhere/kit"),
            PathBuf::from("/elsewhere/kit")
        );
    }

    #[test]
    fn test_apply_routes_known_fields() {
        let mut scope = Scope::new();
        scope.apply("projectType", Value::text("ui-kit"));
        scope.apply("overwrite", Value::Bool(true));
        scope.apply("packageManager", Value::text("pnpm"));
        scope.apply("author", Value::text("Jane"));
        scope.apply("", Value::Bool(false));

        assert_eq!(scope.project_type, Some(ProjectType::UiKit));
        assert_eq!(scope.overwrite, Some(true));
        assert_eq!(scope.package_manager, Some(PackageManager::Pnpm));
        assert_eq!(scope.answer("author"), Some(&Value::text("Jane")));
        assert_eq!(scope.answers.len(), 1);
    }

    #[test]
    fn test_false_package_manager_clears_choice() {
        let mut scope = Scope::new();
        scope.apply("packageManager", Value::text("yarn"));
        scope.apply("packageManager", Value::Bool(false));
        assert_eq!(scope.package_manager, None);
    }

    #[test]
    fn test_unresolved_fields_error() {
        let scope = Scope::new();
        assert!(matches!(
            scope.project_type(),
            Err(ScaffoldError::Unresolved { field: "projectType" })
        ));
        assert!(scope.project_folder().is_err());
    }

    #[test]
    fn test_project_type_round_trips_through_str() {
        for t in ProjectType::ALL {
            assert_eq!(t.as_str().parse::<ProjectType>().unwrap(), t);
        }
        assert!("desktop".parse::<ProjectType>().is_err());
    }
}
