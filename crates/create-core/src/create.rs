//! The top-level scaffolding run
//!
//! Guard -> initial prompts -> template dispatch -> post-scaffold pipeline.

use crate::error::ScaffoldError;
use crate::guard;
use crate::pipeline::{self, PipelineOutcome};
use crate::product::ProductConfig;
use crate::prompt::{prompts, Choice, PromptKind, PromptSpec};
use crate::runtime::{detect_running_package_manager, Toolchain};
use crate::scope::{PackageManager, ProjectType, Scope, Value};
use crate::templates::{self, TemplateGenerator};
use crate::tui::Ui;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Inputs of a run gathered from the command line and environment
#[derive(Debug, Clone)]
pub struct CreateArgs {
    /// Target folder name given on the command line
    pub directory: Option<String>,

    /// Project type given on the command line
    pub project_type: Option<ProjectType>,

    /// Directory the run is anchored to
    pub cwd: PathBuf,

    /// Package manager that launched the process, if known
    pub running_package_manager: Option<PackageManager>,
}

impl CreateArgs {
    /// Anchor a run to the process working directory and detected package
    /// manager, with nothing pre-answered
    pub fn from_env() -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to read the current directory")?;
        Ok(Self {
            directory: None,
            project_type: None,
            cwd,
            running_package_manager: detect_running_package_manager(),
        })
    }
}

/// Result of a run that did not hit a fatal error
#[derive(Debug)]
pub struct RunOutcome {
    pub scope: Scope,
    pub pipeline: PipelineOutcome,
}

/// Run the full scaffolding flow.
///
/// Returns `Err` only for the fatal cases (already inside a project, declined
/// overwrite, cancelled initial prompt) and unexpected I/O failures.
pub async fn run<C, U, G, T>(
    config: &C,
    args: CreateArgs,
    ui: &mut U,
    generator: &mut G,
    toolchain: &T,
) -> Result<RunOutcome>
where
    C: ProductConfig,
    U: Ui,
    G: TemplateGenerator,
    T: Toolchain,
{
    ui.intro(config.display_name());

    guard::ensure_outside_project(config, &args.cwd)?;

    let mut scope = Scope::new();
    scope.project_type = args.project_type;
    if let Some(directory) = &args.directory {
        scope.set_project_folder(directory, &args.cwd, config.default_project_folder());
    }

    prompts(&mut scope, initial_prompts(config, &args.cwd), ui, None)?;

    templates::dispatch(generator, &mut scope, ui).await?;

    let pipeline = pipeline::post_scaffold(
        config,
        &mut scope,
        ui,
        toolchain,
        args.running_package_manager,
    )
    .await?;

    Ok(RunOutcome { scope, pipeline })
}

/// Project type, folder and overwrite questions.
///
/// The type and folder questions are skipped when the command line already
/// answered them.
pub fn initial_prompts<C: ProductConfig>(config: &C, cwd: &Path) -> Vec<PromptSpec> {
    let choices = ProjectType::ALL
        .into_iter()
        .map(|t| {
            let (title, hint) = config.project_type_choice(t);
            Choice::new(title, Value::text(t.as_str())).hint(hint)
        })
        .collect();

    let default_folder = config.default_project_folder();
    let cwd = cwd.to_path_buf();

    vec![
        PromptSpec::select("projectType", "What would you like to build?")
            .kind_with(|_, scope| Ok(scope.project_type.is_none().then_some(PromptKind::Select)))
            .choices(choices)
            .initial(ProjectType::App.as_str()),
        PromptSpec::text("projectFolder", "Project folder:")
            .kind_with(|_, scope| Ok(scope.project_folder.is_none().then_some(PromptKind::Text)))
            .initial(default_folder)
            .format(move |value, scope| {
                Value::Path(scope.set_project_folder(&value.to_string(), &cwd, default_folder))
            }),
        PromptSpec::new("overwrite")
            .kind_with(|_, scope| {
                let non_empty = scope.project_folder.as_deref().is_some_and(is_non_empty_dir);
                Ok(non_empty.then_some(PromptKind::Confirm))
            })
            .message_with(|scope| {
                let target = match scope.project_folder_name.as_deref() {
                    Some(".") => "Current directory".to_string(),
                    Some(name) => format!("Target directory \"{}\"", name),
                    None => "Target directory".to_string(),
                };
                format!("{} is not empty. Remove existing files and continue?", target)
            }),
        PromptSpec::new("").kind_with(|_, scope| {
            if scope.overwrite == Some(false) {
                Err(ScaffoldError::ScaffoldingCancelled)
            } else {
                Ok(None)
            }
        }),
    ]
}

fn is_non_empty_dir(path: &Path) -> bool {
    std::fs::read_dir(path)
        .map(|mut entries| entries.next().is_some())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_env_anchors_to_absolute_cwd() {
        let args = CreateArgs::from_env().unwrap();
        assert!(args.cwd.is_absolute());
        assert_eq!(args.directory, None);
        assert_eq!(args.project_type, None);
    }

    #[test]
    fn test_folder_from_env_args_is_absolute() {
        let args = CreateArgs::from_env().unwrap();
        let mut scope = Scope::new();
        let folder = scope.set_project_folder("my-app", &args.cwd, "quasar-project");
        assert!(folder.is_absolute());
        assert_eq!(folder, args.cwd.join("my-app"));
    }
}
