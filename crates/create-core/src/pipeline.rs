//! Post-scaffold pipeline
//!
//! Runs once the template generator has written the project. Every stage is
//! failure tolerant: the run degrades from
//! "fully set up" to "scaffolded only" and always ends with the final report.

use crate::normalize;
use crate::product::ProductConfig;
use crate::prompt::{prompts, Choice, Flow, PromptSpec};
use crate::report::print_final_message;
use crate::runtime::Toolchain;
use crate::scope::{PackageManager, Scope, Value};
use crate::tui::Ui;
use anyhow::Result;

/// How the pipeline finished; every variant is a successful exit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineOutcome {
    /// All applicable stages ran (lint failures included)
    Completed,
    /// The install question was cancelled
    InstallCancelled,
    /// Installing dependencies failed; later stages were skipped
    InstallFailed,
}

/// The install question, offering `running` alone when it is known
pub fn install_prompts(running: Option<PackageManager>) -> Vec<PromptSpec> {
    vec![PromptSpec::select(
        "packageManager",
        "Install project dependencies? (recommended)",
    )
    .choices_with(move |_| {
        let skip = Choice::new("No, I will handle that myself", Value::Bool(false));
        match running {
            Some(pm) => vec![
                Choice::new(format!("Yes, use {}", pm), Value::text(pm.as_str())),
                skip,
            ],
            None => vec![
                Choice::new("Yes, use Yarn (recommended)", Value::text("yarn")),
                Choice::new("Yes, use NPM", Value::text("npm")),
                skip,
            ],
        }
    })]
}

/// Normalize the manifest, then offer install and lint fix.
pub async fn post_scaffold<C, U, T>(
    config: &C,
    scope: &mut Scope,
    ui: &mut U,
    toolchain: &T,
    running: Option<PackageManager>,
) -> Result<PipelineOutcome>
where
    C: ProductConfig,
    U: Ui,
    T: Toolchain,
{
    let folder = scope.project_folder()?.to_path_buf();
    if let Err(e) = normalize::sort_manifest(&folder, config.manifest_file()) {
        ui.warn(&format!(
            "Could not normalize {}; left as generated. ({:#})",
            config.manifest_file(),
            e
        ));
    }

    ui.success("The project has been scaffolded");

    if !scope.skip_deps_install {
        let mut on_cancel = |scope: &mut Scope, ui: &mut U| {
            scope.package_manager = None;
            print_final_message(config, scope, ui);
        };
        let flow = prompts(scope, install_prompts(running), ui, Some(&mut on_cancel))?;
        if flow == Flow::Cancelled {
            return Ok(PipelineOutcome::InstallCancelled);
        }

        if let Some(pm) = scope.package_manager {
            if let Err(e) = toolchain.install_dependencies(pm, &folder).await {
                ui.warn(&format!(
                    "Could not auto install dependencies. Probably a temporary npm registry issue? ({})",
                    e
                ));
                scope.package_manager = None;
                print_final_message(config, scope, ui);
                return Ok(PipelineOutcome::InstallFailed);
            }

            if scope.lint {
                match toolchain.lint_fix(pm, &folder).await {
                    Ok(()) => scope.lint_fixed = true,
                    Err(e) => {
                        ui.warn(&format!("Could not auto lint fix the project folder. ({})", e))
                    }
                }
            }
        }
    }

    print_final_message(config, scope, ui);
    Ok(PipelineOutcome::Completed)
}
