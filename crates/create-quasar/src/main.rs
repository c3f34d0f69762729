//! create-quasar - Project scaffolding for Quasar apps, app extensions and UI kits

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use create_core::tui::CliclackUi;
use create_core::{
    CreateArgs, ManifestGenerator, PackageManager, PackageManagerToolchain, ProductConfig,
    ProjectType, Scope, TemplateFetcher,
};
use std::path::PathBuf;

/// CLI version
pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Quasar product configuration
#[derive(Clone)]
pub struct QuasarConfig;

impl ProductConfig for QuasarConfig {
    fn name(&self) -> &'static str {
        "create-quasar"
    }

    fn display_name(&self) -> &'static str {
        "Quasar"
    }

    fn default_project_folder(&self) -> &'static str {
        "quasar-project"
    }

    fn project_markers(&self) -> &'static [&'static str] {
        &[
            "quasar.config.js",
            "quasar.config.ts",
            "quasar.config.mjs",
            "quasar.config.cjs",
            "quasar.conf.js",
        ]
    }

    fn project_type_choice(&self, project_type: ProjectType) -> (&'static str, &'static str) {
        match project_type {
            ProjectType::App => (
                "App with Quasar CLI, let's go!",
                "spa/pwa/ssr/bex/electron/capacitor/cordova",
            ),
            ProjectType::AppExtension => ("AppExtension (AE) for Quasar CLI", "Quasar CLI AE"),
            ProjectType::UiKit => ("Quasar UI kit", "Vue component and/or directive"),
        }
    }

    fn default_template_url(&self) -> &'static str {
        "https://raw.githubusercontent.com/quasarframework/create-quasar/main/templates"
    }

    fn template_url_env(&self) -> &'static str {
        "CREATE_QUASAR_TEMPLATE_URL"
    }

    fn docs_url(&self) -> &'static str {
        "https://quasar.dev"
    }

    fn next_steps(&self, scope: &Scope) -> Vec<String> {
        let mut steps = Vec::new();

        if let Some(name) = scope.project_folder_name.as_deref().filter(|n| *n != ".") {
            steps.push(format!("cd {}", name));
        }

        let is_app = matches!(scope.project_type, Some(ProjectType::App) | None);

        match scope.package_manager {
            Some(pm) => {
                if scope.lint && !scope.lint_fixed {
                    steps.push(pm.lint_fix_command());
                }
                steps.push(if is_app {
                    "quasar dev".to_string()
                } else {
                    format!("{} run dev", pm)
                });
            }
            None => {
                steps.push(either(PackageManager::install_command));
                if scope.lint {
                    steps.push(either(PackageManager::lint_fix_command));
                }
                steps.push(if is_app {
                    "quasar dev   # or: yarn quasar dev".to_string()
                } else {
                    "yarn dev   # or: npm run dev".to_string()
                });
            }
        }

        steps
    }

    fn upgrade_command(&self) -> &'static str {
        "cargo install create-quasar --force"
    }
}

/// A command for yarn, with the npm equivalent as a trailing comment
fn either(command: fn(&PackageManager) -> String) -> String {
    format!(
        "{}   # or: {}",
        command(&PackageManager::Yarn),
        command(&PackageManager::Npm)
    )
}

#[derive(Parser, Debug)]
#[command(name = "create-quasar")]
#[command(about = "CLI for scaffolding Quasar apps, app extensions and UI kits")]
#[command(disable_version_flag = true)]
pub struct Args {
    /// Project folder to create
    pub directory: Option<String>,

    /// What to build
    #[arg(short = 't', long = "type", value_enum)]
    pub project_type: Option<ProjectType>,

    /// Version requirement the template must satisfy (e.g. "^2.0")
    #[arg(short = 'v', long = "version")]
    pub version: Option<String>,

    /// Local directory to use for templates instead of fetching from remote (for development use)
    #[arg(long = "template-dir")]
    pub template_dir: Option<PathBuf>,
}

async fn create(config: &QuasarConfig, args: Args) -> Result<()> {
    let fetcher = match args.template_dir {
        Some(dir) => TemplateFetcher::from_local(dir, config.user_agent()),
        None => TemplateFetcher::from_config(config)?,
    };
    let mut generator = ManifestGenerator::new(fetcher, CLI_VERSION, config.upgrade_command())
        .with_version_requirement(args.version);

    let create_args = CreateArgs {
        directory: args.directory,
        project_type: args.project_type,
        ..CreateArgs::from_env()?
    };

    create_core::run(
        config,
        create_args,
        &mut CliclackUi::new(),
        &mut generator,
        &PackageManagerToolchain,
    )
    .await?;

    Ok(())
}

#[tokio::main]
async fn main() {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();
    let result = create(&QuasarConfig, args).await;

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    if let Err(e) = result {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}
