//! End-to-end tests of the scaffolding run with scripted collaborators

use create_core::test_support::{
    Answer, FakeGenerator, FakeToolchain, ScriptedUi, TestProduct, ToolCall,
};
use create_core::{
    run, CreateArgs, PackageManager, PipelineOutcome, ProjectType, ScaffoldError, Value,
};
use std::path::Path;

const OVERWRITE_MY_KIT: &str =
    "Target directory \"my-kit\" is not empty. Remove existing files and continue?";
const INSTALL: &str = "Install project dependencies? (recommended)";

fn args(cwd: &Path) -> CreateArgs {
    CreateArgs {
        directory: None,
        project_type: None,
        cwd: cwd.to_path_buf(),
        running_package_manager: None,
    }
}

fn skip_install() -> Answer {
    Answer::select(Value::Bool(false))
}

#[tokio::test]
async fn test_app_in_current_empty_directory() {
    let cwd = tempfile::tempdir().unwrap();
    let mut ui = ScriptedUi::new([
        Answer::select(Value::text("app")),
        Answer::text("."),
        skip_install(),
    ]);
    let mut generator = FakeGenerator::new();
    let toolchain = FakeToolchain::new();

    let outcome = run(&TestProduct, args(cwd.path()), &mut ui, &mut generator, &toolchain)
        .await
        .unwrap();

    assert_eq!(
        ui.asked(),
        vec!["What would you like to build?", "Project folder:", INSTALL]
    );
    assert_eq!(outcome.scope.project_folder.as_deref(), Some(cwd.path()));
    assert_eq!(outcome.scope.project_folder_name.as_deref(), Some("."));
    assert_eq!(outcome.scope.overwrite, None);
    assert_eq!(generator.calls, vec![ProjectType::App]);
    assert_eq!(outcome.pipeline, PipelineOutcome::Completed);
    assert_eq!(ui.outros(), 1);
}

#[tokio::test]
async fn test_blank_folder_uses_default_name() {
    let cwd = tempfile::tempdir().unwrap();
    let mut ui = ScriptedUi::new([
        Answer::select(Value::text("app-extension")),
        Answer::text(""),
        skip_install(),
    ]);
    let mut generator = FakeGenerator::new();

    let outcome = run(
        &TestProduct,
        args(cwd.path()),
        &mut ui,
        &mut generator,
        &FakeToolchain::new(),
    )
    .await
    .unwrap();

    assert_eq!(
        outcome.scope.project_folder,
        Some(cwd.path().join("quasar-project"))
    );
    assert_eq!(
        outcome.scope.project_folder_name.as_deref(),
        Some("quasar-project")
    );
    assert!(cwd.path().join("quasar-project/package.json").is_file());
}

#[tokio::test]
async fn test_non_empty_target_confirmed_proceeds_to_dispatch() {
    let cwd = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(cwd.path().join("my-kit")).unwrap();
    std::fs::write(cwd.path().join("my-kit/old.txt"), "old").unwrap();

    let mut ui = ScriptedUi::new([
        Answer::select(Value::text("ui-kit")),
        Answer::text("my-kit"),
        Answer::confirm(true),
        skip_install(),
    ]);
    let mut generator = FakeGenerator::new();

    let outcome = run(
        &TestProduct,
        args(cwd.path()),
        &mut ui,
        &mut generator,
        &FakeToolchain::new(),
    )
    .await
    .unwrap();

    assert_eq!(ui.asked()[2], OVERWRITE_MY_KIT);
    assert_eq!(outcome.scope.overwrite, Some(true));
    assert_eq!(generator.calls, vec![ProjectType::UiKit]);
}

#[tokio::test]
async fn test_current_directory_overwrite_message() {
    let cwd = tempfile::tempdir().unwrap();
    std::fs::write(cwd.path().join("README.md"), "hi").unwrap();

    let mut ui = ScriptedUi::new([
        Answer::select(Value::text("app")),
        Answer::text("."),
        Answer::confirm(true),
        skip_install(),
    ]);

    run(
        &TestProduct,
        args(cwd.path()),
        &mut ui,
        &mut FakeGenerator::new(),
        &FakeToolchain::new(),
    )
    .await
    .unwrap();

    assert_eq!(
        ui.asked()[2],
        "Current directory is not empty. Remove existing files and continue?"
    );
}

#[tokio::test]
async fn test_declined_overwrite_stops_before_any_file_is_written() {
    let cwd = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(cwd.path().join("my-kit")).unwrap();
    std::fs::write(cwd.path().join("my-kit/old.txt"), "old").unwrap();

    let mut ui = ScriptedUi::new([
        Answer::select(Value::text("ui-kit")),
        Answer::text("my-kit"),
        Answer::confirm(false),
    ]);
    let mut generator = FakeGenerator::new();

    let err = run(
        &TestProduct,
        args(cwd.path()),
        &mut ui,
        &mut generator,
        &FakeToolchain::new(),
    )
    .await
    .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<ScaffoldError>(),
        Some(ScaffoldError::ScaffoldingCancelled)
    ));
    assert!(generator.calls.is_empty());
    assert!(!cwd.path().join("my-kit/package.json").exists());
    assert_eq!(ui.outros(), 0);
}

#[tokio::test]
async fn test_cancelled_initial_prompt_is_fatal() {
    let cwd = tempfile::tempdir().unwrap();
    let mut ui = ScriptedUi::new([Answer::select(Value::text("app")), Answer::Cancel]);
    let mut generator = FakeGenerator::new();

    let err = run(
        &TestProduct,
        args(cwd.path()),
        &mut ui,
        &mut generator,
        &FakeToolchain::new(),
    )
    .await
    .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<ScaffoldError>(),
        Some(ScaffoldError::Cancelled)
    ));
    assert!(generator.calls.is_empty());
}

#[tokio::test]
async fn test_inside_existing_project_fails_before_prompts() {
    let cwd = tempfile::tempdir().unwrap();
    std::fs::write(cwd.path().join("quasar.config.js"), "").unwrap();
    let nested = cwd.path().join("src");
    std::fs::create_dir_all(&nested).unwrap();

    let mut ui = ScriptedUi::new([]);
    let err = run(
        &TestProduct,
        args(&nested),
        &mut ui,
        &mut FakeGenerator::new(),
        &FakeToolchain::new(),
    )
    .await
    .unwrap_err();

    match err.downcast_ref::<ScaffoldError>() {
        Some(ScaffoldError::InsideProject { root }) => assert_eq!(root, cwd.path()),
        other => panic!("unexpected error: {:?}", other),
    }
    assert!(ui.asked().is_empty());
}

#[tokio::test]
async fn test_command_line_answers_skip_prompts() {
    let cwd = tempfile::tempdir().unwrap();
    let mut ui = ScriptedUi::new([skip_install()]);
    let mut generator = FakeGenerator::new();
    let args = CreateArgs {
        directory: Some("cli-app".to_string()),
        project_type: Some(ProjectType::AppExtension),
        ..args(cwd.path())
    };

    let outcome = run(&TestProduct, args, &mut ui, &mut generator, &FakeToolchain::new())
        .await
        .unwrap();

    assert_eq!(ui.asked(), vec![INSTALL]);
    assert_eq!(outcome.scope.project_folder, Some(cwd.path().join("cli-app")));
    assert_eq!(outcome.scope.project_folder_name.as_deref(), Some("cli-app"));
    assert_eq!(generator.calls, vec![ProjectType::AppExtension]);
}

#[tokio::test]
async fn test_manifest_is_normalized_after_generation() {
    let cwd = tempfile::tempdir().unwrap();
    let mut ui = ScriptedUi::new([
        Answer::select(Value::text("app")),
        Answer::text("sorted"),
        skip_install(),
    ]);

    run(
        &TestProduct,
        args(cwd.path()),
        &mut ui,
        &mut FakeGenerator::new(),
        &FakeToolchain::new(),
    )
    .await
    .unwrap();

    let manifest = std::fs::read_to_string(cwd.path().join("sorted/package.json")).unwrap();
    assert_eq!(
        manifest,
        "{\n  \"name\": \"fake\",\n  \"version\": \"0.0.1\"\n}\n"
    );
    assert_eq!(ui.successes(), vec!["The project has been scaffolded"]);
}

#[tokio::test]
async fn test_install_cancel_exits_cleanly_without_package_manager() {
    let cwd = tempfile::tempdir().unwrap();
    let mut ui = ScriptedUi::new([
        Answer::select(Value::text("app")),
        Answer::text("proj"),
        Answer::Cancel,
    ]);
    let toolchain = FakeToolchain::new();

    let outcome = run(
        &TestProduct,
        args(cwd.path()),
        &mut ui,
        &mut FakeGenerator::new().with_lint(),
        &toolchain,
    )
    .await
    .unwrap();

    assert_eq!(outcome.pipeline, PipelineOutcome::InstallCancelled);
    assert_eq!(outcome.scope.package_manager, None);
    assert_eq!(ui.outros(), 1);
    assert!(toolchain.calls().is_empty());
}

#[tokio::test]
async fn test_install_failure_degrades_to_scaffolded_only() {
    let cwd = tempfile::tempdir().unwrap();
    let mut ui = ScriptedUi::new([
        Answer::select(Value::text("app")),
        Answer::text("proj"),
        Answer::select(Value::text("yarn")),
    ]);
    let toolchain = FakeToolchain::failing_install();

    let outcome = run(
        &TestProduct,
        args(cwd.path()),
        &mut ui,
        &mut FakeGenerator::new().with_lint(),
        &toolchain,
    )
    .await
    .unwrap();

    assert_eq!(outcome.pipeline, PipelineOutcome::InstallFailed);
    assert_eq!(outcome.scope.package_manager, None);
    assert_eq!(ui.warnings().len(), 1);
    assert!(ui.warnings()[0].starts_with("Could not auto install dependencies."));
    assert_eq!(ui.outros(), 1);
    // Lint is skipped even though the template asked for it
    assert_eq!(
        toolchain.calls(),
        vec![ToolCall::Install(PackageManager::Yarn, cwd.path().join("proj"))]
    );
}

#[tokio::test]
async fn test_lint_failure_still_reports_and_keeps_package_manager() {
    let cwd = tempfile::tempdir().unwrap();
    let mut ui = ScriptedUi::new([
        Answer::select(Value::text("ui-kit")),
        Answer::text("kit"),
        Answer::select(Value::text("npm")),
    ]);
    let toolchain = FakeToolchain::failing_lint();

    let outcome = run(
        &TestProduct,
        args(cwd.path()),
        &mut ui,
        &mut FakeGenerator::new().with_lint(),
        &toolchain,
    )
    .await
    .unwrap();

    let folder = cwd.path().join("kit");
    assert_eq!(outcome.pipeline, PipelineOutcome::Completed);
    assert_eq!(outcome.scope.package_manager, Some(PackageManager::Npm));
    assert!(!outcome.scope.lint_fixed);
    assert_eq!(ui.warnings().len(), 1);
    assert!(ui.warnings()[0].starts_with("Could not auto lint fix the project folder."));
    assert_eq!(ui.outros(), 1);
    assert_eq!(
        toolchain.calls(),
        vec![
            ToolCall::Install(PackageManager::Npm, folder.clone()),
            ToolCall::LintFix(PackageManager::Npm, folder),
        ]
    );
}

#[tokio::test]
async fn test_successful_lint_fix_is_recorded() {
    let cwd = tempfile::tempdir().unwrap();
    let mut ui = ScriptedUi::new([
        Answer::select(Value::text("app")),
        Answer::text("proj"),
        Answer::select(Value::text("yarn")),
    ]);

    let outcome = run(
        &TestProduct,
        args(cwd.path()),
        &mut ui,
        &mut FakeGenerator::new().with_lint(),
        &FakeToolchain::new(),
    )
    .await
    .unwrap();

    assert!(outcome.scope.lint_fixed);
    assert!(ui.warnings().is_empty());
}

#[tokio::test]
async fn test_unparseable_manifest_warns_and_still_reports() {
    let cwd = tempfile::tempdir().unwrap();
    let mut ui = ScriptedUi::new([
        Answer::select(Value::text("app")),
        Answer::text("broken"),
        skip_install(),
    ]);
    let broken = r#"{"name": "broken", "description": "Say "hi""}"#;

    let outcome = run(
        &TestProduct,
        args(cwd.path()),
        &mut ui,
        &mut FakeGenerator::new().with_manifest(broken),
        &FakeToolchain::new(),
    )
    .await
    .unwrap();

    assert_eq!(outcome.pipeline, PipelineOutcome::Completed);
    assert_eq!(ui.warnings().len(), 1);
    assert!(ui.warnings()[0].starts_with("Could not normalize package.json"));
    assert_eq!(ui.successes(), vec!["The project has been scaffolded"]);
    assert_eq!(ui.outros(), 1);
    assert_eq!(
        std::fs::read_to_string(cwd.path().join("broken/package.json")).unwrap(),
        broken
    );
}

#[tokio::test]
async fn test_install_success_without_lint_skips_lint_stage() {
    let cwd = tempfile::tempdir().unwrap();
    let mut ui = ScriptedUi::new([
        Answer::select(Value::text("app")),
        Answer::text("proj"),
        Answer::select(Value::text("yarn")),
    ]);
    let toolchain = FakeToolchain::new();

    let outcome = run(
        &TestProduct,
        args(cwd.path()),
        &mut ui,
        &mut FakeGenerator::new(),
        &toolchain,
    )
    .await
    .unwrap();

    assert_eq!(outcome.pipeline, PipelineOutcome::Completed);
    assert_eq!(outcome.scope.package_manager, Some(PackageManager::Yarn));
    assert!(ui.warnings().is_empty());
    assert_eq!(ui.outros(), 1);
    assert_eq!(
        toolchain.calls(),
        vec![ToolCall::Install(PackageManager::Yarn, cwd.path().join("proj"))]
    );
}

#[tokio::test]
async fn test_skip_deps_install_bypasses_install_and_lint() {
    let cwd = tempfile::tempdir().unwrap();
    let mut ui = ScriptedUi::new([Answer::select(Value::text("app")), Answer::text("proj")]);
    let toolchain = FakeToolchain::new();

    let outcome = run(
        &TestProduct,
        args(cwd.path()),
        &mut ui,
        &mut FakeGenerator::new().with_lint().skipping_install(),
        &toolchain,
    )
    .await
    .unwrap();

    assert!(!ui.asked().contains(&INSTALL));
    assert!(toolchain.calls().is_empty());
    assert_eq!(outcome.scope.package_manager, None);
    assert_eq!(ui.outros(), 1);
    assert_eq!(ui.remaining(), 0);
}

#[tokio::test]
async fn test_running_package_manager_is_sole_install_choice() {
    let cwd = tempfile::tempdir().unwrap();
    let mut ui = ScriptedUi::new([
        Answer::select(Value::text("app")),
        Answer::text("proj"),
        Answer::select(Value::text("pnpm")),
    ]);
    let toolchain = FakeToolchain::new();
    let args = CreateArgs {
        running_package_manager: Some(PackageManager::Pnpm),
        ..args(cwd.path())
    };

    run(&TestProduct, args, &mut ui, &mut FakeGenerator::new(), &toolchain)
        .await
        .unwrap();

    assert_eq!(ui.offered(2), vec![Value::text("pnpm"), Value::Bool(false)]);
    assert_eq!(
        toolchain.calls(),
        vec![ToolCall::Install(PackageManager::Pnpm, cwd.path().join("proj"))]
    );
}

#[tokio::test]
async fn test_unknown_running_package_manager_offers_yarn_and_npm() {
    let cwd = tempfile::tempdir().unwrap();
    let mut ui = ScriptedUi::new([
        Answer::select(Value::text("app")),
        Answer::text("proj"),
        skip_install(),
    ]);

    run(
        &TestProduct,
        args(cwd.path()),
        &mut ui,
        &mut FakeGenerator::new(),
        &FakeToolchain::new(),
    )
    .await
    .unwrap();

    assert_eq!(
        ui.offered(2),
        vec![Value::text("yarn"), Value::text("npm"), Value::Bool(false)]
    );
}
