//! Scripted collaborators for exercising the flow without a terminal.
//!
//! Enabled for unit tests and, through the `test-support` feature, for the
//! integration tests under `tests/`.

use crate::error::{PromptError, ToolError};
use crate::product::ProductConfig;
use crate::prompt::Choice;
use crate::runtime::Toolchain;
use crate::scope::{PackageManager, ProjectType, Scope, Value};
use crate::templates::TemplateGenerator;
use crate::tui::Ui;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::io;
use std::path::{Path, PathBuf};

/// A canned reply to the next prompt
#[derive(Debug, Clone)]
pub enum Answer {
    Text(String),
    Confirm(bool),
    Select(Value),
    Cancel,
}

impl Answer {
    pub fn text(s: impl Into<String>) -> Self {
        Answer::Text(s.into())
    }

    pub fn confirm(b: bool) -> Self {
        Answer::Confirm(b)
    }

    pub fn select(value: Value) -> Self {
        Answer::Select(value)
    }
}

/// Everything the [`ScriptedUi`] was asked to show
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Intro(String),
    Asked { message: String, offered: Vec<Value> },
    Info(String),
    Success(String),
    Warn(String),
    Outro { title: String, lines: Vec<String> },
}

/// [`Ui`] that replays scripted answers and records output
#[derive(Debug, Default)]
pub struct ScriptedUi {
    answers: VecDeque<Answer>,
    events: Vec<Event>,
}

impl ScriptedUi {
    pub fn new(answers: impl IntoIterator<Item = Answer>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            events: Vec::new(),
        }
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Messages of the prompts shown, in order
    pub fn asked(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Asked { message, .. } => Some(message.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Choice values offered by the `index`-th prompt shown
    pub fn offered(&self, index: usize) -> Vec<Value> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Asked { offered, .. } => Some(offered.clone()),
                _ => None,
            })
            .nth(index)
            .unwrap_or_default()
    }

    pub fn infos(&self) -> Vec<&str> {
        self.messages(|e| match e {
            Event::Info(m) => Some(m),
            _ => None,
        })
    }

    pub fn successes(&self) -> Vec<&str> {
        self.messages(|e| match e {
            Event::Success(m) => Some(m),
            _ => None,
        })
    }

    pub fn warnings(&self) -> Vec<&str> {
        self.messages(|e| match e {
            Event::Warn(m) => Some(m),
            _ => None,
        })
    }

    /// Number of final reports printed
    pub fn outros(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, Event::Outro { .. }))
            .count()
    }

    /// Unused scripted answers
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }

    fn messages<'a>(&'a self, f: impl Fn(&'a Event) -> Option<&'a String>) -> Vec<&'a str> {
        self.events
            .iter()
            .filter_map(f)
            .map(String::as_str)
            .collect()
    }

    fn next_answer(&mut self, message: &str, offered: Vec<Value>) -> Result<Answer, PromptError> {
        self.events.push(Event::Asked {
            message: message.to_string(),
            offered,
        });
        match self.answers.pop_front() {
            Some(Answer::Cancel) => Err(PromptError::Cancelled),
            Some(answer) => Ok(answer),
            None => Err(unexpected(format!("no scripted answer for '{}'", message))),
        }
    }
}

fn unexpected(msg: String) -> PromptError {
    PromptError::Io(io::Error::new(io::ErrorKind::Other, msg))
}

impl Ui for ScriptedUi {
    fn intro(&mut self, title: &str) {
        self.events.push(Event::Intro(title.to_string()));
    }

    fn select(
        &mut self,
        message: &str,
        choices: &[Choice],
        _initial: Option<&Value>,
    ) -> Result<Value, PromptError> {
        let offered: Vec<Value> = choices.iter().map(|c| c.value.clone()).collect();
        match self.next_answer(message, offered.clone())? {
            Answer::Select(value) if offered.contains(&value) => Ok(value),
            other => Err(unexpected(format!("'{}' cannot take {:?}", message, other))),
        }
    }

    fn text(&mut self, message: &str, initial: Option<&str>) -> Result<String, PromptError> {
        match self.next_answer(message, Vec::new())? {
            // Enter on an empty input accepts the default, like the terminal backend
            Answer::Text(s) if s.is_empty() => Ok(initial.unwrap_or_default().to_string()),
            Answer::Text(s) => Ok(s),
            other => Err(unexpected(format!("'{}' cannot take {:?}", message, other))),
        }
    }

    fn confirm(&mut self, message: &str, _initial: bool) -> Result<bool, PromptError> {
        match self.next_answer(message, Vec::new())? {
            Answer::Confirm(b) => Ok(b),
            other => Err(unexpected(format!("'{}' cannot take {:?}", message, other))),
        }
    }

    fn info(&mut self, message: &str) {
        self.events.push(Event::Info(message.to_string()));
    }

    fn success(&mut self, message: &str) {
        self.events.push(Event::Success(message.to_string()));
    }

    fn warn(&mut self, message: &str) {
        self.events.push(Event::Warn(message.to_string()));
    }

    fn outro(&mut self, title: &str, lines: &[String]) {
        self.events.push(Event::Outro {
            title: title.to_string(),
            lines: lines.to_vec(),
        });
    }
}

/// A call made to [`FakeToolchain`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolCall {
    Install(PackageManager, PathBuf),
    LintFix(PackageManager, PathBuf),
}

/// [`Toolchain`] with scripted success/failure
#[derive(Debug, Default)]
pub struct FakeToolchain {
    pub fail_install: bool,
    pub fail_lint: bool,
    calls: RefCell<Vec<ToolCall>>,
}

impl FakeToolchain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_install() -> Self {
        Self {
            fail_install: true,
            ..Self::default()
        }
    }

    pub fn failing_lint() -> Self {
        Self {
            fail_lint: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<ToolCall> {
        self.calls.borrow().clone()
    }
}

impl Toolchain for FakeToolchain {
    async fn install_dependencies(&self, pm: PackageManager, dir: &Path) -> Result<(), ToolError> {
        self.calls
            .borrow_mut()
            .push(ToolCall::Install(pm, dir.to_path_buf()));
        if self.fail_install {
            Err(ToolError::Failed {
                command: format!("{} install", pm),
                code: 1,
            })
        } else {
            Ok(())
        }
    }

    async fn lint_fix(&self, pm: PackageManager, dir: &Path) -> Result<(), ToolError> {
        self.calls
            .borrow_mut()
            .push(ToolCall::LintFix(pm, dir.to_path_buf()));
        if self.fail_lint {
            Err(ToolError::Failed {
                command: pm.lint_fix_command(),
                code: 2,
            })
        } else {
            Ok(())
        }
    }
}

/// [`TemplateGenerator`] that writes a minimal manifest and records calls
#[derive(Debug, Default)]
pub struct FakeGenerator {
    /// Value written to `scope.lint`
    pub lint: bool,
    /// Value written to `scope.skip_deps_install`
    pub skip_deps_install: bool,
    /// Contents written to `package.json`; a minimal manifest when unset
    pub manifest: Option<String>,
    /// Project types the generator was invoked with
    pub calls: Vec<ProjectType>,
}

impl FakeGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_lint(mut self) -> Self {
        self.lint = true;
        self
    }

    pub fn skipping_install(mut self) -> Self {
        self.skip_deps_install = true;
        self
    }

    pub fn with_manifest(mut self, contents: &str) -> Self {
        self.manifest = Some(contents.to_string());
        self
    }
}

impl TemplateGenerator for FakeGenerator {
    async fn generate<U: Ui>(
        &mut self,
        project_type: ProjectType,
        scope: &mut Scope,
        _ui: &mut U,
    ) -> anyhow::Result<()> {
        self.calls.push(project_type);
        scope.lint = self.lint;
        scope.skip_deps_install = self.skip_deps_install;

        let folder = scope.project_folder()?;
        std::fs::create_dir_all(folder)?;
        let manifest = self
            .manifest
            .as_deref()
            .unwrap_or(r#"{"version": "0.0.1", "name": "fake"}"#);
        std::fs::write(folder.join("package.json"), manifest)?;
        Ok(())
    }
}

/// Minimal [`ProductConfig`] for tests
#[derive(Debug, Clone, Default)]
pub struct TestProduct;

impl ProductConfig for TestProduct {
    fn name(&self) -> &'static str {
        "test-create"
    }

    fn display_name(&self) -> &'static str {
        "Test Create"
    }

    fn default_project_folder(&self) -> &'static str {
        "quasar-project"
    }

    fn project_markers(&self) -> &'static [&'static str] {
        &["quasar.config.js", "quasar.config.ts"]
    }

    fn project_type_choice(&self, project_type: ProjectType) -> (&'static str, &'static str) {
        match project_type {
            ProjectType::App => ("App", ""),
            ProjectType::AppExtension => ("App Extension", ""),
            ProjectType::UiKit => ("UI kit", ""),
        }
    }

    fn default_template_url(&self) -> &'static str {
        "https://templates.invalid/create"
    }

    fn template_url_env(&self) -> &'static str {
        "TEST_CREATE_TEMPLATE_URL"
    }

    fn docs_url(&self) -> &'static str {
        "https://docs.invalid"
    }

    fn next_steps(&self, scope: &Scope) -> Vec<String> {
        match scope.package_manager {
            Some(pm) => vec![format!("installed with {}", pm)],
            None => vec!["install dependencies".to_string()],
        }
    }

    fn upgrade_command(&self) -> &'static str {
        "cargo install test-create --force"
    }
}
