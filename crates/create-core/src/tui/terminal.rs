//! Charm-style terminal backend using cliclack

use super::Ui;
use crate::error::PromptError;
use crate::prompt::Choice;
use crate::scope::Value;

/// [`Ui`] that renders inline cliclack prompts on stderr
#[derive(Debug, Default)]
pub struct CliclackUi;

impl CliclackUi {
    pub fn new() -> Self {
        Self
    }
}

impl Ui for CliclackUi {
    fn intro(&mut self, title: &str) {
        let _ = cliclack::intro(title);
    }

    fn select(
        &mut self,
        message: &str,
        choices: &[Choice],
        initial: Option<&Value>,
    ) -> Result<Value, PromptError> {
        let mut select = cliclack::select(message);
        for choice in choices {
            select = select.item(choice.value.clone(), &choice.title, &choice.hint);
        }
        if let Some(initial) = initial {
            select = select.initial_value(initial.clone());
        }
        select.interact().map_err(PromptError::from_terminal)
    }

    fn text(&mut self, message: &str, initial: Option<&str>) -> Result<String, PromptError> {
        let mut input = cliclack::input(message).required(false);
        if let Some(initial) = initial {
            input = input.placeholder(initial).default_input(initial);
        }
        input.interact().map_err(PromptError::from_terminal)
    }

    fn confirm(&mut self, message: &str, initial: bool) -> Result<bool, PromptError> {
        cliclack::confirm(message)
            .initial_value(initial)
            .interact()
            .map_err(PromptError::from_terminal)
    }

    fn info(&mut self, message: &str) {
        let _ = cliclack::log::info(message);
    }

    fn success(&mut self, message: &str) {
        let _ = cliclack::log::success(message);
    }

    fn warn(&mut self, message: &str) {
        let _ = cliclack::log::warning(message);
    }

    fn outro(&mut self, title: &str, lines: &[String]) {
        if !lines.is_empty() {
            let _ = cliclack::note(title, lines.join("\n"));
        }
        let _ = cliclack::outro(console::style("Enjoy! 🚀").cyan());
    }
}
