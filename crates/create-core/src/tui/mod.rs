//! Terminal interaction
//!
//! [`Ui`] is the seam between the flow and the terminal. The cliclack-backed
//! implementation is only available when the `tui` feature is enabled.

#[cfg(feature = "tui")]
mod terminal;

#[cfg(feature = "tui")]
pub use terminal::CliclackUi;

use crate::error::PromptError;
use crate::prompt::Choice;
use crate::scope::Value;

/// Prompting and logging capabilities used throughout a run
pub trait Ui {
    /// Opening banner line
    fn intro(&mut self, title: &str);

    /// Ask the user to pick one of `choices`
    fn select(
        &mut self,
        message: &str,
        choices: &[Choice],
        initial: Option<&Value>,
    ) -> Result<Value, PromptError>;

    /// Ask for free text, pre-filled with `initial`
    fn text(&mut self, message: &str, initial: Option<&str>) -> Result<String, PromptError>;

    /// Ask a yes/no question
    fn confirm(&mut self, message: &str, initial: bool) -> Result<bool, PromptError>;

    fn info(&mut self, message: &str);
    fn success(&mut self, message: &str);
    fn warn(&mut self, message: &str);

    /// Closing summary; always the last thing printed on a normal exit
    fn outro(&mut self, title: &str, lines: &[String]);
}
