//! Sequential prompt orchestration
//!
//! A run asks its questions as an ordered list of [`PromptSpec`]s. Each spec
//! may compute its kind, message and choices from the scope accumulated so
//! far, so they are resolved lazily, one spec at a time, right before the
//! question is shown. A spec whose kind resolves to `None` is skipped: nothing
//! is shown and nothing is written.
//!
//! # Example
//!
//! ```ignore
//! let specs = vec![
//!     PromptSpec::text("projectFolder", "Project folder:").initial("my-app"),
//!     PromptSpec::new("overwrite")
//!         .kind_with(|_, scope| Ok(scope.flag("exists").then_some(PromptKind::Confirm)))
//!         .message("Remove existing files?"),
//! ];
//! prompts(&mut scope, specs, &mut ui, None)?;
//! ```

use crate::error::{PromptError, ScaffoldError};
use crate::scope::{Scope, Value};
use crate::tui::Ui;
use anyhow::Result;

/// The widget used to ask a question
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    Text,
    Confirm,
    Select,
}

/// One entry of a select prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub title: String,
    pub value: Value,
    pub hint: String,
}

impl Choice {
    pub fn new(title: impl Into<String>, value: Value) -> Self {
        Self {
            title: title.into(),
            value,
            hint: String::new(),
        }
    }

    pub fn hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = hint.into();
        self
    }
}

/// A spec attribute that is either fixed or computed from the current scope
pub enum Lazy<T> {
    Fixed(T),
    Computed(Box<dyn Fn(&Scope) -> T>),
}

impl<T: Clone> Lazy<T> {
    fn resolve(&self, scope: &Scope) -> T {
        match self {
            Lazy::Fixed(value) => value.clone(),
            Lazy::Computed(f) => f(scope),
        }
    }
}

type KindFn = dyn Fn(Option<&Value>, &Scope) -> Result<Option<PromptKind>, ScaffoldError>;
type FormatFn = dyn Fn(Value, &mut Scope) -> Value;

/// How a spec decides whether and how it is shown
pub enum KindSpec {
    Fixed(PromptKind),
    /// Receives the previous answer and the scope; `Ok(None)` skips the
    /// prompt, `Err` aborts the whole pass
    Computed(Box<KindFn>),
}

/// A single question in a prompt pass
pub struct PromptSpec {
    kind: KindSpec,
    name: String,
    message: Lazy<String>,
    initial: Option<Value>,
    choices: Lazy<Vec<Choice>>,
    format: Option<Box<FormatFn>>,
}

impl PromptSpec {
    /// A spec that is skipped until given a kind; useful for side-effect-only
    /// entries with an empty name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            kind: KindSpec::Computed(Box::new(|_, _| Ok(None))),
            name: name.into(),
            message: Lazy::Fixed(String::new()),
            initial: None,
            choices: Lazy::Fixed(Vec::new()),
            format: None,
        }
    }

    pub fn text(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(name).kind(PromptKind::Text).message(message)
    }

    pub fn confirm(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(name).kind(PromptKind::Confirm).message(message)
    }

    pub fn select(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(name).kind(PromptKind::Select).message(message)
    }

    pub fn kind(mut self, kind: PromptKind) -> Self {
        self.kind = KindSpec::Fixed(kind);
        self
    }

    pub fn kind_with<F>(mut self, f: F) -> Self
    where
        F: Fn(Option<&Value>, &Scope) -> Result<Option<PromptKind>, ScaffoldError> + 'static,
    {
        self.kind = KindSpec::Computed(Box::new(f));
        self
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Lazy::Fixed(message.into());
        self
    }

    pub fn message_with<F>(mut self, f: F) -> Self
    where
        F: Fn(&Scope) -> String + 'static,
    {
        self.message = Lazy::Computed(Box::new(f));
        self
    }

    pub fn initial(mut self, initial: impl Into<Value>) -> Self {
        self.initial = Some(initial.into());
        self
    }

    pub fn choices(mut self, choices: Vec<Choice>) -> Self {
        self.choices = Lazy::Fixed(choices);
        self
    }

    pub fn choices_with<F>(mut self, f: F) -> Self
    where
        F: Fn(&Scope) -> Vec<Choice> + 'static,
    {
        self.choices = Lazy::Computed(Box::new(f));
        self
    }

    /// Transform the raw answer before it is stored; may also write other
    /// scope fields
    pub fn format<F>(mut self, f: F) -> Self
    where
        F: Fn(Value, &mut Scope) -> Value + 'static,
    {
        self.format = Some(Box::new(f));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn resolve_kind(
        &self,
        previous: Option<&Value>,
        scope: &Scope,
    ) -> Result<Option<PromptKind>, ScaffoldError> {
        match &self.kind {
            KindSpec::Fixed(kind) => Ok(Some(*kind)),
            KindSpec::Computed(f) => f(previous, scope),
        }
    }
}

/// Whether a prompt pass ran to the end
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Completed,
    /// A prompt was cancelled and the cancel handler ran
    Cancelled,
}

/// Handler invoked when the user cancels a prompt
pub type OnCancel<'a, U> = &'a mut dyn FnMut(&mut Scope, &mut U);

/// Run `specs` in order against `scope`.
///
/// Without `on_cancel`, a cancelled prompt aborts with
/// [`ScaffoldError::Cancelled`]. With it, the handler runs and the pass stops
/// with [`Flow::Cancelled`].
pub fn prompts<U: Ui>(
    scope: &mut Scope,
    specs: Vec<PromptSpec>,
    ui: &mut U,
    on_cancel: Option<OnCancel<'_, U>>,
) -> Result<Flow> {
    let mut previous: Option<Value> = None;

    for spec in specs {
        let Some(kind) = spec.resolve_kind(previous.as_ref(), scope)? else {
            continue;
        };

        let message = spec.message.resolve(scope);
        let answer = match kind {
            PromptKind::Text => {
                let initial = spec.initial.as_ref().map(Value::to_string);
                ui.text(&message, initial.as_deref()).map(Value::Text)
            }
            PromptKind::Confirm => {
                let initial = spec
                    .initial
                    .as_ref()
                    .and_then(Value::as_bool)
                    .unwrap_or(false);
                ui.confirm(&message, initial).map(Value::Bool)
            }
            PromptKind::Select => {
                let choices = spec.choices.resolve(scope);
                ui.select(&message, &choices, spec.initial.as_ref())
            }
        };

        let value = match answer {
            Ok(value) => value,
            Err(PromptError::Cancelled) => {
                return match on_cancel {
                    Some(handler) => {
                        handler(scope, ui);
                        Ok(Flow::Cancelled)
                    }
                    None => Err(ScaffoldError::Cancelled.into()),
                };
            }
            Err(PromptError::Io(e)) => return Err(e.into()),
        };

        let value = match &spec.format {
            Some(format) => format(value, scope),
            None => value,
        };

        scope.apply(&spec.name, value.clone());
        previous = Some(value);
    }

    Ok(Flow::Completed)
}
