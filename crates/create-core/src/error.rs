//! Error types for the scaffolding flow
//!
//! Only the variants of [`ScaffoldError`] stop a run abnormally. Install and
//! lint failures are reported as [`ToolError`] and downgraded to warnings by
//! the post-scaffold pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Fatal outcomes of a scaffolding run
#[derive(Error, Debug)]
pub enum ScaffoldError {
    /// The working directory already belongs to a project of this kind
    #[error("Detected an existing project at {}. Run this command outside of it.", root.display())]
    InsideProject { root: PathBuf },

    /// The user declined to overwrite a non-empty target directory
    #[error("Scaffolding cancelled")]
    ScaffoldingCancelled,

    /// A prompt was interrupted and no cancel handler was installed
    #[error("Prompt cancelled")]
    Cancelled,

    /// A scope field was read before any prompt resolved it
    #[error("Scope field '{field}' has not been resolved")]
    Unresolved { field: &'static str },
}

/// Failure of a prompting backend
#[derive(Error, Debug)]
pub enum PromptError {
    /// The user interrupted the prompt (Esc / Ctrl+C)
    #[error("prompt cancelled by user")]
    Cancelled,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl PromptError {
    /// Classify a terminal error, treating interrupts as cancellation
    pub fn from_terminal(err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::Interrupted {
            PromptError::Cancelled
        } else {
            PromptError::Io(err)
        }
    }
}

/// Failure of an external tool (package manager install or lint)
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("Failed to start `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` exited with code {code}")]
    Failed { command: String, code: i32 },
}
