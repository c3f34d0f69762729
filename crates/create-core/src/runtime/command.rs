//! Running external tools with streamed output

use crate::error::ToolError;
use colored::Colorize;
use std::path::Path;
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command as TokioCommand;

/// Run `program args...` in `dir`, echoing its output line by line.
///
/// Waits for the process without a deadline. A non-zero exit or a failure to
/// start is returned as a [`ToolError`].
pub async fn run_streaming(program: String, args: &[&str], dir: &Path) -> Result<(), ToolError> {
    let command = format!("{} {}", program, args.join(" "));
    println!();
    println!("{} {}", "Running:".dimmed(), command.yellow());
    println!();

    let spawn_error = |source| ToolError::Spawn {
        command: command.clone(),
        source,
    };

    let mut child = TokioCommand::new(&program)
        .args(args)
        .current_dir(dir)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(spawn_error)?;

    let mut stdout_reader = child.stdout.take().map(|s| BufReader::new(s).lines());
    let mut stderr_reader = child.stderr.take().map(|s| BufReader::new(s).lines());

    while stdout_reader.is_some() || stderr_reader.is_some() {
        tokio::select! {
            line = next_line(&mut stdout_reader), if stdout_reader.is_some() => {
                match line {
                    Some(line) => println!("  {}", line),
                    None => stdout_reader = None,
                }
            }
            line = next_line(&mut stderr_reader), if stderr_reader.is_some() => {
                match line {
                    Some(line) => eprintln!("  {}", line.yellow()),
                    None => stderr_reader = None,
                }
            }
        }
    }

    let status = child.wait().await.map_err(spawn_error)?;
    println!();

    if status.success() {
        Ok(())
    } else {
        Err(ToolError::Failed {
            command,
            code: status.code().unwrap_or(-1),
        })
    }
}

type Lines<R> = Option<tokio::io::Lines<BufReader<R>>>;

/// Next line of an open stream; `None` once it is closed or unreadable
async fn next_line<R>(reader: &mut Lines<R>) -> Option<String>
where
    R: tokio::io::AsyncRead + Unpin,
{
    match reader {
        Some(lines) => match lines.next_line().await {
            Ok(line) => line,
            Err(e) => {
                eprintln!("{} {}", "Error reading output:".red(), e);
                None
            }
        },
        None => None,
    }
}
