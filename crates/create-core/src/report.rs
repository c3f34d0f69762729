//! Closing summary printed at the end of every non-fatal run

use crate::product::ProductConfig;
use crate::scope::Scope;
use crate::tui::Ui;

/// Print the numbered next steps for `scope` followed by the docs link
pub fn print_final_message<C: ProductConfig, U: Ui>(config: &C, scope: &Scope, ui: &mut U) {
    let mut lines: Vec<String> = config
        .next_steps(scope)
        .iter()
        .enumerate()
        .map(|(i, step)| format!("{}. {}", i + 1, step))
        .collect();

    lines.push(String::new());
    lines.push(format!("Documentation: {}", config.docs_url()));

    ui.outro("To get started", &lines);
}
