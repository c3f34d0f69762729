//! Template manifest types and parsing

use crate::prompt::{Choice, PromptKind, PromptSpec};
use crate::scope::{Scope, Value};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-template manifest (`<project-type>/template.yaml`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateManifest {
    /// Display name of the template
    pub name: String,

    /// Description of what the template provides
    pub description: String,

    /// Semver version for CLI compatibility checking
    pub version: String,

    /// Questions asked after the project type and folder are known
    #[serde(default)]
    pub prompts: Vec<PromptDef>,

    /// Explicit list of files to copy
    pub files: Vec<String>,

    /// Answer name -> file patterns only copied when that answer is `true`
    #[serde(default)]
    pub feature_files: BTreeMap<String, Vec<String>>,

    /// Patterns of files whose `{{ key }}` placeholders are filled from the scope
    #[serde(default)]
    pub render: Vec<String>,

    /// Name of the boolean answer that turns on lint auto-fix after install
    #[serde(default)]
    pub lint: Option<String>,

    /// Never offer dependency installation for this template
    #[serde(default)]
    pub skip_deps_install: bool,
}

impl TemplateManifest {
    /// Whether `file_path` should be copied given the answers in `scope`
    pub fn includes(&self, file_path: &str, scope: &Scope) -> bool {
        let filename = file_name(file_path);
        self.feature_files
            .iter()
            .filter(|(_, patterns)| matches_any(filename, patterns))
            .all(|(feature, _)| scope.flag(feature))
    }

    /// Whether `file_path` gets placeholder substitution
    pub fn renders(&self, file_path: &str) -> bool {
        matches_any(file_name(file_path), &self.render)
    }

    /// Nested prompt specs, with initial values rendered against `scope`
    pub fn prompt_specs(&self, scope: &Scope) -> Vec<PromptSpec> {
        self.prompts.iter().map(|p| p.to_spec(scope)).collect()
    }
}

/// The widget a template prompt uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptDefKind {
    Text,
    Confirm,
    Select,
}

impl From<PromptDefKind> for PromptKind {
    fn from(kind: PromptDefKind) -> Self {
        match kind {
            PromptDefKind::Text => PromptKind::Text,
            PromptDefKind::Confirm => PromptKind::Confirm,
            PromptDefKind::Select => PromptKind::Select,
        }
    }
}

/// A question declared by a template
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptDef {
    pub name: String,
    pub kind: PromptDefKind,
    pub message: String,

    /// Text default (placeholders allowed), confirm default or select value
    #[serde(default)]
    pub initial: Option<serde_yaml::Value>,

    #[serde(default)]
    pub choices: Vec<ChoiceDef>,

    /// Only ask when this boolean answer is `true`
    #[serde(default)]
    pub when: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChoiceDef {
    pub value: String,
    pub title: String,
    #[serde(default)]
    pub hint: String,
}

impl PromptDef {
    pub fn to_spec(&self, scope: &Scope) -> PromptSpec {
        let kind = PromptKind::from(self.kind);
        let mut spec = match &self.when {
            Some(when) => {
                let when = when.clone();
                PromptSpec::new(self.name.clone())
                    .kind_with(move |_, scope| Ok(scope.flag(&when).then_some(kind)))
            }
            None => PromptSpec::new(self.name.clone()).kind(kind),
        }
        .message(self.message.clone());

        if let Some(initial) = &self.initial {
            match initial {
                serde_yaml::Value::Bool(b) => spec = spec.initial(*b),
                serde_yaml::Value::String(s) => spec = spec.initial(render(s, scope).as_str()),
                serde_yaml::Value::Number(n) => spec = spec.initial(n.to_string().as_str()),
                _ => {}
            }
        }

        if self.kind == PromptDefKind::Select {
            spec = spec.choices(
                self.choices
                    .iter()
                    .map(|c| Choice::new(&c.title, Value::text(&c.value)).hint(&c.hint))
                    .collect(),
            );
        }

        if self.kind == PromptDefKind::Text {
            spec = spec.format(|value, _| Value::Text(value.to_string().trim().to_string()));
        }

        spec
    }
}

/// Substitute `{{ key }}` placeholders with scope values.
///
/// Unknown keys are left untouched so framework template syntax survives.
pub fn render(text: &str, scope: &Scope) -> String {
    render_with(text, scope, |value| value)
}

/// Like [`render`], but escapes each substituted value for a JSON string
/// literal
pub fn render_json(text: &str, scope: &Scope) -> String {
    render_with(text, scope, |value| {
        let quoted = serde_json::Value::String(value).to_string();
        quoted[1..quoted.len() - 1].to_string()
    })
}

/// Render `file_path`'s contents, escaping values when the file is JSON
pub fn render_file(file_path: &str, text: &str, scope: &Scope) -> String {
    if file_path.ends_with(".json") {
        render_json(text, scope)
    } else {
        render(text, scope)
    }
}

fn render_with(text: &str, scope: &Scope, escape: impl Fn(String) -> String) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find("}}") {
            Some(end) => {
                let key = after[..end].trim();
                match scope.lookup(key) {
                    Some(value) => out.push_str(&escape(value)),
                    None => out.push_str(&rest[start..start + 2 + end + 2]),
                }
                rest = &after[end + 2..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }

    out.push_str(rest);
    out
}

fn file_name(file_path: &str) -> &str {
    file_path.rsplit('/').next().unwrap_or(file_path)
}

/// Check if a filename matches any pattern in a list
pub fn matches_any(filename: &str, patterns: &[String]) -> bool {
    patterns.iter().any(|pattern| {
        if let Some(suffix) = pattern.strip_prefix('*') {
            // Suffix match: *.ts matches foo.ts
            filename.ends_with(suffix)
        } else if let Some(prefix) = pattern.strip_suffix('*') {
            // Prefix match: .eslintrc* matches .eslintrc.cjs
            filename.starts_with(prefix)
        } else {
            filename == pattern
        }
    })
}
