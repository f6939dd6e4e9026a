//! Prompt templates for follow-up questions.
//!
//! Templates use `{{name}}` placeholders. `{{summary}}` and `{{prompt}}` are
//! always provided; anything in `variables` is available as well.

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::LazyLock;

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{(\w+)\}\}").expect("Invalid regex"));

/// Collection of all prompt templates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Prompts {
    pub followup: FollowupPrompts,
    /// Custom variables available in all prompts.
    pub variables: HashMap<String, String>,
}

/// Prompts sent to the chat endpoint when asking about a stored summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FollowupPrompts {
    pub system: String,
    pub user: String,
}

impl Default for FollowupPrompts {
    fn default() -> Self {
        Self {
            system: r#"You are a helpful assistant answering questions about a set of videos.
Use only the video summary below as your source. If the summary does not cover the question, say so.

Video summary:
{{summary}}"#
                .to_string(),
            user: "{{prompt}}".to_string(),
        }
    }
}

impl Prompts {
    /// Render a prompt template with the given variables.
    ///
    /// Substitution is a single pass over the template: values are inserted
    /// as-is and never scanned for placeholders themselves. Unknown
    /// placeholders are left untouched.
    pub fn render(template: &str, vars: &HashMap<String, String>) -> String {
        PLACEHOLDER
            .replace_all(template, |caps: &Captures| match vars.get(&caps[1]) {
                Some(value) => value.clone(),
                None => caps[0].to_string(),
            })
            .into_owned()
    }

    /// Render a template with both provided variables and custom config variables.
    /// Provided variables take precedence.
    pub fn render_with_custom(&self, template: &str, vars: &HashMap<String, String>) -> String {
        let mut merged = self.variables.clone();
        for (key, value) in vars {
            merged.insert(key.clone(), value.clone());
        }
        Self::render(template, &merged)
    }
}
