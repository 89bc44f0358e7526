use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use storyloom_common::FileConfig;

use crate::template::{fill_vars, resolve_config_vars, validate_template};

/// Holds pre-resolved prompt templates (config vars resolved, runtime
/// vars intact).
#[derive(Debug, Clone)]
pub struct PromptRegistry {
    story: String,
    improve: String,
    modify: String,
}

/// Allowed runtime variables per prompt type.
const STORY_RUNTIME_VARS: &[&str] = &["request", "strategy"];
const IMPROVE_RUNTIME_VARS: &[&str] = &["story", "directives"];
const MODIFY_RUNTIME_VARS: &[&str] = &["story", "feedback", "context"];

impl PromptRegistry {
    /// Load all prompt files, resolve config vars, validate runtime vars.
    pub fn load(config: &FileConfig, config_dir: &Path, toml_value: &toml::Value) -> Result<Self> {
        let story = load_and_resolve(
            &config.prompts.story,
            config_dir,
            toml_value,
            STORY_RUNTIME_VARS,
            "story",
        )?;

        let improve = load_and_resolve(
            &config.prompts.improve,
            config_dir,
            toml_value,
            IMPROVE_RUNTIME_VARS,
            "improve",
        )?;

        let modify = load_and_resolve(
            &config.prompts.modify,
            config_dir,
            toml_value,
            MODIFY_RUNTIME_VARS,
            "modify",
        )?;

        Ok(Self {
            story,
            improve,
            modify,
        })
    }

    /// Build a registry from already-resolved template strings.
    /// Used by tests and embedders that skip the file layer.
    pub fn from_templates(
        story: impl Into<String>,
        improve: impl Into<String>,
        modify: impl Into<String>,
    ) -> Self {
        Self {
            story: story.into(),
            improve: improve.into(),
            modify: modify.into(),
        }
    }

    /// Generation prompt for one request, styled by the category strategy.
    pub fn story_prompt(&self, request: &str, strategy: &str) -> String {
        fill_vars(
            &self.story,
            &HashMap::from([("request", request), ("strategy", strategy)]),
        )
    }

    /// Improvement prompt carrying the joined policy directives.
    pub fn improve_prompt(&self, story: &str, directives: &str) -> String {
        fill_vars(
            &self.improve,
            &HashMap::from([("story", story), ("directives", directives)]),
        )
    }

    /// Modification prompt carrying reader feedback and style context.
    pub fn modify_prompt(&self, story: &str, feedback: &str, context: &str) -> String {
        fill_vars(
            &self.modify,
            &HashMap::from([("story", story), ("feedback", feedback), ("context", context)]),
        )
    }
}

/// Load a prompt file, resolve config-time variables, and validate.
fn load_and_resolve(
    relative_path: &Path,
    config_dir: &Path,
    toml_value: &toml::Value,
    allowed_runtime: &[&str],
    prompt_name: &str,
) -> Result<String> {
    let full_path = config_dir.join(relative_path);
    let content = std::fs::read_to_string(&full_path).with_context(|| {
        format!(
            "Failed to read {} prompt file: {}",
            prompt_name,
            full_path.display()
        )
    })?;

    if content.trim().is_empty() {
        anyhow::bail!(
            "Prompt file is empty: {} ({})",
            full_path.display(),
            prompt_name
        );
    }

    let resolved = resolve_config_vars(&content, toml_value).with_context(|| {
        format!(
            "Failed to resolve config variables in {} prompt: {}",
            prompt_name,
            full_path.display()
        )
    })?;

    validate_template(&resolved, toml_value, allowed_runtime).with_context(|| {
        format!(
            "Template validation failed for {} prompt: {}",
            prompt_name,
            full_path.display()
        )
    })?;

    Ok(resolved)
}
