//! Prompt template variables.
//!
//! Templates carry two kinds of placeholder: `{{config.*}}` variables
//! resolved once at load time from the TOML tree, and bare `{{var}}`
//! runtime variables filled per call.

use std::collections::HashMap;

use anyhow::{anyhow, bail, Context, Result};

enum Segment<'a> {
    Text(&'a str),
    Var(&'a str),
}

fn parse(template: &str) -> Result<Vec<Segment<'_>>> {
    let mut segments = Vec::new();
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        if start > 0 {
            segments.push(Segment::Text(&rest[..start]));
        }
        let after = &rest[start + 2..];
        let end = after
            .find("}}")
            .ok_or_else(|| anyhow!("Unclosed template variable: {{{{{after}"))?;
        segments.push(Segment::Var(after[..end].trim()));
        rest = &after[end + 2..];
    }
    if !rest.is_empty() {
        segments.push(Segment::Text(rest));
    }
    Ok(segments)
}

/// Resolve `{{config.*}}` variables from the TOML value tree at load
/// time. Runtime variables are left in place.
pub fn resolve_config_vars(template: &str, toml_value: &toml::Value) -> Result<String> {
    let mut result = String::with_capacity(template.len());
    for segment in parse(template)? {
        match segment {
            Segment::Text(text) => result.push_str(text),
            Segment::Var(name) => {
                if let Some(path) = name.strip_prefix("config.") {
                    let value = lookup_toml_path(toml_value, path)
                        .with_context(|| format!("Config variable not found: {{{{{name}}}}}"))?;
                    result.push_str(&toml_value_to_string(value));
                } else {
                    result.push_str("{{");
                    result.push_str(name);
                    result.push_str("}}");
                }
            }
        }
    }
    Ok(result)
}

/// Fill remaining `{{var}}` placeholders from a runtime context map.
///
/// Lenient on purpose: a malformed template is returned unchanged and
/// an unknown variable stays visible, so a bad prompt file degrades to
/// odd model output instead of a crash mid-session.
pub fn fill_vars(template: &str, vars: &HashMap<&str, &str>) -> String {
    let Ok(segments) = parse(template) else {
        return template.to_string();
    };
    let mut result = String::with_capacity(template.len());
    for segment in segments {
        match segment {
            Segment::Text(text) => result.push_str(text),
            Segment::Var(name) => match vars.get(name) {
                Some(value) => result.push_str(value),
                None => {
                    result.push_str("{{");
                    result.push_str(name);
                    result.push_str("}}");
                }
            },
        }
    }
    result
}

/// Validate that every `{{...}}` is either a resolvable `config.*`
/// path or one of the allowed runtime variables.
pub fn validate_template(
    template: &str,
    toml_value: &toml::Value,
    allowed_runtime: &[&str],
) -> Result<()> {
    for segment in parse(template)? {
        if let Segment::Var(name) = segment {
            if let Some(path) = name.strip_prefix("config.") {
                lookup_toml_path(toml_value, path)
                    .with_context(|| format!("Config variable not found: {{{{{name}}}}}"))?;
            } else if !allowed_runtime.contains(&name) {
                bail!(
                    "Unknown template variable: {{{{{name}}}}}. Allowed runtime vars: {allowed_runtime:?}"
                );
            }
        }
    }
    Ok(())
}

/// Walk the TOML value tree by dotted path (e.g., "story.max_word_count").
fn lookup_toml_path<'a>(value: &'a toml::Value, path: &str) -> Option<&'a toml::Value> {
    path.split('.')
        .try_fold(value, |current, key| current.get(key))
}

fn toml_value_to_string(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => s.clone(),
        toml::Value::Integer(i) => i.to_string(),
        toml::Value::Float(f) => f.to_string(),
        toml::Value::Boolean(b) => b.to_string(),
        toml::Value::Array(arr) => arr
            .iter()
            .map(toml_value_to_string)
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}
