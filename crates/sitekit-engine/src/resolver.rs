//! Placeholder resolution
//!
//! Templates contain `{{ name }}` tokens over a flat variable set. Every
//! placeholder must resolve to a defined variable; resolution fails listing
//! all undefined names rather than stopping at the first, and the output
//! never carries residual tokens.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use sitekit_core::SiteConfig;

use crate::error::{EngineError, Result};
use crate::suggestions::suggestion_help;

static PLACEHOLDER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{\s*([a-z_][a-z0-9_]*)\s*\}\}").expect("valid regex"));

/// Extract every placeholder name in a template body, in order of first
/// appearance, without duplicates
pub fn placeholders(body: &str) -> Vec<String> {
    let mut seen = Vec::new();
    for captures in PLACEHOLDER_RE.captures_iter(body) {
        let name = captures[1].to_string();
        if !seen.contains(&name) {
            seen.push(name);
        }
    }
    seen
}

/// Build the variable map for a config, including derived variables
pub fn variables(config: &SiteConfig) -> BTreeMap<String, String> {
    BTreeMap::from([
        ("project_name".to_string(), config.project_name.clone()),
        ("namespace".to_string(), config.namespace.clone()),
        ("domain".to_string(), config.domain.clone()),
        ("image_tag".to_string(), config.image_tag.clone()),
        ("replicas".to_string(), config.replicas.to_string()),
        ("storage_class".to_string(), config.storage_class.clone()),
        ("storage_size".to_string(), config.storage_size.clone()),
        ("ingress_class".to_string(), config.ingress_class.clone()),
        ("cert_issuer".to_string(), config.cert_issuer.clone()),
        ("runtime_version".to_string(), config.runtime_version.clone()),
        ("registry_url".to_string(), config.registry_url.clone()),
        ("build_command".to_string(), config.build_command.clone()),
        ("memory_limit".to_string(), config.memory_limit.clone()),
        ("cpu_limit".to_string(), config.cpu_limit.clone()),
        // Derived: full image reference, never supplied directly
        ("image".to_string(), config.image()),
    ])
}

/// Resolve a template body against a variable map.
///
/// `template` names the template in error messages.
pub fn resolve(template: &str, body: &str, vars: &BTreeMap<String, String>) -> Result<String> {
    let missing: Vec<String> = placeholders(body)
        .into_iter()
        .filter(|name| !vars.contains_key(name))
        .collect();

    if !missing.is_empty() {
        let help = suggestion_help(&missing, vars.keys().map(String::as_str));
        return Err(EngineError::UndefinedPlaceholders {
            template: template.to_string(),
            names: missing,
            help,
        });
    }

    let resolved = PLACEHOLDER_RE.replace_all(body, |captures: &Captures| {
        // Lookup cannot fail: every placeholder was checked above
        vars[&captures[1]].clone()
    });

    Ok(resolved.into_owned())
}
