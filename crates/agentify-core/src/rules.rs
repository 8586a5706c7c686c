//! Exclusion and rename rules applied between analysis and generation.

use crate::config::{McpConfig, RuleType, TransformRule};
use crate::model::EndpointInfo;

/// Drop every endpoint whose exact `METHOD:path` key is configured as
/// excluded. Matching is string equality, not a pattern language.
pub fn filter(endpoints: Vec<EndpointInfo>, config: &McpConfig) -> Vec<EndpointInfo> {
    if config.exclude_endpoints.is_empty() {
        return endpoints;
    }
    endpoints
        .into_iter()
        .filter(|endpoint| {
            let excluded = config.exclude_endpoints.contains(&endpoint.key());
            if excluded {
                log::debug!("Excluding endpoint {}", endpoint.key());
            }
            !excluded
        })
        .collect()
}

/// Optional rename pass, invoked explicitly by callers that want it.
///
/// Rules apply in array order; each is a literal substring replacement.
/// `endpoint` rules rewrite the path, `parameter` rules rewrite parameter
/// names, `response` rules are accepted but have nothing to rewrite in the
/// extracted model.
pub fn apply_transforms(
    mut endpoints: Vec<EndpointInfo>,
    rules: &[TransformRule],
) -> Vec<EndpointInfo> {
    for rule in rules {
        match rule.rule_type {
            RuleType::Endpoint => {
                for endpoint in &mut endpoints {
                    endpoint.path = endpoint.path.replace(&rule.pattern, &rule.replacement);
                }
            }
            RuleType::Parameter => {
                for endpoint in &mut endpoints {
                    for param in &mut endpoint.parameters {
                        param.name = param.name.replace(&rule.pattern, &rule.replacement);
                    }
                }
            }
            RuleType::Response => {
                log::debug!("Ignoring response transform rule '{}'", rule.pattern);
            }
        }
    }
    endpoints
}
