//! Deterministic identifier derivation.
//!
//! Every name in the generated output (the MCP tool name, the handler
//! function, the tool file stem) is a pure function of `(method, path)`.
//! Extraction consumers and generated code call the same derivation, so
//! identifiers are always recoverable from the endpoint triple with no
//! hidden state.

use crate::utils::capitalize;

/// The three derived names for one endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifierTriple {
    /// snake_case MCP tool name, e.g. `get_users_id`
    pub tool_name: String,
    /// PascalCase handler function name, e.g. `handleGetUsersId`
    pub handler_name: String,
    /// Export/file stem, e.g. `getUsersId`
    pub file_safe_name: String,
}

/// Literal used when a derivation would otherwise produce an empty name
const FALLBACK_NAME: &str = "unknownTool";

/// Derive the identifier triple for `(method, path)`.
///
/// Splits the path on `/`, drops empty segments, strips `{`, `}` and `:`
/// from each remaining segment, and sanitizes what is left down to
/// identifier-safe characters. The method is lower-cased.
pub fn derive(method: &str, path: &str) -> IdentifierTriple {
    let method_lower = method.to_ascii_lowercase();

    let segments: Vec<String> = path
        .split('/')
        .filter(|s| !s.is_empty())
        .map(sanitize_segment)
        .filter(|s| !s.is_empty())
        .collect();

    let tool_name = {
        let mut parts = vec![method_lower.clone()];
        parts.extend(segments.iter().map(|s| s.to_lowercase()));
        non_empty(parts.join("_").trim_matches('_').to_string())
    };

    let pascal_tail: String = segments.iter().map(|s| pascal_segment(s)).collect();

    let file_safe_name = non_empty(format!("{}{}", method_lower, pascal_tail));
    let handler_name = non_empty(format!(
        "handle{}{}",
        capitalize(&method_lower),
        pascal_tail
    ));

    IdentifierTriple {
        tool_name,
        handler_name,
        file_safe_name,
    }
}

/// Strip parameter markers and reduce to identifier-safe characters
fn sanitize_segment(segment: &str) -> String {
    segment
        .chars()
        .filter(|c| *c != '{' && *c != '}' && *c != ':')
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect::<String>()
        .trim_matches('_')
        .to_string()
}

/// Capitalize each `_`-separated piece, lowercasing the tail of each
fn pascal_segment(segment: &str) -> String {
    segment.split('_').filter(|p| !p.is_empty()).map(capitalize).collect()
}

fn non_empty(name: String) -> String {
    if name.is_empty() {
        FALLBACK_NAME.to_string()
    } else {
        name
    }
}
