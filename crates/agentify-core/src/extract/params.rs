//! Parameter inference for endpoint candidates.
//!
//! Path parameters come straight from the normalized path template. Query
//! parameters are a JS-family heuristic: a bounded window of text around the
//! route match is scanned for dereferences of the request's query object.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::Parameter;

/// How far around a route match the query-object scan looks, in bytes
pub const QUERY_WINDOW: usize = 500;

static PATH_PARAM: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{([^}/]+)\}").unwrap());
static QUERY_ACCESS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?:req|request|ctx)\.query(?:\.([A-Za-z_][A-Za-z0-9_]*)|\[['"]([^'"\]]+)['"]\])"#)
        .unwrap()
});

/// Derive parameters for one endpoint candidate.
///
/// Every `{name}` token in `normalized_path` becomes a required, string-typed
/// path parameter, in left-to-right order. Each distinct query key accessed
/// in `surrounding_text` becomes an optional query parameter in first-seen
/// order. A name already claimed by a path parameter is not re-added.
pub fn infer(normalized_path: &str, surrounding_text: &str) -> Vec<Parameter> {
    let mut params: Vec<Parameter> = Vec::new();

    for cap in PATH_PARAM.captures_iter(normalized_path) {
        let name = cap[1].to_string();
        if !params.iter().any(|p| p.name == name) {
            params.push(Parameter::path(name));
        }
    }

    for cap in QUERY_ACCESS.captures_iter(surrounding_text) {
        let name = cap
            .get(1)
            .or_else(|| cap.get(2))
            .map(|m| m.as_str().to_string());
        if let Some(name) = name {
            if !params.iter().any(|p| p.name == name) {
                params.push(Parameter::query(name));
            }
        }
    }

    params
}

/// Path parameters only, for families without a query heuristic
pub fn path_params(normalized_path: &str) -> Vec<Parameter> {
    infer(normalized_path, "")
}

/// Slice a byte window of `±QUERY_WINDOW` around `offset`, clamped to char
/// boundaries so multibyte content cannot panic the slicer.
pub fn window_around(content: &str, offset: usize) -> &str {
    let start = offset.saturating_sub(QUERY_WINDOW);
    let end = usize::min(offset + QUERY_WINDOW, content.len());
    let start = floor_char_boundary(content, start);
    let end = floor_char_boundary(content, end);
    &content[start..end]
}

fn floor_char_boundary(s: &str, mut index: usize) -> usize {
    if index >= s.len() {
        return s.len();
    }
    while !s.is_char_boundary(index) {
        index -= 1;
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ParameterLocation;

    #[test]
    fn test_path_params_in_order() {
        let params = infer("/orgs/{org}/repos/{repo}", "");
        let names: Vec<_> = params.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["org", "repo"]);
        assert!(params.iter().all(|p| p.required));
        assert!(params
            .iter()
            .all(|p| p.location == ParameterLocation::Path));
    }

    #[test]
    fn test_query_params_first_seen_order() {
        let body = r#"
            const limit = req.query.limit;
            const offset = req.query.offset;
            if (req.query.limit) {}
        "#;
        let params = infer("/users", body);
        let names: Vec<_> = params.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["limit", "offset"]);
        assert!(params.iter().all(|p| !p.required));
    }

    #[test]
    fn test_path_param_takes_precedence_over_query() {
        let body = "const id = req.query.id;";
        let params = infer("/users/{id}", body);
        assert_eq!(params.len(), 1);
        assert_eq!(params[0].location, ParameterLocation::Path);
    }

    #[test]
    fn test_bracket_query_access() {
        let params = infer("/search", r#"const q = req.query["q"];"#);
        assert_eq!(params.len(), 1);
        assert_eq!(params[0].name, "q");
        assert_eq!(params[0].location, ParameterLocation::Query);
    }

    #[test]
    fn test_window_clamps_to_char_boundaries() {
        let content = "é".repeat(600);
        let window = window_around(&content, 550);
        assert!(!window.is_empty());
    }
}
