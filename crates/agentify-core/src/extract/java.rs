//! Java/Kotlin extractor: Spring mapping annotations.

use once_cell::sync::Lazy;
use regex::Regex;
use std::str::FromStr;

use super::params;
use super::patterns::{self, PathStyle};
use super::EndpointExtractor;
use crate::model::{EndpointInfo, HttpMethod};

/// `@GetMapping("/x")` / `@PostMapping(value = "/x")` / bare `@GetMapping`
static METHOD_MAPPING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"@(Get|Post|Put|Patch|Delete)Mapping\s*(?:\(\s*(?:value\s*=\s*|path\s*=\s*)?"([^"]*)"[^)]*\))?"#,
    )
    .unwrap()
});

/// Method-level `@RequestMapping(value = "/x", method = RequestMethod.GET)`
static REQUEST_MAPPING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"@RequestMapping\s*\(([^)]*)\)").unwrap());
static MAPPING_PATH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?:value\s*=\s*|path\s*=\s*)?"([^"]*)""#).unwrap());
static MAPPING_METHOD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"RequestMethod\.(GET|POST|PUT|PATCH|DELETE|OPTIONS|HEAD)").unwrap());

pub struct SpringExtractor;

impl EndpointExtractor for SpringExtractor {
    fn extract(&self, content: &str, file_path: &str) -> Vec<EndpointInfo> {
        let mut endpoints = Vec::new();
        let class_offset = content.find("class ").unwrap_or(content.len());
        let base_path = class_level_base(content, class_offset);

        for cap in METHOD_MAPPING.captures_iter(content) {
            let Ok(method) = HttpMethod::from_str(&cap[1]) else {
                continue;
            };
            let raw = cap.get(2).map(|m| m.as_str()).unwrap_or("");
            push(&mut endpoints, method, &base_path, raw, file_path);
        }

        for cap in REQUEST_MAPPING.captures_iter(content) {
            // Skip the class-level annotation that supplied the base path
            if cap.get(0).map(|m| m.start() < class_offset).unwrap_or(false) {
                continue;
            }
            let args = &cap[1];
            let raw = MAPPING_PATH
                .captures(args)
                .map(|c| c[1].to_string())
                .unwrap_or_default();
            let method = MAPPING_METHOD
                .captures(args)
                .and_then(|c| HttpMethod::from_str(&c[1]).ok())
                .unwrap_or(HttpMethod::Get);
            push(&mut endpoints, method, &base_path, &raw, file_path);
        }

        endpoints
    }

    fn framework(&self) -> &'static str {
        "Spring"
    }

    fn handles(&self, _file_path: &str, extension: &str) -> bool {
        extension == "java" || extension == "kt"
    }
}

/// Base path from a class-level `@RequestMapping`, when one precedes the
/// class declaration.
fn class_level_base(content: &str, class_offset: usize) -> String {
    REQUEST_MAPPING
        .captures_iter(content)
        .take_while(|cap| cap.get(0).map(|m| m.start() < class_offset).unwrap_or(false))
        .find_map(|cap| MAPPING_PATH.captures(&cap[1]).map(|c| c[1].to_string()))
        .unwrap_or_default()
}

fn push(
    endpoints: &mut Vec<EndpointInfo>,
    method: HttpMethod,
    base_path: &str,
    raw: &str,
    file_path: &str,
) {
    let joined = join_paths(base_path, raw);
    let path = patterns::normalize(PathStyle::Braces, &joined);
    let mut endpoint = EndpointInfo::discovered(method, path, "Spring", file_path);
    endpoint.parameters = params::path_params(&endpoint.path);
    endpoints.push(endpoint);
}

fn join_paths(base: &str, tail: &str) -> String {
    match (base.is_empty(), tail.is_empty()) {
        (true, true) => "/".to_string(),
        (true, false) => tail.to_string(),
        (false, true) => base.to_string(),
        (false, false) => format!(
            "{}/{}",
            base.trim_end_matches('/'),
            tail.trim_start_matches('/')
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapping_annotations_with_class_base() {
        let source = r#"
@RestController
@RequestMapping("/api/users")
public class UserController {
    @GetMapping
    public List<User> list() {}

    @GetMapping("/{id}")
    public User get(@PathVariable Long id) {}

    @PostMapping(value = "/")
    public User create(@RequestBody User user) {}
}
"#;
        let endpoints = SpringExtractor.extract(source, "UserController.java");
        let keys: Vec<_> = endpoints.iter().map(|e| e.key()).collect();
        assert_eq!(
            keys,
            vec!["GET:/api/users", "GET:/api/users/{id}", "POST:/api/users/"]
        );
        assert_eq!(endpoints[1].parameters[0].name, "id");
    }

    #[test]
    fn test_request_mapping_with_method() {
        let source = r#"
public class OrderController {
    @RequestMapping(value = "/orders", method = RequestMethod.POST)
    public Order create() {}
}
"#;
        let endpoints = SpringExtractor.extract(source, "OrderController.java");
        assert_eq!(endpoints.len(), 1);
        assert_eq!(endpoints[0].key(), "POST:/orders");
    }

    #[test]
    fn test_path_constraint_is_stripped() {
        let source = r#"@DeleteMapping("/items/{id:\\d+}") public void del() {}"#;
        let endpoints = SpringExtractor.extract(source, "ItemController.java");
        assert_eq!(endpoints[0].key(), "DELETE:/items/{id}");
    }
}
