//! Rust extractor: actix-web attribute macros and axum routers.

use once_cell::sync::Lazy;
use regex::Regex;
use std::str::FromStr;

use super::params;
use super::patterns::{self, PathStyle};
use super::EndpointExtractor;
use crate::model::{EndpointInfo, HttpMethod};

/// `#[get("/users/{id}")]` (actix-web)
static ACTIX_ATTRIBUTE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"#\[(get|post|put|patch|delete|options|head)\(\s*"([^"]+)"\s*\)\]"#).unwrap()
});

/// `.route("/users/:id", get(show).put(update))` (axum); the service
/// expression is scanned to the end of the line for method constructors
static AXUM_ROUTE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"\.route\(\s*"([^"]+)"\s*,\s*([^\n]*)"#).unwrap());

/// Method constructors inside an axum route's service expression
static AXUM_METHOD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(get|post|put|patch|delete|options|head)\s*\(").unwrap());

pub struct RustExtractor;

impl EndpointExtractor for RustExtractor {
    fn extract(&self, content: &str, file_path: &str) -> Vec<EndpointInfo> {
        let mut endpoints = Vec::new();

        for cap in ACTIX_ATTRIBUTE.captures_iter(content) {
            let Ok(method) = HttpMethod::from_str(&cap[1]) else {
                continue;
            };
            push(&mut endpoints, method, &cap[2], file_path);
        }

        for cap in AXUM_ROUTE.captures_iter(content) {
            let raw_path = &cap[1];
            for method_cap in AXUM_METHOD.captures_iter(&cap[2]) {
                if let Ok(method) = HttpMethod::from_str(&method_cap[1]) {
                    push(&mut endpoints, method, raw_path, file_path);
                }
            }
        }

        endpoints
    }

    fn framework(&self) -> &'static str {
        "Rust"
    }

    fn handles(&self, _file_path: &str, extension: &str) -> bool {
        extension == "rs"
    }
}

fn push(endpoints: &mut Vec<EndpointInfo>, method: HttpMethod, raw: &str, file_path: &str) {
    // axum spells params `:id` before 0.8 and `{id}` after; accept both
    let colon = patterns::normalize(PathStyle::ColonParams, raw);
    let path = patterns::normalize(PathStyle::Braces, &colon);
    let mut endpoint = EndpointInfo::discovered(method, path, "Rust", file_path);
    endpoint.parameters = params::path_params(&endpoint.path);
    endpoints.push(endpoint);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_actix_attributes() {
        let source = r#"
#[get("/users/{id}")]
async fn get_user(path: web::Path<u32>) -> impl Responder {}

#[post("/users")]
async fn create_user() -> impl Responder {}
"#;
        let endpoints = RustExtractor.extract(source, "src/handlers.rs");
        let keys: Vec<_> = endpoints.iter().map(|e| e.key()).collect();
        assert_eq!(keys, vec!["GET:/users/{id}", "POST:/users"]);
        assert_eq!(endpoints[0].parameters[0].name, "id");
    }

    #[test]
    fn test_axum_chained_methods() {
        let source = r#"
let app = Router::new()
    .route("/items", get(list_items).post(create_item))
    .route("/items/:id", get(show_item));
"#;
        let endpoints = RustExtractor.extract(source, "src/main.rs");
        let keys: Vec<_> = endpoints.iter().map(|e| e.key()).collect();
        assert_eq!(
            keys,
            vec!["GET:/items", "POST:/items", "GET:/items/{id}"]
        );
    }
}
