//! Generic JavaScript/TypeScript extractor (Express-style routers).

use once_cell::sync::Lazy;
use regex::Regex;
use std::str::FromStr;

use super::params;
use super::patterns::{self, PathStyle};
use super::{is_js_extension, EndpointExtractor};
use crate::model::{EndpointInfo, HttpMethod};

/// `app.get('/path', ...)`, `router.post("/path", ...)` and friends
static ROUTE_CALL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"\b(?:app|router|server|api)\s*\.\s*(get|post|put|patch|delete|options|head)\s*\(\s*['"`]([^'"`)]+)['"`]"#,
    )
    .unwrap()
});

pub struct JavaScriptExtractor;

impl EndpointExtractor for JavaScriptExtractor {
    fn extract(&self, content: &str, file_path: &str) -> Vec<EndpointInfo> {
        let mut endpoints = Vec::new();

        for cap in ROUTE_CALL.captures_iter(content) {
            let method = match HttpMethod::from_str(&cap[1]) {
                Ok(m) => m,
                Err(_) => continue,
            };
            let raw_path = &cap[2];
            let path = patterns::normalize(PathStyle::ColonParams, raw_path);

            let offset = cap.get(0).map(|m| m.start()).unwrap_or(0);
            let window = params::window_around(content, offset);

            let mut endpoint =
                EndpointInfo::discovered(method, path, self.framework(), file_path);
            endpoint.parameters = params::infer(&endpoint.path, window);
            endpoints.push(endpoint);
        }

        endpoints
    }

    fn framework(&self) -> &'static str {
        "Express"
    }

    fn handles(&self, _file_path: &str, extension: &str) -> bool {
        is_js_extension(extension)
    }
}
