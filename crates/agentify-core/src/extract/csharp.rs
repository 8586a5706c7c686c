//! C# extractor: ASP.NET Core attribute routing and minimal APIs.

use once_cell::sync::Lazy;
use regex::Regex;
use std::str::FromStr;

use super::params;
use super::patterns::{self, PathStyle};
use super::EndpointExtractor;
use crate::model::{EndpointInfo, HttpMethod};

/// `[HttpGet]` / `[HttpGet("{id}")]` method attributes
static HTTP_ATTRIBUTE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\[Http(Get|Post|Put|Patch|Delete|Options|Head)(?:\(\s*"([^"]*)"\s*\))?\]"#)
        .unwrap()
});

/// Class-level `[Route("api/[controller]")]`
static ROUTE_ATTRIBUTE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"\[Route\(\s*"([^"]*)"\s*\)\]"#).unwrap());

/// `public class UsersController : ControllerBase`
static CONTROLLER_CLASS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"class\s+([A-Za-z0-9_]+)Controller\b").unwrap());

/// `app.MapGet("/users", ...)` minimal APIs
static MAP_CALL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\.Map(Get|Post|Put|Patch|Delete)\(\s*"([^"]+)""#).unwrap()
});

pub struct AspNetExtractor;

impl EndpointExtractor for AspNetExtractor {
    fn extract(&self, content: &str, file_path: &str) -> Vec<EndpointInfo> {
        let mut endpoints = Vec::new();
        let base_path = controller_base(content);

        for cap in HTTP_ATTRIBUTE.captures_iter(content) {
            let Ok(method) = HttpMethod::from_str(&cap[1]) else {
                continue;
            };
            let tail = cap.get(2).map(|m| m.as_str()).unwrap_or("");
            let joined = join_paths(&base_path, tail);
            let path = patterns::normalize(PathStyle::Braces, &joined);
            let mut endpoint =
                EndpointInfo::discovered(method, path, self.framework(), file_path);
            endpoint.parameters = params::path_params(&endpoint.path);
            endpoints.push(endpoint);
        }

        for cap in MAP_CALL.captures_iter(content) {
            let Ok(method) = HttpMethod::from_str(&cap[1]) else {
                continue;
            };
            let path = patterns::normalize(PathStyle::Braces, &cap[2]);
            let mut endpoint =
                EndpointInfo::discovered(method, path, self.framework(), file_path);
            endpoint.parameters = params::path_params(&endpoint.path);
            endpoints.push(endpoint);
        }

        endpoints
    }

    fn framework(&self) -> &'static str {
        "ASP.NET"
    }

    fn handles(&self, _file_path: &str, extension: &str) -> bool {
        extension == "cs"
    }
}

/// Resolve the class-level route, substituting the `[controller]` token with
/// the lower-cased controller class stem.
fn controller_base(content: &str) -> String {
    let Some(route) = ROUTE_ATTRIBUTE.captures(content).map(|c| c[1].to_string()) else {
        return String::new();
    };
    if let Some(class) = CONTROLLER_CLASS.captures(content) {
        route.replace("[controller]", &class[1].to_lowercase())
    } else {
        route
    }
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
