//! Go extractor: Gin/Echo/Chi routers, gorilla/mux and net/http.

use once_cell::sync::Lazy;
use regex::Regex;
use std::str::FromStr;

use super::params;
use super::patterns::{self, PathStyle};
use super::EndpointExtractor;
use crate::model::{EndpointInfo, HttpMethod};

/// `r.GET("/users", h)` (Gin/Echo) and `r.Get("/users", h)` (Chi)
static ROUTER_CALL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"\.(GET|POST|PUT|PATCH|DELETE|OPTIONS|HEAD|Get|Post|Put|Patch|Delete|Options|Head)\(\s*"([^"]+)""#,
    )
    .unwrap()
});

/// `r.HandleFunc("/users", h)` (gorilla/mux, net/http); the rest of the
/// line is captured so a `.Methods(...)` chain can be picked up
static HANDLE_FUNC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"HandleFunc\(\s*"([^"]+)"([^\n]*)"#).unwrap());
static METHODS_CHAIN: Lazy<Regex> = Lazy::new(|| Regex::new(r"Methods\(([^)]*)\)").unwrap());

/// `*filepath` wildcard segments (Gin)
static STAR_PARAM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*([A-Za-z_][A-Za-z0-9_]*)").unwrap());

pub struct GoExtractor;

impl EndpointExtractor for GoExtractor {
    fn extract(&self, content: &str, file_path: &str) -> Vec<EndpointInfo> {
        let mut endpoints = Vec::new();

        for cap in ROUTER_CALL.captures_iter(content) {
            let Ok(method) = HttpMethod::from_str(&cap[1]) else {
                continue;
            };
            push(&mut endpoints, method, &cap[2], file_path);
        }

        for cap in HANDLE_FUNC.captures_iter(content) {
            let (raw_path, methods) = split_method_prefix(&cap[1]);
            let methods = match METHODS_CHAIN.captures(&cap[2]) {
                Some(list) => parse_method_list(&list[1]),
                None => methods,
            };
            for method in methods {
                push(&mut endpoints, method, &raw_path, file_path);
            }
        }

        endpoints
    }

    fn framework(&self) -> &'static str {
        "Go"
    }

    fn handles(&self, _file_path: &str, extension: &str) -> bool {
        extension == "go"
    }
}

fn push(endpoints: &mut Vec<EndpointInfo>, method: HttpMethod, raw: &str, file_path: &str) {
    let starred = STAR_PARAM.replace_all(raw, "{$1}");
    let path = patterns::normalize(PathStyle::ColonParams, &starred);
    let mut endpoint = EndpointInfo::discovered(method, path, "Go", file_path);
    endpoint.parameters = params::path_params(&endpoint.path);
    endpoints.push(endpoint);
}

/// Go 1.22 net/http patterns spell the method inside the route string:
/// `http.HandleFunc("GET /users/{id}", h)`.
fn split_method_prefix(raw: &str) -> (String, Vec<HttpMethod>) {
    if let Some((prefix, rest)) = raw.split_once(' ') {
        if let Ok(method) = HttpMethod::from_str(prefix) {
            return (rest.to_string(), vec![method]);
        }
    }
    (raw.to_string(), vec![HttpMethod::Get])
}

fn parse_method_list(list: &str) -> Vec<HttpMethod> {
    let mut methods: Vec<HttpMethod> = list
        .split(',')
        .filter_map(|m| HttpMethod::from_str(m.trim().trim_matches('"')).ok())
        .collect();
    methods.dedup();
    if methods.is_empty() {
        methods.push(HttpMethod::Get);
    }
    methods
}
