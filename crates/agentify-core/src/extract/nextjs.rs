//! Next.js extractor.
//!
//! Next.js routes are file-system based, so the path template comes from the
//! file path (bracket segments become `{name}` parameters), not from the file
//! content. Content is only consulted for the HTTP methods: App Router files
//! export one handler per method, Pages Router files branch on `req.method`.

use once_cell::sync::Lazy;
use regex::Regex;
use std::str::FromStr;

use super::params;
use super::patterns::{self, PathStyle};
use super::{is_js_extension, EndpointExtractor};
use crate::model::{EndpointInfo, HttpMethod};

/// `export async function GET(...)` / `export const POST = ...` (App Router)
static EXPORTED_METHOD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"export\s+(?:async\s+)?(?:function\s+(GET|POST|PUT|PATCH|DELETE|OPTIONS|HEAD)\b|const\s+(GET|POST|PUT|PATCH|DELETE|OPTIONS|HEAD)\s*=)",
    )
    .unwrap()
});

/// `req.method === 'GET'` / `case "PUT":` (Pages Router)
static METHOD_CHECK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?:req\.method\s*===?\s*['"](GET|POST|PUT|PATCH|DELETE|OPTIONS|HEAD)['"]|case\s+['"](GET|POST|PUT|PATCH|DELETE|OPTIONS|HEAD)['"])"#,
    )
    .unwrap()
});

pub struct NextJsExtractor;

impl EndpointExtractor for NextJsExtractor {
    fn extract(&self, content: &str, file_path: &str) -> Vec<EndpointInfo> {
        let Some(route) = file_path_to_route(file_path) else {
            return Vec::new();
        };
        let path = patterns::normalize(PathStyle::BracketSegments, &route);

        let mut methods: Vec<HttpMethod> = Vec::new();
        for cap in EXPORTED_METHOD.captures_iter(content) {
            push_method(&mut methods, cap.get(1).or_else(|| cap.get(2)));
        }
        if methods.is_empty() {
            for cap in METHOD_CHECK.captures_iter(content) {
                push_method(&mut methods, cap.get(1).or_else(|| cap.get(2)));
            }
        }
        // A default-exported handler with no discernible branches serves GET
        if methods.is_empty() && content.contains("export default") {
            methods.push(HttpMethod::Get);
        }

        methods
            .into_iter()
            .map(|method| {
                let mut endpoint =
                    EndpointInfo::discovered(method, path.clone(), self.framework(), file_path);
                endpoint.parameters = params::path_params(&endpoint.path);
                endpoint
            })
            .collect()
    }

    fn framework(&self) -> &'static str {
        "Next.js"
    }

    fn handles(&self, file_path: &str, extension: &str) -> bool {
        is_js_extension(extension) && api_route_position(file_path).is_some()
    }
}

fn push_method(methods: &mut Vec<HttpMethod>, capture: Option<regex::Match<'_>>) {
    if let Some(m) = capture {
        if let Ok(method) = HttpMethod::from_str(m.as_str()) {
            if !methods.contains(&method) {
                methods.push(method);
            }
        }
    }
}

fn api_route_position(file_path: &str) -> Option<(usize, usize)> {
    let normalized = file_path.replace('\\', "/");
    // skip "pages/" or "app/", keep "/api/..."
    if let Some(pos) = normalized.find("pages/api/") {
        return Some((pos, 5));
    }
    if let Some(pos) = normalized.find("app/api/") {
        return Some((pos, 3));
    }
    None
}

/// Turn `pages/api/orders/[id].ts` into `/api/orders/[id]` and
/// `app/api/users/route.ts` into `/api/users`.
fn file_path_to_route(file_path: &str) -> Option<String> {
    let normalized = file_path.replace('\\', "/");
    let (pos, skip) = api_route_position(&normalized)?;
    let mut route = normalized[pos + skip..].to_string();

    if let Some(stem) = route.rfind('.') {
        route.truncate(stem);
    }
    for suffix in ["/route", "/index"] {
        if let Some(stripped) = route.strip_suffix(suffix) {
            route = stripped.to_string();
        }
    }
    Some(patterns::ensure_leading_slash(&route))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pages_router_method_checks() {
        let source = r#"
            export default function handler(req, res) {
                if (req.method === 'GET') { res.json({}); }
                else if (req.method === 'PUT') { res.json({}); }
                else { res.status(405).end(); }
            }
        "#;
        let endpoints = NextJsExtractor.extract(source, "pages/api/orders/[id].js");
        let keys: Vec<_> = endpoints.iter().map(|e| e.key()).collect();
        assert_eq!(keys, vec!["GET:/api/orders/{id}", "PUT:/api/orders/{id}"]);
        assert_eq!(endpoints[0].parameters.len(), 1);
        assert_eq!(endpoints[0].parameters[0].name, "id");
    }

    #[test]
    fn test_app_router_exports() {
        let source = r#"
            import { NextResponse } from 'next/server';
            export async function GET(request) { return NextResponse.json([]); }
            export const POST = async (request) => NextResponse.json({});
        "#;
        let endpoints = NextJsExtractor.extract(source, "src/app/api/users/route.ts");
        let keys: Vec<_> = endpoints.iter().map(|e| e.key()).collect();
        assert_eq!(keys, vec!["GET:/api/users", "POST:/api/users"]);
    }

    #[test]
    fn test_default_export_falls_back_to_get() {
        let source = "export default function handler(req, res) { res.json({}); }";
        let endpoints = NextJsExtractor.extract(source, "pages/api/health.ts");
        assert_eq!(endpoints.len(), 1);
        assert_eq!(endpoints[0].key(), "GET:/api/health");
    }

    #[test]
    fn test_index_and_catch_all_routes() {
        let source = "export default function handler(req, res) {}";
        let eps = NextJsExtractor.extract(source, "pages/api/docs/index.js");
        assert_eq!(eps[0].path, "/api/docs");

        let eps = NextJsExtractor.extract(source, "pages/api/files/[...slug].js");
        assert_eq!(eps[0].path, "/api/files/{slug}");
    }

    #[test]
    fn test_handles_only_api_paths() {
        assert!(NextJsExtractor.handles("pages/api/users.ts", "ts"));
        assert!(NextJsExtractor.handles("src/app/api/users/route.ts", "ts"));
        assert!(!NextJsExtractor.handles("src/components/users.ts", "ts"));
    }
}
