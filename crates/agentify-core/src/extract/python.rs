//! Python extractor: Flask, FastAPI, Django URLconfs and DRF ViewSets.

use once_cell::sync::Lazy;
use regex::Regex;
use std::str::FromStr;

use super::params;
use super::patterns::{self, PathStyle};
use super::EndpointExtractor;
use crate::model::{EndpointInfo, HttpMethod};

/// `@app.route('/path', methods=['GET', 'POST'])` and blueprint variants
static FLASK_ROUTE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"@[A-Za-z_][A-Za-z0-9_]*\.route\(\s*r?['"]([^'"]+)['"]([^)]*)\)"#).unwrap()
});
static FLASK_METHODS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"methods\s*=\s*\[([^\]]+)\]").unwrap());

/// `@app.get("/path")` / `@router.post("/path")` (FastAPI)
static FASTAPI_ROUTE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"@[A-Za-z_][A-Za-z0-9_]*\.(get|post|put|patch|delete|options|head)\(\s*['"]([^'"]+)['"]"#,
    )
    .unwrap()
});

/// `path('users/', view)` / `re_path(r'^users/$', view)` / legacy `url(...)`
static DJANGO_ROUTE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\b(?:re_path|path|url)\(\s*r?['"]([^'"]+)['"]"#).unwrap()
});

/// `class OrderViewSet(viewsets.ModelViewSet):`
static DRF_VIEWSET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"class\s+([A-Za-z0-9_]+)ViewSet\s*\(").unwrap());

/// The conventional DRF router actions synthesized for one ViewSet class
const VIEWSET_ACTIONS: &[(HttpMethod, bool)] = &[
    (HttpMethod::Get, false),    // list
    (HttpMethod::Post, false),   // create
    (HttpMethod::Get, true),     // retrieve
    (HttpMethod::Put, true),     // update
    (HttpMethod::Patch, true),   // partial_update
    (HttpMethod::Delete, true),  // destroy
];

pub struct PythonExtractor;

impl EndpointExtractor for PythonExtractor {
    fn extract(&self, content: &str, file_path: &str) -> Vec<EndpointInfo> {
        let mut endpoints = Vec::new();

        for cap in FLASK_ROUTE.captures_iter(content) {
            let raw_path = &cap[1];
            let path = patterns::normalize(PathStyle::AngleConverters, raw_path);
            for method in flask_methods(&cap[2]) {
                let mut endpoint =
                    EndpointInfo::discovered(method, path.clone(), "Flask", file_path);
                endpoint.parameters = params::path_params(&endpoint.path);
                endpoints.push(endpoint);
            }
        }

        for cap in FASTAPI_ROUTE.captures_iter(content) {
            let Ok(method) = HttpMethod::from_str(&cap[1]) else {
                continue;
            };
            let path = patterns::normalize(PathStyle::Braces, &cap[2]);
            let mut endpoint = EndpointInfo::discovered(method, path, "FastAPI", file_path);
            endpoint.parameters = params::path_params(&endpoint.path);
            endpoints.push(endpoint);
        }

        for cap in DJANGO_ROUTE.captures_iter(content) {
            let raw_path = &cap[1];
            let style = if looks_like_regex(raw_path) {
                PathStyle::RegexGroups
            } else {
                PathStyle::AngleConverters
            };
            // Django URLconf entries carry no method; GET is the documented default
            let path = patterns::normalize(style, raw_path);
            let mut endpoint =
                EndpointInfo::discovered(HttpMethod::Get, path, "Django", file_path);
            endpoint.parameters = params::path_params(&endpoint.path);
            endpoints.push(endpoint);
        }

        for cap in DRF_VIEWSET.captures_iter(content) {
            let resource = cap[1].to_lowercase();
            if resource.is_empty() {
                continue;
            }
            for (method, detail) in VIEWSET_ACTIONS {
                let path = if *detail {
                    format!("/{}/{{id}}/", resource)
                } else {
                    format!("/{}/", resource)
                };
                let mut endpoint =
                    EndpointInfo::discovered(*method, path, "Django REST Framework", file_path);
                endpoint.parameters = params::path_params(&endpoint.path);
                endpoints.push(endpoint);
            }
        }

        endpoints
    }

    fn framework(&self) -> &'static str {
        "Python"
    }

    fn handles(&self, _file_path: &str, extension: &str) -> bool {
        extension == "py"
    }
}

fn flask_methods(route_args: &str) -> Vec<HttpMethod> {
    let mut methods = Vec::new();
    if let Some(cap) = FLASK_METHODS.captures(route_args) {
        for name in cap[1].split(',') {
            let name = name.trim().trim_matches(|c| c == '\'' || c == '"');
            if let Ok(method) = HttpMethod::from_str(name) {
                if !methods.contains(&method) {
                    methods.push(method);
                }
            }
        }
    }
    if methods.is_empty() {
        methods.push(HttpMethod::Get);
    }
    methods
}

fn looks_like_regex(raw: &str) -> bool {
    raw.starts_with('^') || raw.contains("(?P<") || raw.contains('\\')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flask_multi_method_route() {
        let source = r#"
@app.route('/products', methods=['GET', 'POST'])
def products():
    pass
"#;
        let endpoints = PythonExtractor.extract(source, "api/app.py");
        let keys: Vec<_> = endpoints.iter().map(|e| e.key()).collect();
        assert_eq!(keys, vec!["GET:/products", "POST:/products"]);
    }

    #[test]
    fn test_flask_converter_and_default_method() {
        let source = "@app.route('/api/products/<int:id>')\ndef get_product(id):\n    pass\n";
        let endpoints = PythonExtractor.extract(source, "api/app.py");
        assert_eq!(endpoints.len(), 1);
        assert_eq!(endpoints[0].key(), "GET:/api/products/{id}");
        assert_eq!(endpoints[0].parameters[0].name, "id");
        assert_eq!(endpoints[0].description, "Flask endpoint from api/app.py");
    }

    #[test]
    fn test_fastapi_decorators() {
        let source = r#"
@router.get("/items/{item_id}")
async def read_item(item_id: int):
    pass

@app.post("/items")
async def create_item():
    pass
"#;
        let endpoints = PythonExtractor.extract(source, "main.py");
        let keys: Vec<_> = endpoints.iter().map(|e| e.key()).collect();
        assert_eq!(keys, vec!["GET:/items/{item_id}", "POST:/items"]);
    }

    #[test]
    fn test_django_re_path_named_group() {
        let source = r"urlpatterns = [ path(r'^users/(?P<id>\d+)/$', views.user_detail), ]";
        let endpoints = PythonExtractor.extract(source, "urls.py");
        assert_eq!(endpoints.len(), 1);
        assert_eq!(endpoints[0].key(), "GET:/users/{id}/");
        assert_eq!(endpoints[0].parameters[0].name, "id");
    }

    #[test]
    fn test_django_path_converter() {
        let source = "urlpatterns = [ path('articles/<slug>/', views.article), ]";
        let endpoints = PythonExtractor.extract(source, "urls.py");
        assert_eq!(endpoints[0].key(), "GET:/articles/{slug}/");
    }

    #[test]
    fn test_drf_viewset_expands_to_six_endpoints() {
        let source = "class OrderViewSet(viewsets.ModelViewSet):\n    queryset = Order.objects.all()\n";
        let endpoints = PythonExtractor.extract(source, "views.py");
        let keys: Vec<_> = endpoints.iter().map(|e| e.key()).collect();
        assert_eq!(
            keys,
            vec![
                "GET:/order/",
                "POST:/order/",
                "GET:/order/{id}/",
                "PUT:/order/{id}/",
                "PATCH:/order/{id}/",
                "DELETE:/order/{id}/",
            ]
        );
    }
}
