//! PHP extractor: Laravel route definitions.

use once_cell::sync::Lazy;
use regex::Regex;
use std::str::FromStr;

use super::params;
use super::patterns::{self, PathStyle};
use super::EndpointExtractor;
use crate::model::{EndpointInfo, HttpMethod};

/// `Route::get('/users/{id}', [UserController::class, 'show'])`
static ROUTE_VERB: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"Route::(get|post|put|patch|delete|options)\(\s*['"]([^'"]+)['"]"#).unwrap()
});

/// `Route::resource('users', UserController::class)` and apiResource
static ROUTE_RESOURCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"Route::(?:apiR|r)esource\(\s*['"]([^'"]+)['"]"#).unwrap()
});

/// Conventional resource controller actions
const RESOURCE_ACTIONS: &[(HttpMethod, bool)] = &[
    (HttpMethod::Get, false),    // index
    (HttpMethod::Post, false),   // store
    (HttpMethod::Get, true),     // show
    (HttpMethod::Put, true),     // update
    (HttpMethod::Delete, true),  // destroy
];

pub struct LaravelExtractor;

impl EndpointExtractor for LaravelExtractor {
    fn extract(&self, content: &str, file_path: &str) -> Vec<EndpointInfo> {
        let mut endpoints = Vec::new();

        for cap in ROUTE_VERB.captures_iter(content) {
            let Ok(method) = HttpMethod::from_str(&cap[1]) else {
                continue;
            };
            let path = patterns::normalize(PathStyle::Braces, &cap[2]);
            let mut endpoint =
                EndpointInfo::discovered(method, path, self.framework(), file_path);
            endpoint.parameters = params::path_params(&endpoint.path);
            endpoints.push(endpoint);
        }

        for cap in ROUTE_RESOURCE.captures_iter(content) {
            let resource = cap[1].trim_matches('/').to_string();
            if resource.is_empty() {
                continue;
            }
            for (method, detail) in RESOURCE_ACTIONS {
                let path = if *detail {
                    format!("/{}/{{id}}", resource)
                } else {
                    format!("/{}", resource)
                };
                let mut endpoint =
                    EndpointInfo::discovered(*method, path, self.framework(), file_path);
                endpoint.parameters = params::path_params(&endpoint.path);
                endpoints.push(endpoint);
            }
        }

        endpoints
    }

    fn framework(&self) -> &'static str {
        "Laravel"
    }

    fn handles(&self, _file_path: &str, extension: &str) -> bool {
        extension == "php"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_verbs() {
        let source = r#"
            Route::get('/users', [UserController::class, 'index']);
            Route::post('/users', [UserController::class, 'store']);
            Route::get('/users/{user}', [UserController::class, 'show']);
        "#;
        let endpoints = LaravelExtractor.extract(source, "routes/api.php");
        let keys: Vec<_> = endpoints.iter().map(|e| e.key()).collect();
        assert_eq!(
            keys,
            vec!["GET:/users", "POST:/users", "GET:/users/{user}"]
        );
        assert_eq!(endpoints[2].parameters[0].name, "user");
    }

    #[test]
    fn test_optional_param_constraint() {
        let source = r#"Route::get('/posts/{slug?}', 'PostController@show');"#;
        let endpoints = LaravelExtractor.extract(source, "routes/web.php");
        assert_eq!(endpoints[0].path, "/posts/{slug}");
    }

    #[test]
    fn test_api_resource_expansion() {
        let source = r#"Route::apiResource('photos', PhotoController::class);"#;
        let endpoints = LaravelExtractor.extract(source, "routes/api.php");
        let keys: Vec<_> = endpoints.iter().map(|e| e.key()).collect();
        assert_eq!(
            keys,
            vec![
                "GET:/photos",
                "POST:/photos",
                "GET:/photos/{id}",
                "PUT:/photos/{id}",
                "DELETE:/photos/{id}",
            ]
        );
    }
}
