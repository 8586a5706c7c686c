//! Ruby extractor: Rails `routes.rb`.

use once_cell::sync::Lazy;
use regex::Regex;
use std::str::FromStr;

use super::params;
use super::patterns::{self, PathStyle};
use super::EndpointExtractor;
use crate::model::{EndpointInfo, HttpMethod};

/// `get '/users', to: 'users#index'`
static ROUTE_VERB: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?m)^\s*(get|post|put|patch|delete)\s+['"]([^'"]+)['"]"#).unwrap()
});

/// `resources :users` / `resource(:users)`
static RESOURCES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\s*resources[\s(]+:([a-z0-9_]+)").unwrap());

/// Conventional RESTful resource actions
const RESOURCE_ACTIONS: &[(HttpMethod, bool)] = &[
    (HttpMethod::Get, false),    // index
    (HttpMethod::Post, false),   // create
    (HttpMethod::Get, true),     // show
    (HttpMethod::Put, true),     // update
    (HttpMethod::Delete, true),  // destroy
];

pub struct RailsExtractor;

impl EndpointExtractor for RailsExtractor {
    fn extract(&self, content: &str, file_path: &str) -> Vec<EndpointInfo> {
        let mut endpoints = Vec::new();

        for cap in ROUTE_VERB.captures_iter(content) {
            let Ok(method) = HttpMethod::from_str(&cap[1]) else {
                continue;
            };
            let path = patterns::normalize(PathStyle::ColonParams, &cap[2]);
            let mut endpoint =
                EndpointInfo::discovered(method, path, self.framework(), file_path);
            endpoint.parameters = params::path_params(&endpoint.path);
            endpoints.push(endpoint);
        }

        for cap in RESOURCES.captures_iter(content) {
            let resource = &cap[1];
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
        "Rails"
    }

    fn handles(&self, _file_path: &str, extension: &str) -> bool {
        extension == "rb"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_verbs_with_colon_params() {
        let source = r#"
Rails.application.routes.draw do
  get '/users', to: 'users#index'
  get '/users/:id', to: 'users#show'
  post '/users', to: 'users#create'
end
"#;
        let endpoints = RailsExtractor.extract(source, "config/routes.rb");
        let keys: Vec<_> = endpoints.iter().map(|e| e.key()).collect();
        assert_eq!(
            keys,
            vec!["GET:/users", "GET:/users/{id}", "POST:/users"]
        );
    }

    #[test]
    fn test_resources_expansion() {
        let source = "Rails.application.routes.draw do\n  resources :articles\nend\n";
        let endpoints = RailsExtractor.extract(source, "config/routes.rb");
        let keys: Vec<_> = endpoints.iter().map(|e| e.key()).collect();
        assert_eq!(
            keys,
            vec![
                "GET:/articles",
                "POST:/articles",
                "GET:/articles/{id}",
                "PUT:/articles/{id}",
                "DELETE:/articles/{id}",
            ]
        );
    }

    #[test]
    fn test_ignores_unrelated_words() {
        // `getter 'x'`-style lines must not parse as routes
        let source = "forget 'nothing'\n";
        assert!(RailsExtractor.extract(source, "config/routes.rb").is_empty());
    }
}
