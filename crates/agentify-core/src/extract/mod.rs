//! Heuristic endpoint extraction.
//!
//! One extractor per source family, each a pure function over a single
//! file's text: no I/O, no shared state, safe to run in parallel across
//! files. Extractors are registered in a lookup table and dispatched by
//! file extension; candidates from all files are merged by [`aggregate`]
//! with a deterministic first-wins rule.

pub mod csharp;
pub mod golang;
pub mod java;
pub mod javascript;
pub mod nextjs;
pub mod params;
pub mod patterns;
pub mod php;
pub mod python;
pub mod ruby;
pub mod rustlang;

use std::collections::HashSet;

use crate::model::{EndpointInfo, ProjectType};

/// Trait for extracting API endpoints from source text.
pub trait EndpointExtractor: Send + Sync {
    /// Extract endpoint candidates from one file's content.
    fn extract(&self, content: &str, file_path: &str) -> Vec<EndpointInfo>;

    /// Framework family name, used in provenance descriptions.
    fn framework(&self) -> &'static str;

    /// Whether this extractor applies to the given file.
    fn handles(&self, file_path: &str, extension: &str) -> bool;
}

const JS_EXTENSIONS: &[&str] = &["js", "jsx", "ts", "tsx", "mjs", "cjs"];

pub(crate) fn is_js_extension(extension: &str) -> bool {
    JS_EXTENSIONS.contains(&extension)
}

/// Registry of endpoint extractors, keyed by project type and file extension.
pub struct ExtractorRegistry {
    extractors: Vec<Box<dyn EndpointExtractor>>,
}

impl ExtractorRegistry {
    /// Create a registry with every built-in family.
    pub fn new() -> Self {
        Self {
            extractors: vec![
                Box::new(javascript::JavaScriptExtractor),
                Box::new(nextjs::NextJsExtractor),
                Box::new(python::PythonExtractor),
                Box::new(java::SpringExtractor),
                Box::new(golang::GoExtractor),
                Box::new(php::LaravelExtractor),
                Box::new(ruby::RailsExtractor),
                Box::new(csharp::AspNetExtractor),
                Box::new(rustlang::RustExtractor),
            ],
        }
    }

    /// Create the extractor set for one project type. Node projects only run
    /// the JS families; the generic mode runs everything. OpenAPI mode never
    /// reaches the registry.
    pub fn for_project_type(project_type: ProjectType) -> Self {
        match project_type {
            ProjectType::NodeJs => Self {
                extractors: vec![
                    Box::new(javascript::JavaScriptExtractor),
                    Box::new(nextjs::NextJsExtractor),
                ],
            },
            _ => Self::new(),
        }
    }

    /// Run every applicable extractor over one file, in registration order.
    pub fn extract_file(&self, content: &str, file_path: &str) -> Vec<EndpointInfo> {
        let extension = file_path.rsplit('.').next().unwrap_or("").to_lowercase();
        self.extractors
            .iter()
            .filter(|e| e.handles(file_path, &extension))
            .flat_map(|e| e.extract(content, file_path))
            .collect()
    }
}

impl Default for ExtractorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Merge candidates into the final ordered endpoint list.
///
/// Keeps the first occurrence per `METHOD:path` key and drops later ones,
/// so output order is first-discovery order, a load-bearing guarantee for
/// deterministic downstream file generation.
pub fn aggregate(candidates: Vec<EndpointInfo>) -> Vec<EndpointInfo> {
    let mut seen = HashSet::new();
    let mut endpoints = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        if seen.insert(candidate.key()) {
            endpoints.push(candidate);
        }
    }
    endpoints
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::HttpMethod;

    fn ep(method: HttpMethod, path: &str) -> EndpointInfo {
        EndpointInfo::discovered(method, path, "Test", "test.js")
    }

    #[test]
    fn test_aggregate_first_wins() {
        let mut first = ep(HttpMethod::Get, "/users");
        first.description = "first".to_string();
        let mut second = ep(HttpMethod::Get, "/users");
        second.description = "second".to_string();

        let merged = aggregate(vec![first, second, ep(HttpMethod::Post, "/users")]);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].description, "first");
        assert_eq!(merged[1].method, HttpMethod::Post);
    }

    #[test]
    fn test_aggregate_distinguishes_methods() {
        let merged = aggregate(vec![ep(HttpMethod::Get, "/a"), ep(HttpMethod::Put, "/a")]);
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn test_registry_dispatch_by_extension() {
        let registry = ExtractorRegistry::new();
        let flask = "@app.route('/ping', methods=['GET'])\ndef ping():\n    pass\n";
        assert!(!registry.extract_file(flask, "api/app.py").is_empty());
        // Same content under a .go extension matches no Python patterns
        assert!(registry.extract_file(flask, "api/app.go").is_empty());
    }

    #[test]
    fn test_node_registry_skips_python() {
        let registry = ExtractorRegistry::for_project_type(ProjectType::NodeJs);
        let flask = "@app.route('/ping')\ndef ping():\n    pass\n";
        assert!(registry.extract_file(flask, "api/app.py").is_empty());
    }
}
