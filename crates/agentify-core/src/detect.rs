//! Project type detection.
//!
//! Decides which extraction mode an analysis run uses, in priority order:
//! an explicit OpenAPI/Swagger document is authoritative over any heuristic
//! scan, a Node package manifest beats naming conventions, and naming
//! conventions beat the JS/TS fallback.

use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use crate::model::ProjectType;

/// Directories that never contain first-party sources
pub const DEPENDENCY_DIRS: &[&str] = &[
    "node_modules",
    ".git",
    "target",
    "vendor",
    "venv",
    ".venv",
    "__pycache__",
    "dist",
    "build",
    ".next",
    "coverage",
];

const SPEC_FILE_NAMES: &[&str] = &[
    "swagger.json",
    "swagger.yaml",
    "swagger.yml",
    "openapi.json",
    "openapi.yaml",
    "openapi.yml",
];

const CONVENTION_HINTS: &[&str] = &[
    "route", "controller", "api", "endpoint", "urls", "views", "handler",
];

const SOURCE_EXTENSIONS: &[&str] = &[
    "js", "jsx", "ts", "tsx", "mjs", "cjs", "py", "java", "kt", "go", "php", "rb", "cs", "rs",
];

/// Detect the extraction mode for the project rooted at `root`.
pub fn detect(root: &Path) -> ProjectType {
    let scan = Scan::run(root);
    if scan.spec_path.is_some() {
        ProjectType::OpenApi
    } else if scan.has_package_json {
        ProjectType::NodeJs
    } else if scan.has_api_convention {
        ProjectType::RestApi
    } else if scan.has_js_source {
        ProjectType::NodeJs
    } else {
        ProjectType::RestApi
    }
}

/// Locate the OpenAPI/Swagger document that OpenAPI mode should load
pub fn find_openapi_spec(root: &Path) -> Option<PathBuf> {
    Scan::run(root).spec_path
}

/// Locate the package manifest for Node mode
pub fn find_package_manifest(root: &Path) -> Option<PathBuf> {
    sorted_walk(root)
        .filter_map(|e| e.ok())
        .find(|e| e.file_type().is_file() && e.file_name() == "package.json")
        .map(|e| e.into_path())
}

/// Deterministic, dependency-free walk of a project tree
pub fn sorted_walk(root: &Path) -> impl Iterator<Item = walkdir::Result<DirEntry>> {
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_dependency_dir(e))
}

fn is_dependency_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .map(|name| DEPENDENCY_DIRS.contains(&name))
            .unwrap_or(false)
}

#[derive(Default)]
struct Scan {
    spec_path: Option<PathBuf>,
    has_package_json: bool,
    has_api_convention: bool,
    has_js_source: bool,
}

impl Scan {
    fn run(root: &Path) -> Self {
        let mut scan = Self::default();
        for entry in sorted_walk(root).filter_map(|e| e.ok()) {
            if !entry.file_type().is_file() {
                continue;
            }
            let Some(file_name) = entry.file_name().to_str() else {
                continue;
            };
            let lower = file_name.to_lowercase();

            if scan.spec_path.is_none() && SPEC_FILE_NAMES.contains(&lower.as_str()) {
                scan.spec_path = Some(entry.path().to_path_buf());
            }
            if lower == "package.json" {
                scan.has_package_json = true;
            }

            let (stem, extension) = match lower.rsplit_once('.') {
                Some((stem, ext)) => (stem, ext),
                None => continue,
            };
            if !SOURCE_EXTENSIONS.contains(&extension) {
                continue;
            }
            if matches!(extension, "js" | "jsx" | "ts" | "tsx" | "mjs" | "cjs") {
                scan.has_js_source = true;
            }
            if CONVENTION_HINTS.iter().any(|hint| stem.contains(hint)) {
                scan.has_api_convention = true;
            }
        }
        scan
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_openapi_beats_everything() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("package.json"), "{}").unwrap();
        fs::write(dir.path().join("openapi.yaml"), "openapi: 3.0.0").unwrap();
        assert_eq!(detect(dir.path()), ProjectType::OpenApi);
    }

    #[test]
    fn test_package_json_means_nodejs() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("package.json"), "{}").unwrap();
        fs::write(dir.path().join("routes.py"), "").unwrap();
        assert_eq!(detect(dir.path()), ProjectType::NodeJs);
    }

    #[test]
    fn test_api_convention_means_rest_api() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("flask_api.py"), "").unwrap();
        assert_eq!(detect(dir.path()), ProjectType::RestApi);
    }

    #[test]
    fn test_js_fallback() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("index.js"), "").unwrap();
        assert_eq!(detect(dir.path()), ProjectType::NodeJs);
    }

    #[test]
    fn test_empty_project_falls_back_to_rest_api() {
        let dir = tempdir().unwrap();
        assert_eq!(detect(dir.path()), ProjectType::RestApi);
    }

    #[test]
    fn test_dependency_dirs_are_ignored() {
        let dir = tempdir().unwrap();
        let deps = dir.path().join("node_modules").join("lib");
        fs::create_dir_all(&deps).unwrap();
        fs::write(deps.join("swagger.json"), "{}").unwrap();
        fs::write(dir.path().join("main.rb"), "").unwrap();
        assert_eq!(detect(dir.path()), ProjectType::RestApi);
        assert!(find_openapi_spec(dir.path()).is_none());
    }
}
