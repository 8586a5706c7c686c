//! Project analysis: turn a source tree into a `ProjectInfo`.
//!
//! File reads are issued concurrently (there is no ordering dependency
//! between reading two source files) but extraction itself is pure and
//! synchronous, and results are merged in file-enumeration order, so the
//! endpoint list is deterministic regardless of I/O completion order.

// Internal imports (std, crate)
use std::path::{Path, PathBuf};

use crate::detect;
use crate::error::{Error, Result};
use crate::extract::{self, ExtractorRegistry};
use crate::model::{ProjectInfo, ProjectType};
use crate::openapi;

// External imports (alphabetized)
use futures::future::join_all;
use serde_json::Value as JsonValue;
use tokio::fs;

/// Analyze the project at `project_path`.
///
/// `project_type` of `None` means auto-detection. Fails when the path does
/// not exist; a single unreadable source file is skipped with a warning.
pub async fn analyze(
    project_path: impl AsRef<Path>,
    project_type: Option<ProjectType>,
) -> Result<ProjectInfo> {
    let root = project_path.as_ref();
    if !root.exists() {
        return Err(Error::analysis(format!(
            "Project path does not exist: {}",
            root.display()
        )));
    }

    let project_type = project_type.unwrap_or_else(|| detect::detect(root));
    log::debug!("Analyzing {} as {}", root.display(), project_type);

    match project_type {
        ProjectType::OpenApi => analyze_openapi(root).await,
        ProjectType::NodeJs => analyze_sources(root, ProjectType::NodeJs).await,
        ProjectType::RestApi => analyze_sources(root, ProjectType::RestApi).await,
    }
}

/// OpenAPI mode: the document is authoritative, no source scan runs.
async fn analyze_openapi(root: &Path) -> Result<ProjectInfo> {
    let spec_path = detect::find_openapi_spec(root).ok_or_else(|| {
        Error::analysis(format!(
            "No OpenAPI/Swagger document found under {}",
            root.display()
        ))
    })?;
    let spec_name = relative_display(root, &spec_path);
    let doc = openapi::load_from_file(&spec_path).await?;
    let endpoints = openapi::parse_endpoints(&doc, &spec_name)?;

    Ok(ProjectInfo {
        name: openapi::title(&doc)
            .map(str::to_string)
            .unwrap_or_else(|| dir_name(root)),
        project_type: ProjectType::OpenApi,
        root_path: root.to_path_buf(),
        endpoints: extract::aggregate(endpoints),
        base_url: openapi::base_url(&doc),
        version: openapi::version(&doc).map(str::to_string),
        description: openapi::description(&doc).map(str::to_string),
    })
}

/// Source-scanning modes: run the registry over every candidate file.
async fn analyze_sources(root: &Path, project_type: ProjectType) -> Result<ProjectInfo> {
    let registry = ExtractorRegistry::for_project_type(project_type);
    let files = enumerate_sources(root);

    // Reads run concurrently; join_all keeps enumeration order
    let reads = files.iter().map(|path| fs::read_to_string(path));
    let contents = join_all(reads).await;

    let mut candidates = Vec::new();
    for (path, content) in files.iter().zip(contents) {
        match content {
            Ok(content) => {
                let display_path = relative_display(root, path);
                candidates.extend(registry.extract_file(&content, &display_path));
            }
            Err(e) => {
                log::warn!("Skipping unreadable file {}: {}", path.display(), e);
            }
        }
    }

    let (name, version, description) = match project_type {
        ProjectType::NodeJs => read_package_metadata(root).await,
        _ => (None, None, None),
    };

    Ok(ProjectInfo {
        name: name.unwrap_or_else(|| dir_name(root)),
        project_type,
        root_path: root.to_path_buf(),
        endpoints: extract::aggregate(candidates),
        base_url: None,
        version,
        description,
    })
}

/// Candidate source files, in sorted walk order.
fn enumerate_sources(root: &Path) -> Vec<PathBuf> {
    detect::sorted_walk(root)
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            e.path()
                .extension()
                .and_then(|ext| ext.to_str())
                .map(is_candidate_extension)
                .unwrap_or(false)
        })
        .map(|e| e.into_path())
        .collect()
}

fn is_candidate_extension(extension: &str) -> bool {
    matches!(
        extension.to_lowercase().as_str(),
        "js" | "jsx" | "ts" | "tsx" | "mjs" | "cjs" | "py" | "java" | "kt" | "go" | "php" | "rb"
            | "cs" | "rs"
    )
}

/// Project name/version/description from package.json, when present.
async fn read_package_metadata(
    root: &Path,
) -> (Option<String>, Option<String>, Option<String>) {
    let Some(manifest) = detect::find_package_manifest(root) else {
        return (None, None, None);
    };
    let Ok(content) = fs::read_to_string(&manifest).await else {
        log::warn!("Could not read {}", manifest.display());
        return (None, None, None);
    };
    let Ok(json) = serde_json::from_str::<JsonValue>(&content) else {
        log::warn!("Could not parse {}", manifest.display());
        return (None, None, None);
    };
    let field = |key: &str| {
        json.get(key)
            .and_then(JsonValue::as_str)
            .map(str::to_string)
    };
    (field("name"), field("version"), field("description"))
}

fn dir_name(root: &Path) -> String {
    root.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("project")
        .to_string()
}

/// Root-relative path with forward slashes, for stable provenance strings.
fn relative_display(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}
