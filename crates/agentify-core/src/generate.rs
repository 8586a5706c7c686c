//! Deterministic code generation pipeline.
//!
//! Maps a `ProjectInfo` (after rule filtering) onto the output file tree:
//! directory skeleton, server entrypoint, package manifest, one tool file
//! per endpoint, tools index, then environment/docs/test files. Every file
//! is rendered before anything is written, so a template failure aborts the
//! run with the output directory untouched. In dry-run mode the identical
//! action list is computed and nothing touches the filesystem.

// Internal imports (std, crate)
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::config::{McpConfig, OutputFormat};
use crate::error::{Error, Result};
use crate::identifier;
use crate::model::{EndpointInfo, HttpMethod, ParameterLocation, ProjectInfo};
use crate::rules;
use crate::templates::TemplateResolver;

// External imports (alphabetized)
use serde::Serialize;
use serde_json::{json, Value as JsonValue};
use tera::Context;
use tokio::fs;

/// One intended filesystem mutation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "action", content = "path")]
pub enum GenerationAction {
    CreateDir(PathBuf),
    WriteFile(PathBuf),
}

/// What a generation run did (or, under dry-run, would do)
#[derive(Debug, Serialize)]
pub struct GenerationReport {
    pub actions: Vec<GenerationAction>,
    pub dry_run: bool,
}

impl GenerationReport {
    /// Paths of all file writes, in pipeline order
    pub fn written_files(&self) -> Vec<&Path> {
        self.actions
            .iter()
            .filter_map(|a| match a {
                GenerationAction::WriteFile(path) => Some(path.as_path()),
                GenerationAction::CreateDir(_) => None,
            })
            .collect()
    }
}

/// Generate the MCP server for `project` into `output_path`.
///
/// The endpoint list is filtered through the configured exclusions first.
/// Fails before writing anything when two surviving endpoints collide on
/// their derived file name, or when a template is missing or fails to
/// render. An I/O failure mid-run aborts the rest of the run.
pub async fn generate(
    project: &ProjectInfo,
    config: &McpConfig,
    output_path: &Path,
    dry_run: bool,
    resolver: &TemplateResolver,
) -> Result<GenerationReport> {
    let endpoints = rules::filter(project.endpoints.clone(), config);
    check_collisions(&endpoints)?;

    let ext = config.output_format.extension();
    let endpoint_contexts: Vec<JsonValue> = endpoints.iter().map(endpoint_context).collect();
    let base = base_context(project, config, &endpoint_contexts);

    let mut actions = Vec::new();
    let mut directories = vec![
        output_path.to_path_buf(),
        output_path.join("src"),
        output_path.join("src").join("tools"),
    ];
    if config.include_documentation {
        directories.push(output_path.join("docs"));
    }
    if config.include_tests {
        directories.push(output_path.join("tests"));
        directories.push(output_path.join("tests").join("tools"));
    }
    for dir in &directories {
        actions.push(GenerationAction::CreateDir(dir.clone()));
    }

    // Render everything up front; a bad template must not leave a partial tree
    let mut files: Vec<(PathBuf, String)> = Vec::new();

    files.push((
        output_path.join("src").join(format!("index.{}", ext)),
        resolver.render("server", &base)?,
    ));
    files.push((
        output_path.join("package.json"),
        resolver.render("package_json", &base)?,
    ));
    if config.output_format == OutputFormat::Typescript {
        files.push((
            output_path.join("tsconfig.json"),
            resolver.render("tsconfig", &base)?,
        ));
    }

    for context in &endpoint_contexts {
        let file_safe_name = context["file_safe_name"].as_str().unwrap_or_default();
        let mut tool_context = base.clone();
        merge_object(&mut tool_context, context);
        files.push((
            output_path
                .join("src")
                .join("tools")
                .join(format!("{}.{}", file_safe_name, ext)),
            resolver.render("tool", &tool_context)?,
        ));
    }

    files.push((
        output_path.join("src").join("tools").join(format!("index.{}", ext)),
        resolver.render("tools_index", &base)?,
    ));
    files.push((
        output_path.join(".env.example"),
        resolver.render("env_example", &base)?,
    ));
    files.push((output_path.join("README.md"), resolver.render("readme", &base)?));
    if config.include_documentation {
        files.push((
            output_path.join("docs").join("API.md"),
            resolver.render("api_docs", &base)?,
        ));
    }
    if config.include_tests {
        files.push((
            output_path.join("tests").join(format!("setup.{}", ext)),
            resolver.render("test_setup", &base)?,
        ));
        for context in &endpoint_contexts {
            let file_safe_name = context["file_safe_name"].as_str().unwrap_or_default();
            let mut tool_context = base.clone();
            merge_object(&mut tool_context, context);
            files.push((
                output_path
                    .join("tests")
                    .join("tools")
                    .join(format!("{}.test.{}", file_safe_name, ext)),
                resolver.render("tool_test", &tool_context)?,
            ));
        }
    }

    for (path, _) in &files {
        actions.push(GenerationAction::WriteFile(path.clone()));
    }

    if dry_run {
        for action in &actions {
            match action {
                GenerationAction::CreateDir(path) => {
                    log::info!("[dry-run] would create {}", path.display())
                }
                GenerationAction::WriteFile(path) => {
                    log::info!("[dry-run] would write {}", path.display())
                }
            }
        }
        return Ok(GenerationReport { actions, dry_run });
    }

    for dir in &directories {
        fs::create_dir_all(dir).await?;
    }
    for (path, content) in &files {
        log::debug!("Writing {}", path.display());
        fs::write(path, content).await?;
    }

    Ok(GenerationReport { actions, dry_run })
}

/// Fail when two surviving endpoints derive the same file name.
fn check_collisions(endpoints: &[EndpointInfo]) -> Result<()> {
    let mut seen: HashMap<String, String> = HashMap::new();
    for endpoint in endpoints {
        let triple = identifier::derive(endpoint.method.as_str(), &endpoint.path);
        if let Some(first) = seen.get(&triple.file_safe_name) {
            return Err(Error::Collision {
                name: triple.file_safe_name,
                first: first.clone(),
                second: endpoint.key(),
            });
        }
        seen.insert(triple.file_safe_name, endpoint.key());
    }
    Ok(())
}

/// Shared template context for every file.
fn base_context(
    project: &ProjectInfo,
    config: &McpConfig,
    endpoint_contexts: &[JsonValue],
) -> Context {
    let mut context = Context::new();
    context.insert("server_name", &config.server_name);
    context.insert("server_description", &config.description);
    context.insert("version", &config.version);
    context.insert(
        "typescript",
        &(config.output_format == OutputFormat::Typescript),
    );
    context.insert("include_tests", &config.include_tests);
    context.insert("include_documentation", &config.include_documentation);
    context.insert("project_name", &project.name);
    context.insert("project_type", project.project_type.as_str());
    context.insert("base_url", &project.base_url.as_ref().map(base_url_str));
    context.insert("endpoints", endpoint_contexts);
    context
}

/// Base URLs are joined with endpoint paths by plain concatenation in the
/// generated code, so the trailing slash has to go here.
fn base_url_str(url: &url::Url) -> String {
    url.as_str().trim_end_matches('/').to_string()
}

/// Per-endpoint template context, identifiers included, so templates never
/// re-derive names at render time.
fn endpoint_context(endpoint: &EndpointInfo) -> JsonValue {
    let triple = identifier::derive(endpoint.method.as_str(), &endpoint.path);
    let params: Vec<JsonValue> = endpoint
        .parameters
        .iter()
        .map(|p| {
            json!({
                "name": p.name,
                "type": p.param_type,
                "required": p.required,
                "location": location_str(p.location),
                "description": p.description.clone().unwrap_or_default(),
                "token": format!("{{{}}}", p.name),
            })
        })
        .collect();
    let by_location = |loc: &str| -> Vec<JsonValue> {
        params
            .iter()
            .filter(|p| p["location"] == loc)
            .cloned()
            .collect()
    };

    json!({
        "tool_name": triple.tool_name,
        "handler_name": triple.handler_name,
        "file_safe_name": triple.file_safe_name,
        "method": endpoint.method.as_str(),
        "path": endpoint.path,
        "description": endpoint.description,
        "params": params,
        "path_params": by_location("path"),
        "query_params": by_location("query"),
        "has_body": has_body(endpoint.method),
    })
}

fn has_body(method: HttpMethod) -> bool {
    !matches!(
        method,
        HttpMethod::Get | HttpMethod::Head | HttpMethod::Options
    )
}

fn location_str(location: ParameterLocation) -> &'static str {
    match location {
        ParameterLocation::Path => "path",
        ParameterLocation::Query => "query",
        ParameterLocation::Header => "header",
        ParameterLocation::Body => "body",
    }
}

fn merge_object(context: &mut Context, value: &JsonValue) {
    if let Some(map) = value.as_object() {
        for (key, entry) in map {
            context.insert(key.as_str(), entry);
        }
    }
}
