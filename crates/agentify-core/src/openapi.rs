//! OpenAPI/Swagger document support.
//!
//! When a project ships a machine-readable spec, extraction skips the
//! heuristics entirely and reads the endpoint list from the document.
//! Documents load from a local file or an HTTP(S) URL and may be JSON or
//! YAML; JSON is tried first.

// Internal imports (std, crate)
use std::path::Path;

use crate::error::{Error, Result};
use crate::extract::params;
use crate::extract::patterns::{self, PathStyle};
use crate::model::{EndpointInfo, HttpMethod, Parameter, ParameterLocation};

// External imports (alphabetized)
use serde_json::Value as JsonValue;
use tokio::fs;
use url::Url;

/// Load an OpenAPI document from a file path or URL.
pub async fn load_document(location: &str) -> Result<JsonValue> {
    if location.starts_with("http://") || location.starts_with("https://") {
        return load_from_url(location).await;
    }
    load_from_file(location).await
}

/// Load an OpenAPI document from a file (JSON or YAML).
pub async fn load_from_file<P: AsRef<Path>>(path: P) -> Result<JsonValue> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).await?;
    parse_content(&content).map_err(|e| {
        Error::analysis(format!(
            "Failed to parse OpenAPI spec at {}: {}",
            path.display(),
            e
        ))
    })
}

/// Load an OpenAPI document from a URL (JSON or YAML).
pub async fn load_from_url(url: &str) -> Result<JsonValue> {
    let response = reqwest::get(url)
        .await
        .map_err(|e| Error::analysis(format!("Failed to fetch OpenAPI spec from {}: {}", url, e)))?;

    if !response.status().is_success() {
        return Err(Error::analysis(format!(
            "Failed to fetch OpenAPI spec from {}: HTTP {}",
            url,
            response.status()
        )));
    }

    let content = response
        .text()
        .await
        .map_err(|e| Error::analysis(format!("Failed to read response from {}: {}", url, e)))?;

    parse_content(&content)
        .map_err(|e| Error::analysis(format!("Failed to parse OpenAPI spec from {}: {}", url, e)))
}

/// Parse content as either JSON or YAML
fn parse_content(content: &str) -> std::result::Result<JsonValue, String> {
    if let Ok(json) = serde_json::from_str(content) {
        return Ok(json);
    }
    if let Ok(json) = serde_yaml::from_str(content) {
        return Ok(json);
    }
    Err("content is neither valid JSON nor YAML".to_string())
}

/// Get the title of the API
pub fn title(doc: &JsonValue) -> Option<&str> {
    doc.get("info")?.get("title")?.as_str()
}

/// Get the version of the API
pub fn version(doc: &JsonValue) -> Option<&str> {
    doc.get("info")?.get("version")?.as_str()
}

/// Get the description of the API
pub fn description(doc: &JsonValue) -> Option<&str> {
    doc.get("info")?.get("description")?.as_str()
}

/// Get the base URL of the API, trying the OpenAPI 3.x `servers` array first
/// and falling back to the Swagger 2.0 `host` + `basePath` + `schemes` form.
pub fn base_url(doc: &JsonValue) -> Option<Url> {
    if let Some(servers) = doc.get("servers").and_then(JsonValue::as_array) {
        if let Some(url) = servers
            .first()
            .and_then(|s| s.get("url"))
            .and_then(JsonValue::as_str)
        {
            return Url::parse(url).ok();
        }
    }

    let host = doc.get("host").and_then(JsonValue::as_str)?;
    let base_path = doc
        .get("basePath")
        .and_then(JsonValue::as_str)
        .unwrap_or("");
    let scheme = match doc.get("schemes").and_then(JsonValue::as_array) {
        Some(schemes) => {
            if schemes.iter().any(|s| s.as_str() == Some("https")) {
                "https"
            } else {
                schemes.first().and_then(JsonValue::as_str).unwrap_or("https")
            }
        }
        None => "https",
    };
    Url::parse(&format!("{}://{}{}", scheme, host, base_path)).ok()
}

/// Parse every operation in the document into the normalized endpoint model.
///
/// Emits one `EndpointInfo` per path × method pair, in document order.
pub fn parse_endpoints(doc: &JsonValue, spec_name: &str) -> Result<Vec<EndpointInfo>> {
    let paths = doc
        .get("paths")
        .and_then(JsonValue::as_object)
        .ok_or_else(|| Error::analysis("OpenAPI document has no 'paths' object"))?;

    let mut endpoints = Vec::new();
    for (raw_path, item) in paths {
        let Some(item_obj) = item.as_object() else {
            continue;
        };
        let shared_params = item.get("parameters").and_then(JsonValue::as_array);

        for method in HttpMethod::all() {
            let key = method.as_str().to_lowercase();
            let Some(operation) = item_obj.get(&key).and_then(JsonValue::as_object) else {
                continue;
            };

            let path = patterns::normalize(PathStyle::Braces, raw_path);
            let description = operation
                .get("summary")
                .or_else(|| operation.get("description"))
                .and_then(JsonValue::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| format!("OpenAPI endpoint from {}", spec_name));

            let mut parameters = params::path_params(&path);
            let declared = operation
                .get("parameters")
                .and_then(JsonValue::as_array)
                .into_iter()
                .flatten()
                .chain(shared_params.into_iter().flatten());
            for declared_param in declared {
                merge_parameter(&mut parameters, declared_param);
            }
            if method != HttpMethod::Get && operation.get("requestBody").is_some() {
                let required = operation
                    .get("requestBody")
                    .and_then(|rb| rb.get("required"))
                    .and_then(JsonValue::as_bool)
                    .unwrap_or(false);
                if !parameters.iter().any(|p| p.name == "body") {
                    parameters.push(Parameter {
                        name: "body".to_string(),
                        param_type: "object".to_string(),
                        required,
                        location: ParameterLocation::Body,
                        description: None,
                    });
                }
            }

            let responses = operation.get("responses").and_then(JsonValue::as_object).map(|map| {
                map.iter()
                    .map(|(status, resp)| {
                        let text = resp
                            .get("description")
                            .and_then(JsonValue::as_str)
                            .unwrap_or_default()
                            .to_string();
                        (status.clone(), text)
                    })
                    .collect()
            });
            let tags = operation.get("tags").and_then(JsonValue::as_array).map(|arr| {
                arr.iter()
                    .filter_map(JsonValue::as_str)
                    .map(str::to_string)
                    .collect()
            });

            endpoints.push(EndpointInfo {
                path,
                method,
                description,
                parameters,
                responses,
                tags,
            });
        }
    }
    Ok(endpoints)
}

/// Fold one declared parameter into the inferred list. A `{name}` token
/// already present from the path template is enriched rather than re-added.
fn merge_parameter(parameters: &mut Vec<Parameter>, declared: &JsonValue) {
    let Some(name) = declared.get("name").and_then(JsonValue::as_str) else {
        return;
    };
    let location = declared
        .get("in")
        .and_then(JsonValue::as_str)
        .and_then(|s| match s {
            "path" => Some(ParameterLocation::Path),
            "query" => Some(ParameterLocation::Query),
            "header" => Some(ParameterLocation::Header),
            "body" => Some(ParameterLocation::Body),
            _ => None,
        })
        .unwrap_or(ParameterLocation::Query);
    let param_type = declared
        .get("schema")
        .and_then(|s| s.get("type"))
        .or_else(|| declared.get("type"))
        .and_then(JsonValue::as_str)
        .unwrap_or("string")
        .to_string();
    let description = declared
        .get("description")
        .and_then(JsonValue::as_str)
        .map(str::to_string);
    let required = declared
        .get("required")
        .and_then(JsonValue::as_bool)
        .unwrap_or(location == ParameterLocation::Path);

    if let Some(existing) = parameters.iter_mut().find(|p| p.name == name) {
        existing.param_type = param_type;
        existing.description = description;
        return;
    }
    parameters.push(Parameter {
        name: name.to_string(),
        param_type,
        required,
        location,
        description,
    });
}
