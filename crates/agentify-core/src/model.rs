//! Data model shared by the extraction engine and the generation pipeline.
//!
//! `EndpointInfo` is the normalized description of one discovered HTTP
//! operation; `ProjectInfo` is the immutable result of a whole analysis run.
//! Everything serializes to camelCase JSON so the CLI can emit it directly.

// Internal imports (std, crate)
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

// External imports (alphabetized)
use serde::{Deserialize, Serialize};
use url::Url;

/// Canonical HTTP methods supported by the extraction engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Options,
    Head,
}

impl HttpMethod {
    /// Returns the uppercase canonical form
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
            Self::Options => "OPTIONS",
            Self::Head => "HEAD",
        }
    }

    /// Returns an iterator over all supported methods
    pub fn all() -> impl Iterator<Item = Self> {
        use HttpMethod::*;
        [Get, Post, Put, Patch, Delete, Options, Head].into_iter()
    }
}

impl FromStr for HttpMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "PATCH" => Ok(Self::Patch),
            "DELETE" => Ok(Self::Delete),
            "OPTIONS" => Ok(Self::Options),
            "HEAD" => Ok(Self::Head),
            other => Err(format!("Unsupported HTTP method: {}", other)),
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Where a parameter is carried in the request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    Path,
    Query,
    Header,
    Body,
}

/// One parameter of a discovered endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    /// Parameter name, identifier-safe after sanitization
    pub name: String,

    /// Parameter type, defaults to "string"
    #[serde(rename = "type", default = "default_parameter_type")]
    pub param_type: String,

    /// Path parameters are always required; query parameters default to false
    #[serde(default)]
    pub required: bool,

    /// Location of the parameter
    #[serde(rename = "in")]
    pub location: ParameterLocation,

    /// Optional free-text description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Parameter {
    /// Build a required, string-typed path parameter
    pub fn path(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            param_type: default_parameter_type(),
            required: true,
            location: ParameterLocation::Path,
            description: None,
        }
    }

    /// Build an optional, string-typed query parameter
    pub fn query(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            param_type: default_parameter_type(),
            required: false,
            location: ParameterLocation::Query,
            description: None,
        }
    }
}

fn default_parameter_type() -> String {
    "string".to_string()
}

/// One discovered HTTP operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointInfo {
    /// Normalized path template using `{name}` for variable segments
    pub path: String,

    /// Canonical HTTP method
    pub method: HttpMethod,

    /// Free text, defaults to a provenance string
    pub description: String,

    /// Path params in path-appearance order, then query params first-seen
    #[serde(default)]
    pub parameters: Vec<Parameter>,

    /// Response descriptions keyed by status code (OpenAPI mode only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responses: Option<BTreeMap<String, String>>,

    /// Grouping tags (OpenAPI mode only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl EndpointInfo {
    /// Create an endpoint with a provenance description for a framework match
    pub fn discovered(
        method: HttpMethod,
        path: impl Into<String>,
        framework: &str,
        file_path: &str,
    ) -> Self {
        Self {
            path: path.into(),
            method,
            description: format!("{} endpoint from {}", framework, file_path),
            parameters: Vec::new(),
            responses: None,
            tags: None,
        }
    }

    /// The deduplication key, `METHOD:path`
    pub fn key(&self) -> String {
        format!("{}:{}", self.method, self.path)
    }
}

/// The extraction mode an analysis run operates in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ProjectType {
    /// Generic multi-language source scan
    #[default]
    #[serde(rename = "rest-api")]
    RestApi,
    /// Node package with JS/TS sources
    #[serde(rename = "nodejs")]
    NodeJs,
    /// Machine-readable OpenAPI/Swagger document
    #[serde(rename = "openapi")]
    OpenApi,
}

impl ProjectType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RestApi => "rest-api",
            Self::NodeJs => "nodejs",
            Self::OpenApi => "openapi",
        }
    }
}

impl FromStr for ProjectType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "rest-api" | "rest_api" => Ok(Self::RestApi),
            "nodejs" | "node" => Ok(Self::NodeJs),
            "openapi" | "swagger" => Ok(Self::OpenApi),
            other => Err(format!("Unsupported project type: {}", other)),
        }
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The structured description of one analyzed project.
///
/// Built once per `analyze` invocation and consumed read-only by generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectInfo {
    /// Project name, taken from a manifest when available, else the directory name
    pub name: String,

    /// The extraction mode that produced this description
    #[serde(rename = "type")]
    pub project_type: ProjectType,

    /// Root directory of the analyzed project
    pub root_path: PathBuf,

    /// Ordered, deduplicated endpoint list (first-discovery order)
    pub endpoints: Vec<EndpointInfo>,

    /// Base URL of the upstream API, when the source declares one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<Url>,

    /// Declared version, when the source declares one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Declared description, when the source declares one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_roundtrip() {
        for method in HttpMethod::all() {
            let parsed: HttpMethod = method.as_str().parse().unwrap();
            assert_eq!(parsed, method);
        }
        assert_eq!("get".parse::<HttpMethod>().unwrap(), HttpMethod::Get);
        assert!("TRACE".parse::<HttpMethod>().is_err());
    }

    #[test]
    fn test_endpoint_key() {
        let ep = EndpointInfo::discovered(HttpMethod::Put, "/users/{id}", "Express", "app.js");
        assert_eq!(ep.key(), "PUT:/users/{id}");
        assert_eq!(ep.description, "Express endpoint from app.js");
    }

    #[test]
    fn test_project_type_parse() {
        assert_eq!("rest-api".parse::<ProjectType>().unwrap(), ProjectType::RestApi);
        assert_eq!("nodejs".parse::<ProjectType>().unwrap(), ProjectType::NodeJs);
        assert_eq!("OpenAPI".parse::<ProjectType>().unwrap(), ProjectType::OpenApi);
        assert!("cobol".parse::<ProjectType>().is_err());
    }

    #[test]
    fn test_parameter_serde_shape() {
        let param = Parameter::path("id");
        let json = serde_json::to_value(&param).unwrap();
        assert_eq!(json["in"], "path");
        assert_eq!(json["type"], "string");
        assert_eq!(json["required"], true);
    }
}
