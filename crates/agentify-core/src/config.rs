//! Generation policy configuration.
//!
//! `McpConfig` is loaded once per generate invocation from
//! `agentify.config.json` (YAML and TOML are accepted by extension),
//! merged with defaults, and never mutated by the pipeline. Unknown keys
//! are ignored.

// Internal imports (std, crate)
use std::path::Path;

use crate::error::Result;

// External imports (alphabetized)
use serde::{Deserialize, Deserializer, Serialize};
use serde_value::Value as SerdeValue;
use tokio::fs;

/// Target language of the generated server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Typescript,
    Javascript,
}

impl OutputFormat {
    /// Source file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Typescript => "ts",
            Self::Javascript => "js",
        }
    }
}

/// What a transform rule rewrites
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleType {
    Endpoint,
    Parameter,
    Response,
}

/// One rename rule: a literal substring replacement applied in array order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransformRule {
    /// Literal substring to search for (not a pattern language)
    pub pattern: String,
    /// Replacement text
    pub replacement: String,
    /// What the rule applies to
    #[serde(rename = "type")]
    pub rule_type: RuleType,
}

/// Generation policy for one project
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct McpConfig {
    /// Name of the generated server package
    pub server_name: String,

    /// Description written into the generated package and README
    pub description: String,

    /// Version of the generated server package
    pub version: String,

    /// Target language for generated sources
    pub output_format: OutputFormat,

    /// Whether to emit the tests/ tree
    pub include_tests: bool,

    /// Whether to emit README and docs/API.md
    pub include_documentation: bool,

    /// Endpoints to drop, as exact `METHOD:/path` keys (no wildcards)
    #[serde(deserialize_with = "deserialize_string_list")]
    pub exclude_endpoints: Vec<String>,

    /// Optional rename rules, applied only by an explicit transform pass
    pub transform_rules: Vec<TransformRule>,
}

impl Default for McpConfig {
    fn default() -> Self {
        Self {
            server_name: "mcp-server".to_string(),
            description: "Generated MCP server".to_string(),
            version: "1.0.0".to_string(),
            output_format: OutputFormat::default(),
            include_tests: true,
            include_documentation: true,
            exclude_endpoints: Vec::new(),
            transform_rules: Vec::new(),
        }
    }
}

impl McpConfig {
    /// Load configuration from a file, picking the parser by extension
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).await?;
        let config = match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => serde_yaml::from_str(&content)?,
            Some("toml") => toml::from_str(&content)
                .map_err(|e| crate::Error::config(format!("Invalid TOML config: {}", e)))?,
            _ => serde_json::from_str(&content)?,
        };
        Ok(config)
    }

    /// Load from an optional path, falling back to defaults when the path is
    /// absent or the file does not exist
    pub async fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) if path.exists() => Self::from_file(path).await,
            _ => Ok(Self::default()),
        }
    }

    /// Save configuration to a JSON file
    pub async fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content).await?;
        Ok(())
    }
}

/// Accept either a single string or a list of strings
fn deserialize_string_list<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = SerdeValue::deserialize(deserializer)?;
    match value {
        SerdeValue::String(s) => Ok(vec![s]),
        SerdeValue::Seq(seq) => {
            let mut result = Vec::new();
            for item in seq {
                if let SerdeValue::String(s) = item {
                    result.push(s);
                } else {
                    return Err(serde::de::Error::custom(
                        "Expected string or array of strings",
                    ));
                }
            }
            Ok(result)
        }
        _ => Err(serde::de::Error::custom(
            "Expected string or array of strings",
        )),
    }
}
