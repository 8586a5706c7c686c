//! Template resolution for code generation.
//!
//! Templates are compiled once into a cached Tera instance at construction.
//! A user override file (`<custom-dir>/<name>.tera`) beats the built-in
//! template of the same name; everything else comes from the built-in
//! registry. Templates are referentially transparent over the context they
//! are given; the only registered state is a small helper set.

mod builtin;

// Internal imports (std, crate)
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::identifier;
use crate::utils;

// External imports (alphabetized)
use tera::{Context, Tera, Value};

/// Environment variable naming a custom template directory
pub const TEMPLATE_DIR_ENV: &str = "AGENTIFY_TEMPLATE_DIR";

/// Resolves template names to rendered output, preferring user overrides
/// over the built-in registry.
#[derive(Debug)]
pub struct TemplateResolver {
    tera: Tera,
}

impl TemplateResolver {
    /// Build a resolver, loading overrides from `custom_dir` when given.
    ///
    /// Every template is compiled here, once; rendering never recompiles.
    pub fn new(custom_dir: Option<&Path>) -> Result<Self> {
        let mut tera = Tera::default();
        register_helpers(&mut tera);

        for (name, source) in builtin::BUILTIN_TEMPLATES {
            let source = override_source(custom_dir, name)?.unwrap_or_else(|| source.to_string());
            tera.add_raw_template(name, &source).map_err(|e| {
                Error::template(format!("Failed to compile template '{}': {}", name, e))
            })?;
        }

        Ok(Self { tera })
    }

    /// Build a resolver using the discovered default override directory.
    pub fn with_discovered_overrides() -> Result<Self> {
        let dir = discover_template_dir();
        Self::new(dir.as_deref())
    }

    /// Render the named template with the given context.
    pub fn render(&self, name: &str, context: &Context) -> Result<String> {
        if !self.has_template(name) {
            return Err(Error::TemplateNotFound(name.to_string()));
        }
        self.tera
            .render(name, context)
            .map_err(|e| Error::template(format!("Failed to render template '{}': {}", name, e)))
    }

    /// Check whether a template of this name is registered.
    pub fn has_template(&self, name: &str) -> bool {
        self.tera.get_template_names().any(|n| n == name)
    }

    /// Names of all registered templates, for diagnostics.
    pub fn template_names(&self) -> Vec<&str> {
        self.tera.get_template_names().collect()
    }
}

/// Read `<custom_dir>/<name>.tera` when it exists.
fn override_source(custom_dir: Option<&Path>, name: &str) -> Result<Option<String>> {
    let Some(dir) = custom_dir else {
        return Ok(None);
    };
    let path = dir.join(format!("{}.tera", name));
    if !path.is_file() {
        return Ok(None);
    }
    log::debug!("Using template override {}", path.display());
    let source = std::fs::read_to_string(&path).map_err(|e| {
        Error::template(format!(
            "Failed to read template override {}: {}",
            path.display(),
            e
        ))
    })?;
    Ok(Some(source))
}

/// Find the default custom-templates directory, checking in order the
/// `AGENTIFY_TEMPLATE_DIR` environment variable, `./templates` and
/// `~/.agentify/templates`.
pub fn discover_template_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var(TEMPLATE_DIR_ENV) {
        let path = PathBuf::from(dir);
        if path.is_dir() {
            return Some(path);
        }
    }
    let local = PathBuf::from("templates");
    if local.is_dir() {
        return Some(local);
    }
    if let Some(home) = dirs::home_dir() {
        let user = home.join(".agentify").join("templates");
        if user.is_dir() {
            return Some(user);
        }
    }
    None
}

/// Register the case-conversion filters and identifier-derivation functions
/// available to every template.
fn register_helpers(tera: &mut Tera) {
    tera.register_filter("camel_case", |value: &Value, _: &HashMap<String, Value>| {
        Ok(Value::String(utils::to_lower_camel_case(as_str(value)?)))
    });
    tera.register_filter("pascal_case", |value: &Value, _: &HashMap<String, Value>| {
        Ok(Value::String(utils::to_upper_camel_case(as_str(value)?)))
    });
    tera.register_filter("kebab_case", |value: &Value, _: &HashMap<String, Value>| {
        Ok(Value::String(utils::to_kebab_case(as_str(value)?)))
    });
    tera.register_filter("snake_case", |value: &Value, _: &HashMap<String, Value>| {
        Ok(Value::String(utils::to_snake_case(as_str(value)?)))
    });

    tera.register_function("tool_name", |args: &HashMap<String, Value>| {
        derivation_arg(args).map(|(m, p)| Value::String(identifier::derive(&m, &p).tool_name))
    });
    tera.register_function("handler_name", |args: &HashMap<String, Value>| {
        derivation_arg(args).map(|(m, p)| Value::String(identifier::derive(&m, &p).handler_name))
    });
    tera.register_function("safe_file_name", |args: &HashMap<String, Value>| {
        derivation_arg(args).map(|(m, p)| Value::String(identifier::derive(&m, &p).file_safe_name))
    });
}

fn as_str(value: &Value) -> tera::Result<&str> {
    value
        .as_str()
        .ok_or_else(|| tera::Error::msg("expected a string value"))
}

fn derivation_arg(args: &HashMap<String, Value>) -> tera::Result<(String, String)> {
    let method = args
        .get("method")
        .and_then(Value::as_str)
        .ok_or_else(|| tera::Error::msg("missing 'method' argument"))?;
    let path = args
        .get("path")
        .and_then(Value::as_str)
        .ok_or_else(|| tera::Error::msg("missing 'path' argument"))?;
    Ok((method.to_string(), path.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_builtins_compile() {
        let resolver = TemplateResolver::new(None).unwrap();
        for (name, _) in builtin::BUILTIN_TEMPLATES {
            assert!(resolver.has_template(name), "missing template {}", name);
        }
    }

    #[test]
    fn test_missing_template_is_fatal() {
        let resolver = TemplateResolver::new(None).unwrap();
        let err = resolver.render("no_such_template", &Context::new()).unwrap_err();
        assert!(matches!(err, Error::TemplateNotFound(_)));
    }

    #[test]
    fn test_override_beats_builtin() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("readme.tera"), "override {{ server_name }}").unwrap();

        let resolver = TemplateResolver::new(Some(dir.path())).unwrap();
        let mut context = Context::new();
        context.insert("server_name", "x");
        let out = resolver.render("readme", &context).unwrap();
        assert_eq!(out, "override x");
    }

    #[test]
    fn test_helper_functions() {
        let mut tera = Tera::default();
        register_helpers(&mut tera);
        tera.add_raw_template(
            "t",
            "{{ tool_name(method='GET', path='/users/{id}') }} {{ 'my-server' | pascal_case }}",
        )
        .unwrap();
        let out = tera.render("t", &Context::new()).unwrap();
        assert_eq!(out, "get_users_id MyServer");
    }
}
