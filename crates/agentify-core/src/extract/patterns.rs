//! Path pattern library: per-framework raw-path normalization.
//!
//! Each source family writes path parameters its own way. The transforms
//! here turn every raw form into the normalized `{name}` template used by
//! the rest of the pipeline. Kept as data so that adding a framework means
//! adding a rule, not editing callers.

use once_cell::sync::Lazy;
use regex::Regex;

/// How a framework family spells path parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathStyle {
    /// `:id` segments (Express, Gin, Rails)
    ColonParams,
    /// `<int:id>` / `<id>` converters (Flask, Django `path()`)
    AngleConverters,
    /// `(?P<id>\d+)` named groups with `^`/`$` anchors (Django `re_path()`)
    RegexGroups,
    /// `[id]` / `[...slug]` file-system segments (Next.js)
    BracketSegments,
    /// `{id}` already, possibly with a `:constraint` suffix (Spring,
    /// Laravel, ASP.NET, OpenAPI documents)
    Braces,
}

static COLON_PARAM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r":([A-Za-z_][A-Za-z0-9_]*)").unwrap());
static ANGLE_CONVERTER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<(?:[A-Za-z_]+:)?([A-Za-z_][A-Za-z0-9_]*)>").unwrap());
static NAMED_GROUP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\(\?P<([A-Za-z_][A-Za-z0-9_]*)>[^)]*\)").unwrap());
static UNNAMED_GROUP: Lazy<Regex> = Lazy::new(|| Regex::new(r"\((?:[^)]*)\)").unwrap());
static BARE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\d\+|\[\^/\]\+|\[0-9\]\+|\.\+|\.\*").unwrap());
static BRACKET_SEGMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[+(?:\.\.\.)?([A-Za-z_][A-Za-z0-9_]*)\]+").unwrap());
static BRACE_CONSTRAINT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)(?::[^}]*|\?)?\}").unwrap());

/// Normalize one raw path into the `{name}` template form.
///
/// The result always starts with `/`; trailing slashes are preserved
/// because some frameworks (Django) treat them as significant.
pub fn normalize(style: PathStyle, raw: &str) -> String {
    let normalized = match style {
        PathStyle::ColonParams => COLON_PARAM.replace_all(raw, "{$1}").into_owned(),
        PathStyle::AngleConverters => ANGLE_CONVERTER.replace_all(raw, "{$1}").into_owned(),
        PathStyle::RegexGroups => {
            let stripped = raw.trim_start_matches('^').trim_end_matches('$');
            let named = NAMED_GROUP.replace_all(stripped, "{$1}");
            let unnamed = UNNAMED_GROUP.replace_all(&named, "{id}");
            let bare = BARE_PATTERN.replace_all(&unnamed, "{id}");
            bare.replace('\\', "").replace('?', "")
        }
        PathStyle::BracketSegments => BRACKET_SEGMENT.replace_all(raw, "{$1}").into_owned(),
        PathStyle::Braces => BRACE_CONSTRAINT.replace_all(raw, "{$1}").into_owned(),
    };
    ensure_leading_slash(&normalized)
}

/// Prefix a path with `/` unless it already has one
pub fn ensure_leading_slash(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colon_params() {
        assert_eq!(normalize(PathStyle::ColonParams, "/users/:id"), "/users/{id}");
        assert_eq!(
            normalize(PathStyle::ColonParams, "/a/:b/c/:d_e"),
            "/a/{b}/c/{d_e}"
        );
    }

    #[test]
    fn test_angle_converters() {
        assert_eq!(
            normalize(PathStyle::AngleConverters, "/api/products/<int:id>"),
            "/api/products/{id}"
        );
        assert_eq!(
            normalize(PathStyle::AngleConverters, "users/<name>/"),
            "/users/{name}/"
        );
    }

    #[test]
    fn test_regex_groups() {
        assert_eq!(
            normalize(PathStyle::RegexGroups, r"^users/(?P<id>\d+)/$"),
            "/users/{id}/"
        );
        assert_eq!(
            normalize(PathStyle::RegexGroups, r"^items/(?P<slug>[^/]+)$"),
            "/items/{slug}"
        );
        // Unnamed pattern degrades to a generic placeholder
        assert_eq!(normalize(PathStyle::RegexGroups, r"^posts/\d+/$"), "/posts/{id}/");
    }

    #[test]
    fn test_bracket_segments() {
        assert_eq!(
            normalize(PathStyle::BracketSegments, "/api/orders/[id]"),
            "/api/orders/{id}"
        );
        assert_eq!(
            normalize(PathStyle::BracketSegments, "/api/docs/[...slug]"),
            "/api/docs/{slug}"
        );
        assert_eq!(
            normalize(PathStyle::BracketSegments, "/api/opt/[[...rest]]"),
            "/api/opt/{rest}"
        );
    }

    #[test]
    fn test_braces_with_constraints() {
        assert_eq!(normalize(PathStyle::Braces, "/users/{id}"), "/users/{id}");
        assert_eq!(
            normalize(PathStyle::Braces, r"/users/{id:\d+}"),
            "/users/{id}"
        );
        assert_eq!(normalize(PathStyle::Braces, "/files/{name?}"), "/files/{name}");
    }
}
