//! String transformation utilities for identifier derivation and template filters

/// Convert a string to snake_case
pub fn to_snake_case(s: &str) -> String {
    let mut result = String::new();
    let mut prev_is_lowercase = false;

    for (i, ch) in s.chars().enumerate() {
        if ch.is_uppercase() {
            // Add underscore before uppercase letter if:
            // - Not at the start
            // - Previous character was lowercase
            if i > 0 && prev_is_lowercase {
                result.push('_');
            }
            result.push(ch.to_lowercase().next().unwrap_or(ch));
            prev_is_lowercase = false;
        } else if ch.is_alphanumeric() {
            result.push(ch);
            prev_is_lowercase = ch.is_lowercase();
        } else {
            if !result.is_empty() && !result.ends_with('_') {
                result.push('_');
            }
            prev_is_lowercase = false;
        }
    }

    result.trim_matches('_').to_string()
}

/// Convert a string to UpperCamelCase (PascalCase)
pub fn to_upper_camel_case(s: &str) -> String {
    // Normalize through snake_case first, then capitalize each word
    to_snake_case(s)
        .split('_')
        .filter(|w| !w.is_empty())
        .map(capitalize)
        .collect()
}

/// Convert a string to lowerCamelCase
pub fn to_lower_camel_case(s: &str) -> String {
    let upper_camel = to_upper_camel_case(s);
    let mut chars = upper_camel.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_lowercase().collect::<String>() + chars.as_str(),
    }
}

/// Convert a string to kebab-case
pub fn to_kebab_case(s: &str) -> String {
    to_snake_case(s).replace('_', "-")
}

/// Uppercase the first character, lowercase the rest
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => {
            first.to_uppercase().collect::<String>() + chars.as_str().to_lowercase().as_str()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_snake_case() {
        assert_eq!(to_snake_case("findPetsByStatus"), "find_pets_by_status");
        assert_eq!(to_snake_case("FindPetsByStatus"), "find_pets_by_status");
        assert_eq!(to_snake_case("find-pets-by-status"), "find_pets_by_status");
        assert_eq!(to_snake_case("find_pets_by_status"), "find_pets_by_status");
        assert_eq!(to_snake_case("get HTTP Response"), "get_http_response");
    }

    #[test]
    fn test_to_upper_camel_case() {
        assert_eq!(to_upper_camel_case("find_pets_by_status"), "FindPetsByStatus");
        assert_eq!(to_upper_camel_case("find-pets-by-status"), "FindPetsByStatus");
        assert_eq!(to_upper_camel_case("FIND_PETS_BY_STATUS"), "FindPetsByStatus");
    }

    #[test]
    fn test_to_lower_camel_case() {
        assert_eq!(to_lower_camel_case("find_pets_by_status"), "findPetsByStatus");
        assert_eq!(to_lower_camel_case("FindPetsByStatus"), "findPetsByStatus");
    }

    #[test]
    fn test_to_kebab_case() {
        assert_eq!(to_kebab_case("MyMcpServer"), "my-mcp-server");
        assert_eq!(to_kebab_case("my_mcp_server"), "my-mcp-server");
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("users"), "Users");
        assert_eq!(capitalize("USERS"), "Users");
        assert_eq!(capitalize(""), "");
    }
}
