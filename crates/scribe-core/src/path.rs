//! Path template helpers.
//!
//! Path patterns use `:name` for parameters and `:name?` for optional
//! parameters.

use std::sync::OnceLock;

use regex::{Captures, Regex};

fn optional_marker() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"/:([^/?]+)\?").expect("valid optional segment regex"))
}

fn parameter_token() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(^|/):([^/?]+)\??").expect("valid parameter regex"))
}

/// Expand optional segments into concrete patterns.
///
/// The pattern with every optional segment kept comes first. Then, for each
/// optional segment in source order, the pattern without that segment is
/// expanded recursively. Duplicates are kept.
///
/// ```rust
/// use scribe_core::path::expand;
///
/// assert_eq!(expand("/user/:user/name/:name"), vec!["/user/:user/name/:name"]);
/// assert_eq!(
///     expand("/user/:user?/name/:name?"),
///     vec![
///         "/user/:user/name/:name",
///         "/user/name/:name",
///         "/user/name",
///         "/user/:user/name",
///         "/user/name",
///     ]
/// );
/// ```
pub fn expand(pattern: &str) -> Vec<String> {
    let markers: Vec<&str> = optional_marker()
        .find_iter(pattern)
        .map(|found| found.as_str())
        .collect();
    if markers.is_empty() {
        return vec![pattern.to_string()];
    }

    let mut paths = vec![non_empty(optional_marker().replace_all(pattern, "/:$1").into_owned())];
    for marker in markers {
        let without = non_empty(pattern.replacen(marker, "", 1));
        paths.extend(expand(&without));
    }
    paths
}

fn non_empty(path: String) -> String {
    if path.is_empty() {
        String::from("/")
    } else {
        path
    }
}

/// Synthesize an operation id from a method and a concrete path.
///
/// ```rust
/// use scribe_core::path::operation_id;
///
/// assert_eq!(operation_id("GET", "/"), "getIndex");
/// assert_eq!(operation_id("get", "/user/:id"), "getUserById");
/// assert_eq!(operation_id("post", "/user/:id?/avatar"), "postUserByIdOptionalAvatar");
/// ```
pub fn operation_id(method: &str, path: &str) -> String {
    let mut id = method.to_lowercase();
    if path.is_empty() || path == "/" {
        id.push_str("Index");
        return id;
    }

    for segment in path.split('/').filter(|segment| !segment.is_empty()) {
        match segment.strip_prefix(':') {
            Some(name) => {
                id.push_str("By");
                id.push_str(&capitalize(name));
            }
            None => id.push_str(&capitalize(segment)),
        }
    }

    id.replace('?', "Optional")
}

/// Convert `:name` and `:name?` tokens into `{name}`.
///
/// ```rust
/// use scribe_core::path::to_openapi_path;
///
/// assert_eq!(to_openapi_path("/users/:id/posts/:post?"), "/users/{id}/posts/{post}");
/// ```
pub fn to_openapi_path(path: &str) -> String {
    parameter_token()
        .replace_all(path, |caps: &Captures<'_>| format!("{}{{{}}}", &caps[1], &caps[2]))
        .into_owned()
}

/// Parameter names in a pattern, in order.
pub fn path_parameters(path: &str) -> Vec<String> {
    parameter_token()
        .captures_iter(path)
        .map(|caps| caps[2].to_string())
        .collect()
}

/// Uppercase the first character.
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_single_optional() {
        assert_eq!(expand("/files/:name?"), vec!["/files/:name", "/files"]);
    }

    #[test]
    fn test_expand_root_optional() {
        assert_eq!(expand("/:lang?"), vec!["/:lang", "/"]);
    }

    #[test]
    fn test_expand_keeps_required_params() {
        assert_eq!(
            expand("/org/:org/repo/:repo?"),
            vec!["/org/:org/repo/:repo", "/org/:org/repo"]
        );
    }

    #[test]
    fn test_operation_id_variants() {
        assert_eq!(operation_id("get", ""), "getIndex");
        assert_eq!(operation_id("DELETE", "/users/:userId"), "deleteUsersByUserId");
        assert_eq!(operation_id("put", "/a/b/"), "putAB");
    }

    #[test]
    fn test_to_openapi_path() {
        assert_eq!(to_openapi_path("/"), "/");
        assert_eq!(to_openapi_path("/:id"), "/{id}");
        assert_eq!(to_openapi_path("/a/b"), "/a/b");
    }

    #[test]
    fn test_path_parameters() {
        assert_eq!(path_parameters("/users/:id/posts/:post?"), vec!["id", "post"]);
        assert!(path_parameters("/static").is_empty());
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("user"), "User");
        assert_eq!(capitalize("élan"), "Élan");
        assert_eq!(capitalize(""), "");
    }
}
