//! Dotted-path resolution against a JSON context.
//!
//! Resolution is total: a missing key, or a step into a value that is not an
//! object, yields `None` ("missing") instead of an error. Arrays are not
//! indexable by path.

use serde_json::Value;

/// Resolves a dot-separated path such as `user.profile.age`.
///
/// ```rust
/// use serde_json::json;
/// use stencil::resolve;
///
/// let data = json!({"user": {"profile": {"age": 41}}});
/// assert_eq!(resolve(&data, "user.profile.age"), Some(&json!(41)));
/// assert_eq!(resolve(&data, "user.email"), None);
/// assert_eq!(resolve(&data, "user.profile.age.years"), None);
/// ```
pub fn resolve<'a>(context: &'a Value, path: &str) -> Option<&'a Value> {
    walk(context, path.split('.'))
}

/// Resolves pre-split key segments. An empty slice resolves to `context`.
pub fn resolve_segments<'a, S: AsRef<str>>(context: &'a Value, segments: &[S]) -> Option<&'a Value> {
    walk(context, segments.iter().map(|segment| segment.as_ref()))
}

fn walk<'a, 'k>(context: &'a Value, keys: impl IntoIterator<Item = &'k str>) -> Option<&'a Value> {
    keys.into_iter().try_fold(context, |current, key| match current {
        Value::Object(map) => map.get(key),
        _ => None,
    })
}
