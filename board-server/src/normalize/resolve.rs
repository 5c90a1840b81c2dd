//! Ordered multi-key field resolution.
//!
//! Upstream responses spell the same logical attribute several different
//! ways (`direction` vs `destination`, `platform` vs `plannedPlatform`).
//! Each attribute maps to an ordered list of candidate key paths; the first
//! path holding a present, non-null value wins. Keeping the candidates in
//! data keeps the probing in one place instead of ad hoc conditionals
//! scattered through the pipeline.

use serde_json::Value;

/// A candidate location for one logical attribute: a path of object keys,
/// outermost first (`["line", "name"]` addresses `record.line.name`).
pub type KeyPath = &'static [&'static str];

/// Return the first present, non-null value among the candidate paths.
pub fn resolve<'a>(record: &'a Value, paths: &[KeyPath]) -> Option<&'a Value> {
    paths.iter().find_map(|path| lookup(record, path))
}

/// Resolve an attribute rendered as text.
///
/// Strings are taken as-is; numbers are stringified (platforms are
/// sometimes numeric). Anything else is unusable and resolves to `None`.
pub fn resolve_text(record: &Value, paths: &[KeyPath]) -> Option<String> {
    match resolve(record, paths)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn lookup<'a>(record: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let mut current = record;
    for key in path {
        current = current.as_object()?.get(*key)?;
    }
    if current.is_null() { None } else { Some(current) }
}
