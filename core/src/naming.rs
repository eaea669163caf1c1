//! Deterministic asset naming for baked parts.
//!
//! Baked textures and materials are looked up by name at runtime, so the
//! names must be stable across bakes, safe as file names, and unique within
//! one bake.

use std::collections::HashSet;

/// Fallback used when a name has no usable characters.
pub const DEFAULT_NAME: &str = "part";

/// Replace every character outside `[A-Za-z0-9_-]` with `_`.
///
/// Leading and trailing underscores left by the replacement are trimmed; an
/// empty result becomes [`DEFAULT_NAME`].
pub fn sanitize(name: &str) -> String {
    let replaced: String = name
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    let trimmed = replaced.trim_matches('_');
    if trimmed.is_empty() {
        DEFAULT_NAME.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Sanitize and de-duplicate `names`, preserving order.
///
/// The first occurrence keeps its base name; later ones get `_1`, `_2`, …
/// skipping any suffix that is already taken.
pub fn unique_names<'a>(names: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut taken = HashSet::new();
    let mut out = Vec::new();
    for name in names {
        let base = sanitize(name);
        let mut candidate = base.clone();
        let mut index = 1u32;
        while taken.contains(&candidate) {
            candidate = format!("{base}_{index}");
            index += 1;
        }
        taken.insert(candidate.clone());
        out.push(candidate);
    }
    out
}

/// File stem of a baked asset: `<part>_<clip>_<suffix>`.
pub fn asset_stem(part: &str, clip: &str, suffix: &str) -> String {
    format!("{}_{}_{}", sanitize(part), sanitize(clip), suffix)
}
