use super::StoreError;

/// Normalize an asset path.
///
/// - Replaces backslashes with forward slashes
/// - Collapses redundant separators (`a///b` → `a/b`)
/// - Drops `.` segments
/// - Rejects `..` segments (path traversal not allowed)
/// - Strips leading and trailing slashes
///
/// Returns `Err(StoreError::InvalidPath)` if the path is empty or contains `..`.
pub fn normalize(path: &str) -> Result<String, StoreError> {
    let replaced = path.replace('\\', "/");
    let mut segments = Vec::new();

    for segment in replaced.split('/') {
        if segment.is_empty() || segment == "." {
            continue;
        }
        if segment == ".." {
            return Err(StoreError::InvalidPath(format!(
                "path traversal (..) not allowed in '{path}'"
            )));
        }
        segments.push(segment);
    }

    if segments.is_empty() {
        return Err(StoreError::InvalidPath("empty path".into()));
    }

    Ok(segments.join("/"))
}

/// Join a base directory and a file name into one normalized path.
///
/// An empty or `.` base puts the file at the store root.
pub fn join(base: &str, name: &str) -> Result<String, StoreError> {
    let base = base.trim();
    if base.is_empty() || base == "." {
        normalize(name)
    } else {
        normalize(&format!("{base}/{name}"))
    }
}
