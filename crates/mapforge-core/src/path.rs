//! Artifact path transforms.
//!
//! The external compiler expects forward-slash paths, and the front end
//! fills in default extensions (`.map` for sources, `.bsp` for outputs)
//! when the operator leaves them off. These are pure string transforms;
//! nothing here touches the filesystem.
//!
//! A `.` only counts as starting an extension when it appears after the
//! last separator, and [`strip_extension`] additionally leaves leading-dot
//! segment names (`.hidden`) alone.

/// Replaces every backslash with a forward slash. Idempotent.
pub fn normalize_separators(path: &str) -> String {
    path.replace('\\', "/")
}

/// Returns `true` iff a `.` appears after the last path separator.
pub fn has_extension(path: &str) -> bool {
    for c in path.chars().rev() {
        if c == '/' || c == '\\' {
            return false;
        }
        if c == '.' {
            return true;
        }
    }
    false
}

/// Appends `ext` (which must include the leading dot) unless the path
/// already carries an extension.
pub fn with_default_extension(path: &str, ext: &str) -> String {
    if has_extension(path) {
        path.to_string()
    } else {
        format!("{path}{ext}")
    }
}

/// Removes the extension from the final path segment, if it has one.
///
/// The dot must fall strictly inside the final segment; a dot that starts
/// the segment is a name, not an extension.
pub fn strip_extension(path: &str) -> String {
    let seg_start = path.rfind(['/', '\\']).map_or(0, |i| i + 1);
    match path[seg_start..].rfind('.') {
        Some(dot) if dot > 0 => path[..seg_start + dot].to_string(),
        _ => path.to_string(),
    }
}

/// Derives the destination artifact name from a source path: extension
/// stripped, `.bsp` appended. Used only when no explicit destination was
/// supplied.
pub fn derive_destination(source: &str) -> String {
    let mut dest = strip_extension(source);
    dest.push_str(".bsp");
    dest
}
