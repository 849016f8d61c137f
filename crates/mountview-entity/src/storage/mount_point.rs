//! Mount point normalization.

/// Normalize a configured mount point.
///
/// Adds a leading slash, collapses repeated slashes, drops `.` segments and
/// removes the trailing slash. The root mount point normalizes to `/`.
pub fn normalize_mount_point(raw: &str) -> String {
    let segments: Vec<&str> = raw
        .trim()
        .split(['/', '\\'])
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .collect();

    format!("/{}", segments.join("/"))
}
