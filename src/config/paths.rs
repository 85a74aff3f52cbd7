//! Position-wise mapping of sync paths to per-host destination paths.

/// Separator used in local and remote paths.
const SEPARATOR: char = '/';

/// Lexically normalize a path.
///
/// Collapses repeated separators and `.` segments, resolves `..` against the
/// preceding segment, and drops any trailing separator. `..` segments that
/// would climb above the root of an absolute path are discarded; leading `..`
/// segments of a relative path are kept. An empty path normalizes to `.`.
/// Exactly two leading separators are kept as written, since POSIX leaves
/// their meaning to the implementation; three or more collapse to one.
///
/// Only the string is inspected; the filesystem is never consulted, so
/// symlinks and `~` are left as written.
#[must_use]
pub fn normalize(path: &str) -> String {
    if path.is_empty() {
        return ".".to_string();
    }

    let absolute = path.starts_with(SEPARATOR);
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split(SEPARATOR) {
        match segment {
            "" | "." => {}
            ".." => {
                if segments.last().is_some_and(|last| *last != "..") {
                    segments.pop();
                } else if !absolute {
                    segments.push("..");
                }
            }
            _ => segments.push(segment),
        }
    }

    let root = match path.strip_prefix("//") {
        Some(rest) if !rest.starts_with(SEPARATOR) => "//",
        _ if absolute => "/",
        _ => "",
    };
    let joined = segments.join("/");
    if absolute {
        format!("{root}{joined}")
    } else if joined.is_empty() {
        ".".to_string()
    } else {
        joined
    }
}

/// Resolve the destination for `source`, optionally overridden by
/// `destination`.
///
/// The destination defaults to the source and is always normalized. A
/// trailing separator on `source` (rsync's "contents of" marker) is carried
/// over to the result, so the override decides *where* and the source
/// decides *how*.
#[must_use]
pub fn map_path(source: &str, destination: Option<&str>) -> String {
    let mut mapped = normalize(destination.unwrap_or(source));
    if source.ends_with(SEPARATOR) && !mapped.ends_with(SEPARATOR) {
        mapped.push(SEPARATOR);
    }
    mapped
}

/// Align a host's path overrides with its sync's paths.
///
/// Each sync path is paired with the host path at the same position. Sync
/// paths without a counterpart map to themselves; host paths beyond the end
/// of `sync_paths` are discarded. The result always has
/// `sync_paths.len()` entries.
#[must_use]
pub fn fix_host_paths<H, S>(host_paths: &[H], sync_paths: &[S]) -> Vec<String>
where
    H: AsRef<str>,
    S: AsRef<str>,
{
    sync_paths
        .iter()
        .enumerate()
        .map(|(i, sync_path)| {
            map_path(sync_path.as_ref(), host_paths.get(i).map(AsRef::as_ref))
        })
        .collect()
}
