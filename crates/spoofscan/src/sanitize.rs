//! Helpers for keeping log lines and span fields free of sensitive data.

use std::path::Path;

/// Longest backend body kept in logs and error messages.
pub const MAX_LOGGED_BODY_LENGTH: usize = 200;

/// Returns only the filename component of a path (no directory). Non-UTF-8
/// bytes are replaced, so the suffix survives.
pub fn redact_path(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "<unknown>".to_string())
}

/// Truncates a response body, on a char boundary, so echoed document text or
/// tokens cannot flood the logs.
pub fn truncate_for_log(body: &str) -> String {
    if body.len() <= MAX_LOGGED_BODY_LENGTH {
        return body.to_string();
    }

    let mut end = MAX_LOGGED_BODY_LENGTH;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}... (truncated)", &body[..end])
}
