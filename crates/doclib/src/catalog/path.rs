//! Storage path generation for new uploads.

use chrono::{DateTime, Utc};

/// Fallback when nothing usable is left of the uploaded name.
const FALLBACK_FILE_NAME: &str = "document.pdf";

/// Builds `<unix-millis>_<8 hex>_<sanitized file name>`.
///
/// The millisecond prefix keeps paths roughly time-ordered; the random
/// fragment separates uploads of the same name within one millisecond.
pub fn storage_path(file_name: &str, now: DateTime<Utc>) -> String {
    let nonce = uuid::Uuid::new_v4().simple().to_string();
    format!(
        "{}_{}_{}",
        now.timestamp_millis(),
        &nonce[..8],
        sanitize_file_name(file_name)
    )
}

/// Keeps ASCII alphanumerics, `.`, `-` and `_`; everything else becomes `_`.
/// Leading dots are dropped so the result is never hidden or relative.
pub fn sanitize_file_name(file_name: &str) -> String {
    // Browsers may hand over a full client path.
    let base = file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(file_name);

    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() || cleaned.chars().all(|c| c == '_' || c == '.') {
        return FALLBACK_FILE_NAME.to_string();
    }
    cleaned.to_string()
}
