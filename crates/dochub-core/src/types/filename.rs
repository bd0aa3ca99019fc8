//! Document filename helpers.

use crate::error::AppError;
use crate::result::AppResult;

/// Extension of `filename` including the leading dot, lowercased.
///
/// Returns an empty string when there is no extension.
pub fn file_ext(filename: &str) -> String {
    match filename.rfind('.') {
        Some(idx) if idx > 0 => filename[idx..].to_lowercase(),
        _ => String::new(),
    }
}

/// `filename` without its extension.
pub fn file_stem(filename: &str) -> &str {
    match filename.rfind('.') {
        Some(idx) if idx > 0 => &filename[..idx],
        _ => filename,
    }
}

/// Rejects names that would escape the tenant folder or are empty.
pub fn validate_filename(filename: &str) -> AppResult<()> {
    let trimmed = filename.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation("Filename is empty"));
    }
    if trimmed == "." || trimmed == ".." || trimmed.contains(['/', '\\', '\0']) {
        return Err(AppError::validation(format!("Invalid filename: {filename}")));
    }
    Ok(())
}
