//! Validation rules for client file uploads.
//!
//! Deliverable and intake uploads are checked here before any byte is
//! accepted: extension allow-list, per-file size ceiling, and a cap on how
//! many files a single request may carry. Storage itself lives outside this
//! crate; these rules only decide what is allowed in.

use crate::error::CoreError;

/// Largest accepted file, in bytes (25 MB).
pub const MAX_FILE_BYTES: i64 = 25 * 1024 * 1024;

/// Most files accepted in a single upload request. Extra entries are
/// dropped, not rejected.
pub const MAX_FILES_PER_UPLOAD: usize = 10;

/// Lower-cased extensions accepted for upload.
pub const ALLOWED_EXTENSIONS: [&str; 7] = ["jpg", "jpeg", "png", "webp", "pdf", "zip", "dwg"];

/// Extract the lower-cased extension from a file name.
fn extension(file_name: &str) -> Option<String> {
    let (stem, ext) = file_name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// Validate a single file's name and declared size.
///
/// Runs before anything is written, so an oversized or disallowed file
/// never touches storage.
pub fn validate_file(file_name: &str, size_bytes: i64) -> Result<(), CoreError> {
    let ext = extension(file_name).ok_or_else(|| {
        CoreError::Validation(format!("File '{file_name}' has no extension"))
    })?;

    if !ALLOWED_EXTENSIONS.contains(&ext.as_str()) {
        return Err(CoreError::Validation(format!(
            "File type '.{ext}' is not accepted; allowed: {}",
            ALLOWED_EXTENSIONS.join(", ")
        )));
    }

    if size_bytes <= 0 {
        return Err(CoreError::Validation(format!(
            "File '{file_name}' is empty"
        )));
    }

    if size_bytes > MAX_FILE_BYTES {
        return Err(CoreError::Validation(format!(
            "File '{file_name}' is {size_bytes} bytes; the limit is {MAX_FILE_BYTES}"
        )));
    }

    Ok(())
}

/// Cap a batch at [`MAX_FILES_PER_UPLOAD`] entries, keeping request order.
pub fn cap_file_count<T>(mut files: Vec<T>) -> Vec<T> {
    files.truncate(MAX_FILES_PER_UPLOAD);
    files
}
