use crate::shared::error::SbomError;
use crate::shared::Result;
use std::fs;
use std::path::Path;

/// Largest SBOM or config file we are willing to load (100 MB)
pub const MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// Checks that `path` exists, is a regular file (not a symlink) and is at most `max_size` bytes.
///
/// Symlinks are checked with `symlink_metadata()` so the link itself is inspected rather than
/// its target.
///
/// # Errors
/// - [`SbomError::FileReadError`] if metadata cannot be read
/// - [`SbomError::SecurityError`] for symlinks and oversized files
/// - [`SbomError::Validation`] if the path is not a regular file
pub fn validate_input_file(path: &Path, file_description: &str, max_size: u64) -> Result<()> {
    let metadata = fs::symlink_metadata(path).map_err(|e| SbomError::FileReadError {
        path: path.to_path_buf(),
        details: format!("Failed to read {} metadata: {}", file_description, e),
    })?;

    if metadata.is_symlink() {
        return Err(SbomError::SecurityError {
            path: path.to_path_buf(),
            reason: format!("{} is a symbolic link", file_description),
            hint: "Pass the path of the real file instead of a link".to_string(),
        }
        .into());
    }

    if !metadata.is_file() {
        return Err(SbomError::Validation {
            message: format!("{} is not a regular file", path.display()),
        }
        .into());
    }

    if metadata.len() > max_size {
        return Err(SbomError::SecurityError {
            path: path.to_path_buf(),
            reason: format!(
                "{} is too large ({} bytes, maximum {} bytes)",
                file_description,
                metadata.len(),
                max_size
            ),
            hint: "Split the SBOM or scan a smaller target".to_string(),
        }
        .into());
    }

    Ok(())
}

/// Reads a file after [`validate_input_file`] accepted it.
pub fn read_checked(path: &Path, file_description: &str) -> Result<String> {
    validate_input_file(path, file_description, MAX_FILE_SIZE)?;

    fs::read_to_string(path).map_err(|e| {
        SbomError::FileReadError {
            path: path.to_path_buf(),
            details: e.to_string(),
        }
        .into()
    })
}
