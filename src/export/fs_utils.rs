use crate::errors::{AppError, AppResult};
use std::fs;
use std::path::Path;

/// Refuse to overwrite an existing file unless `force` is set, and create the
/// parent directory when it is missing.
pub(crate) fn ensure_writable(path: &Path, force: bool) -> AppResult<()> {
    if path.exists() && !force {
        return Err(AppError::Export(format!(
            "'{}' already exists; pass --force to overwrite it",
            path.display()
        )));
    }
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}
