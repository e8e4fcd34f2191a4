//! Deleting an installed component

use crate::error::RemoveError;
use crate::fs::{EnterDir, RemoveDirAll};
use crate::request::validate_name;
use std::path::{Path, PathBuf};

/// Remove `<root>/<name>` and everything in it, returning the removed path
pub fn delete<F>(
    fs: &F,
    root: &Path,
    name: &str,
    reserved: &[&str],
) -> Result<PathBuf, RemoveError>
where
    F: EnterDir + RemoveDirAll,
{
    validate_name(name, reserved).map_err(RemoveError::Name)?;

    let app_path = root.join(name);
    if fs.enter_dir(&app_path).is_err() {
        return Err(RemoveError::NotInstalled {
            name: name.to_string(),
        });
    }

    tracing::debug!(path = %app_path.display(), "deleting component");
    fs.remove_dir_all(&app_path)
        .map_err(|source| RemoveError::RemoveFailed {
            path: app_path.clone(),
            source,
        })?;

    Ok(app_path)
}
