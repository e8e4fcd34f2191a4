//! Error types for installing and removing components

use crate::config::SerializeError;
use crate::process::RunnerError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failures of the install workflow, one variant per step
///
/// Nothing is rolled back: when a later step fails, whatever earlier steps
/// created stays on disk and the user deletes it manually.
#[derive(Debug, Error)]
pub enum InstallError {
    #[error("Please set module name e.g. 'appdec create --name=mymodule'")]
    NoModuleName,

    #[error("Can't install module as '{name}' because it's reserved")]
    ReservedName { name: String },

    #[error("'{name}' is not a valid module name")]
    InvalidName { name: String },

    #[error("'{name}' already created\nYou can delete it with '{hint}'")]
    AppPathExists { name: String, hint: String },

    #[error("Failed to create {}", .path.display())]
    CreateAppPathFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Created {} but can't change into it", .path.display())]
    CantChangeToAppPath {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to install dependencies")]
    DependencyInstallFailed {
        #[source]
        source: RunnerError,
    },

    #[error("Failed to remove {}", .path.display())]
    CleanupFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to encode configuration")]
    SerializeConfigFailed {
        #[source]
        source: SerializeError,
    },

    #[error("Failed to write {}", .path.display())]
    WriteConfigFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to list core files in {}", .path.display())]
    ListCoreFilesFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to copy {} to {}", .from.display(), .to.display())]
    CopyFailed {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Failures of the delete command
#[derive(Debug, Error)]
pub enum RemoveError {
    #[error(transparent)]
    Name(InstallError),

    #[error("Component '{name}' does not exist")]
    NotInstalled { name: String },

    #[error("Failed to delete {}", .path.display())]
    RemoveFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_path_exists_carries_hint() {
        let err = InstallError::AppPathExists {
            name: "collapsible".to_string(),
            hint: "appdec delete --name=collapsible".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("'collapsible' already created"));
        assert!(message.contains("appdec delete --name=collapsible"));
    }

    #[test]
    fn test_io_source_is_exposed() {
        use std::error::Error as _;

        let err = InstallError::CleanupFailed {
            path: PathBuf::from("/tmp/x/package.json"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.source().is_some());
        assert!(err.to_string().contains("package.json"));
    }
}
