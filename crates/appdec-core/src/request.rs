//! Install request and component name validation

use crate::error::InstallError;
use std::path::{Path, PathBuf};

/// Inputs for a single install, built once by the CLI and read-only afterwards
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallRequest {
    /// Component name, already lower-cased by the caller
    pub name: String,
    /// Directory the component directory is created in
    pub root_path: PathBuf,
    /// Pinned version of the primary package, also written to the config file
    pub version: String,
    /// Names the generated `<tool_name>.json`
    pub tool_name: String,
    /// Echo package manager commands instead of running them
    pub debug: bool,
}

impl InstallRequest {
    pub fn new(
        name: impl Into<String>,
        root_path: impl Into<PathBuf>,
        version: impl Into<String>,
        tool_name: impl Into<String>,
        debug: bool,
    ) -> Self {
        Self {
            name: name.into(),
            root_path: root_path.into(),
            version: version.into(),
            tool_name: tool_name.into(),
            debug,
        }
    }

    /// `<root_path>/<name>`, the directory the component lives in
    pub fn app_path(&self) -> PathBuf {
        self.root_path.join(&self.name)
    }

    /// `<app_path>/<tool_name>.json`
    pub fn config_path(&self) -> PathBuf {
        self.app_path().join(format!("{}.json", self.tool_name))
    }
}

/// Check a component name before anything touches the filesystem
///
/// Empty and whitespace-only names are missing. Names that would resolve
/// outside the root directory are invalid.
pub fn validate_name(name: &str, reserved: &[&str]) -> Result<(), InstallError> {
    if name.trim().is_empty() {
        return Err(InstallError::NoModuleName);
    }

    if reserved.contains(&name) {
        return Err(InstallError::ReservedName {
            name: name.to_string(),
        });
    }

    let mut components = Path::new(name).components();
    let single_normal = matches!(
        (components.next(), components.next()),
        (Some(std::path::Component::Normal(_)), None)
    );
    if !single_normal || name.contains(['/', '\\']) {
        return Err(InstallError::InvalidName {
            name: name.to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::DEFAULT_RESERVED_NAMES;

    #[test]
    fn test_paths_derive_from_request() {
        let request = InstallRequest::new("collapsible", "/work", "0.8.221", "appdec", false);

        assert_eq!(request.app_path(), PathBuf::from("/work/collapsible"));
        assert_eq!(
            request.config_path(),
            PathBuf::from("/work/collapsible/appdec.json")
        );
    }

    #[test]
    fn test_blank_names_are_missing() {
        for name in ["", " ", "\t", "  \n "] {
            assert!(matches!(
                validate_name(name, DEFAULT_RESERVED_NAMES),
                Err(InstallError::NoModuleName)
            ));
        }
    }

    #[test]
    fn test_reserved_names_rejected() {
        for name in ["commands", "osx"] {
            assert!(matches!(
                validate_name(name, DEFAULT_RESERVED_NAMES),
                Err(InstallError::ReservedName { .. })
            ));
        }
    }

    #[test]
    fn test_path_like_names_rejected() {
        for name in [".", "..", "a/b", "../up", "/abs", "a\\b"] {
            assert!(
                matches!(
                    validate_name(name, DEFAULT_RESERVED_NAMES),
                    Err(InstallError::InvalidName { .. })
                ),
                "{name} should be invalid"
            );
        }
    }

    #[test]
    fn test_plain_names_accepted() {
        for name in ["collapsible", "my-module", "box2"] {
            assert!(validate_name(name, DEFAULT_RESERVED_NAMES).is_ok());
        }
    }
}
