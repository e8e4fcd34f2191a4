//! Product configuration trait for CLI binaries
//!
//! The installer never hardcodes package names or the tool's identity; it asks
//! the product for them. The `appdec` binary provides the concrete values.

/// Manifest file written by `npm init` and removed again after installation
pub const MANIFEST_FILE: &str = "package.json";

/// Directory the package manager installs dependencies into
pub const MODULES_DIR: &str = "node_modules";

/// Names reserved for internal use by the tool
pub const DEFAULT_RESERVED_NAMES: &[&str] = &["commands", "osx"];

/// Configuration trait for the scaffolding CLI
///
/// Each product implements this trait to define:
/// - Product identity (name, display name, version)
/// - Package manager and the dependencies it installs
/// - Names a component may not use
pub trait ProductConfig: Clone + Send + Sync + 'static {
    /// Internal tool name (used for the CLI command and `<name>.json`)
    fn name(&self) -> &'static str;

    /// Human-readable display name
    fn display_name(&self) -> &'static str;

    /// CLI version, also the pinned version of the primary package
    fn version(&self) -> &'static str;

    /// Package manager executable
    fn package_manager(&self) -> &'static str {
        "npm"
    }

    /// Package whose top-level entries become the component's core files
    fn primary_package(&self) -> &'static str;

    /// Build dependency installed next to the primary package
    fn auxiliary_package(&self) -> &'static str;

    /// Fixed version of the auxiliary package
    fn auxiliary_version(&self) -> &'static str;

    /// Component names reserved for internal use
    fn reserved_names(&self) -> &'static [&'static str] {
        DEFAULT_RESERVED_NAMES
    }

    /// Command shown to the user for removing an existing component
    fn delete_command(&self, name: &str) -> String {
        format!("{} delete --name={}", self.name(), name)
    }

    /// Commands that install the dependencies for a component pinned at `version`
    fn install_commands(&self, version: &str) -> Vec<String> {
        let pm = self.package_manager();
        vec![
            format!("{} init -y", pm),
            format!("{} install {}@{}", pm, self.primary_package(), version),
            format!(
                "{} install {}@{}",
                pm,
                self.auxiliary_package(),
                self.auxiliary_version()
            ),
        ]
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    #[derive(Clone)]
    pub(crate) struct TestConfig;

    impl ProductConfig for TestConfig {
        fn name(&self) -> &'static str {
            "appdec"
        }

        fn display_name(&self) -> &'static str {
            "App Decorators"
        }

        fn version(&self) -> &'static str {
            "0.8.221"
        }

        fn primary_package(&self) -> &'static str {
            "app-decorators"
        }

        fn auxiliary_package(&self) -> &'static str {
            "babel-cli"
        }

        fn auxiliary_version(&self) -> &'static str {
            "6.24.1"
        }
    }

    #[test]
    fn test_install_commands_in_order() {
        assert_eq!(
            TestConfig.install_commands("0.8.221"),
            vec![
                "npm init -y".to_string(),
                "npm install app-decorators@0.8.221".to_string(),
                "npm install babel-cli@6.24.1".to_string(),
            ]
        );
    }

    #[test]
    fn test_delete_command_mentions_name() {
        assert_eq!(
            TestConfig.delete_command("collapsible"),
            "appdec delete --name=collapsible"
        );
    }

    #[test]
    fn test_default_reserved_names() {
        assert!(TestConfig.reserved_names().contains(&"commands"));
        assert!(TestConfig.reserved_names().contains(&"osx"));
    }
}
