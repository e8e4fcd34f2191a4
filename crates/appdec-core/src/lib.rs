//! Appdec Core - Library behind the `appdec` component scaffolding CLI
//!
//! Creating a component means making a directory, letting npm fetch the
//! app-decorators package plus a pinned build dependency, dropping npm's
//! manifest, writing `<tool>.json` and copying the package's top-level
//! entries into the new directory.
//!
//! # Architecture
//!
//! - **Capabilities** - `fs` (one trait per filesystem operation), `process`
//!   (sequential shell commands) and `config` (encoding the persisted record)
//! - **Orchestration** - `install::Installer` sequences the steps over those
//!   capabilities; `remove::delete` undoes an install
//! - **Product** - `ProductConfig` supplies the tool name, version and packages
//!
//! # Example Usage
//!
//! ```ignore
//! use appdec_core::{install, InstallRequest};
//!
//! let request = InstallRequest::new("collapsible", root, config.version(), config.name(), false);
//! let report = install::run(&config, &request).await?;
//! ```

pub mod config;
pub mod error;
pub mod fs;
pub mod install;
pub mod process;
pub mod product;
pub mod remove;
pub mod request;

// Re-export main types for convenience
pub use config::{ConfigSerializer, JsonSerializer, PersistedConfig};
pub use error::{InstallError, RemoveError};
pub use fs::{FileSystem, OsFs};
pub use install::{InstallReport, Installer};
pub use process::{CommandRunner, RunnerError, ShellRunner};
pub use product::ProductConfig;
pub use request::InstallRequest;
