//! Component installation workflow
//!
//! Steps run strictly in order and every step is its own failure boundary:
//!
//! 1. Validate the component name
//! 2. Refuse to touch an existing app path
//! 3. Create the app path
//! 4. Install dependencies with the package manager
//! 5. Remove the generated manifest
//! 6. Write `<tool>.json`
//! 7. Copy the primary package's top-level entries into the app path
//!
//! Nothing is rolled back when a step fails.

use crate::config::{ConfigSerializer, JsonSerializer, PersistedConfig};
use crate::error::InstallError;
use crate::fs::{FileSystem, OsFs, DIR_MODE};
use crate::process::{CommandRunner, ShellRunner};
use crate::product::{ProductConfig, MANIFEST_FILE, MODULES_DIR};
use crate::request::{validate_name, InstallRequest};
use colored::Colorize;
use std::io;
use std::path::{Path, PathBuf};

/// What a successful install produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallReport {
    pub app_path: PathBuf,
    pub config_path: PathBuf,
    /// Top-level entries copied from the primary package, lossily decoded for display
    pub core_files: Vec<String>,
}

/// Sequences the install steps over injected collaborators
pub struct Installer<'a, C, F, R, S> {
    config: &'a C,
    fs: F,
    runner: R,
    serializer: S,
}

impl<'a, C, F, R, S> Installer<'a, C, F, R, S>
where
    C: ProductConfig,
    F: FileSystem,
    R: CommandRunner,
    S: ConfigSerializer,
{
    pub fn new(config: &'a C, fs: F, runner: R, serializer: S) -> Self {
        Self {
            config,
            fs,
            runner,
            serializer,
        }
    }

    pub async fn install(&self, request: &InstallRequest) -> Result<InstallReport, InstallError> {
        let name = request.name.as_str();
        validate_name(name, self.config.reserved_names())?;

        let app_path = request.app_path();

        if self.fs.enter_dir(&app_path).is_ok() {
            return Err(InstallError::AppPathExists {
                name: name.to_string(),
                hint: self.config.delete_command(name),
            });
        }

        tracing::debug!(path = %app_path.display(), "creating app path");
        self.fs
            .create_dir(&app_path, DIR_MODE)
            .map_err(|source| InstallError::CreateAppPathFailed {
                path: app_path.clone(),
                source,
            })?;
        self.fs
            .enter_dir(&app_path)
            .map_err(|source| InstallError::CantChangeToAppPath {
                path: app_path.clone(),
                source,
            })?;

        println!("{}", "Run: install dependencies...".cyan());
        let commands = self.config.install_commands(&request.version);
        self.runner
            .run(&commands, &app_path)
            .await
            .map_err(|source| InstallError::DependencyInstallFailed { source })?;

        let manifest = app_path.join(MANIFEST_FILE);
        tracing::debug!(path = %manifest.display(), "removing manifest");
        self.fs
            .remove_file(&manifest)
            .map_err(|source| InstallError::CleanupFailed {
                path: manifest,
                source,
            })?;

        let config_path = request.config_path();
        println!(
            "{}",
            format!("Run: create {}.json...", request.tool_name).cyan()
        );
        let persisted = PersistedConfig {
            name: request.name.clone(),
            version: request.version.clone(),
        };
        let bytes = self
            .serializer
            .serialize(&persisted)
            .map_err(|source| InstallError::SerializeConfigFailed { source })?;
        self.fs
            .write_file(&config_path, &bytes)
            .map_err(|source| InstallError::WriteConfigFailed {
                path: config_path.clone(),
                source,
            })?;

        println!("{}", "Run: create core files...".cyan());
        let package_dir = app_path
            .join(MODULES_DIR)
            .join(self.config.primary_package());
        let core_files = self.propagate(&package_dir, &app_path)?;

        println!("{}", "Run: done!".green());
        tracing::info!(
            component = name,
            core_files = core_files.len(),
            "component installed"
        );

        Ok(InstallReport {
            app_path,
            config_path,
            core_files,
        })
    }

    /// Copy every entry under `from` into `to`, returning the names copied
    ///
    /// Stops at the first failure and leaves already copied entries in place.
    fn propagate(&self, from: &Path, to: &Path) -> Result<Vec<String>, InstallError> {
        let entries = self
            .fs
            .list_dir(from)
            .map_err(|source| InstallError::ListCoreFilesFailed {
                path: from.to_path_buf(),
                source,
            })?;

        let mut copied = Vec::with_capacity(entries.len());
        for entry in entries {
            let src = from.join(&entry.name);
            let dst = to.join(&entry.name);

            if entry.is_dir {
                self.copy_dir(&src, &dst)?;
            } else {
                tracing::debug!(from = %src.display(), to = %dst.display(), "copying");
                self.fs
                    .copy_file(&src, &dst)
                    .map_err(|source| copy_failed(&src, &dst, source))?;
            }
            copied.push(entry.name.to_string_lossy().into_owned());
        }

        Ok(copied)
    }

    fn copy_dir(&self, src: &Path, dst: &Path) -> Result<(), InstallError> {
        match self.fs.create_dir(dst, DIR_MODE) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {}
            Err(source) => return Err(copy_failed(src, dst, source)),
        }

        let entries = self
            .fs
            .list_dir(src)
            .map_err(|source| copy_failed(src, dst, source))?;

        for entry in entries {
            let from = src.join(&entry.name);
            let to = dst.join(&entry.name);
            if entry.is_dir {
                self.copy_dir(&from, &to)?;
            } else {
                self.fs
                    .copy_file(&from, &to)
                    .map_err(|source| copy_failed(&from, &to, source))?;
            }
        }

        Ok(())
    }
}

fn copy_failed(from: &Path, to: &Path, source: io::Error) -> InstallError {
    InstallError::CopyFailed {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        source,
    }
}

/// Install a component using the real filesystem, shell and JSON encoding
pub async fn run<C: ProductConfig>(
    config: &C,
    request: &InstallRequest,
) -> Result<InstallReport, InstallError> {
    Installer::new(
        config,
        OsFs,
        ShellRunner::new(request.debug),
        JsonSerializer,
    )
    .install(request)
    .await
}
