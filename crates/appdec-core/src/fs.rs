//! Filesystem capabilities used by the installer
//!
//! Each capability is its own trait so a test can fake exactly the operation
//! a step needs. `OsFs` implements all of them on top of `std::fs`; every
//! method maps onto a single underlying call with no batching or atomicity.

use std::ffi::OsString;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

/// Permission bits for directories created by the installer
pub const DIR_MODE: u32 = 0o755;

/// Permission bits for files created by the installer
pub const FILE_MODE: u32 = 0o644;

/// A directory entry as reported by [`ListDir`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Name as the filesystem reports it, so it can be joined back verbatim
    pub name: OsString,
    pub is_dir: bool,
}

impl Entry {
    pub fn file(name: impl Into<OsString>) -> Self {
        Self {
            name: name.into(),
            is_dir: false,
        }
    }

    pub fn dir(name: impl Into<OsString>) -> Self {
        Self {
            name: name.into(),
            is_dir: true,
        }
    }
}

/// Probe whether a directory exists and can be entered
///
/// Does not change the process working directory. `OsFs` checks that the
/// path is a directory with a search bit set; ownership is not considered.
pub trait EnterDir {
    fn enter_dir(&self, path: &Path) -> io::Result<()>;
}

pub trait CreateDir {
    fn create_dir(&self, path: &Path, mode: u32) -> io::Result<()>;
}

pub trait RemoveFile {
    fn remove_file(&self, path: &Path) -> io::Result<()>;
}

/// List the entries directly under a directory (names only, no contents)
pub trait ListDir {
    fn list_dir(&self, path: &Path) -> io::Result<Vec<Entry>>;
}

/// Copy a file byte for byte, creating the destination with [`FILE_MODE`]
pub trait CopyFile {
    fn copy_file(&self, from: &Path, to: &Path) -> io::Result<()>;
}

pub trait WriteFile {
    fn write_file(&self, path: &Path, contents: &[u8]) -> io::Result<()>;
}

pub trait RemoveDirAll {
    fn remove_dir_all(&self, path: &Path) -> io::Result<()>;
}

/// Everything the install workflow touches
pub trait FileSystem: EnterDir + CreateDir + RemoveFile + ListDir + CopyFile + WriteFile {}

impl<T> FileSystem for T where T: EnterDir + CreateDir + RemoveFile + ListDir + CopyFile + WriteFile {}

/// The real filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFs;

impl EnterDir for OsFs {
    fn enter_dir(&self, path: &Path) -> io::Result<()> {
        let metadata = fs::metadata(path)?;
        if !metadata.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::Other,
                format!("{} is not a directory", path.display()),
            ));
        }

        // chdir needs search (execute) permission, not read permission
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if metadata.permissions().mode() & 0o111 == 0 {
                return Err(io::Error::from(io::ErrorKind::PermissionDenied));
            }
        }

        Ok(())
    }
}

impl CreateDir for OsFs {
    fn create_dir(&self, path: &Path, mode: u32) -> io::Result<()> {
        let mut builder = fs::DirBuilder::new();
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(mode);
        }
        #[cfg(not(unix))]
        let _ = mode;
        builder.create(path)
    }
}

impl RemoveFile for OsFs {
    fn remove_file(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path)
    }
}

impl ListDir for OsFs {
    fn list_dir(&self, path: &Path) -> io::Result<Vec<Entry>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(path)? {
            let entry = entry?;
            entries.push(Entry {
                name: entry.file_name(),
                is_dir: entry.file_type()?.is_dir(),
            });
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }
}

impl CopyFile for OsFs {
    fn copy_file(&self, from: &Path, to: &Path) -> io::Result<()> {
        let contents = fs::read(from)?;
        self.write_file(to, &contents)
    }
}

impl WriteFile for OsFs {
    fn write_file(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        let mut options = fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(FILE_MODE);
        }
        let mut file = options.open(path)?;
        file.write_all(contents)?;
        file.flush()
    }
}

impl RemoveDirAll for OsFs {
    fn remove_dir_all(&self, path: &Path) -> io::Result<()> {
        fs::remove_dir_all(path)
    }
}
