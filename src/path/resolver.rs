use std::{
    ffi::CString,
    fs,
    os::unix::ffi::OsStrExt,
    path::{Path, PathBuf},
};

use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error("command not found")]
    NotFound(String),
    #[error("Permission denied")]
    PermissionDenied(String),
    #[error("Is a directory")]
    IsDirectory(String),
}

impl ResolveError {
    pub fn status(&self) -> i32 {
        match self {
            ResolveError::NotFound(_) => 127,
            ResolveError::PermissionDenied(_) | ResolveError::IsDirectory(_) => 126,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct PathResolver;

impl PathResolver {
    pub fn new() -> Self {
        Self
    }

    /// Resolves `command` against `search_path` (a `PATH` value).
    ///
    /// Words containing `/` are taken literally. Otherwise the first executable
    /// regular file among the `PATH` entries wins, falling back to `command`
    /// relative to the working directory.
    pub fn resolve(
        &self,
        command: &str,
        search_path: Option<&str>,
    ) -> Result<PathBuf, ResolveError> {
        if command.contains('/') {
            return self.check_literal(command);
        }

        let mut not_executable = false;
        let entries = search_path.filter(|value| !value.is_empty());
        for dir in entries.into_iter().flat_map(|value| value.split(':')) {
            let candidate = if dir.is_empty() {
                Path::new(".").join(command)
            } else {
                Path::new(dir).join(command)
            };

            match probe(&candidate) {
                Probe::Executable => {
                    debug!(command, path = %candidate.display(), "resolved via PATH");
                    return Ok(candidate);
                }
                Probe::NotExecutable => not_executable = true,
                Probe::Directory | Probe::Missing => {}
            }
        }

        let local = Path::new(".").join(command);
        match probe(&local) {
            Probe::Executable => {
                debug!(command, "resolved in working directory");
                Ok(local)
            }
            _ if not_executable => Err(ResolveError::PermissionDenied(command.to_string())),
            _ => Err(ResolveError::NotFound(command.to_string())),
        }
    }

    fn check_literal(&self, command: &str) -> Result<PathBuf, ResolveError> {
        let path = PathBuf::from(command);
        match probe(&path) {
            Probe::Executable => Ok(path),
            Probe::NotExecutable => Err(ResolveError::PermissionDenied(command.to_string())),
            Probe::Directory => Err(ResolveError::IsDirectory(command.to_string())),
            Probe::Missing => Err(ResolveError::NotFound(command.to_string())),
        }
    }
}

enum Probe {
    Executable,
    NotExecutable,
    Directory,
    Missing,
}

fn probe(path: &Path) -> Probe {
    match fs::metadata(path) {
        Ok(meta) if meta.is_dir() => Probe::Directory,
        Ok(meta) if meta.is_file() => {
            if is_executable(path) {
                Probe::Executable
            } else {
                Probe::NotExecutable
            }
        }
        _ => Probe::Missing,
    }
}

fn is_executable(path: &Path) -> bool {
    let Ok(c_path) = CString::new(path.as_os_str().as_bytes()) else {
        return false;
    };
    unsafe { libc::access(c_path.as_ptr(), libc::X_OK) == 0 }
}
