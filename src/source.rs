use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use crate::error::EnvYamlError;

/// Name of the file looked up in the base directory.
pub const FILE_NAME: &str = ".env.yaml";

static BASE_DIR: RwLock<Option<PathBuf>> = RwLock::new(None);

/// Change the directory the free functions (`load`, `shell_escaped`,
/// `init`) read from. `None` means the current working directory.
///
/// The setting is process wide. Changing it while a load is running on
/// another thread gives that load whichever value it read first.
pub fn set_base_dir(dir: Option<PathBuf>) {
    *BASE_DIR.write().unwrap_or_else(PoisonError::into_inner) = dir;
}

pub fn base_dir() -> Option<PathBuf> {
    BASE_DIR
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// Location of a `.env.yaml` document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvFile {
    path: PathBuf,
}

impl EnvFile {
    /// `.env.yaml` inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        EnvFile {
            path: dir.as_ref().join(FILE_NAME),
        }
    }

    /// An explicit file path, whatever its name.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        EnvFile { path: path.into() }
    }

    /// The file selected by the process-wide base directory.
    pub fn from_settings() -> Self {
        match base_dir() {
            Some(dir) => EnvFile::in_dir(dir),
            None => EnvFile::at(FILE_NAME),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the document. A missing file is `Ok(None)`, not an error.
    pub fn read(&self) -> Result<Option<String>, EnvYamlError> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!("{} not found, no entries", self.path.display());
                Ok(None)
            }
            Err(e) => Err(EnvYamlError::Io(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_in_dir_appends_file_name() {
        let file = EnvFile::in_dir("testdata/needs-quoting");
        assert_eq!(file.path(), Path::new("testdata/needs-quoting/.env.yaml"));
    }

    #[test]
    fn test_missing_file_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(EnvFile::in_dir(dir.path()).read().unwrap().is_none());
    }

    #[test]
    fn test_read_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(FILE_NAME), "KEY: VALUE\n").unwrap();
        assert_eq!(
            EnvFile::in_dir(dir.path()).read().unwrap().as_deref(),
            Some("KEY: VALUE\n")
        );
    }

    #[test]
    fn test_directory_in_place_of_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join(FILE_NAME)).unwrap();
        let err = EnvFile::in_dir(dir.path()).read().unwrap_err();
        assert!(matches!(err, EnvYamlError::Io(_)));
    }

    #[test]
    #[serial]
    fn test_from_settings_follows_base_dir() {
        set_base_dir(Some(PathBuf::from("somewhere")));
        assert_eq!(
            EnvFile::from_settings().path(),
            Path::new("somewhere/.env.yaml")
        );

        set_base_dir(None);
        assert_eq!(EnvFile::from_settings().path(), Path::new(FILE_NAME));
    }
}
