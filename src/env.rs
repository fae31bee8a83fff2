use std::env;

use crate::error::EnvYamlError;
use crate::source::EnvFile;
use crate::types::Env;

/// Whether the OS accepts `key=value` as an environment entry. Validated
/// keys never contain `=` or NUL, but may be empty.
fn is_exportable(key: &str, value: &str) -> bool {
    !key.is_empty() && !value.contains('\0')
}

/// Entries of `loaded` that are not already present in the process
/// environment. Existing variables always win, even when empty. Entries the
/// OS cannot hold (empty key, NUL in the value) are skipped.
pub fn missing_from_process(loaded: &Env) -> Env {
    loaded
        .iter()
        .filter(|(key, value)| {
            if is_exportable(key, value) {
                return true;
            }
            tracing::warn!("skipping {:?}: not representable in the environment", key);
            false
        })
        .filter(|(key, _)| env::var_os(key).is_none())
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

impl EnvFile {
    /// Load the file and export its entries into the process environment
    /// without overriding variables that are already set.
    ///
    /// Nothing is exported when loading reports any error. Returns the
    /// number of variables that were set.
    ///
    /// Mutating the environment is only sound while no other thread reads
    /// or writes it, so call this early in `main`.
    pub fn try_init(&self) -> Result<usize, EnvYamlError> {
        let loaded = self.load().into_result()?;
        let missing = missing_from_process(&loaded);

        for (key, value) in &missing {
            // SAFETY: callers run this before spawning threads, see above.
            unsafe { env::set_var(key, value) };
        }

        tracing::debug!(
            "set {} of {} variables from {}",
            missing.len(),
            loaded.len(),
            self.path().display()
        );
        Ok(missing.len())
    }

    /// Like [`EnvFile::try_init`] but a load error is fatal.
    pub fn init(&self) {
        if let Err(e) = self.try_init() {
            panic!("{}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs;

    fn env_file(content: &str) -> (tempfile::TempDir, EnvFile) {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(".env.yaml"), content).unwrap();
        let file = EnvFile::in_dir(dir.path());
        (dir, file)
    }

    #[test]
    #[serial]
    fn test_existing_variables_win() {
        let (_dir, file) = env_file("ENV_YAML_TEST_DUP: NEW\nENV_YAML_TEST_KEY: VALUE\n");
        unsafe {
            env::set_var("ENV_YAML_TEST_DUP", "OLD");
            env::remove_var("ENV_YAML_TEST_KEY");
        }

        assert_eq!(file.try_init().unwrap(), 1);
        assert_eq!(env::var("ENV_YAML_TEST_DUP").unwrap(), "OLD");
        assert_eq!(env::var("ENV_YAML_TEST_KEY").unwrap(), "VALUE");

        unsafe {
            env::remove_var("ENV_YAML_TEST_DUP");
            env::remove_var("ENV_YAML_TEST_KEY");
        }
    }

    #[test]
    #[serial]
    fn test_error_sets_nothing() {
        let (_dir, file) = env_file("ENV_YAML_TEST_VALID: VALUE\n\"IN=VALID\": VALUE\n");
        unsafe { env::remove_var("ENV_YAML_TEST_VALID") };

        assert!(file.try_init().is_err());
        assert!(env::var_os("ENV_YAML_TEST_VALID").is_none());
    }

    #[test]
    #[serial]
    #[should_panic(expected = "env-yaml: invalid key")]
    fn test_init_panics_on_invalid_key() {
        let (_dir, file) = env_file("\"IN$VALID\": VALUE\n");
        file.init();
    }

    #[test]
    #[serial]
    fn test_missing_from_process() {
        unsafe { env::set_var("ENV_YAML_TEST_PRESENT", "") };
        let loaded: Env = [
            ("ENV_YAML_TEST_PRESENT".to_string(), "x".to_string()),
            ("ENV_YAML_TEST_ABSENT".to_string(), "y".to_string()),
        ]
        .into_iter()
        .collect();

        let missing = missing_from_process(&loaded);
        assert_eq!(missing.len(), 1);
        assert_eq!(missing["ENV_YAML_TEST_ABSENT"], "y");

        unsafe { env::remove_var("ENV_YAML_TEST_PRESENT") };
    }

    #[test]
    #[serial]
    fn test_empty_key_is_skipped() {
        let (_dir, file) = env_file("\"\": VALUE\nENV_YAML_TEST_BESIDE_EMPTY: VALUE\n");
        unsafe { env::remove_var("ENV_YAML_TEST_BESIDE_EMPTY") };

        assert!(file.load().is_ok());
        assert_eq!(file.try_init().unwrap(), 1);
        assert_eq!(env::var("ENV_YAML_TEST_BESIDE_EMPTY").unwrap(), "VALUE");

        unsafe { env::remove_var("ENV_YAML_TEST_BESIDE_EMPTY") };
    }

    #[test]
    #[serial]
    fn test_nul_in_value_is_skipped() {
        let (_dir, file) = env_file("ENV_YAML_TEST_NUL: \"a\\0b\"\nENV_YAML_TEST_PLAIN: b\n");
        unsafe {
            env::remove_var("ENV_YAML_TEST_NUL");
            env::remove_var("ENV_YAML_TEST_PLAIN");
        }

        let loaded = file.load();
        assert!(loaded.is_ok());
        assert_eq!(loaded.value["ENV_YAML_TEST_NUL"], "a\0b");

        assert_eq!(file.try_init().unwrap(), 1);
        assert!(env::var_os("ENV_YAML_TEST_NUL").is_none());
        assert_eq!(env::var("ENV_YAML_TEST_PLAIN").unwrap(), "b");

        unsafe { env::remove_var("ENV_YAML_TEST_PLAIN") };
    }

    #[test]
    fn test_missing_file_sets_nothing() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(EnvFile::in_dir(dir.path()).try_init().unwrap(), 0);
    }
}
