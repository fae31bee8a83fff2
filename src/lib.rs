//! Load environment variables from a `.env.yaml` file.
//!
//! The file is a flat YAML mapping of names to string values. Loaded
//! entries are available as a map for populating the process environment,
//! or as sorted `KEY=VALUE` lines quoted for evaluation by a POSIX shell:
//!
//! ```no_run
//! let lines = env_yaml::shell_escaped().into_result()?;
//! for line in lines {
//!     println!("{line}");
//! }
//! # Ok::<(), env_yaml::EnvYamlError>(())
//! ```
//!
//! Keys containing `=`, `$`, `%` or unprintable characters are dropped, as
//! are values with unprintable characters when producing shell lines. Every
//! operation returns what it could keep together with the first error.

pub mod display;
pub mod env;
pub mod error;
pub mod loader;
pub mod logging;
pub mod shell;
pub mod source;
pub mod types;
pub mod validation;

pub use error::{EnvYamlError, Unprintable};
pub use shell::QuotingStyle;
pub use source::{EnvFile, FILE_NAME, base_dir, set_base_dir};
pub use types::{Env, Partial};

/// Load `.env.yaml` from the configured base directory.
pub fn load() -> Partial<Env> {
    EnvFile::from_settings().load()
}

/// Sorted, shell-quoted `KEY=VALUE` lines from the configured base
/// directory.
pub fn shell_escaped() -> Partial<Vec<String>> {
    EnvFile::from_settings().shell_escaped()
}

/// Export the configured file into the process environment, keeping any
/// variable that is already set. See [`EnvFile::try_init`].
pub fn try_init() -> Result<usize, EnvYamlError> {
    EnvFile::from_settings().try_init()
}

/// Like [`try_init`] but panics when loading reports an error.
pub fn init() {
    EnvFile::from_settings().init()
}
