use std::error::Error;
use std::fmt;
use std::io;

/// Position and code point of the first character that failed the
/// printability check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unprintable {
    /// Byte offset into the offending string.
    pub index: usize,
    pub ch: char,
}

#[derive(Debug)]
pub enum EnvYamlError {
    Io(io::Error),
    Yaml(serde_yaml::Error),
    Malformed(String),
    InvalidKey {
        key: String,
        unprintable: Option<Unprintable>,
    },
    InvalidValue {
        value: String,
        unprintable: Option<Unprintable>,
    },
}

impl fmt::Display for EnvYamlError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EnvYamlError::Io(e) => write!(f, "env-yaml: IO error: {}", e),
            EnvYamlError::Yaml(e) => write!(f, "env-yaml: YAML error: {}", e),
            EnvYamlError::Malformed(msg) => write!(f, "env-yaml: malformed document: {}", msg),
            EnvYamlError::InvalidKey {
                key,
                unprintable: Some(u),
            } => write!(
                f,
                "env-yaml: key ({:?}) contains unprintable character U+{:04X}",
                key, u.ch as u32
            ),
            EnvYamlError::InvalidKey { key, .. } => write!(f, "env-yaml: invalid key {:?}", key),
            EnvYamlError::InvalidValue {
                value,
                unprintable: Some(u),
            } => write!(
                f,
                "env-yaml: value ({:?}) contains unprintable character U+{:04X}",
                value, u.ch as u32
            ),
            EnvYamlError::InvalidValue { value, .. } => {
                write!(f, "env-yaml: invalid value {:?}", value)
            }
        }
    }
}

impl Error for EnvYamlError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            EnvYamlError::Io(e) => Some(e),
            EnvYamlError::Yaml(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for EnvYamlError {
    fn from(error: io::Error) -> Self {
        EnvYamlError::Io(error)
    }
}

impl From<serde_yaml::Error> for EnvYamlError {
    fn from(error: serde_yaml::Error) -> Self {
        EnvYamlError::Yaml(error)
    }
}
