use std::collections::HashMap;

use crate::error::EnvYamlError;

/// Validated key/value pairs loaded from a `.env.yaml` file.
pub type Env = HashMap<String, String>;

/// A best-effort result together with the first error met while producing
/// it. Entries that failed are left out of `value`; processing went on
/// after the failure.
#[derive(Debug)]
pub struct Partial<T> {
    pub value: T,
    pub error: Option<EnvYamlError>,
}

impl<T> Partial<T> {
    pub fn ok(value: T) -> Self {
        Partial { value, error: None }
    }

    pub fn with_error(value: T, error: EnvYamlError) -> Self {
        Partial {
            value,
            error: Some(error),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// Keep `error` only if no earlier error was recorded.
    pub fn record(&mut self, error: EnvYamlError) {
        if self.error.is_none() {
            self.error = Some(error);
        }
    }

    pub fn into_parts(self) -> (T, Option<EnvYamlError>) {
        (self.value, self.error)
    }

    /// Discard the partial value when an error was recorded.
    pub fn into_result(self) -> Result<T, EnvYamlError> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.value),
        }
    }
}

impl<T: Default> Default for Partial<T> {
    fn default() -> Self {
        Partial::ok(T::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn malformed(msg: &str) -> EnvYamlError {
        EnvYamlError::Malformed(msg.to_string())
    }

    #[test]
    fn test_first_error_wins() {
        let mut partial = Partial::ok(Vec::<u8>::new());
        partial.record(malformed("first"));
        partial.record(malformed("second"));

        match partial.error {
            Some(EnvYamlError::Malformed(ref msg)) => assert_eq!(msg, "first"),
            ref other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_into_result() {
        assert_eq!(Partial::ok(3).into_result().unwrap(), 3);
        assert!(Partial::with_error(3, malformed("x")).into_result().is_err());
    }

    #[test]
    fn test_into_parts_keeps_error() {
        let (value, error) = Partial::with_error(2, malformed("x")).into_parts();
        assert_eq!(value, 2);
        assert!(error.is_some());
    }
}
