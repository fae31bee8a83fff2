use std::borrow::Cow;

use crate::error::EnvYamlError;
use crate::types::{Env, Partial};
use crate::validation::find_unprintable;

/// Characters with a meaning to a POSIX shell that force a value to be
/// quoted, and which get a backslash inside double quotes.
pub const SPECIAL: &[char] = &[
    '\\', '\'', '"', '`', '$', '{', '[', '|', '&', ';', '<', '>', '(', ')', '*', '?', '!', '\r',
    '\n',
];

/// Characters that cannot live inside single quotes.
const NOT_SINGLE_QUOTABLE: &[char] = &['\'', '\r', '\n'];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuotingStyle {
    Unquoted,
    SingleQuoted,
    DoubleQuoted,
}

/// Pick the quoting style for `value`. The checks run in a fixed order and
/// the first one that matches wins, so every value has exactly one literal.
pub fn quoting_style(value: &str) -> Result<QuotingStyle, EnvYamlError> {
    if let Some(unprintable) = find_unprintable(value) {
        return Err(EnvYamlError::InvalidValue {
            value: value.to_string(),
            unprintable: Some(unprintable),
        });
    }

    // An unquoted leading tilde is expanded to a home directory.
    if !value.starts_with('~') && !value.contains(SPECIAL) {
        return Ok(QuotingStyle::Unquoted);
    }

    if !value.contains(NOT_SINGLE_QUOTABLE) {
        return Ok(QuotingStyle::SingleQuoted);
    }

    Ok(QuotingStyle::DoubleQuoted)
}

/// Turn `value` into a literal that a POSIX shell evaluates back to the
/// same string when placed after `KEY=`.
pub fn quote(value: &str) -> Result<Cow<'_, str>, EnvYamlError> {
    let quoted = match quoting_style(value)? {
        QuotingStyle::Unquoted => Cow::Borrowed(value),
        QuotingStyle::SingleQuoted => Cow::Owned(format!("'{}'", value)),
        QuotingStyle::DoubleQuoted => Cow::Owned(double_quote(value)),
    };
    Ok(quoted)
}

fn double_quote(value: &str) -> String {
    let mut s = String::with_capacity(value.len() + 2);
    s.push('"');

    for c in value.chars() {
        match c {
            '\r' => s.push_str("\\r"),
            '\n' => s.push_str("\\n"),
            c if SPECIAL.contains(&c) => {
                s.push('\\');
                s.push(c);
            }
            c => s.push(c),
        }
    }

    s.push('"');
    s
}

/// Join a key and an already validated value into one shell assignment.
pub fn assignment(key: &str, value: &str) -> Result<String, EnvYamlError> {
    Ok(format!("{}={}", key, quote(value)?))
}

/// Quote every value of a loaded set into sorted `KEY=VALUE` lines.
///
/// Entries whose value cannot be quoted are left out. The first quoting
/// error is reported only when loading did not already fail.
pub fn escape_all(loaded: Partial<Env>) -> Partial<Vec<String>> {
    let (env, error) = loaded.into_parts();
    let mut escaped = Partial {
        value: Vec::with_capacity(env.len()),
        error,
    };

    for (key, value) in &env {
        match assignment(key, value) {
            Ok(line) => escaped.value.push(line),
            Err(e) => {
                tracing::debug!("dropping entry {:?}: {}", key, e);
                escaped.record(e);
            }
        }
    }

    escaped.value.sort();
    escaped
}
