use unicode_general_category::{GeneralCategory, get_general_category};

use crate::error::{EnvYamlError, Unprintable};

/// Characters that may never appear in a key.
pub const FORBIDDEN_KEY_CHARS: &[char] = &['=', '$', '%'];

/// Tolerated in keys and values even though they are not printable.
const ALLOWED_UNPRINTABLE: &[char] = &['\t', '\r', '\n'];

/// Printable means a letter, mark, number, punctuation, symbol or the ASCII
/// space. Everything else is unprintable unless it is tab, CR or LF.
pub fn is_unprintable(c: char) -> bool {
    !is_printable(c) && !ALLOWED_UNPRINTABLE.contains(&c)
}

fn is_printable(c: char) -> bool {
    if c == ' ' {
        return true;
    }

    !matches!(
        get_general_category(c),
        GeneralCategory::Control
            | GeneralCategory::Format
            | GeneralCategory::Surrogate
            | GeneralCategory::PrivateUse
            | GeneralCategory::Unassigned
            | GeneralCategory::SpaceSeparator
            | GeneralCategory::LineSeparator
            | GeneralCategory::ParagraphSeparator
    )
}

/// First character of `s` failing [`is_unprintable`], if any.
pub fn find_unprintable(s: &str) -> Option<Unprintable> {
    s.char_indices()
        .find(|&(_, c)| is_unprintable(c))
        .map(|(index, ch)| Unprintable { index, ch })
}

/// Validate a key for use on the left-hand side of `KEY=VALUE`.
pub fn validate_key(key: &str) -> Result<(), EnvYamlError> {
    let unprintable = find_unprintable(key);
    if unprintable.is_none() && !key.contains(FORBIDDEN_KEY_CHARS) {
        return Ok(());
    }

    Err(EnvYamlError::InvalidKey {
        key: key.to_string(),
        unprintable,
    })
}
