//! XML name validation and utilities
//!
//! This module provides the XML 1.0 (Fifth Edition) `NameStartChar` and
//! `NameChar` productions and the derived grammars for `Name`, `NCName`,
//! `NMTOKEN`, `QName` and the RFC 3066 language tags of `xs:language`.

use crate::error::LanguageError;

/// Whether `c` matches the `NameStartChar` production
pub fn is_name_start_char(c: char) -> bool {
    matches!(c,
        ':' | 'A'..='Z' | '_' | 'a'..='z'
        | '\u{C0}'..='\u{D6}'
        | '\u{D8}'..='\u{F6}'
        | '\u{F8}'..='\u{2FF}'
        | '\u{370}'..='\u{37D}'
        | '\u{37F}'..='\u{1FFF}'
        | '\u{200C}'..='\u{200D}'
        | '\u{2070}'..='\u{218F}'
        | '\u{2C00}'..='\u{2FEF}'
        | '\u{3001}'..='\u{D7FF}'
        | '\u{F900}'..='\u{FDCF}'
        | '\u{FDF0}'..='\u{FFFD}'
        | '\u{10000}'..='\u{EFFFF}')
}

/// Whether `c` matches the `NameChar` production
pub fn is_name_char(c: char) -> bool {
    is_name_start_char(c)
        || matches!(c,
            '-' | '.' | '0'..='9' | '\u{B7}'
            | '\u{300}'..='\u{36F}'
            | '\u{203F}'..='\u{2040}')
}

/// Check if a string is a valid XML Name
pub fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => is_name_start_char(first) && chars.all(is_name_char),
        None => false,
    }
}

/// Check if a string is a valid NCName (non-colonized name)
pub fn is_valid_ncname(name: &str) -> bool {
    !name.contains(':') && is_valid_name(name)
}

/// Check if a string is a valid NMTOKEN
pub fn is_valid_nmtoken(token: &str) -> bool {
    !token.is_empty() && token.chars().all(is_name_char)
}

/// Check if a string is a valid QName (qualified name)
pub fn is_valid_qname(name: &str) -> bool {
    match split_qname(name) {
        (Some(prefix), local) => is_valid_ncname(prefix) && is_valid_ncname(local),
        (None, local) => is_valid_ncname(local),
    }
}

/// Split a QName into prefix and local name
pub fn split_qname(qname: &str) -> (Option<&str>, &str) {
    if let Some((prefix, local)) = qname.split_once(':') {
        (Some(prefix), local)
    } else {
        (None, qname)
    }
}

/// Validate an RFC 3066 language tag as used by `xs:language`
///
/// The primary subtag is 1 to 8 ASCII letters, and a single letter only for
/// `i` or `x`. Every later subtag is 1 to 8 ASCII letters or digits.
pub fn validate_language(tag: &str) -> Result<(), LanguageError> {
    let mut subtags = tag.split('-');

    let primary = subtags.next().unwrap_or_default();
    if primary.is_empty()
        || primary.len() > 8
        || !primary.bytes().all(|b| b.is_ascii_alphabetic())
    {
        return Err(LanguageError::PrimaryTag);
    }
    if primary.len() == 1
        && !primary.eq_ignore_ascii_case("i")
        && !primary.eq_ignore_ascii_case("x")
    {
        return Err(LanguageError::PrimaryTag);
    }

    for subtag in subtags {
        if subtag.is_empty()
            || subtag.len() > 8
            || !subtag.bytes().all(|b| b.is_ascii_alphanumeric())
        {
            return Err(LanguageError::SubsequentTag);
        }
    }

    Ok(())
}
