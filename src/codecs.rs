//! Base64 and hex codecs
//!
//! Strict decoders for the lexical spaces of `xs:base64Binary` and
//! `xs:hexBinary`, and the encoders producing their canonical forms.

use base64::Engine;
use thiserror::Error;

/// Failure to decode binary text
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodecError {
    /// A character outside the alphabet
    #[error("invalid character {character:?} at position {position}")]
    InvalidCharacter {
        /// Offending character
        character: char,
        /// Character position in the input
        position: usize,
    },

    /// Input length is not a multiple of the group size
    #[error("invalid length {0}")]
    InvalidLength(usize),

    /// `=` outside the last two positions of the final group
    #[error("misplaced padding at position {0}")]
    MisplacedPadding(usize),

    /// Bits below the last encoded octet are not zero
    #[error("non-zero trailing bits")]
    TrailingBits,
}

fn is_base64_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '+' || c == '/'
}

/// Decode base64 text made of complete four-character groups
///
/// Padding is only accepted as `xx==` or `xxx=` in the final group. The empty
/// string decodes to zero octets. Whitespace is not skipped.
pub fn decode_base64(text: &str) -> Result<Vec<u8>, CodecError> {
    if text.is_empty() {
        return Ok(Vec::new());
    }

    let chars: Vec<char> = text.chars().collect();
    for (position, &character) in chars.iter().enumerate() {
        if character != '=' && !is_base64_char(character) {
            return Err(CodecError::InvalidCharacter {
                character,
                position,
            });
        }
    }
    if chars.len() % 4 != 0 {
        return Err(CodecError::InvalidLength(chars.len()));
    }

    let last_group = chars.len() - 4;
    for (position, &character) in chars.iter().enumerate() {
        if character != '=' {
            continue;
        }
        let offset = position.checked_sub(last_group);
        let allowed = match offset {
            Some(3) => true,
            Some(2) => chars[last_group + 3] == '=',
            _ => false,
        };
        if !allowed {
            return Err(CodecError::MisplacedPadding(position));
        }
    }

    base64::engine::general_purpose::STANDARD
        .decode(text)
        .map_err(|_| CodecError::TrailingBits)
}

/// Encode octets as canonical base64 (padded, no line breaks)
pub fn encode_base64(bytes: &[u8]) -> String {
    base64::engine::general_purpose::STANDARD.encode(bytes)
}

/// Decode hex text, ignoring any whitespace between digits
pub fn decode_hex(text: &str) -> Result<Vec<u8>, CodecError> {
    let mut bytes = Vec::with_capacity(text.len() / 2);
    let mut high: Option<u8> = None;
    let mut digits = 0usize;

    for (position, character) in text.chars().enumerate() {
        if matches!(character, ' ' | '\t' | '\n' | '\r') {
            continue;
        }
        let nibble = character
            .to_digit(16)
            .ok_or(CodecError::InvalidCharacter {
                character,
                position,
            })? as u8;
        digits += 1;
        match high.take() {
            Some(h) => bytes.push(h << 4 | nibble),
            None => high = Some(nibble),
        }
    }

    if high.is_some() {
        return Err(CodecError::InvalidLength(digits));
    }
    Ok(bytes)
}

/// Encode octets as canonical (upper-case) hex
pub fn encode_hex(bytes: &[u8]) -> String {
    const DIGITS: &[u8; 16] = b"0123456789ABCDEF";
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        out.push(DIGITS[(byte >> 4) as usize] as char);
        out.push(DIGITS[(byte & 0x0F) as usize] as char);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_base64() {
        assert_eq!(decode_base64("").unwrap(), Vec::<u8>::new());
        assert_eq!(decode_base64("SGVsbG8=").unwrap(), b"Hello");
        assert_eq!(decode_base64("SGVsbA==").unwrap(), b"Hell");
        assert_eq!(decode_base64("SGVs").unwrap(), b"Hel");
    }

    #[test]
    fn test_decode_base64_rejects_bad_padding() {
        assert_eq!(decode_base64("=A=="), Err(CodecError::MisplacedPadding(0)));
        assert_eq!(decode_base64("SG=s"), Err(CodecError::MisplacedPadding(2)));
        assert_eq!(decode_base64("S==="), Err(CodecError::MisplacedPadding(1)));
        assert!(matches!(
            decode_base64("SGVsbG8=SGVs"),
            Err(CodecError::MisplacedPadding(7))
        ));
    }

    #[test]
    fn test_decode_base64_rejects_length_and_chars() {
        assert_eq!(decode_base64("SGVsbG8"), Err(CodecError::InvalidLength(7)));
        assert_eq!(decode_base64("SGVsbG8=A"), Err(CodecError::InvalidLength(9)));
        assert!(matches!(
            decode_base64("SGVs bG8="),
            Err(CodecError::InvalidCharacter { character: ' ', .. })
        ));
        assert_eq!(decode_base64("SGVsbG9="), Err(CodecError::TrailingBits));
    }

    #[test]
    fn test_encode_base64() {
        assert_eq!(encode_base64(b"Hello"), "SGVsbG8=");
        assert_eq!(encode_base64(&[]), "");
    }

    #[test]
    fn test_hex_round_trip() {
        let bytes = decode_hex("0FB7").unwrap();
        assert_eq!(bytes, vec![0x0F, 0xB7]);
        assert_eq!(encode_hex(&bytes), "0FB7");
        assert_eq!(decode_hex("0fb7").unwrap(), vec![0x0F, 0xB7]);
    }

    #[test]
    fn test_hex_whitespace_and_errors() {
        assert_eq!(decode_hex("0F B7\n").unwrap(), vec![0x0F, 0xB7]);
        assert_eq!(decode_hex("").unwrap(), Vec::<u8>::new());
        assert_eq!(decode_hex("0FB"), Err(CodecError::InvalidLength(3)));
        assert!(matches!(
            decode_hex("0gB7"),
            Err(CodecError::InvalidCharacter { character: 'g', position: 1 })
        ));
    }
}
