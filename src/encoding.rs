//! Content Encodings
//!
//! Conversions between raw staged bytes and their textual forms on the
//! command line.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::fs::{MemFileError, Result};

/// Supported text encodings for file content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ContentEncoding {
    Utf8,
    #[default]
    Hex,
    Base64,
}

impl ContentEncoding {
    /// Decode `text` into the bytes it stands for.
    pub fn decode(self, text: &str) -> Result<Vec<u8>> {
        match self {
            Self::Utf8 => Ok(text.as_bytes().to_vec()),
            Self::Hex => hex_decode(text),
            Self::Base64 => STANDARD.decode(text.trim()).map_err(|e| MemFileError::Encoding {
                message: format!("invalid base64: {}", e),
            }),
        }
    }

    /// Render `bytes` as text.
    pub fn encode(self, bytes: &[u8]) -> String {
        match self {
            Self::Utf8 => String::from_utf8_lossy(bytes).to_string(),
            Self::Hex => hex_encode(bytes),
            Self::Base64 => STANDARD.encode(bytes),
        }
    }
}

/// Space separated lowercase hex, one pair per byte.
fn hex_encode(data: &[u8]) -> String {
    data.iter().map(|b| format!("{:02x}", b)).collect::<Vec<_>>().join(" ")
}

/// Accepts pairs with or without whitespace between them.
fn hex_decode(s: &str) -> Result<Vec<u8>> {
    let digits: Vec<char> = s.chars().filter(|c| !c.is_whitespace()).collect();
    if digits.len() % 2 != 0 {
        return Err(MemFileError::Encoding {
            message: format!("invalid hex: odd number of digits in '{}'", s),
        });
    }
    digits
        .chunks(2)
        .map(|pair| {
            let text: String = pair.iter().collect();
            u8::from_str_radix(&text, 16).map_err(|_| MemFileError::Encoding {
                message: format!("invalid hex byte '{}'", text),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex() {
        assert_eq!(ContentEncoding::Hex.encode(&[1, 2, 0x0a, 0xff]), "01 02 0a ff");
        assert_eq!(ContentEncoding::Hex.decode("01 02 0a ff").unwrap(), vec![1, 2, 0x0a, 0xff]);
        assert_eq!(ContentEncoding::Hex.decode("0102").unwrap(), vec![1, 2]);
        assert!(ContentEncoding::Hex.decode("012").is_err());
        assert!(ContentEncoding::Hex.decode("zz").is_err());
    }

    #[test]
    fn test_base64() {
        assert_eq!(ContentEncoding::Base64.encode(b"Hello, World!"), "SGVsbG8sIFdvcmxkIQ==");
        assert_eq!(ContentEncoding::Base64.decode("SGVsbG8sIFdvcmxkIQ==\n").unwrap(), b"Hello, World!");
        assert!(ContentEncoding::Base64.decode("!!!").is_err());
    }

    #[test]
    fn test_utf8() {
        assert_eq!(ContentEncoding::Utf8.decode("héllo").unwrap(), "héllo".as_bytes());
        assert_eq!(ContentEncoding::Utf8.encode(b"ok"), "ok");
    }
}
