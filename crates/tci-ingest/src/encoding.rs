//! Decoding of uploaded text files.

use encoding_rs::{Encoding, WINDOWS_1252};

use crate::error::{IngestError, Result};

/// Decodes an uploaded file into text.
///
/// A byte order mark selects UTF-8, UTF-16LE or UTF-16BE and is stripped.
/// Without one the bytes are read as UTF-8, falling back to Windows-1252
/// when they are not valid UTF-8 (spreadsheet exports on Windows).
pub fn decode_upload(bytes: &[u8]) -> Result<String> {
    if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        let (text, had_errors) = encoding.decode_without_bom_handling(&bytes[bom_len..]);
        if had_errors {
            return Err(IngestError::UnsupportedEncoding {
                encoding: encoding.name(),
            });
        }
        tracing::debug!(encoding = encoding.name(), "decoded upload using byte order mark");
        return Ok(text.into_owned());
    }

    match std::str::from_utf8(bytes) {
        Ok(text) => Ok(text.to_string()),
        Err(_) => {
            let (text, _) = WINDOWS_1252.decode_without_bom_handling(bytes);
            tracing::debug!("upload is not valid UTF-8, decoded as Windows-1252");
            Ok(text.into_owned())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_utf8() {
        assert_eq!(decode_upload("Title,Status".as_bytes()).unwrap(), "Title,Status");
    }

    #[test]
    fn test_utf8_bom_is_stripped() {
        let bytes = [0xEF, 0xBB, 0xBF, b'T', b'C'];
        assert_eq!(decode_upload(&bytes).unwrap(), "TC");
    }

    #[test]
    fn test_utf16le_bom() {
        let bytes = [0xFF, 0xFE, b'O', 0, b'K', 0];
        assert_eq!(decode_upload(&bytes).unwrap(), "OK");
    }

    #[test]
    fn test_utf16be_bom() {
        let bytes = [0xFE, 0xFF, 0, b'O', 0, b'K'];
        assert_eq!(decode_upload(&bytes).unwrap(), "OK");
    }

    #[test]
    fn test_windows_1252_fallback() {
        // "Café" with a Windows-1252 e-acute
        let bytes = [b'C', b'a', b'f', 0xE9];
        assert_eq!(decode_upload(&bytes).unwrap(), "Café");
    }

    #[test]
    fn test_truncated_utf16_is_rejected() {
        let bytes = [0xFF, 0xFE, b'O'];
        assert!(matches!(
            decode_upload(&bytes),
            Err(IngestError::UnsupportedEncoding { encoding: "UTF-16LE" })
        ));
    }
}
