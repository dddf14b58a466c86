//! Decoding of blob and file content.

use super::error::ContentError;
use base64::prelude::*;

/// Decodes content as returned by the blobs and contents APIs.
///
/// GitHub wraps base64 content at 60 columns, so whitespace is stripped
/// before decoding. `utf-8` content, or content without an encoding, is
/// returned unchanged.
///
/// # Errors
///
/// Returns [`ContentError`] for unknown encodings, malformed base64 or
/// non-UTF-8 bytes.
pub fn decode_content(content: &str, encoding: Option<&str>) -> Result<String, ContentError> {
    match encoding {
        Some(encoding) if encoding.eq_ignore_ascii_case("base64") => {
            let compact: String = content.split_ascii_whitespace().collect();
            let bytes = BASE64_STANDARD.decode(compact)?;
            Ok(String::from_utf8(bytes)?)
        }
        None => Ok(content.to_string()),
        Some(encoding)
            if encoding.eq_ignore_ascii_case("utf-8") || encoding.eq_ignore_ascii_case("utf8") =>
        {
            Ok(content.to_string())
        }
        Some(other) => Err(ContentError::UnsupportedEncoding(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_wrapped_base64() {
        // {"code":"ci"} split over two lines
        let content = "eyJjb2Rl\nIjoiY2kifQ==\n";

        let decoded = decode_content(content, Some("base64")).unwrap();

        assert_eq!(decoded, r#"{"code":"ci"}"#);
    }

    #[test]
    fn passes_utf8_through() {
        assert_eq!(decode_content("{}", Some("utf-8")).unwrap(), "{}");
        assert_eq!(decode_content("{}", None).unwrap(), "{}");
    }

    #[test]
    fn rejects_unknown_encoding() {
        let result = decode_content("abc", Some("rot13"));
        assert!(matches!(result, Err(ContentError::UnsupportedEncoding(e)) if e == "rot13"));
    }

    #[test]
    fn rejects_invalid_base64() {
        let result = decode_content("not base64!!", Some("base64"));
        assert!(matches!(result, Err(ContentError::Base64(_))));
    }

    #[test]
    fn rejects_non_utf8_bytes() {
        // 0xff 0xfe
        let result = decode_content("//4=", Some("base64"));
        assert!(matches!(result, Err(ContentError::Utf8(_))));
    }
}
