//! Small utility helpers used across modules.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::error::CoreError;

/// Encode text with the transport encoding used on every wire boundary
/// (stored boilerplate/driver, judge submissions, judge stdout).
pub fn encode_text(s: &str) -> String {
  STANDARD.encode(s.as_bytes())
}

/// Decode transport-encoded text back into a UTF-8 string.
/// Exact inverse of [`encode_text`]; anything else is a `DecodeError`.
pub fn decode_text(b64: &str) -> Result<String, CoreError> {
  let bytes = STANDARD
    .decode(b64.trim())
    .map_err(|e| CoreError::Decode(format!("invalid base64: {}", e)))?;
  String::from_utf8(bytes).map_err(|e| CoreError::Decode(format!("invalid UTF-8: {}", e)))
}

/// Log-safe truncation for large strings.
/// Avoids spamming logs with huge request/response payloads.
pub fn trunc_for_log(s: &str, max: usize) -> String {
  if s.len() <= max {
    s.to_string()
  } else {
    let mut cut = max;
    while !s.is_char_boundary(cut) {
      cut -= 1;
    }
    format!("{}… ({} bytes total)", &s[..cut], s.len())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn encode_decode_are_exact_inverses() {
    for s in ["", "print('hi')", "def solve(n):\n    return n * 2\n", "输入→输出 ✓"] {
      assert_eq!(decode_text(&encode_text(s)).unwrap(), s);
    }
  }

  #[test]
  fn decode_rejects_garbage() {
    assert!(matches!(decode_text("!!not base64!!"), Err(CoreError::Decode(_))));
  }

  #[test]
  fn trunc_keeps_short_strings() {
    assert_eq!(trunc_for_log("abc", 10), "abc");
    assert!(trunc_for_log(&"x".repeat(100), 10).starts_with("xxxxxxxxxx"));
  }
}
