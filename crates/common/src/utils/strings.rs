/// Interprets a right-padded byte string (e.g. a `bytes32` symbol) as UTF-8, dropping the
/// trailing null bytes. Returns `None` if nothing is left or the bytes aren't valid UTF-8.
///
/// ```
/// use deltascope_common::utils::strings::from_null_padded;
///
/// let mut word = [0u8; 32];
/// word[..3].copy_from_slice(b"MKR");
/// assert_eq!(from_null_padded(&word), Some(String::from("MKR")));
/// assert_eq!(from_null_padded(&[0u8; 32]), None);
/// ```
pub fn from_null_padded(bytes: &[u8]) -> Option<String> {
    let end = bytes.iter().rposition(|b| *b != 0).map(|i| i + 1)?;
    let s = std::str::from_utf8(&bytes[..end]).ok()?;
    if s.chars().any(char::is_control) {
        return None;
    }
    Some(s.to_string())
}

#[cfg(test)]
mod tests {
    use crate::utils::strings::*;

    #[test]
    fn test_from_null_padded() {
        let mut word = [0u8; 32];
        word[..4].copy_from_slice(b"PUNK");
        assert_eq!(from_null_padded(&word), Some(String::from("PUNK")));

        // non-utf8 garbage is rejected
        let mut word = [0u8; 32];
        word[0] = 0xff;
        assert_eq!(from_null_padded(&word), None);

        // control characters are rejected
        let mut word = [0u8; 32];
        word[0] = 0x01;
        assert_eq!(from_null_padded(&word), None);
    }
}
