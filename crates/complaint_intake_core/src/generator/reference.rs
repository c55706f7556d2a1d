//! Identifier generation.
//!
//! Two different tokens exist: the short complaint ID under which a record is
//! stored, and the letter reference printed inside each generated envelope.

use uuid::Uuid;

const BASE36: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

fn to_base36(mut value: u128) -> String {
    if value == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while value > 0 {
        digits.push(BASE36[(value % 36) as usize]);
        value /= 36;
    }
    digits.reverse();
    String::from_utf8(digits).unwrap_or_default()
}

/// Eight uppercase hex digits taken from a random v4 UUID, e.g. `9F1C02AB`.
pub fn new_complaint_id() -> String {
    Uuid::new_v4().simple().to_string()[..8].to_uppercase()
}

/// `CMP` + base-36 millisecond clock + five random base-36 characters.
pub fn new_letter_reference(unix_millis: i64) -> String {
    let random = Uuid::new_v4().as_u128() % 36u128.pow(5);
    format!(
        "CMP{}{:0>5}",
        to_base36(unix_millis.max(0) as u128),
        to_base36(random)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn complaint_ids_are_short_uppercase_tokens() {
        let id = new_complaint_id();
        assert_eq!(id.len(), 8);
        assert!(id.chars().all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
    }

    #[test]
    fn complaint_ids_do_not_repeat() {
        let ids: HashSet<String> = (0..1000).map(|_| new_complaint_id()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn base36_encoding() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "Z");
        assert_eq!(to_base36(36), "10");
    }

    #[test]
    fn letter_reference_layout() {
        let reference = new_letter_reference(1_700_000_000_000);
        assert!(reference.starts_with("CMPLOYW3V28"));
        // 8 clock digits for this instant plus the 5 random ones.
        assert_eq!(reference.len(), 3 + 8 + 5);
        assert!(reference.chars().all(|c| c.is_ascii_alphanumeric()));
    }
}
