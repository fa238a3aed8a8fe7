//! Phone number utilities

use once_cell::sync::Lazy;
use regex::Regex;

// E.164: leading +, non-zero country digit, up to 15 digits total
static E164_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\+[1-9]\d{1,14}$").unwrap()
});

/// Normalize a phone number by removing common formatting characters
pub fn normalize_phone_number(phone: &str) -> String {
    phone
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect()
}

/// Check if an already-normalized number is in E.164 format
pub fn is_valid_e164(phone: &str) -> bool {
    E164_REGEX.is_match(phone)
}

/// Normalize and validate in one step
///
/// # Returns
/// * `Some(String)` - The E.164 number
/// * `None` - Input is not a valid international number
pub fn parse_e164(phone: &str) -> Option<String> {
    let normalized = normalize_phone_number(phone.trim());
    is_valid_e164(&normalized).then_some(normalized)
}

/// Mask a phone number for logs (e.g., +15****0000)
pub fn mask_phone_number(phone: &str) -> String {
    let normalized = normalize_phone_number(phone);
    if normalized.len() >= 7 {
        format!(
            "{}****{}",
            &normalized[0..3],
            &normalized[normalized.len() - 4..]
        )
    } else {
        "****".to_string()
    }
}
