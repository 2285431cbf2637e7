//! Phone number utilities

use once_cell::sync::Lazy;
use regex::Regex;

// Mainland-China mobile number, bare form (no country code)
static CN_MOBILE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^1[3-9]\d{9}$").unwrap());

// International phone number (E.164 format)
static E164_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+[1-9]\d{1,14}$").unwrap());

/// Strip common formatting characters from a phone number
pub fn normalize_phone(phone: &str) -> String {
    phone
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect()
}

/// Check if a phone number is a bare mainland-China mobile number
pub fn is_valid_cn_mobile(phone: &str) -> bool {
    CN_MOBILE_REGEX.is_match(&normalize_phone(phone))
}

/// Check if a phone number is in E.164 format
pub fn is_valid_e164(phone: &str) -> bool {
    E164_REGEX.is_match(&normalize_phone(phone))
}

/// Check if a phone number is deliverable (E.164 or bare CN mobile)
pub fn is_valid_phone(phone: &str) -> bool {
    let normalized = normalize_phone(phone);
    is_valid_cn_mobile(&normalized) || is_valid_e164(&normalized)
}

/// Mask a phone number for logs, keeping the last four digits
pub fn mask_phone(phone: &str) -> String {
    let normalized = normalize_phone(phone);
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
