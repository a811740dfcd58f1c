//! Input validation rules for account data.
//!
//! Every predicate is total: malformed input yields `false`, never a panic.

use lazy_static::lazy_static;
use regex::Regex;

pub const PHONE_NUMBER_PREFIX: &str = "+62";

pub const PHONE_NUMBER_REASON: &str = "Phone number must be at least 10 characters, start with +62";
pub const FULL_NAME_REASON: &str = "Full name must be between 3 and 60 characters";
pub const PASSWORD_REASON: &str = "Password must be between 6 and 64 characters, contain at least 1 uppercase letter, 1 number, and 1 special character";

lazy_static! {
    // Unicode punctuation (P*) or symbol (S*) categories
    static ref SPECIAL_CHAR_REGEX: Regex = Regex::new(r"[\p{P}\p{S}]").unwrap();
}

/// Outcome of validating a signup request.
///
/// `reasons` holds one message per failing rule, ordered phone, name, password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub valid: bool,
    pub reasons: Vec<String>,
}

impl ValidationResult {
    /// All failing reasons in one line, as returned to API clients.
    pub fn message(&self) -> String {
        self.reasons.join(", ")
    }
}

/// `+62` followed by 9 to 12 ASCII digits and nothing else.
pub fn validate_phone_number(phone_number: &str) -> bool {
    let Some(digits) = phone_number.strip_prefix(PHONE_NUMBER_PREFIX) else {
        return false;
    };

    (9..=12).contains(&digits.len()) && digits.bytes().all(|b| b.is_ascii_digit())
}

pub fn validate_full_name(full_name: &str) -> bool {
    (3..=60).contains(&full_name.chars().count())
}

/// 6 to 64 characters with an uppercase ASCII letter, an ASCII digit and a
/// punctuation or symbol character.
pub fn validate_password(password: &str) -> bool {
    if !(6..=64).contains(&password.chars().count()) {
        return false;
    }

    let has_uppercase = password.chars().any(|c| c.is_ascii_uppercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_special = SPECIAL_CHAR_REGEX.is_match(password);

    has_uppercase && has_digit && has_special
}

pub fn validate_signup_input(phone_number: &str, full_name: &str, password: &str) -> ValidationResult {
    let checks = [
        (validate_phone_number(phone_number), PHONE_NUMBER_REASON),
        (validate_full_name(full_name), FULL_NAME_REASON),
        (validate_password(password), PASSWORD_REASON),
    ];

    let reasons: Vec<String> = checks
        .iter()
        .filter(|(ok, _)| !ok)
        .map(|(_, reason)| reason.to_string())
        .collect();

    ValidationResult {
        valid: reasons.is_empty(),
        reasons,
    }
}
