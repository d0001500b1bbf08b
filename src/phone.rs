// File: ./src/phone.rs
//! Pure helpers for the two entry fields.
//!
//! Each field kind has a live sanitiser, applied on every keystroke, and a separate
//! commit check. A partially typed value survives sanitising but may fail the check.
use once_cell::sync::Lazy;
use regex::Regex;

/// Maximum number of characters accepted in the name field.
pub const NAME_MAX_LEN: usize = 20;
/// Maximum number of digits accepted in the phone field.
pub const PHONE_MAX_LEN: usize = 10;

static NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_ ()\-]{1,20}$").expect("valid name regex"));
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^0[2-9][0-9]{8}$").expect("valid phone regex"));
static MOBILE_PREFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^0[45]").expect("valid mobile prefix regex"));
static MOBILE_GROUPS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]{4})([0-9]{3})([0-9]{3})$").expect("valid 4-3-3 regex"));
static LANDLINE_GROUPS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]{2})([0-9]{4})([0-9]{4})$").expect("valid 2-4-4 regex"));

/// Strips every character that is not an ASCII digit.
pub fn sanitise(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Groups a sanitised 10 digit number for display.
///
/// Numbers starting with `04` or `05` are grouped 4-3-3 (`0412 345 678`), everything
/// else 2-4-4 (`02 9876 5432`). Input that does not match the full pattern is
/// returned unchanged, so partially typed numbers pass through untouched.
pub fn format(digits: &str) -> String {
    let groups = if MOBILE_PREFIX_RE.is_match(digits) {
        &*MOBILE_GROUPS_RE
    } else {
        &*LANDLINE_GROUPS_RE
    };

    groups.replace(digits, "$1 $2 $3").into_owned()
}

/// Strips every character outside `[A-Za-z0-9_ ()-]`.
pub fn sanitise_name(raw: &str) -> String {
    raw.chars().filter(|c| is_name_char(*c)).collect()
}

pub fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | ' ' | '(' | ')' | '-')
}

pub fn is_valid_name(value: &str) -> bool {
    NAME_RE.is_match(value)
}

pub fn is_valid_phone(value: &str) -> bool {
    PHONE_RE.is_match(value)
}
