//! Single-field rules shared by the step validators.

use std::sync::LazyLock;

use regex::Regex;

static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z '\-]{1,49}$").unwrap());

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\(\d{3}\) \d{3}-\d{4}$").unwrap());

static SSN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{3}-\d{2}-\d{4}$").unwrap());

static ZIP_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{5}$").unwrap());

/// 2-50 characters; letters, spaces, hyphens and apostrophes only.
pub fn name_error(value: &str) -> Option<&'static str> {
    let value = value.trim();
    if value.is_empty() {
        return Some("This field is required");
    }
    if value.chars().count() < 2 {
        return Some("Must be at least 2 characters");
    }
    if !NAME_RE.is_match(value) {
        return Some("Only letters, spaces, hyphens and apostrophes are allowed");
    }
    None
}

pub fn email_error(value: &str) -> Option<&'static str> {
    let value = value.trim();
    if value.is_empty() {
        return Some("Email address is required");
    }
    if !EMAIL_RE.is_match(value) {
        return Some("Enter a valid email address");
    }
    None
}

/// Expects the formatted shape `(XXX) XXX-XXXX`.
pub fn phone_error(value: &str) -> Option<&'static str> {
    let value = value.trim();
    if value.is_empty() {
        return Some("Phone number is required");
    }
    if !PHONE_RE.is_match(value) {
        return Some("Enter a phone number as (XXX) XXX-XXXX");
    }
    None
}

/// Expects the formatted shape `XXX-XX-XXXX`.
pub fn ssn_error(value: &str) -> Option<&'static str> {
    let value = value.trim();
    if value.is_empty() {
        return Some("Social Security number is required");
    }
    if !SSN_RE.is_match(value) {
        return Some("Enter an SSN as XXX-XX-XXXX");
    }
    None
}

pub fn zip_error(value: &str) -> Option<&'static str> {
    let value = value.trim();
    if value.is_empty() {
        return Some("ZIP code is required");
    }
    if !ZIP_RE.is_match(value) {
        return Some("ZIP code must be exactly 5 digits");
    }
    None
}

/// Two-letter state code.
pub fn state_error(value: &str) -> Option<&'static str> {
    let value = value.trim();
    if value.is_empty() {
        return Some("State is required");
    }
    if value.len() != 2 || !value.chars().all(|c| c.is_ascii_alphabetic()) {
        return Some("Enter a two-letter state code");
    }
    None
}

pub fn required_error(value: &str) -> Option<&'static str> {
    if value.trim().is_empty() {
        Some("This field is required")
    } else {
        None
    }
}
