//! Client-side form validation.
//!
//! Errors are collected per field and shown inline; a form that fails
//! validation is never sent.

use crate::models::EntityId;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

static UPPERCASE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Z]").expect("valid regex"));
static DIGIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]").expect("valid regex"));
static SPECIAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^A-Za-z0-9]").expect("valid regex"));
static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}$").expect("valid regex")
});
/// Local mobile numbers: exactly 11 digits.
static CONTACT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{11}$").expect("valid regex"));

pub const MIN_PASSWORD_LEN: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// First message recorded for `field`.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

pub trait Validate {
    fn validate(&self) -> Result<(), ValidationErrors>;
}

pub fn require_id(errors: &mut ValidationErrors, field: &'static str, label: &str, id: EntityId) {
    if id <= 0 {
        errors.add(field, format!("{} is required", label));
    }
}

pub fn require_text(errors: &mut ValidationErrors, field: &'static str, label: &str, value: &str) {
    if value.trim().is_empty() {
        errors.add(field, format!("{} is required", label));
    }
}

pub fn check_email(errors: &mut ValidationErrors, field: &'static str, value: &str) {
    let value = value.trim();
    if value.is_empty() {
        errors.add(field, "Email is required.");
    } else if !EMAIL.is_match(value) {
        errors.add(field, "Email address is not valid.");
    }
}

pub fn check_contact(errors: &mut ValidationErrors, field: &'static str, value: &str) {
    let value = value.trim();
    if value.is_empty() {
        errors.add(field, "Contact number is required.");
    } else if !CONTACT.is_match(value) {
        errors.add(field, "Contact number must be exactly 11 digits.");
    }
}

/// Unmet password requirements, in display order. Empty means acceptable.
pub fn password_problems(password: &str) -> Vec<&'static str> {
    let mut problems = Vec::new();
    if password.chars().count() < MIN_PASSWORD_LEN {
        problems.push("at least 8 characters");
    }
    if !UPPERCASE.is_match(password) {
        problems.push("an uppercase letter");
    }
    if !DIGIT.is_match(password) {
        problems.push("a number");
    }
    if !SPECIAL.is_match(password) {
        problems.push("a special character");
    }
    problems
}

pub fn check_password(errors: &mut ValidationErrors, field: &'static str, password: &str) {
    if password.is_empty() {
        errors.add(field, "Password is required.");
        return;
    }
    let problems = password_problems(password);
    if !problems.is_empty() {
        errors.add(field, format!("Password must include {}.", problems.join(", ")));
    }
}

/// Normalize a form date to `yyyy-mm-dd`.
///
/// Accepts `mm/dd/yyyy` (what date pickers hand back) and ISO dates.
pub fn normalize_date(input: &str) -> Option<String> {
    let input = input.trim();
    NaiveDate::parse_from_str(input, "%m/%d/%Y")
        .or_else(|_| NaiveDate::parse_from_str(input, "%Y-%m-%d"))
        .ok()
        .map(|d| d.format("%Y-%m-%d").to_string())
}

pub fn check_date(errors: &mut ValidationErrors, field: &'static str, label: &str, value: &str) {
    if value.trim().is_empty() {
        errors.add(field, format!("{} is required", label));
    } else if normalize_date(value).is_none() {
        errors.add(field, format!("{} must be a date (mm/dd/yyyy)", label));
    }
}
