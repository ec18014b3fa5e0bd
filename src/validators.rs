//! Form input validators
//!
//! Every validator returns `Ok(())` or the first rule the input breaks, with a
//! message that can be shown next to the offending form field.

use chrono::{Local, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::config::PasswordConfig;

/// A single failed rule
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ValidationError(pub String);

impl ValidationError {
    pub fn new<T: ToString>(message: T) -> Self {
        Self(message.to_string())
    }

    pub fn message(&self) -> &str {
        &self.0
    }
}

pub type Result<T = ()> = std::result::Result<T, ValidationError>;

pub const USERNAME_MIN_LENGTH: usize = 3;
pub const USERNAME_MAX_LENGTH: usize = 20;
pub const EMAIL_MAX_LENGTH: usize = 100;
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

static USERNAME_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z0-9_]+$").unwrap());

pub(crate) static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap());

static UPPERCASE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Z]").unwrap());

static LOWERCASE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"[a-z]").unwrap());

static DIGIT_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d").unwrap());

static SPECIAL_CHAR_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[!@#$%^&*(),.?":{}|<>_\-+=\[\]\\'/;`~]"#).unwrap());

static PHONE_SEPARATORS_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\s\-()]").unwrap());

static PHONE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+?[0-9]{10,15}$").unwrap());

static URL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?i)^https?://",
        r"(?:(?:[A-Z0-9](?:[A-Z0-9-]{0,61}[A-Z0-9])?\.)+[A-Z]{2,6}\.?|",
        r"localhost|",
        r"\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3})",
        r"(?::\d+)?",
        r"(?:/?|[/?]\S+)$",
    ))
    .unwrap()
});

pub(crate) static UNSAFE_CHARS_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[<>"';(){}]"#).unwrap());

/// 3 to 20 characters of letters, digits and underscores
pub fn validate_username(username: &str) -> Result {
    if username.is_empty() {
        return Err(ValidationError::new("Username is required"));
    }

    let length = username.chars().count();

    if length < USERNAME_MIN_LENGTH {
        return Err(ValidationError::new(format!(
            "Username must be at least {USERNAME_MIN_LENGTH} characters"
        )));
    }

    if length > USERNAME_MAX_LENGTH {
        return Err(ValidationError::new(format!(
            "Username must not exceed {USERNAME_MAX_LENGTH} characters"
        )));
    }

    if !USERNAME_REGEX.is_match(username) {
        return Err(ValidationError::new(
            "Username can only contain letters, numbers, and underscores",
        ));
    }

    Ok(())
}

pub fn validate_email_format(email: &str) -> Result {
    if email.is_empty() {
        return Err(ValidationError::new("Email is required"));
    }

    if !EMAIL_REGEX.is_match(email) {
        return Err(ValidationError::new("Invalid email format"));
    }

    if email.chars().count() > EMAIL_MAX_LENGTH {
        return Err(ValidationError::new("Email is too long"));
    }

    Ok(())
}

/// Check a password against the configured policy
pub fn validate_password_complexity(password: &str, policy: &PasswordConfig) -> Result {
    if password.is_empty() {
        return Err(ValidationError::new("Password is required"));
    }

    let length = password.chars().count();

    if length < policy.min_length {
        return Err(ValidationError::new(format!(
            "Password must be at least {} characters",
            policy.min_length
        )));
    }

    if length > policy.max_length {
        return Err(ValidationError::new("Password is too long"));
    }

    if policy.require_uppercase && !UPPERCASE_REGEX.is_match(password) {
        return Err(ValidationError::new(
            "Password must contain at least one uppercase letter",
        ));
    }

    if policy.require_lowercase && !LOWERCASE_REGEX.is_match(password) {
        return Err(ValidationError::new(
            "Password must contain at least one lowercase letter",
        ));
    }

    if policy.require_digits && !DIGIT_REGEX.is_match(password) {
        return Err(ValidationError::new("Password must contain at least one digit"));
    }

    if policy.require_special && !SPECIAL_CHAR_REGEX.is_match(password) {
        return Err(ValidationError::new(
            "Password must contain at least one special character",
        ));
    }

    Ok(())
}

/// Optional field: an empty value passes
pub fn validate_phone_number(phone: &str) -> Result {
    if phone.is_empty() {
        return Ok(());
    }

    let cleaned = PHONE_SEPARATORS_REGEX.replace_all(phone, "");

    if !PHONE_REGEX.is_match(&cleaned) {
        return Err(ValidationError::new("Invalid phone number format"));
    }

    Ok(())
}

fn parse_date(date: &str, format: &str) -> Result<NaiveDate> {
    if date.is_empty() {
        return Err(ValidationError::new("Date is required"));
    }

    NaiveDate::parse_from_str(date, format)
        .map_err(|_| ValidationError::new(format!("Invalid date format. Expected: {format}")))
}

pub fn validate_date_format(date: &str, format: &str) -> Result {
    parse_date(date, format).map(|_| ())
}

/// The date must fall after today
pub fn validate_future_date(date: &str, format: &str) -> Result {
    let date = parse_date(date, format)?;

    if date <= Local::now().date_naive() {
        return Err(ValidationError::new("Date must be in the future"));
    }

    Ok(())
}

pub fn validate_integer_range(
    value: &str,
    min: Option<i64>,
    max: Option<i64>,
    field_name: &str,
) -> Result {
    let value: i64 = value
        .trim()
        .parse()
        .map_err(|_| ValidationError::new(format!("{field_name} must be a valid integer")))?;

    if let Some(min) = min.filter(|min| value < *min) {
        return Err(ValidationError::new(format!("{field_name} must be at least {min}")));
    }

    if let Some(max) = max.filter(|max| value > *max) {
        return Err(ValidationError::new(format!("{field_name} must not exceed {max}")));
    }

    Ok(())
}

pub fn validate_file_size(file_size: u64, max_size_mb: u64) -> Result {
    let max_bytes = max_size_mb * 1024 * 1024;

    if file_size > max_bytes {
        return Err(ValidationError::new(format!(
            "File size must not exceed {max_size_mb}MB"
        )));
    }

    Ok(())
}

pub fn validate_file_extension(filename: &str, allowed_extensions: &[&str]) -> Result {
    if filename.is_empty() {
        return Err(ValidationError::new("Filename is required"));
    }

    let Some((_, extension)) = filename.rsplit_once('.') else {
        return Err(ValidationError::new("File must have an extension"));
    };

    let extension = extension.to_lowercase();

    if !allowed_extensions.contains(&extension.as_str()) {
        return Err(ValidationError::new(format!(
            "File type not allowed. Allowed types: {}",
            allowed_extensions.join(", ")
        )));
    }

    Ok(())
}

pub fn validate_url(url: &str) -> Result {
    if url.is_empty() {
        return Err(ValidationError::new("URL is required"));
    }

    if !URL_REGEX.is_match(url) {
        return Err(ValidationError::new("Invalid URL format"));
    }

    Ok(())
}

/// Trim, strip `<>"';(){}` and cut to `max_length` characters
pub fn sanitize_string(input: &str, max_length: Option<usize>) -> String {
    let cleaned = UNSAFE_CHARS_REGEX.replace_all(input.trim(), "");

    match max_length {
        Some(max) if max > 0 => cleaned.chars().take(max).collect(),
        _ => cleaned.into_owned(),
    }
}
