//! Small helpers shared by forms and templates

use chrono::{Duration, Local, NaiveDateTime};
use rand::distributions::Alphanumeric;
use rand::rngs::OsRng;
use rand::Rng;

use crate::validators::{EMAIL_REGEX, UNSAFE_CHARS_REGEX};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
pub const DEFAULT_TOKEN_LENGTH: usize = 32;
pub const DEFAULT_CODE_LENGTH: usize = 6;
pub const DEFAULT_TRUNCATE_SUFFIX: &str = "...";

/// Alphanumeric token from the operating system RNG
pub fn generate_random_token(length: usize) -> String {
    OsRng
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

/// Numeric code, e.g. for a one-time verification
pub fn generate_verification_code(length: usize) -> String {
    (0..length)
        .map(|_| char::from(b'0' + OsRng.gen_range(0..10u8)))
        .collect()
}

pub fn validate_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Fixed policy check, `(is_valid, message)`
pub fn validate_password_strength(password: &str) -> (bool, &'static str) {
    if password.chars().count() < 8 {
        return (false, "Password must be at least 8 characters");
    }

    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return (false, "Password must contain uppercase letter");
    }

    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        return (false, "Password must contain lowercase letter");
    }

    if !password.chars().any(|c| c.is_ascii_digit()) {
        return (false, "Password must contain a digit");
    }

    (true, "Password is strong")
}

/// Strip `<>"';(){}` without trimming
pub fn sanitize_input(input: &str) -> String {
    UNSAFE_CHARS_REGEX.replace_all(input, "").into_owned()
}

/// `YYYY-mm-dd HH:MM:SS`, local time when `timestamp` is `None`
pub fn format_timestamp(timestamp: Option<NaiveDateTime>) -> String {
    timestamp
        .unwrap_or_else(|| Local::now().naive_local())
        .format(TIMESTAMP_FORMAT)
        .to_string()
}

pub fn parse_timestamp(timestamp: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(timestamp, TIMESTAMP_FORMAT).ok()
}

/// Whether `timestamp` is more than `hours` old; unparseable input counts as expired
pub fn is_expired(timestamp: &str, hours: i64) -> bool {
    match parse_timestamp(timestamp) {
        Some(timestamp) => Local::now().naive_local() > timestamp + Duration::hours(hours),
        None => true,
    }
}

/// `john@example.com` becomes `j**n@example.com`
pub fn mask_email(email: &str) -> String {
    let Some((local, domain)) = email.split_once('@') else {
        return email.to_string();
    };

    let chars = local.chars().collect::<Vec<_>>();
    let masked = match chars.as_slice() {
        [] => "*".to_string(),
        [first] | [first, _] => format!("{first}*"),
        [first, middle @ .., last] => format!("{first}{}{last}", "*".repeat(middle.len())),
    };

    format!("{masked}@{domain}")
}

/// Percentage rounded to two decimals, `0.0` when `total` is zero
pub fn calculate_percentage(value: f64, total: f64) -> f64 {
    if total == 0.0 {
        return 0.0;
    }

    (value / total * 100.0 * 100.0).round() / 100.0
}

pub fn truncate_text(text: &str, max_length: usize, suffix: &str) -> String {
    if text.chars().count() <= max_length {
        return text.to_string();
    }

    let keep = max_length.saturating_sub(suffix.chars().count());
    let mut truncated = text.chars().take(keep).collect::<String>();

    truncated.push_str(suffix);
    truncated
}

/// Lowercased extension after the last dot, empty when there is none
pub fn get_file_extension(filename: &str) -> String {
    filename
        .rsplit_once('.')
        .map(|(_, extension)| extension.to_lowercase())
        .unwrap_or_default()
}

pub fn is_allowed_file(filename: &str, allowed_extensions: &[&str]) -> bool {
    let extension = get_file_extension(filename);

    allowed_extensions.contains(&extension.as_str())
}

/// `report.pdf` becomes `report_20240101_093000.pdf`
pub fn generate_unique_filename(filename: &str) -> String {
    let timestamp = Local::now().format("%Y%m%d_%H%M%S");

    match filename.rsplit_once('.') {
        Some((name, extension)) if !extension.is_empty() => {
            format!("{name}_{timestamp}.{extension}")
        }
        Some((name, _)) => format!("{name}_{timestamp}"),
        None => format!("{filename}_{timestamp}"),
    }
}
