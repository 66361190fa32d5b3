use crate::utils::error::{IntakeError, Result};
use regex::Regex;
use std::sync::OnceLock;
use url::Url;

pub const MIN_MESSAGE_CHARS: usize = 10;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(IntakeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(IntakeError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(IntakeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(IntakeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(IntakeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(IntakeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

fn email_pattern() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern compiles"))
}

/// Basic `local@domain.tld` shape check; not an RFC 5322 parser.
pub fn is_plausible_email(value: &str) -> bool {
    email_pattern().is_match(value)
}

// Form field checks return the inline message shown next to the field.

pub fn check_name(value: &str) -> Option<&'static str> {
    if value.trim().is_empty() {
        return Some("Name is required");
    }
    None
}

pub fn check_email(value: &str) -> Option<&'static str> {
    if value.trim().is_empty() {
        Some("Email is required")
    } else if !is_plausible_email(value) {
        Some("Please enter a valid email")
    } else {
        None
    }
}

pub fn check_message(value: &str) -> Option<&'static str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Some("Message is required")
    } else if trimmed.chars().count() < MIN_MESSAGE_CHARS {
        Some("Message should be at least 10 characters")
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("store.endpoint", "https://example.supabase.co").is_ok());
        assert!(validate_url("store.endpoint", "http://localhost:54321").is_ok());
        assert!(validate_url("store.endpoint", "").is_err());
        assert!(validate_url("store.endpoint", "invalid-url").is_err());
        assert!(validate_url("store.endpoint", "ftp://example.com").is_err());
    }

    #[test]
    fn test_email_shape() {
        assert!(is_plausible_email("jane@x.com"));
        assert!(is_plausible_email("first.last@mail.example.org"));
        assert!(!is_plausible_email("jane.x.com"));
        assert!(!is_plausible_email("jane@localhost"));
        assert!(!is_plausible_email("jane@.com"));
        assert!(!is_plausible_email("@x.com"));
    }

    #[test]
    fn test_email_messages() {
        assert_eq!(check_email("   "), Some("Email is required"));
        assert_eq!(check_email("jane@nowhere"), Some("Please enter a valid email"));
        assert_eq!(check_email("jane@x.com"), None);
    }

    #[test]
    fn test_message_length_uses_trimmed_chars() {
        assert_eq!(check_message(""), Some("Message is required"));
        assert_eq!(
            check_message("   short    "),
            Some("Message should be at least 10 characters")
        );
        assert_eq!(
            check_message("  123456789  "),
            Some("Message should be at least 10 characters")
        );
        assert_eq!(check_message("1234567890"), None);
        // Ten multi-byte characters still count as ten.
        assert_eq!(check_message("éééééééééé"), None);
    }

    #[test]
    fn test_name_required() {
        assert_eq!(check_name(" \t"), Some("Name is required"));
        assert_eq!(check_name("Jane"), None);
    }
}
