use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::{AcademyError, Result};

static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_.-]+$").expect("Invalid username regex"));

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("Invalid email regex")
});

pub const MIN_PASSWORD_LEN: usize = 8;
const MAX_PASSWORD_LEN: usize = 128;

pub fn validate_username(username: &str) -> Result<()> {
    // 用户名长度校验：3 <= x <= 32
    if username.len() < 3 || username.len() > 32 {
        return Err(AcademyError::validation(
            "Username length must be between 3 and 32 characters",
        ));
    }
    // 只能包含字母、数字、下划线、点或连字符
    if !USERNAME_RE.is_match(username) {
        return Err(AcademyError::validation(
            "Username must contain only letters, numbers, underscores, dots or hyphens",
        ));
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<()> {
    if !EMAIL_RE.is_match(email) {
        return Err(AcademyError::validation("Email format is invalid"));
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<()> {
    let len = password.chars().count();
    if len < MIN_PASSWORD_LEN {
        return Err(AcademyError::validation(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters long"
        )));
    }
    if len > MAX_PASSWORD_LEN {
        return Err(AcademyError::validation("Password is too long"));
    }
    Ok(())
}

/// 姓名类字段：去除首尾空白后非空，最长 100 个字符
pub fn validate_person_name(field: &str, value: &str) -> Result<()> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AcademyError::validation(format!("{field} cannot be empty")));
    }
    if value.chars().count() > 100 {
        return Err(AcademyError::validation(format!("{field} is too long")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_usernames() {
        for name in ["abc", "ana.garcia", "teacher_01", "a-b-c", &"x".repeat(32)] {
            assert!(validate_username(name).is_ok(), "{name}");
        }
    }

    #[test]
    fn test_invalid_usernames() {
        for name in ["ab", "with space", "ñandu", "semi;colon", &"x".repeat(33)] {
            assert!(validate_username(name).is_err(), "{name}");
        }
    }

    #[test]
    fn test_password_length() {
        assert!(validate_password("1234567").is_err());
        assert!(validate_password("12345678").is_ok());
        assert!(validate_password(&"p".repeat(129)).is_err());
    }

    #[test]
    fn test_email() {
        assert!(validate_email("ana@school.edu").is_ok());
        assert!(validate_email("ana@school").is_err());
        assert!(validate_email("not-an-email").is_err());
    }

    #[test]
    fn test_person_name() {
        assert!(validate_person_name("name", "Ana").is_ok());
        assert!(validate_person_name("name", "  ").is_err());
    }
}
