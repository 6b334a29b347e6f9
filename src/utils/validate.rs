use once_cell::sync::Lazy;
use regex::Regex;

static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("Invalid username regex"));

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("Invalid email regex")
});

// 学号：字母数字与连字符，如 "U2024-0001"
static STUDENT_NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9-]{2,31}$").expect("Invalid student number regex"));

// 课程代码，如 "CS101"、"MATH-2A"
static SUBJECT_CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z0-9][A-Z0-9_-]{1,19}$").expect("Invalid subject code regex"));

pub fn validate_username(username: &str) -> Result<(), &'static str> {
    if username.len() < 5 || username.len() > 16 {
        return Err("Username length must be between 5 and 16 characters");
    }
    if !USERNAME_RE.is_match(username) {
        return Err("Username must contain only letters, numbers, underscores or hyphens");
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if !EMAIL_RE.is_match(email) {
        return Err("Email format is invalid");
    }
    Ok(())
}

/// 密码至少 8 位，且同时包含大小写字母与数字
pub fn validate_password(password: &str) -> Result<(), String> {
    let mut errors = Vec::new();

    if password.chars().count() < 8 {
        errors.push("Password must be at least 8 characters long");
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        errors.push("Password must contain at least one uppercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        errors.push("Password must contain at least one lowercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        errors.push("Password must contain at least one digit");
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors.join("; "))
    }
}

pub fn validate_student_number(number: &str) -> Result<(), &'static str> {
    if !STUDENT_NUMBER_RE.is_match(number) {
        return Err("Student number must be 3-32 letters, digits or hyphens");
    }
    Ok(())
}

pub fn validate_subject_code(code: &str) -> Result<(), &'static str> {
    if !SUBJECT_CODE_RE.is_match(code) {
        return Err("Subject code must be 2-20 uppercase letters, digits, '_' or '-'");
    }
    Ok(())
}

/// 名称类字段：去除首尾空白后 1..=max 个字符
pub fn validate_display_text(value: &str, max: usize) -> Result<(), String> {
    let len = value.trim().chars().count();
    if len == 0 {
        return Err("Value must not be empty".to_string());
    }
    if len > max {
        return Err(format!("Value must be at most {max} characters"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_username() {
        assert!(validate_username("admin").is_ok());
        assert!(validate_username("ab").is_err());
        assert!(validate_username("bad name").is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("registrar@uni.edu").is_ok());
        assert!(validate_email("no-at-sign").is_err());
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("Secret123").is_ok());
        let err = validate_password("short").unwrap_err();
        assert!(err.contains("8 characters"));
        assert!(err.contains("digit"));
    }

    #[test]
    fn test_validate_student_number() {
        assert!(validate_student_number("U2024-0001").is_ok());
        assert!(validate_student_number("ab").is_err());
        assert!(validate_student_number("-123").is_err());
        assert!(validate_student_number("12 34").is_err());
    }

    #[test]
    fn test_validate_subject_code() {
        assert!(validate_subject_code("CS101").is_ok());
        assert!(validate_subject_code("MATH-2A").is_ok());
        assert!(validate_subject_code("cs101").is_err());
        assert!(validate_subject_code("C").is_err());
    }

    #[test]
    fn test_validate_display_text() {
        assert!(validate_display_text("2024/2025", 64).is_ok());
        assert!(validate_display_text("   ", 64).is_err());
        assert!(validate_display_text(&"x".repeat(65), 64).is_err());
    }
}
