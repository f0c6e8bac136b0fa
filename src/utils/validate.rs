use once_cell::sync::Lazy;
use regex::Regex;

static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("Invalid username regex"));

pub fn validate_username(username: &str) -> Result<(), &'static str> {
    // 用户名长度校验：5 <= x <= 16
    if username.len() < 5 || username.len() > 16 {
        return Err("Username length must be between 5 and 16 characters");
    }
    // 用户名格式校验：只能包含字母、数字、下划线或连字符
    if !USERNAME_RE.is_match(username) {
        return Err("Username must contain only letters, numbers, underscores or hyphens");
    }
    Ok(())
}

/// 年级校验，仅对提供了年级的请求生效
pub fn validate_year(year: Option<i32>) -> Result<(), &'static str> {
    match year {
        Some(y) if !(1900..=2200).contains(&y) => Err("Year must be between 1900 and 2200"),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_username() {
        assert!(validate_username("student01").is_ok());
        assert!(validate_username("teacher_a").is_ok());
        assert!(validate_username("user-name").is_ok());
    }

    #[test]
    fn test_username_length() {
        assert!(validate_username("abc").is_err());
        assert!(validate_username("a".repeat(17).as_str()).is_err());
    }

    #[test]
    fn test_username_charset() {
        assert!(validate_username("user name").is_err());
        assert!(validate_username("user@name").is_err());
    }

    #[test]
    fn test_year_range() {
        assert!(validate_year(None).is_ok());
        assert!(validate_year(Some(2026)).is_ok());
        assert!(validate_year(Some(1800)).is_err());
    }
}
