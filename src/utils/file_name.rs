/// 校验上传文件名（头像等），拒绝路径穿越
///
/// 只允许 `[A-Za-z0-9._-]`，不能以点开头，不能包含 `..`。
pub fn validate_file_name(name: &str) -> Result<(), &'static str> {
    if name.is_empty() || name.len() > 255 {
        return Err("file name length must be between 1 and 255");
    }
    if name.starts_with('.') || name.contains("..") {
        return Err("file name must not start with a dot or contain '..'");
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
    {
        return Err("file name contains forbidden characters");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_names() {
        assert!(validate_file_name("1741000000-3f2a.png").is_ok());
        assert!(validate_file_name("avatar_01.jpeg").is_ok());
    }

    #[test]
    fn test_traversal_is_rejected() {
        assert!(validate_file_name("../config.toml").is_err());
        assert!(validate_file_name("..").is_err());
        assert!(validate_file_name("a/../../b.png").is_err());
        assert!(validate_file_name("dir/file.png").is_err());
        assert!(validate_file_name("dir\\file.png").is_err());
        assert!(validate_file_name(".env").is_err());
    }

    #[test]
    fn test_odd_characters_are_rejected() {
        assert!(validate_file_name("").is_err());
        assert!(validate_file_name("a\0.png").is_err());
        assert!(validate_file_name("héllo.png").is_err());
        assert!(validate_file_name("name with space.png").is_err());
    }
}
