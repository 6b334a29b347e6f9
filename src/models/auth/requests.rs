use serde::Deserialize;
use ts_rs::TS;

/// 登录凭据，`username` 也接受邮箱
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct LoginRequest {
    #[serde(alias = "email", alias = "identifier")]
    pub username: String,
    pub password: String,
    /// 勾选后刷新令牌使用较长的有效期
    #[serde(default)]
    pub remember_me: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_request_accepts_email_alias() {
        let req: LoginRequest =
            serde_json::from_str(r#"{"email":"registrar@uni.test","password":"x"}"#)
                .expect("valid login json");
        assert_eq!(req.username, "registrar@uni.test");
        assert!(!req.remember_me);
    }
}
