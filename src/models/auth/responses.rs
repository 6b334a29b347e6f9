use serde::Serialize;
use ts_rs::TS;

use crate::models::users::entities::User;

/// 访问令牌，刷新令牌只通过 HttpOnly cookie 下发
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct AccessToken {
    pub access_token: String,
    pub token_type: String,
    /// 有效期（秒）
    pub expires_in: i64,
}

impl AccessToken {
    pub fn bearer(access_token: String, expiry_minutes: i64) -> Self {
        Self {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: expiry_minutes * 60,
        }
    }
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct LoginResponse {
    #[serde(flatten)]
    #[ts(flatten)]
    pub token: AccessToken,
    pub user: User,
}
