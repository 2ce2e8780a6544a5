use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::client::OpenApiClient;
use crate::error::{PengyouError, ValidationError};
use crate::types::response::null_as_default;
use crate::types::ApiParams;

pub const USER_INFO: &str = "user/info";
pub const USER_MULTI_INFO: &str = "user/multi_info";
pub const USER_IS_SETUPED: &str = "user/is_setuped";
pub const USER_EMOTION: &str = "user/emotion";

/// Profile of the logged-in user
#[non_exhaustive]
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UserInfo {
    #[serde(default)]
    pub(crate) ret: i32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub nickname: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub gender: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub province: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub city: String,
    /// Avatar URL
    #[serde(default, deserialize_with = "null_as_default")]
    pub figureurl: String,
    /// Yellow-diamond (VIP) user
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_vip: bool,
    /// Annual VIP; always false when `is_vip` is false
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_year_vip: bool,
    /// Only present for VIP users
    #[serde(default)]
    pub vip_level: Option<u32>,
}

impl UserInfo {
    pub fn ret(&self) -> i32 {
        self.ret
    }
}

/// One entry of a `user/multi_info` response
#[non_exhaustive]
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MultiInfoItem {
    pub openid: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub nickname: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub gender: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub figureurl: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_vip: bool,
    /// Only present for VIP users
    #[serde(default)]
    pub is_year_vip: Option<bool>,
    /// Only present for VIP users
    #[serde(default)]
    pub vip_level: Option<u32>,
}

#[non_exhaustive]
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MultiInfoResponse {
    #[serde(default)]
    pub(crate) ret: i32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<MultiInfoItem>,
}

impl MultiInfoResponse {
    /// 0 on full success, between 1 and 999 when some entries are missing
    pub fn ret(&self) -> i32 {
        self.ret
    }
}

#[non_exhaustive]
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SetupResponse {
    #[serde(default)]
    pub(crate) ret: i32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub(crate) setuped: u8,
}

impl SetupResponse {
    pub fn ret(&self) -> i32 {
        self.ret
    }

    /// Whether the user has installed the application
    pub fn is_set_up(&self) -> bool {
        self.setuped == 1
    }
}

/// A friend's status line ("emotion")
#[non_exhaustive]
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EmotionItem {
    pub openid: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
}

#[non_exhaustive]
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EmotionResponse {
    #[serde(default)]
    pub(crate) ret: i32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<EmotionItem>,
}

impl EmotionResponse {
    pub fn ret(&self) -> i32 {
        self.ret
    }
}

/// Joins open ids into the `_`-separated `fopenids` parameter.
pub(crate) fn join_open_ids<S: AsRef<str>>(fopenids: &[S]) -> Result<String, ValidationError> {
    if fopenids.is_empty() {
        return Err(ValidationError::Empty("fopenids"));
    }
    Ok(fopenids
        .iter()
        .map(|id| id.as_ref())
        .collect::<Vec<_>>()
        .join("_"))
}

/// User API: profile, batch profiles, install status and status lines
#[derive(Debug, Clone)]
pub struct UserApi {
    client: Arc<OpenApiClient>,
}

impl UserApi {
    pub fn new(client: Arc<OpenApiClient>) -> Self {
        Self { client }
    }

    /// Get the logged-in user's profile
    pub fn get_user_info(&self, openid: &str, openkey: &str) -> Result<UserInfo, PengyouError> {
        self.client
            .api(USER_INFO, &ApiParams::new(openid, openkey))?
            .into_typed()
    }

    /// Get profiles for a batch of open ids
    ///
    /// # Errors
    /// Returns a 2001 validation error when `fopenids` is empty.
    pub fn get_multi_info<S: AsRef<str>>(
        &self,
        openid: &str,
        openkey: &str,
        fopenids: &[S],
    ) -> Result<MultiInfoResponse, PengyouError> {
        let fopenids = join_open_ids(fopenids)?;
        let params = ApiParams::new(openid, openkey).param("fopenids", fopenids);
        self.client.api(USER_MULTI_INFO, &params)?.into_typed()
    }

    /// Check whether the logged-in user installed the application
    pub fn is_set_up(&self, openid: &str, openkey: &str) -> Result<SetupResponse, PengyouError> {
        self.client
            .api(USER_IS_SETUPED, &ApiParams::new(openid, openkey))?
            .into_typed()
    }

    /// Get friends' status lines
    ///
    /// The remote accepts at most 20 open ids per call.
    ///
    /// # Errors
    /// Returns a 2001 validation error when `fopenids` is empty.
    pub fn get_emotion<S: AsRef<str>>(
        &self,
        openid: &str,
        openkey: &str,
        fopenids: &[S],
    ) -> Result<EmotionResponse, PengyouError> {
        let fopenids = join_open_ids(fopenids)?;
        let params = ApiParams::new(openid, openkey).param("fopenids", fopenids);
        self.client.api(USER_EMOTION, &params)?.into_typed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_open_ids() {
        assert_eq!(join_open_ids(&["aa", "bb", "cc"]).unwrap(), "aa_bb_cc");
        assert_eq!(join_open_ids(&[String::from("aa")]).unwrap(), "aa");

        let empty: [&str; 0] = [];
        assert_eq!(
            join_open_ids(&empty).unwrap_err(),
            ValidationError::Empty("fopenids")
        );
    }

    #[test]
    fn test_user_info_deserialize() {
        let json = r#"{
            "ret": 0,
            "nickname": "小明",
            "gender": "男",
            "province": "广东",
            "city": "深圳",
            "figureurl": "http://img.example.com/a.png",
            "is_vip": true,
            "is_year_vip": false,
            "vip_level": 3
        }"#;
        let info: UserInfo = serde_json::from_str(json).unwrap();
        assert_eq!(info.ret(), 0);
        assert_eq!(info.nickname, "小明");
        assert!(info.is_vip);
        assert!(!info.is_year_vip);
        assert_eq!(info.vip_level, Some(3));
    }

    #[test]
    fn test_user_info_non_vip_has_no_level() {
        let info: UserInfo =
            serde_json::from_str(r#"{"ret":0,"nickname":"a","is_vip":false}"#).unwrap();
        assert!(!info.is_vip);
        assert_eq!(info.vip_level, None);
    }

    #[test]
    fn test_multi_info_deserialize() {
        let json = r#"{"ret":2,"items":[
            {"openid":"aa","nickname":"n1","gender":"女","figureurl":"u1","is_vip":false},
            {"openid":"bb","nickname":"n2","gender":"男","figureurl":"u2","is_vip":true,"is_year_vip":true,"vip_level":5}
        ]}"#;
        let response: MultiInfoResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.ret(), 2);
        assert_eq!(response.items.len(), 2);
        assert_eq!(response.items[0].is_year_vip, None);
        assert_eq!(response.items[1].vip_level, Some(5));
    }

    #[test]
    fn test_setup_response() {
        let yes: SetupResponse = serde_json::from_str(r#"{"ret":0,"setuped":1}"#).unwrap();
        assert!(yes.is_set_up());
        let no: SetupResponse = serde_json::from_str(r#"{"ret":0,"setuped":0}"#).unwrap();
        assert!(!no.is_set_up());
    }

    #[test]
    fn test_emotion_deserialize() {
        let response: EmotionResponse =
            serde_json::from_str(r#"{"ret":0,"items":[{"openid":"aa","content":"hello"}]}"#)
                .unwrap();
        assert_eq!(response.items[0].content, "hello");
    }
}
