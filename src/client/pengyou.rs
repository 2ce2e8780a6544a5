//! Unified Pengyou OpenAPI client

use std::sync::Arc;

use crate::api::pay::{PayApi, VipResponse};
use crate::api::relation::{FriendListOptions, FriendListResponse, IsFriendResponse, RelationApi};
use crate::api::user::{EmotionResponse, MultiInfoResponse, SetupResponse, UserApi, UserInfo};
use crate::client::OpenApiClient;
use crate::error::PengyouError;
use crate::types::{AppId, AppKey, AppName};

/// Unified Pengyou OpenAPI client
///
/// This is the main entry point for the SDK. Every method performs one
/// blocking POST and returns either the typed response or a
/// [`PengyouError`] carrying the numeric `ret` code.
///
/// # Example
///
/// ```rust,no_run
/// use pengyou_openapi_sdk::Pengyou;
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let pengyou = Pengyou::new("100629", "app_key", "myapp")?;
///
///     let info = pengyou.get_user_info("0123456789ABCDEF0123456789ABCDEF", "openkey")?;
///     println!("nickname: {}", info.nickname);
///
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Pengyou {
    client: Arc<OpenApiClient>,
}

impl Pengyou {
    /// Create a client for the default server from the application triple
    ///
    /// # Errors
    /// Returns a 2001 validation error if any argument is empty.
    pub fn new(
        app_id: impl Into<String>,
        app_key: impl Into<String>,
        app_name: impl Into<String>,
    ) -> Result<Self, PengyouError> {
        Self::builder()
            .appid(AppId::new(app_id)?)
            .appkey(AppKey::new(app_key)?)
            .app_name(AppName::new(app_name)?)
            .build()
    }

    pub fn builder() -> super::builder::PengyouBuilder {
        super::builder::PengyouBuilder::default()
    }

    pub fn appid(&self) -> &str {
        self.client.appid()
    }

    /// The underlying client, for calling methods this type does not wrap
    pub fn client(&self) -> &OpenApiClient {
        &self.client
    }

    // User API

    pub fn get_user_info(&self, openid: &str, openkey: &str) -> Result<UserInfo, PengyouError> {
        UserApi::new(self.client.clone()).get_user_info(openid, openkey)
    }

    pub fn get_multi_info<S: AsRef<str>>(
        &self,
        openid: &str,
        openkey: &str,
        fopenids: &[S],
    ) -> Result<MultiInfoResponse, PengyouError> {
        UserApi::new(self.client.clone()).get_multi_info(openid, openkey, fopenids)
    }

    pub fn is_set_up(&self, openid: &str, openkey: &str) -> Result<SetupResponse, PengyouError> {
        UserApi::new(self.client.clone()).is_set_up(openid, openkey)
    }

    pub fn get_emotion<S: AsRef<str>>(
        &self,
        openid: &str,
        openkey: &str,
        fopenids: &[S],
    ) -> Result<EmotionResponse, PengyouError> {
        UserApi::new(self.client.clone()).get_emotion(openid, openkey, fopenids)
    }

    // Relation API

    pub fn is_friend(
        &self,
        openid: &str,
        openkey: &str,
        fopenid: &str,
    ) -> Result<IsFriendResponse, PengyouError> {
        RelationApi::new(self.client.clone()).is_friend(openid, openkey, fopenid)
    }

    pub fn get_friend_list(
        &self,
        openid: &str,
        openkey: &str,
        options: FriendListOptions,
    ) -> Result<FriendListResponse, PengyouError> {
        RelationApi::new(self.client.clone()).get_friend_list(openid, openkey, options)
    }

    // Pay API

    pub fn is_vip(&self, openid: &str, openkey: &str) -> Result<VipResponse, PengyouError> {
        PayApi::new(self.client.clone()).is_vip(openid, openkey)
    }
}

impl From<OpenApiClient> for Pengyou {
    fn from(client: OpenApiClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OPENID: &str = "0123456789abcdef0123456789ABCDEF";

    fn pengyou() -> Pengyou {
        // validation errors never reach this host
        Pengyou::builder()
            .appid(AppId::new("100629").unwrap())
            .appkey(AppKey::new("key").unwrap())
            .app_name(AppName::new("demo").unwrap())
            .server_name("127.0.0.1:1")
            .build()
            .unwrap()
    }

    #[test]
    fn test_new_rejects_empty_credentials() {
        assert_eq!(Pengyou::new("", "k", "n").unwrap_err().message(), "appid is empty");
        assert_eq!(Pengyou::new("1", "", "n").unwrap_err().message(), "appkey is empty");
        assert_eq!(Pengyou::new("1", "k", "").unwrap_err().message(), "ref is empty");
        assert_eq!(Pengyou::new("1", "k", "n").unwrap().appid(), "1");
    }

    #[test]
    fn test_get_user_info_empty_openid() {
        let err = pengyou().get_user_info("", "key").unwrap_err();
        assert_eq!(
            err.to_value(),
            serde_json::json!({"ret": 2001, "msg": "openid is empty"})
        );
    }

    #[test]
    fn test_get_user_info_non_hex_openid() {
        let err = pengyou().get_user_info(&"zz".repeat(16), "key").unwrap_err();
        assert_eq!(err.code(), 2002);
    }

    #[test]
    fn test_is_friend_short_fopenid() {
        let err = pengyou().is_friend(OPENID, "key", "short").unwrap_err();
        assert_eq!(
            err.to_value(),
            serde_json::json!({"ret": 2002, "msg": "fopenid is invalid"})
        );

        // fopenid is checked before the caller's own credentials
        let err = pengyou().is_friend("", "", "").unwrap_err();
        assert_eq!(err.message(), "fopenid is invalid");
    }

    #[test]
    fn test_is_friend_valid_fopenid_then_empty_openkey() {
        let err = pengyou().is_friend(OPENID, "", OPENID).unwrap_err();
        assert_eq!(err.code(), 2001);
        assert_eq!(err.message(), "openkey is empty");
    }

    #[test]
    fn test_fopenids_empty() {
        let none: Vec<String> = Vec::new();

        let err = pengyou().get_multi_info(OPENID, "key", &none).unwrap_err();
        assert_eq!(err.code(), 2001);
        assert_eq!(err.message(), "fopenids is empty");

        let err = pengyou().get_emotion(OPENID, "key", &none).unwrap_err();
        assert_eq!(err.code(), 2001);
    }

    #[test]
    fn test_other_operations_validate() {
        assert_eq!(pengyou().is_set_up("", "key").unwrap_err().code(), 2001);
        assert_eq!(pengyou().is_vip("abc", "key").unwrap_err().code(), 2002);
        assert_eq!(
            pengyou()
                .get_friend_list(OPENID, "", FriendListOptions::default())
                .unwrap_err()
                .code(),
            2001
        );
    }
}
