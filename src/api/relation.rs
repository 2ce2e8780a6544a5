use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::client::OpenApiClient;
use crate::error::{PengyouError, ValidationError};
use crate::types::response::null_as_default;
use crate::types::{is_valid_open_id, ApiParams};

pub const RELATION_IS_FRIEND: &str = "relation/is_friend";
pub const RELATION_FRIENDS: &str = "relation/friends";

/// Relationship between two users as reported by `relation/is_friend`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FriendRelation {
    NotFriend,
    Friend,
    Classmate,
    Unknown(u8),
}

impl From<u8> for FriendRelation {
    fn from(value: u8) -> Self {
        match value {
            0 => FriendRelation::NotFriend,
            1 => FriendRelation::Friend,
            2 => FriendRelation::Classmate,
            other => FriendRelation::Unknown(other),
        }
    }
}

#[non_exhaustive]
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IsFriendResponse {
    #[serde(default)]
    pub(crate) ret: i32,
    #[serde(rename = "isFriend", default, deserialize_with = "null_as_default")]
    pub(crate) is_friend: u8,
}

impl IsFriendResponse {
    pub fn ret(&self) -> i32 {
        self.ret
    }

    pub fn relation(&self) -> FriendRelation {
        FriendRelation::from(self.is_friend)
    }

    /// True for friends and classmates
    pub fn is_friend(&self) -> bool {
        matches!(
            self.relation(),
            FriendRelation::Friend | FriendRelation::Classmate
        )
    }
}

/// Which friends `relation/friends` returns, by install status of this app
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppInstallFilter {
    /// Friends who have not installed the app (`-1`)
    NotInstalled,
    /// All friends (`0`)
    All,
    /// Friends who installed the app (`1`)
    #[default]
    Installed,
}

impl AppInstallFilter {
    pub fn as_param(&self) -> &'static str {
        match self {
            AppInstallFilter::NotInstalled => "-1",
            AppInstallFilter::All => "0",
            AppInstallFilter::Installed => "1",
        }
    }
}

/// Options for `get_friend_list`
///
/// Defaults: no details (`infoed=0`), friends who installed the app
/// (`apped=1`), all pages (`page=0`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FriendListOptions {
    /// Include nickname, gender and avatar for each friend
    pub infoed: bool,
    pub apped: AppInstallFilter,
    /// 0 returns every friend; n >= 1 returns the n-th page of 100
    pub page: u32,
}

impl FriendListOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_info(mut self) -> Self {
        self.infoed = true;
        self
    }

    pub fn apped(mut self, apped: AppInstallFilter) -> Self {
        self.apped = apped;
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    fn apply(&self, params: ApiParams) -> ApiParams {
        params
            .param("infoed", if self.infoed { "1" } else { "0" })
            .param("apped", self.apped.as_param())
            .param("page", self.page.to_string())
    }
}

/// One friend; profile fields are only filled when `infoed` was requested
#[non_exhaustive]
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FriendItem {
    pub openid: String,
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub figureurl: Option<String>,
}

#[non_exhaustive]
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FriendListResponse {
    #[serde(default)]
    pub(crate) ret: i32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<FriendItem>,
}

impl FriendListResponse {
    pub fn ret(&self) -> i32 {
        self.ret
    }
}

/// Relation API: friendship checks and friend lists
#[derive(Debug, Clone)]
pub struct RelationApi {
    client: Arc<OpenApiClient>,
}

impl RelationApi {
    pub fn new(client: Arc<OpenApiClient>) -> Self {
        Self { client }
    }

    /// Check whether `fopenid` is a friend of `openid`
    ///
    /// # Errors
    /// `fopenid` is checked first: anything other than 32 hex characters,
    /// including an empty string, is a 2002 validation error.
    pub fn is_friend(
        &self,
        openid: &str,
        openkey: &str,
        fopenid: &str,
    ) -> Result<IsFriendResponse, PengyouError> {
        if !is_valid_open_id(fopenid) {
            return Err(ValidationError::Invalid("fopenid").into());
        }

        let params = ApiParams::new(openid, openkey).param("fopenid", fopenid);
        self.client.api(RELATION_IS_FRIEND, &params)?.into_typed()
    }

    /// Get the logged-in user's friends
    pub fn get_friend_list(
        &self,
        openid: &str,
        openkey: &str,
        options: FriendListOptions,
    ) -> Result<FriendListResponse, PengyouError> {
        let params = options.apply(ApiParams::new(openid, openkey));
        self.client.api(RELATION_FRIENDS, &params)?.into_typed()
    }
}
