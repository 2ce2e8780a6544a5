//! Pengyou OpenAPI modules
//!
//! - [`user`] - Profile, batch profiles, install status, friends' status lines
//! - [`relation`] - Friendship checks and friend lists
//! - [`pay`] - VIP status
//!
//! Each API type wraps a shared [`OpenApiClient`](crate::client::OpenApiClient);
//! most callers use the [`Pengyou`](crate::Pengyou) facade instead.

pub mod pay;
pub mod relation;
pub mod user;

pub use pay::{PayApi, VipResponse};
pub use relation::{
    AppInstallFilter, FriendItem, FriendListOptions, FriendListResponse, FriendRelation,
    IsFriendResponse, RelationApi,
};
pub use user::{
    EmotionItem, EmotionResponse, MultiInfoItem, MultiInfoResponse, SetupResponse, UserApi,
    UserInfo,
};
