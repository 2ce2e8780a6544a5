//! Pengyou OpenAPI SDK for Rust
//!
//! A blocking client for the Pengyou social platform OpenAPI: user profile,
//! friend relations, VIP status and friends' status lines.
//!
//! ## API Coverage
//!
//! | Operation | Remote method |
//! |-----------|---------------|
//! | [`Pengyou::get_user_info`] | `user/info` |
//! | [`Pengyou::get_multi_info`] | `user/multi_info` |
//! | [`Pengyou::is_set_up`] | `user/is_setuped` |
//! | [`Pengyou::get_emotion`] | `user/emotion` |
//! | [`Pengyou::is_friend`] | `relation/is_friend` |
//! | [`Pengyou::get_friend_list`] | `relation/friends` |
//! | [`Pengyou::is_vip`] | `pay/is_vip` |
//!
//! Any other method can be reached through [`OpenApiClient::api`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pengyou_openapi_sdk::{api::FriendListOptions, Pengyou};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let pengyou = Pengyou::new("100629", "app_key", "myapp")?;
//!
//!     let openid = "0123456789ABCDEF0123456789ABCDEF";
//!     let friends = pengyou.get_friend_list(openid, "openkey", FriendListOptions::new().with_info())?;
//!     for friend in &friends.items {
//!         println!("{}", friend.openid);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Every failure is a [`PengyouError`] with a numeric code compatible with
//! other Pengyou SDKs:
//!
//! | Code | Meaning |
//! |------|---------|
//! | 2001 | required parameter empty |
//! | 2002 | parameter malformed |
//! | 2003 | response body is not a usable JSON object |
//! | 3000 + n | transport failure (libcurl numbering) |
//! | other | error `ret` reported by the remote service |
//!
//! ```rust,ignore
//! match pengyou.is_vip(openid, openkey) {
//!     Ok(vip) => println!("vip: {}", vip.is_vip),
//!     Err(e) => eprintln!("ret={} msg={}", e.code(), e.message()),
//! }
//! ```

pub mod api;
pub mod client;
pub mod error;
pub mod types;

pub use client::{OpenApiClient, OpenApiClientBuilder, Pengyou, PengyouBuilder};
pub use error::{PengyouError, ValidationError};
pub use types::is_valid_open_id;
