use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::client::OpenApiClient;
use crate::error::PengyouError;
use crate::types::response::null_as_default;
use crate::types::ApiParams;

pub const PAY_IS_VIP: &str = "pay/is_vip";

#[non_exhaustive]
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VipResponse {
    #[serde(default)]
    pub(crate) ret: i32,
    /// Yellow-diamond (VIP) user
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_vip: bool,
}

impl VipResponse {
    pub fn ret(&self) -> i32 {
        self.ret
    }
}

/// Pay API: VIP status
#[derive(Debug, Clone)]
pub struct PayApi {
    client: Arc<OpenApiClient>,
}

impl PayApi {
    pub fn new(client: Arc<OpenApiClient>) -> Self {
        Self { client }
    }

    /// Check whether the logged-in user is a VIP
    pub fn is_vip(&self, openid: &str, openkey: &str) -> Result<VipResponse, PengyouError> {
        self.client
            .api(PAY_IS_VIP, &ApiParams::new(openid, openkey))?
            .into_typed()
    }
}
