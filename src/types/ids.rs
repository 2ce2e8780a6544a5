use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Length of a Pengyou OpenID in hexadecimal characters
pub const OPEN_ID_LEN: usize = 32;

/// Returns true if `open_id` is exactly 32 hexadecimal characters
/// (case-insensitive).
pub fn is_valid_open_id(open_id: &str) -> bool {
    open_id.len() == OPEN_ID_LEN && open_id.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Pengyou OpenID (32 hex characters, scoped to the application)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OpenId(String);

impl OpenId {
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if !is_valid_open_id(&id) {
            return Err(ValidationError::Invalid("openid"));
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Session credential paired with an OpenID
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OpenKey(String);

impl OpenKey {
    pub fn new(key: impl Into<String>) -> Result<Self, ValidationError> {
        let key = key.into();
        if key.is_empty() {
            return Err(ValidationError::Empty("openkey"));
        }
        Ok(Self(key))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for OpenKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("OpenKey([REDACTED])")
    }
}

/// Application ID issued by the platform
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AppId(String);

impl AppId {
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.is_empty() {
            return Err(ValidationError::Empty("appid"));
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Application key, proves the caller is the registered application
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AppKey(String);

impl AppKey {
    pub fn new(key: impl Into<String>) -> Result<Self, ValidationError> {
        let key = key.into();
        if key.is_empty() {
            return Err(ValidationError::Empty("appkey"));
        }
        Ok(Self(key))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for AppKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AppKey([REDACTED])")
    }
}

/// Unique English application name, sent as the `ref` tracking parameter
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AppName(String);

impl AppName {
    pub fn new(name: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ValidationError::Empty("ref"));
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
