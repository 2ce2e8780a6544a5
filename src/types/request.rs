use crate::error::ValidationError;
use crate::types::{OpenId, OpenKey};

/// Parameters of a single OpenAPI call.
///
/// `openid` and `openkey` are always sent first, followed by the
/// method-specific parameters in insertion order. Application credentials
/// are appended by the client.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiParams {
    openid: String,
    openkey: String,
    extra: Vec<(String, String)>,
}

impl ApiParams {
    pub fn new(openid: impl Into<String>, openkey: impl Into<String>) -> Self {
        Self {
            openid: openid.into(),
            openkey: openkey.into(),
            extra: Vec::new(),
        }
    }

    /// Add a method-specific parameter
    ///
    /// Pass `value` unescaped; the client percent-encodes it, so an already
    /// escaped `a%2Bb` would be sent as `a%252Bb`.
    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.push((name.into(), value.into()));
        self
    }

    pub fn openid(&self) -> &str {
        &self.openid
    }

    pub fn openkey(&self) -> &str {
        &self.openkey
    }

    pub fn extra(&self) -> &[(String, String)] {
        &self.extra
    }

    /// Checks the user credentials, in order: openid present, openkey
    /// present, openid well-formed.
    pub fn validate(&self) -> Result<(OpenId, OpenKey), ValidationError> {
        if self.openid.is_empty() {
            return Err(ValidationError::Empty("openid"));
        }
        let openkey = OpenKey::new(self.openkey.as_str())?;
        let openid = OpenId::new(self.openid.as_str())?;
        Ok((openid, openkey))
    }
}

impl std::fmt::Debug for ApiParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiParams")
            .field("openid", &self.openid)
            .field("openkey", &"[REDACTED]")
            .field("extra", &self.extra)
            .finish()
    }
}
