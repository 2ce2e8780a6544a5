use std::time::Duration;

use crate::error::PengyouError;
use crate::types::{AppId, AppKey, AppName};

use super::openapi_client::OpenApiClientBuilder;
use super::Pengyou;

/// Builder for [`Pengyou`]
///
/// Only the application triple is required; see
/// [`OpenApiClientBuilder`] for the defaults of the other settings.
#[must_use]
#[derive(Debug, Default)]
pub struct PengyouBuilder {
    inner: OpenApiClientBuilder,
}

impl PengyouBuilder {
    pub fn appid(mut self, appid: AppId) -> Self {
        self.inner = self.inner.appid(appid);
        self
    }

    pub fn appkey(mut self, appkey: AppKey) -> Self {
        self.inner = self.inner.appkey(appkey);
        self
    }

    pub fn app_name(mut self, app_name: AppName) -> Self {
        self.inner = self.inner.app_name(app_name);
        self
    }

    pub fn server_name(mut self, server_name: impl Into<String>) -> Self {
        self.inner = self.inner.server_name(server_name);
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.inner = self.inner.user_agent(user_agent);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.inner = self.inner.timeout(timeout);
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.inner = self.inner.connect_timeout(timeout);
        self
    }

    pub fn verbose(mut self) -> Self {
        self.inner = self.inner.verbose();
        self
    }

    pub fn build(self) -> Result<Pengyou, PengyouError> {
        Ok(Pengyou::from(self.inner.build()?))
    }
}
