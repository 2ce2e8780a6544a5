//! Pengyou OpenAPI HTTP client
//!
//! Holds the application credentials and performs the form-encoded POST
//! shared by every OpenAPI method.

use std::time::{Duration, Instant};

use log::{debug, warn};
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;

use super::form::encode_form;
use super::logging::RequestLogger;
use crate::error::{PengyouError, ValidationError};
use crate::types::{ApiParams, ApiResponse, AppId, AppKey, AppName, OpenId, OpenKey};

pub(crate) const DEFAULT_SERVER_NAME: &str = "119.147.75.204";
pub(crate) const DEFAULT_USER_AGENT: &str = "pengyou-php-1.1";

const API_PATH_PREFIX: &str = "/cgi-bin/xyoapp/";
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Pengyou OpenAPI client
///
/// Immutable after construction and cheap to clone; the underlying
/// [`reqwest::blocking::Client`] is shared between clones. Every call is a
/// single synchronous POST with no retry.
#[derive(Clone)]
pub struct OpenApiClient {
    http: Client,
    appid: AppId,
    appkey: AppKey,
    app_name: AppName,
    server_name: String,
    user_agent: String,
    logger: RequestLogger,
}

impl std::fmt::Debug for OpenApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenApiClient")
            .field("appid", &self.appid)
            .field("app_name", &self.app_name)
            .field("server_name", &self.server_name)
            .field("user_agent", &self.user_agent)
            .finish_non_exhaustive()
    }
}

impl OpenApiClient {
    /// Create a new client builder
    pub fn builder() -> OpenApiClientBuilder {
        OpenApiClientBuilder::default()
    }

    /// Get the appid
    pub fn appid(&self) -> &str {
        self.appid.as_str()
    }

    /// Get the application name sent as `ref`
    pub fn app_name(&self) -> &str {
        self.app_name.as_str()
    }

    /// Get the OpenAPI server host
    pub fn server_name(&self) -> &str {
        &self.server_name
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Path of an OpenAPI method, e.g. `user/info` → `/cgi-bin/xyoapp/user/info.cgi`
    pub fn api_path(method: &str) -> String {
        format!("{}{}.cgi", API_PATH_PREFIX, method.trim_start_matches('/'))
    }

    pub fn api_url(&self, method: &str) -> String {
        format!("http://{}{}", self.server_name, Self::api_path(method))
    }

    /// Form body for one call: user credentials, method parameters, then
    /// application credentials.
    pub(crate) fn form_body(
        &self,
        openid: &OpenId,
        openkey: &OpenKey,
        extra: &[(String, String)],
    ) -> String {
        let user = [("openid", openid.as_str()), ("openkey", openkey.as_str())];
        let app = [
            ("appid", self.appid.as_str()),
            ("appkey", self.appkey.as_str()),
            ("ref", self.app_name.as_str()),
        ];

        encode_form(
            user.into_iter()
                .chain(extra.iter().map(|(k, v)| (k.as_str(), v.as_str())))
                .chain(app),
        )
    }

    /// Call an OpenAPI method
    ///
    /// # Arguments
    /// * `method` - Remote method name (e.g., "user/info")
    /// * `params` - User credentials and method-specific parameters
    ///
    /// # Errors
    /// - `PengyouError::Validation` when openid/openkey are empty or openid
    ///   is malformed; no request is sent
    /// - `PengyouError::Transport` for network failures
    /// - `PengyouError::InvalidResponse` when the body is not a usable JSON object
    /// - `PengyouError::Api` when the remote reports an error `ret`
    pub fn api(&self, method: &str, params: &ApiParams) -> Result<ApiResponse, PengyouError> {
        let (openid, openkey) = params.validate().map_err(|e| {
            debug!("[Pengyou] {} rejected: {}", method, e);
            e
        })?;

        let url = self.api_url(method);
        let body = self.form_body(&openid, &openkey, params.extra());
        let text = self.post_form(&url, body)?;

        ApiResponse::parse(&text).map_err(|e| {
            if matches!(e, PengyouError::InvalidResponse(_)) {
                warn!("[Pengyou] {} returned an invalid body: {:?}", method, text);
            }
            e
        })
    }

    fn post_form(&self, url: &str, body: String) -> Result<String, PengyouError> {
        self.logger.log_request(url, &body);

        let start = Instant::now();
        let response = self
            .http
            .post(url)
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .body(body)
            .send()
            .map_err(transport_error)?;
        let status = response.status();
        self.logger.log_response(status.as_u16(), start.elapsed());
        if !status.is_success() {
            warn!("[Pengyou] {} answered with HTTP {}", url, status);
        }

        // The remote reports errors in the body, whatever the status
        response.text().map_err(transport_error)
    }
}

fn transport_error(err: reqwest::Error) -> PengyouError {
    let err = PengyouError::from(err);
    warn!("[Pengyou] {}", err);
    err
}

fn validate_server_name(server_name: &str) -> Result<(), ValidationError> {
    if server_name.is_empty()
        || server_name.contains('/')
        || server_name.chars().any(char::is_whitespace)
    {
        return Err(ValidationError::Invalid("server_name"));
    }
    Ok(())
}

/// Builder for OpenApiClient
///
/// # Example
///
/// ```rust
/// use pengyou_openapi_sdk::client::OpenApiClient;
/// use pengyou_openapi_sdk::types::{AppId, AppKey, AppName};
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = OpenApiClient::builder()
///         .appid(AppId::new("100000")?)
///         .appkey(AppKey::new("app_key")?)
///         .app_name(AppName::new("myapp")?)
///         .build()?;
///
///     assert_eq!(client.server_name(), "119.147.75.204");
///     Ok(())
/// }
/// ```
#[derive(Debug, Default)]
pub struct OpenApiClientBuilder {
    appid: Option<AppId>,
    appkey: Option<AppKey>,
    app_name: Option<AppName>,
    server_name: Option<String>,
    user_agent: Option<String>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    verbose: bool,
}

impl OpenApiClientBuilder {
    pub fn appid(mut self, appid: AppId) -> Self {
        self.appid = Some(appid);
        self
    }

    pub fn appkey(mut self, appkey: AppKey) -> Self {
        self.appkey = Some(appkey);
        self
    }

    pub fn app_name(mut self, app_name: AppName) -> Self {
        self.app_name = Some(app_name);
        self
    }

    /// Set the OpenAPI server host (with optional port)
    ///
    /// Default: `119.147.75.204`
    pub fn server_name(mut self, server_name: impl Into<String>) -> Self {
        self.server_name = Some(server_name.into());
        self
    }

    /// Default: `pengyou-php-1.1`
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Set the total timeout for requests
    ///
    /// Default: the transport default
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the connection timeout
    ///
    /// Default: the transport default
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Log at `debug!` level, including redacted request bodies
    pub fn verbose(mut self) -> Self {
        self.verbose = true;
        self
    }

    /// Build the OpenApiClient
    ///
    /// # Errors
    /// Returns `PengyouError::Validation` if a credential is missing or the
    /// server name is not a bare host, and `PengyouError::Transport` if the
    /// HTTP client cannot be initialised.
    pub fn build(self) -> Result<OpenApiClient, PengyouError> {
        let appid = self.appid.ok_or(ValidationError::Empty("appid"))?;
        let appkey = self.appkey.ok_or(ValidationError::Empty("appkey"))?;
        let app_name = self.app_name.ok_or(ValidationError::Empty("ref"))?;

        let server_name = self
            .server_name
            .unwrap_or_else(|| DEFAULT_SERVER_NAME.to_string());
        validate_server_name(&server_name)?;

        let user_agent = self
            .user_agent
            .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());

        let mut http = Client::builder().user_agent(user_agent.clone());
        if let Some(timeout) = self.timeout {
            http = http.timeout(timeout);
        }
        if let Some(connect_timeout) = self.connect_timeout {
            http = http.connect_timeout(connect_timeout);
        }

        Ok(OpenApiClient {
            http: http.build()?,
            appid,
            appkey,
            app_name,
            server_name,
            user_agent,
            logger: RequestLogger::new(self.verbose),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OPENID: &str = "0123456789ABCDEF0123456789ABCDEF";

    fn builder() -> OpenApiClientBuilder {
        OpenApiClient::builder()
            .appid(AppId::new("100629").unwrap())
            .appkey(AppKey::new("k e&y").unwrap())
            .app_name(AppName::new("demo").unwrap())
    }

    #[test]
    fn test_builder_default_values() {
        let client = builder().build().unwrap();

        assert_eq!(client.appid(), "100629");
        assert_eq!(client.app_name(), "demo");
        assert_eq!(client.server_name(), DEFAULT_SERVER_NAME);
        assert_eq!(client.user_agent(), DEFAULT_USER_AGENT);
    }

    #[test]
    fn test_builder_custom_values() {
        let client = builder()
            .server_name("127.0.0.1:8080")
            .user_agent("custom-agent/2.0")
            .timeout(Duration::from_secs(5))
            .connect_timeout(Duration::from_secs(1))
            .verbose()
            .build()
            .unwrap();

        assert_eq!(client.server_name(), "127.0.0.1:8080");
        assert_eq!(client.user_agent(), "custom-agent/2.0");
        assert_eq!(
            client.api_url("user/info"),
            "http://127.0.0.1:8080/cgi-bin/xyoapp/user/info.cgi"
        );
    }

    #[test]
    fn test_builder_missing_credentials() {
        let err = OpenApiClient::builder().build().unwrap_err();
        assert_eq!(err.to_string(), "appid is empty");

        let err = OpenApiClient::builder()
            .appid(AppId::new("1").unwrap())
            .build()
            .unwrap_err();
        assert_eq!(err.to_string(), "appkey is empty");

        let err = OpenApiClient::builder()
            .appid(AppId::new("1").unwrap())
            .appkey(AppKey::new("k").unwrap())
            .build()
            .unwrap_err();
        assert_eq!(err.to_string(), "ref is empty");
        assert_eq!(err.code(), 2001);
    }

    #[test]
    fn test_builder_rejects_bad_server_name() {
        for server_name in ["", "http://example.com", "exa mple.com"] {
            let err = builder().server_name(server_name).build().unwrap_err();
            assert_eq!(err.code(), 2002, "server name {:?}", server_name);
        }
    }

    #[test]
    fn test_api_path() {
        assert_eq!(
            OpenApiClient::api_path("relation/friends"),
            "/cgi-bin/xyoapp/relation/friends.cgi"
        );
        assert_eq!(
            OpenApiClient::api_path("/pay/is_vip"),
            "/cgi-bin/xyoapp/pay/is_vip.cgi"
        );
    }

    #[test]
    fn test_form_body_order_and_escaping() {
        let client = builder().build().unwrap();
        let openid = OpenId::new(OPENID).unwrap();
        let openkey = OpenKey::new("sess").unwrap();
        let extra = vec![("fopenid".to_string(), "ab".to_string())];

        assert_eq!(
            client.form_body(&openid, &openkey, &extra),
            format!(
                "openid={}&openkey=sess&fopenid=ab&appid=100629&appkey=k%20e%26y&ref=demo",
                OPENID
            )
        );
    }

    #[test]
    fn test_api_validates_before_sending() {
        // nothing listens on this host; validation must fail first
        let client = builder().server_name("127.0.0.1:1").build().unwrap();

        let err = client
            .api("user/info", &ApiParams::new("", "key"))
            .unwrap_err();
        assert_eq!(err.to_value(), serde_json::json!({"ret": 2001, "msg": "openid is empty"}));

        let err = client
            .api("user/info", &ApiParams::new(OPENID, ""))
            .unwrap_err();
        assert_eq!(err.message(), "openkey is empty");

        let err = client
            .api("user/info", &ApiParams::new("zz".repeat(16), "key"))
            .unwrap_err();
        assert_eq!(err.code(), 2002);
        assert_eq!(err.message(), "openid is invalid");
    }

    #[test]
    fn test_debug_hides_appkey() {
        let client = builder().build().unwrap();
        let debug = format!("{:?}", client);
        assert!(debug.contains("100629"));
        assert!(!debug.contains("k e&y"));
    }
}
