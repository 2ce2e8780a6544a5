use serde_json::{json, Value};
use thiserror::Error;

/// A required parameter was empty or missing.
pub const ERROR_REQUIRED_PARAMETER_EMPTY: i32 = 2001;
/// A parameter failed format validation.
pub const ERROR_REQUIRED_PARAMETER_INVALID: i32 = 2002;
/// The response body was not a usable JSON object.
pub const ERROR_RESPONSE_DATA_INVALID: i32 = 2003;
/// Offset added to transport error codes (libcurl numbering).
pub const ERROR_TRANSPORT_OFFSET: i32 = 3000;

// libcurl error numbers used to classify transport failures
const CURLE_URL_MALFORMAT: i32 = 3;
const CURLE_COULDNT_CONNECT: i32 = 7;
const CURLE_OPERATION_TIMEDOUT: i32 = 28;
const CURLE_TOO_MANY_REDIRECTS: i32 = 47;
const CURLE_RECV_ERROR: i32 = 56;

/// Local parameter validation failure, raised before any network call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is empty")]
    Empty(&'static str),

    #[error("{0} is invalid")]
    Invalid(&'static str),
}

impl ValidationError {
    pub fn code(&self) -> i32 {
        match self {
            ValidationError::Empty(_) => ERROR_REQUIRED_PARAMETER_EMPTY,
            ValidationError::Invalid(_) => ERROR_REQUIRED_PARAMETER_INVALID,
        }
    }

    /// Name of the offending parameter
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::Empty(field) | ValidationError::Invalid(field) => field,
        }
    }
}

/// Pengyou SDK error types
///
/// Every variant maps to the numeric `ret` code used on the wire, see
/// [`PengyouError::code`].
#[derive(Debug, Error)]
pub enum PengyouError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("transport error (code={code}): {message}")]
    Transport { code: i32, message: String },

    #[error("Pengyou API error (code={code}): {message}")]
    Api { code: i32, message: String },
}

impl PengyouError {
    /// The `ret` code this error reports to callers.
    pub fn code(&self) -> i32 {
        match self {
            PengyouError::Validation(e) => e.code(),
            PengyouError::InvalidResponse(_) => ERROR_RESPONSE_DATA_INVALID,
            PengyouError::Transport { code, .. } | PengyouError::Api { code, .. } => *code,
        }
    }

    /// The `msg` this error reports to callers.
    ///
    /// For [`PengyouError::InvalidResponse`] this is the raw response body.
    pub fn message(&self) -> String {
        match self {
            PengyouError::Validation(e) => e.to_string(),
            PengyouError::InvalidResponse(body) => body.clone(),
            PengyouError::Transport { message, .. } | PengyouError::Api { message, .. } => {
                message.clone()
            }
        }
    }

    /// Renders the error as the `{"ret": .., "msg": ..}` mapping returned by
    /// other Pengyou SDKs.
    pub fn to_value(&self) -> Value {
        json!({
            "ret": self.code(),
            "msg": self.message(),
        })
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, PengyouError::Validation(_))
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, PengyouError::Transport { .. })
    }
}

fn transport_error_code(err: &reqwest::Error) -> i32 {
    if err.is_builder() {
        CURLE_URL_MALFORMAT
    } else if err.is_timeout() {
        CURLE_OPERATION_TIMEDOUT
    } else if err.is_connect() {
        CURLE_COULDNT_CONNECT
    } else if err.is_redirect() {
        CURLE_TOO_MANY_REDIRECTS
    } else if err.is_body() || err.is_decode() {
        CURLE_RECV_ERROR
    } else {
        0
    }
}

impl From<reqwest::Error> for PengyouError {
    fn from(err: reqwest::Error) -> Self {
        PengyouError::Transport {
            code: ERROR_TRANSPORT_OFFSET + transport_error_code(&err),
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_messages() {
        assert_eq!(
            ValidationError::Empty("openid").to_string(),
            "openid is empty"
        );
        assert_eq!(
            ValidationError::Invalid("fopenid").to_string(),
            "fopenid is invalid"
        );
        assert_eq!(ValidationError::Invalid("fopenid").field(), "fopenid");
    }

    #[test]
    fn test_codes() {
        let empty: PengyouError = ValidationError::Empty("openkey").into();
        assert_eq!(empty.code(), 2001);
        assert!(empty.is_validation());

        let invalid: PengyouError = ValidationError::Invalid("openid").into();
        assert_eq!(invalid.code(), 2002);

        let response = PengyouError::InvalidResponse("{}".to_string());
        assert_eq!(response.code(), 2003);
        assert_eq!(response.message(), "{}");

        let transport = PengyouError::Transport {
            code: 3007,
            message: "connection refused".to_string(),
        };
        assert_eq!(transport.code(), 3007);
        assert!(transport.is_transport());

        let api = PengyouError::Api {
            code: 1002,
            message: "openkey expired".to_string(),
        };
        assert_eq!(api.code(), 1002);
        assert!(!api.is_transport());
    }

    #[test]
    fn test_to_value() {
        let err: PengyouError = ValidationError::Empty("openid").into();
        assert_eq!(
            err.to_value(),
            json!({"ret": 2001, "msg": "openid is empty"})
        );

        let err = PengyouError::Api {
            code: 1001,
            message: "bad sig".to_string(),
        };
        assert_eq!(err.to_value(), json!({"ret": 1001, "msg": "bad sig"}));
    }

    #[test]
    fn test_builder_error_maps_to_malformed_url() {
        let err = reqwest::blocking::Client::new()
            .post("http://exa mple.com/")
            .build()
            .unwrap_err();
        let err: PengyouError = err.into();
        assert_eq!(err.code(), 3003);
    }
}
