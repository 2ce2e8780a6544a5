use std::time::Duration;

use log::{debug, info};

const SENSITIVE_FIELDS: &[&str] = &["appkey", "openkey"];

/// Request/response logging for [`OpenApiClient`](super::OpenApiClient).
///
/// The quiet mode logs one `info!` line per request and per response. The
/// verbose mode logs at `debug!` and includes the form body with credentials
/// redacted.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct RequestLogger {
    verbose: bool,
}

impl RequestLogger {
    pub(crate) fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    pub(crate) fn redact_form(body: &str) -> String {
        body.split('&')
            .map(|pair| match pair.split_once('=') {
                Some((key, _)) if SENSITIVE_FIELDS.iter().any(|s| key.eq_ignore_ascii_case(s)) => {
                    format!("{}=[REDACTED]", key)
                }
                _ => pair.to_string(),
            })
            .collect::<Vec<_>>()
            .join("&")
    }

    pub(crate) fn log_request(&self, url: &str, body: &str) {
        if self.verbose {
            debug!("[Pengyou] >>> POST {} {}", url, Self::redact_form(body));
        } else {
            info!("[Pengyou] POST {}", url);
        }
    }

    pub(crate) fn log_response(&self, status: u16, duration: Duration) {
        if self.verbose {
            debug!(
                "[Pengyou] <<< {} - {} ({:?})",
                status,
                Self::status_text(status),
                duration
            );
        } else {
            info!("[Pengyou] {} ({:?})", status, duration);
        }
    }

    fn status_text(status: u16) -> &'static str {
        match status {
            200 => "OK",
            301 => "Moved Permanently",
            302 => "Found",
            400 => "Bad Request",
            403 => "Forbidden",
            404 => "Not Found",
            500 => "Internal Server Error",
            502 => "Bad Gateway",
            503 => "Service Unavailable",
            504 => "Gateway Timeout",
            _ => "",
        }
    }
}
