use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::error::PengyouError;

/// Remote codes at or above this value are errors; codes between 0 and this
/// value mean some of the requested data could not be fetched.
pub const REMOTE_ERROR_THRESHOLD: i32 = 1000;

/// Raw OpenAPI response: the decoded JSON object with its `ret` code.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    ret: i32,
    body: Map<String, Value>,
}

impl ApiResponse {
    /// Parses a response body.
    ///
    /// # Errors
    /// - `PengyouError::InvalidResponse` if the body is not a non-empty JSON
    ///   object carrying an integer `ret`
    /// - `PengyouError::Api` if `ret` is negative or at least 1000
    pub fn parse(body: &str) -> Result<Self, PengyouError> {
        let invalid = || PengyouError::InvalidResponse(body.to_string());

        let object = match serde_json::from_str::<Value>(body) {
            Ok(Value::Object(object)) if !object.is_empty() => object,
            _ => return Err(invalid()),
        };

        let ret = object
            .get("ret")
            .and_then(Value::as_i64)
            .ok_or_else(invalid)?;
        // Out-of-range codes saturate, keeping their sign
        let ret = i32::try_from(ret).unwrap_or(if ret < 0 { i32::MIN } else { i32::MAX });

        if !(0..REMOTE_ERROR_THRESHOLD).contains(&ret) {
            let msg = object
                .get("msg")
                .and_then(Value::as_str)
                .unwrap_or("unknown error");
            return Err(PengyouError::Api {
                code: ret,
                message: msg.to_string(),
            });
        }

        Ok(Self { ret, body: object })
    }

    pub fn ret(&self) -> i32 {
        self.ret
    }

    pub fn msg(&self) -> Option<&str> {
        self.body.get("msg").and_then(Value::as_str)
    }

    pub fn is_success(&self) -> bool {
        self.ret == 0
    }

    /// True when the remote returned only part of the requested data
    pub fn is_partial(&self) -> bool {
        self.ret > 0
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.body.get(key)
    }

    /// The whole decoded object, `ret` included
    pub fn body(&self) -> &Map<String, Value> {
        &self.body
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.body)
    }

    /// Deserializes the response into a typed structure.
    ///
    /// # Errors
    /// Returns `PengyouError::InvalidResponse` carrying the raw body if the
    /// fields do not match `T`.
    pub fn into_typed<T: DeserializeOwned>(self) -> Result<T, PengyouError> {
        let value = Value::Object(self.body);
        serde_json::from_value::<T>(value.clone()).map_err(|e| {
            log::warn!("[Pengyou] cannot decode response: {}", e);
            PengyouError::InvalidResponse(value.to_string())
        })
    }
}

/// Deserializes a JSON `null` as the field type's default.
///
/// Used together with `#[serde(default)]` so both a missing key and an
/// explicit `null` yield the default.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
