// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Decoded response values

use serde::de::DeserializeOwned;

use super::form::FormData;
use crate::error::{Error, Result};
use crate::file::Blob;

/// A decoded response body.
///
/// Mock handlers and interceptors produce and transform these too.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Text(String),
    Form(FormData),
    Json(serde_json::Value),
    Blob(Blob),
}

impl Payload {
    /// Short name of the variant, for logs
    pub fn kind(&self) -> &'static str {
        match self {
            Payload::Text(_) => "text",
            Payload::Form(_) => "form",
            Payload::Json(_) => "json",
            Payload::Blob(_) => "blob",
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Payload::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            Payload::Json(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_form(&self) -> Option<&FormData> {
        match self {
            Payload::Form(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_blob(&self) -> Option<&Blob> {
        match self {
            Payload::Blob(b) => Some(b),
            _ => None,
        }
    }

    /// Deserialize a JSON payload (or a text payload holding JSON)
    pub fn into_json<T: DeserializeOwned>(self) -> Result<T> {
        match self {
            Payload::Json(value) => Ok(serde_json::from_value(value)?),
            Payload::Text(text) => Ok(serde_json::from_str(&text)?),
            other => Err(Error::decode(format!(
                "expected a JSON payload, got {}",
                other.kind()
            ))),
        }
    }
}

impl From<String> for Payload {
    fn from(s: String) -> Self {
        Payload::Text(s)
    }
}

impl From<&str> for Payload {
    fn from(s: &str) -> Self {
        Payload::Text(s.to_string())
    }
}

impl From<serde_json::Value> for Payload {
    fn from(v: serde_json::Value) -> Self {
        Payload::Json(v)
    }
}

impl From<FormData> for Payload {
    fn from(f: FormData) -> Self {
        Payload::Form(f)
    }
}

impl From<Blob> for Payload {
    fn from(b: Blob) -> Self {
        Payload::Blob(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct User {
        id: u32,
    }

    #[test]
    fn test_into_json() {
        let user: User = Payload::from(json!({"id": 7})).into_json().unwrap();
        assert_eq!(user, User { id: 7 });

        let user: User = Payload::from("{\"id\": 8}").into_json().unwrap();
        assert_eq!(user, User { id: 8 });
    }

    #[test]
    fn test_into_json_rejects_blob() {
        let err = Payload::from(Blob::new("x", "image/png"))
            .into_json::<User>()
            .unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }
}
