//! Custom extractors for the HTTP server.
//!
//! Request bodies may be JSON or `MessagePack`; responses follow the
//! `Accept` header, defaulting to JSON.

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Request},
    http::{
        header::{ACCEPT, CONTENT_TYPE},
        request::Parts,
        HeaderMap, StatusCode,
    },
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;
use std::convert::Infallible;

use crate::error::ErrorResponse;

/// Rejection type for [`Payload`]
#[derive(Debug)]
pub struct PayloadRejection {
    status: StatusCode,
    code: &'static str,
    message: String,
}

impl IntoResponse for PayloadRejection {
    fn into_response(self) -> Response {
        let body = ErrorResponse::new(self.code, self.message);
        (self.status, Json(body)).into_response()
    }
}

fn is_msgpack(value: &str) -> bool {
    value.contains("msgpack")
}

/// Extractor for JSON or `MessagePack` request bodies.
///
/// `application/msgpack` and `application/x-msgpack` bodies are decoded as
/// `MessagePack`; `application/json` or a missing content type as JSON.
pub struct Payload<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for Payload<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = PayloadRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_ascii_lowercase();

        let msgpack = is_msgpack(&content_type);
        if !msgpack && !content_type.is_empty() && !content_type.contains("json") {
            return Err(PayloadRejection {
                status: StatusCode::UNSUPPORTED_MEDIA_TYPE,
                code: "UNSUPPORTED_MEDIA_TYPE",
                message: format!(
                    "Invalid content type: expected application/json or application/msgpack, got {content_type}"
                ),
            });
        }

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| PayloadRejection {
                status: StatusCode::BAD_REQUEST,
                code: "BAD_REQUEST",
                message: format!("Failed to read request body: {e}"),
            })?;

        let decoded = if msgpack {
            rmp_serde::from_slice(&bytes).map_err(|e| format!("Failed to deserialize MessagePack: {e}"))
        } else {
            serde_json::from_slice(&bytes).map_err(|e| format!("Failed to deserialize JSON: {e}"))
        };

        decoded.map(Payload).map_err(|message| PayloadRejection {
            status: StatusCode::BAD_REQUEST,
            code: "DESERIALIZATION_ERROR",
            message,
        })
    }
}

/// Response encoding negotiated from the `Accept` header
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResponseFormat {
    #[default]
    Json,
    MsgPack,
}

impl ResponseFormat {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let accept = headers
            .get(ACCEPT)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");

        if is_msgpack(accept) {
            Self::MsgPack
        } else {
            Self::Json
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for ResponseFormat
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_headers(&parts.headers))
    }
}
