//! HTTP request executor.
//!
//! One method, one path, one attempt. Transport failures come back as values
//! ([`TransportError`]) instead of bubbling up, so every phase suite handles
//! "the server never answered" the same way it handles a bad status code:
//! by recording a failed outcome and moving on. No retries and no timeout
//! override beyond the transport default; the harness reports current state
//! rather than papering over transient faults.

use reqwest::Method;
use serde_json::Value;

use crate::error::{ProbeError, TransportError};

/// Request body variants the harness sends.
#[derive(Debug, Clone)]
pub enum Payload {
    /// No body at all (GET, DELETE, logout).
    Empty,
    /// JSON-encoded body with an explicit `application/json` content type.
    Json(Value),
    /// Multipart form fields plus one file part. Multipart wins over JSON
    /// regardless of verb.
    Multipart {
        /// Plain text form fields.
        fields: Vec<(String, String)>,
        /// The file part.
        file: UploadFile,
    },
}

/// A file carried in a multipart request.
#[derive(Debug, Clone)]
pub struct UploadFile {
    /// Form field name (e.g. `featured_image`).
    pub field: String,
    /// Reported file name.
    pub filename: String,
    /// MIME type of the content.
    pub mime: String,
    /// Raw file bytes.
    pub bytes: Vec<u8>,
}

/// A response the server actually produced: status code plus parsed body.
///
/// Non-JSON and empty bodies parse to [`Value::Null`] rather than failing;
/// the harness only ever asserts on fields it can see.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    /// HTTP status code.
    pub status: u16,
    /// Parsed JSON body, `Null` when absent or unparseable.
    pub body: Value,
}

impl ApiResponse {
    /// Decode the body into a typed record.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error when the body does not match `T`.
    pub fn decode<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(self.body.clone())
    }

    /// The server-reported `error` field, when present.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.body.get("error").and_then(Value::as_str)
    }
}

/// HTTP client bound to one CMS server for the duration of a run.
///
/// Holds the base address and, once the authentication phase has run, the
/// bearer token attached to every subsequent request.
#[derive(Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Create a client for `base_url` (scheme + host + port, no trailing
    /// slash required).
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::InvalidBaseAddress`] for non-HTTP addresses and
    /// [`ProbeError::ClientBuild`] when the underlying client cannot be
    /// constructed.
    pub fn new(base_url: &str) -> Result<Self, ProbeError> {
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ProbeError::InvalidBaseAddress {
                address: base_url.to_string(),
                reason: "expected an http:// or https:// address".to_string(),
            });
        }
        let http = reqwest::Client::builder()
            .build()
            .map_err(ProbeError::ClientBuild)?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
        })
    }

    /// Store the bearer token attached to subsequent requests.
    pub fn set_token(&mut self, token: String) {
        self.token = Some(token);
    }

    /// The currently held bearer token, if any.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Issue one request and fully resolve it.
    ///
    /// Attaches `Authorization: Bearer <token>` when a token is held, unless
    /// `extra_headers` carries its own `Authorization` entry.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] when no response was received (connection
    /// refused, DNS failure, timeout). Bad status codes are not errors; the
    /// response is returned as-is for the caller to judge.
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        payload: Payload,
        extra_headers: &[(&str, &str)],
    ) -> Result<ApiResponse, TransportError> {
        let url = format!("{}{path}", self.base_url);
        tracing::debug!(%method, %url, "dispatching request");

        let mut request = self.http.request(method, &url);

        let caller_authorization = extra_headers
            .iter()
            .any(|(name, _)| name.eq_ignore_ascii_case("authorization"));
        if let Some(token) = &self.token {
            if !caller_authorization {
                request = request.bearer_auth(token);
            }
        }
        for (name, value) in extra_headers {
            request = request.header(*name, *value);
        }

        request = match payload {
            Payload::Empty => request,
            Payload::Json(body) => request.json(&body),
            Payload::Multipart { fields, file } => {
                let mut form = reqwest::multipart::Form::new();
                for (name, value) in fields {
                    form = form.text(name, value);
                }
                let part = reqwest::multipart::Part::bytes(file.bytes)
                    .file_name(file.filename)
                    .mime_str(&file.mime)?;
                request.multipart(form.part(file.field, part))
            }
        };

        let response = match request.send().await {
            Ok(response) => response,
            Err(error) => {
                tracing::warn!(%url, %error, "transport failure");
                return Err(TransportError(error));
            }
        };

        let status = response.status().as_u16();
        let body = response.json::<Value>().await.unwrap_or(Value::Null);
        Ok(ApiResponse { status, body })
    }

    /// `GET {path}`.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub async fn get(&self, path: &str) -> Result<ApiResponse, TransportError> {
        self.send(Method::GET, path, Payload::Empty, &[]).await
    }

    /// `DELETE {path}`.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub async fn delete(&self, path: &str) -> Result<ApiResponse, TransportError> {
        self.send(Method::DELETE, path, Payload::Empty, &[]).await
    }

    /// `POST {path}` with a JSON body (or none).
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub async fn post_json<T: serde::Serialize>(
        &self,
        path: &str,
        body: Option<&T>,
    ) -> Result<ApiResponse, TransportError> {
        let payload = match body {
            Some(body) => Payload::Json(serde_json::to_value(body).unwrap_or(Value::Null)),
            None => Payload::Empty,
        };
        self.send(Method::POST, path, payload, &[]).await
    }

    /// `PUT {path}` with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub async fn put_json<T: serde::Serialize>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<ApiResponse, TransportError> {
        let payload = Payload::Json(serde_json::to_value(body).unwrap_or(Value::Null));
        self.send(Method::PUT, path, payload, &[]).await
    }

    /// `PATCH {path}` with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub async fn patch_json<T: serde::Serialize>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<ApiResponse, TransportError> {
        let payload = Payload::Json(serde_json::to_value(body).unwrap_or(Value::Null));
        self.send(Method::PATCH, path, payload, &[]).await
    }

    /// `POST {path}` as a multipart form with one file part.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub async fn post_multipart(
        &self,
        path: &str,
        fields: Vec<(String, String)>,
        file: UploadFile,
    ) -> Result<ApiResponse, TransportError> {
        self.send(Method::POST, path, Payload::Multipart { fields, file }, &[])
            .await
    }
}
