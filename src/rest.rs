//! Async HTTP transport for the Haven API.
//!
//! Every operation in the crate funnels through the [`Transport`] trait: one
//! `query` call per API request. [`RestClient`] is the production
//! implementation over reqwest; tests swap in a recording mock.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::debug;

use crate::error::{HavenError, Result};

pub use reqwest::Method;

/// Base URL for the Haven REST API.
pub const DEFAULT_BASE: &str = "https://api.haven.chat/v1";

// ── Request bodies ────────────────────────────────────────────────────────────

/// A file to upload alongside a message.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub filename: String,
    pub data: Vec<u8>,
}

impl UploadFile {
    pub fn new(filename: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self { filename: filename.into(), data: data.into() }
    }
}

/// JSON payload plus attachments, sent as `multipart/form-data`.
#[derive(Debug, Clone)]
pub struct MultipartUpload {
    pub payload_json: Value,
    pub files: Vec<UploadFile>,
}

/// Body of an API request.
#[derive(Debug, Clone)]
pub enum RequestBody {
    Empty,
    Json(Value),
    Multipart(MultipartUpload),
}

// ── Transport seam ────────────────────────────────────────────────────────────

/// Issues one API request and returns the decoded JSON body.
///
/// `204 No Content` responses surface as [`Value::Null`].
#[async_trait]
pub trait Transport: Send + Sync {
    async fn query(&self, method: Method, path: &str, body: RequestBody) -> Result<Value>;
}

// ── Production client ─────────────────────────────────────────────────────────

/// Async Haven REST client.
///
/// ```rust,no_run
/// use haven_sdk::rest::{Method, RequestBody, RestClient, Transport};
///
/// #[tokio::main]
/// async fn main() -> haven_sdk::Result<()> {
///     let rest = RestClient::new("Bot mytoken", None)?;
///     let me = rest.query(Method::GET, "/users/@me", RequestBody::Empty).await?;
///     println!("{me:?}");
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct RestClient {
    client: Client,
    base_url: String,
}

impl RestClient {
    pub fn new(token: impl Into<String>, base_url: Option<&str>) -> Result<Self> {
        let token = {
            let t = token.into();
            if t.starts_with("Bot ") { t } else { format!("Bot {t}") }
        };
        // No global content-type header: JSON and multipart requests each
        // set their own.
        let client = Client::builder()
            .default_headers({
                let mut h = reqwest::header::HeaderMap::new();
                h.insert(
                    reqwest::header::AUTHORIZATION,
                    reqwest::header::HeaderValue::from_str(&token)
                        .map_err(|e| HavenError::Other(e.to_string()))?,
                );
                h
            })
            .build()
            .map_err(HavenError::Http)?;

        Ok(Self {
            client,
            base_url: base_url.unwrap_or(DEFAULT_BASE).trim_end_matches('/').to_owned(),
        })
    }
}

#[async_trait]
impl Transport for RestClient {
    async fn query(&self, method: Method, path: &str, body: RequestBody) -> Result<Value> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%method, path, "issuing API request");

        let mut req = self.client.request(method, &url);
        req = match body {
            RequestBody::Empty => req,
            RequestBody::Json(json) => req.json(&json),
            RequestBody::Multipart(upload) => req.multipart(to_form(upload)?),
        };

        let resp = req.send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(error_from_response(status, resp).await);
        }
        if status == StatusCode::NO_CONTENT {
            return Ok(Value::Null);
        }
        Ok(resp.json::<Value>().await?)
    }
}

fn to_form(upload: MultipartUpload) -> Result<reqwest::multipart::Form> {
    let payload = reqwest::multipart::Part::text(upload.payload_json.to_string())
        .mime_str("application/json")
        .map_err(HavenError::Http)?;
    let mut form = reqwest::multipart::Form::new().part("payload_json", payload);
    for (i, file) in upload.files.into_iter().enumerate() {
        let part = reqwest::multipart::Part::bytes(file.data).file_name(file.filename);
        form = form.part(format!("files[{i}]"), part);
    }
    Ok(form)
}

async fn error_from_response(status: StatusCode, resp: reqwest::Response) -> HavenError {
    let body = resp.json::<Value>().await.ok();
    if status == StatusCode::TOO_MANY_REQUESTS {
        let retry_after_ms = body
            .as_ref()
            .and_then(|v| v.get("retry_after_ms"))
            .and_then(Value::as_u64)
            .unwrap_or(0);
        return HavenError::RateLimited { retry_after_ms };
    }
    let code = body
        .as_ref()
        .and_then(|v| v.get("error"))
        .and_then(Value::as_str)
        .map(str::to_owned);
    let message = body
        .as_ref()
        .and_then(|v| v.get("message"))
        .and_then(Value::as_str)
        .map(str::to_owned)
        .unwrap_or_else(|| status.to_string());
    HavenError::Api { status: status.as_u16(), code, message }
}

// ── Test transport ────────────────────────────────────────────────────────────

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use super::*;

    /// Records every call and replays canned responses in order.
    pub(crate) struct MockTransport {
        pub calls: Mutex<Vec<(Method, String, RequestBody)>>,
        responses: Mutex<VecDeque<Result<Value>>>,
    }

    impl MockTransport {
        pub(crate) fn new(responses: Vec<Value>) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                responses: Mutex::new(responses.into_iter().map(Ok).collect()),
            }
        }

        pub(crate) fn failing(error: HavenError) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                responses: Mutex::new(VecDeque::from([Err(error)])),
            }
        }
    }

    #[async_trait]
    impl Transport for MockTransport {
        async fn query(&self, method: Method, path: &str, body: RequestBody) -> Result<Value> {
            self.calls.lock().unwrap().push((method, path.to_owned(), body));
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Ok(Value::Null))
        }
    }
}
