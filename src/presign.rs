//! Client for the endpoint that issues presigned upload URLs.
//!
//! The endpoint is called with `filename` and `contentType` query parameters and
//! answers with a JSON object holding the URL the file must be `PUT` to.

use crate::error::{Result, UploadError};
use crate::file::SelectedFile;
use reqwest::Url;
use serde_json::Value as JsonValue;
use tracing::{debug, error};

/// A presigned URL. Consumed by the transfer, so it is used at most once.
#[derive(Debug, PartialEq, Eq)]
pub struct UploadUrl(Url);

impl UploadUrl {
    /// Accept only absolute http(s) URLs
    pub fn parse(raw: &str) -> Result<Self> {
        let url = Url::parse(raw)
            .map_err(|err| UploadError::PresignResponse(format!("invalid upload URL: {err}")))?;
        match url.scheme() {
            "http" | "https" => Ok(Self(url)),
            scheme => Err(UploadError::PresignResponse(format!(
                "unsupported upload URL scheme: {scheme}"
            ))),
        }
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn into_url(self) -> Url {
        self.0
    }
}

#[derive(Debug, Clone)]
pub struct PresignClient {
    http: reqwest::Client,
    endpoint: String,
    url_field: String,
}

impl PresignClient {
    pub fn new(http: reqwest::Client, endpoint: String, url_field: String) -> Self {
        Self {
            http,
            endpoint,
            url_field,
        }
    }

    /// Request URL for a given file, with both parameters percent-encoded
    pub fn request_url(&self, file: &SelectedFile) -> String {
        format!(
            "{}?filename={}&contentType={}",
            self.endpoint,
            urlencoding::encode(file.name()),
            urlencoding::encode(file.content_type())
        )
    }

    /// Ask the endpoint for a fresh upload URL
    pub async fn request(&self, file: &SelectedFile) -> Result<UploadUrl> {
        let request_url = self.request_url(file);
        debug!(url = %request_url, "Requesting presigned URL");

        let response = self
            .http
            .get(&request_url)
            .send()
            .await
            .inspect_err(|error| error!(%error, "Presign request failed"))
            .map_err(UploadError::PresignTransport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(%status, %body, "Error fetching presigned URL");
            return Err(UploadError::PresignStatus { status, body });
        }

        let body = response
            .text()
            .await
            .map_err(UploadError::PresignTransport)?;
        let upload_url = self
            .extract_upload_url(&body)
            .inspect_err(|error| error!(%error, %body, "Unusable presign response"))?;

        debug!(upload_url = %upload_url.as_str(), "Received upload URL");
        Ok(upload_url)
    }

    fn extract_upload_url(&self, body: &str) -> Result<UploadUrl> {
        let json: JsonValue = serde_json::from_str(body)
            .map_err(|err| UploadError::PresignResponse(format!("malformed JSON: {err}")))?;

        let raw = match json.get(&self.url_field) {
            Some(JsonValue::String(raw)) => raw,
            Some(_) => {
                return Err(UploadError::PresignResponse(format!(
                    "field `{}` is not a string",
                    self.url_field
                )));
            }
            None => {
                return Err(UploadError::PresignResponse(format!(
                    "missing field `{}`",
                    self.url_field
                )));
            }
        };

        UploadUrl::parse(raw)
    }
}
