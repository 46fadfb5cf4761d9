//! HTTP client for the image-analysis endpoint.

use reqwest::multipart::{Form, Part};
use reqwest::{Client, Url};
use serde_json::Value;

use zoppl_core::AppConfig;

use crate::error::{FinderError, SERVER_ERROR_MESSAGE};
use crate::upload::ImageUpload;

/// Form field the analysis service reads the image from.
const IMAGE_FIELD: &str = "image";

/// Posts images to the analysis service and returns its JSON verdict.
///
/// One request per call; no retries and no request timeout. Callers
/// serialize submissions so at most one request is in flight per session.
pub struct FinderClient {
    client: Client,
    endpoint: Url,
}

impl FinderClient {
    /// Creates a client for `endpoint_url` with the given `User-Agent`.
    ///
    /// # Errors
    ///
    /// - [`FinderError::InvalidEndpoint`] if `endpoint_url` does not parse as
    ///   an http(s) URL.
    /// - [`FinderError::Http`] if the underlying `reqwest::Client` cannot be
    ///   constructed.
    pub fn new(endpoint_url: &str, user_agent: &str) -> Result<Self, FinderError> {
        let endpoint = Url::parse(endpoint_url).map_err(|e| FinderError::InvalidEndpoint {
            url: endpoint_url.to_owned(),
            reason: e.to_string(),
        })?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(FinderError::InvalidEndpoint {
                url: endpoint_url.to_owned(),
                reason: format!("unsupported scheme \"{}\"", endpoint.scheme()),
            });
        }

        let client = Client::builder().user_agent(user_agent).build()?;
        Ok(Self { client, endpoint })
    }

    /// Creates a client from the application configuration.
    ///
    /// # Errors
    ///
    /// See [`FinderClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, FinderError> {
        Self::new(&config.endpoint_url, &config.user_agent)
    }

    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Uploads `upload` as multipart form data and returns the parsed JSON body.
    ///
    /// The body is returned as-is; interpreting its shape is the normalizer's job.
    ///
    /// # Errors
    ///
    /// - [`FinderError::UnexpectedStatus`] for any non-2xx status, carrying the
    ///   body's `message` field or a generic default.
    /// - [`FinderError::Http`] on network or TLS failure.
    /// - [`FinderError::Deserialize`] when a 2xx body is not JSON.
    pub async fn analyze_image(&self, upload: &ImageUpload) -> Result<Value, FinderError> {
        let part = Part::bytes(upload.bytes.clone())
            .file_name(upload.file_name.clone())
            .mime_str(upload.mime_type)?;
        let form = Form::new().part(IMAGE_FIELD, part);

        tracing::info!(
            endpoint = %self.endpoint,
            file_name = %upload.file_name,
            bytes = upload.bytes.len(),
            "submitting image for analysis"
        );

        let response = self
            .client
            .post(self.endpoint.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .multipart(form)
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = error_message(&body);
            tracing::warn!(status = status.as_u16(), %message, "analysis request failed");
            return Err(FinderError::UnexpectedStatus {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str::<Value>(&body).map_err(|e| FinderError::Deserialize {
            context: format!("analysis response from {}", self.endpoint),
            source: e,
        })
    }
}

/// Reads the user-facing `message` from an error body, falling back to a
/// generic text when the body is not JSON or has no message.
fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .as_ref()
        .and_then(|value| value.get("message"))
        .and_then(Value::as_str)
        .filter(|message| !message.is_empty())
        .map_or_else(|| SERVER_ERROR_MESSAGE.to_string(), str::to_string)
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
