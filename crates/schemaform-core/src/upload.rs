//! Asynchronous file upload for `file` fields
//!
//! One uploader instance backs one file field. The state machine is
//! `Idle -> Uploading -> {Done | Failed}` and is re-enterable: a new file
//! selection from `Done` or `Failed` starts over. Each attempt bumps a
//! generation counter; a result carrying a superseded ticket is dropped so
//! a stale response can never overwrite a newer upload's outcome. There is
//! no automatic retry and no cancellation of the underlying request.

use crate::error::{Error, Result};
use crate::schema::UploadTarget;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;
use url::Url;

const UPLOAD_TIMEOUT_SECS: u64 = 30;

/// Where an uploader currently stands
#[derive(Debug, Clone, PartialEq, Default)]
pub enum UploadPhase {
    #[default]
    Idle,
    Uploading,
    /// Success: the endpoint's JSON response, stored verbatim
    Done(Value),
    /// Failure: a human-readable message; the field value is untouched
    Failed(String),
}

/// Token for one upload attempt; stale tickets cannot commit a result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadTicket(u64);

/// Upload driver for one file field
#[derive(Debug)]
pub struct FileUploader {
    client: Client,
    url: Url,
    method: Method,
    headers: HeaderMap,
    phase: UploadPhase,
    generation: u64,
}

impl FileUploader {
    /// Build an uploader from a field's upload descriptor.
    ///
    /// The URL, method, and custom headers are parsed up front so a
    /// misconfigured schema fails here rather than mid-upload.
    pub fn new(target: &UploadTarget) -> Result<Self> {
        let url = Url::parse(&target.url).map_err(|e| Error::UploadConfig {
            message: format!("invalid upload URL '{}': {}", target.url, e),
            source: None,
        })?;
        let method = Method::from_bytes(target.method.as_bytes()).map_err(|_| Error::UploadConfig {
            message: format!("invalid upload method '{}'", target.method),
            source: None,
        })?;

        let mut headers = HeaderMap::new();
        for (key, value) in &target.headers {
            let name = HeaderName::from_bytes(key.as_bytes()).map_err(|e| Error::UploadConfig {
                message: format!("invalid upload header name '{}': {}", key, e),
                source: None,
            })?;
            let value = HeaderValue::from_str(value).map_err(|e| Error::UploadConfig {
                message: format!("invalid upload header value for '{}': {}", key, e),
                source: None,
            })?;
            headers.insert(name, value);
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(UPLOAD_TIMEOUT_SECS))
            .build()
            .map_err(|e| Error::UploadConfig {
                message: format!("failed to create HTTP client: {}", e),
                source: Some(anyhow::Error::from(e)),
            })?;

        Ok(Self {
            client,
            url,
            method,
            headers,
            phase: UploadPhase::Idle,
            generation: 0,
        })
    }

    pub fn phase(&self) -> &UploadPhase {
        &self.phase
    }

    /// The stored response of the last successful upload, if any
    pub fn result(&self) -> Option<&Value> {
        match &self.phase {
            UploadPhase::Done(value) => Some(value),
            _ => None,
        }
    }

    /// The message of the last failed upload, if any
    pub fn failure(&self) -> Option<&str> {
        match &self.phase {
            UploadPhase::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Start a new attempt: enter `Uploading` and supersede any in-flight one
    pub fn begin(&mut self) -> UploadTicket {
        self.generation += 1;
        self.phase = UploadPhase::Uploading;
        UploadTicket(self.generation)
    }

    /// Perform one multipart round trip with a single `file` part.
    ///
    /// Pure transport: the state machine is driven by [`begin`] and
    /// [`complete`] so a driver can run the request wherever it likes.
    ///
    /// [`begin`]: FileUploader::begin
    /// [`complete`]: FileUploader::complete
    pub async fn transfer(&self, file_name: &str, bytes: Vec<u8>) -> Result<Value> {
        let part = Part::bytes(bytes).file_name(file_name.to_string());
        let form = Form::new().part("file", part);

        debug!(url = %self.url, method = %self.method, file_name, "starting upload");
        let response = self
            .client
            .request(self.method.clone(), self.url.clone())
            .headers(self.headers.clone())
            .multipart(form)
            .send()
            .await
            .map_err(|e| Error::Http {
                message: format!("upload request failed: {}", e),
                status_code: e.status().map(|s| s.as_u16()),
                source: Some(anyhow::Error::from(e)),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Http {
                message: format!("upload failed with status {}", status),
                status_code: Some(status.as_u16()),
                source: None,
            });
        }

        response.json::<Value>().await.map_err(|e| Error::Http {
            message: format!("failed to parse upload response as JSON: {}", e),
            status_code: Some(status.as_u16()),
            source: Some(anyhow::Error::from(e)),
        })
    }

    /// Commit an attempt's outcome.
    ///
    /// Returns the response value when the attempt succeeded and is still
    /// current. Outcomes carrying a superseded ticket are dropped.
    pub fn complete(&mut self, ticket: UploadTicket, outcome: Result<Value>) -> Option<&Value> {
        if ticket.0 != self.generation {
            debug!(
                ticket = ticket.0,
                current = self.generation,
                "stale upload result dropped"
            );
            return None;
        }
        match outcome {
            Ok(value) => {
                self.phase = UploadPhase::Done(value);
                self.result()
            }
            Err(err) => {
                debug!(error = %err, "upload failed");
                self.phase = UploadPhase::Failed(err.to_string());
                None
            }
        }
    }

    /// Run one full attempt and return the response value on success.
    ///
    /// Failures land in the phase (see [`failure`](FileUploader::failure));
    /// they are user feedback, not propagation-worthy errors.
    pub async fn upload(&mut self, file_name: &str, bytes: Vec<u8>) -> Option<Value> {
        let ticket = self.begin();
        let outcome = self.transfer(file_name, bytes).await;
        self.complete(ticket, outcome).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    fn target() -> UploadTarget {
        UploadTarget {
            url: "https://uploads.example.com/files".to_string(),
            method: "POST".to_string(),
            headers: HashMap::from([("Authorization".to_string(), "Bearer token".to_string())]),
        }
    }

    #[test]
    fn test_new_parses_target_up_front() {
        let uploader = FileUploader::new(&target()).unwrap();
        assert_eq!(*uploader.phase(), UploadPhase::Idle);
        assert!(uploader.result().is_none());

        let bad_url = UploadTarget {
            url: "not a url".to_string(),
            ..target()
        };
        assert!(FileUploader::new(&bad_url).is_err());

        let bad_method = UploadTarget {
            method: "NOT A METHOD".to_string(),
            ..target()
        };
        assert!(FileUploader::new(&bad_method).is_err());

        let bad_header = UploadTarget {
            headers: HashMap::from([("bad name".to_string(), "v".to_string())]),
            ..target()
        };
        assert!(FileUploader::new(&bad_header).is_err());
    }

    #[test]
    fn test_state_machine_success_and_reentry() {
        let mut uploader = FileUploader::new(&target()).unwrap();

        let ticket = uploader.begin();
        assert_eq!(*uploader.phase(), UploadPhase::Uploading);
        let stored = uploader.complete(ticket, Ok(json!({"id": "f-1"})));
        assert_eq!(stored, Some(&json!({"id": "f-1"})));
        assert_eq!(uploader.result(), Some(&json!({"id": "f-1"})));

        // Re-enterable from Done
        let ticket = uploader.begin();
        assert_eq!(*uploader.phase(), UploadPhase::Uploading);
        uploader.complete(
            ticket,
            Err(Error::Http {
                message: "upload failed with status 500".to_string(),
                status_code: Some(500),
                source: None,
            }),
        );
        assert_eq!(uploader.failure(), Some("HTTP error: upload failed with status 500"));
        assert!(uploader.result().is_none());
    }

    #[test]
    fn test_stale_ticket_cannot_overwrite_newer_attempt() {
        let mut uploader = FileUploader::new(&target()).unwrap();

        let first = uploader.begin();
        let second = uploader.begin();

        // The newer attempt finishes first
        uploader.complete(second, Ok(json!({"id": "new"})));
        // The superseded attempt's late result is dropped
        assert!(uploader.complete(first, Ok(json!({"id": "old"}))).is_none());
        assert_eq!(uploader.result(), Some(&json!({"id": "new"})));
    }
}
