//! Cloudinary unsigned upload client
//!
//! Endpoint: `POST {api_base}/{cloud_name}/image/upload` with a multipart body
//! carrying `file`, `upload_preset` and `cloud_name`.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::sync::Arc;

use pawhaven_core::models::{ImageFile, UploadResult, UploadedImage};
use pawhaven_core::{log_error, ErrorMetadata, Notifier, PipelineConfig, SubmissionError};

use crate::MediaUploader;

const NETWORK_ERROR_MESSAGE: &str = "Network error while uploading image";
const MALFORMED_RESPONSE_MESSAGE: &str = "Malformed upload response";

/// Cloudinary uploader implementation
#[derive(Clone)]
pub struct CloudinaryUploader {
    http_client: reqwest::Client,
    upload_url: String,
    cloud_name: String,
    upload_preset: String,
    notifier: Arc<dyn Notifier>,
}

impl Debug for CloudinaryUploader {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("CloudinaryUploader")
            .field("upload_url", &self.upload_url)
            .finish()
    }
}

// Cloudinary API structures
#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: Option<String>,
    public_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

impl CloudinaryUploader {
    pub fn new(config: &PipelineConfig, notifier: Arc<dyn Notifier>) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(config.http_timeout())
            .build()
            .context("Failed to create HTTP client for Cloudinary")?;

        Ok(Self {
            http_client,
            upload_url: config.cloudinary_upload_url(),
            cloud_name: config.cloudinary_cloud_name.clone(),
            upload_preset: config.cloudinary_upload_preset.clone(),
            notifier,
        })
    }

    pub fn upload_url(&self) -> &str {
        &self.upload_url
    }

    fn build_form(&self, file: &ImageFile) -> Result<reqwest::multipart::Form, SubmissionError> {
        let part = reqwest::multipart::Part::bytes(file.bytes.to_vec())
            .file_name(file.file_name.clone())
            .mime_str(&file.content_type)
            .map_err(|_| {
                SubmissionError::invalid_field(
                    "image",
                    format!("Invalid image content type: {}", file.content_type),
                )
            })?;

        Ok(reqwest::multipart::Form::new()
            .part("file", part)
            .text("upload_preset", self.upload_preset.clone())
            .text("cloud_name", self.cloud_name.clone()))
    }

    /// Single POST to the media API; no retry.
    async fn try_upload(&self, file: &ImageFile) -> Result<UploadedImage, SubmissionError> {
        let form = self.build_form(file)?;

        let response = self
            .http_client
            .post(&self.upload_url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                tracing::debug!(error = %e, file_name = %file.file_name, "Upload request failed");
                SubmissionError::Transport(NETWORK_ERROR_MESSAGE.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(rejection_from_body(status.as_u16(), &error_text));
        }

        let body: UploadResponse = response.json().await.map_err(|e| {
            tracing::debug!(error = %e, "Failed to parse Cloudinary upload response");
            SubmissionError::Transport(MALFORMED_RESPONSE_MESSAGE.to_string())
        })?;

        match (body.secure_url, body.public_id) {
            (Some(url), Some(media_id)) if !url.is_empty() => Ok(UploadedImage { url, media_id }),
            _ => Err(SubmissionError::Transport(
                MALFORMED_RESPONSE_MESSAGE.to_string(),
            )),
        }
    }
}

/// Structured `{error: {message}}` bodies become rejections; anything else
/// falls back to the bare status.
fn rejection_from_body(status: u16, body: &str) -> SubmissionError {
    match serde_json::from_str::<ErrorResponse>(body) {
        Ok(parsed) if !parsed.error.message.is_empty() => SubmissionError::RemoteRejection {
            status,
            message: parsed.error.message,
        },
        _ => SubmissionError::http_status(status),
    }
}

#[async_trait]
impl MediaUploader for CloudinaryUploader {
    async fn upload(&self, file: &ImageFile) -> UploadResult {
        tracing::debug!(
            file_name = %file.file_name,
            content_type = %file.content_type,
            size = file.len(),
            "Uploading image"
        );

        match self.try_upload(file).await {
            Ok(image) => {
                tracing::info!(
                    file_name = %file.file_name,
                    media_id = %image.media_id,
                    "Image uploaded"
                );
                UploadResult::Success(image)
            }
            Err(error) => {
                log_error(&error, "upload");
                self.notifier.error(&error.client_message());
                UploadResult::failure(error)
            }
        }
    }
}
