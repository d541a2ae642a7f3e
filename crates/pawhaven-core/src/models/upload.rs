use serde::{Deserialize, Serialize};

use crate::error::{ErrorMetadata, SubmissionError};

/// Image stored on the media host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedImage {
    /// Stable HTTPS URL of the asset
    pub url: String,
    /// Opaque identifier on the media host
    pub media_id: String,
}

/// Outcome of one upload attempt. Produced and consumed within a single submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadResult {
    Success(UploadedImage),
    Failure { error: SubmissionError },
}

impl UploadResult {
    pub fn success(url: impl Into<String>, media_id: impl Into<String>) -> Self {
        UploadResult::Success(UploadedImage {
            url: url.into(),
            media_id: media_id.into(),
        })
    }

    pub fn failure(error: SubmissionError) -> Self {
        UploadResult::Failure { error }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, UploadResult::Success(_))
    }

    pub fn url(&self) -> Option<&str> {
        match self {
            UploadResult::Success(image) => Some(&image.url),
            UploadResult::Failure { .. } => None,
        }
    }

    /// User-facing failure message, `None` on success.
    pub fn error_message(&self) -> Option<String> {
        match self {
            UploadResult::Success(_) => None,
            UploadResult::Failure { error } => Some(error.client_message()),
        }
    }

    pub fn into_result(self) -> Result<UploadedImage, SubmissionError> {
        match self {
            UploadResult::Success(image) => Ok(image),
            UploadResult::Failure { error } => Err(error),
        }
    }
}
