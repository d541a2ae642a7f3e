//! Image file validation
//!
//! Runs before any network call so a bad file never reaches the media host.

use crate::error::{FieldError, SubmissionError};
use crate::models::ImageFile;

const IMAGE_FIELD: &str = "image";

/// Map an image extension to its canonical content type.
pub fn content_type_for_extension(extension: &str) -> Option<&'static str> {
    expected_content_types(extension).first().copied()
}

/// Content types accepted for an image extension. Empty for unknown extensions.
pub fn expected_content_types(extension: &str) -> &'static [&'static str] {
    match extension.to_lowercase().as_str() {
        "jpg" | "jpeg" => &["image/jpeg"],
        "png" => &["image/png"],
        "gif" => &["image/gif"],
        "webp" => &["image/webp"],
        "avif" => &["image/avif"],
        "bmp" => &["image/bmp"],
        "svg" => &["image/svg+xml"],
        _ => &[],
    }
}

/// Image file validator
///
/// Checks size limits, the content type allow-list and that the content type
/// matches the file extension.
#[derive(Debug, Clone)]
pub struct ImageValidator {
    max_file_size: usize,
    allowed_content_types: Vec<String>,
}

impl ImageValidator {
    pub fn new(max_file_size: usize, allowed_content_types: Vec<String>) -> Self {
        Self {
            max_file_size,
            allowed_content_types: allowed_content_types
                .into_iter()
                .map(|ct| ct.trim().to_lowercase())
                .collect(),
        }
    }

    pub fn validate_file_size(&self, size: usize) -> Result<(), FieldError> {
        if size == 0 {
            return Err(FieldError::new(IMAGE_FIELD, "Image file is empty"));
        }

        if size > self.max_file_size {
            return Err(FieldError::new(
                IMAGE_FIELD,
                format!(
                    "Image is too large: {} bytes (max: {} bytes)",
                    size, self.max_file_size
                ),
            ));
        }

        Ok(())
    }

    pub fn validate_content_type(&self, content_type: &str) -> Result<(), FieldError> {
        let normalized = content_type.to_lowercase();

        if !self
            .allowed_content_types
            .iter()
            .any(|ct| ct == &normalized)
        {
            return Err(FieldError::new(
                IMAGE_FIELD,
                format!(
                    "Unsupported image type: {} (allowed: {})",
                    content_type,
                    self.allowed_content_types.join(", ")
                ),
            ));
        }

        Ok(())
    }

    /// Reject files whose content type does not match their extension.
    pub fn validate_extension_content_type_match(
        &self,
        file: &ImageFile,
    ) -> Result<(), FieldError> {
        let extension = file.extension().ok_or_else(|| {
            FieldError::new(
                IMAGE_FIELD,
                format!("Image file name has no extension: {}", file.file_name),
            )
        })?;

        let expected = expected_content_types(&extension);
        if expected.is_empty() {
            return Err(FieldError::new(
                IMAGE_FIELD,
                format!("Unsupported image extension: {}", extension),
            ));
        }

        let normalized = file.content_type.to_lowercase();
        if !expected.iter().any(|ct| *ct == normalized) {
            return Err(FieldError::new(
                IMAGE_FIELD,
                format!(
                    "Image type {} does not match extension '{}' (expected one of: {})",
                    file.content_type,
                    extension,
                    expected.join(", ")
                ),
            ));
        }

        Ok(())
    }

    /// Run every check, stopping at the first failure.
    pub fn validate(&self, file: &ImageFile) -> Result<(), FieldError> {
        self.validate_file_size(file.len())?;
        self.validate_content_type(&file.content_type)?;
        self.validate_extension_content_type_match(file)
    }

    /// Same as [`ImageValidator::validate`], lifted into the pipeline error.
    pub fn check(&self, file: &ImageFile) -> Result<(), SubmissionError> {
        self.validate(file)
            .map_err(|e| SubmissionError::Validation(vec![e]))
    }
}
