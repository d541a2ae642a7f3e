//! Media uploader for pet images.
//!
//! The [`MediaUploader`] trait is the seam the submission pipeline depends on;
//! [`CloudinaryUploader`] is the production implementation that posts an
//! unsigned multipart upload to Cloudinary.

pub mod cloudinary;

use async_trait::async_trait;
use pawhaven_core::models::{ImageFile, UploadResult};

pub use cloudinary::CloudinaryUploader;

/// Uploads one image and reports the terminal outcome.
///
/// Implementations never fail past their own boundary: transport and remote
/// errors travel inside [`UploadResult::Failure`].
#[async_trait]
pub trait MediaUploader: Send + Sync {
    async fn upload(&self, file: &ImageFile) -> UploadResult;
}
