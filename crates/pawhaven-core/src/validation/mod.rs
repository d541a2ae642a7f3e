//! Validation modules

pub mod image;

pub use image::{content_type_for_extension, expected_content_types, ImageValidator};
