//! Data models for the submission pipeline
//!
//! Organized by concern: the pet listing itself, its category reference data,
//! the raw image picked by the user, the outcome of uploading it, and the user
//! record persisted after sign-up.

mod category;
mod image;
mod pet;
mod upload;
mod user;

// Re-export all models for convenient imports
pub use category::*;
pub use image::*;
pub use pet::*;
pub use upload::*;
pub use user::*;
