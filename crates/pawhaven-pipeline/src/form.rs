//! Form Capture: raw field values and client-side shape validation.

use chrono::{DateTime, Utc};
use validator::Validate;

use pawhaven_core::models::{ImageFile, PetCategory, PetRecord, StoredPet};
use pawhaven_core::validation::ImageValidator;
use pawhaven_core::{FieldError, SubmissionError};

/// Field values as entered by the user.
#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct PetForm {
    #[validate(length(
        min = 1,
        max = 80,
        message = "Pet name must be between 1 and 80 characters"
    ))]
    pub name: String,
    #[validate(required(message = "Please select a category"))]
    pub category: Option<PetCategory>,
    #[validate(
        required(message = "Pet age is required"),
        range(max = 40, message = "Pet age must be between 0 and 40")
    )]
    pub age: Option<u32>,
    #[validate(length(
        min = 1,
        max = 120,
        message = "Location must be between 1 and 120 characters"
    ))]
    pub location: String,
    #[validate(length(
        min = 1,
        max = 200,
        message = "Short description must be between 1 and 200 characters"
    ))]
    pub short_description: String,
    #[validate(length(
        min = 1,
        max = 5000,
        message = "Long description must be between 1 and 5000 characters"
    ))]
    pub long_description: String,
    /// Newly picked image; checked by [`ImageValidator`]
    pub image: Option<ImageFile>,
}

/// Where the record's image URL comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum ImageSource {
    /// Must be uploaded before persisting
    New(ImageFile),
    /// Already hosted; update flow keeping the current picture
    Existing(String),
}

/// Validated form values, ready to be assembled into a [`PetRecord`].
#[derive(Debug, Clone, PartialEq)]
pub struct PetDraft {
    pub name: String,
    pub category: PetCategory,
    pub age: u32,
    pub location: String,
    pub short_description: String,
    pub long_description: String,
    pub image: ImageSource,
}

impl PetForm {
    /// Copy with surrounding whitespace removed from every text field.
    pub fn normalized(&self) -> PetForm {
        PetForm {
            name: self.name.trim().to_string(),
            category: self.category,
            age: self.age,
            location: self.location.trim().to_string(),
            short_description: self.short_description.trim().to_string(),
            long_description: self.long_description.trim().to_string(),
            image: self.image.clone(),
        }
    }

    /// Validate current values. `existing_image_url` lets an update keep its picture.
    ///
    /// Collects every invalid field instead of stopping at the first one.
    pub fn to_draft(
        &self,
        image_validator: &ImageValidator,
        existing_image_url: Option<&str>,
    ) -> Result<PetDraft, SubmissionError> {
        let form = self.normalized();

        let mut errors = match form.validate() {
            Ok(()) => Vec::new(),
            Err(e) => match SubmissionError::from(e) {
                SubmissionError::Validation(fields) => fields,
                other => return Err(other),
            },
        };

        let image = match (&form.image, existing_image_url) {
            (Some(file), _) => match image_validator.validate(file) {
                Ok(()) => Some(ImageSource::New(file.clone())),
                Err(e) => {
                    errors.push(e);
                    None
                }
            },
            (None, Some(url)) if !url.is_empty() => Some(ImageSource::Existing(url.to_string())),
            (None, _) => {
                errors.push(FieldError::new("image", "Please choose an image"));
                None
            }
        };

        match (form.category, form.age, image) {
            (Some(category), Some(age), Some(image)) if errors.is_empty() => Ok(PetDraft {
                name: form.name,
                category,
                age,
                location: form.location,
                short_description: form.short_description,
                long_description: form.long_description,
                image,
            }),
            _ => {
                errors.sort_by(|a, b| a.field.cmp(&b.field));
                Err(SubmissionError::Validation(errors))
            }
        }
    }
}

impl From<&StoredPet> for PetForm {
    fn from(stored: &StoredPet) -> Self {
        let record = &stored.record;
        PetForm {
            name: record.name.clone(),
            category: Some(record.category),
            age: Some(record.age),
            location: record.location.clone(),
            short_description: record.short_description.clone(),
            long_description: record.long_description.clone(),
            image: None,
        }
    }
}

impl PetDraft {
    /// Assemble the record once the image URL is known to exist remotely.
    pub fn into_record(
        self,
        image_url: String,
        added_by_user_id: &str,
        adopted: bool,
        created_at: DateTime<Utc>,
    ) -> PetRecord {
        PetRecord {
            name: self.name,
            category: self.category,
            age: self.age,
            location: self.location,
            short_description: self.short_description,
            long_description: self.long_description,
            image_url,
            added_by_user_id: added_by_user_id.to_string(),
            adopted,
            created_at,
        }
    }
}
