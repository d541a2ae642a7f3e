use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::category::PetCategory;

/// One adoptable pet's listing data, as sent to the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PetRecord {
    pub name: String,
    pub category: PetCategory,
    pub age: u32,
    pub location: String,
    pub short_description: String,
    pub long_description: String,
    pub image_url: String,
    pub added_by_user_id: String,
    #[serde(default)]
    pub adopted: bool,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

/// Stored representation returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredPet {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(flatten)]
    pub record: PetRecord,
}

/// Which persistence operation a submission targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitTarget {
    Create,
    /// Replace the record with this stable identifier
    Update { id: String },
}

impl SubmitTarget {
    pub fn is_update(&self) -> bool {
        matches!(self, SubmitTarget::Update { .. })
    }
}
