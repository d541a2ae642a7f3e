use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::SubmissionError;

/// Fixed category codes a pet can be listed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PetCategory {
    #[serde(alias = "Dog")]
    Dog,
    #[serde(alias = "Cat")]
    Cat,
    #[serde(alias = "Rabbit")]
    Rabbit,
    #[serde(alias = "Bird")]
    Bird,
    #[serde(alias = "Fish")]
    Fish,
}

impl PetCategory {
    pub const ALL: [PetCategory; 5] = [
        PetCategory::Dog,
        PetCategory::Cat,
        PetCategory::Rabbit,
        PetCategory::Bird,
        PetCategory::Fish,
    ];

    /// Wire code stored by the backend.
    pub fn code(&self) -> &'static str {
        match self {
            PetCategory::Dog => "dog",
            PetCategory::Cat => "cat",
            PetCategory::Rabbit => "rabbit",
            PetCategory::Bird => "bird",
            PetCategory::Fish => "fish",
        }
    }

    /// Display text for category pickers.
    pub fn label(&self) -> &'static str {
        match self {
            PetCategory::Dog => "Dog",
            PetCategory::Cat => "Cat",
            PetCategory::Rabbit => "Rabbit",
            PetCategory::Bird => "Bird",
            PetCategory::Fish => "Fish",
        }
    }
}

impl fmt::Display for PetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for PetCategory {
    type Err = SubmissionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        PetCategory::ALL
            .into_iter()
            .find(|c| c.code() == normalized)
            .ok_or_else(|| {
                SubmissionError::invalid_field("category", format!("Unknown category: {}", s))
            })
    }
}

/// Static reference entry for a category picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryOption {
    pub value: PetCategory,
    pub label: &'static str,
}

impl CategoryOption {
    pub fn all() -> Vec<CategoryOption> {
        PetCategory::ALL
            .into_iter()
            .map(|value| CategoryOption {
                value,
                label: value.label(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("Dog".parse::<PetCategory>().unwrap(), PetCategory::Dog);
        assert_eq!(" RABBIT ".parse::<PetCategory>().unwrap(), PetCategory::Rabbit);
    }

    #[test]
    fn unknown_code_is_a_validation_error() {
        let err = "dragon".parse::<PetCategory>().unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn options_follow_declaration_order() {
        let options = CategoryOption::all();
        assert_eq!(options.len(), 5);
        assert_eq!(options[0].value, PetCategory::Dog);
        assert_eq!(options[4].label, "Fish");
        let json = serde_json::to_value(options[1]).unwrap();
        assert_eq!(json, serde_json::json!({ "value": "cat", "label": "Cat" }));
    }

    #[test]
    fn deserializes_capitalized_labels() {
        let category: PetCategory = serde_json::from_str("\"Bird\"").unwrap();
        assert_eq!(category, PetCategory::Bird);
    }
}
