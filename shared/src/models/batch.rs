//! Batch Model

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::util::opaque_id;

/// Batch entity
///
/// A group of resources registered together. Batches are created once and
/// never edited or deleted from the console.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Batch {
    #[serde(alias = "id", deserialize_with = "opaque_id")]
    pub batch_id: String,
    /// Code generated by the backend
    pub batch_code: String,
    /// Resource type name
    pub resource_type: String,
    pub quantity: u32,
    #[serde(default)]
    pub description: Option<String>,
}

/// Create batch payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BatchForm {
    #[validate(length(min = 1, message = "Resource type is required"))]
    pub resource_type: String,
    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: u32,
    #[validate(length(max = 500, message = "Description cannot exceed 500 characters"))]
    pub description: Option<String>,
}
