//! Dashboard aggregate counts

use serde::{Deserialize, Serialize};

/// Dimension the admin dashboard groups resources by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CountDimension {
    Specification,
    ResourceType,
    Model,
    Brand,
}

impl CountDimension {
    pub const ALL: [CountDimension; 4] = [
        CountDimension::Specification,
        CountDimension::ResourceType,
        CountDimension::Model,
        CountDimension::Brand,
    ];

    /// Suffix of `/api/admin/dashboard/count-by-{..}`
    pub fn path_suffix(&self) -> &'static str {
        match self {
            CountDimension::Specification => "specification",
            CountDimension::ResourceType => "resourceType",
            CountDimension::Model => "model",
            CountDimension::Brand => "brand",
        }
    }
}

/// One bucket of an aggregate count
///
/// The backend labels the bucket with the dimension's own field name
/// (`brand`, `model`, ...) or with a generic `name`/`label`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountEntry {
    #[serde(
        alias = "label",
        alias = "brand",
        alias = "model",
        alias = "specification",
        alias = "resourceType"
    )]
    pub name: String,
    pub count: u64,
}
