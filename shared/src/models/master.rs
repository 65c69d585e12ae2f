//! Master data: resource classes, types and statuses
//!
//! Plain name records that only exist to populate the selection fields of
//! the resource form.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::util::opaque_id;

/// Which master table a record belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MasterKind {
    ResourceClass,
    ResourceType,
    ResourceStatus,
}

impl MasterKind {
    pub const ALL: [MasterKind; 3] = [
        MasterKind::ResourceClass,
        MasterKind::ResourceType,
        MasterKind::ResourceStatus,
    ];

    /// Path segment under `/api/master/`
    pub fn path_segment(&self) -> &'static str {
        match self {
            MasterKind::ResourceClass => "resource-class",
            MasterKind::ResourceType => "resource-type",
            MasterKind::ResourceStatus => "resource-status",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MasterKind::ResourceClass => "Resource class",
            MasterKind::ResourceType => "Resource type",
            MasterKind::ResourceStatus => "Resource status",
        }
    }
}

impl std::fmt::Display for MasterKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Master entity (class, type or status)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MasterEntity {
    #[serde(deserialize_with = "opaque_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

pub type ResourceClass = MasterEntity;
pub type ResourceType = MasterEntity;
pub type ResourceStatus = MasterEntity;

/// Create master entity payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct MasterForm {
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: String,
    #[validate(length(max = 500, message = "Description cannot exceed 500 characters"))]
    pub description: Option<String>,
}

/// Names of a master list, in backend order, for populating dropdowns.
pub fn master_names(records: &[MasterEntity]) -> Vec<String> {
    records.iter().map(|r| r.name.clone()).collect()
}
