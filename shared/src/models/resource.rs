//! Resource Model
//!
//! A physical inventory item (laptop, monitor, ...) tracked by serial number.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::util::{opaque_id, opaque_id_opt};

/// Resource entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    /// Server-assigned identifier. The filter endpoint reports it as `id`.
    #[serde(alias = "id", deserialize_with = "opaque_id")]
    pub resource_id: String,
    pub brand: String,
    pub model: String,
    pub specification: String,
    /// Resource type name
    pub resource_type: String,
    /// Resource class name
    pub resource_class: String,
    /// Resource status name (open set fetched from the backend)
    pub resource_status: String,
    pub serial_number: String,
    pub unit_price: Decimal,
    pub purchase_date: NaiveDate,
    #[serde(default)]
    pub warranty_expiry_date: Option<NaiveDate>,
    #[serde(default)]
    pub remarks: Option<String>,
    /// Batch reference (String ID)
    #[serde(default, deserialize_with = "opaque_id_opt")]
    pub batch_id: Option<String>,
}

/// Create/edit resource form
///
/// Used both for the create payload (sent as a one-element list) and as the
/// editable snapshot from which partial updates are computed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ResourceForm {
    #[validate(length(min = 1, message = "Brand is required"))]
    pub brand: String,
    #[validate(length(min = 1, message = "Model is required"))]
    pub model: String,
    #[validate(length(min = 1, message = "Specification is required"))]
    pub specification: String,
    #[validate(length(min = 1, message = "Resource type is required"))]
    pub resource_type: String,
    #[validate(length(min = 1, message = "Resource class is required"))]
    pub resource_class: String,
    #[validate(length(min = 1, message = "Resource status is required"))]
    pub resource_status: String,
    #[validate(length(min = 1, message = "Serial number is required"))]
    pub serial_number: String,
    #[validate(required(message = "Unit price is required"))]
    pub unit_price: Option<Decimal>,
    #[validate(required(message = "Purchase date is required"))]
    pub purchase_date: Option<NaiveDate>,
    pub warranty_expiry_date: Option<NaiveDate>,
    #[validate(length(max = 1000, message = "Remarks cannot exceed 1000 characters"))]
    pub remarks: Option<String>,
    pub batch_id: Option<String>,
}

impl ResourceForm {
    /// Trim surrounding whitespace so blank input fails the required checks.
    pub fn trimmed(mut self) -> Self {
        for field in [
            &mut self.brand,
            &mut self.model,
            &mut self.specification,
            &mut self.resource_type,
            &mut self.resource_class,
            &mut self.resource_status,
            &mut self.serial_number,
        ] {
            *field = field.trim().to_string();
        }
        self.remarks = self.remarks.map(|r| r.trim().to_string());
        self
    }
}

impl From<&Resource> for ResourceForm {
    fn from(r: &Resource) -> Self {
        Self {
            brand: r.brand.clone(),
            model: r.model.clone(),
            specification: r.specification.clone(),
            resource_type: r.resource_type.clone(),
            resource_class: r.resource_class.clone(),
            resource_status: r.resource_status.clone(),
            serial_number: r.serial_number.clone(),
            unit_price: Some(r.unit_price),
            purchase_date: Some(r.purchase_date),
            warranty_expiry_date: r.warranty_expiry_date,
            remarks: r.remarks.clone(),
            batch_id: r.batch_id.clone(),
        }
    }
}

/// Server-side filter for `/api/resources/filter`
///
/// Unset fields are not sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceFilter {
    pub brand: Option<String>,
    pub model: Option<String>,
    pub specification: Option<String>,
    pub resource_type: Option<String>,
    pub resource_class: Option<String>,
    pub resource_status: Option<String>,
    pub serial_number: Option<String>,
    pub batch_id: Option<String>,
}

impl ResourceFilter {
    /// Non-empty criteria as `(wire name, value)` pairs, in a stable order.
    pub fn criteria(&self) -> Vec<(&'static str, &str)> {
        [
            ("brand", &self.brand),
            ("model", &self.model),
            ("specification", &self.specification),
            ("resourceType", &self.resource_type),
            ("resourceClass", &self.resource_class),
            ("resourceStatus", &self.resource_status),
            ("serialNumber", &self.serial_number),
            ("batchId", &self.batch_id),
        ]
        .into_iter()
        .filter_map(|(key, value)| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(|v| (key, v))
        })
        .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.criteria().is_empty()
    }
}
