//! Form helpers shared by the create/edit modals

pub mod patch;
pub mod validation;

pub use patch::{Patch, build_patch};
pub use validation::{FieldErrors, validate_form};
