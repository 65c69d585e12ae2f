//! IMS Console - view-models of the inventory management console
//!
//! Headless counterpart of the admin/user screens: every page owns its list
//! and modal state and talks to the backend through [`ims_client`].
//! A renderer only reads the state and forwards user actions.
//!
//! - [`pages`]: auth, inventory, users, batches, master data, filters, dashboard, landing
//! - [`scanner`]: camera selection, decode loop and resource lookup
//! - [`forms`]: field validation and partial-update payloads
//! - [`list`]: client-side search and pagination

pub mod config;
pub mod error;
pub mod forms;
pub mod list;
pub mod logger;
pub mod notify;
pub mod pages;
pub mod scanner;
pub mod task;

pub use config::ConsoleConfig;
pub use error::{ConsoleError, ConsoleResult};
pub use notify::{Notifier, Toast, ToastLevel};
pub use task::RepeatingTask;
