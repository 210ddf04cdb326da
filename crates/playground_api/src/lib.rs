//! View-controllers for the two demos.
//!
//! Each app owns its data service and turns store records into the snapshot
//! payloads from [`shared::protocol`]. Errors surface as [`ApiError`].

mod orders;
mod persons;

pub use orders::OrderManagementApp;
pub use persons::PersonManagementApp;
pub use shared::error::ApiError;
