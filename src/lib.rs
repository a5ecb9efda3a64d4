//! In-memory record management for a small clinic.
//!
//! The crate keeps patients, doctors, appointments and bills in
//! insertion-ordered collections, enforces referential and scheduling
//! consistency between them, and persists every collection to flat
//! comma-delimited files.
//!
//! - [`models`] - entity types and the crate error
//! - [`store`] - the record store: identity assignment, cascade deletes,
//!   appointment conflict detection, fee computation
//! - [`codec`] - the delimited file format
//! - [`storage`] - loading and saving collections
//!
//! Everything is single-threaded and synchronous; callers that need
//! multi-user access must serialize mutations themselves.

pub mod codec;
pub mod models;
pub mod storage;
pub mod store;

pub use models::{Appointment, Bill, Doctor, Patient, StoreError};
pub use storage::StorageConfig;
pub use store::ClinicStore;
