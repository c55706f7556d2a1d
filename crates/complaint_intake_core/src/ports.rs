//! crates/complaint_intake_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the core
//! to be independent of specific external implementations like file stores or APIs.

use async_trait::async_trait;

use crate::domain::{ComplaintRecord, ComplaintStatus, NewComplaint};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external services (e.g., storage, network).
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Item already exists: {0}")]
    Conflict(String),
    #[error("The external service did not answer in time")]
    Timeout,
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Sends `prompt` as the single user message of a chat completion and
    /// returns the raw text of the first choice.
    async fn complete(&self, prompt: &str) -> PortResult<String>;
}

#[async_trait]
pub trait ComplaintStore: Send + Sync {
    /// Stamps `created_at`/`updated_at`, persists the complaint and returns the stored record.
    async fn save(&self, complaint: NewComplaint) -> PortResult<ComplaintRecord>;

    /// A miss is `Ok(None)`, not an error.
    async fn get_by_id(&self, id: &str) -> PortResult<Option<ComplaintRecord>>;

    /// All records, newest `created_at` first.
    async fn get_all(&self) -> PortResult<Vec<ComplaintRecord>>;

    /// Unknown IDs are silently ignored.
    async fn update_status(&self, id: &str, status: ComplaintStatus) -> PortResult<()>;
}
