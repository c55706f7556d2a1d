//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use crate::config::Config;
use complaint_intake_core::{generator::ComplaintGenerator, ports::ComplaintStore};
use std::sync::Arc;

//=========================================================================================
// AppState (Shared Across All Requests)
//=========================================================================================

/// The shared application state, created once at startup and passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ComplaintStore>,
    pub generator: ComplaintGenerator,
    pub config: Arc<Config>,
}

impl AppState {
    /// Human-readable name of whatever writes the letters, reported by the health check.
    pub fn ai_provider(&self) -> String {
        if self.generator.has_completion_service() {
            format!("Groq {}", self.config.ai_model)
        } else {
            "Template-based".to_string()
        }
    }
}
