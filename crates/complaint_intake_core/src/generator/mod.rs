//! Complaint letter generation.
//!
//! Generation runs in two explicit stages:
//! * [`ComplaintGenerator::try_remote_generation`] asks the configured
//!   [`CompletionService`] for a category and a formal letter.
//! * [`template_generation`] detects the category from keywords and fills a
//!   fixed letter. It cannot fail.
//!
//! [`ComplaintGenerator::generate`] runs the first stage and falls back to the
//! second on any [`GenerationError`]. Both results are wrapped in the same
//! envelope, so callers cannot tell which path produced a letter.

pub mod category;
pub mod envelope;
pub mod parser;
pub mod prompt;
pub mod reference;

use chrono::{Local, Utc};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::domain::{ComplaintDetails, GenerationResult, Language, Letter};
use crate::ports::{CompletionService, PortError};

pub use category::detect_category;
pub use parser::parse_completion;
pub use prompt::build_prompt;
pub use reference::{new_complaint_id, new_letter_reference};

/// The value shipped in sample `.env` files. Treated the same as no key at all.
pub const PLACEHOLDER_API_KEY: &str = "your_groq_api_key_here";

/// Returns the key only if it is present, non-blank and not the placeholder.
pub fn usable_api_key(key: Option<&str>) -> Option<&str> {
    key.map(str::trim)
        .filter(|k| !k.is_empty() && *k != PLACEHOLDER_API_KEY)
}

/// Why the remote stage produced no letter. Always recovered by the template stage.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("no completion service is configured")]
    NotConfigured,
    #[error("completion service failed: {0}")]
    Remote(#[from] PortError),
    #[error("completion service returned an empty letter")]
    EmptyResponse,
}

/// Keyword-detected category plus the fixed letter around the user's text.
pub fn template_generation(text: &str, language: Language) -> Letter {
    let category = detect_category(text, language);
    Letter {
        category: category.to_string(),
        body: envelope::template_body(category, text, language),
    }
}

/// Produces complaint letters, preferring the completion service when one is configured.
#[derive(Clone, Default)]
pub struct ComplaintGenerator {
    completion: Option<Arc<dyn CompletionService>>,
}

impl ComplaintGenerator {
    /// Creates a generator. `None` means every letter comes from the template stage.
    pub fn new(completion: Option<Arc<dyn CompletionService>>) -> Self {
        Self { completion }
    }

    pub fn template_only() -> Self {
        Self { completion: None }
    }

    pub fn has_completion_service(&self) -> bool {
        self.completion.is_some()
    }

    /// Sends one completion request and parses the reply.
    pub async fn try_remote_generation(
        &self,
        text: &str,
        language: Language,
    ) -> Result<Letter, GenerationError> {
        let completion = self
            .completion
            .as_ref()
            .ok_or(GenerationError::NotConfigured)?;

        let response = completion.complete(&build_prompt(text, language)).await?;
        if response.trim().is_empty() {
            return Err(GenerationError::EmptyResponse);
        }

        let letter = parse_completion(&response, language);
        if letter.body.is_empty() {
            return Err(GenerationError::EmptyResponse);
        }
        Ok(letter)
    }

    /// Generates a complaint letter for non-empty `text`. Never fails.
    pub async fn generate(&self, text: &str, language: Language) -> GenerationResult {
        let letter = match self.try_remote_generation(text, language).await {
            Ok(letter) => {
                debug!(category = %letter.category, "Letter generated by completion service");
                letter
            }
            Err(GenerationError::NotConfigured) => {
                debug!("No completion service configured, using template letter");
                template_generation(text, language)
            }
            Err(e) => {
                warn!(error = %e, "Remote letter generation failed, using template letter");
                template_generation(text, language)
            }
        };
        finish(letter, text, language)
    }
}

fn finish(letter: Letter, text: &str, language: Language) -> GenerationResult {
    let now = Utc::now();
    let reference = new_letter_reference(now.timestamp_millis());
    let complaint_text = envelope::render_envelope(
        &reference,
        &letter.category,
        &letter.body,
        &now.with_timezone(&Local),
        language,
    );

    GenerationResult {
        complaint_text,
        category: letter.category.clone(),
        details: ComplaintDetails {
            category: letter.category,
            description: text.to_string(),
            timestamp: now,
            language,
        },
    }
}
