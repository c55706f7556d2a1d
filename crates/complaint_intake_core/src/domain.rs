//! crates/complaint_intake_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! These structs are independent of any database or serialization format.

use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;

/// The language a complaint was recorded and written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    En,
    Ta,
}

/// Returned when a language or status tag is not one the core knows about.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseTagError {
    #[error("Unknown language: {0}")]
    UnknownLanguage(String),
    #[error("Unknown complaint status: {0}")]
    UnknownStatus(String),
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ta => "ta",
        }
    }

    /// The category used when nothing more specific can be determined.
    pub fn default_category(&self) -> &'static str {
        match self {
            Language::En => "Other",
            Language::Ta => "பிற",
        }
    }

    /// BCP 47 locale handed to the browser's speech synthesis.
    pub fn speech_locale(&self) -> &'static str {
        match self {
            Language::En => "en-US",
            Language::Ta => "ta-IN",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = ParseTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Language::En),
            "ta" => Ok(Language::Ta),
            _ => Err(ParseTagError::UnknownLanguage(s.to_string())),
        }
    }
}

/// Lifecycle of a stored complaint. Only `Submitted` is assigned by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComplaintStatus {
    Submitted,
    Reviewed,
    Resolved,
}

impl ComplaintStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComplaintStatus::Submitted => "submitted",
            ComplaintStatus::Reviewed => "reviewed",
            ComplaintStatus::Resolved => "resolved",
        }
    }
}

impl fmt::Display for ComplaintStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComplaintStatus {
    type Err = ParseTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "submitted" => Ok(ComplaintStatus::Submitted),
            "reviewed" => Ok(ComplaintStatus::Reviewed),
            "resolved" => Ok(ComplaintStatus::Resolved),
            _ => Err(ParseTagError::UnknownStatus(s.to_string())),
        }
    }
}

/// A complaint as handed to the store, before it has been stamped with timestamps.
#[derive(Debug, Clone, PartialEq)]
pub struct NewComplaint {
    pub id: String,
    pub complaint_text: String,
    pub transcribed_text: String,
    pub audio_path: Option<String>,
    pub language: Language,
    pub category: String,
    pub status: ComplaintStatus,
}

/// A persisted complaint.
#[derive(Debug, Clone, PartialEq)]
pub struct ComplaintRecord {
    pub id: String,
    pub complaint_text: String,
    pub transcribed_text: String,
    pub audio_path: Option<String>,
    pub language: Language,
    pub category: String,
    pub status: ComplaintStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ComplaintRecord {
    /// Stamps a new complaint with identical creation and update times.
    pub fn stamped(new: NewComplaint, now: DateTime<Utc>) -> Self {
        Self {
            id: new.id,
            complaint_text: new.complaint_text,
            transcribed_text: new.transcribed_text,
            audio_path: new.audio_path,
            language: new.language,
            category: new.category,
            status: new.status,
            created_at: now,
            updated_at: now,
        }
    }
}

/// The output of one generation stage, before it is wrapped in the envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Letter {
    pub category: String,
    pub body: String,
}

/// Metadata describing how a complaint letter was produced.
#[derive(Debug, Clone, PartialEq)]
pub struct ComplaintDetails {
    pub category: String,
    /// The user's own words, never the generated letter.
    pub description: String,
    pub timestamp: DateTime<Utc>,
    pub language: Language,
}

/// A candidate complaint letter. Request-scoped; the caller decides whether to persist it.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationResult {
    pub complaint_text: String,
    pub category: String,
    pub details: ComplaintDetails,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_parses_loosely() {
        assert_eq!(" TA ".parse::<Language>(), Ok(Language::Ta));
        assert_eq!("en".parse::<Language>(), Ok(Language::En));
        assert_eq!(
            "fr".parse::<Language>(),
            Err(ParseTagError::UnknownLanguage("fr".to_string()))
        );
    }

    #[test]
    fn status_tags_match_storage_format() {
        for status in [
            ComplaintStatus::Submitted,
            ComplaintStatus::Reviewed,
            ComplaintStatus::Resolved,
        ] {
            assert_eq!(status.as_str().parse::<ComplaintStatus>(), Ok(status));
        }
        assert!("closed".parse::<ComplaintStatus>().is_err());
    }

    #[test]
    fn stamped_record_has_equal_timestamps() {
        let now = Utc::now();
        let record = ComplaintRecord::stamped(
            NewComplaint {
                id: "ABCD1234".to_string(),
                complaint_text: "letter".to_string(),
                transcribed_text: "raw".to_string(),
                audio_path: None,
                language: Language::En,
                category: "Road".to_string(),
                status: ComplaintStatus::Submitted,
            },
            now,
        );
        assert_eq!(record.created_at, now);
        assert_eq!(record.updated_at, record.created_at);
        assert_eq!(record.category, "Road");
    }
}
