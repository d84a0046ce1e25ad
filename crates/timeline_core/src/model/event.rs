//! Timeline event model.
//!
//! # Responsibility
//! - Define `TimelineEvent`, the only record kept by the store.
//! - Normalize user input (`label`, `note`) into persisted shape.
//!
//! # Invariants
//! - `id` is `None` only before first persistence.
//! - `year` is the display grouping key; edits never touch it.
//! - `created_at` is epoch milliseconds and is only used for fetch order.

use crate::timeline::year_format::format_year;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Store-assigned identifier, stable for the lifetime of the store.
pub type EventId = i64;

/// Number of years before present. Larger means further in the past.
pub type YearNumber = u64;

/// Validation failure for event fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventValidationError {
    /// `label` is empty after trimming.
    EmptyLabel,
    /// `label` carries leading or trailing whitespace.
    UntrimmedLabel,
    /// `note` is present but empty.
    EmptyNote,
    /// `note` carries leading or trailing whitespace.
    UntrimmedNote,
    /// `year` display string is empty.
    EmptyYear,
}

impl Display for EventValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyLabel => write!(f, "label must not be empty"),
            Self::UntrimmedLabel => write!(f, "label must be trimmed"),
            Self::EmptyNote => write!(f, "note must be absent instead of empty"),
            Self::UntrimmedNote => write!(f, "note must be trimmed"),
            Self::EmptyYear => write!(f, "year display string must not be empty"),
        }
    }
}

impl Error for EventValidationError {}

/// One recorded historical event.
///
/// Serialized with camelCase field names so exported JSON matches the
/// browser-side record shape (`yearNumber`, `createdAt`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEvent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EventId>,
    /// Canonical sort key. Records written before the key existed read as 0.
    #[serde(default)]
    pub year_number: YearNumber,
    /// Formatted rendering of `year_number` captured at creation time.
    pub year: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub created_at: i64,
}

impl TimelineEvent {
    /// Builds an unsaved event from raw user input.
    ///
    /// Trims `label` and `note`, drops an empty note, and derives `year`
    /// from `year_number`. `created_at` is taken from the current clock.
    ///
    /// # Errors
    /// - `EmptyLabel` when `label` trims to nothing.
    pub fn new(
        year_number: YearNumber,
        label: &str,
        note: Option<&str>,
    ) -> Result<Self, EventValidationError> {
        let label = normalize_label(label).ok_or(EventValidationError::EmptyLabel)?;
        Ok(Self {
            id: None,
            year_number,
            year: format_year(year_number),
            label,
            note: note.and_then(normalize_note),
            created_at: chrono::Utc::now().timestamp_millis(),
        })
    }

    /// Checks persisted-shape invariants.
    pub fn validate(&self) -> Result<(), EventValidationError> {
        if self.year.is_empty() {
            return Err(EventValidationError::EmptyYear);
        }
        validate_text(&self.label, self.note.as_deref())
    }

    /// Returns whether this event has been written to the store.
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }
}

/// Trims a label. Returns `None` when nothing remains.
pub fn normalize_label(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Trims a note. Empty input becomes absent.
pub fn normalize_note(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Checks already-normalized `label` / `note` values.
pub fn validate_text(label: &str, note: Option<&str>) -> Result<(), EventValidationError> {
    if label.trim().is_empty() {
        return Err(EventValidationError::EmptyLabel);
    }
    if label.trim() != label {
        return Err(EventValidationError::UntrimmedLabel);
    }
    if let Some(note) = note {
        if note.trim().is_empty() {
            return Err(EventValidationError::EmptyNote);
        }
        if note.trim() != note {
            return Err(EventValidationError::UntrimmedNote);
        }
    }
    Ok(())
}
