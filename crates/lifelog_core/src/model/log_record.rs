//! Log record domain model.
//!
//! # Responsibility
//! - Define the single persisted entity shared by task/schedule/photo logs.
//! - Build validated records from Add-flow input.
//! - Own the status toggle rule.
//!
//! # Invariants
//! - `id` is non-empty and never reused for another record.
//! - `kind == LogKind::Photo` iff `photo_uri` is a non-empty reference.
//! - Photo records never carry a `status`.
//! - Task/schedule records always carry a non-blank `title`.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Opaque stable identifier of a log record.
///
/// New records use UUID v4 strings; older payloads may carry shorter ids.
pub type LogId = String;

/// Title applied to photo logs created without one.
pub const DEFAULT_PHOTO_TITLE: &str = "Photo Log";

/// Fixed category of a log record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogKind {
    /// Actionable item with completion status.
    Task,
    /// Scheduled item for a given day.
    Schedule,
    /// Photo note backed by a local image reference.
    Photo,
}

impl LogKind {
    pub const ALL: [LogKind; 3] = [LogKind::Task, LogKind::Schedule, LogKind::Photo];

    /// Stable wire label (`task|schedule|photo`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Task => "task",
            Self::Schedule => "schedule",
            Self::Photo => "photo",
        }
    }

    /// Parses a wire label, case-insensitive.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "task" => Some(Self::Task),
            "schedule" => Some(Self::Schedule),
            "photo" => Some(Self::Photo),
            _ => None,
        }
    }

    /// Whether records of this kind carry a completion status.
    pub fn has_status(self) -> bool {
        !matches!(self, Self::Photo)
    }
}

impl Display for LogKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Completion state for task/schedule records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogStatus {
    Todo,
    InProgress,
    Completed,
}

impl LogStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "todo" => Some(Self::Todo),
            "in_progress" => Some(Self::InProgress),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }

    /// Next status after a completion toggle.
    ///
    /// `completed` flips back to `in_progress`; every other state, including
    /// an absent one, becomes `completed`. A `todo` record therefore skips
    /// `in_progress` on its first toggle.
    pub fn toggled(current: Option<Self>) -> Self {
        match current {
            Some(Self::Completed) => Self::InProgress,
            _ => Self::Completed,
        }
    }
}

impl Display for LogStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation failures for record creation and store insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogValidationError {
    EmptyId,
    DuplicateId(LogId),
    MissingTitle(LogKind),
    MissingPhoto,
    UnexpectedPhoto(LogKind),
    StatusOnPhoto,
}

impl Display for LogValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyId => write!(f, "log id must not be empty"),
            Self::DuplicateId(id) => write!(f, "log id already exists: {id}"),
            Self::MissingTitle(kind) => write!(f, "{kind} log requires a title"),
            Self::MissingPhoto => write!(f, "photo log requires a photo"),
            Self::UnexpectedPhoto(kind) => write!(f, "{kind} log must not carry a photo"),
            Self::StatusOnPhoto => write!(f, "photo log must not carry a status"),
        }
    }
}

impl Error for LogValidationError {}

/// Canonical persisted log record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogRecord {
    pub id: LogId,
    /// Serialized as `type` to match the stored schema.
    #[serde(rename = "type")]
    pub kind: LogKind,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Logical day the entry belongs to (`YYYY-MM-DD`).
    pub date: NaiveDate,
    /// Creation instant; only used as an ordering tie-break.
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<LogStatus>,
    /// Local image reference; serialized as `uri`.
    #[serde(
        default,
        rename = "uri",
        alias = "photoUri",
        skip_serializing_if = "Option::is_none"
    )]
    pub photo_uri: Option<String>,
}

impl LogRecord {
    /// Builds a validated record from Add-flow input with a fresh id.
    ///
    /// # Errors
    /// - Returns `MissingTitle` for blank task/schedule titles.
    /// - Returns `MissingPhoto` for photo requests without an image reference.
    /// - Returns `UnexpectedPhoto` / `StatusOnPhoto` for mismatched fields.
    pub fn create(
        request: NewLogRequest,
        created_at: DateTime<Utc>,
    ) -> Result<Self, LogValidationError> {
        Self::create_with_id(Uuid::new_v4().to_string(), request, created_at)
    }

    /// Same as [`LogRecord::create`] with a caller-provided id.
    ///
    /// Used by import paths where identity already exists.
    pub fn create_with_id(
        id: impl Into<LogId>,
        request: NewLogRequest,
        created_at: DateTime<Utc>,
    ) -> Result<Self, LogValidationError> {
        let NewLogRequest {
            kind,
            title,
            description,
            date,
            photo_uri,
            status,
        } = request;

        let title = title.trim().to_string();
        let title = if title.is_empty() && kind == LogKind::Photo {
            DEFAULT_PHOTO_TITLE.to_string()
        } else {
            title
        };

        let record = Self {
            id: id.into(),
            kind,
            title,
            description: description
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty()),
            date,
            created_at,
            status,
            photo_uri: photo_uri
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty()),
        };
        record.validate()?;
        Ok(record)
    }

    /// Validates record-local invariants.
    ///
    /// Uniqueness of `id` is a collection property and is checked by the store.
    pub fn validate(&self) -> Result<(), LogValidationError> {
        if self.id.trim().is_empty() {
            return Err(LogValidationError::EmptyId);
        }

        match self.kind {
            LogKind::Photo => {
                if !self
                    .photo_uri
                    .as_deref()
                    .is_some_and(|uri| !uri.trim().is_empty())
                {
                    return Err(LogValidationError::MissingPhoto);
                }
                if self.status.is_some() {
                    return Err(LogValidationError::StatusOnPhoto);
                }
            }
            kind => {
                if self.title.trim().is_empty() {
                    return Err(LogValidationError::MissingTitle(kind));
                }
                if self.photo_uri.is_some() {
                    return Err(LogValidationError::UnexpectedPhoto(kind));
                }
            }
        }

        Ok(())
    }

    /// Returns whether the record has been marked completed.
    pub fn is_completed(&self) -> bool {
        self.status == Some(LogStatus::Completed)
    }

    /// Case-insensitive substring match over title and description.
    ///
    /// `needle` must already be lowercase.
    pub(crate) fn matches_lowercase(&self, needle: &str) -> bool {
        if needle.is_empty() {
            return true;
        }
        self.title.to_lowercase().contains(needle)
            || self
                .description
                .as_deref()
                .is_some_and(|description| description.to_lowercase().contains(needle))
    }
}

/// Add-flow input for a new record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLogRequest {
    pub kind: LogKind,
    pub title: String,
    pub description: Option<String>,
    pub date: NaiveDate,
    pub photo_uri: Option<String>,
    /// Initial status; the add screen leaves it unset.
    pub status: Option<LogStatus>,
}

impl NewLogRequest {
    /// Request for a task/schedule entry.
    pub fn new(kind: LogKind, title: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            kind,
            title: title.into(),
            description: None,
            date,
            photo_uri: None,
            status: None,
        }
    }

    /// Request for a photo entry; the title falls back to [`DEFAULT_PHOTO_TITLE`].
    pub fn photo(uri: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            kind: LogKind::Photo,
            title: String::new(),
            description: None,
            date,
            photo_uri: Some(uri.into()),
            status: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_status(mut self, status: LogStatus) -> Self {
        self.status = Some(status);
        self
    }
}
