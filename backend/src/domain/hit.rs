//! Hit events: the immutable facts recorded by the statistics service.
//!
//! A hit says that a visitor (`ip`) requested `uri` of application `app` at
//! `timestamp`. Values are opaque: nothing is trimmed or normalised, so
//! `/events/1` and `/events/1/` are distinct URIs.

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Wire and storage format for hit timestamps (naive, second resolution).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Required hit field names, as reported in validation failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HitField {
    App,
    Uri,
    Ip,
    Timestamp,
}

impl HitField {
    /// Field name as it appears on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::App => "app",
            Self::Uri => "uri",
            Self::Ip => "ip",
            Self::Timestamp => "timestamp",
        }
    }
}

impl fmt::Display for HitField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation errors returned by [`NewHit::new`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HitValidationError {
    /// A text field is empty or whitespace-only.
    #[error("{field} must not be blank")]
    Blank { field: HitField },
    /// The timestamp was not supplied.
    #[error("timestamp must be present")]
    MissingTimestamp,
}

impl HitValidationError {
    /// The field that failed validation.
    pub fn field(&self) -> HitField {
        match self {
            Self::Blank { field } => *field,
            Self::MissingTimestamp => HitField::Timestamp,
        }
    }
}

/// Unvalidated hit input as received from a producer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HitDraft {
    pub app: String,
    pub uri: String,
    pub ip: String,
    pub timestamp: Option<NaiveDateTime>,
}

/// A validated hit that has not yet been assigned an identifier.
///
/// ## Invariants
/// - `app`, `uri` and `ip` are non-blank.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use stats_backend::domain::{HitDraft, NewHit};
///
/// let timestamp = NaiveDate::from_ymd_opt(2024, 1, 1)
///     .and_then(|d| d.and_hms_opt(10, 0, 0));
/// let hit = NewHit::new(HitDraft {
///     app: "ewm-main".to_owned(),
///     uri: "/events/1".to_owned(),
///     ip: "10.0.0.1".to_owned(),
///     timestamp,
/// })
/// .expect("valid hit");
/// assert_eq!(hit.uri(), "/events/1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewHit {
    app: String,
    uri: String,
    ip: String,
    timestamp: NaiveDateTime,
}

fn require_text(value: String, field: HitField) -> Result<String, HitValidationError> {
    if value.trim().is_empty() {
        return Err(HitValidationError::Blank { field });
    }
    Ok(value)
}

impl NewHit {
    /// Validate a draft. Fields are checked in the order app, uri, ip,
    /// timestamp and the first failure is returned.
    pub fn new(draft: HitDraft) -> Result<Self, HitValidationError> {
        let HitDraft {
            app,
            uri,
            ip,
            timestamp,
        } = draft;
        let app = require_text(app, HitField::App)?;
        let uri = require_text(uri, HitField::Uri)?;
        let ip = require_text(ip, HitField::Ip)?;
        let timestamp = timestamp.ok_or(HitValidationError::MissingTimestamp)?;
        Ok(Self {
            app,
            uri,
            ip,
            timestamp,
        })
    }

    pub fn app(&self) -> &str {
        &self.app
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn ip(&self) -> &str {
        &self.ip
    }

    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    /// Attach the store-assigned identifier.
    pub fn into_event(self, id: HitId) -> HitEvent {
        HitEvent {
            id,
            app: self.app,
            uri: self.uri,
            ip: self.ip,
            timestamp: self.timestamp,
        }
    }
}

impl TryFrom<HitDraft> for NewHit {
    type Error = HitValidationError;

    fn try_from(value: HitDraft) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Store-assigned surrogate identifier, increasing in insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HitId(i64);

impl HitId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for HitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A hit as persisted by the store. Never mutated after append.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HitEvent {
    pub id: HitId,
    pub app: String,
    pub uri: String,
    pub ip: String,
    pub timestamp: NaiveDateTime,
}
