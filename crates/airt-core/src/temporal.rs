//! # Timestamps
//!
//! Every instant the workspace records (result computation, snapshot time,
//! package generation) is a `Timestamp`: UTC, whole seconds, rendered as
//! `YYYY-MM-DDTHH:MM:SSZ`. One instant has exactly one rendering, so a
//! timestamp inside a hashed artifact never perturbs its digest.

use std::fmt;

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AirtError;

/// UTC instant with seconds precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// The current time, sub-seconds dropped.
    pub fn now() -> Self {
        Self(Utc::now().trunc_subsecs(0))
    }

    /// Parse an operator-supplied instant. Only the `Z` form is accepted, so
    /// a command line never silently shifts a generation time.
    pub fn parse(s: &str) -> Result<Self, AirtError> {
        if !s.ends_with('Z') {
            return Err(AirtError::Validation(format!(
                "timestamp {s:?} must be UTC with a Z suffix"
            )));
        }
        Self::normalize(s)
    }

    /// Any RFC 3339 instant, converted to UTC and truncated to seconds.
    fn normalize(s: &str) -> Result<Self, AirtError> {
        DateTime::parse_from_rfc3339(s)
            .map(|dt| Self(dt.with_timezone(&Utc).trunc_subsecs(0)))
            .map_err(|e| AirtError::Validation(format!("invalid timestamp {s:?}: {e}")))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_rfc3339_opts(SecondsFormat::Secs, true))
    }
}

/// Stored records may carry offsets; they are normalized on the way in.
impl TryFrom<String> for Timestamp {
    type Error = AirtError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::normalize(&value)
    }
}

impl From<Timestamp> for String {
    fn from(ts: Timestamp) -> Self {
        ts.to_string()
    }
}
