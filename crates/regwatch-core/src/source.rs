//! Monitored source records and their status lifecycle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::ToSchema;

use crate::error::ValidationError;
use crate::identity::SourceId;

/// Operational status of a monitored source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SourceStatus {
    /// The source is being checked on schedule.
    Active,
    /// Monitoring is switched off for this source.
    Inactive,
    /// The last check failed.
    Error,
}

impl SourceStatus {
    /// Returns the lowercase string identifier for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Error => "error",
        }
    }
}

impl std::fmt::Display for SourceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            "error" => Ok(Self::Error),
            other => Err(ValidationError::UnknownSourceStatus(other.to_string())),
        }
    }
}

/// A regulatory publication channel being monitored for changes.
///
/// `status` and `monitoring` are independently settable, but
/// [`SourceRecord::set_monitoring`] keeps them in the conventional
/// correlation: switching monitoring off marks the source inactive and
/// switching it on marks it active.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SourceRecord {
    /// Unique source identifier.
    pub id: SourceId,
    /// Display name.
    pub name: String,
    /// URL of the monitored publication channel.
    pub url: String,
    /// Regulator / framework category (e.g. "RBI", "DPDP").
    pub category: String,
    /// When the source was last checked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_checked: Option<DateTime<Utc>>,
    /// When a change was last detected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_changed: Option<DateTime<Utc>>,
    /// Operational status.
    pub status: SourceStatus,
    /// Whether the source is currently monitored.
    pub monitoring: bool,
}

impl SourceRecord {
    /// Create a freshly registered source with a minted id.
    ///
    /// New sources start active and monitored, with no check history.
    pub fn new(name: impl Into<String>, url: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            id: SourceId::generate(),
            name: name.into(),
            url: url.into(),
            category: category.into(),
            last_checked: None,
            last_changed: None,
            status: SourceStatus::Active,
            monitoring: true,
        }
    }

    /// Set the monitoring flag, syncing `status` to the conventional value.
    ///
    /// An `Error` status is only overwritten when monitoring is switched
    /// off; re-enabling a failed source leaves the error visible until the
    /// next successful check.
    pub fn set_monitoring(&mut self, monitoring: bool) {
        self.monitoring = monitoring;
        if monitoring {
            if self.status == SourceStatus::Inactive {
                self.status = SourceStatus::Active;
            }
        } else {
            self.status = SourceStatus::Inactive;
        }
    }

    /// Flip the monitoring flag, syncing `status`.
    pub fn toggle_monitoring(&mut self) {
        self.set_monitoring(!self.monitoring);
    }
}
