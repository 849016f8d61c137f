//! Share entity model.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use mountview_core::error::AppError;
use mountview_core::result::AppResult;
use mountview_core::types::{GroupId, ResourceId, ShareId, UserId};

use super::permission::SharePermissions;

/// Type of share, as requested from the share lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShareType {
    /// A share granted directly to one user.
    User,
    /// A share granted to every member of a group.
    Group,
}

impl ShareType {
    /// Return the share type as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Group => "group",
        }
    }
}

impl fmt::Display for ShareType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ShareType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(Self::User),
            "group" => Ok(Self::Group),
            _ => Err(AppError::validation(format!(
                "Invalid share type: '{s}'. Expected one of: user, group"
            ))),
        }
    }
}

/// Acceptance state of a received share.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShareState {
    /// The recipient accepted the share; only accepted shares are mounted.
    #[default]
    Accepted,
    /// The recipient has not answered yet.
    Pending,
    /// The recipient declined the share.
    Rejected,
}

/// Fields shared by every kind of share.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareRecord {
    /// Unique share identifier.
    pub id: ShareId,
    /// The shared node.
    pub resource_id: ResourceId,
    /// Owner of the shared node.
    pub owner_id: UserId,
    /// Path under which the recipient sees the share.
    pub target: String,
    /// Permissions granted by this share.
    pub permissions: SharePermissions,
    /// When the share was created.
    pub created_at: DateTime<Utc>,
    /// Acceptance state for the recipient.
    #[serde(default)]
    pub state: ShareState,
}

impl ShareRecord {
    /// Create an accepted share record.
    pub fn new(
        id: ShareId,
        resource_id: ResourceId,
        owner_id: UserId,
        target: impl Into<String>,
        permissions: SharePermissions,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            resource_id,
            owner_id,
            target: target.into(),
            permissions,
            created_at,
            state: ShareState::Accepted,
        }
    }

    /// Replace the acceptance state.
    pub fn with_state(mut self, state: ShareState) -> Self {
        self.state = state;
        self
    }
}

/// A share received by a user, either directly or through a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "share_type", rename_all = "snake_case")]
pub enum Share {
    /// Granted directly to `recipient`.
    User {
        /// Common share fields.
        #[serde(flatten)]
        record: ShareRecord,
        /// The receiving user.
        recipient: UserId,
    },
    /// Granted to every member of `group_id`.
    Group {
        /// Common share fields.
        #[serde(flatten)]
        record: ShareRecord,
        /// The receiving group.
        group_id: GroupId,
    },
}

impl Share {
    /// Create a direct user share.
    pub fn user(record: ShareRecord, recipient: UserId) -> Self {
        Self::User { record, recipient }
    }

    /// Create a group share.
    pub fn group(record: ShareRecord, group_id: GroupId) -> Self {
        Self::Group { record, group_id }
    }

    /// The common share fields.
    pub fn record(&self) -> &ShareRecord {
        match self {
            Self::User { record, .. } | Self::Group { record, .. } => record,
        }
    }

    /// Mutable access to the common share fields.
    pub fn record_mut(&mut self) -> &mut ShareRecord {
        match self {
            Self::User { record, .. } | Self::Group { record, .. } => record,
        }
    }

    /// The share type tag.
    pub fn share_type(&self) -> ShareType {
        match self {
            Self::User { .. } => ShareType::User,
            Self::Group { .. } => ShareType::Group,
        }
    }

    /// The share id.
    pub fn id(&self) -> ShareId {
        self.record().id
    }

    /// The shared node.
    pub fn resource_id(&self) -> ResourceId {
        self.record().resource_id
    }

    /// Owner of the shared node.
    pub fn owner_id(&self) -> &UserId {
        &self.record().owner_id
    }

    /// Path under which the recipient sees the share.
    pub fn target(&self) -> &str {
        &self.record().target
    }

    /// Permissions granted by this share.
    pub fn permissions(&self) -> SharePermissions {
        self.record().permissions
    }

    /// When the share was created.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.record().created_at
    }

    /// Whether this share grants live access to `recipient`.
    ///
    /// Opted-out (zero permission), pending, rejected and self-owned shares
    /// are not live. These are ordinary outcomes, not errors.
    pub fn is_live_for(&self, recipient: &UserId) -> bool {
        let record = self.record();
        !record.permissions.is_empty()
            && record.state == ShareState::Accepted
            && &record.owner_id != recipient
    }

    /// Check the invariants a share must satisfy to be mounted.
    pub fn validate(&self) -> AppResult<()> {
        let record = self.record();
        if record.target.trim().is_empty() {
            return Err(AppError::invalid_configuration(format!(
                "Share {} has an empty target",
                record.id
            )));
        }
        if record.owner_id.as_str().is_empty() {
            return Err(AppError::invalid_configuration(format!(
                "Share {} has no owner",
                record.id
            )));
        }
        Ok(())
    }
}
