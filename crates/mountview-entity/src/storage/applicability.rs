//! Storage applicability levels.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How a storage applies to a particular user.
///
/// Variants are ordered by specificity: a storage configured for the user
/// directly is more specific than one configured for one of the user's
/// groups, which is more specific than an unrestricted storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Applicability {
    /// No applicable users or groups configured; visible to everyone.
    All,
    /// Visible through membership of an applicable group.
    Group,
    /// The user is listed as an applicable user.
    User,
}

impl Applicability {
    /// Return the applicability as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Group => "group",
            Self::User => "user",
        }
    }
}

impl fmt::Display for Applicability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
