//! Share permission bit set.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

use serde::{Deserialize, Serialize};

/// Permission mask granted by a share.
///
/// A mask of zero means the recipient opted out of the share.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SharePermissions(pub u32);

impl SharePermissions {
    /// No permission; the recipient opted out.
    pub const NONE: Self = Self(0);
    /// Read the shared node.
    pub const READ: Self = Self(1);
    /// Modify existing content.
    pub const UPDATE: Self = Self(2);
    /// Create new content inside a shared folder.
    pub const CREATE: Self = Self(4);
    /// Delete content.
    pub const DELETE: Self = Self(8);
    /// Reshare the node.
    pub const SHARE: Self = Self(16);
    /// Every permission.
    pub const ALL: Self = Self(31);

    /// Return the raw bit mask.
    pub fn bits(self) -> u32 {
        self.0
    }

    /// Returns true if no bit is set.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns true if every bit of `other` is set in `self`.
    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl From<u32> for SharePermissions {
    fn from(bits: u32) -> Self {
        Self(bits)
    }
}

impl BitOr for SharePermissions {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for SharePermissions {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl FromIterator<SharePermissions> for SharePermissions {
    fn from_iter<I: IntoIterator<Item = SharePermissions>>(iter: I) -> Self {
        iter.into_iter().fold(Self::NONE, |acc, p| acc | p)
    }
}

impl fmt::Display for SharePermissions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
