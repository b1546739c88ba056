//! User role types.

use serde::{Deserialize, Serialize};

/// Account role.
///
/// Wire format: `i16` (0 = Voter, 1 = Candidate, 2 = Admin). Roles are
/// immutable after account creation; a user logs in against one role only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Voter = 0,
    Candidate = 1,
    Admin = 2,
}

impl UserRole {
    /// Convert from `i16` wire value. Returns `None` for unknown values.
    pub fn from_i16(v: i16) -> Option<Self> {
        match v {
            0 => Some(Self::Voter),
            1 => Some(Self::Candidate),
            2 => Some(Self::Admin),
            _ => None,
        }
    }

    /// Convert to `i16` wire value.
    pub fn as_i16(self) -> i16 {
        self as i16
    }
}
