//! Registration/nomination approval status.

use serde::{Deserialize, Serialize};

/// Approval lifecycle of a voter registration or candidate nomination.
///
/// Wire format: `i16` (0 = Pending, 1 = Approved, 2 = Rejected).
/// The only legal transitions are `Pending → Approved` and
/// `Pending → Rejected`; anything else is an invalid state transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalStatus {
    Pending = 0,
    Approved = 1,
    Rejected = 2,
}

impl ApprovalStatus {
    /// Convert from `i16` wire value. Returns `None` for unknown values.
    pub fn from_i16(v: i16) -> Option<Self> {
        match v {
            0 => Some(Self::Pending),
            1 => Some(Self::Approved),
            2 => Some(Self::Rejected),
            _ => None,
        }
    }

    /// Convert to `i16` wire value.
    pub fn as_i16(self) -> i16 {
        self as i16
    }

    pub fn is_pending(self) -> bool {
        matches!(self, Self::Pending)
    }

    pub fn is_approved(self) -> bool {
        matches!(self, Self::Approved)
    }

    /// Whether a transition from `self` to `to` is legal.
    pub fn can_transition_to(self, to: Self) -> bool {
        matches!(
            (self, to),
            (Self::Pending, Self::Approved) | (Self::Pending, Self::Rejected)
        )
    }
}
