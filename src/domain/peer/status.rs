//! Peer status codes

use serde::{Deserialize, Serialize};

/// Peer status codes, provided for developer convenience only.
///
/// The authoritative value set lives in a database reference table and is
/// validated server-side; this enum may drift from it and must never be
/// used as the source of truth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PeerStatusCode {
    /// AC
    Active,
    /// IN
    Inactive,
    /// PA
    PendingActive,
    /// RM
    Removed,
    /// PR
    PendingRemove,
}

impl PeerStatusCode {
    /// The two-letter code stored in STATUS_CD columns
    pub fn code(&self) -> &'static str {
        match self {
            Self::Active => "AC",
            Self::Inactive => "IN",
            Self::PendingActive => "PA",
            Self::Removed => "RM",
            Self::PendingRemove => "PR",
        }
    }

    /// Human-readable name for the code
    pub fn status_name(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
            Self::PendingActive => "Pending Active",
            Self::Removed => "Removed",
            Self::PendingRemove => "Pending Remove",
        }
    }

    /// Parse a stored code; None for codes this enum does not know about
    /// (the reference table may hold values added after this crate shipped)
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "AC" => Some(Self::Active),
            "IN" => Some(Self::Inactive),
            "PA" => Some(Self::PendingActive),
            "RM" => Some(Self::Removed),
            "PR" => Some(Self::PendingRemove),
            _ => None,
        }
    }
}

impl std::fmt::Display for PeerStatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}
