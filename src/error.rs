use crate::phase::Phase;
use crate::Address;
use serde::Deserialize;
use serde::Serialize;

/// Roles a node may need to hold before it is allowed to act.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Leader,
    Referee,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Role::Leader => write!(f, "leader"),
            Role::Referee => write!(f, "referee"),
        }
    }
}

/// Every failure a node can report, locally or across the wire.
///
/// Two kinds drive recovery. Violations (`ProtocolViolation`, `MissingRole`)
/// are fatal to the single call and propagate to the caller. `Usage` and
/// `NameNotFound` are retried in place by re-prompting the same source.
/// `Unreachable` hands control to the failure detector.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize, Deserialize)]
pub enum Error {
    #[error("{op} is legal in phases {expected:?}, node is in phase {actual}")]
    ProtocolViolation {
        op: String,
        expected: Vec<Phase>,
        actual: Phase,
    },
    #[error("{op} requires the {role} role")]
    MissingRole { op: String, role: Role },
    #[error("peer at {0} is unreachable")]
    Unreachable(Address),
    #[error("{0}")]
    Usage(String),
    #[error("no member named {0}")]
    NameNotFound(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("deck exhausted")]
    Exhausted,
}

impl Error {
    pub fn is_violation(&self) -> bool {
        matches!(
            self,
            Error::ProtocolViolation { .. } | Error::MissingRole { .. }
        )
    }
    pub fn is_unreachable(&self) -> bool {
        matches!(self, Error::Unreachable(_))
    }
    /// Usage and lookup failures are answered by asking again.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::Usage(_) | Error::NameNotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
