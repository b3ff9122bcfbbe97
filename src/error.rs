//! Error types for ledger operations.

use crate::state::TicketStatus;
use thiserror::Error;

/// Result type alias for ledger operations.
pub type Result<T> = std::result::Result<T, LedgerError>;

/// Error taxonomy for the ticket ledger.
///
/// Every failure is surfaced to the caller immediately — nothing is retried
/// or swallowed internally. The host's transaction envelope discards any
/// writes made before the failure, so no partial mutation is observable.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// No record exists in the world state under this key.
    #[error("record {key} does not exist")]
    NotFound {
        /// Store key that was looked up
        key: String,
    },

    /// The ticket's current status does not satisfy the transition's
    /// precondition.
    #[error("ticket {ticket} is {status}, expected {expected}")]
    InvalidState {
        /// Ticket the transition was requested on
        ticket: String,
        /// Status the ticket is actually in
        status: TicketStatus,
        /// Status the transition requires
        expected: &'static str,
    },

    /// The ticket is not listed in the target event's membership sequence.
    #[error("ticket {ticket} does not belong to event {event}")]
    Membership {
        /// Ticket that was presented
        ticket: String,
        /// Event it was presented against
        event: String,
    },

    /// Stored bytes could not be decoded into the expected entity shape.
    #[error("failed to decode record {key}: {reason}")]
    Codec {
        /// Store key of the undecodable record
        key: String,
        /// Decoder failure detail
        reason: String,
    },

    /// The underlying get/put against the world state failed.
    #[error("state store error: {0}")]
    Store(String),
}

impl LedgerError {
    /// Returns `true` if this error is a missing record.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns `true` if this error is a violated business precondition
    /// rather than a store or decoding fault.
    #[must_use]
    pub const fn is_precondition(&self) -> bool {
        matches!(self, Self::InvalidState { .. } | Self::Membership { .. })
    }
}
