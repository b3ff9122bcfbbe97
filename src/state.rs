//! Ledger entity types.
//!
//! This module defines the records stored in the world state. Field names are
//! pinned with `#[serde(rename)]` to the wire names used by existing stored
//! records (`ID`, `hostID`, `eventID`, ...), so the crate reads and writes
//! the same JSON shape the original deployment produced.

use serde::{Deserialize, Serialize};
use std::fmt;

// ═══════════════════════════════════════════════════════════════════════
// ID Types
// ═══════════════════════════════════════════════════════════════════════

/// Unique identifier for a participant.
///
/// IDs are caller-supplied strings, not generated: the registering client
/// chooses them, and they double as store keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(pub String);

impl ParticipantId {
    /// Wrap a caller-supplied identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice. Doubles as the store key.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ParticipantId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

/// Unique identifier for an event.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(pub String);

impl EventId {
    /// Wrap a caller-supplied identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice. Doubles as the store key.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EventId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

/// Unique identifier for a ticket.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TicketId(pub String);

impl TicketId {
    /// Wrap a caller-supplied identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice. Doubles as the store key.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TicketId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Closed Enums
// ═══════════════════════════════════════════════════════════════════════

/// Role of a registered participant.
///
/// A closed two-variant type: invalid participant kinds are unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParticipantType {
    /// Ordinary member who can buy and hold tickets.
    Member,
    /// Host who puts on events.
    EventHost,
}

impl ParticipantType {
    /// Get the wire string for this kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Member => "Member",
            Self::EventHost => "EventHost",
        }
    }
}

impl fmt::Display for ParticipantType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Position of a ticket in its lifecycle.
///
/// ```text
/// Available → Sold → (Resold)* → Used
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TicketStatus {
    /// Issued for an event, not yet purchased.
    Available,
    /// Purchased for the first time.
    Sold,
    /// Transferred to a new owner after the first sale.
    Resold,
    /// Redeemed at the gate. Terminal.
    Used,
}

impl TicketStatus {
    /// Get the wire string for this status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::Sold => "Sold",
            Self::Resold => "Resold",
            Self::Used => "Used",
        }
    }

    /// Returns `true` if the ticket can be redeemed in this status.
    #[must_use]
    pub const fn is_redeemable(&self) -> bool {
        matches!(self, Self::Sold | Self::Resold)
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Entity Records
// ═══════════════════════════════════════════════════════════════════════

/// Identity record for a member or event host.
///
/// Participants have no lifecycle beyond create/overwrite: re-registering an
/// ID replaces the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// Unique identifier, also the store key.
    #[serde(rename = "ID")]
    pub id: ParticipantId,

    /// Display name.
    pub name: String,

    /// Role of the participant.
    #[serde(rename = "type")]
    pub kind: ParticipantType,
}

impl Participant {
    /// Create a participant record.
    pub fn new(id: ParticipantId, name: impl Into<String>, kind: ParticipantType) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
        }
    }
}

/// A ticketed event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Unique identifier, also the store key.
    #[serde(rename = "ID")]
    pub id: EventId,

    /// Display name.
    pub name: String,

    /// Hosting participant. Not checked referentially by this crate.
    #[serde(rename = "hostID")]
    pub host_id: ParticipantId,

    /// Event date, kept as an opaque string for wire compatibility.
    pub date: String,

    /// Venue.
    pub location: String,

    /// Ordered membership sequence: the tickets issued for this event.
    ///
    /// Authoritative for redemption checks — a ticket may only be used
    /// against an event that lists it here.
    pub tickets: Vec<TicketId>,
}

impl Event {
    /// Create an event record with an empty membership sequence.
    pub fn new(
        id: EventId,
        name: impl Into<String>,
        host_id: ParticipantId,
        date: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            host_id,
            date: date.into(),
            location: location.into(),
            tickets: Vec::new(),
        }
    }

    /// Returns `true` if the ticket was issued for this event.
    #[must_use]
    pub fn is_member(&self, ticket_id: &TicketId) -> bool {
        self.tickets.contains(ticket_id)
    }
}

/// A single ticket, bound to one event for its whole life.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    /// Unique identifier, also the store key.
    #[serde(rename = "ID")]
    pub id: TicketId,

    /// Event this ticket was issued for.
    #[serde(rename = "eventID")]
    pub event_id: EventId,

    /// Lifecycle position.
    pub status: TicketStatus,

    /// Owning participant ID. Empty exactly when the ticket is unowned
    /// (wire shape of the original records).
    pub owner: String,
}

impl Ticket {
    /// Create a fresh, unowned ticket for an event.
    #[must_use]
    pub const fn available(id: TicketId, event_id: EventId) -> Self {
        Self {
            id,
            event_id,
            status: TicketStatus::Available,
            owner: String::new(),
        }
    }

    /// Invariant check: `owner` is non-empty iff the ticket has been sold,
    /// resold, or used.
    #[must_use]
    pub fn owner_matches_status(&self) -> bool {
        self.owner.is_empty() == matches!(self.status, TicketStatus::Available)
    }
}
