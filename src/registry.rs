//! Event and participant registries.
//!
//! Peripheral CRUD around the lifecycle engine: event creation, ticket
//! issuance into an event's membership sequence, and participant identity
//! records.

use crate::codec;
use crate::error::{LedgerError, Result};
use crate::state::{Event, EventId, Participant, ParticipantId, ParticipantType, Ticket, TicketId};
use crate::store::StateStore;

/// Creates events and tracks which ticket IDs belong to them.
#[derive(Debug, Clone)]
pub struct EventRegistry<S> {
    store: S,
}

impl<S: StateStore> EventRegistry<S> {
    /// Create a registry over the given store.
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Create an event record with an empty membership sequence.
    ///
    /// No existence check is performed: creating an event under an ID that
    /// already exists silently overwrites the old record, including its
    /// membership sequence. `host_id` is not checked against the
    /// participant records.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Codec`] or [`LedgerError::Store`] if the
    /// record cannot be written.
    pub async fn create_event(
        &self,
        id: EventId,
        name: String,
        host_id: ParticipantId,
        date: String,
        location: String,
    ) -> Result<()> {
        let event = Event::new(id, name, host_id, date, location);
        codec::write_record(&self.store, event.id.as_str(), &event).await?;

        tracing::info!(event = %event.id, host = %event.host_id, "event created");
        Ok(())
    }

    /// Issue a ticket into an event.
    ///
    /// Writes a fresh `Available` ticket record bound to the event and
    /// appends its ID to the event's membership sequence. Re-issuing an
    /// existing ticket ID overwrites the ticket record (the registry's
    /// overwrite semantics), but the membership sequence never gains a
    /// duplicate entry.
    ///
    /// Both writes happen inside the one host transaction, which commits or
    /// rolls them back together.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::NotFound`] if the event does not exist.
    /// - [`LedgerError::Codec`] / [`LedgerError::Store`] on read/write faults.
    pub async fn add_ticket_to_event(
        &self,
        event_id: &EventId,
        ticket_id: &TicketId,
    ) -> Result<()> {
        let mut event: Event = codec::read_record(&self.store, event_id.as_str())
            .await?
            .ok_or_else(|| LedgerError::NotFound {
                key: event_id.to_string(),
            })?;

        let ticket = Ticket::available(ticket_id.clone(), event_id.clone());
        codec::write_record(&self.store, ticket.id.as_str(), &ticket).await?;

        if !event.is_member(ticket_id) {
            event.tickets.push(ticket_id.clone());
            codec::write_record(&self.store, event.id.as_str(), &event).await?;
        }

        tracing::info!(ticket = %ticket_id, event = %event_id, "ticket issued");
        Ok(())
    }
}

/// Records participant identity and role.
#[derive(Debug, Clone)]
pub struct ParticipantRegistry<S> {
    store: S,
}

impl<S: StateStore> ParticipantRegistry<S> {
    /// Create a registry over the given store.
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Register a participant as a member or an event host.
    ///
    /// Unconditional upsert: registering an existing ID overwrites the old
    /// record. Emits an audit log line on success.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Codec`] or [`LedgerError::Store`] if the
    /// record cannot be written.
    pub async fn register(
        &self,
        id: ParticipantId,
        name: String,
        kind: ParticipantType,
    ) -> Result<()> {
        let participant = Participant::new(id, name, kind);
        codec::write_record(&self.store, participant.id.as_str(), &participant).await?;

        tracing::info!(
            participant = %participant.id,
            kind = participant.kind.as_str(),
            "participant registered"
        );
        Ok(())
    }
}
