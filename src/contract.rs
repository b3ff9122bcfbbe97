//! Public operation surface.
//!
//! [`TicketContract`] is what the host ledger runtime installs and invokes:
//! one thin struct owning the injected store, exposing the ledger's
//! operations and delegating to the lifecycle engine and the registries.
//! Every operation is a single logical unit of work inside the host's
//! transaction envelope.

use crate::error::Result;
use crate::lifecycle::TicketLifecycle;
use crate::registry::{EventRegistry, ParticipantRegistry};
use crate::state::{EventId, ParticipantId, ParticipantType, TicketId};
use crate::store::StateStore;

/// The ticket ledger contract.
///
/// Generic over the injected [`StateStore`] so hosts bring their own world
/// state and tests run against [`crate::MemoryStore`].
#[derive(Debug, Clone)]
pub struct TicketContract<S> {
    store: S,
}

impl<S: StateStore> TicketContract<S> {
    /// Install the contract over the given store.
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Register a participant as either a member or an event host.
    ///
    /// Unconditional upsert.
    ///
    /// # Errors
    ///
    /// Returns error if the record cannot be encoded or written.
    pub async fn register_participant(
        &self,
        id: ParticipantId,
        name: String,
        kind: ParticipantType,
    ) -> Result<()> {
        self.participants().register(id, name, kind).await
    }

    /// Create a new event with the provided details.
    ///
    /// Silently overwrites an existing event under the same ID.
    ///
    /// # Errors
    ///
    /// Returns error if the record cannot be encoded or written.
    pub async fn create_event(
        &self,
        id: EventId,
        name: String,
        host_id: ParticipantId,
        date: String,
        location: String,
    ) -> Result<()> {
        self.events()
            .create_event(id, name, host_id, date, location)
            .await
    }

    /// Issue a ticket for an event: write the `Available` ticket record and
    /// list it in the event's membership sequence.
    ///
    /// # Errors
    ///
    /// Returns error if the event is absent or a record cannot be
    /// read/written.
    pub async fn add_ticket_to_event(
        &self,
        event_id: &EventId,
        ticket_id: &TicketId,
    ) -> Result<()> {
        self.events().add_ticket_to_event(event_id, ticket_id).await
    }

    /// List the available tickets for an event, in membership order.
    ///
    /// # Errors
    ///
    /// Returns error if the event is absent or any member ticket record
    /// cannot be read.
    pub async fn list_available_tickets(&self, event_id: &EventId) -> Result<Vec<TicketId>> {
        self.lifecycle().list_available(event_id).await
    }

    /// Sell an available ticket to a participant.
    ///
    /// # Errors
    ///
    /// Returns error if the ticket is absent or not `Available`.
    pub async fn sell_ticket(
        &self,
        ticket_id: &TicketId,
        participant_id: &ParticipantId,
    ) -> Result<()> {
        self.lifecycle().sell(ticket_id, participant_id).await
    }

    /// Resell a sold ticket to a new owner.
    ///
    /// # Errors
    ///
    /// Returns error if the ticket is absent or not `Sold`.
    pub async fn resell_ticket(
        &self,
        ticket_id: &TicketId,
        new_owner_id: &ParticipantId,
    ) -> Result<()> {
        self.lifecycle().resell(ticket_id, new_owner_id).await
    }

    /// Redeem a ticket for entry to an event.
    ///
    /// # Errors
    ///
    /// Returns error if the ticket or event is absent, the ticket is not
    /// `Sold`/`Resold`, or the event does not list the ticket.
    pub async fn use_ticket(&self, ticket_id: &TicketId, event_id: &EventId) -> Result<()> {
        self.lifecycle().redeem(ticket_id, event_id).await
    }

    fn lifecycle(&self) -> TicketLifecycle<&S> {
        TicketLifecycle::new(&self.store)
    }

    fn events(&self) -> EventRegistry<&S> {
        EventRegistry::new(&self.store)
    }

    fn participants(&self) -> ParticipantRegistry<&S> {
        ParticipantRegistry::new(&self.store)
    }
}
