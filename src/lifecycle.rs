//! Ticket lifecycle engine.
//!
//! The state machine over [`TicketStatus`]:
//!
//! ```text
//! Available ──sell──▶ Sold ──resell──▶ Resold
//!                       │                 │
//!                       └────redeem───────┴──▶ Used (terminal)
//! ```
//!
//! Transitions are one-way. The only path to `Used` runs through `Sold` or
//! `Resold`, and once `Used` no transition's precondition matches, so a
//! redeemed ticket is permanently inert — double-redemption and resale of a
//! used ticket are impossible by construction rather than by extra checks.
//!
//! Each transition is a read-check-write sequence against a single record.
//! It executes as if atomic relative to concurrent invocations because the
//! host serializes invocations; the engine itself takes no locks.

use crate::codec;
use crate::error::{LedgerError, Result};
use crate::state::{Event, EventId, ParticipantId, Ticket, TicketId, TicketStatus};
use crate::store::StateStore;

/// Status transitions, ownership changes, and event-membership checks.
///
/// Borrows or owns the injected [`StateStore`]; every operation re-reads the
/// authoritative record at the start of its invocation and writes the full
/// updated record back.
#[derive(Debug, Clone)]
pub struct TicketLifecycle<S> {
    store: S,
}

impl<S: StateStore> TicketLifecycle<S> {
    /// Create a lifecycle engine over the given store.
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// First sale: `Available` → `Sold`, ownership to `buyer`.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::NotFound`] if the ticket does not exist.
    /// - [`LedgerError::InvalidState`] if the ticket is not `Available`.
    /// - [`LedgerError::Codec`] / [`LedgerError::Store`] on read/write faults.
    pub async fn sell(&self, ticket_id: &TicketId, buyer: &ParticipantId) -> Result<()> {
        let mut ticket = self.read_ticket(ticket_id).await?;

        if ticket.status != TicketStatus::Available {
            return Err(LedgerError::InvalidState {
                ticket: ticket_id.to_string(),
                status: ticket.status,
                expected: "Available",
            });
        }

        ticket.status = TicketStatus::Sold;
        ticket.owner = buyer.as_str().to_owned();
        self.write_ticket(&ticket).await?;

        tracing::info!(ticket = %ticket.id, owner = %buyer, "ticket sold");
        Ok(())
    }

    /// Resale: `Sold` → `Resold`, ownership to `new_owner`.
    ///
    /// Only a first-sale ticket may be resold; a ticket already in `Resold`
    /// cannot be resold again.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::NotFound`] if the ticket does not exist.
    /// - [`LedgerError::InvalidState`] if the ticket is not `Sold`.
    /// - [`LedgerError::Codec`] / [`LedgerError::Store`] on read/write faults.
    pub async fn resell(&self, ticket_id: &TicketId, new_owner: &ParticipantId) -> Result<()> {
        let mut ticket = self.read_ticket(ticket_id).await?;

        if ticket.status != TicketStatus::Sold {
            return Err(LedgerError::InvalidState {
                ticket: ticket_id.to_string(),
                status: ticket.status,
                expected: "Sold",
            });
        }

        ticket.status = TicketStatus::Resold;
        ticket.owner = new_owner.as_str().to_owned();
        self.write_ticket(&ticket).await?;

        tracing::info!(ticket = %ticket.id, owner = %new_owner, "ticket resold");
        Ok(())
    }

    /// Redemption: `Sold`/`Resold` → `Used`, owner unchanged.
    ///
    /// The ticket must be listed in the target event's membership sequence.
    /// The status is checked before the event is read, so a wrong-status
    /// ticket fails `InvalidState` even against a nonexistent event.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::NotFound`] if the ticket or the event does not exist.
    /// - [`LedgerError::InvalidState`] if the ticket is not `Sold` or `Resold`.
    /// - [`LedgerError::Membership`] if the event does not list the ticket.
    /// - [`LedgerError::Codec`] / [`LedgerError::Store`] on read/write faults.
    pub async fn redeem(&self, ticket_id: &TicketId, event_id: &EventId) -> Result<()> {
        let mut ticket = self.read_ticket(ticket_id).await?;

        if !ticket.status.is_redeemable() {
            return Err(LedgerError::InvalidState {
                ticket: ticket_id.to_string(),
                status: ticket.status,
                expected: "Sold or Resold",
            });
        }

        let event = self.read_event(event_id).await?;
        if !event.is_member(&ticket.id) {
            return Err(LedgerError::Membership {
                ticket: ticket_id.to_string(),
                event: event_id.to_string(),
            });
        }

        ticket.status = TicketStatus::Used;
        self.write_ticket(&ticket).await?;

        tracing::info!(ticket = %ticket.id, event = %event.id, "ticket redeemed");
        Ok(())
    }

    /// IDs of the event's member tickets whose status is `Available`, in the
    /// event's stored membership order.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::NotFound`] if the event does not exist, or if any
    ///   listed ticket record cannot be read — a membership entry without a
    ///   record is a data-integrity fault, never silently skipped.
    /// - [`LedgerError::Codec`] / [`LedgerError::Store`] on read faults.
    pub async fn list_available(&self, event_id: &EventId) -> Result<Vec<TicketId>> {
        let event = self.read_event(event_id).await?;

        let mut available = Vec::new();
        for ticket_id in &event.tickets {
            let ticket = self.read_ticket(ticket_id).await?;
            if ticket.status == TicketStatus::Available {
                available.push(ticket.id);
            }
        }

        Ok(available)
    }

    async fn read_ticket(&self, id: &TicketId) -> Result<Ticket> {
        codec::read_record(&self.store, id.as_str())
            .await?
            .ok_or_else(|| LedgerError::NotFound {
                key: id.to_string(),
            })
    }

    async fn read_event(&self, id: &EventId) -> Result<Event> {
        codec::read_record(&self.store, id.as_str())
            .await?
            .ok_or_else(|| LedgerError::NotFound {
                key: id.to_string(),
            })
    }

    async fn write_ticket(&self, ticket: &Ticket) -> Result<()> {
        codec::write_record(&self.store, ticket.id.as_str(), ticket).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::registry::EventRegistry;
    use crate::store::MemoryStore;

    /// Event E1 with tickets T1, T2; returns the engine and the store.
    async fn seeded_world() -> (TicketLifecycle<MemoryStore>, MemoryStore) {
        let store = MemoryStore::new();
        let events = EventRegistry::new(store.clone());

        events
            .create_event(
                EventId::new("E1"),
                "Rust Nation".into(),
                ParticipantId::new("host-1"),
                "2026-09-01".into(),
                "London".into(),
            )
            .await
            .unwrap();
        events
            .add_ticket_to_event(&EventId::new("E1"), &TicketId::new("T1"))
            .await
            .unwrap();
        events
            .add_ticket_to_event(&EventId::new("E1"), &TicketId::new("T2"))
            .await
            .unwrap();

        (TicketLifecycle::new(store.clone()), store)
    }

    async fn read_ticket(store: &MemoryStore, id: &str) -> Ticket {
        codec::read_record(store, id).await.unwrap().unwrap()
    }

    #[tokio::test]
    async fn test_sell_available_ticket() {
        let (lifecycle, store) = seeded_world().await;

        lifecycle
            .sell(&TicketId::new("T1"), &ParticipantId::new("alice"))
            .await
            .unwrap();

        let ticket = read_ticket(&store, "T1").await;
        assert_eq!(ticket.status, TicketStatus::Sold);
        assert_eq!(ticket.owner, "alice");
        assert!(ticket.owner_matches_status());
    }

    #[tokio::test]
    async fn test_second_sell_fails_and_owner_is_kept() {
        let (lifecycle, store) = seeded_world().await;
        let t1 = TicketId::new("T1");

        lifecycle.sell(&t1, &ParticipantId::new("alice")).await.unwrap();
        let err = lifecycle
            .sell(&t1, &ParticipantId::new("bob"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            LedgerError::InvalidState {
                status: TicketStatus::Sold,
                ..
            }
        ));
        assert_eq!(read_ticket(&store, "T1").await.owner, "alice");
    }

    #[tokio::test]
    async fn test_sell_missing_ticket_is_not_found() {
        let (lifecycle, _store) = seeded_world().await;
        let err = lifecycle
            .sell(&TicketId::new("T9"), &ParticipantId::new("alice"))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_resell_requires_sold() {
        let (lifecycle, store) = seeded_world().await;
        let t1 = TicketId::new("T1");

        // Available ticket cannot be resold.
        let err = lifecycle
            .resell(&t1, &ParticipantId::new("bob"))
            .await
            .unwrap_err();
        assert!(matches!(err, LedgerError::InvalidState { .. }));

        lifecycle.sell(&t1, &ParticipantId::new("alice")).await.unwrap();
        lifecycle.resell(&t1, &ParticipantId::new("bob")).await.unwrap();

        let ticket = read_ticket(&store, "T1").await;
        assert_eq!(ticket.status, TicketStatus::Resold);
        assert_eq!(ticket.owner, "bob");

        // A resold ticket cannot be resold again.
        let err = lifecycle
            .resell(&t1, &ParticipantId::new("carol"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            LedgerError::InvalidState {
                status: TicketStatus::Resold,
                ..
            }
        ));
        assert_eq!(read_ticket(&store, "T1").await.owner, "bob");
    }

    #[tokio::test]
    async fn test_redeem_sold_and_resold_tickets() {
        let (lifecycle, store) = seeded_world().await;
        let e1 = EventId::new("E1");

        // Sold ticket redeems directly.
        lifecycle
            .sell(&TicketId::new("T1"), &ParticipantId::new("alice"))
            .await
            .unwrap();
        lifecycle.redeem(&TicketId::new("T1"), &e1).await.unwrap();
        let ticket = read_ticket(&store, "T1").await;
        assert_eq!(ticket.status, TicketStatus::Used);
        assert_eq!(ticket.owner, "alice");

        // Resold ticket redeems too, owner unchanged by redemption.
        lifecycle
            .sell(&TicketId::new("T2"), &ParticipantId::new("alice"))
            .await
            .unwrap();
        lifecycle
            .resell(&TicketId::new("T2"), &ParticipantId::new("bob"))
            .await
            .unwrap();
        lifecycle.redeem(&TicketId::new("T2"), &e1).await.unwrap();
        let ticket = read_ticket(&store, "T2").await;
        assert_eq!(ticket.status, TicketStatus::Used);
        assert_eq!(ticket.owner, "bob");
    }

    #[tokio::test]
    async fn test_redeem_available_ticket_fails_before_event_is_read() {
        let (lifecycle, _store) = seeded_world().await;

        // Wrong status fails InvalidState even against a nonexistent event.
        let err = lifecycle
            .redeem(&TicketId::new("T1"), &EventId::new("E9"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            LedgerError::InvalidState {
                status: TicketStatus::Available,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_redeem_against_wrong_event_is_membership_error() {
        let (lifecycle, store) = seeded_world().await;

        // Second event that does not list T1.
        let events = EventRegistry::new(store.clone());
        events
            .create_event(
                EventId::new("E2"),
                "Other".into(),
                ParticipantId::new("host-1"),
                "2026-10-01".into(),
                "Paris".into(),
            )
            .await
            .unwrap();

        lifecycle
            .sell(&TicketId::new("T1"), &ParticipantId::new("alice"))
            .await
            .unwrap();
        let err = lifecycle
            .redeem(&TicketId::new("T1"), &EventId::new("E2"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            LedgerError::Membership { ref ticket, ref event } if ticket == "T1" && event == "E2"
        ));
        // Ticket untouched by the failed redemption.
        assert_eq!(read_ticket(&store, "T1").await.status, TicketStatus::Sold);
    }

    #[tokio::test]
    async fn test_used_ticket_is_terminal() {
        let (lifecycle, store) = seeded_world().await;
        let t1 = TicketId::new("T1");
        let e1 = EventId::new("E1");

        lifecycle.sell(&t1, &ParticipantId::new("alice")).await.unwrap();
        lifecycle.redeem(&t1, &e1).await.unwrap();

        assert!(lifecycle.sell(&t1, &ParticipantId::new("bob")).await.is_err());
        assert!(lifecycle.resell(&t1, &ParticipantId::new("bob")).await.is_err());
        assert!(lifecycle.redeem(&t1, &e1).await.is_err());

        let ticket = read_ticket(&store, "T1").await;
        assert_eq!(ticket.status, TicketStatus::Used);
        assert_eq!(ticket.owner, "alice");
    }

    #[tokio::test]
    async fn test_list_available_filters_by_status_in_membership_order() {
        let (lifecycle, _store) = seeded_world().await;
        let e1 = EventId::new("E1");

        assert_eq!(
            lifecycle.list_available(&e1).await.unwrap(),
            vec![TicketId::new("T1"), TicketId::new("T2")]
        );

        lifecycle
            .sell(&TicketId::new("T2"), &ParticipantId::new("alice"))
            .await
            .unwrap();
        assert_eq!(
            lifecycle.list_available(&e1).await.unwrap(),
            vec![TicketId::new("T1")]
        );
    }

    #[tokio::test]
    async fn test_list_available_missing_event_is_not_found() {
        let (lifecycle, _store) = seeded_world().await;
        let err = lifecycle
            .list_available(&EventId::new("E9"))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_list_available_unreadable_member_is_a_fault() {
        let (lifecycle, store) = seeded_world().await;

        // Corrupt the membership list: an entry with no backing record.
        let mut event: Event = codec::read_record(&store, "E1").await.unwrap().unwrap();
        event.tickets.push(TicketId::new("T-ghost"));
        codec::write_record(&store, "E1", &event).await.unwrap();

        let err = lifecycle
            .list_available(&EventId::new("E1"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            LedgerError::NotFound { ref key } if key == "T-ghost"
        ));
    }
}
