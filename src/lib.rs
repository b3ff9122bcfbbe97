//! # Ticket Ledger
//!
//! Ticket issuance, sale, resale, and redemption for ticketed events, built
//! atop a transactional key-value world state provided by a host ledger
//! runtime.
//!
//! ## Architecture
//!
//! The crate is a library the host embeds. Each public operation is invoked
//! as a single atomic unit of work: it reads the records it needs through the
//! injected [`StateStore`], validates the requested transition, and writes
//! the full updated record back. The crate performs no locking, retries, or
//! I/O of its own beyond the store seam; atomicity and commit ordering are
//! the host's transaction envelope.
//!
//! ```text
//! host transaction → TicketContract operation → get / validate / put
//! ```
//!
//! ## Ticket lifecycle
//!
//! ```text
//! Available → Sold → (Resold)* → Used
//! ```
//!
//! Transitions are one-way. `Used` is terminal: once a ticket is redeemed no
//! operation's precondition matches it again.
//!
//! ## Example
//!
//! ```rust
//! use ticket_ledger::{
//!     EventId, MemoryStore, ParticipantId, ParticipantType, TicketContract, TicketId,
//! };
//!
//! # async fn example() -> ticket_ledger::Result<()> {
//! let contract = TicketContract::new(MemoryStore::new());
//!
//! contract
//!     .register_participant(ParticipantId::new("alice"), "Alice".into(), ParticipantType::Member)
//!     .await?;
//! contract
//!     .create_event(
//!         EventId::new("E1"),
//!         "Rust Nation".into(),
//!         ParticipantId::new("host-1"),
//!         "2026-09-01".into(),
//!         "London".into(),
//!     )
//!     .await?;
//! contract.add_ticket_to_event(&EventId::new("E1"), &TicketId::new("T1")).await?;
//! contract.sell_ticket(&TicketId::new("T1"), &ParticipantId::new("alice")).await?;
//! contract.use_ticket(&TicketId::new("T1"), &EventId::new("E1")).await?;
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]

// Public modules
pub mod codec;
pub mod contract;
pub mod error;
pub mod lifecycle;
pub mod registry;
pub mod state;
pub mod store;

// Re-export main types for convenience
pub use contract::TicketContract;
pub use error::{LedgerError, Result};
pub use lifecycle::TicketLifecycle;
pub use registry::{EventRegistry, ParticipantRegistry};
pub use state::{
    Event, EventId, Participant, ParticipantId, ParticipantType, Ticket, TicketId, TicketStatus,
};
pub use store::{MemoryStore, StateStore};
