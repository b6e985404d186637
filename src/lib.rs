//! # Order Console
//!
//! A role-gated inventory and order console. The pieces a front end needs to
//! run the inventory screens live here, minus the screens themselves.
//!
//! ## Core Concepts
//!
//! ### One owner for the draft
//! The in-progress order (the "cart") is a [`Draft`](draft::Draft) owned by a
//! single [`StateActor`](console_framework::StateActor). Every mutation is a
//! message; the actor applies it, persists the result, then replies. Readers
//! receive a copy and can never mutate the draft behind the actor's back.
//!
//! ### Late binding
//! The draft's storage is handed to the actor at `run()` time, not at
//! construction. Tests give it a [`MemoryStore`](storage::MemoryStore), the CLI
//! a [`FileStore`](storage::FileStore).
//!
//! ### Capabilities, not checks
//! The session credential decodes to a [`Role`](capability::Role); the role
//! maps to [`Capabilities`](capability::Capabilities): which sections open and
//! which row actions each table offers. Unknown or undecodable credentials get
//! nothing.
//!
//! ## Module Tour
//!
//! - [`model`]: records, product ids, quantities and line items.
//! - [`storage`]: the key/value persistence shared by the draft and the session.
//! - [`draft`] and [`clients`]: the draft state, its actor wiring, and the
//!   typed [`DraftClient`](clients::DraftClient).
//! - [`checkout`]: turns the draft into an order request and applies the result.
//! - [`table`]: filtering, sorting and rendering of record lists with row actions.
//! - [`capability`] and [`session`]: who is logged in and what they may do.
//! - [`catalog`] and [`tracking`]: product maintenance and reservation lookup.
//! - [`backend`]: the REST collaborator, mocked in tests.
//! - [`notify`]: transient success and error messages.
//! - [`lifecycle`]: [`ConsoleSystem`](lifecycle::ConsoleSystem), which wires
//!   everything together and shuts it down.
//!
//! ## Running
//!
//! ```bash
//! RUST_LOG=info order-console login --username ana
//! order-console cart add 7 --quantity 2
//! order-console checkout --field client_dni=12345678
//! ```

pub mod backend;
pub mod capability;
pub mod catalog;
pub mod checkout;
pub mod clients;
pub mod config;
pub mod draft;
pub mod lifecycle;
pub mod messages;
pub mod model;
pub mod notify;
pub mod session;
pub mod storage;
pub mod table;
pub mod tracking;
