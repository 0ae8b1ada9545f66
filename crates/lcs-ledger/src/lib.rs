//! Ledger access facade for Licensus.
//!
//! The licensing core never talks to a storage engine directly. It sees the
//! ledger through the [`LedgerStub`] trait: get/put/delete by key, prefix
//! iteration over composite keys, per-key change history, and the caller's
//! authenticated attributes. This crate provides:
//!
//! - The [`LedgerStub`] trait boundary and its iterator/record types
//! - Composite key construction and splitting ([`composite`])
//! - [`InMemoryLedger`], an all-or-nothing transactional backend for tests,
//!   local tooling, and embedding
//!
//! # Transaction Semantics
//!
//! A [`Transaction`] reads committed state only; its writes are buffered and
//! become visible to other transactions atomically on [`Transaction::commit`].
//! Dropping a transaction without committing discards every write.

pub mod composite;
pub mod error;
pub mod identity;
pub mod memory;
pub mod traits;

pub use composite::{create_composite_key, split_composite_key, COMPOSITE_NAMESPACE};
pub use error::{LedgerError, LedgerResult};
pub use identity::CallerIdentity;
pub use memory::{CommitReceipt, InMemoryLedger, LedgerSnapshot, Transaction};
pub use traits::{HistoryIterator, KeyModification, LedgerStub, StateEntry, StateIterator};
