//! Secondary indexes for Licensus.
//!
//! The ledger offers only key/value access and prefix iteration, so every
//! "list licenses in status X" query is answered from a deliberately shaped
//! key space: one marker entry per member, keyed by
//! `(index name, partition parts..., entity id)`. The marker value is a single
//! sentinel byte; an index stores membership, never the attributes being
//! queried. Callers resolve each hit with a second lookup of the primary
//! record.
//!
//! # Key Types
//!
//! - [`IndexName`] -- The seven named indexes and their ledger object types
//! - [`IndexManager`] -- Add, remove, probe, and scan index entries
//! - [`PartitionScan`] -- Lazy iterator of entity IDs in one partition

pub mod error;
pub mod index;
pub mod name;

pub use error::{IndexError, IndexResult};
pub use index::{IndexManager, PartitionScan, CURRENT, SENTINEL};
pub use name::IndexName;
