//! Access control gate for Licensus.
//!
//! Every operation passes through the gate before it touches the ledger.
//! The gate reads the caller's authenticated `role` attribute and checks it
//! against the allow-list configured for the operation. A rejected caller
//! causes the whole invocation to fail before any write is issued.
//!
//! # Key Types
//!
//! - [`AccessGate`] -- Per-operation authorization against a [`GateConfig`]
//! - [`AccessRule`] -- `Open`, or an explicit set of permitted [`Role`]s
//! - [`GateError`] -- Attribute unavailable, missing, or forbidden
//!
//! [`Role`]: lcs_types::Role

pub mod config;
pub mod error;
pub mod gate;

pub use config::{AccessRule, GateConfig};
pub use error::GateError;
pub use gate::{authorize, AccessGate, ROLE_ATTRIBUTE};
