//! License lifecycle, violation reports, and history for Licensus.
//!
//! Each service is built per invocation around the invocation's
//! [`LedgerStub`](lcs_ledger::LedgerStub) and holds no state of its own.
//!
//! - [`LicenseEngine`] -- create, examine, promote, revoke, delete, and list
//!   licenses
//! - [`ReportEngine`] -- file violation reports and deduct penalty points
//! - [`HistoryService`] -- per-key version history from the ledger

pub mod error;
pub mod history;
pub mod lifecycle;
pub mod report;

pub use error::{EngineError, EngineResult};
pub use history::{HistoryEntry, HistoryService};
pub use lifecycle::{LicenseEngine, DEMO_LICENSES};
pub use report::ReportEngine;
