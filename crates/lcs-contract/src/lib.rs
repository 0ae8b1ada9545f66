//! The Licensus contract.
//!
//! Maps operation names and string arguments onto the engines. Each
//! invocation passes the access gate, checks its argument count, runs one
//! engine call, and is answered with a [`Response`]: status 200 and a JSON
//! payload, or status 500 and the error message.
//!
//! [`Contract::execute`] works against any [`LedgerStub`](lcs_ledger::LedgerStub)
//! and leaves committing to the host ledger. [`Contract::invoke`] wraps it in
//! an [`InMemoryLedger`](lcs_ledger::InMemoryLedger) transaction that commits
//! only on success.

pub mod config;
pub mod contract;
pub mod error;
pub mod response;
pub mod router;

pub use config::ContractConfig;
pub use contract::Contract;
pub use error::{ContractError, ContractResult};
pub use response::Response;
