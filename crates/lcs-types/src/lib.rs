//! Foundation types for Licensus.
//!
//! This crate provides the domain records and vocabulary shared by every
//! other Licensus crate.
//!
//! # Key Types
//!
//! - [`License`] -- A driving license record with exam results and a point balance
//! - [`LicenseStatus`] -- Lifecycle status (`Learner`, `Waiting`, `Active`, `Stalled`)
//! - [`ExamResult`] / [`ExamSlot`] -- Outcome of one of the three exams
//! - [`ViolationReport`] -- Immutable traffic-rule violation report
//! - [`Role`] -- Authenticated caller role
//! - [`Operation`] -- Named operation exposed by the contract

pub mod error;
pub mod license;
pub mod operation;
pub mod report;
pub mod role;

pub use error::TypeError;
pub use license::{ExamResult, ExamSlot, License, LicenseStatus, INITIAL_POINTS};
pub use operation::Operation;
pub use report::ViolationReport;
pub use role::Role;
