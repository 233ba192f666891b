//! Domain model for the employee roster.
//!
//! # Responsibility
//! - Define the canonical record shape shared by store and presentation
//!   consumers.
//!
//! # Invariants
//! - Every persisted record is identified by a stable integer `EmployeeId`.
//! - Deletion is a hard row delete; there is no tombstone state.

pub mod employee;
