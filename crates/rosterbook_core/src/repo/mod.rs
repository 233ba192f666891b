//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the record store contract for the employee roster.
//! - Isolate SQLite query details from store orchestration.
//!
//! # Invariants
//! - Repository APIs report missing ids on update/delete as `false`, never
//!   as errors.
//! - Read paths reject invalid persisted state instead of masking it.

pub mod employee_repo;
