//! Store handle and live query subscription layer.
//!
//! # Responsibility
//! - Orchestrate repository calls into submission-level APIs.
//! - Push fresh query results to registered watchers after each mutation.
//!
//! # Invariants
//! - The store handle is constructed once at startup and passed explicitly
//!   to consumers; there is no process-wide singleton.
//! - Watchers observe mutations in the order the store applied them.

pub mod employee_store;
pub mod watch;
