//! Employee domain model.
//!
//! # Responsibility
//! - Define the canonical roster record persisted in `employees`.
//! - Provide the non-empty submission checks entry forms rely on.
//!
//! # Invariants
//! - `id` is immutable once the store has assigned it.
//! - `UNASSIGNED_ID` marks a record that has not been persisted yet.
//! - `name` and `email` must be non-empty at the point of submission.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Stable row identifier for persisted employees.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type EmployeeId = i64;

/// Sentinel key of a record that has not been persisted yet.
///
/// Insert paths treat this value as "let the store assign the next key".
pub const UNASSIGNED_ID: EmployeeId = 0;

/// Submission validation failures for user-entered employee fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmployeeValidationError {
    EmptyName,
    EmptyEmail,
}

impl Display for EmployeeValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "employee name cannot be blank"),
            Self::EmptyEmail => write!(f, "employee email cannot be blank"),
        }
    }
}

impl Error for EmployeeValidationError {}

/// One roster entry as persisted in the `employees` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Primary key. `UNASSIGNED_ID` until the store assigns one.
    #[serde(default)]
    pub id: EmployeeId,
    /// Display name. Must be non-empty on submission.
    pub name: String,
    /// Contact address. Must be non-empty on submission.
    pub email: String,
}

impl Employee {
    /// Creates a not-yet-persisted employee with an unassigned id.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self::with_id(UNASSIGNED_ID, name, email)
    }

    /// Creates an employee with a caller-provided id.
    ///
    /// Used by update and delete submissions where identity already exists.
    pub fn with_id(id: EmployeeId, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
        }
    }

    /// Returns whether this record has been assigned a persistent id.
    pub fn is_persisted(&self) -> bool {
        self.id != UNASSIGNED_ID
    }

    /// Checks the non-empty submission contract for `name` and `email`.
    pub fn validate(&self) -> Result<(), EmployeeValidationError> {
        if self.name.is_empty() {
            return Err(EmployeeValidationError::EmptyName);
        }
        if self.email.is_empty() {
            return Err(EmployeeValidationError::EmptyEmail);
        }
        Ok(())
    }
}
