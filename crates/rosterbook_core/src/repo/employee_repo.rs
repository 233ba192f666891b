//! Employee repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over the canonical `employees` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Field validation is the submission layer's job; the repository persists
//!   whatever shape it is handed.
//! - A persisted row never carries the unassigned sentinel key.

use crate::db::DbError;
use crate::model::employee::{Employee, EmployeeId, UNASSIGNED_ID};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const EMPLOYEE_SELECT_SQL: &str = "SELECT id, name, email FROM employees";

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for employee persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted employee data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for employee CRUD operations.
pub trait EmployeeRepository {
    fn insert_employee(&self, employee: &Employee) -> RepoResult<EmployeeId>;
    fn update_employee(&self, employee: &Employee) -> RepoResult<bool>;
    fn delete_employee(&self, id: EmployeeId) -> RepoResult<bool>;
    fn get_employee(&self, id: EmployeeId) -> RepoResult<Option<Employee>>;
    fn list_employees(&self) -> RepoResult<Vec<Employee>>;
}

/// SQLite-backed employee repository.
pub struct SqliteEmployeeRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEmployeeRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl EmployeeRepository for SqliteEmployeeRepository<'_> {
    /// Inserts a new row and returns its key.
    ///
    /// `UNASSIGNED_ID` lets SQLite pick the next rowid; explicit keys are
    /// bound as given and collide through the primary key constraint only.
    fn insert_employee(&self, employee: &Employee) -> RepoResult<EmployeeId> {
        if employee.id == UNASSIGNED_ID {
            self.conn.execute(
                "INSERT INTO employees (name, email) VALUES (?1, ?2);",
                params![employee.name.as_str(), employee.email.as_str()],
            )?;
            return Ok(self.conn.last_insert_rowid());
        }

        self.conn.execute(
            "INSERT INTO employees (id, name, email) VALUES (?1, ?2, ?3);",
            params![
                employee.id,
                employee.name.as_str(),
                employee.email.as_str()
            ],
        )?;
        Ok(employee.id)
    }

    /// Replaces all fields of the row keyed by `employee.id`.
    ///
    /// Returns `false` when no row matched.
    fn update_employee(&self, employee: &Employee) -> RepoResult<bool> {
        let changed = self.conn.execute(
            "UPDATE employees
             SET
                name = ?1,
                email = ?2
             WHERE id = ?3;",
            params![
                employee.name.as_str(),
                employee.email.as_str(),
                employee.id
            ],
        )?;

        Ok(changed > 0)
    }

    /// Deletes the row keyed by `id`.
    ///
    /// Returns `false` when no row matched.
    fn delete_employee(&self, id: EmployeeId) -> RepoResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM employees WHERE id = ?1;", params![id])?;

        Ok(changed > 0)
    }

    fn get_employee(&self, id: EmployeeId) -> RepoResult<Option<Employee>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{EMPLOYEE_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query(params![id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_employee_row(row)?));
        }

        Ok(None)
    }

    fn list_employees(&self) -> RepoResult<Vec<Employee>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{EMPLOYEE_SELECT_SQL} ORDER BY id ASC;"))?;

        let mut rows = stmt.query([])?;
        let mut employees = Vec::new();
        while let Some(row) = rows.next()? {
            employees.push(parse_employee_row(row)?);
        }

        Ok(employees)
    }
}

fn parse_employee_row(row: &Row<'_>) -> RepoResult<Employee> {
    let id: EmployeeId = row.get("id")?;
    if id == UNASSIGNED_ID {
        return Err(RepoError::InvalidData(format!(
            "reserved key `{UNASSIGNED_ID}` in employees.id"
        )));
    }

    Ok(Employee {
        id,
        name: row.get("name")?,
        email: row.get("email")?,
    })
}
