//! Dependency-injected employee store handle.
//!
//! # Responsibility
//! - Own the shared SQLite connection and the watcher registry.
//! - Enforce the non-empty submission contract before any mutation.
//! - Re-emit fresh snapshots to live subscriptions after each change.
//!
//! # Invariants
//! - Mutations and their watcher notifications are ordered under one
//!   connection lock; every subscription observes changes in applied order.
//! - A missing id on update/delete is a non-fatal no-op reported as `false`.

use crate::db::{self, DbError};
use crate::model::employee::{Employee, EmployeeId, EmployeeValidationError};
use crate::repo::employee_repo::{EmployeeRepository, RepoError, SqliteEmployeeRepository};
use crate::store::watch::{Subscription, WatchGuard, WatchRegistry, WatchSender};
use log::{error, info, warn};
use parking_lot::Mutex;
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;
use std::sync::mpsc;
use std::sync::Arc;

pub type StoreResult<T> = Result<T, StoreError>;

/// Submission-layer error taxonomy for store operations.
#[derive(Debug)]
pub enum StoreError {
    Validation(EmployeeValidationError),
    Repo(RepoError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<EmployeeValidationError> for StoreError {
    fn from(value: EmployeeValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for StoreError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Repo(RepoError::Db(value))
    }
}

/// Shared handle over the employees table with live query feeds.
///
/// Construct one store at process start and pass clones to every consumer;
/// clones share a single connection and watcher registry.
#[derive(Clone)]
pub struct EmployeeStore {
    conn: Arc<Mutex<Connection>>,
    watchers: Arc<Mutex<WatchRegistry>>,
}

impl EmployeeStore {
    /// Opens (or creates) the backing database file and migrates it.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        Ok(Self::from_connection(db::open_db(path)?))
    }

    /// Opens a private in-memory store, mainly for tests and smoke probes.
    pub fn open_in_memory() -> StoreResult<Self> {
        Ok(Self::from_connection(db::open_db_in_memory()?))
    }

    /// Wraps an already-bootstrapped connection.
    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
            watchers: Arc::new(Mutex::new(WatchRegistry::default())),
        }
    }

    /// Inserts a new employee and returns its assigned id.
    ///
    /// # Contract
    /// - `name` and `email` must be non-empty; violations are rejected
    ///   before any storage call.
    /// - An unassigned id lets the store pick the next key; explicit ids
    ///   are persisted as given.
    pub fn insert(&self, employee: &Employee) -> StoreResult<EmployeeId> {
        employee.validate()?;

        let conn = self.conn.lock();
        let id = SqliteEmployeeRepository::new(&conn).insert_employee(employee)?;
        info!("event=employee_insert module=store status=ok id={id}");
        self.notify_watchers(&conn);
        Ok(id)
    }

    /// Replaces all fields of the row keyed by `employee.id`.
    ///
    /// Returns `Ok(false)` without touching subscriptions when the id does
    /// not exist.
    pub fn update(&self, employee: &Employee) -> StoreResult<bool> {
        employee.validate()?;

        let conn = self.conn.lock();
        let applied = SqliteEmployeeRepository::new(&conn).update_employee(employee)?;
        if applied {
            info!(
                "event=employee_update module=store status=ok id={}",
                employee.id
            );
            self.notify_watchers(&conn);
        } else {
            warn!(
                "event=employee_update module=store status=noop id={}",
                employee.id
            );
        }
        Ok(applied)
    }

    /// Deletes the row keyed by `id`; other record fields are irrelevant.
    ///
    /// Returns `Ok(false)` without touching subscriptions when the id does
    /// not exist.
    pub fn delete(&self, id: EmployeeId) -> StoreResult<bool> {
        let conn = self.conn.lock();
        let applied = SqliteEmployeeRepository::new(&conn).delete_employee(id)?;
        if applied {
            info!("event=employee_delete module=store status=ok id={id}");
            self.notify_watchers(&conn);
        } else {
            warn!("event=employee_delete module=store status=noop id={id}");
        }
        Ok(applied)
    }

    /// One-shot read of a single row.
    pub fn get(&self, id: EmployeeId) -> StoreResult<Option<Employee>> {
        let conn = self.conn.lock();
        Ok(SqliteEmployeeRepository::new(&conn).get_employee(id)?)
    }

    /// One-shot read of the full roster in insertion order.
    pub fn snapshot(&self) -> StoreResult<Vec<Employee>> {
        let conn = self.conn.lock();
        Ok(SqliteEmployeeRepository::new(&conn).list_employees()?)
    }

    /// Subscribes to the full roster.
    ///
    /// The current snapshot is queued immediately; every successful mutation
    /// afterwards queues a fresh one.
    pub fn watch_all(&self) -> StoreResult<Subscription<Vec<Employee>>> {
        let conn = self.conn.lock();
        let roster = SqliteEmployeeRepository::new(&conn).list_employees()?;

        let (tx, rx) = mpsc::channel();
        // The receiver is still local, so this send cannot fail.
        let _ = tx.send(roster);
        let id = self.watchers.lock().register(WatchSender::All(tx));
        info!("event=watch_subscribe module=store kind=all watch_id={id}");

        Ok(Subscription::new(
            rx,
            WatchGuard::new(id, Arc::clone(&self.watchers)),
        ))
    }

    /// Subscribes to the single row keyed by `id`.
    ///
    /// Emits `None` whenever the row is absent, including after deletion.
    pub fn watch_by_id(&self, id: EmployeeId) -> StoreResult<Subscription<Option<Employee>>> {
        let conn = self.conn.lock();
        let row = SqliteEmployeeRepository::new(&conn).get_employee(id)?;

        let (tx, rx) = mpsc::channel();
        let _ = tx.send(row);
        let watch_id = self.watchers.lock().register(WatchSender::ById(id, tx));
        info!("event=watch_subscribe module=store kind=by_id id={id} watch_id={watch_id}");

        Ok(Subscription::new(
            rx,
            WatchGuard::new(watch_id, Arc::clone(&self.watchers)),
        ))
    }

    /// Re-queries the table and publishes to every live watcher.
    ///
    /// Called with the connection lock held so emissions keep mutation
    /// order. A failed re-query only skips this emission; the mutation
    /// itself has already been applied.
    fn notify_watchers(&self, conn: &Connection) {
        let mut registry = self.watchers.lock();
        if registry.is_empty() {
            return;
        }

        match SqliteEmployeeRepository::new(conn).list_employees() {
            Ok(roster) => registry.publish(&roster),
            Err(err) => {
                error!("event=watch_notify module=store status=error error={err}");
            }
        }
    }
}
