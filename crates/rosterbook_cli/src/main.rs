//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `rosterbook_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use rosterbook_core::{Employee, EmployeeStore};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("rosterbook_core ping={}", rosterbook_core::ping());
    println!("rosterbook_core version={}", rosterbook_core::core_version());

    // Exercise the open -> subscribe -> insert path without touching disk.
    let store = EmployeeStore::open_in_memory()?;
    let feed = store.watch_all()?;
    let id = store.insert(&Employee::new("Ada Lovelace", "ada@example.com"))?;

    let initial = feed.recv().map(|roster| roster.len()).unwrap_or_default();
    let after_insert = feed.recv().map(|roster| roster.len()).unwrap_or_default();
    println!("rosterbook_core smoke id={id} rows_before={initial} rows_after={after_insert}");

    Ok(())
}
