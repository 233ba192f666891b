use rosterbook_core::db::open_db_in_memory;
use rosterbook_core::{Employee, EmployeeRepository, RepoError, SqliteEmployeeRepository};

#[test]
fn insert_and_get_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEmployeeRepository::new(&conn);

    let id = repo
        .insert_employee(&Employee::new("Ada Lovelace", "ada@example.com"))
        .unwrap();

    let loaded = repo.get_employee(id).unwrap().unwrap();
    assert_eq!(loaded.id, id);
    assert_eq!(loaded.name, "Ada Lovelace");
    assert_eq!(loaded.email, "ada@example.com");
}

#[test]
fn insert_auto_assigns_sequential_ids_from_one() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEmployeeRepository::new(&conn);

    let first = repo
        .insert_employee(&Employee::new("Ada", "ada@example.com"))
        .unwrap();
    let second = repo
        .insert_employee(&Employee::new("Grace", "grace@example.com"))
        .unwrap();

    assert_eq!(first, 1);
    assert_eq!(second, 2);
}

#[test]
fn insert_honors_explicit_id() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEmployeeRepository::new(&conn);

    let id = repo
        .insert_employee(&Employee::with_id(41, "Ada", "ada@example.com"))
        .unwrap();
    assert_eq!(id, 41);

    // The next auto-assigned key continues past the explicit one.
    let next = repo
        .insert_employee(&Employee::new("Grace", "grace@example.com"))
        .unwrap();
    assert_eq!(next, 42);
}

#[test]
fn insert_duplicate_explicit_id_surfaces_db_error() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEmployeeRepository::new(&conn);

    repo.insert_employee(&Employee::with_id(7, "Ada", "ada@example.com"))
        .unwrap();

    let err = repo
        .insert_employee(&Employee::with_id(7, "Grace", "grace@example.com"))
        .unwrap_err();
    assert!(matches!(err, RepoError::Db(_)));
}

#[test]
fn update_existing_replaces_all_fields() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEmployeeRepository::new(&conn);

    let id = repo
        .insert_employee(&Employee::new("Alice", "alice@x.com"))
        .unwrap();

    let applied = repo
        .update_employee(&Employee::with_id(id, "Alicia", "alicia@x.com"))
        .unwrap();
    assert!(applied);

    let loaded = repo.get_employee(id).unwrap().unwrap();
    assert_eq!(loaded.name, "Alicia");
    assert_eq!(loaded.email, "alicia@x.com");
}

#[test]
fn update_missing_id_is_a_noop() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEmployeeRepository::new(&conn);

    let applied = repo
        .update_employee(&Employee::with_id(99, "Nobody", "nobody@x.com"))
        .unwrap();

    assert!(!applied);
    assert!(repo.list_employees().unwrap().is_empty());
}

#[test]
fn delete_removes_the_row() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEmployeeRepository::new(&conn);

    let id = repo
        .insert_employee(&Employee::new("Ada", "ada@example.com"))
        .unwrap();

    assert!(repo.delete_employee(id).unwrap());
    assert!(repo.get_employee(id).unwrap().is_none());
    assert!(repo.list_employees().unwrap().is_empty());
}

#[test]
fn delete_missing_id_is_a_noop() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEmployeeRepository::new(&conn);

    repo.insert_employee(&Employee::new("Ada", "ada@example.com"))
        .unwrap();

    assert!(!repo.delete_employee(99).unwrap());
    assert_eq!(repo.list_employees().unwrap().len(), 1);
}

#[test]
fn list_returns_rows_in_key_order() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEmployeeRepository::new(&conn);

    repo.insert_employee(&Employee::with_id(5, "Eve", "eve@example.com"))
        .unwrap();
    repo.insert_employee(&Employee::with_id(2, "Bob", "bob@example.com"))
        .unwrap();
    repo.insert_employee(&Employee::new("Zoe", "zoe@example.com"))
        .unwrap();

    let ids: Vec<_> = repo
        .list_employees()
        .unwrap()
        .into_iter()
        .map(|employee| employee.id)
        .collect();
    assert_eq!(ids, vec![2, 5, 6]);
}

#[test]
fn read_paths_reject_reserved_zero_key() {
    let conn = open_db_in_memory().unwrap();

    // SQLite accepts an explicit rowid of 0; core reserves it as the
    // unassigned sentinel and must refuse to surface such a row.
    conn.execute(
        "INSERT INTO employees (id, name, email) VALUES (0, 'Ghost', 'ghost@x.com');",
        [],
    )
    .unwrap();

    let repo = SqliteEmployeeRepository::new(&conn);

    let get_err = repo.get_employee(0).unwrap_err();
    assert!(matches!(get_err, RepoError::InvalidData(_)));

    let list_err = repo.list_employees().unwrap_err();
    assert!(matches!(list_err, RepoError::InvalidData(_)));
}
