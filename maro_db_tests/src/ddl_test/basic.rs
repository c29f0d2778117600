use super::*;
use maro_db_core::{DdlError, ErrorKind, IdentifierCase};

#[test]
fn test_create_table() {
    let db = test_db();
    assert_eq!(db.create_table(users()).unwrap(), "users");
    assert_eq!(db.table_count(), 1);
    assert_eq!(db.table("users").unwrap(), users());
}

#[test]
fn test_create_twice_fails_and_keeps_one_definition() {
    let db = test_db();
    db.create_table(users()).unwrap();

    let other = TableDefinition::new("users").column("email", DataType::Text);
    let err = db.create_table(other).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TableAlreadyExists);
    assert_eq!(err.to_string(), "table with the same name already exists");
    assert_eq!(db.table_count(), 1);
    assert_eq!(db.table("users").unwrap(), users());
}

#[test]
fn test_create_many_names_twice() {
    let db = test_db();
    for name in ["a", "b", "c", "d"] {
        db.create_table(TableDefinition::new(name).column("id", DataType::Int))
            .unwrap();
    }
    for name in ["a", "b", "c", "d"] {
        let err = db
            .create_table(TableDefinition::new(name).column("id", DataType::Int))
            .unwrap_err();
        assert_eq!(err, DdlError::TableAlreadyExists { table: name.to_string() });
    }
    assert_eq!(db.table_names(), vec!["a", "b", "c", "d"]);
}

#[test]
fn test_failed_create_does_not_mutate_catalog() {
    let db = test_db();
    db.create_table(users()).unwrap();
    db.create_table(composite()).unwrap();
    let before = db.with_catalog(|c| c.clone());

    let failures = vec![
        users(),
        child_of("missing", &["id"]),
        child_of("users", &["name"]),
        child_of("composite", &["a"]),
        TableDefinition::new("broken")
            .column("a", DataType::Int)
            .column("a", DataType::Int),
    ];
    for def in failures {
        assert!(db.create_table(def).is_err());
    }

    db.with_catalog(|after| {
        assert_eq!(after.len(), before.len());
        for name in before.table_names() {
            assert_eq!(after.get(&name).unwrap(), before.get(&name).unwrap());
        }
    });
}

#[test]
fn test_malformed_definition_is_internal_error() {
    let db = test_db();
    let err = db
        .create_table(
            TableDefinition::new("t")
                .column("id", DataType::Int)
                .primary_key(["missing"]),
        )
        .unwrap_err();
    assert!(err.is_internal());
    assert_eq!(err.kind(), ErrorKind::Malformed);
    assert_eq!(db.table_count(), 0);
}

#[test]
fn test_names_are_case_sensitive_by_default() {
    let db = test_db();
    db.create_table(users()).unwrap();
    let upper = TableDefinition::new("USERS").column("id", DataType::Int);
    db.create_table(upper).unwrap();
    assert_eq!(db.table_names(), vec!["USERS", "users"]);
}

#[test]
fn test_case_insensitive_config_folds_identifiers() {
    let db = Database::in_memory(DdlConfig {
        identifier_case: IdentifierCase::Insensitive,
        ..DdlConfig::default()
    });
    db.create_table(
        TableDefinition::new("Users")
            .column("ID", DataType::Int)
            .primary_key(["Id"]),
    )
    .unwrap();

    let err = db
        .create_table(TableDefinition::new("USERS").column("id", DataType::Int))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TableAlreadyExists);

    let orders = TableDefinition::new("Orders")
        .column("User_Id", DataType::Int)
        .foreign_key(ForeignKey::new(["user_id"], "USERS", ["iD"]));
    assert_eq!(db.create_table(orders).unwrap(), "orders");

    let stored = db.table("ORDERS").unwrap();
    assert_eq!(stored.foreign_keys[0], ForeignKey::new(["user_id"], "users", ["id"]));
}

#[test]
fn test_errors_propagate_through_anyhow() -> anyhow::Result<()> {
    let db = test_db();
    db.create_table(users())?;
    let err = db.create_table(users()).map_err(anyhow::Error::from).unwrap_err();
    assert_eq!(
        err.downcast_ref::<DdlError>().map(DdlError::kind),
        Some(ErrorKind::TableAlreadyExists)
    );
    Ok(())
}
