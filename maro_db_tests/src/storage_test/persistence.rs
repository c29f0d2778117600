use super::*;
use maro_db_core::{ErrorKind, IdentifierCase, StoreError, StructuralViolation};

fn seeded_db(path: &std::path::Path) -> Database {
    let db = Database::open(path, DdlConfig::default()).unwrap();
    db.create_table(
        TableDefinition::new("users")
            .not_null_column("id", DataType::Int)
            .column("name", DataType::VarChar(64))
            .primary_key(["id"]),
    )
    .unwrap();
    db.create_table(
        TableDefinition::new("orders")
            .column("id", DataType::BigInt)
            .column("user_id", DataType::Int)
            .column(
                "total",
                DataType::Decimal {
                    precision: 10,
                    scale: 2,
                },
            )
            .primary_key(["id"])
            .foreign_key(ForeignKey::new(["user_id"], "users", ["id"])),
    )
    .unwrap();
    db
}

#[test]
fn catalog_save_load_roundtrip() {
    let path = temp_dir("roundtrip").join("catalog.json");
    let db = seeded_db(&path);
    db.save().unwrap();

    let reopened = Database::open(&path, DdlConfig::default()).unwrap();
    assert_eq!(reopened.table_names(), vec!["orders", "users"]);
    assert_eq!(reopened.table("orders"), db.table("orders"));
    assert_eq!(reopened.table("users"), db.table("users"));
}

#[test]
fn reopened_catalog_still_validates() {
    let path = temp_dir("revalidate").join("catalog.json");
    seeded_db(&path).save().unwrap();

    let db = Database::open(&path, DdlConfig::default()).unwrap();
    let err = db
        .create_table(TableDefinition::new("users").column("id", DataType::Int))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TableAlreadyExists);

    let err = db
        .create_table(
            TableDefinition::new("payments")
                .column("order_user", DataType::Int)
                .foreign_key(ForeignKey::new(["order_user"], "orders", ["user_id"])),
        )
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ReferenceNonPrimaryKey);
}

#[test]
fn catalog_file_stores_type_names() {
    let path = temp_dir("format").join("catalog.json");
    seeded_db(&path).save().unwrap();

    let raw = std::fs::read_to_string(&path).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let tables = json["tables"].as_array().unwrap();
    assert_eq!(tables[0]["name"], "orders");
    assert_eq!(tables[0]["columns"][2]["dtype"], "decimal(10,2)");
    assert_eq!(tables[1]["columns"][1]["dtype"], "varchar(64)");
    assert_eq!(tables[1]["primary_key"], serde_json::json!(["id"]));
}

#[test]
fn catalog_load_missing_file_is_empty() {
    let path = temp_dir("missing").join("missing_catalog.json");
    let loaded = Catalog::load_from_path(&path).unwrap();
    assert!(loaded.is_empty());
}

#[test]
fn catalog_load_blank_file_is_empty() {
    let path = temp_dir("blank").join("catalog.json");
    std::fs::write(&path, "   \n").unwrap();
    assert!(Catalog::load_from_path(&path).unwrap().is_empty());
}

#[test]
fn catalog_load_rejects_malformed_json() {
    let path = temp_dir("malformed").join("catalog.json");
    std::fs::write(&path, "{ not json").unwrap();
    assert!(matches!(
        Catalog::load_from_path(&path),
        Err(StoreError::Json(_))
    ));
}

#[test]
fn catalog_load_rejects_unknown_type() {
    let path = temp_dir("badtype").join("catalog.json");
    std::fs::write(
        &path,
        r#"{"tables":[{"name":"t","columns":[{"name":"a","dtype":"float"}]}]}"#,
    )
    .unwrap();
    assert!(matches!(
        Catalog::load_from_path(&path),
        Err(StoreError::Json(_))
    ));
}

#[test]
fn catalog_load_rejects_duplicate_tables() {
    let path = temp_dir("dup").join("catalog.json");
    std::fs::write(
        &path,
        r#"{"tables":[
            {"name":"t","columns":[{"name":"a","dtype":"int"}]},
            {"name":"t","columns":[{"name":"b","dtype":"text","nullable":false}]}
        ]}"#,
    )
    .unwrap();
    match Catalog::load_from_path(&path) {
        Err(StoreError::DuplicateTable(name)) => assert_eq!(name, "t"),
        other => panic!("expected duplicate table error, got {other:?}"),
    }
}

#[test]
fn catalog_load_rejects_malformed_definition() {
    let path = temp_dir("badpk").join("catalog.json");
    std::fs::write(
        &path,
        r#"{"tables":[{"name":"t","columns":[{"name":"a","dtype":"int"}],"primary_key":["b"]}]}"#,
    )
    .unwrap();
    match Catalog::load_from_path(&path) {
        Err(StoreError::Malformed { table, violation }) => {
            assert_eq!(table, "t");
            assert_eq!(
                violation,
                StructuralViolation::UnknownPrimaryKeyColumn("b".to_string())
            );
        }
        other => panic!("expected malformed definition error, got {other:?}"),
    }
}

#[test]
fn case_insensitive_reopen_folds_stored_names() {
    let path = temp_dir("fold").join("catalog.json");
    let db = Database::open(&path, DdlConfig::default()).unwrap();
    db.create_table(
        TableDefinition::new("Users")
            .column("Id", DataType::Int)
            .primary_key(["Id"]),
    )
    .unwrap();
    db.save().unwrap();

    let config = DdlConfig {
        identifier_case: IdentifierCase::Insensitive,
        ..DdlConfig::default()
    };
    let db = Database::open(&path, config).unwrap();
    assert_eq!(db.table_names(), vec!["users"]);

    let err = db
        .create_table(TableDefinition::new("USERS").column("id", DataType::Int))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TableAlreadyExists);
    assert_eq!(db.table_count(), 1);

    db.create_table(
        TableDefinition::new("Orders")
            .column("user_id", DataType::Int)
            .foreign_key(ForeignKey::new(["user_id"], "Users", ["id"])),
    )
    .unwrap();
    assert_eq!(db.with_catalog(|c| c.referencing("users")), vec!["orders"]);
}

#[test]
fn case_insensitive_reopen_rejects_colliding_names() {
    let path = temp_dir("collide").join("catalog.json");
    let db = Database::open(&path, DdlConfig::default()).unwrap();
    db.create_table(TableDefinition::new("Users").column("id", DataType::Int))
        .unwrap();
    db.create_table(TableDefinition::new("users").column("id", DataType::Int))
        .unwrap();
    db.save().unwrap();

    let config = DdlConfig {
        identifier_case: IdentifierCase::Insensitive,
        ..DdlConfig::default()
    };
    match Database::open(&path, config) {
        Err(StoreError::DuplicateTable(name)) => assert_eq!(name, "users"),
        other => panic!("expected duplicate table error, got {other:?}"),
    }
}

#[test]
fn in_memory_save_is_noop() {
    let db = Database::in_memory(DdlConfig::default());
    assert!(db.path().is_none());
    db.save().unwrap();
}
