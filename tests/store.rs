use inventory_tracker::{apply_schema, connect, AppError, CrudService, Item, ItemFields, ITEM_TABLE};
use sqlx::SqlitePool;
use tempfile::TempDir;

async fn test_pool() -> (TempDir, SqlitePool) {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let url = format!("sqlite://{}", dir.path().join("inventory.db").display());
    let pool = connect(&url, 2).await.expect("failed to open database");
    apply_schema(&pool, &ITEM_TABLE).await.expect("failed to apply schema");
    (dir, pool)
}

fn fields(name: &str, quantity: i64, price: f64, description: &str) -> ItemFields {
    ItemFields {
        name: name.into(),
        quantity,
        price,
        description: Some(description.into()),
    }
}

#[tokio::test]
async fn create_then_get_and_list() {
    let (_dir, pool) = test_pool().await;
    let f = fields("Widget", 10, 2.5, "basic widget");
    let created: Item = CrudService::create(&pool, &f).await.unwrap();
    assert_eq!(created.fields(), f);

    let fetched: Item = CrudService::get(&pool, created.id).await.unwrap();
    assert_eq!(fetched, created);

    let all: Vec<Item> = CrudService::list_all(&pool).await.unwrap();
    assert_eq!(all, vec![created]);
}

#[tokio::test]
async fn empty_store_lists_nothing() {
    let (_dir, pool) = test_pool().await;
    let all: Vec<Item> = CrudService::list_all(&pool).await.unwrap();
    assert!(all.is_empty());
}

#[tokio::test]
async fn update_replaces_fields_and_keeps_id() {
    let (_dir, pool) = test_pool().await;
    let created: Item = CrudService::create(&pool, &fields("Widget", 10, 2.5, "basic widget"))
        .await
        .unwrap();
    let f = fields("Sprocket", 5, 0.75, "");
    let updated: Item = CrudService::update(&pool, created.id, &f).await.unwrap();
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.fields(), f);

    let fetched: Item = CrudService::get(&pool, created.id).await.unwrap();
    assert_eq!(fetched, updated);
}

#[tokio::test]
async fn delete_removes_permanently() {
    let (_dir, pool) = test_pool().await;
    let created: Item = CrudService::create(&pool, &fields("Widget", 1, 1.0, "")).await.unwrap();
    let deleted: Item = CrudService::delete(&pool, created.id).await.unwrap();
    assert_eq!(deleted, created);

    let err = CrudService::get::<Item>(&pool, created.id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
    let all: Vec<Item> = CrudService::list_all(&pool).await.unwrap();
    assert!(all.is_empty());
}

#[tokio::test]
async fn missing_ids_are_not_found() {
    let (_dir, pool) = test_pool().await;
    let f = fields("Ghost", 0, 0.0, "");
    assert!(matches!(CrudService::get::<Item>(&pool, 999).await, Err(AppError::NotFound(_))));
    assert!(matches!(CrudService::update::<Item>(&pool, 999, &f).await, Err(AppError::NotFound(_))));
    assert!(matches!(CrudService::delete::<Item>(&pool, 999).await, Err(AppError::NotFound(_))));
    let all: Vec<Item> = CrudService::list_all(&pool).await.unwrap();
    assert!(all.is_empty());
}

#[tokio::test]
async fn list_is_sorted_by_name_for_any_insertion_order() {
    let orders: [[&str; 4]; 3] = [
        ["bolt", "Anvil", "washer", "Clamp"],
        ["washer", "Clamp", "bolt", "Anvil"],
        ["Clamp", "washer", "Anvil", "bolt"],
    ];
    for names in orders {
        let (_dir, pool) = test_pool().await;
        for name in names {
            CrudService::create::<Item>(&pool, &fields(name, 1, 1.0, "")).await.unwrap();
        }
        let listed: Vec<String> = CrudService::list_all::<Item>(&pool)
            .await
            .unwrap()
            .into_iter()
            .map(|i| i.name)
            .collect();
        let mut expected: Vec<String> = names.iter().map(|n| n.to_string()).collect();
        expected.sort();
        assert_eq!(listed, expected);
    }
}

#[tokio::test]
async fn equal_names_keep_creation_order() {
    let (_dir, pool) = test_pool().await;
    let a: Item = CrudService::create(&pool, &fields("Same", 1, 1.0, "first")).await.unwrap();
    let b: Item = CrudService::create(&pool, &fields("Same", 2, 2.0, "second")).await.unwrap();
    let ids: Vec<i64> = CrudService::list_all::<Item>(&pool)
        .await
        .unwrap()
        .into_iter()
        .map(|i| i.id)
        .collect();
    assert_eq!(ids, vec![a.id, b.id]);
}

#[tokio::test]
async fn ids_are_never_reused() {
    let (_dir, pool) = test_pool().await;
    let first: Item = CrudService::create(&pool, &fields("First", 1, 1.0, "")).await.unwrap();
    CrudService::delete::<Item>(&pool, first.id).await.unwrap();
    let second: Item = CrudService::create(&pool, &fields("Second", 1, 1.0, "")).await.unwrap();
    assert!(second.id > first.id);
}

#[tokio::test]
async fn null_description_is_allowed() {
    let (_dir, pool) = test_pool().await;
    let f = ItemFields {
        name: "Bare".into(),
        quantity: 0,
        price: 0.0,
        description: None,
    };
    let created: Item = CrudService::create(&pool, &f).await.unwrap();
    assert_eq!(created.description, None);
}

#[tokio::test]
async fn long_description_is_stored_whole() {
    let (_dir, pool) = test_pool().await;
    let long = "x".repeat(1000);
    let created: Item = CrudService::create(&pool, &fields("Long", 1, 1.0, &long)).await.unwrap();
    let fetched: Item = CrudService::get(&pool, created.id).await.unwrap();
    assert_eq!(fetched.description.as_deref(), Some(long.as_str()));
}

#[tokio::test]
async fn applying_schema_twice_keeps_rows() {
    let (_dir, pool) = test_pool().await;
    CrudService::create::<Item>(&pool, &fields("Kept", 1, 1.0, "")).await.unwrap();
    apply_schema(&pool, &ITEM_TABLE).await.unwrap();
    let all: Vec<Item> = CrudService::list_all(&pool).await.unwrap();
    assert_eq!(all.len(), 1);
}

#[tokio::test]
async fn database_file_survives_reconnect() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}", dir.path().join("inventory.db").display());
    {
        let pool = connect(&url, 1).await.unwrap();
        apply_schema(&pool, &ITEM_TABLE).await.unwrap();
        CrudService::create::<Item>(&pool, &fields("Durable", 3, 4.5, "")).await.unwrap();
        pool.close().await;
    }
    let pool = connect(&url, 1).await.unwrap();
    let all: Vec<Item> = CrudService::list_all(&pool).await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].name, "Durable");
}
