//! End-to-end use-case flows against the in-memory adapters.

use std::sync::Arc;
use std::time::Duration;

use domain_items::{
    CreateItem, InMemoryItemCache, InMemoryItemRepository, ItemCache, ItemError, ItemService,
    UpdateItem,
};
use uuid::Uuid;

fn service_with_cache() -> ItemService<InMemoryItemRepository> {
    ItemService::with_cache(
        InMemoryItemRepository::new(),
        Arc::new(InMemoryItemCache::new()) as Arc<dyn ItemCache>,
        Duration::from_secs(60),
    )
}

fn create_input(name: &str, description: Option<&str>, price: f64) -> CreateItem {
    CreateItem {
        name: name.to_string(),
        description: description.map(str::to_string),
        price,
        in_stock: true,
    }
}

#[tokio::test]
async fn full_crud_flow() {
    let service = service_with_cache();

    // create
    let created = service
        .create_item(create_input("Gaming Laptop", Some("16GB RAM"), 999.99))
        .await
        .unwrap();
    assert_eq!(created.name, "Gaming Laptop");
    assert!(created.in_stock);

    // read back (first via cache populated on create, then via repository)
    let fetched = service.get_item(created.id).await.unwrap();
    assert_eq!(fetched, created);

    // list
    service
        .create_item(create_input("Desk", None, 120.00))
        .await
        .unwrap();
    let all = service.list_items().await.unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].name, "Gaming Laptop");
    assert_eq!(all[1].name, "Desk");

    // partial update: only the price changes
    let updated = service
        .update_item(
            created.id,
            UpdateItem {
                price: Some(899.99),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.price, 899.99);
    assert_eq!(updated.name, "Gaming Laptop");
    assert_eq!(updated.description.as_deref(), Some("16GB RAM"));
    assert!(updated.updated_at >= updated.created_at);

    // the fresh state is observable after the invalidation
    let fetched = service.get_item(created.id).await.unwrap();
    assert_eq!(fetched.price, 899.99);

    // delete
    service.delete_item(created.id).await.unwrap();
    let err = service.get_item(created.id).await.unwrap_err();
    assert!(matches!(err, ItemError::NotFound(id) if id == created.id));

    let remaining = service.list_items().await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].name, "Desk");
}

#[tokio::test]
async fn search_flow() {
    let service = service_with_cache();

    service
        .create_item(create_input("Gaming Laptop", None, 999.99))
        .await
        .unwrap();
    service
        .create_item(create_input("Desk", Some("fits a laptop"), 120.00))
        .await
        .unwrap();
    service
        .create_item(create_input("Chair", None, 80.00))
        .await
        .unwrap();

    // matches name and description, case-insensitively
    let found = service.search_items("LaPtOp").await.unwrap();
    let names: Vec<_> = found.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, ["Gaming Laptop", "Desk"]);

    // a blank query is empty no matter what the repository holds
    assert!(service.search_items("").await.unwrap().is_empty());
    assert!(service.search_items("  \t ").await.unwrap().is_empty());

    assert!(service.search_items("projector").await.unwrap().is_empty());
}

#[tokio::test]
async fn invalid_partial_update_leaves_item_unchanged() {
    let service = service_with_cache();

    let created = service
        .create_item(create_input("Mouse", None, 10.00))
        .await
        .unwrap();

    let err = service
        .update_item(
            created.id,
            UpdateItem {
                name: Some("X".to_string()),
                price: Some(-1.0),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ItemError::Validation { field: "price", .. }));

    // neither field was applied
    let fetched = service.get_item(created.id).await.unwrap();
    assert_eq!(fetched.name, "Mouse");
    assert_eq!(fetched.price, 10.00);
    assert_eq!(fetched.updated_at, created.updated_at);
}

#[tokio::test]
async fn delete_of_unknown_id_is_not_found() {
    let service = service_with_cache();
    let err = service.delete_item(Uuid::now_v7()).await.unwrap_err();
    assert!(matches!(err, ItemError::NotFound(_)));
}

#[tokio::test]
async fn concurrent_updates_to_different_ids_do_not_interfere() {
    let service = service_with_cache();

    let a = service
        .create_item(create_input("A", None, 1.00))
        .await
        .unwrap();
    let b = service
        .create_item(create_input("B", None, 2.00))
        .await
        .unwrap();

    let update_a = service.update_item(
        a.id,
        UpdateItem {
            price: Some(10.00),
            ..Default::default()
        },
    );
    let update_b = service.update_item(
        b.id,
        UpdateItem {
            price: Some(20.00),
            ..Default::default()
        },
    );
    let (ra, rb) = tokio::join!(update_a, update_b);
    assert_eq!(ra.unwrap().price, 10.00);
    assert_eq!(rb.unwrap().price, 20.00);

    assert_eq!(service.get_item(a.id).await.unwrap().price, 10.00);
    assert_eq!(service.get_item(b.id).await.unwrap().price, 20.00);
}
