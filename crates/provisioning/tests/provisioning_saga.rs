//! End-to-end provisioning saga tests: the saga, the compensation event
//! stream, and the cleanup handler wired together over in-memory
//! collaborators.

use common::{CancelToken, CategoryId, TenantId};
use domain::{Category, Money};
use provisioning::{
    AssetCleanupHandler, CreateProductRequest, ImagePayload, InMemoryCatalogRepository,
    InMemoryEventPublisher, InMemoryImageStorage, InMemoryUnitOfWork, ProvisioningError,
    ProvisioningSaga,
};

struct Harness {
    saga: ProvisioningSaga<
        InMemoryCatalogRepository,
        InMemoryUnitOfWork,
        InMemoryImageStorage,
        InMemoryEventPublisher,
    >,
    repository: InMemoryCatalogRepository,
    unit_of_work: InMemoryUnitOfWork,
    storage: InMemoryImageStorage,
    publisher: InMemoryEventPublisher,
    tenant_id: TenantId,
    category_id: CategoryId,
}

fn harness() -> Harness {
    let repository = InMemoryCatalogRepository::new();
    let unit_of_work = InMemoryUnitOfWork::new();
    let storage = InMemoryImageStorage::new();
    let publisher = InMemoryEventPublisher::new();

    let tenant_id = TenantId::new();
    let category_id = CategoryId::new();
    repository.add_category(Category::new(category_id, "TOOLS", "Tools", tenant_id));

    let saga = ProvisioningSaga::new(
        repository.clone(),
        unit_of_work.clone(),
        storage.clone(),
        publisher.clone(),
    );

    Harness {
        saga,
        repository,
        unit_of_work,
        storage,
        publisher,
        tenant_id,
        category_id,
    }
}

fn request_with_image(h: &Harness) -> CreateProductRequest {
    CreateProductRequest {
        tenant_id: h.tenant_id,
        category_id: h.category_id,
        name: "Hammer".to_string(),
        description: "A claw hammer".to_string(),
        price: Money::from_cents(2499),
        image: Some(ImagePayload {
            file_name: "hammer.jpg".to_string(),
            content_type: "image/jpeg".to_string(),
            bytes: vec![0xff, 0xd8, 0xff, 0xe0],
        }),
    }
}

#[tokio::test]
async fn committed_saga_leaves_consistent_stores() {
    let h = harness();
    let receipt = h
        .saga
        .execute(request_with_image(&h), &CancelToken::new())
        .await
        .unwrap();

    let asset = h.repository.get_asset(receipt.asset_id.unwrap()).unwrap();
    assert_eq!(asset.extension(), "jpg");
    assert_eq!(asset.length(), 4);
    assert!(h.storage.contains(&asset.storage_key()));

    let product = h.repository.get_product(receipt.product_id).unwrap();
    assert_eq!(product.name(), "Hammer");
    assert_eq!(product.category_id(), h.category_id);
    assert_eq!(product.tenant_id(), h.tenant_id);
    assert_eq!(product.asset_id(), Some(asset.id()));

    assert_eq!(h.unit_of_work.begun_count(), 1);
    assert_eq!(h.unit_of_work.commit_count(), 1);
    assert_eq!(h.unit_of_work.rollback_count(), 0);
    assert_eq!(h.publisher.published_count(), 0);
}

#[tokio::test]
async fn failed_saga_plus_cleanup_handler_removes_the_upload() {
    let h = harness();
    h.unit_of_work.set_fail_on_commit(true);

    let err = h
        .saga
        .execute(request_with_image(&h), &CancelToken::new())
        .await
        .unwrap_err();
    assert!(matches!(err, ProvisioningError::Repository(_)));

    // Exactly one compensation event, for a key that really exists.
    let events = h.publisher.published();
    assert_eq!(events.len(), 1);
    assert!(h.storage.contains(&events[0].storage_key));

    // Downstream handler converges storage.
    let handler = AssetCleanupHandler::new(h.storage.clone());
    handler.handle(&events[0]).await.unwrap();
    assert!(!h.storage.contains(&events[0].storage_key));
    assert_eq!(h.storage.object_count(), 0);

    // At-least-once delivery: a second handling is harmless.
    handler.handle(&events[0]).await.unwrap();
}

#[tokio::test]
async fn failed_compensation_publish_leaves_observable_drift() {
    let h = harness();
    h.repository.set_fail_on_create_product(true);
    h.publisher.set_fail_on_publish(true);

    let err = h
        .saga
        .execute(request_with_image(&h), &CancelToken::new())
        .await
        .unwrap_err();

    // The original failure surfaces, not the publish failure.
    assert!(matches!(err, ProvisioningError::Repository(_)));
    assert_eq!(h.unit_of_work.rollback_count(), 1);

    // The upload is orphaned: bytes in storage, no committed record.
    assert_eq!(h.storage.object_count(), 1);
    assert_eq!(h.repository.product_count(), 0);
}

#[tokio::test]
async fn each_invocation_owns_its_own_transaction() {
    let h = harness();
    for _ in 0..3 {
        h.saga
            .execute(
                CreateProductRequest {
                    tenant_id: h.tenant_id,
                    category_id: h.category_id,
                    name: "Screwdriver".to_string(),
                    description: "Flat head".to_string(),
                    price: Money::from_cents(899),
                    image: None,
                },
                &CancelToken::new(),
            )
            .await
            .unwrap();
    }

    assert_eq!(h.unit_of_work.begun_count(), 3);
    assert_eq!(h.unit_of_work.commit_count(), 3);
    assert_eq!(h.repository.product_count(), 3);
}
