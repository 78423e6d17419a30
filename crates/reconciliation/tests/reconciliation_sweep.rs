//! End-to-end sweep scenarios against the in-memory collaborators.

use chrono::Utc;
use common::{AssetId, CancelToken, TenantId};
use domain::ImageAsset;
use provisioning::{ImageStorage, InMemoryCatalogRepository, InMemoryImageStorage};
use reconciliation::ReconciliationJob;

async fn seed_orphan(
    repository: &InMemoryCatalogRepository,
    storage: &InMemoryImageStorage,
    file_name: &str,
) -> ImageAsset {
    let mut asset = ImageAsset::new(
        AssetId::new(),
        file_name,
        "image/png",
        16,
        Some(TenantId::new()),
    );
    asset.mark_for_deletion(Utc::now());
    repository.add_asset(asset.clone());
    storage
        .upload(&asset.storage_key(), b"orphaned", "image/png")
        .await
        .unwrap();
    asset
}

#[tokio::test]
async fn repeated_sweeps_are_idempotent() {
    let repository = InMemoryCatalogRepository::new();
    let storage = InMemoryImageStorage::new();
    let first = seed_orphan(&repository, &storage, "first.png").await;
    let second = seed_orphan(&repository, &storage, "second.jpg").await;

    let job = ReconciliationJob::new(repository.clone(), storage.clone());
    let token = CancelToken::new();

    let summary = job.run(&token).await.unwrap();
    assert_eq!(summary.attempted, 2);
    assert_eq!(summary.succeeded, 2);
    assert_eq!(summary.failed, 0);
    assert!(!storage.contains(&first.storage_key()));
    assert!(!storage.contains(&second.storage_key()));

    // The records are still listed, so the second run re-deletes keys
    // that are already gone. Absent keys count as success.
    let again = job.run(&token).await.unwrap();
    assert_eq!(again.attempted, 2);
    assert_eq!(again.succeeded, 2);
    assert_eq!(again.failed, 0);

    // Asset records are never touched by the sweep.
    assert_eq!(repository.asset_count(), 2);
}

#[tokio::test]
async fn one_bad_key_does_not_stop_the_sweep() {
    let repository = InMemoryCatalogRepository::new();
    let storage = InMemoryImageStorage::new();

    let mut orphans = Vec::new();
    for i in 0..4 {
        orphans.push(seed_orphan(&repository, &storage, &format!("orphan-{i}.png")).await);
    }
    let poisoned = orphans[1].storage_key();
    storage.set_fail_delete_for(Some(poisoned.clone()));

    let job = ReconciliationJob::new(repository, storage.clone());
    let summary = job.run(&CancelToken::new()).await.unwrap();

    // Every orphan was attempted; only the poisoned key failed.
    assert_eq!(summary.attempted, 4);
    assert_eq!(summary.succeeded, 3);
    assert_eq!(summary.failed, 1);
    assert!(!summary.is_clean());
    assert_eq!(storage.delete_attempts(), 4);
    assert!(storage.contains(&poisoned));
    assert_eq!(storage.object_count(), 1);

    // The failed key is retried on the next pass once the fault clears.
    storage.set_fail_delete_for(None);
    let retry = job.run(&CancelToken::new()).await.unwrap();
    assert_eq!(retry.failed, 0);
    assert!(!storage.contains(&poisoned));
}
