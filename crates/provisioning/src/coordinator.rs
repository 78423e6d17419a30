//! Saga coordinator for product provisioning.

use common::{AssetId, CancelToken, CategoryId, ProductId, StorageKey, TenantId};
use domain::{Category, ImageAsset, Money, Product};
use specification::{IdSpecification, Specification, TenantSpecification};

use crate::error::{ProvisioningError, Result};
use crate::events::AssetCleanupRequested;
use crate::services::{CatalogRepository, EventPublisher, ImageStorage, UnitOfWork};
use crate::state::SagaState;
use crate::steps;

/// Binary payload attached to a provisioning request.
#[derive(Debug, Clone)]
pub struct ImagePayload {
    /// Original file name; the asset's extension is derived from it.
    pub file_name: String,
    /// Declared content type.
    pub content_type: String,
    /// The image bytes.
    pub bytes: Vec<u8>,
}

/// A caller's request to provision a catalog product.
#[derive(Debug, Clone)]
pub struct CreateProductRequest {
    /// The requesting tenant; category lookup is scoped to it.
    pub tenant_id: TenantId,
    /// The category the product must belong to.
    pub category_id: CategoryId,
    /// Product name (validated non-empty after trim).
    pub name: String,
    /// Product description (validated non-empty after trim).
    pub description: String,
    /// Product price.
    pub price: Money,
    /// Optional binary asset to attach.
    pub image: Option<ImagePayload>,
}

/// What a successful saga invocation produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProvisionedProduct {
    /// The committed product aggregate.
    pub product_id: ProductId,
    /// The committed asset record, if the request carried an image.
    pub asset_id: Option<AssetId>,
}

/// Orchestrates the product provisioning saga.
///
/// One invocation owns one transaction for its whole lifetime and runs
/// its steps strictly in order, suspending at every I/O boundary. The
/// compensation decision is a pure function of accumulated state: once
/// an upload has succeeded, any later failure publishes exactly one
/// [`AssetCleanupRequested`] before rollback. No step is retried here;
/// retries belong to the caller.
pub struct ProvisioningSaga<R, U, S, P>
where
    R: CatalogRepository,
    U: UnitOfWork,
    S: ImageStorage,
    P: EventPublisher,
{
    repository: R,
    unit_of_work: U,
    storage: S,
    publisher: P,
}

impl<R, U, S, P> ProvisioningSaga<R, U, S, P>
where
    R: CatalogRepository,
    U: UnitOfWork,
    S: ImageStorage,
    P: EventPublisher,
{
    /// Creates a new provisioning saga over the given collaborators.
    pub fn new(repository: R, unit_of_work: U, storage: S, publisher: P) -> Self {
        Self {
            repository,
            unit_of_work,
            storage,
            publisher,
        }
    }

    /// Executes one provisioning invocation.
    ///
    /// On failure the transaction is rolled back, compensation is
    /// published if (and only if) this invocation uploaded an asset, and
    /// the original failure is re-raised unchanged. A cancelled token is
    /// a failure at the step where it is observed.
    #[tracing::instrument(
        skip(self, request, cancel),
        fields(saga_type = steps::SAGA_TYPE, tenant_id = %request.tenant_id)
    )]
    pub async fn execute(
        &self,
        request: CreateProductRequest,
        cancel: &CancelToken,
    ) -> Result<ProvisionedProduct> {
        metrics::counter!("provisioning_saga_executions_total").increment(1);
        let saga_start = std::time::Instant::now();

        self.unit_of_work.begin().await.map_err(ProvisioningError::from)?;

        let mut state = SagaState::Start;
        let mut uploaded: Option<(AssetId, StorageKey)> = None;
        let outcome = self
            .run_steps(&request, cancel, &mut state, &mut uploaded)
            .await;

        let duration = saga_start.elapsed().as_secs_f64();
        metrics::histogram!("provisioning_saga_duration_seconds").record(duration);

        match outcome {
            Ok(receipt) => {
                metrics::counter!("provisioning_saga_completed").increment(1);
                tracing::info!(
                    product_id = %receipt.product_id,
                    duration,
                    "saga committed"
                );
                Ok(receipt)
            }
            Err(err) => {
                self.abort(uploaded.as_ref(), &mut state, &err).await;
                Err(err)
            }
        }
    }

    /// Runs the linear step sequence, threading the upload obligation
    /// through `uploaded` so the caller can decide compensation.
    async fn run_steps(
        &self,
        request: &CreateProductRequest,
        cancel: &CancelToken,
        state: &mut SagaState,
        uploaded: &mut Option<(AssetId, StorageKey)>,
    ) -> Result<ProvisionedProduct> {
        // Step 1: verify the referenced category, scoped to the tenant.
        ensure_active(cancel, steps::STEP_VERIFY_CATEGORY)?;
        tracing::info!(step = steps::STEP_VERIFY_CATEGORY, "saga step started");
        let spec = IdSpecification::<Category>::new(request.category_id)
            .and(TenantSpecification::new(request.tenant_id));
        let category = self
            .repository
            .find_category(&spec)
            .await?
            .ok_or(ProvisioningError::CategoryNotFound {
                category_id: request.category_id,
                tenant_id: request.tenant_id,
            })?;
        *state = SagaState::CategoryVerified;
        tracing::debug!(state = %state, category_id = %category.id(), "category verified");

        // Steps 2-3: upload the binary and persist its record, when the
        // request carries one.
        let mut asset: Option<ImageAsset> = None;
        if let Some(image) = &request.image {
            ensure_active(cancel, steps::STEP_UPLOAD_ASSET)?;
            tracing::info!(step = steps::STEP_UPLOAD_ASSET, "saga step started");
            let record = ImageAsset::new(
                AssetId::new(),
                image.file_name.as_str(),
                image.content_type.as_str(),
                image.bytes.len() as u64,
                Some(request.tenant_id),
            );
            let key = record.storage_key();
            self.storage
                .upload(&key, &image.bytes, &image.content_type)
                .await?;
            // The compensation boundary: from here on, every failure
            // must clean up this key.
            *uploaded = Some((record.id(), key));
            *state = SagaState::AssetUploaded;
            tracing::debug!(state = %state, asset_id = %record.id(), "asset uploaded");

            ensure_active(cancel, steps::STEP_PERSIST_ASSET)?;
            tracing::info!(step = steps::STEP_PERSIST_ASSET, "saga step started");
            self.repository.create_asset(&record).await?;
            self.unit_of_work.save_changes().await?;
            *state = SagaState::AssetPersisted;
            tracing::debug!(state = %state, "asset record staged");
            asset = Some(record);
        }

        // Step 4: build and persist the aggregate. A validation failure
        // here follows the same path as a persistence failure.
        ensure_active(cancel, steps::STEP_PERSIST_AGGREGATE)?;
        tracing::info!(step = steps::STEP_PERSIST_AGGREGATE, "saga step started");
        let product = Product::new(
            ProductId::new(),
            request.name.as_str(),
            request.description.as_str(),
            request.price,
            request.category_id,
            request.tenant_id,
            asset.as_ref().map(ImageAsset::id),
        )?;
        self.repository.create_product(&product).await?;
        self.unit_of_work.save_changes().await?;
        *state = SagaState::AggregatePersisted;
        tracing::debug!(state = %state, product_id = %product.id(), "aggregate staged");

        // Step 5: commit.
        ensure_active(cancel, steps::STEP_COMMIT)?;
        tracing::info!(step = steps::STEP_COMMIT, "saga step started");
        self.unit_of_work.commit().await?;
        *state = SagaState::Committed;
        tracing::debug!(state = %state, "transaction committed");

        Ok(ProvisionedProduct {
            product_id: product.id(),
            asset_id: asset.as_ref().map(ImageAsset::id),
        })
    }

    /// Cleans up a failed invocation: publishes the single compensation
    /// event when this flow uploaded an asset, then rolls back.
    ///
    /// Cleanup failures are logged, never surfaced: the caller gets the
    /// original failure, and drift left behind is the reconciliation
    /// sweep's to converge.
    async fn abort(
        &self,
        uploaded: Option<&(AssetId, StorageKey)>,
        state: &mut SagaState,
        err: &ProvisioningError,
    ) {
        if let Some((asset_id, key)) = uploaded {
            let event = AssetCleanupRequested::new(*asset_id, key.clone());
            match self.publisher.publish(event).await {
                Ok(()) => {
                    metrics::counter!("provisioning_compensations_total").increment(1);
                    tracing::warn!(
                        asset_id = %asset_id,
                        key = %key,
                        "compensation event published"
                    );
                }
                Err(publish_err) => {
                    tracing::error!(
                        error = %publish_err,
                        key = %key,
                        "failed to publish compensation event"
                    );
                }
            }
        }

        if let Err(rollback_err) = self.unit_of_work.rollback().await {
            tracing::error!(error = %rollback_err, "rollback failed");
        }

        *state = if uploaded.is_some() {
            SagaState::RolledBackWithCompensation
        } else {
            SagaState::RolledBack
        };
        metrics::counter!("provisioning_saga_failed").increment(1);
        tracing::warn!(state = %state, error = %err, "saga failed");
    }
}

fn ensure_active(cancel: &CancelToken, step: &'static str) -> Result<()> {
    if cancel.is_cancelled() {
        Err(ProvisioningError::Cancelled { step })
    } else {
        Ok(())
    }
}
