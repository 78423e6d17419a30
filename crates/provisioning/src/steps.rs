//! Product provisioning saga constants.

/// The saga type identifier for product provisioning.
pub const SAGA_TYPE: &str = "ProductProvisioning";

/// Step name: verify the referenced category exists for the tenant.
pub const STEP_VERIFY_CATEGORY: &str = "verify_category";

/// Step name: upload the binary asset to external storage.
pub const STEP_UPLOAD_ASSET: &str = "upload_asset";

/// Step name: persist the asset record in the open transaction.
pub const STEP_PERSIST_ASSET: &str = "persist_asset";

/// Step name: persist the product aggregate in the open transaction.
pub const STEP_PERSIST_AGGREGATE: &str = "persist_aggregate";

/// Step name: commit the transaction.
pub const STEP_COMMIT: &str = "commit";
