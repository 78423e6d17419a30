//! Product aggregate.

use common::{AssetId, CategoryId, ProductId, TenantId};
use serde::{Deserialize, Serialize};
use specification::{FieldValue, FilterRecord, Identified, Named, TenantScoped};
use uuid::Uuid;

use crate::error::DomainError;
use crate::money::Money;

/// The catalog product aggregate.
///
/// Constructed only through [`Product::new`], which enforces the
/// aggregate invariants: name and description non-empty after trimming
/// (stored trimmed), category and tenant references non-nil, price
/// non-negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    name: String,
    description: String,
    price: Money,
    category_id: CategoryId,
    tenant_id: TenantId,
    asset_id: Option<AssetId>,
    is_active: bool,
}

impl Product {
    /// Creates a product, validating the aggregate invariants.
    ///
    /// The asset reference, if present, must be the record created in the
    /// same provisioning flow; that linkage is the saga's responsibility,
    /// not checked here.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        description: impl Into<String>,
        price: Money,
        category_id: CategoryId,
        tenant_id: TenantId,
        asset_id: Option<AssetId>,
    ) -> Result<Self, DomainError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(DomainError::EmptyField { field: "name" });
        }

        let description = description.into().trim().to_string();
        if description.is_empty() {
            return Err(DomainError::EmptyField {
                field: "description",
            });
        }

        if category_id.is_nil() {
            return Err(DomainError::NilReference {
                field: "category_id",
            });
        }
        if tenant_id.is_nil() {
            return Err(DomainError::NilReference { field: "tenant_id" });
        }

        if price.is_negative() {
            return Err(DomainError::NegativePrice {
                cents: price.cents(),
            });
        }

        Ok(Self {
            id,
            name,
            description,
            price,
            category_id,
            tenant_id,
            asset_id,
            is_active: true,
        })
    }

    /// Returns the product identifier.
    pub fn id(&self) -> ProductId {
        self.id
    }

    /// Returns the product name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the product description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the price.
    pub fn price(&self) -> Money {
        self.price
    }

    /// Returns the referenced category.
    pub fn category_id(&self) -> CategoryId {
        self.category_id
    }

    /// Returns the owning tenant.
    pub fn tenant_id(&self) -> TenantId {
        self.tenant_id
    }

    /// Returns the referenced image asset, if any.
    pub fn asset_id(&self) -> Option<AssetId> {
        self.asset_id
    }

    /// Returns true while the product is active in the catalog.
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// Deactivates the product. Idempotent.
    pub fn deactivate(&mut self) {
        self.is_active = false;
    }
}

impl Identified for Product {
    fn id(&self) -> Uuid {
        self.id.as_uuid()
    }
}

impl Named for Product {
    fn name(&self) -> &str {
        &self.name
    }
}

impl TenantScoped for Product {
    fn tenant_id(&self) -> TenantId {
        self.tenant_id
    }
}

impl FilterRecord for Product {
    fn field(&self, name: &str) -> FieldValue {
        match name {
            "id" => FieldValue::Uuid(self.id.as_uuid()),
            "name" => FieldValue::Text(self.name.clone()),
            "tenant_id" => FieldValue::Uuid(self.tenant_id.as_uuid()),
            "category_id" => FieldValue::Uuid(self.category_id.as_uuid()),
            "asset_id" => FieldValue::OptionalUuid(self.asset_id.map(AssetId::into)),
            "is_active" => FieldValue::Bool(self.is_active),
            _ => FieldValue::Missing,
        }
    }
}
