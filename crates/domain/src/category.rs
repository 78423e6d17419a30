//! Catalog category entity.

use common::{CategoryId, TenantId};
use serde::{Deserialize, Serialize};
use specification::{Coded, FieldValue, FilterRecord, Identified, Named, TenantScoped};
use uuid::Uuid;

/// A tenant-bound catalog category.
///
/// Categories are reference data: the provisioning saga only ever reads
/// them, scoped to the requesting tenant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    id: CategoryId,
    code: String,
    name: String,
    tenant_id: TenantId,
}

impl Category {
    /// Creates a category.
    pub fn new(
        id: CategoryId,
        code: impl Into<String>,
        name: impl Into<String>,
        tenant_id: TenantId,
    ) -> Self {
        Self {
            id,
            code: code.into(),
            name: name.into(),
            tenant_id,
        }
    }

    /// Returns the category identifier.
    pub fn id(&self) -> CategoryId {
        self.id
    }

    /// Returns the business code.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Returns the display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the owning tenant.
    pub fn tenant_id(&self) -> TenantId {
        self.tenant_id
    }
}

impl Identified for Category {
    fn id(&self) -> Uuid {
        self.id.as_uuid()
    }
}

impl Coded for Category {
    fn code(&self) -> &str {
        &self.code
    }
}

impl Named for Category {
    fn name(&self) -> &str {
        &self.name
    }
}

impl TenantScoped for Category {
    fn tenant_id(&self) -> TenantId {
        self.tenant_id
    }
}

impl FilterRecord for Category {
    fn field(&self, name: &str) -> FieldValue {
        match name {
            "id" => FieldValue::Uuid(self.id.as_uuid()),
            "code" => FieldValue::Text(self.code.clone()),
            "name" => FieldValue::Text(self.name.clone()),
            "tenant_id" => FieldValue::Uuid(self.tenant_id.as_uuid()),
            _ => FieldValue::Missing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use specification::{CodeSpecification, IdSpecification, Specification, TenantSpecification};

    fn category() -> Category {
        Category::new(CategoryId::new(), "ELEC", "Electronics", TenantId::new())
    }

    #[test]
    fn id_spec_finds_category() {
        let cat = category();
        let spec = IdSpecification::new(cat.id());
        assert!(spec.is_satisfied_by(&cat));
        assert!(spec.to_filter().evaluate(&cat));
    }

    #[test]
    fn tenant_scoping_isolates() {
        let cat = category();
        let own = TenantSpecification::new(cat.tenant_id());
        let foreign = TenantSpecification::new(TenantId::new());
        assert!(own.is_satisfied_by(&cat));
        assert!(!foreign.is_satisfied_by(&cat));
    }

    #[test]
    fn code_spec_normalizes_probe() {
        let cat = category();
        assert!(CodeSpecification::new("elec").is_satisfied_by(&cat));
    }

    #[test]
    fn combined_id_and_tenant_spec() {
        let cat = category();
        let spec = IdSpecification::new(cat.id()).and(TenantSpecification::new(cat.tenant_id()));
        assert!(spec.is_satisfied_by(&cat));
        assert_eq!(
            spec.is_satisfied_by(&cat),
            spec.to_filter().evaluate(&cat)
        );
    }
}
