//! Tenant isolation specifications.
//!
//! Entities come in three tenancy shapes: tenant-bound (required owning
//! tenant), optionally tenant-bound, and tenant-less. One leaf per shape:
//!
//! - [`TenantSpecification`] for tenant-bound entities,
//! - [`OptionalTenantSpecification`] for optionally-bound entities,
//! - [`NoTenantSpecification`] for "genuinely has no tenant".
//!
//! The nil (all-zero) tenant id never satisfies a positive match, and an
//! explicitly-present nil tenant is not "absent".

use std::marker::PhantomData;

use common::TenantId;

use crate::filter::{CompareOp, Filter, FilterValue};
use crate::spec::Specification;

/// An entity with a required owning tenant.
pub trait TenantScoped {
    /// Field name the filter form compares against.
    const TENANT_FIELD: &'static str = "tenant_id";

    /// The owning tenant.
    fn tenant_id(&self) -> TenantId;
}

/// An entity whose owning tenant may be absent.
pub trait MaybeTenantScoped {
    /// Field name the filter form compares against.
    const TENANT_FIELD: &'static str = "tenant_id";

    /// The owning tenant, if any.
    fn tenant_id(&self) -> Option<TenantId>;
}

/// Satisfied when a tenant-bound entity belongs to the given tenant.
///
/// A nil probe matches nothing, including entities whose stored tenant
/// is itself nil.
#[derive(Debug, Clone)]
pub struct TenantSpecification<T> {
    tenant_id: TenantId,
    _marker: PhantomData<fn(&T)>,
}

impl<T> TenantSpecification<T> {
    /// Creates a tenant-equality specification.
    pub fn new(tenant_id: TenantId) -> Self {
        Self {
            tenant_id,
            _marker: PhantomData,
        }
    }
}

impl<T: TenantScoped> Specification<T> for TenantSpecification<T> {
    fn is_satisfied_by(&self, candidate: &T) -> bool {
        !self.tenant_id.is_nil() && candidate.tenant_id() == self.tenant_id
    }

    fn to_filter(&self) -> Filter {
        if self.tenant_id.is_nil() {
            Filter::Never
        } else {
            Filter::Compare {
                field: T::TENANT_FIELD,
                op: CompareOp::Eq,
                value: FilterValue::Uuid(self.tenant_id.as_uuid()),
            }
        }
    }
}

/// Satisfied when an optionally-tenanted entity has a tenant and it
/// equals the given one.
///
/// False when the entity's tenant is absent, when the probe is nil, or
/// when the values differ. An entity carrying an explicit nil tenant
/// never matches any probe.
#[derive(Debug, Clone)]
pub struct OptionalTenantSpecification<T> {
    tenant_id: TenantId,
    _marker: PhantomData<fn(&T)>,
}

impl<T> OptionalTenantSpecification<T> {
    /// Creates an optional-tenant-equality specification.
    pub fn new(tenant_id: TenantId) -> Self {
        Self {
            tenant_id,
            _marker: PhantomData,
        }
    }
}

impl<T: MaybeTenantScoped> Specification<T> for OptionalTenantSpecification<T> {
    fn is_satisfied_by(&self, candidate: &T) -> bool {
        !self.tenant_id.is_nil() && candidate.tenant_id() == Some(self.tenant_id)
    }

    fn to_filter(&self) -> Filter {
        if self.tenant_id.is_nil() {
            Filter::Never
        } else {
            Filter::Compare {
                field: T::TENANT_FIELD,
                op: CompareOp::Eq,
                value: FilterValue::Uuid(self.tenant_id.as_uuid()),
            }
        }
    }
}

/// Satisfied when an optionally-tenanted entity genuinely has no tenant.
///
/// An explicitly-set nil tenant is present, not absent, and does not
/// satisfy this specification.
#[derive(Debug, Clone, Default)]
pub struct NoTenantSpecification<T> {
    _marker: PhantomData<fn(&T)>,
}

impl<T> NoTenantSpecification<T> {
    /// Creates a no-tenant specification.
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T: MaybeTenantScoped> Specification<T> for NoTenantSpecification<T> {
    fn is_satisfied_by(&self, candidate: &T) -> bool {
        candidate.tenant_id().is_none()
    }

    fn to_filter(&self) -> Filter {
        Filter::IsAbsent {
            field: T::TENANT_FIELD,
        }
    }
}
