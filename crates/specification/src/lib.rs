//! Composable specification (predicate) engine.
//!
//! A [`Specification`] is an immutable boolean predicate over an entity
//! type with two representations that must always agree:
//!
//! - direct evaluation via [`Specification::is_satisfied_by`], and
//! - a query-translatable [`Filter`] descriptor via
//!   [`Specification::to_filter`], which a store layer can turn into a
//!   native filter and which can also be evaluated in memory.
//!
//! Specifications compose with `and`/`or`/`not`; composing never mutates
//! an operand. Leaf specifications built from an empty or nil probe value
//! are never satisfied; matching "emptiness" requires the explicit
//! absence leaf ([`NoTenantSpecification`]).

pub mod filter;
pub mod leaf;
pub mod spec;
pub mod tenancy;

pub use filter::{CompareOp, FieldValue, Filter, FilterRecord, FilterValue};
pub use leaf::{CodeSpecification, Coded, IdSpecification, Identified, NameSpecification, Named};
pub use spec::{AndSpecification, NotSpecification, OrSpecification, Specification};
pub use tenancy::{
    MaybeTenantScoped, NoTenantSpecification, OptionalTenantSpecification, TenantScoped,
    TenantSpecification,
};
