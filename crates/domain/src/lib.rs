//! Catalog domain layer.
//!
//! This crate provides the entities the provisioning core operates on:
//! - `Category`: tenant-bound reference data a product must point at
//! - `Product`: the catalog aggregate created by the provisioning saga
//! - `ImageAsset`: metadata for a binary asset held in external storage
//! - `Money`: integer-cents price value object
//!
//! Entities implement the accessor traits from the `specification` crate
//! (`Identified`, `TenantScoped`, ...) together with `FilterRecord`, so
//! every specification's direct evaluation and its compiled filter form
//! stay in agreement.

pub mod asset;
pub mod category;
pub mod error;
pub mod money;
pub mod product;

pub use asset::ImageAsset;
pub use category::Category;
pub use error::DomainError;
pub use money::Money;
pub use product::Product;
