//! Parameterized leaf specifications.
//!
//! Leaves compare exactly and case-sensitively, never trim whitespace,
//! and are never satisfied by an empty or nil probe value. The one
//! documented exception is [`CodeSpecification`], which upper-cases its
//! probe at construction and compares business codes
//! ASCII-case-insensitively.

use std::marker::PhantomData;

use uuid::Uuid;

use crate::filter::{CompareOp, Filter, FilterValue};
use crate::spec::Specification;

/// An entity with a required unique identifier.
pub trait Identified {
    /// Field name the filter form compares against.
    const ID_FIELD: &'static str = "id";

    /// The entity's identifier.
    fn id(&self) -> Uuid;
}

/// An entity with a business code (e.g. a category code).
pub trait Coded {
    /// Field name the filter form compares against.
    const CODE_FIELD: &'static str = "code";

    /// The entity's business code, as stored.
    fn code(&self) -> &str;
}

/// An entity with a display name.
pub trait Named {
    /// Field name the filter form compares against.
    const NAME_FIELD: &'static str = "name";

    /// The entity's name, as stored.
    fn name(&self) -> &str;
}

/// Satisfied when the entity's identifier equals the probe.
///
/// The nil probe never matches anything, even an entity whose stored
/// identifier happens to be nil.
#[derive(Debug, Clone)]
pub struct IdSpecification<T> {
    id: Uuid,
    _marker: PhantomData<fn(&T)>,
}

impl<T> IdSpecification<T> {
    /// Creates an identifier-equality specification.
    pub fn new(id: impl Into<Uuid>) -> Self {
        Self {
            id: id.into(),
            _marker: PhantomData,
        }
    }
}

impl<T: Identified> Specification<T> for IdSpecification<T> {
    fn is_satisfied_by(&self, candidate: &T) -> bool {
        !self.id.is_nil() && candidate.id() == self.id
    }

    fn to_filter(&self) -> Filter {
        if self.id.is_nil() {
            Filter::Never
        } else {
            Filter::Compare {
                field: T::ID_FIELD,
                op: CompareOp::Eq,
                value: FilterValue::Uuid(self.id),
            }
        }
    }
}

/// Satisfied when the entity's business code equals the probe,
/// ignoring ASCII case.
///
/// The probe is upper-cased at construction (the documented
/// normalization for business codes). An empty probe never matches.
/// Whitespace is not trimmed; callers normalize before constructing.
#[derive(Debug, Clone)]
pub struct CodeSpecification<T> {
    code: String,
    _marker: PhantomData<fn(&T)>,
}

impl<T> CodeSpecification<T> {
    /// Creates a code-equality specification, upper-casing the probe.
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into().to_ascii_uppercase(),
            _marker: PhantomData,
        }
    }
}

impl<T: Coded> Specification<T> for CodeSpecification<T> {
    fn is_satisfied_by(&self, candidate: &T) -> bool {
        !self.code.is_empty() && candidate.code().eq_ignore_ascii_case(&self.code)
    }

    fn to_filter(&self) -> Filter {
        if self.code.is_empty() {
            Filter::Never
        } else {
            Filter::Compare {
                field: T::CODE_FIELD,
                op: CompareOp::EqIgnoreAsciiCase,
                value: FilterValue::Text(self.code.clone()),
            }
        }
    }
}

/// Satisfied when the entity's name equals the probe exactly
/// (case-sensitive, no trimming). An empty probe never matches.
#[derive(Debug, Clone)]
pub struct NameSpecification<T> {
    name: String,
    _marker: PhantomData<fn(&T)>,
}

impl<T> NameSpecification<T> {
    /// Creates a name-equality specification.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            _marker: PhantomData,
        }
    }
}

impl<T: Named> Specification<T> for NameSpecification<T> {
    fn is_satisfied_by(&self, candidate: &T) -> bool {
        !self.name.is_empty() && candidate.name() == self.name
    }

    fn to_filter(&self) -> Filter {
        if self.name.is_empty() {
            Filter::Never
        } else {
            Filter::Compare {
                field: T::NAME_FIELD,
                op: CompareOp::Eq,
                value: FilterValue::Text(self.name.clone()),
            }
        }
    }
}
