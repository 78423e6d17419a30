//! The [`Specification`] trait and its logical combinators.

use std::marker::PhantomData;

use crate::filter::Filter;

/// A composable boolean predicate over entities of type `T`.
///
/// Every specification has two representations that must agree for every
/// entity: the direct [`is_satisfied_by`](Specification::is_satisfied_by)
/// evaluation, and the [`Filter`] descriptor returned by
/// [`to_filter`](Specification::to_filter), which a query layer translates
/// to a store-native filter. Specifications are immutable; combinators
/// consume their operands and produce new values.
pub trait Specification<T>: Send + Sync {
    /// Evaluates the predicate directly against a candidate entity.
    fn is_satisfied_by(&self, candidate: &T) -> bool;

    /// Returns the query-translatable form of this predicate.
    ///
    /// Invariant: `self.to_filter().evaluate(e) == self.is_satisfied_by(e)`
    /// for every entity `e`.
    fn to_filter(&self) -> Filter;

    /// Combines with another specification; satisfied when both are.
    fn and<S>(self, other: S) -> AndSpecification<T, Self, S>
    where
        Self: Sized,
        S: Specification<T>,
    {
        AndSpecification {
            left: self,
            right: other,
            _marker: PhantomData,
        }
    }

    /// Combines with another specification; satisfied when either is.
    fn or<S>(self, other: S) -> OrSpecification<T, Self, S>
    where
        Self: Sized,
        S: Specification<T>,
    {
        OrSpecification {
            left: self,
            right: other,
            _marker: PhantomData,
        }
    }

    /// Negates this specification.
    fn not(self) -> NotSpecification<T, Self>
    where
        Self: Sized,
    {
        NotSpecification {
            inner: self,
            _marker: PhantomData,
        }
    }
}

/// Conjunction of two specifications.
#[derive(Debug, Clone)]
pub struct AndSpecification<T, L, R> {
    left: L,
    right: R,
    _marker: PhantomData<fn(&T)>,
}

impl<T, L, R> Specification<T> for AndSpecification<T, L, R>
where
    L: Specification<T>,
    R: Specification<T>,
{
    fn is_satisfied_by(&self, candidate: &T) -> bool {
        self.left.is_satisfied_by(candidate) && self.right.is_satisfied_by(candidate)
    }

    fn to_filter(&self) -> Filter {
        self.left.to_filter().and(self.right.to_filter())
    }
}

/// Disjunction of two specifications.
#[derive(Debug, Clone)]
pub struct OrSpecification<T, L, R> {
    left: L,
    right: R,
    _marker: PhantomData<fn(&T)>,
}

impl<T, L, R> Specification<T> for OrSpecification<T, L, R>
where
    L: Specification<T>,
    R: Specification<T>,
{
    fn is_satisfied_by(&self, candidate: &T) -> bool {
        self.left.is_satisfied_by(candidate) || self.right.is_satisfied_by(candidate)
    }

    fn to_filter(&self) -> Filter {
        self.left.to_filter().or(self.right.to_filter())
    }
}

/// Negation of a specification.
#[derive(Debug, Clone)]
pub struct NotSpecification<T, S> {
    inner: S,
    _marker: PhantomData<fn(&T)>,
}

impl<T, S> Specification<T> for NotSpecification<T, S>
where
    S: Specification<T>,
{
    fn is_satisfied_by(&self, candidate: &T) -> bool {
        !self.inner.is_satisfied_by(candidate)
    }

    fn to_filter(&self) -> Filter {
        self.inner.to_filter().negate()
    }
}

impl<T, S> Specification<T> for &S
where
    S: Specification<T> + ?Sized,
{
    fn is_satisfied_by(&self, candidate: &T) -> bool {
        (**self).is_satisfied_by(candidate)
    }

    fn to_filter(&self) -> Filter {
        (**self).to_filter()
    }
}
