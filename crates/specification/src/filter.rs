//! Query-translatable filter descriptors.
//!
//! A [`Filter`] is the predicate form of a specification: a small tree of
//! comparisons and boolean connectives that a store layer can walk and
//! translate into a native filter (SQL `WHERE`, document query, ...).
//! It can also be evaluated directly against any [`FilterRecord`], which
//! is what keeps the compiled form and the specification's own
//! `is_satisfied_by` provably in agreement.

use uuid::Uuid;

/// A field value exposed by an entity for filter evaluation.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// A required UUID field.
    Uuid(Uuid),
    /// An optional UUID field; `None` means genuinely absent.
    OptionalUuid(Option<Uuid>),
    /// A textual field.
    Text(String),
    /// A boolean field.
    Bool(bool),
    /// The entity does not expose a field with the requested name.
    ///
    /// Every predicate fails against `Missing`, including absence checks:
    /// a mis-wired record can never satisfy a filter by accident.
    Missing,
}

/// An entity that can expose named field values to filter evaluation.
pub trait FilterRecord {
    /// Returns the value of the named field, or [`FieldValue::Missing`].
    fn field(&self, name: &str) -> FieldValue;
}

/// The probe value a comparison leaf carries.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    /// Compare against a UUID.
    Uuid(Uuid),
    /// Compare against a string.
    Text(String),
    /// Compare against a boolean.
    Bool(bool),
}

/// Comparison operator for a [`Filter::Compare`] leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    /// Exact equality; case-sensitive for text.
    Eq,
    /// ASCII-case-insensitive text equality. Only the leaves that
    /// document normalization (business codes) emit this.
    EqIgnoreAsciiCase,
}

/// The predicate form of a specification.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Constant false. The compiled form of any leaf built from an
    /// empty or nil probe value.
    Never,

    /// Field comparison leaf.
    Compare {
        /// Entity field name.
        field: &'static str,
        /// Comparison operator.
        op: CompareOp,
        /// Probe value.
        value: FilterValue,
    },

    /// True only when an optional field is genuinely absent.
    IsAbsent {
        /// Entity field name.
        field: &'static str,
    },

    /// Both operands must hold.
    And(Box<Filter>, Box<Filter>),

    /// Either operand must hold.
    Or(Box<Filter>, Box<Filter>),

    /// The operand must not hold.
    Not(Box<Filter>),
}

impl Filter {
    /// Evaluates this filter against a record.
    pub fn evaluate(&self, record: &dyn FilterRecord) -> bool {
        match self {
            Filter::Never => false,
            Filter::Compare { field, op, value } => {
                compare(&record.field(field), *op, value)
            }
            Filter::IsAbsent { field } => {
                matches!(record.field(field), FieldValue::OptionalUuid(None))
            }
            Filter::And(a, b) => a.evaluate(record) && b.evaluate(record),
            Filter::Or(a, b) => a.evaluate(record) || b.evaluate(record),
            Filter::Not(a) => !a.evaluate(record),
        }
    }

    /// Combines two filters with AND.
    pub fn and(self, other: Filter) -> Filter {
        Filter::And(Box::new(self), Box::new(other))
    }

    /// Combines two filters with OR.
    pub fn or(self, other: Filter) -> Filter {
        Filter::Or(Box::new(self), Box::new(other))
    }

    /// Negates a filter.
    pub fn negate(self) -> Filter {
        Filter::Not(Box::new(self))
    }
}

fn compare(actual: &FieldValue, op: CompareOp, probe: &FilterValue) -> bool {
    match (actual, probe) {
        (FieldValue::Uuid(a), FilterValue::Uuid(p)) => a == p,
        (FieldValue::OptionalUuid(Some(a)), FilterValue::Uuid(p)) => a == p,
        (FieldValue::OptionalUuid(None), _) => false,
        (FieldValue::Text(a), FilterValue::Text(p)) => match op {
            CompareOp::Eq => a == p,
            CompareOp::EqIgnoreAsciiCase => a.eq_ignore_ascii_case(p),
        },
        (FieldValue::Bool(a), FilterValue::Bool(p)) => a == p,
        _ => false,
    }
}
