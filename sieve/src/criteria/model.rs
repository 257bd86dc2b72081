use serde::{Deserialize, Serialize};

use crate::value::{FieldKind, Value};

/// Comparison applied by a [`SingleCriterion`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    Equals,
    NotEquals,
    GreaterThan,
    GreaterThanOrEqualTo,
    LessThan,
    LessThanOrEqualTo,
    IsNull,
    IsNotNull,
    StartsWith,
    EndsWith,
    Contains,
    DoesNotStartWith,
    DoesNotEndWith,
    DoesNotContain,
    In,
    NotIn,
}

impl Operator {
    /// Symbol for the plain binary comparisons.
    pub const fn comparison_symbol(self) -> Option<&'static str> {
        match self {
            Operator::Equals => Some("=="),
            Operator::NotEquals => Some("!="),
            Operator::GreaterThan => Some(">"),
            Operator::GreaterThanOrEqualTo => Some(">="),
            Operator::LessThan => Some("<"),
            Operator::LessThanOrEqualTo => Some("<="),
            _ => None,
        }
    }

    /// String method name for pattern operators, with whether the match is negated.
    pub const fn pattern_method(self) -> Option<(&'static str, bool)> {
        match self {
            Operator::StartsWith => Some(("StartsWith", false)),
            Operator::EndsWith => Some(("EndsWith", false)),
            Operator::Contains => Some(("Contains", false)),
            Operator::DoesNotStartWith => Some(("StartsWith", true)),
            Operator::DoesNotEndWith => Some(("EndsWith", true)),
            Operator::DoesNotContain => Some(("Contains", true)),
            _ => None,
        }
    }
}

/// Comparison applied by a [`RangeCriterion`]. Bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RangeOperator {
    Between,
    NotBetween,
}

/// How a container combines with the container before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LogicalOperator {
    #[default]
    And,
    Or,
}

impl LogicalOperator {
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            LogicalOperator::And => "And",
            LogicalOperator::Or => "Or",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            SortDirection::Ascending => "ASC",
            SortDirection::Descending => "DESC",
        }
    }
}

/// A comparison of one field against one value (or a list for `In`/`NotIn`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SingleCriterion {
    /// Dotted member path, relative to the innermost collection element when
    /// `collection` is non-empty.
    pub field: String,
    pub operator: Operator,
    #[serde(default)]
    pub value: Value,
    /// Owning collection paths, outermost first. Each level adds "any element
    /// matches" semantics and is resolved against an element of the level before it.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub collection: Vec<String>,
    #[serde(default)]
    pub kind: FieldKind,
}

impl SingleCriterion {
    pub fn new(field: impl Into<String>, operator: Operator, value: Value) -> Self {
        Self {
            field: field.into(),
            operator,
            value,
            collection: Vec::new(),
            kind: FieldKind::Other,
        }
    }

    #[inline]
    pub fn with_kind(mut self, kind: FieldKind) -> Self {
        self.kind = kind;
        self
    }

    /// Scope the criterion to elements of `collection`, nested inside any scope
    /// already set.
    #[inline]
    pub fn within(mut self, collection: impl Into<String>) -> Self {
        self.collection.push(collection.into());
        self
    }
}

/// An inclusive range comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeCriterion {
    pub field: String,
    pub operator: RangeOperator,
    pub start: Value,
    pub end: Value,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub collection: Vec<String>,
}

impl RangeCriterion {
    pub fn new(field: impl Into<String>, operator: RangeOperator, start: Value, end: Value) -> Self {
        Self {
            field: field.into(),
            operator,
            start,
            end,
            collection: Vec::new(),
        }
    }

    /// Scope the criterion to elements of `collection`, nested inside any scope
    /// already set.
    #[inline]
    pub fn within(mut self, collection: impl Into<String>) -> Self {
        self.collection.push(collection.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortCriterion {
    pub field: String,
    #[serde(default)]
    pub direction: SortDirection,
}

/// One element of a filter expression.
///
/// Exactly one of `single`, `range` and `group` must be populated; the compiler rejects
/// any other shape. `logic` joins this container to the previous one in its list and is
/// ignored for the first container.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CriteriaContainer {
    #[serde(default)]
    pub logic: LogicalOperator,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub single: Option<SingleCriterion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<RangeCriterion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<Vec<CriteriaContainer>>,
}

impl CriteriaContainer {
    pub fn single(logic: LogicalOperator, criterion: SingleCriterion) -> Self {
        Self {
            logic,
            single: Some(criterion),
            ..Self::default()
        }
    }

    pub fn range(logic: LogicalOperator, criterion: RangeCriterion) -> Self {
        Self {
            logic,
            range: Some(criterion),
            ..Self::default()
        }
    }

    pub fn group(logic: LogicalOperator, containers: Vec<CriteriaContainer>) -> Self {
        Self {
            logic,
            group: Some(containers),
            ..Self::default()
        }
    }

    /// Number of payload slots holding a value.
    pub fn populated_slots(&self) -> usize {
        usize::from(self.single.is_some()) + usize::from(self.range.is_some()) + usize::from(self.group.is_some())
    }
}
