//! Criterion model and the criteria collections that hold it.

pub mod collections;
pub mod model;

pub use collections::{FilterCriteria, SortCriteria};
pub use model::{
    CriteriaContainer, LogicalOperator, Operator, RangeCriterion, RangeOperator, SingleCriterion, SortCriterion,
    SortDirection,
};
