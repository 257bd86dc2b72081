//! Compilation of criteria into predicate and ordering text.

pub mod dialect;
pub mod predicate;
pub mod sort;

pub use dialect::Dialect;
pub use predicate::{Predicate, PredicateCompiler};

use crate::criteria::{FilterCriteria, SortCriteria};
use crate::errors::SearchError;

/// Compile filter criteria with a fresh parameter list.
pub fn compile_filter<R>(dialect: &Dialect, criteria: &FilterCriteria<R>) -> Result<Option<Predicate>, SearchError> {
    PredicateCompiler::new(dialect).compile(criteria.containers())
}

pub fn compile_sort<R>(dialect: &Dialect, criteria: &SortCriteria<R>) -> Result<Option<String>, SearchError> {
    sort::compile_ordering(dialect, criteria.items())
}
