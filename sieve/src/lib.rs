//! sieve: typed query specifications compiled to dynamic predicate text.
//!
//! Callers describe filtering, pre-filtering, sorting and paging with a statically
//! typed builder. The criteria compile to a textual predicate with positional
//! parameters and a textual ordering clause, which a [`Searcher`] hands to any
//! [`Queryable`] source. [`MemoryQuery`] evaluates them over in-memory slices.
//!
//! ```text
//! #[derive(Clone, Searchable)]
//! struct Sample {
//!     int_property: Option<i32>,
//!     byte_property: Option<u8>,
//! }
//!
//! let mut definition = SearchDefinition::<Sample>::new();
//! definition
//!     .filter_mut()
//!     .where_(Sample::INT_PROPERTY).is_equal_to(1)
//!     .and(Sample::BYTE_PROPERTY).greater_than(100);
//! let result = Searcher::new().search_slice(Some(&definition), &rows)?;
//! ```

extern crate self as sieve;

pub mod builder;
pub mod compile;
pub mod config;
pub mod criteria;
pub mod errors;
pub mod eval;
pub mod search;
pub mod value;

pub use builder::{Condition, Field, Searchable};
pub use compile::{Dialect, Predicate, PredicateCompiler, compile_filter, compile_sort};
pub use config::SearchConfig;
pub use criteria::{
    CriteriaContainer, FilterCriteria, LogicalOperator, Operator, RangeCriterion, RangeOperator, SingleCriterion,
    SortCriteria, SortCriterion, SortDirection,
};
pub use errors::SearchError;
pub use eval::{Member, MemoryQuery, Record, evaluate};
pub use search::{Queryable, SearchDefinition, SearchResult, Searcher};
pub use sieve_macros::Searchable;
pub use value::{Boolean, FieldKind, FieldValue, Orderable, Textual, Value};
