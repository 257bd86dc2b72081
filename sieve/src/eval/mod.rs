//! In-memory dynamic-expression evaluator.
//!
//! Parses the predicate and ordering text produced by [`crate::compile`] and applies
//! it to records implementing [`Record`]. [`MemoryQuery`] wraps a slice of records as a
//! [`crate::search::Queryable`] so a [`crate::search::Searcher`] can run against it.
//!
//! Null handling follows lifted comparison semantics: `null == null` holds, ordering
//! comparisons involving null are false, member access on null yields null and
//! `ToString()` of null is the empty string. Ordering places nulls after every value
//! when ascending and before every value when descending.

mod interpreter;
mod memory;
mod ordering;
mod parser;

pub use memory::MemoryQuery;

use crate::errors::SearchError;
use crate::value::Value;

/// A record whose members can be resolved by name at runtime.
///
/// Usually derived with `#[derive(Searchable)]`.
pub trait Record {
    /// Resolve one path segment. `None` means the member does not exist.
    fn member(&self, name: &str) -> Option<Member<'_>>;
}

/// A resolved record member.
pub enum Member<'a> {
    Value(Value),
    Record(&'a dyn Record),
    Records(Vec<&'a dyn Record>),
}

/// Evaluate predicate text against a single record.
pub fn evaluate(text: &str, parameters: &[Value], record: &dyn Record) -> Result<bool, SearchError> {
    let expr = parser::parse_predicate(text)?;
    interpreter::Interpreter::new(parameters).matches(&expr, record)
}
