//! Fluent, statically typed construction of filter and sort criteria.
//!
//! ```text
//! let mut filter = FilterCriteria::<Sample>::new();
//! filter
//!     .where_(Sample::INT_PROPERTY).is_equal_to(1)
//!     .and(Sample::STRING_PROPERTY).starts_with("ab")
//!     .or_group(|g| {
//!         g.where_(Sample::CHILDREN).property(Child::AMOUNT).between(10, 20);
//!     });
//! ```

mod condition;
mod field;

pub use condition::Condition;
pub use field::{Field, Searchable};
