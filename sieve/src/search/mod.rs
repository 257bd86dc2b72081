//! # Search orchestration
//!
//! A [`Searcher`] runs one [`SearchDefinition`] against a [`Queryable`] source in a fixed
//! order of stages:
//!
//! | Stage        | Applied when                         | Produces                      |
//! |--------------|--------------------------------------|-------------------------------|
//! | pre-filter   | pre-filter compiles to a predicate   | narrowed working set          |
//! | total count  | always                               | `total_record_count`          |
//! | filter       | filter compiles to a predicate       | narrowed working set          |
//! | filtered cnt | always                               | `filtered_record_count`       |
//! | sort         | filtered count > 0 and sort keys     | ordered working set           |
//! | page         | filtered count > 0, page *and* size  | `skip(page * size).take(size)`|
//! | materialize  | always                               | `result_set`                  |
//!
//! Each filter stage compiles with its own parameter list, so placeholders of the
//! pre-filter never leak into the main filter.
//!
//! ```text
//! let mut definition = SearchDefinition::<Sample>::new().with_page(0).with_page_size(50);
//! definition.filter_mut().where_(Sample::INT_PROPERTY).is_equal_to(1);
//! definition.sort_mut().ascending(Sample::BYTE_PROPERTY);
//! let result = Searcher::new().search_slice(Some(&definition), &rows)?;
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::compile::{self, Dialect};
use crate::config::SearchConfig;
use crate::criteria::{FilterCriteria, SortCriteria};
use crate::errors::SearchError;
use crate::eval::{MemoryQuery, Record};

/// A data source the orchestrator can narrow, count, order, page and materialize.
///
/// Every operation is fallible; errors raised by the source propagate to the caller
/// unchanged.
pub trait Queryable: Sized {
    type Item;

    /// Keep only the rows matching `predicate`.
    fn filter(self, predicate: &compile::Predicate) -> Result<Self, SearchError>;

    fn count(&self) -> Result<u64, SearchError>;

    /// Apply an ordering clause such as `a ASC, b DESC`.
    fn order_by(self, ordering: &str) -> Result<Self, SearchError>;

    fn skip(self, count: i64) -> Result<Self, SearchError>;

    fn take(self, count: i64) -> Result<Self, SearchError>;

    fn materialize(self) -> Result<Vec<Self::Item>, SearchError>;
}

/// Everything one search request asks for. Absent stages are no-ops.
#[derive(Serialize, Deserialize)]
#[serde(bound = "", default)]
pub struct SearchDefinition<R> {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
    pub sort: Option<SortCriteria<R>>,
    pub filter: Option<FilterCriteria<R>>,
    pub pre_filter: Option<FilterCriteria<R>>,
}

impl<R> SearchDefinition<R> {
    pub fn new() -> Self {
        Self {
            page: None,
            page_size: None,
            sort: None,
            filter: None,
            pre_filter: None,
        }
    }

    /// Zero-based page index.
    #[inline]
    pub fn with_page(mut self, page: i64) -> Self {
        self.page = Some(page);
        self
    }

    #[inline]
    pub fn with_page_size(mut self, page_size: i64) -> Self {
        self.page_size = Some(page_size);
        self
    }

    #[inline]
    pub fn with_filter(mut self, filter: FilterCriteria<R>) -> Self {
        self.filter = Some(filter);
        self
    }

    #[inline]
    pub fn with_pre_filter(mut self, pre_filter: FilterCriteria<R>) -> Self {
        self.pre_filter = Some(pre_filter);
        self
    }

    #[inline]
    pub fn with_sort(mut self, sort: SortCriteria<R>) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn filter_mut(&mut self) -> &mut FilterCriteria<R> {
        self.filter.get_or_insert_with(FilterCriteria::new)
    }

    pub fn pre_filter_mut(&mut self) -> &mut FilterCriteria<R> {
        self.pre_filter.get_or_insert_with(FilterCriteria::new)
    }

    pub fn sort_mut(&mut self) -> &mut SortCriteria<R> {
        self.sort.get_or_insert_with(SortCriteria::new)
    }

    /// Skip/take window, present only when both page and page size are set.
    pub fn window(&self) -> Option<(i64, i64)> {
        match (self.page, self.page_size) {
            (Some(page), Some(size)) => Some((page.wrapping_mul(size), size)),
            _ => None,
        }
    }
}

impl<R> Default for SearchDefinition<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> Clone for SearchDefinition<R> {
    fn clone(&self) -> Self {
        Self {
            page: self.page,
            page_size: self.page_size,
            sort: self.sort.clone(),
            filter: self.filter.clone(),
            pre_filter: self.pre_filter.clone(),
        }
    }
}

impl<R> fmt::Debug for SearchDefinition<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchDefinition")
            .field("page", &self.page)
            .field("page_size", &self.page_size)
            .field("sort", &self.sort)
            .field("filter", &self.filter)
            .field("pre_filter", &self.pre_filter)
            .finish()
    }
}

/// Outcome of [`Searcher::search`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult<T> {
    /// Echoed from the definition.
    pub page: Option<i64>,
    /// Echoed from the definition.
    pub page_size: Option<i64>,
    /// Rows left after the pre-filter.
    pub total_record_count: u64,
    /// Rows left after the filter, before paging.
    pub filtered_record_count: u64,
    pub result_set: Vec<T>,
}

impl<T> SearchResult<T> {
    /// Whether rows exist past the returned page.
    pub fn has_more(&self) -> bool {
        match (self.page, self.page_size) {
            (Some(page), Some(size)) if page >= 0 && size > 0 => {
                let seen = (page as u64).saturating_add(1).saturating_mul(size as u64);
                seen < self.filtered_record_count
            }
            _ => false,
        }
    }
}

/// Compiles definitions and drives them through a [`Queryable`].
#[derive(Debug, Clone)]
pub struct Searcher {
    dialect: Dialect,
    log_predicates: bool,
}

impl Default for Searcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Searcher {
    pub fn new() -> Self {
        Self::with_config(&SearchConfig::default())
    }

    pub fn with_config(config: &SearchConfig) -> Self {
        Self {
            dialect: Dialect::from_config(config),
            log_predicates: config.log_predicates,
        }
    }

    #[inline]
    pub fn dialect(&self) -> &Dialect {
        &self.dialect
    }

    /// Run every stage and assemble the result envelope.
    pub fn search<R, Q>(&self, definition: Option<&SearchDefinition<R>>, source: Q) -> Result<SearchResult<R>, SearchError>
    where
        Q: Queryable<Item = R>,
    {
        let defaults = SearchDefinition::new();
        let definition = definition.unwrap_or(&defaults);

        let working = self.apply_filter("pre-filter", definition.pre_filter.as_ref(), source)?;
        let total_record_count = working.count()?;
        log::trace!("search: {total_record_count} record(s) after pre-filter");

        let mut working = self.apply_filter("filter", definition.filter.as_ref(), working)?;
        let filtered_record_count = working.count()?;
        log::trace!("search: {filtered_record_count} record(s) after filter");

        if filtered_record_count > 0 {
            if let Some(sort) = &definition.sort
                && let Some(ordering) = compile::compile_sort(&self.dialect, sort)?
            {
                if self.log_predicates {
                    log::debug!("sort: {ordering}");
                }
                working = working.order_by(&ordering)?;
            }

            if let Some((skip, take)) = definition.window() {
                log::trace!("search: skip {skip}, take {take}");
                working = working.skip(skip)?.take(take)?;
            }
        }

        Ok(SearchResult {
            page: definition.page,
            page_size: definition.page_size,
            total_record_count,
            filtered_record_count,
            result_set: working.materialize()?,
        })
    }

    /// Run the pre-filter and filter only. Sort and paging are ignored.
    pub fn filter<R, Q>(&self, definition: Option<&SearchDefinition<R>>, source: Q) -> Result<Vec<R>, SearchError>
    where
        Q: Queryable<Item = R>,
    {
        let Some(definition) = definition else {
            return source.materialize();
        };
        let working = self.apply_filter("pre-filter", definition.pre_filter.as_ref(), source)?;
        self.apply_filter("filter", definition.filter.as_ref(), working)?
            .materialize()
    }

    /// [`Searcher::search`] over an in-memory slice.
    pub fn search_slice<R>(&self, definition: Option<&SearchDefinition<R>>, rows: &[R]) -> Result<SearchResult<R>, SearchError>
    where
        R: Record + Clone,
    {
        self.search(definition, MemoryQuery::new(rows))
    }

    /// [`Searcher::filter`] over an in-memory slice.
    pub fn filter_slice<R>(&self, definition: Option<&SearchDefinition<R>>, rows: &[R]) -> Result<Vec<R>, SearchError>
    where
        R: Record + Clone,
    {
        self.filter(definition, MemoryQuery::new(rows))
    }

    fn apply_filter<R, Q>(&self, stage: &str, criteria: Option<&FilterCriteria<R>>, source: Q) -> Result<Q, SearchError>
    where
        Q: Queryable,
    {
        let Some(criteria) = criteria else {
            return Ok(source);
        };
        // fresh compiler per stage: parameter lists never carry over
        let Some(predicate) = compile::compile_filter(&self.dialect, criteria)? else {
            return Ok(source);
        };
        if self.log_predicates {
            log::debug!("{stage}: {predicate} ({} parameter(s))", predicate.parameters().len());
        }
        source.filter(&predicate)
    }
}
