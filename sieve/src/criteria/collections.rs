use std::fmt;
use std::marker::PhantomData;

use serde::{Deserialize, Serialize};

use super::model::{CriteriaContainer, SortCriterion, SortDirection};

/// An ordered filter expression over records of type `R`.
///
/// Containers combine left to right using each container's [`super::LogicalOperator`].
/// Build one through the fluent API in
/// [`crate::builder`]; the record type parameter keeps fields of other records out.
#[derive(Serialize, Deserialize)]
#[serde(bound = "")]
pub struct FilterCriteria<R> {
    containers: Vec<CriteriaContainer>,
    #[serde(skip)]
    marker: PhantomData<fn() -> R>,
}

impl<R> FilterCriteria<R> {
    pub fn new() -> Self {
        Self {
            containers: Vec::new(),
            marker: PhantomData,
        }
    }

    /// Wrap raw containers, e.g. ones deserialized from a request.
    pub fn from_containers(containers: Vec<CriteriaContainer>) -> Self {
        Self {
            containers,
            marker: PhantomData,
        }
    }

    #[inline]
    pub fn containers(&self) -> &[CriteriaContainer] {
        &self.containers
    }

    #[inline]
    pub fn into_containers(self) -> Vec<CriteriaContainer> {
        self.containers
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.containers.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.containers.len()
    }

    /// Append a container as-is.
    pub fn push(&mut self, container: CriteriaContainer) -> &mut Self {
        self.containers.push(container);
        self
    }
}

impl<R> Default for FilterCriteria<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> Clone for FilterCriteria<R> {
    fn clone(&self) -> Self {
        Self::from_containers(self.containers.clone())
    }
}

impl<R> PartialEq for FilterCriteria<R> {
    fn eq(&self, other: &Self) -> bool {
        self.containers == other.containers
    }
}

impl<R> fmt::Debug for FilterCriteria<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterCriteria").field("containers", &self.containers).finish()
    }
}

/// Ordered sort keys for records of type `R`.
///
/// Keys apply in insertion order. Adding a key for a field path that is already
/// present replaces its direction without moving it.
#[derive(Serialize, Deserialize)]
#[serde(bound = "")]
pub struct SortCriteria<R> {
    items: Vec<SortCriterion>,
    #[serde(skip)]
    marker: PhantomData<fn() -> R>,
}

impl<R> SortCriteria<R> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            marker: PhantomData,
        }
    }

    pub fn from_items(items: impl IntoIterator<Item = SortCriterion>) -> Self {
        let mut criteria = Self::new();
        for item in items {
            criteria.push(item.field, item.direction);
        }
        criteria
    }

    /// Add a key by raw path. Duplicate paths keep their first position.
    pub fn push(&mut self, field: impl Into<String>, direction: SortDirection) -> &mut Self {
        let field = field.into();
        match self.items.iter_mut().find(|item| item.field == field) {
            Some(existing) => existing.direction = direction,
            None => self.items.push(SortCriterion { field, direction }),
        }
        self
    }

    #[inline]
    pub fn items(&self) -> &[SortCriterion] {
        &self.items
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }
}

impl<R> Default for SortCriteria<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> Clone for SortCriteria<R> {
    fn clone(&self) -> Self {
        Self {
            items: self.items.clone(),
            marker: PhantomData,
        }
    }
}

impl<R> PartialEq for SortCriteria<R> {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl<R> fmt::Debug for SortCriteria<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SortCriteria").field("items", &self.items).finish()
    }
}
