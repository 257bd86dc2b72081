use super::Record;
use super::interpreter::Interpreter;
use super::ordering::sort_rows;
use super::parser::parse_predicate;
use crate::compile::Predicate;
use crate::errors::SearchError;
use crate::search::Queryable;

/// A [`Queryable`] over a borrowed slice, evaluated in memory.
///
/// Rows are held by reference until [`Queryable::materialize`] clones the survivors.
#[derive(Debug)]
pub struct MemoryQuery<'a, T> {
    rows: Vec<&'a T>,
}

impl<'a, T> MemoryQuery<'a, T> {
    pub fn new(source: &'a [T]) -> Self {
        Self {
            rows: source.iter().collect(),
        }
    }

    #[inline]
    pub fn rows(&self) -> &[&'a T] {
        &self.rows
    }
}

impl<'a, T> Clone for MemoryQuery<'a, T> {
    fn clone(&self) -> Self {
        Self { rows: self.rows.clone() }
    }
}

impl<'a, T: Record + Clone> Queryable for MemoryQuery<'a, T> {
    type Item = T;

    fn filter(mut self, predicate: &Predicate) -> Result<Self, SearchError> {
        let expr = parse_predicate(predicate.text())?;
        let interpreter = Interpreter::new(predicate.parameters());
        let mut kept = Vec::with_capacity(self.rows.len());
        for row in self.rows {
            if interpreter.matches(&expr, row)? {
                kept.push(row);
            }
        }
        self.rows = kept;
        Ok(self)
    }

    fn count(&self) -> Result<u64, SearchError> {
        Ok(self.rows.len() as u64)
    }

    fn order_by(mut self, ordering: &str) -> Result<Self, SearchError> {
        sort_rows(&mut self.rows, ordering)?;
        Ok(self)
    }

    /// A negative count skips nothing.
    fn skip(mut self, count: i64) -> Result<Self, SearchError> {
        let count = usize::try_from(count).unwrap_or(0).min(self.rows.len());
        self.rows.drain(..count);
        Ok(self)
    }

    /// A negative count takes nothing.
    fn take(mut self, count: i64) -> Result<Self, SearchError> {
        let count = usize::try_from(count).unwrap_or(0);
        self.rows.truncate(count);
        Ok(self)
    }

    fn materialize(self) -> Result<Vec<T>, SearchError> {
        Ok(self.rows.into_iter().cloned().collect())
    }
}
