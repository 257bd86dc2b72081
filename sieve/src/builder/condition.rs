use std::marker::PhantomData;

use super::field::{Field, Searchable};
use crate::criteria::{
    CriteriaContainer, FilterCriteria, LogicalOperator, Operator, RangeCriterion, RangeOperator, SingleCriterion,
    SortCriteria, SortDirection,
};
use crate::value::{Boolean, FieldKind, FieldValue, Orderable, Textual, Value};

/// A pending condition on one field, waiting for its terminal operation.
///
/// Which operations are available depends on the field type `T`:
/// every [`FieldValue`] gets equality and membership, [`Orderable`] types add
/// comparisons and ranges, [`Textual`] types add pattern matching, [`Boolean`]
/// types add `is_true`/`is_false`, `Option<_>` adds null checks and `Vec<C>` of a
/// [`Searchable`] element offers [`Condition::property`].
///
/// Every terminal call appends exactly one container and hands back the criteria
/// so the chain can continue with `.and(...)` / `.or(...)`.
#[must_use = "a condition does nothing until a terminal operation is called"]
pub struct Condition<'a, R, T> {
    criteria: &'a mut FilterCriteria<R>,
    field: String,
    collection: Vec<String>,
    logic: LogicalOperator,
    marker: PhantomData<fn() -> T>,
}

impl<'a, R, T> Condition<'a, R, T> {
    fn new(criteria: &'a mut FilterCriteria<R>, field: String, logic: LogicalOperator) -> Self {
        Self {
            criteria,
            field,
            collection: Vec::new(),
            logic,
            marker: PhantomData,
        }
    }

    fn push_single(self, operator: Operator, value: Value, kind: FieldKind) -> &'a mut FilterCriteria<R> {
        let Self {
            criteria,
            field,
            collection,
            logic,
            ..
        } = self;
        let mut criterion = SingleCriterion::new(field, operator, value).with_kind(kind);
        criterion.collection = collection;
        criteria.push(CriteriaContainer::single(logic, criterion))
    }

    fn push_range(self, operator: RangeOperator, start: Value, end: Value) -> &'a mut FilterCriteria<R> {
        let Self {
            criteria,
            field,
            collection,
            logic,
            ..
        } = self;
        let mut criterion = RangeCriterion::new(field, operator, start, end);
        criterion.collection = collection;
        criteria.push(CriteriaContainer::range(logic, criterion))
    }
}

impl<'a, R, T: FieldValue> Condition<'a, R, T> {
    fn compare(self, operator: Operator, operand: T::Operand) -> &'a mut FilterCriteria<R> {
        self.push_single(operator, T::operand_value(operand), T::KIND)
    }

    fn membership<I>(self, operator: Operator, operands: I) -> &'a mut FilterCriteria<R>
    where
        I: IntoIterator<Item = T::Operand>,
    {
        let values = operands.into_iter().map(T::operand_value).collect();
        self.push_single(operator, Value::List(values), T::KIND)
    }

    pub fn is_equal_to(self, value: T::Operand) -> &'a mut FilterCriteria<R> {
        self.compare(Operator::Equals, value)
    }

    pub fn is_not_equal_to(self, value: T::Operand) -> &'a mut FilterCriteria<R> {
        self.compare(Operator::NotEquals, value)
    }

    pub fn is_in<I>(self, values: I) -> &'a mut FilterCriteria<R>
    where
        I: IntoIterator<Item = T::Operand>,
    {
        self.membership(Operator::In, values)
    }

    pub fn is_not_in<I>(self, values: I) -> &'a mut FilterCriteria<R>
    where
        I: IntoIterator<Item = T::Operand>,
    {
        self.membership(Operator::NotIn, values)
    }
}

impl<'a, R, T: Orderable> Condition<'a, R, T> {
    pub fn greater_than(self, value: T::Operand) -> &'a mut FilterCriteria<R> {
        self.compare(Operator::GreaterThan, value)
    }

    pub fn greater_than_or_equal_to(self, value: T::Operand) -> &'a mut FilterCriteria<R> {
        self.compare(Operator::GreaterThanOrEqualTo, value)
    }

    pub fn less_than(self, value: T::Operand) -> &'a mut FilterCriteria<R> {
        self.compare(Operator::LessThan, value)
    }

    pub fn less_than_or_equal_to(self, value: T::Operand) -> &'a mut FilterCriteria<R> {
        self.compare(Operator::LessThanOrEqualTo, value)
    }

    /// Inclusive on both ends.
    pub fn between(self, start: T::Operand, end: T::Operand) -> &'a mut FilterCriteria<R> {
        self.push_range(RangeOperator::Between, T::operand_value(start), T::operand_value(end))
    }

    pub fn not_between(self, start: T::Operand, end: T::Operand) -> &'a mut FilterCriteria<R> {
        self.push_range(RangeOperator::NotBetween, T::operand_value(start), T::operand_value(end))
    }
}

impl<'a, R, T: Textual> Condition<'a, R, T> {
    fn pattern(self, operator: Operator, pattern: impl Into<String>) -> &'a mut FilterCriteria<R> {
        self.push_single(operator, Value::Text(pattern.into()), T::KIND)
    }

    pub fn contains(self, pattern: impl Into<String>) -> &'a mut FilterCriteria<R> {
        self.pattern(Operator::Contains, pattern)
    }

    pub fn starts_with(self, pattern: impl Into<String>) -> &'a mut FilterCriteria<R> {
        self.pattern(Operator::StartsWith, pattern)
    }

    pub fn ends_with(self, pattern: impl Into<String>) -> &'a mut FilterCriteria<R> {
        self.pattern(Operator::EndsWith, pattern)
    }

    pub fn does_not_contain(self, pattern: impl Into<String>) -> &'a mut FilterCriteria<R> {
        self.pattern(Operator::DoesNotContain, pattern)
    }

    pub fn does_not_start_with(self, pattern: impl Into<String>) -> &'a mut FilterCriteria<R> {
        self.pattern(Operator::DoesNotStartWith, pattern)
    }

    pub fn does_not_end_with(self, pattern: impl Into<String>) -> &'a mut FilterCriteria<R> {
        self.pattern(Operator::DoesNotEndWith, pattern)
    }
}

impl<'a, R, T: Boolean> Condition<'a, R, T> {
    pub fn is_true(self) -> &'a mut FilterCriteria<R> {
        self.push_single(Operator::Equals, Value::Bool(true), T::KIND)
    }

    pub fn is_false(self) -> &'a mut FilterCriteria<R> {
        self.push_single(Operator::Equals, Value::Bool(false), T::KIND)
    }
}

impl<'a, R, T: FieldValue> Condition<'a, R, Option<T>> {
    pub fn is_null(self) -> &'a mut FilterCriteria<R> {
        self.push_single(Operator::IsNull, Value::Null, T::KIND)
    }

    pub fn is_not_null(self) -> &'a mut FilterCriteria<R> {
        self.push_single(Operator::IsNotNull, Value::Null, T::KIND)
    }
}

impl<'a, R, C: Searchable> Condition<'a, R, Vec<C>> {
    /// Re-scope the condition to a member of the collection's elements.
    ///
    /// The resulting criterion holds when at least one element satisfies it. Scopes
    /// compose: a second `property` on a nested collection matches elements of
    /// elements.
    pub fn property<U>(self, field: Field<C, U>) -> Condition<'a, R, U> {
        let Self {
            criteria,
            field: owner,
            mut collection,
            logic,
            ..
        } = self;
        collection.push(owner);
        Condition {
            criteria,
            field: field.into_path(),
            collection,
            logic,
            marker: PhantomData,
        }
    }
}

impl<R> FilterCriteria<R> {
    /// Build criteria in one expression.
    pub fn build(configure: impl FnOnce(&mut Self)) -> Self {
        let mut criteria = Self::new();
        configure(&mut criteria);
        criteria
    }

    /// Start a condition. The connective is never rendered for the first container.
    pub fn where_<T>(&mut self, field: Field<R, T>) -> Condition<'_, R, T> {
        Condition::new(self, field.into_path(), LogicalOperator::And)
    }

    pub fn and<T>(&mut self, field: Field<R, T>) -> Condition<'_, R, T> {
        Condition::new(self, field.into_path(), LogicalOperator::And)
    }

    pub fn or<T>(&mut self, field: Field<R, T>) -> Condition<'_, R, T> {
        Condition::new(self, field.into_path(), LogicalOperator::Or)
    }

    /// Append a parenthesized sub-expression built by `configure`.
    pub fn where_group(&mut self, configure: impl FnOnce(&mut Self)) -> &mut Self {
        self.push_group(LogicalOperator::And, Self::build(configure))
    }

    pub fn and_group(&mut self, configure: impl FnOnce(&mut Self)) -> &mut Self {
        self.push_group(LogicalOperator::And, Self::build(configure))
    }

    pub fn or_group(&mut self, configure: impl FnOnce(&mut Self)) -> &mut Self {
        self.push_group(LogicalOperator::Or, Self::build(configure))
    }

    /// Append previously built criteria as a parenthesized sub-expression.
    pub fn and_criteria(&mut self, criteria: FilterCriteria<R>) -> &mut Self {
        self.push_group(LogicalOperator::And, criteria)
    }

    pub fn or_criteria(&mut self, criteria: FilterCriteria<R>) -> &mut Self {
        self.push_group(LogicalOperator::Or, criteria)
    }

    fn push_group(&mut self, logic: LogicalOperator, criteria: FilterCriteria<R>) -> &mut Self {
        self.push(CriteriaContainer::group(logic, criteria.into_containers()))
    }
}

impl<R> SortCriteria<R> {
    pub fn by<T>(&mut self, field: Field<R, T>, direction: SortDirection) -> &mut Self {
        self.push(field.into_path(), direction)
    }

    pub fn ascending<T>(&mut self, field: Field<R, T>) -> &mut Self {
        self.by(field, SortDirection::Ascending)
    }

    pub fn descending<T>(&mut self, field: Field<R, T>) -> &mut Self {
        self.by(field, SortDirection::Descending)
    }
}
