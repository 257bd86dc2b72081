use std::cmp::Ordering;

use super::Record;
use super::interpreter::Interpreter;
use super::parser::{OrderingKey, parse_ordering};
use crate::criteria::SortDirection;
use crate::errors::SearchError;
use crate::value::Value;

/// Stable multi-key sort of `rows` by an ordering clause such as `a ASC, b.c DESC`.
///
/// Keys are resolved once per row before sorting. Nulls come after every value when
/// ascending and before every value when descending. NaN sorts above every number and
/// below null. Values of mismatched kinds tie.
pub(crate) fn sort_rows<T: Record>(rows: &mut Vec<&T>, clause: &str) -> Result<(), SearchError> {
    let keys = parse_ordering(clause)?;
    let interpreter = Interpreter::new(&[]);

    let mut keyed = Vec::with_capacity(rows.len());
    for row in rows.drain(..) {
        let mut values = Vec::with_capacity(keys.len());
        for key in &keys {
            values.push(interpreter.value(&key.expr, row)?);
        }
        keyed.push((values, row));
    }

    keyed.sort_by(|(a, _), (b, _)| compare_keyed(&keys, a, b));
    rows.extend(keyed.into_iter().map(|(_, row)| row));
    Ok(())
}

fn compare_keyed(keys: &[OrderingKey], a: &[Value], b: &[Value]) -> Ordering {
    for ((key, left), right) in keys.iter().zip(a).zip(b) {
        let ordering = compare_values(left, right, key.direction);
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}

pub(crate) fn compare_values(left: &Value, right: &Value, direction: SortDirection) -> Ordering {
    let ordering = match (left.is_null(), right.is_null()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => left
            .compare(right)
            .unwrap_or_else(|| left.is_nan().cmp(&right.is_nan())),
    };
    match direction {
        SortDirection::Ascending => ordering,
        SortDirection::Descending => ordering.reverse(),
    }
}
