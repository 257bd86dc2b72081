//! Runtime values bound as predicate parameters and produced by record members.
//!
//! [`Value`] is the currency shared by the compiler (which binds every literal as a
//! parameter) and the evaluator (which resolves record members into values). The
//! [`FieldValue`] family of traits maps Rust field types onto it and decides which
//! builder operations a field type exposes.

use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A dynamically typed value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Text(String),
    Uuid(Uuid),
    DateTime(DateTime<Utc>),
    Date(NaiveDate),
    List(Vec<Value>),
}

impl Value {
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Short name of the value kind, used in error messages.
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) | Value::UInt(_) | Value::Float(_) => "number",
            Value::Text(_) => "text",
            Value::Uuid(_) => "uuid",
            Value::DateTime(_) => "datetime",
            Value::Date(_) => "date",
            Value::List(_) => "list",
        }
    }

    /// Whether this is a float NaN.
    pub fn is_nan(&self) -> bool {
        matches!(self, Value::Float(n) if n.is_nan())
    }

    const fn is_number(&self) -> bool {
        matches!(self, Value::Int(_) | Value::UInt(_) | Value::Float(_))
    }

    /// Whether two non-null values belong to kinds that can be compared.
    pub fn comparable_with(&self, other: &Value) -> bool {
        if self.is_number() && other.is_number() {
            return true;
        }
        std::mem::discriminant(self) == std::mem::discriminant(other) && !matches!(self, Value::List(_))
    }

    /// Compares two non-null values.
    ///
    /// Numbers compare across integer and float representations. Returns `None` when
    /// the kinds differ or a float comparison involves NaN.
    pub fn compare(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
            (Value::UInt(a), Value::UInt(b)) => Some(a.cmp(b)),
            (Value::Int(a), Value::UInt(b)) => Some(compare_signed_unsigned(*a, *b)),
            (Value::UInt(a), Value::Int(b)) => Some(compare_signed_unsigned(*b, *a).reverse()),
            (a, b) if a.is_number() && b.is_number() => a.to_f64()?.partial_cmp(&b.to_f64()?),
            (Value::Text(a), Value::Text(b)) => Some(a.cmp(b)),
            (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
            (Value::Uuid(a), Value::Uuid(b)) => Some(a.cmp(b)),
            (Value::DateTime(a), Value::DateTime(b)) => Some(a.cmp(b)),
            (Value::Date(a), Value::Date(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }

    fn to_f64(&self) -> Option<f64> {
        match self {
            Value::Int(n) => Some(*n as f64),
            Value::UInt(n) => Some(*n as f64),
            Value::Float(n) => Some(*n),
            _ => None,
        }
    }
}

fn compare_signed_unsigned(signed: i64, unsigned: u64) -> Ordering {
    if signed < 0 {
        Ordering::Less
    } else {
        (signed as u64).cmp(&unsigned)
    }
}

/// Textual rendering used by the evaluator's `ToString()`. Null renders as an empty string.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::UInt(n) => write!(f, "{n}"),
            Value::Float(n) => write!(f, "{n}"),
            Value::Text(s) => f.write_str(s),
            Value::Uuid(id) => write!(f, "{id}"),
            Value::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
            Value::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Value::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                Ok(())
            }
        }
    }
}

/// How the predicate compiler renders pattern operators against a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// A true string field: null is coalesced to an empty string before matching.
    Text,
    /// Any other field: matched against its textual rendering.
    #[default]
    Other,
}

/// A Rust type usable as a filterable field.
///
/// Every implementor supports equality and membership. The marker traits
/// [`Orderable`], [`Textual`] and [`Boolean`] unlock the remaining operations.
pub trait FieldValue {
    /// The type callers pass when comparing against this field.
    type Operand;

    const KIND: FieldKind = FieldKind::Other;

    fn operand_value(operand: Self::Operand) -> Value;

    fn to_value(&self) -> Value;
}

/// Field types supporting `>`, `>=`, `<`, `<=` and range conditions.
pub trait Orderable: FieldValue {}

/// Field types supporting substring-style matching on their textual form.
pub trait Textual: FieldValue {}

/// Field types supporting `is_true` / `is_false`.
pub trait Boolean: FieldValue {}

macro_rules! impl_field_value {
    ($variant:ident as $repr:ty => $($ty:ty),+ $(,)?) => {
        $(
            impl FieldValue for $ty {
                type Operand = $ty;

                #[inline]
                fn operand_value(operand: $ty) -> Value {
                    Value::$variant(operand as $repr)
                }

                #[inline]
                fn to_value(&self) -> Value {
                    Value::$variant(*self as $repr)
                }
            }

            impl Orderable for $ty {}
            impl Textual for $ty {}
        )+
    };
}

impl_field_value!(Int as i64 => i8, i16, i32, i64, isize);
impl_field_value!(UInt as u64 => u8, u16, u32, u64, usize);
impl_field_value!(Float as f64 => f64);

/// Widen through the shortest decimal form, so `1.1f32` becomes `1.1` rather than
/// `1.100000023841858` and renders the same way as text.
fn widen_f32(value: f32) -> Value {
    Value::Float(value.to_string().parse().unwrap_or(f64::from(value)))
}

impl FieldValue for f32 {
    type Operand = f32;

    fn operand_value(operand: f32) -> Value {
        widen_f32(operand)
    }

    fn to_value(&self) -> Value {
        widen_f32(*self)
    }
}

impl Orderable for f32 {}
impl Textual for f32 {}

impl FieldValue for bool {
    type Operand = bool;

    fn operand_value(operand: bool) -> Value {
        Value::Bool(operand)
    }

    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }
}

impl Boolean for bool {}

impl FieldValue for String {
    type Operand = String;

    const KIND: FieldKind = FieldKind::Text;

    fn operand_value(operand: String) -> Value {
        Value::Text(operand)
    }

    fn to_value(&self) -> Value {
        Value::Text(self.clone())
    }
}

impl Textual for String {}

impl FieldValue for Uuid {
    type Operand = Uuid;

    fn operand_value(operand: Uuid) -> Value {
        Value::Uuid(operand)
    }

    fn to_value(&self) -> Value {
        Value::Uuid(*self)
    }
}

impl FieldValue for DateTime<Utc> {
    type Operand = DateTime<Utc>;

    fn operand_value(operand: DateTime<Utc>) -> Value {
        Value::DateTime(operand)
    }

    fn to_value(&self) -> Value {
        Value::DateTime(*self)
    }
}

impl Orderable for DateTime<Utc> {}
impl Textual for DateTime<Utc> {}

impl FieldValue for NaiveDate {
    type Operand = NaiveDate;

    fn operand_value(operand: NaiveDate) -> Value {
        Value::Date(operand)
    }

    fn to_value(&self) -> Value {
        Value::Date(*self)
    }
}

impl Orderable for NaiveDate {}
impl Textual for NaiveDate {}

impl<T: FieldValue> FieldValue for Option<T> {
    type Operand = T::Operand;

    const KIND: FieldKind = T::KIND;

    fn operand_value(operand: T::Operand) -> Value {
        T::operand_value(operand)
    }

    fn to_value(&self) -> Value {
        match self {
            Some(inner) => inner.to_value(),
            None => Value::Null,
        }
    }
}

impl<T: Orderable> Orderable for Option<T> {}
impl<T: Textual> Textual for Option<T> {}
impl<T: Boolean> Boolean for Option<T> {}
