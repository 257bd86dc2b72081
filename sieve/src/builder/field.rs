use std::borrow::Cow;
use std::fmt;
use std::marker::PhantomData;

use crate::eval::Record;

/// Marker for record types that expose typed field accessors.
///
/// Implemented by `#[derive(Searchable)]` alongside [`Record`].
pub trait Searchable: Record {}

/// A typed accessor for a member of `R` whose Rust type is `T`.
///
/// The derive macro emits one associated const per field:
///
/// ```text
/// #[derive(Searchable)]
/// struct Order {
///     total: u32,
///     #[sieve(nested)]
///     customer: Customer,
/// }
///
/// Order::TOTAL                          // Field<Order, u32>, path "total"
/// Order::CUSTOMER.then(Customer::NAME)  // Field<Order, String>, path "customer.name"
/// ```
pub struct Field<R, T> {
    path: Cow<'static, str>,
    marker: PhantomData<fn() -> (R, T)>,
}

impl<R, T> Field<R, T> {
    pub const fn new(path: &'static str) -> Self {
        Self {
            path: Cow::Borrowed(path),
            marker: PhantomData,
        }
    }

    /// Accessor for a runtime-built path. The path is validated when compiled.
    pub fn from_path(path: impl Into<String>) -> Self {
        Self {
            path: Cow::Owned(path.into()),
            marker: PhantomData,
        }
    }

    #[inline]
    pub fn path(&self) -> &str {
        &self.path
    }

    pub(crate) fn into_path(self) -> String {
        self.path.into_owned()
    }
}

impl<R, T: Searchable> Field<R, T> {
    /// Navigate into a nested record.
    pub fn then<U>(self, next: Field<T, U>) -> Field<R, U> {
        Field::from_path(format!("{}.{}", self.path, next.path))
    }
}

impl<R, T> Clone for Field<R, T> {
    fn clone(&self) -> Self {
        Self {
            path: self.path.clone(),
            marker: PhantomData,
        }
    }
}

impl<R, T> fmt::Debug for Field<R, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Field").field(&self.path).finish()
    }
}

impl<R, T> fmt::Display for Field<R, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}
