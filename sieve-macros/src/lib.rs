use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod parsed;

use parsed::ParsedRecord;

/// Derive typed field accessors plus the runtime `Record` and `Searchable` impls.
///
/// ```text
/// #[derive(Clone, Searchable)]
/// struct Order {
///     total: u32,                    // Order::TOTAL: Field<Order, u32>
///     #[sieve(rename = "Note")]
///     note: Option<String>,          // Order::NOTE, path "Note"
///     #[sieve(nested)]
///     customer: Option<Customer>,    // Order::CUSTOMER: Field<Order, Customer>
///     #[sieve(collection)]
///     lines: Vec<OrderLine>,         // Order::LINES: Field<Order, Vec<OrderLine>>
///     #[sieve(skip)]
///     cache: Vec<u8>,
/// }
/// ```
#[proc_macro_derive(Searchable, attributes(sieve))]
pub fn derive_searchable(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match ParsedRecord::from_input(&input) {
        Ok(parsed) => parsed.emit().into(),
        Err(err) => err.to_compile_error().into(),
    }
}
