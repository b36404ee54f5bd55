//! Derive macros for pgmodel
//!
//! Provides `#[derive(Model)]` and `#[derive(Query)]`, which check field annotations at
//! compile time and expose column metadata.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod common;
mod model;
mod query;

/// Validate `#[model = "dbname,dbtype"]` annotations.
///
/// # Example
///
/// ```ignore
/// use pgmodel::Model;
///
/// #[derive(Model, Default)]
/// struct User {
///     #[model = "id,BIGINT PRIMARY KEY"]
///     id: i64,
///     #[model = "name,TEXT"]
///     name: String,
///     cached: Option<String>,
/// }
///
/// assert_eq!(User::COLUMNS, &["id", "name"]);
/// assert_eq!(User::PRIMARY_KEY, "id");
/// ```
///
/// # Generated
///
/// - `COLUMNS: &'static [&'static str]` - Column names in declaration order
/// - `PRIMARY_KEY: &'static str` - Primary key column
#[proc_macro_derive(Model, attributes(model))]
pub fn derive_model(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    model::expand(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}

/// Validate `#[query = "dbname[,mode[,cond]][;mode...]"]` annotations.
///
/// Mode names and clause arity are checked here. Whether each column exists on the model is
/// checked when the data-access module is generated.
///
/// # Generated
///
/// - `COLUMNS: &'static [&'static str]` - Projected column names in declaration order
#[proc_macro_derive(Query, attributes(query))]
pub fn derive_query(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    query::expand(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
