//! Query derive macro implementation

use crate::common::{annotated, spec_error};
use pgmodel_codegen::{QUERY_KEY, SpecError, parse_query_annotation};
use proc_macro2::TokenStream;
use quote::quote;
use syn::{DeriveInput, Result};

pub fn expand(input: DeriveInput) -> Result<TokenStream> {
    let parsed = annotated(&input, QUERY_KEY, "Query")?;

    let mut columns = Vec::with_capacity(parsed.fields.len());
    let mut directives = 0;
    for field in &parsed.fields {
        let annotation = parse_query_annotation(&parsed.ident, &field.name, &field.annotation)
            .map_err(|e| spec_error(&input, e))?;
        directives += annotation.clauses.len();
        columns.push(annotation.db_name);
    }
    if directives == 0 {
        return Err(spec_error(
            &input,
            SpecError::NoDirectives {
                query: parsed.ident,
            },
        ));
    }

    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics #name #ty_generics #where_clause {
            /// Projected column names in declaration order.
            pub const COLUMNS: &'static [&'static str] = &[#(#columns),*];
        }
    })
}
