//! Model derive macro implementation

use crate::common::{annotated, spec_error};
use pgmodel_codegen::{MODEL_KEY, compile_model};
use proc_macro2::TokenStream;
use quote::quote;
use syn::{DeriveInput, Result};

pub fn expand(input: DeriveInput) -> Result<TokenStream> {
    let parsed = annotated(&input, MODEL_KEY, "Model")?;
    let model = compile_model(&parsed).map_err(|e| spec_error(&input, e))?;

    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let columns = model.columns.iter().map(|c| c.db_name.as_str());
    let primary_key = model.primary_key.db_name.as_str();

    Ok(quote! {
        impl #impl_generics #name #ty_generics #where_clause {
            /// Column names in declaration order.
            pub const COLUMNS: &'static [&'static str] = &[#(#columns),*];
            /// Primary key column.
            pub const PRIMARY_KEY: &'static str = #primary_key;
        }
    })
}
