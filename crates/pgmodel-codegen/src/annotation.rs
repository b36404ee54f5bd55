//! Annotation extraction.
//!
//! Walks a struct's fields and collects the text of one annotation key (`model` or
//! `query`) per field. Both attribute forms are accepted:
//!
//! ```ignore
//! #[model = "id,BIGINT PRIMARY KEY"]
//! #[model("id,BIGINT PRIMARY KEY")]
//! ```

use crate::error::{SpecError, SpecResult};
use proc_macro2::{Delimiter, Spacing, TokenStream, TokenTree};
use quote::ToTokens;
use syn::{Attribute, Expr, ExprLit, Fields, Item, Lit, LitStr, Meta};

/// Annotation key on model fields.
pub const MODEL_KEY: &str = "model";
/// Annotation key on query fields.
pub const QUERY_KEY: &str = "query";

/// An annotated field, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawField {
    /// Field identifier as written (may be a raw identifier such as `r#type`).
    pub name: String,
    /// Normalized field type.
    pub source_type: String,
    /// Annotation text.
    pub annotation: String,
}

/// Annotated fields of one struct.
#[derive(Debug, Clone)]
pub struct AnnotatedStruct {
    pub ident: String,
    pub fields: Vec<RawField>,
    /// At least one field carries no annotation, so generated constructors must fill the rest
    /// from `Default`.
    pub has_unannotated_fields: bool,
}

/// Parse a whole source file.
pub fn parse_source(source: &str) -> SpecResult<syn::File> {
    Ok(syn::parse_file(source)?)
}

/// Find a struct by identifier among top-level items and inline modules.
pub fn find_struct<'a>(file: &'a syn::File, ident: &str) -> SpecResult<&'a syn::ItemStruct> {
    find_in_items(&file.items, ident).ok_or_else(|| SpecError::StructNotFound {
        ident: ident.to_string(),
    })
}

fn find_in_items<'a>(items: &'a [Item], ident: &str) -> Option<&'a syn::ItemStruct> {
    for item in items {
        match item {
            Item::Struct(s) if s.ident == ident => return Some(s),
            Item::Mod(m) => {
                if let Some((_, inner)) = &m.content {
                    if let Some(found) = find_in_items(inner, ident) {
                        return Some(found);
                    }
                }
            }
            _ => {}
        }
    }
    None
}

/// Collect the fields of `item` carrying the `key` annotation, in declaration order.
pub fn collect_fields(item: &syn::ItemStruct, key: &str) -> SpecResult<AnnotatedStruct> {
    collect_from_fields(&item.ident.to_string(), &item.fields, key)
}

/// Same as [`collect_fields`] for anything that exposes `syn::Fields` (e.g. a derive input).
pub fn collect_from_fields(owner: &str, fields: &Fields, key: &str) -> SpecResult<AnnotatedStruct> {
    if matches!(fields, Fields::Unit) {
        return Err(SpecError::NoFields {
            ident: owner.to_string(),
        });
    }

    let mut out = Vec::new();
    let mut has_unannotated_fields = false;

    for (index, field) in fields.iter().enumerate() {
        let field_name = field
            .ident
            .as_ref()
            .map(|i| i.to_string())
            .unwrap_or_else(|| index.to_string());

        let Some(annotation) = annotation_value(owner, &field_name, &field.attrs, key)? else {
            has_unannotated_fields = true;
            continue;
        };

        let Some(ident) = &field.ident else {
            return Err(SpecError::UnnamedField {
                owner: owner.to_string(),
                index,
                key: key.to_string(),
            });
        };

        out.push(RawField {
            name: ident.to_string(),
            source_type: type_to_string(&field.ty),
            annotation,
        });
    }

    Ok(AnnotatedStruct {
        ident: owner.to_string(),
        fields: out,
        has_unannotated_fields,
    })
}

fn annotation_value(
    owner: &str,
    field: &str,
    attrs: &[Attribute],
    key: &str,
) -> SpecResult<Option<String>> {
    let mut found: Option<String> = None;

    for attr in attrs {
        if !attr.path().is_ident(key) {
            continue;
        }

        let invalid = || SpecError::InvalidAnnotation {
            owner: owner.to_string(),
            field: field.to_string(),
            key: key.to_string(),
        };

        let value = match &attr.meta {
            Meta::NameValue(nv) => match &nv.value {
                Expr::Lit(ExprLit {
                    lit: Lit::Str(lit), ..
                }) => lit.value(),
                _ => return Err(invalid()),
            },
            Meta::List(list) => syn::parse2::<LitStr>(list.tokens.clone())
                .map_err(|_| invalid())?
                .value(),
            Meta::Path(_) => return Err(invalid()),
        };

        if found.is_some() {
            return Err(SpecError::DuplicateAnnotation {
                owner: owner.to_string(),
                field: field.to_string(),
                key: key.to_string(),
            });
        }
        found = Some(value);
    }

    Ok(found)
}

/// Print a type the way it is usually written: `Vec<String>`, `[u8; 4]`,
/// `Box<dyn Fn(i32) -> i32 + Send>`.
///
/// Used for generated code and messages; compare types with [`same_type`].
pub fn type_to_string(ty: &syn::Type) -> String {
    let mut out = String::new();
    print_tokens(&mut out, ty.to_token_stream());
    out.truncate(out.trim_end().len());
    out
}

fn print_tokens(out: &mut String, tokens: TokenStream) {
    // Adjacent words need a separating space (`dyn Fn`, `&'a mut T`).
    let mut after_word = false;
    for tt in tokens {
        match tt {
            TokenTree::Ident(_) | TokenTree::Literal(_) => {
                if after_word {
                    out.push(' ');
                }
                out.push_str(&tt.to_string());
                after_word = true;
            }
            TokenTree::Punct(p) => {
                match p.as_char() {
                    c @ (',' | ';') => {
                        out.push(c);
                        out.push(' ');
                    }
                    c @ ('+' | '=') => {
                        out.push(' ');
                        out.push(c);
                        out.push(' ');
                    }
                    '-' if p.spacing() == Spacing::Joint => out.push_str(" -"),
                    '>' if out.ends_with('-') => out.push_str("> "),
                    c => out.push(c),
                }
                after_word = false;
            }
            TokenTree::Group(g) => {
                let (open, close) = match g.delimiter() {
                    Delimiter::Parenthesis => ("(", ")"),
                    Delimiter::Bracket => ("[", "]"),
                    Delimiter::Brace => ("{", "}"),
                    Delimiter::None => ("", ""),
                };
                out.push_str(open);
                print_tokens(out, g.stream());
                out.truncate(out.trim_end().len());
                out.push_str(close);
                after_word = false;
            }
        }
    }
}

/// Whether two printed types are the same token sequence, whatever their spacing.
pub fn same_type(a: &str, b: &str) -> bool {
    match (syn::parse_str::<syn::Type>(a), syn::parse_str::<syn::Type>(b)) {
        (Ok(a), Ok(b)) => a.to_token_stream().to_string() == b.to_token_stream().to_string(),
        _ => a == b,
    }
}

/// Extract `T` from `Vec<T>`.
pub fn vec_inner(ty: &str) -> Option<&str> {
    let inner = ty
        .strip_prefix("Vec<")
        .or_else(|| ty.strip_prefix("std::vec::Vec<"))
        .or_else(|| ty.strip_prefix("alloc::vec::Vec<"))?;
    inner.strip_suffix('>')
}
