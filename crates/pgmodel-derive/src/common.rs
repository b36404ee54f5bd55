use pgmodel_codegen::{AnnotatedStruct, SpecError, annotation};
use syn::{Data, DeriveInput, Fields, Result};

/// Collect the `key` annotations of a struct with named fields.
pub(crate) fn annotated(input: &DeriveInput, key: &str, derive: &str) -> Result<AnnotatedStruct> {
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(_) => &data.fields,
            _ => {
                return Err(syn::Error::new_spanned(
                    input,
                    format!("{derive} can only be derived for structs with named fields"),
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                input,
                format!("{derive} can only be derived for structs"),
            ));
        }
    };

    annotation::collect_from_fields(&input.ident.to_string(), fields, key)
        .map_err(|e| spec_error(input, e))
}

/// Report a generator error at the field it names, or at the struct.
pub(crate) fn spec_error(input: &DeriveInput, err: SpecError) -> syn::Error {
    if let Some(field) = field_named_by(&err).and_then(|name| find_field(input, name)) {
        return syn::Error::new_spanned(field, err.to_string());
    }
    syn::Error::new_spanned(&input.ident, err.to_string())
}

fn field_named_by(err: &SpecError) -> Option<&str> {
    match err {
        SpecError::DuplicateAnnotation { field, .. }
        | SpecError::InvalidAnnotation { field, .. }
        | SpecError::ModelAnnotation { field, .. }
        | SpecError::EmptyDbName { field }
        | SpecError::EmptyDbType { field }
        | SpecError::ArrayField { field, .. }
        | SpecError::QueryAnnotation { field, .. }
        | SpecError::UnknownMode { field, .. }
        | SpecError::ModeArity { field, .. } => Some(field.as_str()),
        SpecError::DuplicateColumn { second, .. } | SpecError::MultiplePrimaryKeys { second, .. } => {
            Some(second.as_str())
        }
        _ => None,
    }
}

fn find_field<'a>(input: &'a DeriveInput, name: &str) -> Option<&'a syn::Field> {
    let Data::Struct(data) = &input.data else {
        return None;
    };
    data.fields
        .iter()
        .find(|f| f.ident.as_ref().is_some_and(|i| i == name))
}
