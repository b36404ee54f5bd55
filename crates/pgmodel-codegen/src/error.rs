//! Error types for pgmodel-codegen

use thiserror::Error;

/// Result type alias for generator operations.
pub type SpecResult<T> = Result<T, SpecError>;

/// A declaration that cannot be turned into generated code.
///
/// Every variant names the struct and/or field at fault so the message can be shown to the
/// user as-is.
#[derive(Debug, Error)]
pub enum SpecError {
    /// The source file is not valid Rust.
    #[error("failed to parse source: {0}")]
    Syntax(#[from] syn::Error),

    /// No struct with the requested identifier.
    #[error("struct `{ident}` not found")]
    StructNotFound { ident: String },

    /// The identifier names a unit struct.
    #[error("`{ident}` has no fields")]
    NoFields { ident: String },

    /// An annotated field without exactly one name (tuple struct field).
    #[error("field #{index} of `{owner}` is annotated with `{key}` but has no name; exactly one name per annotation is allowed")]
    UnnamedField {
        owner: String,
        index: usize,
        key: String,
    },

    /// The same annotation key appears twice on a field.
    #[error("field `{owner}.{field}` carries more than one `{key}` annotation")]
    DuplicateAnnotation {
        owner: String,
        field: String,
        key: String,
    },

    /// The annotation is not a string literal.
    #[error("field `{owner}.{field}`: `{key}` annotation must be a string literal, e.g. #[{key} = \"...\"]")]
    InvalidAnnotation {
        owner: String,
        field: String,
        key: String,
    },

    /// A model annotation that does not split into `dbname,dbtype`.
    #[error("model field `{field}` annotation must be `dbname,dbtype`, got `{annotation}`")]
    ModelAnnotation { field: String, annotation: String },

    /// `dbname` component is empty.
    #[error("model field `{field}`: dbname not set")]
    EmptyDbName { field: String },

    /// `dbtype` component is empty.
    #[error("model field `{field}`: dbtype not set")]
    EmptyDbType { field: String },

    /// Two model fields map to the same column.
    #[error("duplicate column `{column}` (fields `{first}` and `{second}`)")]
    DuplicateColumn {
        column: String,
        first: String,
        second: String,
    },

    /// More than one column is marked `PRIMARY KEY`.
    #[error("model `{model}` cannot contain two primary keys (`{first}` and `{second}`)")]
    MultiplePrimaryKeys {
        model: String,
        first: String,
        second: String,
    },

    /// No column is marked `PRIMARY KEY`.
    #[error("model `{model}` does not contain a primary key")]
    MissingPrimaryKey { model: String },

    /// An `ARRAY` column whose field is not a `Vec<T>`.
    #[error("model field `{field}` is an ARRAY column and must be declared as Vec<T>, found `{ty}`")]
    ArrayField { field: String, ty: String },

    /// A query field annotation without a column name.
    #[error("query field `{query}.{field}` annotation must be `dbname[,mode[,args]][;...]`, got `{annotation}`")]
    QueryAnnotation {
        query: String,
        field: String,
        annotation: String,
    },

    /// A query field that does not match any model column by name and type.
    #[error("query field `{query}.{field}`: column `{column}` with type `{ty}` does not exist on model")]
    UnknownColumn {
        query: String,
        field: String,
        column: String,
        ty: String,
    },

    /// A mode clause naming an unsupported mode.
    #[error("query field `{query}.{field}`: illegal mode `{mode}`")]
    UnknownMode {
        query: String,
        field: String,
        mode: String,
    },

    /// A mode clause with the wrong number of tokens.
    #[error("query field `{query}.{field}`: mode clause must be `{expected}`, got `{clause}`")]
    ModeArity {
        query: String,
        field: String,
        clause: String,
        expected: &'static str,
    },

    /// `getgroupeq` condition that does not name a model column.
    #[error("query field `{query}.{field}`: invalid eq condition column `{column}`")]
    UnknownCondition {
        query: String,
        field: String,
        column: String,
    },

    /// A query struct that requests no generated functions.
    #[error("query `{query}` does not contain a query field")]
    NoDirectives { query: String },

    /// Two directives would produce the same function.
    #[error("query `{query}`: function `{function}` would be generated twice")]
    DuplicateFunction { query: String, function: String },

    /// A prefix that does not start a valid Rust identifier once snake-cased.
    #[error("prefix `{prefix}` must start with a letter or `_` and contain only ASCII letters, digits and `_`")]
    InvalidPrefix { prefix: String },

    /// A template referenced a key that was not supplied.
    #[error("template `{template}` references unknown key `{key}`")]
    TemplateKey { template: &'static str, key: String },
}
