//! pgmodel-codegen
//!
//! Turns an annotated model struct, plus any number of query structs over it, into Rust
//! data-access functions for `tokio-postgres`.
//!
//! # Annotations
//!
//! ```ignore
//! pub struct User {
//!     #[model = "id,BIGINT PRIMARY KEY"]
//!     pub id: i64,
//!     #[model = "name,TEXT"]
//!     pub name: String,
//!     #[model = "status,INT"]
//!     pub status: i32,
//! }
//!
//! pub struct UserInfo {
//!     #[query = "id,get;getgroupeq,status"]
//!     pub id: i64,
//!     #[query = "name"]
//!     pub name: String,
//! }
//! ```
//!
//! # Pipeline
//!
//! - [`annotation`]: extract annotated fields from a parsed source file
//! - [`model`]: validate model columns and the primary key
//! - [`query`]: resolve query fields and their modes against the model
//! - [`sql`]: derive SQL fragments and accessor expressions
//! - [`deps`]: collect extra imports
//! - [`render`]: expand the templates into one file
//!
//! [`generate`] runs all of them. Every declaration is validated before anything is
//! rendered, and the result is returned in memory.

pub mod annotation;
pub mod deps;
pub mod error;
pub mod model;
pub mod query;
pub mod render;
pub mod sql;

pub use annotation::{AnnotatedStruct, MODEL_KEY, QUERY_KEY, RawField};
pub use deps::DependencySet;
pub use error::{SpecError, SpecResult};
pub use model::{Column, ModelSpec, compile_model};
pub use query::{Directive, Mode, ModeKind, QuerySpec, compile_query, parse_query_annotation};
pub use render::{Names, RenderContext};

use std::collections::HashSet;

/// One generation job.
#[derive(Debug, Clone, Copy)]
pub struct GenerateRequest<'a> {
    /// Path of the source file, as written into the output header.
    pub source_path: &'a str,
    /// Module path the structs are imported from in the generated file.
    pub module: &'a str,
    pub prefix: &'a str,
    pub table: &'a str,
    /// Model struct identifier.
    pub model: &'a str,
    /// Query struct identifiers, in output order.
    pub queries: &'a [String],
}

/// Result of a successful job.
#[derive(Debug, Clone)]
pub struct Generated {
    pub model: ModelSpec,
    pub queries: Vec<QuerySpec>,
    pub dependencies: DependencySet,
    /// Names of every public function in [`Generated::content`].
    pub functions: Vec<String>,
    /// The rendered file.
    pub content: String,
}

/// Compile the declarations found in `source` and render the output file.
pub fn generate(source: &str, req: &GenerateRequest<'_>) -> SpecResult<Generated> {
    let file = annotation::parse_source(source)?;

    let model_item = annotation::find_struct(&file, req.model)?;
    let model = compile_model(&annotation::collect_fields(model_item, MODEL_KEY)?)?;

    let mut dependencies = DependencySet::default();
    let mut queries = Vec::with_capacity(req.queries.len());
    for ident in req.queries {
        let item = annotation::find_struct(&file, ident)?;
        let parsed = annotation::collect_fields(item, QUERY_KEY)?;
        queries.push(compile_query(&parsed, &model, &mut dependencies)?);
    }

    let functions = function_names(req.prefix, &queries)?;

    let ctx = RenderContext {
        source: req.source_path,
        module: req.module,
        prefix: req.prefix,
        table: req.table,
    };
    let content = render::render_file(&ctx, &model, &queries, &dependencies)?;

    tracing::info!(
        model = %model.ident,
        table = req.table,
        columns = model.columns.len(),
        queries = queries.len(),
        functions = functions.len(),
        "generated model"
    );

    Ok(Generated {
        model,
        queries,
        dependencies,
        functions,
        content,
    })
}

/// Public function names in output order. Fails when two directives collide.
pub fn function_names(prefix: &str, queries: &[QuerySpec]) -> SpecResult<Vec<String>> {
    let names = Names::new(prefix)?;
    let mut out = names.model_functions();
    let mut seen: HashSet<String> = out.iter().cloned().collect();

    for query in queries {
        for directive in &query.directives {
            let function = names.directive(&query.ident, directive);
            if !seen.insert(function.clone()) {
                return Err(SpecError::DuplicateFunction {
                    query: query.ident.clone(),
                    function,
                });
            }
            out.push(function);
        }
    }

    Ok(out)
}
