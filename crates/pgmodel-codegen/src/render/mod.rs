//! Template expansion and output assembly.

mod templates;

use crate::annotation::vec_inner;
use crate::deps::DependencySet;
use crate::error::{SpecError, SpecResult};
use crate::model::ModelSpec;
use crate::query::{Directive, Mode, QuerySpec, symbol_part};
use crate::sql::{model_sql, query_sql};
use heck::{ToShoutySnakeCase, ToSnakeCase};

/// Where the generated code lives and what it is called.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    /// Source file path written into the header.
    pub source: &'a str,
    /// Module path the annotated structs are imported from (`super`, `crate::models`).
    pub module: &'a str,
    /// Prefix of every generated function name.
    pub prefix: &'a str,
    /// Table name.
    pub table: &'a str,
}

/// Function names derived from the prefix.
#[derive(Debug, Clone)]
pub struct Names {
    base: String,
}

impl Names {
    /// Fails when the snake-cased prefix cannot start an identifier (`2fa`).
    pub fn new(prefix: &str) -> SpecResult<Self> {
        let snake = prefix.to_snake_case();
        let valid = snake.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
            && !snake.starts_with(|c: char| c.is_ascii_digit());
        if !valid {
            return Err(SpecError::InvalidPrefix {
                prefix: prefix.to_string(),
            });
        }
        let base = if snake.is_empty() {
            "model".to_string()
        } else {
            format!("{snake}_model")
        };
        Ok(Self { base })
    }

    /// `user_model`
    pub fn base(&self) -> &str {
        &self.base
    }

    /// `USER_MODEL_TABLE_NAME`
    pub fn table_const(&self) -> String {
        format!("{}_TABLE_NAME", self.base.to_shouty_snake_case())
    }

    /// Setup, get, insert, bulk insert, update and delete, in output order.
    pub fn model_functions(&self) -> Vec<String> {
        ["setup", "get", "insert", "insert_bulk", "update", "delete"]
            .iter()
            .map(|op| format!("{}_{op}", self.base))
            .collect()
    }

    pub fn model_decoder(&self) -> String {
        format!("{}_from_row", self.base)
    }

    pub fn query_decoder(&self, query_ident: &str) -> String {
        format!("{}_{}_from_row", self.base, symbol_part(query_ident))
    }

    pub fn directive(&self, query_ident: &str, directive: &Directive) -> String {
        format!("{}_{}", self.base, directive.function_stem(query_ident))
    }
}

/// Replace every `{{key}}` in `template` with its value from `vars`.
pub fn expand(name: &'static str, template: &str, vars: &[(&str, &str)]) -> SpecResult<String> {
    let mut out = String::with_capacity(template.len() * 2);
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            return Err(SpecError::TemplateKey {
                template: name,
                key: after.to_string(),
            });
        };
        let key = after[..end].trim();
        let Some((_, value)) = vars.iter().find(|(k, _)| *k == key) else {
            return Err(SpecError::TemplateKey {
                template: name,
                key: key.to_string(),
            });
        };
        out.push_str(value);
        rest = &after[end + 2..];
    }

    out.push_str(rest);
    Ok(out)
}

/// Escape text placed inside a generated string literal.
fn lit(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Parameter type of a single key: `String` is taken as `str`, `Vec<T>` as `[T]`.
fn key_type(source_type: &str) -> String {
    if source_type == "String" || source_type == "std::string::String" {
        return "str".to_string();
    }
    match vec_inner(source_type) {
        Some(inner) => format!("[{inner}]"),
        None => source_type.to_string(),
    }
}

fn struct_body(ident_refs: &[String], fill_default: bool) -> String {
    let mut body: String = ident_refs
        .iter()
        .map(|r| format!("        {r},\n"))
        .collect();
    if fill_default {
        body.push_str("        ..Default::default()\n");
    }
    body
}

fn module_import(module: &str, model: &ModelSpec, queries: &[QuerySpec]) -> String {
    let mut types: Vec<&str> = vec![model.ident.as_str()];
    for q in queries {
        if !types.contains(&q.ident.as_str()) {
            types.push(&q.ident);
        }
    }
    match types.as_slice() {
        [single] => format!("use {module}::{single};\n"),
        _ => format!("use {module}::{{{}}};\n", types.join(", ")),
    }
}

/// Header and imports.
pub fn render_header(
    ctx: &RenderContext<'_>,
    model: &ModelSpec,
    queries: &[QuerySpec],
    deps: &DependencySet,
) -> SpecResult<String> {
    let imports = deps.render();
    let module_import = module_import(ctx.module, model, queries);
    expand(
        "header",
        templates::HEADER,
        &[
            ("source", ctx.source),
            ("imports", &imports),
            ("module_import", &module_import),
        ],
    )
}

/// Table constant, row decoder and the CRUD functions of the model.
pub fn render_model(ctx: &RenderContext<'_>, model: &ModelSpec) -> SpecResult<String> {
    let names = Names::new(ctx.prefix)?;
    let sql = model_sql(model);
    let pk = &model.primary_key;

    let table = lit(ctx.table);
    let pk_type = key_type(&pk.source_type);
    let table_const = names.table_const();
    let decoder = names.model_decoder();
    let body = struct_body(&sql.ident_refs, model.has_unannotated_fields);
    let setup = lit(&sql.setup);
    let db_names = lit(&sql.db_names);
    let pk_db_name = lit(&pk.db_name);
    let pk_position = pk.position.to_string();
    let update_set = lit(&sql.update_set);
    let col_num = sql.col_num.to_string();
    let bulk_args: String = sql
        .param_values
        .iter()
        .map(|v| format!("        args.push(Box::new({v}));\n"))
        .collect();

    expand(
        "model",
        templates::MODEL,
        &[
            ("table_const", &table_const),
            ("table", &table),
            ("decoder", &decoder),
            ("model", &model.ident),
            ("struct_body", &body),
            ("base", names.base()),
            ("setup", &setup),
            ("pk_type", &pk_type),
            ("pk_db_name", &pk_db_name),
            ("pk_position", &pk_position),
            ("pk_field", &pk.name),
            ("db_names", &db_names),
            ("placeholders", &sql.placeholders),
            ("idents", &sql.idents),
            ("col_num", &col_num),
            ("bulk_args", &bulk_args),
            ("update_set", &update_set),
        ],
    )
}

/// Row decoder and one function per directive of a query struct.
pub fn render_query(ctx: &RenderContext<'_>, query: &QuerySpec) -> SpecResult<String> {
    let names = Names::new(ctx.prefix)?;
    let sql = query_sql(query);

    let table = lit(ctx.table);
    let decoder = names.query_decoder(&query.ident);
    let db_names = lit(&sql.db_names);
    let body = struct_body(&sql.ident_refs, query.has_unannotated_fields);

    let mut out = expand(
        "query_decoder",
        templates::QUERY_DECODER,
        &[
            ("decoder", &decoder),
            ("query", &query.ident),
            ("struct_body", &body),
        ],
    )?;

    for directive in &query.directives {
        let function = names.directive(&query.ident, directive);
        let db_name = lit(&directive.field.db_name);
        let mut vars: Vec<(&str, &str)> = vec![
            ("function", function.as_str()),
            ("query", query.ident.as_str()),
            ("decoder", decoder.as_str()),
            ("table", table.as_str()),
            ("db_names", db_names.as_str()),
            ("db_name", db_name.as_str()),
        ];

        let cond_db_name;
        let key;
        let (name, template) = match &directive.mode {
            Mode::Get => {
                key = key_type(&directive.field.source_type);
                vars.push(("key_type", key.as_str()));
                ("query_single", templates::QUERY_SINGLE)
            }
            Mode::GetGroup => ("query_group", templates::QUERY_GROUP),
            Mode::GetGroupEq { condition } => {
                cond_db_name = lit(&condition.db_name);
                key = key_type(&condition.source_type);
                vars.push(("key_type", key.as_str()));
                vars.push(("cond_db_name", cond_db_name.as_str()));
                ("query_group_eq", templates::QUERY_GROUP_EQ)
            }
            Mode::GetGroupSet => {
                vars.push(("key_type", directive.field.source_type.as_str()));
                ("query_group_set", templates::QUERY_GROUP_SET)
            }
        };

        tracing::trace!(query = %query.ident, function = %function, "rendering query function");
        out.push_str(&expand(name, template, &vars)?);
    }

    Ok(out)
}

/// Render a complete generated file.
pub fn render_file(
    ctx: &RenderContext<'_>,
    model: &ModelSpec,
    queries: &[QuerySpec],
    deps: &DependencySet,
) -> SpecResult<String> {
    let mut out = render_header(ctx, model, queries, deps)?;
    out.push_str(&render_model(ctx, model)?);
    for query in queries {
        out.push_str(&render_query(ctx, query)?);
    }
    Ok(out)
}
