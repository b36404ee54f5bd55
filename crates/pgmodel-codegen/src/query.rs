//! Query compilation: auxiliary structs over the model.
//!
//! A query field annotation has the form `dbname[,mode[,args]][;mode[,args]...]`:
//!
//! - `get` - fetch at most one row by equality on the field's column
//! - `getgroup` - page through all rows ordered by the column
//! - `getgroupeq,<cond>` - page through rows where `<cond>` equals a key, ordered by the column
//! - `getgroupset` - fetch rows whose column value is in a set of keys
//!
//! A field without modes is only projected.

use crate::annotation::{AnnotatedStruct, RawField, same_type};
use crate::deps::DependencySet;
use crate::error::{SpecError, SpecResult};
use crate::model::{Column, ModelSpec};
use heck::ToSnakeCase;

/// Extra import required by `getgroupset` functions.
pub const GROUP_SET_DEPENDENCY: &str = "std::fmt::Write";

/// Query generation strategy, as written in annotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModeKind {
    Get,
    GetGroup,
    GetGroupEq,
    GetGroupSet,
}

impl ModeKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "get" => Some(Self::Get),
            "getgroup" => Some(Self::GetGroup),
            "getgroupeq" => Some(Self::GetGroupEq),
            "getgroupset" => Some(Self::GetGroupSet),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::GetGroup => "getgroup",
            Self::GetGroupEq => "getgroupeq",
            Self::GetGroupSet => "getgroupset",
        }
    }

    fn expected_clause(self) -> &'static str {
        match self {
            Self::GetGroupEq => "getgroupeq,<condition column>",
            Self::Get => "get",
            Self::GetGroup => "getgroup",
            Self::GetGroupSet => "getgroupset",
        }
    }
}

/// One parsed mode clause, before column resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeClause {
    pub kind: ModeKind,
    /// Condition column name (`getgroupeq` only).
    pub condition: Option<String>,
}

/// A query field annotation split into its parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryAnnotation {
    pub db_name: String,
    pub clauses: Vec<ModeClause>,
}

/// Parse the annotation text of one query field. Column references are not resolved.
pub fn parse_query_annotation(query: &str, field: &str, text: &str) -> SpecResult<QueryAnnotation> {
    let (db_name, rest) = match text.split_once(',') {
        Some((db_name, rest)) => (db_name.trim(), Some(rest)),
        None => (text.trim(), None),
    };

    if db_name.is_empty() {
        return Err(SpecError::QueryAnnotation {
            query: query.to_string(),
            field: field.to_string(),
            annotation: text.to_string(),
        });
    }

    let mut clauses = Vec::new();
    for clause in rest.into_iter().flat_map(|r| r.split(';')) {
        let tokens: Vec<&str> = clause.split(',').map(str::trim).collect();
        let Some(kind) = ModeKind::parse(tokens[0]) else {
            return Err(SpecError::UnknownMode {
                query: query.to_string(),
                field: field.to_string(),
                mode: tokens[0].to_string(),
            });
        };

        let arity = match kind {
            ModeKind::GetGroupEq => 2,
            _ => 1,
        };
        if tokens.len() != arity || tokens.iter().any(|t| t.is_empty()) {
            return Err(SpecError::ModeArity {
                query: query.to_string(),
                field: field.to_string(),
                clause: clause.trim().to_string(),
                expected: kind.expected_clause(),
            });
        }

        clauses.push(ModeClause {
            kind,
            condition: tokens.get(1).map(|s| (*s).to_string()),
        });
    }

    Ok(QueryAnnotation {
        db_name: db_name.to_string(),
        clauses,
    })
}

/// A query struct field resolved against a model column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryField {
    pub name: String,
    pub source_type: String,
    pub db_name: String,
    pub db_type: String,
    /// 1-based position among the query's annotated fields.
    pub position: usize,
}

/// Resolved mode; the equality condition only exists for `GetGroupEq`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Get,
    GetGroup,
    GetGroupEq { condition: Column },
    GetGroupSet,
}

impl Mode {
    pub fn kind(&self) -> ModeKind {
        match self {
            Self::Get => ModeKind::Get,
            Self::GetGroup => ModeKind::GetGroup,
            Self::GetGroupEq { .. } => ModeKind::GetGroupEq,
            Self::GetGroupSet => ModeKind::GetGroupSet,
        }
    }

    pub fn condition(&self) -> Option<&Column> {
        match self {
            Self::GetGroupEq { condition } => Some(condition),
            _ => None,
        }
    }
}

/// One generated function: a field plus the mode it is queried with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    pub field: QueryField,
    pub mode: Mode,
}

impl Directive {
    /// Function name without the `<prefix>_model_` part.
    pub fn function_stem(&self, query_ident: &str) -> String {
        let query = query_ident.to_snake_case();
        let field = symbol_part(&self.field.name);
        match &self.mode {
            Mode::Get => format!("get_{query}_by_{field}"),
            Mode::GetGroup => format!("get_{query}_ord_{field}"),
            Mode::GetGroupEq { condition } => {
                format!("get_{query}_eq_{}_ord_{field}", symbol_part(&condition.name))
            }
            Mode::GetGroupSet => format!("get_{query}_set_{field}"),
        }
    }
}

/// Identifier text usable inside a function name (`r#type` becomes `type`).
pub(crate) fn symbol_part(ident: &str) -> String {
    ident.trim_start_matches("r#").to_snake_case()
}

/// Compiled query struct.
#[derive(Debug, Clone)]
pub struct QuerySpec {
    pub ident: String,
    /// Projected columns, in declaration order.
    pub selected_columns: Vec<QueryField>,
    /// One entry per (field, mode clause).
    pub directives: Vec<Directive>,
    pub has_unannotated_fields: bool,
}

/// Resolve a query struct's annotated fields against `model`.
pub fn compile_query(
    parsed: &AnnotatedStruct,
    model: &ModelSpec,
    deps: &mut DependencySet,
) -> SpecResult<QuerySpec> {
    let mut selected_columns = Vec::with_capacity(parsed.fields.len());
    let mut directives = Vec::new();

    for (n, raw) in parsed.fields.iter().enumerate() {
        let annotation = parse_query_annotation(&parsed.ident, &raw.name, &raw.annotation)?;
        let column = resolve_column(&parsed.ident, raw, &annotation.db_name, model)?;

        let field = QueryField {
            name: raw.name.clone(),
            source_type: raw.source_type.clone(),
            db_name: column.db_name.clone(),
            db_type: column.db_type.clone(),
            position: n + 1,
        };

        tracing::debug!(
            query = %parsed.ident,
            field = %field.name,
            ty = %field.source_type,
            column = %field.db_name,
            modes = ?annotation
                .clauses
                .iter()
                .map(|c| c.kind.as_str())
                .collect::<Vec<_>>(),
            "detected query field"
        );

        for clause in &annotation.clauses {
            let mode = match clause.kind {
                ModeKind::Get => Mode::Get,
                ModeKind::GetGroup => Mode::GetGroup,
                ModeKind::GetGroupSet => {
                    deps.add(GROUP_SET_DEPENDENCY);
                    Mode::GetGroupSet
                }
                ModeKind::GetGroupEq => {
                    let cond = clause.condition.as_deref().unwrap_or_default();
                    let Some(condition) = model.column(cond) else {
                        return Err(SpecError::UnknownCondition {
                            query: parsed.ident.clone(),
                            field: raw.name.clone(),
                            column: cond.to_string(),
                        });
                    };
                    Mode::GetGroupEq {
                        condition: condition.clone(),
                    }
                }
            };
            directives.push(Directive {
                field: field.clone(),
                mode,
            });
        }

        selected_columns.push(field);
    }

    if directives.is_empty() {
        return Err(SpecError::NoDirectives {
            query: parsed.ident.clone(),
        });
    }

    Ok(QuerySpec {
        ident: parsed.ident.clone(),
        selected_columns,
        directives,
        has_unannotated_fields: parsed.has_unannotated_fields,
    })
}

fn resolve_column<'m>(
    query: &str,
    raw: &RawField,
    db_name: &str,
    model: &'m ModelSpec,
) -> SpecResult<&'m Column> {
    model
        .column(db_name)
        .filter(|c| same_type(&c.source_type, &raw.source_type))
        .ok_or_else(|| SpecError::UnknownColumn {
            query: query.to_string(),
            field: raw.name.clone(),
            column: db_name.to_string(),
            ty: raw.source_type.clone(),
        })
}
