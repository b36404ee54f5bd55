//! SQL fragments and accessor expressions for the templates.
//!
//! ARRAY columns are marshalled through a slice on the way in (`&m.tags.as_slice()`) and
//! decoded explicitly as `Vec<_>` on the way out; every other column is passed by reference
//! and decoded by inference.

use crate::model::{ModelSpec, is_array_type};
use crate::query::QuerySpec;

/// Strings derived from a model's columns, in position order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelSql {
    /// `id BIGINT PRIMARY KEY, name TEXT`
    pub setup: String,
    /// `id, name`
    pub db_names: String,
    /// `$1, $2`
    pub placeholders: String,
    /// `&m.id, &m.name`
    pub idents: String,
    /// Per-column owned parameter values for bulk inserts (`&m.id`, `m.tags.as_slice()`).
    pub param_values: Vec<String>,
    /// Per-column struct field initializers (`id: row.try_get(0)?`).
    pub ident_refs: Vec<String>,
    /// `name = $2` for every non-key column.
    pub update_set: String,
    /// Number of columns.
    pub col_num: usize,
}

/// Strings derived from a query's projected columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuerySql {
    pub db_names: String,
    pub ident_refs: Vec<String>,
}

/// Column accessor shared by model and query structs.
struct Accessor<'a> {
    field: &'a str,
    db_name: &'a str,
    db_type: &'a str,
}

impl Accessor<'_> {
    fn is_array(&self) -> bool {
        is_array_type(self.db_type)
    }

    fn param_ref(&self) -> String {
        if self.is_array() {
            format!("&m.{}.as_slice()", self.field)
        } else {
            format!("&m.{}", self.field)
        }
    }

    fn param_value(&self) -> String {
        if self.is_array() {
            format!("m.{}.as_slice()", self.field)
        } else {
            format!("&m.{}", self.field)
        }
    }

    fn row_init(&self, index: usize) -> String {
        if self.is_array() {
            format!("{}: row.try_get::<_, Vec<_>>({index})?", self.field)
        } else {
            format!("{}: row.try_get({index})?", self.field)
        }
    }
}

pub fn model_sql(model: &ModelSpec) -> ModelSql {
    let n = model.columns.len();
    let mut defs = Vec::with_capacity(n);
    let mut db_names = Vec::with_capacity(n);
    let mut placeholders = Vec::with_capacity(n);
    let mut idents = Vec::with_capacity(n);
    let mut param_values = Vec::with_capacity(n);
    let mut ident_refs = Vec::with_capacity(n);

    for (index, c) in model.columns.iter().enumerate() {
        let acc = Accessor {
            field: &c.name,
            db_name: &c.db_name,
            db_type: &c.db_type,
        };
        defs.push(format!("{} {}", acc.db_name, c.db_type));
        db_names.push(acc.db_name.to_string());
        placeholders.push(format!("${}", c.position));
        idents.push(acc.param_ref());
        param_values.push(acc.param_value());
        ident_refs.push(acc.row_init(index));
    }

    let mut update_set: Vec<String> = model
        .non_key_columns()
        .map(|c| format!("{} = ${}", c.db_name, c.position))
        .collect();
    if update_set.is_empty() {
        let pk = &model.primary_key;
        update_set.push(format!("{} = ${}", pk.db_name, pk.position));
    }

    ModelSql {
        setup: defs.join(", "),
        db_names: db_names.join(", "),
        placeholders: placeholders.join(", "),
        idents: idents.join(", "),
        param_values,
        ident_refs,
        update_set: update_set.join(", "),
        col_num: n,
    }
}

pub fn query_sql(query: &QuerySpec) -> QuerySql {
    let mut db_names = Vec::with_capacity(query.selected_columns.len());
    let mut ident_refs = Vec::with_capacity(query.selected_columns.len());

    for (index, f) in query.selected_columns.iter().enumerate() {
        let acc = Accessor {
            field: &f.name,
            db_name: &f.db_name,
            db_type: &f.db_type,
        };
        db_names.push(acc.db_name.to_string());
        ident_refs.push(acc.row_init(index));
    }

    QuerySql {
        db_names: db_names.join(", "),
        ident_refs,
    }
}
