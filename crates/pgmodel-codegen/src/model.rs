//! Model compilation: annotated fields to columns.

use crate::annotation::{AnnotatedStruct, RawField, vec_inner};
use crate::error::{SpecError, SpecResult};
use std::collections::HashMap;

const PRIMARY_KEY_MARKER: &str = "PRIMARY KEY";
const ARRAY_MARKER: &str = "ARRAY";

/// A persisted model field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Field identifier.
    pub name: String,
    /// Normalized field type.
    pub source_type: String,
    /// Column name.
    pub db_name: String,
    /// Column definition used in `CREATE TABLE` (e.g. `BIGINT PRIMARY KEY`).
    pub db_type: String,
    /// 1-based position in declaration order; also the column's placeholder index.
    pub position: usize,
}

impl Column {
    pub fn is_primary_key(&self) -> bool {
        self.db_type.contains(PRIMARY_KEY_MARKER)
    }
}

pub(crate) fn is_array_type(db_type: &str) -> bool {
    db_type.contains(ARRAY_MARKER)
}

/// Compiled model.
#[derive(Debug, Clone)]
pub struct ModelSpec {
    pub ident: String,
    pub columns: Vec<Column>,
    pub primary_key: Column,
    pub has_unannotated_fields: bool,
}

impl ModelSpec {
    /// Look up a column by its database name.
    pub fn column(&self, db_name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.db_name == db_name)
    }

    /// Columns other than the primary key, in position order.
    pub fn non_key_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns
            .iter()
            .filter(|c| c.db_name != self.primary_key.db_name)
    }
}

/// Validate a model's annotated fields.
pub fn compile_model(parsed: &AnnotatedStruct) -> SpecResult<ModelSpec> {
    let mut columns: Vec<Column> = Vec::with_capacity(parsed.fields.len());
    let mut seen: HashMap<String, String> = HashMap::new();
    let mut primary_key: Option<Column> = None;

    for (n, field) in parsed.fields.iter().enumerate() {
        let column = compile_field(field, n + 1)?;

        if let Some(first) = seen.insert(column.db_name.clone(), column.name.clone()) {
            return Err(SpecError::DuplicateColumn {
                column: column.db_name,
                first,
                second: field.name.clone(),
            });
        }

        if column.is_primary_key() {
            if let Some(pk) = &primary_key {
                return Err(SpecError::MultiplePrimaryKeys {
                    model: parsed.ident.clone(),
                    first: pk.name.clone(),
                    second: column.name,
                });
            }
            primary_key = Some(column.clone());
        }

        tracing::debug!(
            model = %parsed.ident,
            field = %column.name,
            ty = %column.source_type,
            column = %column.db_name,
            "detected model field"
        );
        columns.push(column);
    }

    let Some(primary_key) = primary_key else {
        return Err(SpecError::MissingPrimaryKey {
            model: parsed.ident.clone(),
        });
    };

    Ok(ModelSpec {
        ident: parsed.ident.clone(),
        columns,
        primary_key,
        has_unannotated_fields: parsed.has_unannotated_fields,
    })
}

fn compile_field(field: &RawField, position: usize) -> SpecResult<Column> {
    let parts: Vec<&str> = field.annotation.split(',').map(str::trim).collect();
    let [db_name, db_type] = parts.as_slice() else {
        return Err(SpecError::ModelAnnotation {
            field: field.name.clone(),
            annotation: field.annotation.clone(),
        });
    };

    if db_name.is_empty() {
        return Err(SpecError::EmptyDbName {
            field: field.name.clone(),
        });
    }
    if db_type.is_empty() {
        return Err(SpecError::EmptyDbType {
            field: field.name.clone(),
        });
    }
    if is_array_type(db_type) && vec_inner(&field.source_type).is_none() {
        return Err(SpecError::ArrayField {
            field: field.name.clone(),
            ty: field.source_type.clone(),
        });
    }

    Ok(Column {
        name: field.name.clone(),
        source_type: field.source_type.clone(),
        db_name: (*db_name).to_string(),
        db_type: (*db_type).to_string(),
        position,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(name: &str, ty: &str, annotation: &str) -> RawField {
        RawField {
            name: name.to_string(),
            source_type: ty.to_string(),
            annotation: annotation.to_string(),
        }
    }

    fn model(fields: Vec<RawField>) -> AnnotatedStruct {
        AnnotatedStruct {
            ident: "User".to_string(),
            fields,
            has_unannotated_fields: false,
        }
    }

    #[test]
    fn compiles_single_primary_key() {
        let spec = compile_model(&model(vec![
            raw("id", "i32", "id,INT PRIMARY KEY"),
            raw("name", "String", "name,TEXT"),
        ]))
        .unwrap();

        assert_eq!(spec.primary_key.db_name, "id");
        assert_eq!(spec.primary_key, spec.columns[0]);
        assert_eq!(
            spec.columns
                .iter()
                .map(|c| (c.db_name.as_str(), c.position))
                .collect::<Vec<_>>(),
            vec![("id", 1), ("name", 2)]
        );
        assert_eq!(
            spec.non_key_columns().map(|c| c.name.as_str()).collect::<Vec<_>>(),
            vec!["name"]
        );
    }

    #[test]
    fn primary_key_need_not_come_first() {
        let spec = compile_model(&model(vec![
            raw("name", "String", "name,TEXT"),
            raw("id", "i64", "id,BIGINT PRIMARY KEY"),
        ]))
        .unwrap();
        assert_eq!(spec.primary_key.position, 2);
    }

    #[test]
    fn missing_primary_key_fails() {
        let err = compile_model(&model(vec![raw("name", "String", "name,TEXT")])).unwrap_err();
        assert!(matches!(err, SpecError::MissingPrimaryKey { .. }));

        let err = compile_model(&model(Vec::new())).unwrap_err();
        assert!(matches!(err, SpecError::MissingPrimaryKey { .. }));
    }

    #[test]
    fn two_primary_keys_fail() {
        let err = compile_model(&model(vec![
            raw("id", "i32", "id,INT PRIMARY KEY"),
            raw("uid", "i32", "uid,INT PRIMARY KEY"),
        ]))
        .unwrap_err();
        assert!(matches!(err, SpecError::MultiplePrimaryKeys { .. }));
    }

    #[test]
    fn duplicate_column_fails() {
        let err = compile_model(&model(vec![
            raw("id", "i32", "id,INT PRIMARY KEY"),
            raw("name", "String", "name,TEXT"),
            raw("alias", "String", "name,TEXT"),
        ]))
        .unwrap_err();
        match err {
            SpecError::DuplicateColumn {
                column,
                first,
                second,
            } => {
                assert_eq!(column, "name");
                assert_eq!(first, "name");
                assert_eq!(second, "alias");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn malformed_annotations_fail() {
        for annotation in ["id", "id,INT,extra", ""] {
            let err = compile_model(&model(vec![raw("id", "i32", annotation)])).unwrap_err();
            assert!(
                matches!(err, SpecError::ModelAnnotation { .. }),
                "{annotation}: {err}"
            );
        }

        let err = compile_model(&model(vec![raw("id", "i32", ",INT PRIMARY KEY")])).unwrap_err();
        assert!(matches!(err, SpecError::EmptyDbName { .. }));

        let err = compile_model(&model(vec![raw("id", "i32", "id,")])).unwrap_err();
        assert!(matches!(err, SpecError::EmptyDbType { .. }));
    }

    #[test]
    fn array_columns_must_be_vectors() {
        let err = compile_model(&model(vec![
            raw("id", "i32", "id,INT PRIMARY KEY"),
            raw("tags", "String", "tags,TEXT ARRAY"),
        ]))
        .unwrap_err();
        assert!(matches!(err, SpecError::ArrayField { .. }));

        let spec = compile_model(&model(vec![
            raw("id", "i32", "id,INT PRIMARY KEY"),
            raw("tags", "Vec<String>", "tags,TEXT ARRAY"),
        ]))
        .unwrap();
        assert!(is_array_type(&spec.columns[1].db_type));
    }
}
