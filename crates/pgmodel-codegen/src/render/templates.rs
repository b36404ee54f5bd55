//! Output templates.
//!
//! `{{key}}` markers are replaced by [`super::expand`]; nothing else in a template is
//! interpreted, so generated code may use single braces freely.

pub(super) const HEADER: &str = r#"// @generated by pgmodel (pgmodel-cli). DO NOT EDIT.
// source: {{source}}

use pgmodel::DataError;
use pgmodel::tokio_postgres::types::ToSql;
use pgmodel::tokio_postgres::{GenericClient, Row};
{{imports}}{{module_import}}"#;

pub(super) const MODEL: &str = r#"
pub const {{table_const}}: &str = "{{table}}";

fn {{decoder}}(row: &Row) -> Result<{{model}}, pgmodel::tokio_postgres::Error> {
    Ok({{model}} {
{{struct_body}}    })
}

/// Creates the `{{table}}` table if it does not exist.
pub async fn {{base}}_setup(client: &impl GenericClient) -> Result<(), DataError> {
    client
        .batch_execute("CREATE TABLE IF NOT EXISTS {{table}} ({{setup}});")
        .await?;
    Ok(())
}

/// Fetches a `{{model}}` by primary key.
pub async fn {{base}}_get(
    client: &impl GenericClient,
    key: &{{pk_type}},
) -> Result<{{model}}, DataError> {
    let row = client
        .query_opt(
            "SELECT {{db_names}} FROM {{table}} WHERE {{pk_db_name}} = $1;",
            &[&key],
        )
        .await
        .map_err(DataError::from_read)?
        .ok_or(DataError::NotFound)?;
    Ok({{decoder}}(&row)?)
}

/// Inserts a `{{model}}`.
pub async fn {{base}}_insert(client: &impl GenericClient, m: &{{model}}) -> Result<(), DataError> {
    client
        .execute(
            "INSERT INTO {{table}} ({{db_names}}) VALUES ({{placeholders}});",
            &[{{idents}}],
        )
        .await
        .map_err(DataError::from_write)?;
    Ok(())
}

/// Inserts `models` in one statement. With `allow_conflict`, rows that violate a
/// constraint are skipped.
pub async fn {{base}}_insert_bulk(
    client: &impl GenericClient,
    models: &[{{model}}],
    allow_conflict: bool,
) -> Result<(), DataError> {
    if models.is_empty() {
        return Ok(());
    }
    let conflict_sql = if allow_conflict {
        " ON CONFLICT DO NOTHING"
    } else {
        ""
    };
    let mut args: Vec<Box<dyn ToSql + Sync + Send + '_>> =
        Vec::with_capacity(models.len() * {{col_num}});
    for m in models {
{{bulk_args}}    }
    let params: Vec<&(dyn ToSql + Sync)> = args
        .iter()
        .map(|a| &**a as &(dyn ToSql + Sync))
        .collect();
    let values = pgmodel::bulk_values({{col_num}}, models.len());
    let sql = [
        "INSERT INTO {{table}} ({{db_names}}) VALUES ",
        values.as_str(),
        conflict_sql,
        ";",
    ]
    .concat();
    client
        .execute(sql.as_str(), &params)
        .await
        .map_err(DataError::from_write)?;
    Ok(())
}

/// Updates every column of a `{{model}}`, matched by primary key.
pub async fn {{base}}_update(client: &impl GenericClient, m: &{{model}}) -> Result<(), DataError> {
    client
        .execute(
            "UPDATE {{table}} SET {{update_set}} WHERE {{pk_db_name}} = ${{pk_position}};",
            &[{{idents}}],
        )
        .await?;
    Ok(())
}

/// Deletes a `{{model}}` by primary key.
pub async fn {{base}}_delete(client: &impl GenericClient, m: &{{model}}) -> Result<(), DataError> {
    client
        .execute(
            "DELETE FROM {{table}} WHERE {{pk_db_name}} = $1;",
            &[&m.{{pk_field}}],
        )
        .await?;
    Ok(())
}
"#;

pub(super) const QUERY_DECODER: &str = r#"
fn {{decoder}}(row: &Row) -> Result<{{query}}, pgmodel::tokio_postgres::Error> {
    Ok({{query}} {
{{struct_body}}    })
}
"#;

pub(super) const QUERY_SINGLE: &str = r#"
/// Fetches one `{{query}}` where `{{db_name}}` equals `key`.
pub async fn {{function}}(
    client: &impl GenericClient,
    key: &{{key_type}},
) -> Result<{{query}}, DataError> {
    let row = client
        .query_opt(
            "SELECT {{db_names}} FROM {{table}} WHERE {{db_name}} = $1 LIMIT 1;",
            &[&key],
        )
        .await
        .map_err(DataError::from_read)?
        .ok_or(DataError::NotFound)?;
    Ok({{decoder}}(&row)?)
}
"#;

pub(super) const QUERY_GROUP: &str = r#"
/// Pages through `{{query}}` rows ordered by `{{db_name}}`.
pub async fn {{function}}(
    client: &impl GenericClient,
    order_asc: bool,
    limit: i64,
    offset: i64,
) -> Result<Vec<{{query}}>, DataError> {
    let order = if order_asc { "ASC" } else { "DESC" };
    let sql = [
        "SELECT {{db_names}} FROM {{table}} ORDER BY {{db_name}} ",
        order,
        " LIMIT $1 OFFSET $2;",
    ]
    .concat();
    let rows = client.query(sql.as_str(), &[&limit, &offset]).await?;
    Ok(rows.iter().map({{decoder}}).collect::<Result<Vec<_>, _>>()?)
}
"#;

pub(super) const QUERY_GROUP_EQ: &str = r#"
/// Pages through `{{query}}` rows where `{{cond_db_name}}` equals `key`, ordered by `{{db_name}}`.
pub async fn {{function}}(
    client: &impl GenericClient,
    key: &{{key_type}},
    order_asc: bool,
    limit: i64,
    offset: i64,
) -> Result<Vec<{{query}}>, DataError> {
    let order = if order_asc { "ASC" } else { "DESC" };
    let sql = [
        "SELECT {{db_names}} FROM {{table}} WHERE {{cond_db_name}} = $1 ORDER BY {{db_name}} ",
        order,
        " LIMIT $2 OFFSET $3;",
    ]
    .concat();
    let rows = client.query(sql.as_str(), &[&key, &limit, &offset]).await?;
    Ok(rows.iter().map({{decoder}}).collect::<Result<Vec<_>, _>>()?)
}
"#;

pub(super) const QUERY_GROUP_SET: &str = r#"
/// Fetches `{{query}}` rows whose `{{db_name}}` is one of `keys`.
pub async fn {{function}}(
    client: &impl GenericClient,
    keys: &[{{key_type}}],
) -> Result<Vec<{{query}}>, DataError> {
    if keys.is_empty() {
        return Ok(Vec::new());
    }
    let mut placeholders = String::with_capacity(keys.len() * 4);
    for n in 0..keys.len() {
        if n > 0 {
            placeholders.push_str(", ");
        }
        write!(placeholders, "${}", n + 1).ok();
    }
    let args: Vec<&(dyn ToSql + Sync)> = keys.iter().map(|k| k as &(dyn ToSql + Sync)).collect();
    let sql = [
        "SELECT {{db_names}} FROM {{table}} WHERE {{db_name}} IN (",
        placeholders.as_str(),
        ");",
    ]
    .concat();
    let rows = client.query(sql.as_str(), &args).await?;
    Ok(rows.iter().map({{decoder}}).collect::<Result<Vec<_>, _>>()?)
}
"#;
