// @generated by pgmodel (pgmodel-cli). DO NOT EDIT.
// source: tests/fixtures/models.rs

use pgmodel::DataError;
use pgmodel::tokio_postgres::types::ToSql;
use pgmodel::tokio_postgres::{GenericClient, Row};
use std::fmt::Write;
use super::{User, UserInfo, UserTags};

pub const USER_MODEL_TABLE_NAME: &str = "users";

fn user_model_from_row(row: &Row) -> Result<User, pgmodel::tokio_postgres::Error> {
    Ok(User {
        id: row.try_get(0)?,
        name: row.try_get(1)?,
        status: row.try_get(2)?,
        tags: row.try_get::<_, Vec<_>>(3)?,
        ..Default::default()
    })
}

/// Creates the `users` table if it does not exist.
pub async fn user_model_setup(client: &impl GenericClient) -> Result<(), DataError> {
    client
        .batch_execute("CREATE TABLE IF NOT EXISTS users (id BIGINT PRIMARY KEY, name TEXT NOT NULL, status INT NOT NULL DEFAULT 0, tags TEXT ARRAY);")
        .await?;
    Ok(())
}

/// Fetches a `User` by primary key.
pub async fn user_model_get(
    client: &impl GenericClient,
    key: &i64,
) -> Result<User, DataError> {
    let row = client
        .query_opt(
            "SELECT id, name, status, tags FROM users WHERE id = $1;",
            &[&key],
        )
        .await
        .map_err(DataError::from_read)?
        .ok_or(DataError::NotFound)?;
    Ok(user_model_from_row(&row)?)
}

/// Inserts a `User`.
pub async fn user_model_insert(client: &impl GenericClient, m: &User) -> Result<(), DataError> {
    client
        .execute(
            "INSERT INTO users (id, name, status, tags) VALUES ($1, $2, $3, $4);",
            &[&m.id, &m.name, &m.status, &m.tags.as_slice()],
        )
        .await
        .map_err(DataError::from_write)?;
    Ok(())
}

/// Inserts `models` in one statement. With `allow_conflict`, rows that violate a
/// constraint are skipped.
pub async fn user_model_insert_bulk(
    client: &impl GenericClient,
    models: &[User],
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
        Vec::with_capacity(models.len() * 4);
    for m in models {
        args.push(Box::new(&m.id));
        args.push(Box::new(&m.name));
        args.push(Box::new(&m.status));
        args.push(Box::new(m.tags.as_slice()));
    }
    let params: Vec<&(dyn ToSql + Sync)> = args
        .iter()
        .map(|a| &**a as &(dyn ToSql + Sync))
        .collect();
    let values = pgmodel::bulk_values(4, models.len());
    let sql = [
        "INSERT INTO users (id, name, status, tags) VALUES ",
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

/// Updates every column of a `User`, matched by primary key.
pub async fn user_model_update(client: &impl GenericClient, m: &User) -> Result<(), DataError> {
    client
        .execute(
            "UPDATE users SET name = $2, status = $3, tags = $4 WHERE id = $1;",
            &[&m.id, &m.name, &m.status, &m.tags.as_slice()],
        )
        .await?;
    Ok(())
}

/// Deletes a `User` by primary key.
pub async fn user_model_delete(client: &impl GenericClient, m: &User) -> Result<(), DataError> {
    client
        .execute(
            "DELETE FROM users WHERE id = $1;",
            &[&m.id],
        )
        .await?;
    Ok(())
}

fn user_model_user_info_from_row(row: &Row) -> Result<UserInfo, pgmodel::tokio_postgres::Error> {
    Ok(UserInfo {
        id: row.try_get(0)?,
        name: row.try_get(1)?,
    })
}

/// Fetches one `UserInfo` where `id` equals `key`.
pub async fn user_model_get_user_info_by_id(
    client: &impl GenericClient,
    key: &i64,
) -> Result<UserInfo, DataError> {
    let row = client
        .query_opt(
            "SELECT id, name FROM users WHERE id = $1 LIMIT 1;",
            &[&key],
        )
        .await
        .map_err(DataError::from_read)?
        .ok_or(DataError::NotFound)?;
    Ok(user_model_user_info_from_row(&row)?)
}

/// Pages through `UserInfo` rows ordered by `id`.
pub async fn user_model_get_user_info_ord_id(
    client: &impl GenericClient,
    order_asc: bool,
    limit: i64,
    offset: i64,
) -> Result<Vec<UserInfo>, DataError> {
    let order = if order_asc { "ASC" } else { "DESC" };
    let sql = [
        "SELECT id, name FROM users ORDER BY id ",
        order,
        " LIMIT $1 OFFSET $2;",
    ]
    .concat();
    let rows = client.query(sql.as_str(), &[&limit, &offset]).await?;
    Ok(rows.iter().map(user_model_user_info_from_row).collect::<Result<Vec<_>, _>>()?)
}

/// Pages through `UserInfo` rows where `status` equals `key`, ordered by `id`.
pub async fn user_model_get_user_info_eq_status_ord_id(
    client: &impl GenericClient,
    key: &i32,
    order_asc: bool,
    limit: i64,
    offset: i64,
) -> Result<Vec<UserInfo>, DataError> {
    let order = if order_asc { "ASC" } else { "DESC" };
    let sql = [
        "SELECT id, name FROM users WHERE status = $1 ORDER BY id ",
        order,
        " LIMIT $2 OFFSET $3;",
    ]
    .concat();
    let rows = client.query(sql.as_str(), &[&key, &limit, &offset]).await?;
    Ok(rows.iter().map(user_model_user_info_from_row).collect::<Result<Vec<_>, _>>()?)
}

/// Fetches `UserInfo` rows whose `id` is one of `keys`.
pub async fn user_model_get_user_info_set_id(
    client: &impl GenericClient,
    keys: &[i64],
) -> Result<Vec<UserInfo>, DataError> {
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
        "SELECT id, name FROM users WHERE id IN (",
        placeholders.as_str(),
        ");",
    ]
    .concat();
    let rows = client.query(sql.as_str(), &args).await?;
    Ok(rows.iter().map(user_model_user_info_from_row).collect::<Result<Vec<_>, _>>()?)
}

/// Fetches one `UserInfo` where `name` equals `key`.
pub async fn user_model_get_user_info_by_name(
    client: &impl GenericClient,
    key: &str,
) -> Result<UserInfo, DataError> {
    let row = client
        .query_opt(
            "SELECT id, name FROM users WHERE name = $1 LIMIT 1;",
            &[&key],
        )
        .await
        .map_err(DataError::from_read)?
        .ok_or(DataError::NotFound)?;
    Ok(user_model_user_info_from_row(&row)?)
}

fn user_model_user_tags_from_row(row: &Row) -> Result<UserTags, pgmodel::tokio_postgres::Error> {
    Ok(UserTags {
        status: row.try_get(0)?,
        tags: row.try_get::<_, Vec<_>>(1)?,
    })
}

/// Fetches `UserTags` rows whose `status` is one of `keys`.
pub async fn user_model_get_user_tags_set_status(
    client: &impl GenericClient,
    keys: &[i32],
) -> Result<Vec<UserTags>, DataError> {
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
        "SELECT status, tags FROM users WHERE status IN (",
        placeholders.as_str(),
        ");",
    ]
    .concat();
    let rows = client.query(sql.as_str(), &args).await?;
    Ok(rows.iter().map(user_model_user_tags_from_row).collect::<Result<Vec<_>, _>>()?)
}
