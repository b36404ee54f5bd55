//! # pgmodel
//!
//! Runtime support for the data-access modules written by `pgmodel-cli`.
//!
//! Generated files depend on this crate only: they take any
//! [`tokio_postgres::GenericClient`] (a client or a transaction), return [`DataError`], and
//! reach the driver through the [`tokio_postgres`] re-export.
//!
//! ```ignore
//! mod user_model; // generated
//!
//! user_model::user_model_setup(&client).await?;
//! user_model::user_model_insert(&client, &user).await?;
//! match user_model::user_model_get(&client, &1).await {
//!     Ok(user) => println!("{user:?}"),
//!     Err(e) if e.is_not_found() => println!("no such user"),
//!     Err(e) => return Err(e.into()),
//! }
//! ```
//!
//! With the default `derive` feature, `#[derive(Model)]` and `#[derive(Query)]` check the
//! field annotations at compile time.

pub mod bulk;
pub mod error;

pub use bulk::bulk_values;
pub use error::{DataError, DataResult, ResultCode};

pub use tokio_postgres;

#[cfg(feature = "derive")]
pub use pgmodel_derive::{Model, Query};
