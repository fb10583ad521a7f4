//! # mysqlkit
//!
//! A thin MySQL query builder and pooled execution facade.
//!
//! ## Features
//!
//! - **Structured SQL**: single-table SELECT / COUNT / INSERT / UPDATE / DELETE / REPLACE /
//!   upsert rendered from plain parameters (`qb`)
//! - **Escaped literals**: every condition and payload value goes through one escaper
//! - **Safe defaults**: DELETE requires conditions, UPDATE requires SET, INSERT requires a payload
//! - **Pooled execution**: connections are borrowed per call and returned on drop
//! - **Pluggable logging**: route messages through your own [`Logger`], or use `tracing`
//!
//! ## Query Builder (qb)
//!
//! ```
//! use mysqlkit::{qb, Values};
//!
//! let sql = qb::SelectSpec::new("users")
//!     .eq("status", "active")
//!     .like("name", "al")
//!     .order_by_desc("id")
//!     .page(0, 10)
//!     .to_sql()?;
//! assert_eq!(
//!     sql,
//!     "SELECT * FROM `users` WHERE `status` = 'active' AND `name` LIKE '%al%' ORDER BY id DESC LIMIT 0, 10"
//! );
//!
//! let sql = qb::render_update("users", &Values::new().set("id", 1), &Values::new().set("status", "inactive"))?;
//! assert_eq!(sql, "UPDATE `users` SET `status` = 'inactive' WHERE `id` = 1");
//! # Ok::<(), mysqlkit::DbError>(())
//! ```
//!
//! ## Facade
//!
//! ```ignore
//! use mysqlkit::{DbConfig, MySqlDb, SelectSpec, Values};
//!
//! let db = MySqlDb::connect(&DbConfig::from_url("mysql://root@localhost/app")?)?;
//!
//! let id = db
//!     .insert_and_return_id("users", &Values::new().set("name", "alice").set("status", 1))
//!     .await?;
//!
//! let rows = db.select_rows(&SelectSpec::new("users").eq("status", 1)).await?;
//! let total = db.get_count(&SelectSpec::new("users")).await?;
//!
//! db.delete("users", &Values::new().set("id", id)).await?;
//! ```

pub mod condition;
pub mod config;
pub mod db;
pub mod error;
pub mod escape;
pub mod log;
pub mod pool;
pub mod qb;
pub mod row;
pub mod statement;
pub mod value;

#[cfg(feature = "mysql")]
pub mod mysql;

pub use condition::{Conditions, Values};
pub use config::DbConfig;
pub use db::Db;
pub use error::{DbError, DbResult};
pub use log::{Logger, NoopLogger, TracingLogger};
pub use pool::{ConnectionPool, MutationSummary, PooledConnection, QueryOutput};
pub use qb::{Page, SelectSpec, TableOptions, TableSchema};
pub use row::{FromRow, FromValue, Row};
pub use statement::StatementKind;
pub use value::{Scalar, Value};

#[cfg(feature = "mysql")]
pub use mysql::{MySqlConn, MySqlPool, PoolStatus};

/// [`Db`] over the deadpool-backed MySQL pool.
#[cfg(feature = "mysql")]
pub type MySqlDb = Db<MySqlPool>;
