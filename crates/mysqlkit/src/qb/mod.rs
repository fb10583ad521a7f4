//! Query builder: pure functions from structured parameters to MySQL SQL text.
//!
//! Nothing in this module performs I/O. Every value literal goes through
//! [`crate::escape`]; table and column names are back-quoted but not escaped, so they
//! must come from trusted code, never from user input.
//!
//! # Usage
//!
//! ```
//! use mysqlkit::{qb, Conditions, Values};
//!
//! // SELECT
//! let sql = qb::SelectSpec::new("users").eq("status", 1).page(0, 10).to_sql()?;
//! assert_eq!(sql, "SELECT * FROM `users` WHERE `status` = 1 LIMIT 0, 10");
//!
//! // COUNT
//! let sql = qb::render_count("users", &Conditions::new())?;
//! assert_eq!(sql, "SELECT COUNT(*) FROM `users` WHERE 1=1");
//!
//! // INSERT
//! let payload = Values::new().set("c2", "test").set("c3", 1);
//! let sql = qb::render_insert("table", &payload, false)?;
//! assert_eq!(sql, "INSERT INTO `table` (`c2`,`c3`) VALUES ('test',1)");
//!
//! // DELETE
//! let sql = qb::render_delete("users", &Values::new().set("id", 7))?;
//! assert_eq!(sql, "DELETE FROM `users` WHERE `id` = 7");
//! # Ok::<(), mysqlkit::DbError>(())
//! ```

mod clause;
mod ddl;
mod delete;
mod insert;
mod select;
mod update;

pub use ddl::{TableOptions, TableSchema, render_create_table, render_drop_table};
pub use delete::render_delete;
pub use insert::{render_insert, render_replace, render_upsert};
pub use select::{Page, SelectSpec, render_count, render_select};
pub use update::render_update;
