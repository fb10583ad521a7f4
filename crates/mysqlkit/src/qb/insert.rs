//! INSERT, REPLACE and upsert rendering.

use crate::condition::Values;
use crate::error::{DbError, DbResult};
use crate::qb::clause::{push_columns_and_values, push_set_list, push_table};

/// Render `INSERT [IGNORE ]INTO `table` (cols) VALUES (vals)`.
///
/// Columns and values follow the payload order.
pub fn render_insert(table: &str, payload: &Values, ignore_duplicates: bool) -> DbResult<String> {
    require_payload(payload, "insert")?;

    let mut sql = String::from(if ignore_duplicates {
        "INSERT IGNORE INTO "
    } else {
        "INSERT INTO "
    });
    push_table(&mut sql, table)?;
    push_columns_and_values(&mut sql, &[payload])?;
    Ok(sql)
}

/// Render `REPLACE INTO `table` (cols) VALUES (vals)`.
pub fn render_replace(table: &str, payload: &Values) -> DbResult<String> {
    require_payload(payload, "replace")?;

    let mut sql = String::from("REPLACE INTO ");
    push_table(&mut sql, table)?;
    push_columns_and_values(&mut sql, &[payload])?;
    Ok(sql)
}

/// Render an insert-or-update on a unique key:
///
/// `INSERT INTO `t` (keyCols,setCols) VALUES (keyVals,setVals) ON DUPLICATE KEY UPDATE `a` = v, ...`
pub fn render_upsert(table: &str, key_values: &Values, set_values: &Values) -> DbResult<String> {
    if key_values.is_empty() {
        return Err(DbError::missing_field("upsert requires at least one key column"));
    }
    require_payload(set_values, "upsert")?;

    let mut sql = String::from("INSERT INTO ");
    push_table(&mut sql, table)?;
    push_columns_and_values(&mut sql, &[key_values, set_values])?;
    sql.push_str(" ON DUPLICATE KEY UPDATE ");
    push_set_list(&mut sql, set_values)?;
    Ok(sql)
}

fn require_payload(payload: &Values, op: &str) -> DbResult<()> {
    if payload.is_empty() {
        return Err(DbError::missing_field(format!("{op} requires a non-empty payload")));
    }
    Ok(())
}
