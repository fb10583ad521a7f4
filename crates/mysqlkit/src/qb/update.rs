//! UPDATE rendering.

use crate::condition::Values;
use crate::error::{DbError, DbResult};
use crate::qb::clause::{push_set_list, push_table, push_where_equal};

/// Render `UPDATE `table` SET `a` = v, ... WHERE <equalities>`.
///
/// An empty condition set renders `WHERE 1=1` and updates every row; an empty
/// `set_values` is an error.
pub fn render_update(table: &str, conditions: &Values, set_values: &Values) -> DbResult<String> {
    if set_values.is_empty() {
        return Err(DbError::missing_field("update requires at least one SET column"));
    }

    let mut sql = String::from("UPDATE ");
    push_table(&mut sql, table)?;
    sql.push_str(" SET ");
    push_set_list(&mut sql, set_values)?;
    push_where_equal(&mut sql, conditions)?;
    Ok(sql)
}
