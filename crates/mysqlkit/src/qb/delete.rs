//! DELETE rendering.

use crate::condition::Values;
use crate::error::{DbError, DbResult};
use crate::qb::clause::{push_table, push_where_equal};

/// Render `DELETE FROM `table` WHERE <equalities>`.
///
/// An empty condition set is rejected: there is no way to delete every row through
/// this function.
pub fn render_delete(table: &str, conditions: &Values) -> DbResult<String> {
    if conditions.is_empty() {
        return Err(DbError::missing_field(
            "delete requires at least one equality condition",
        ));
    }

    let mut sql = String::from("DELETE FROM ");
    push_table(&mut sql, table)?;
    push_where_equal(&mut sql, conditions)?;
    Ok(sql)
}
