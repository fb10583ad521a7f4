//! CREATE TABLE / DROP TABLE rendering.
//!
//! Column definitions, engine and comment are interpolated verbatim. Only use
//! schemas written by the application itself.

use crate::error::{DbError, DbResult};
use crate::qb::clause::{push_quoted_ident, push_table};

/// Ordered column name -> type definition list.
///
/// ```
/// use mysqlkit::qb::TableSchema;
///
/// let schema = TableSchema::new()
///     .column("c1", "INT NOT NULL AUTO_INCREMENT PRIMARY KEY")
///     .column("c2", "VARCHAR(100)");
/// assert_eq!(schema.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableSchema {
    columns: Vec<(String, String)>,
}

impl TableSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn column(mut self, name: impl Into<String>, definition: impl Into<String>) -> Self {
        self.columns.push((name.into(), definition.into()));
        self
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Table options for CREATE TABLE.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableOptions {
    /// Storage engine, `InnoDB` when unset.
    pub engine: Option<String>,
    /// Table comment, empty when unset.
    pub comment: Option<String>,
}

impl TableOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn engine(mut self, engine: impl Into<String>) -> Self {
        self.engine = Some(engine.into());
        self
    }

    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

/// Render `CREATE TABLE `t` (`c1` def, ...) ENGINE=<engine> COMMENT='<comment>'`.
pub fn render_create_table(
    table: &str,
    schema: &TableSchema,
    options: &TableOptions,
) -> DbResult<String> {
    if schema.is_empty() {
        return Err(DbError::missing_field("create table requires at least one column"));
    }

    let mut sql = String::from("CREATE TABLE ");
    push_table(&mut sql, table)?;
    sql.push_str(" (");
    for (i, (name, definition)) in schema.columns.iter().enumerate() {
        if i > 0 {
            sql.push_str(", ");
        }
        push_quoted_ident(&mut sql, name);
        sql.push(' ');
        sql.push_str(definition);
    }
    sql.push_str(") ENGINE=");
    sql.push_str(options.engine.as_deref().unwrap_or("InnoDB"));
    sql.push_str(" COMMENT='");
    sql.push_str(options.comment.as_deref().unwrap_or(""));
    sql.push('\'');
    Ok(sql)
}

/// Render `DROP TABLE IF EXISTS `t``.
pub fn render_drop_table(table: &str) -> DbResult<String> {
    let mut sql = String::from("DROP TABLE IF EXISTS ");
    push_table(&mut sql, table)?;
    Ok(sql)
}
