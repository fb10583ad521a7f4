//! SELECT and COUNT rendering.

use crate::condition::Conditions;
use crate::error::DbResult;
use crate::qb::clause::{push_table, push_where};
use crate::value::Scalar;

/// `LIMIT start, size` pagination window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    /// Zero-based row offset.
    pub start: u64,
    /// Maximum number of rows.
    pub size: u64,
}

impl Page {
    pub fn new(start: u64, size: u64) -> Self {
        Self { start, size }
    }
}

/// Parameters of a single-table SELECT.
///
/// # Example
/// ```
/// use mysqlkit::qb::SelectSpec;
///
/// let sql = SelectSpec::new("users")
///     .columns(["id", "name"])
///     .eq("status", 1)
///     .like("name", "ali")
///     .order_by_desc("id")
///     .page(0, 20)
///     .to_sql()
///     .unwrap();
///
/// assert_eq!(
///     sql,
///     "SELECT id,name FROM `users` WHERE `status` = 1 AND `name` LIKE '%ali%' ORDER BY id DESC LIMIT 0, 20"
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectSpec {
    /// Table name (required)
    pub table: String,
    /// Projected columns; empty means `*`
    pub columns: Vec<String>,
    /// WHERE conditions
    pub conditions: Conditions,
    /// `ORDER BY <column> DESC`
    pub order_by_desc: Option<String>,
    /// `LIMIT start, size`
    pub page: Option<Page>,
}

impl SelectSpec {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            ..Self::default()
        }
    }

    /// Replace the projection list.
    pub fn columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Add one projected column.
    pub fn column(mut self, column: impl Into<String>) -> Self {
        self.columns.push(column.into());
        self
    }

    /// Replace the condition set.
    pub fn conditions(mut self, conditions: Conditions) -> Self {
        self.conditions = conditions;
        self
    }

    /// Add WHERE: `column` = value
    pub fn eq(mut self, column: impl Into<String>, value: impl Into<Scalar>) -> Self {
        self.conditions = self.conditions.eq(column, value);
        self
    }

    /// Add WHERE: `column` LIKE '%needle%'
    pub fn like(mut self, column: impl Into<String>, needle: impl Into<String>) -> Self {
        self.conditions = self.conditions.like(column, needle);
        self
    }

    /// Sort descending by `column`.
    pub fn order_by_desc(mut self, column: impl Into<String>) -> Self {
        self.order_by_desc = Some(column.into());
        self
    }

    /// Set the pagination window.
    pub fn page(mut self, start: u64, size: u64) -> Self {
        self.page = Some(Page::new(start, size));
        self
    }

    /// Render the statement.
    pub fn to_sql(&self) -> DbResult<String> {
        render_select(self)
    }
}

/// Render a SELECT statement.
///
/// `SELECT <cols|*> FROM `table` WHERE <cond|1=1>[ ORDER BY col DESC][ LIMIT start, size]`
pub fn render_select(spec: &SelectSpec) -> DbResult<String> {
    let mut sql = String::from("SELECT ");
    if spec.columns.is_empty() {
        sql.push('*');
    } else {
        sql.push_str(&spec.columns.join(","));
    }
    sql.push_str(" FROM ");
    push_table(&mut sql, &spec.table)?;
    push_where(&mut sql, &spec.conditions)?;

    if let Some(column) = spec.order_by_desc.as_deref().filter(|c| !c.is_empty()) {
        sql.push_str(" ORDER BY ");
        sql.push_str(column);
        sql.push_str(" DESC");
    }
    if let Some(page) = spec.page {
        sql.push_str(&format!(" LIMIT {}, {}", page.start, page.size));
    }
    Ok(sql)
}

/// Render `SELECT COUNT(*) FROM `table` WHERE ...`.
pub fn render_count(table: &str, conditions: &Conditions) -> DbResult<String> {
    let mut sql = String::from("SELECT COUNT(*) FROM ");
    push_table(&mut sql, table)?;
    push_where(&mut sql, conditions)?;
    Ok(sql)
}
