//! Shared clause rendering: table names, WHERE clauses, column/value lists.

use crate::condition::{Conditions, Values};
use crate::error::{DbError, DbResult};
use crate::escape::{escape_like_contains, write_literal};

/// Back-quote a table name after checking it is present.
///
/// The name itself is not escaped; it must come from trusted code.
pub(crate) fn push_table(out: &mut String, table: &str) -> DbResult<()> {
    if table.trim().is_empty() {
        return Err(DbError::missing_field("table name is required"));
    }
    push_quoted_ident(out, table);
    Ok(())
}

pub(crate) fn push_quoted_ident(out: &mut String, ident: &str) {
    out.push('`');
    out.push_str(ident);
    out.push('`');
}

/// `` `column` = literal `` terms joined by `sep`.
fn push_assignments(out: &mut String, values: &Values, sep: &str) -> DbResult<()> {
    for (i, (column, value)) in values.iter().enumerate() {
        if i > 0 {
            out.push_str(sep);
        }
        push_quoted_ident(out, column);
        out.push_str(" = ");
        write_literal(out, value)?;
    }
    Ok(())
}

/// ` WHERE <terms>` with equality terms first, then LIKE terms; ` WHERE 1=1` when empty.
pub(crate) fn push_where(out: &mut String, conditions: &Conditions) -> DbResult<()> {
    out.push_str(" WHERE ");
    if conditions.is_empty() {
        out.push_str("1=1");
        return Ok(());
    }

    push_assignments(out, conditions.equalities(), " AND ")?;
    for (i, (column, needle)) in conditions.likes().enumerate() {
        if i > 0 || !conditions.equalities().is_empty() {
            out.push_str(" AND ");
        }
        push_quoted_ident(out, column);
        out.push_str(" LIKE ");
        out.push_str(&escape_like_contains(needle));
    }
    Ok(())
}

/// ` WHERE <equalities>` for equality-only condition sets; ` WHERE 1=1` when empty.
pub(crate) fn push_where_equal(out: &mut String, conditions: &Values) -> DbResult<()> {
    out.push_str(" WHERE ");
    if conditions.is_empty() {
        out.push_str("1=1");
        return Ok(());
    }
    push_assignments(out, conditions, " AND ")
}

/// `` `a` = 1, `b` = 'x' `` for SET / ON DUPLICATE KEY UPDATE.
pub(crate) fn push_set_list(out: &mut String, values: &Values) -> DbResult<()> {
    push_assignments(out, values, ", ")
}

/// `` (`a`,`b`) VALUES (1,'x') `` from one or more payloads, in order.
pub(crate) fn push_columns_and_values(out: &mut String, payloads: &[&Values]) -> DbResult<()> {
    out.push_str(" (");
    let mut first = true;
    for column in payloads.iter().flat_map(|p| p.columns()) {
        if !first {
            out.push(',');
        }
        first = false;
        push_quoted_ident(out, column);
    }

    out.push_str(") VALUES (");
    let mut first = true;
    for (_, value) in payloads.iter().flat_map(|p| p.iter()) {
        if !first {
            out.push(',');
        }
        first = false;
        write_literal(out, value)?;
    }
    out.push(')');
    Ok(())
}
