//! Statement classification.
//!
//! The execution layer needs to know whether a statement produces a row set or an
//! OK packet (affected rows / insert id) before it runs it.

/// Leading keyword class of a SQL statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    Select,
    Insert,
    Replace,
    Update,
    Delete,
    /// `SHOW`, `DESCRIBE`, `EXPLAIN` and friends.
    Inspect,
    /// DDL, `SET`, anything else.
    Other,
}

impl StatementKind {
    /// Detect the statement kind from its first meaningful keyword.
    pub fn detect(sql: &str) -> Self {
        let trimmed = strip_sql_prefix(sql);
        if starts_with_keyword(trimmed, "SELECT")
            || starts_with_keyword(trimmed, "WITH")
            || starts_with_keyword(trimmed, "VALUES")
            || starts_with_keyword(trimmed, "TABLE")
        {
            Self::Select
        } else if starts_with_keyword(trimmed, "INSERT") {
            Self::Insert
        } else if starts_with_keyword(trimmed, "REPLACE") {
            Self::Replace
        } else if starts_with_keyword(trimmed, "UPDATE") {
            Self::Update
        } else if starts_with_keyword(trimmed, "DELETE") {
            Self::Delete
        } else if ["SHOW", "DESCRIBE", "DESC", "EXPLAIN"]
            .iter()
            .any(|kw| starts_with_keyword(trimmed, kw))
        {
            Self::Inspect
        } else {
            Self::Other
        }
    }

    /// Whether the statement yields a row set.
    pub fn returns_rows(self) -> bool {
        matches!(self, Self::Select | Self::Inspect)
    }
}

/// Strip leading whitespace, SQL comments (`--`, `#` and `/* */`), and parentheses
/// from a SQL string to find the first meaningful keyword.
fn strip_sql_prefix(sql: &str) -> &str {
    let mut s = sql;
    loop {
        let before = s;
        s = s.trim_start();
        if s.starts_with("--") || s.starts_with('#') {
            match s.find('\n') {
                Some(pos) => {
                    s = &s[pos + 1..];
                    continue;
                }
                None => return "",
            }
        }
        if s.starts_with("/*") {
            match s.find("*/") {
                Some(pos) => {
                    s = &s[pos + 2..];
                    continue;
                }
                None => return "",
            }
        }
        if let Some(rest) = s.strip_prefix('(') {
            s = rest;
            continue;
        }
        if s == before {
            break;
        }
    }
    s
}

fn starts_with_keyword(s: &str, keyword: &str) -> bool {
    let Some(prefix) = s.get(0..keyword.len()) else {
        return false;
    };
    if !prefix.eq_ignore_ascii_case(keyword) {
        return false;
    }
    // Word boundary: `SELECTED` is not `SELECT`.
    !s[keyword.len()..]
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_row_returning_statements() {
        assert_eq!(StatementKind::detect("SELECT 1"), StatementKind::Select);
        assert_eq!(StatementKind::detect("  select * from t"), StatementKind::Select);
        assert_eq!(StatementKind::detect("(SELECT 1) UNION (SELECT 2)"), StatementKind::Select);
        assert_eq!(StatementKind::detect("WITH x AS (SELECT 1) SELECT * FROM x"), StatementKind::Select);
        assert_eq!(StatementKind::detect("show tables"), StatementKind::Inspect);
        assert_eq!(StatementKind::detect("DESC t"), StatementKind::Inspect);
        assert!(StatementKind::detect("EXPLAIN SELECT 1").returns_rows());
    }

    #[test]
    fn detects_mutations_and_ddl() {
        assert_eq!(StatementKind::detect("INSERT INTO t VALUES (1)"), StatementKind::Insert);
        assert_eq!(StatementKind::detect("replace into t (a) values (1)"), StatementKind::Replace);
        assert_eq!(StatementKind::detect("UPDATE t SET a = 1"), StatementKind::Update);
        assert_eq!(StatementKind::detect("DELETE FROM t WHERE a = 1"), StatementKind::Delete);
        assert_eq!(StatementKind::detect("CREATE TABLE t (a INT)"), StatementKind::Other);
        assert_eq!(
            StatementKind::detect("SET SESSION auto_increment_increment=1"),
            StatementKind::Other
        );
        assert!(!StatementKind::detect("DROP TABLE IF EXISTS t").returns_rows());
    }

    #[test]
    fn skips_comments() {
        assert_eq!(StatementKind::detect("-- hi\nSELECT 1"), StatementKind::Select);
        assert_eq!(StatementKind::detect("# note\nDELETE FROM t"), StatementKind::Delete);
        assert_eq!(StatementKind::detect("/* x */ UPDATE t SET a=1"), StatementKind::Update);
        assert_eq!(StatementKind::detect("/* unclosed"), StatementKind::Other);
    }

    #[test]
    fn keyword_needs_a_word_boundary() {
        assert_eq!(StatementKind::detect("SELECTED"), StatementKind::Other);
        assert_eq!(StatementKind::detect("DESCx"), StatementKind::Other);
    }
}
