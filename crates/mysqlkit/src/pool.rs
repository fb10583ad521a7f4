//! Connection pool abstraction.
//!
//! [`Db`](crate::Db) is generic over [`ConnectionPool`], so the same facade runs on
//! the deadpool-backed [`MySqlPool`](crate::mysql::MySqlPool) or on an in-memory pool
//! in tests. A connection goes back to its pool when the [`PooledConnection`] value is
//! dropped; there is no explicit release call to forget.

use crate::error::{DbError, DbResult};
use crate::row::Row;
use crate::value::Scalar;
use serde::Serialize;
use std::future::Future;

/// Outcome of a MUTATION statement (the OK packet).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MutationSummary {
    /// Rows matched/inserted/deleted.
    pub affected_rows: u64,
    /// Rows whose values actually changed, when the driver reports it.
    pub changed_rows: Option<u64>,
    /// Generated AUTO_INCREMENT id; `0` when none was generated.
    pub insert_id: u64,
}

/// Result of executing one statement.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum QueryOutput {
    Rows(Vec<Row>),
    Mutation(MutationSummary),
}

impl QueryOutput {
    /// The result set, or a [`DbError::Decode`] if the statement was a mutation.
    pub fn into_rows(self) -> DbResult<Vec<Row>> {
        match self {
            Self::Rows(rows) => Ok(rows),
            Self::Mutation(_) => Err(DbError::decode(
                "<statement>",
                "expected a result set, got a mutation summary",
            )),
        }
    }

    /// The mutation summary, or a [`DbError::Decode`] if the statement returned rows.
    pub fn into_mutation(self) -> DbResult<MutationSummary> {
        match self {
            Self::Mutation(summary) => Ok(summary),
            Self::Rows(_) => Err(DbError::decode(
                "<statement>",
                "expected a mutation summary, got a result set",
            )),
        }
    }

    pub fn is_rows(&self) -> bool {
        matches!(self, Self::Rows(_))
    }
}

/// A connection checked out of a [`ConnectionPool`].
///
/// Dropping the value returns the connection to its pool.
pub trait PooledConnection: Send {
    /// Execute one statement.
    ///
    /// With an empty `values` slice `sql` is sent as-is; otherwise each `?` placeholder
    /// is bound to the matching value.
    fn execute(
        &mut self,
        sql: &str,
        values: &[Scalar],
    ) -> impl Future<Output = DbResult<QueryOutput>> + Send;
}

/// A pool that hands out [`PooledConnection`]s.
pub trait ConnectionPool: Send + Sync {
    type Connection: PooledConnection;

    /// Wait for a free connection.
    ///
    /// Fails with [`DbError::PoolExhausted`] on timeout or a closed pool, and with
    /// [`DbError::Network`] when a new physical connection cannot be opened.
    fn acquire(&self) -> impl Future<Output = DbResult<Self::Connection>> + Send;
}
