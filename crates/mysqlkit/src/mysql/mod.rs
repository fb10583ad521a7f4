//! MySQL backend: a deadpool-managed pool of `sqlx` connections.

mod decode;
mod manager;

pub use manager::ConnectionManager;

use crate::config::DbConfig;
use crate::error::{DbError, DbResult};
use crate::log::Logger;
use crate::pool::{ConnectionPool, MutationSummary, PooledConnection, QueryOutput};
use crate::statement::StatementKind;
use crate::value::Scalar;
use decode::Protocol;
use deadpool::managed::{Object, Pool};
use futures_util::TryStreamExt;
use sqlx::Either;
use sqlx::Executor;
use sqlx::mysql::{MySql, MySqlArguments, MySqlConnection, MySqlQueryResult, MySqlRow};
use sqlx::query::Query;
use std::sync::Arc;

/// Snapshot of the pool counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolStatus {
    pub max_size: usize,
    /// Open connections, idle or checked out.
    pub size: usize,
    /// Idle connections ready to be handed out.
    pub available: usize,
    /// Tasks waiting for a connection.
    pub waiting: usize,
}

/// Connection pool for MySQL.
///
/// Cloning is cheap; clones share the same underlying pool.
#[derive(Clone)]
pub struct MySqlPool {
    inner: Pool<ConnectionManager>,
    date_strings: bool,
    logger: Arc<dyn Logger>,
}

impl std::fmt::Debug for MySqlPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MySqlPool")
            .field("status", &self.status())
            .field("date_strings", &self.date_strings)
            .finish()
    }
}

impl MySqlPool {
    /// Build a pool from a validated config. No connection is opened until the first
    /// acquire.
    pub fn new(config: &DbConfig, logger: Arc<dyn Logger>) -> DbResult<Self> {
        config.validate()?;

        let manager = ConnectionManager::new(config.to_connect_options(), logger.clone());
        let mut builder = Pool::builder(manager).max_size(config.connection_limit);
        if let Some(timeout) = config.acquire_timeout_duration() {
            builder = builder
                .wait_timeout(Some(timeout))
                .runtime(deadpool::Runtime::Tokio1);
        }
        let inner = builder
            .build()
            .map_err(|e| DbError::config(format!("failed to build pool: {e}")))?;

        Ok(Self {
            inner,
            date_strings: config.date_strings,
            logger,
        })
    }

    pub fn status(&self) -> PoolStatus {
        let status = self.inner.status();
        PoolStatus {
            max_size: status.max_size,
            size: status.size,
            available: status.available,
            waiting: status.waiting,
        }
    }

    /// Close the pool. Idle connections are dropped immediately, checked-out ones when
    /// they are returned; further acquires fail with [`DbError::PoolExhausted`].
    pub fn close(&self) {
        self.inner.close();
        self.logger.info("mysql pool closed");
    }

    pub fn is_closed(&self) -> bool {
        self.inner.is_closed()
    }
}

impl ConnectionPool for MySqlPool {
    type Connection = MySqlConn;

    async fn acquire(&self) -> DbResult<MySqlConn> {
        let conn = self.inner.get().await?;
        Ok(MySqlConn {
            conn,
            date_strings: self.date_strings,
        })
    }
}

/// A connection checked out of a [`MySqlPool`]. Returned to the pool on drop.
pub struct MySqlConn {
    conn: Object<ConnectionManager>,
    date_strings: bool,
}

impl std::fmt::Debug for MySqlConn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MySqlConn")
            .field("date_strings", &self.date_strings)
            .finish_non_exhaustive()
    }
}

impl MySqlConn {
    /// Borrow the raw sqlx connection.
    pub fn as_raw(&mut self) -> &mut MySqlConnection {
        &mut self.conn
    }
}

impl PooledConnection for MySqlConn {
    async fn execute(&mut self, sql: &str, values: &[Scalar]) -> DbResult<QueryOutput> {
        let conn: &mut MySqlConnection = &mut self.conn;
        let returns_rows = StatementKind::detect(sql).returns_rows();

        // Without values the text protocol is used, so any statement (DDL, SET, ...)
        // runs as written.
        let (results, protocol) = if values.is_empty() {
            let stream = conn.fetch_many(sqlx::raw_sql(sql));
            (stream.try_collect::<Vec<_>>().await?, Protocol::Text)
        } else {
            let query = bind_scalars(sqlx::query(sql), values).persistent(false);
            let stream = conn.fetch_many(query);
            (stream.try_collect::<Vec<_>>().await?, Protocol::Binary)
        };

        collect_output(results, returns_rows, self.date_strings, protocol)
    }
}

fn bind_scalars<'q>(
    mut query: Query<'q, MySql, MySqlArguments>,
    values: &'q [Scalar],
) -> Query<'q, MySql, MySqlArguments> {
    for value in values {
        query = match value {
            Scalar::Int(i) => query.bind(*i),
            Scalar::UInt(u) => query.bind(*u),
            Scalar::Float(f) => query.bind(*f),
            Scalar::Text(s) => query.bind(s.as_str()),
        };
    }
    query
}

/// Fold a result stream into one output.
///
/// Any row makes the output [`QueryOutput::Rows`], so `CALL` and executable
/// comments keep their result sets. An empty stream falls back on the statement
/// keyword to pick between an empty row set and a mutation summary.
fn collect_output(
    results: Vec<Either<MySqlQueryResult, MySqlRow>>,
    returns_rows: bool,
    date_strings: bool,
    protocol: Protocol,
) -> DbResult<QueryOutput> {
    let mut rows = Vec::new();
    let mut summary = MutationSummary::default();
    for step in results {
        match step {
            Either::Left(result) => {
                summary.affected_rows += result.rows_affected();
                if result.last_insert_id() != 0 {
                    summary.insert_id = result.last_insert_id();
                }
            }
            Either::Right(row) => rows.push(decode::decode_row(&row, date_strings, protocol)?),
        }
    }

    if returns_rows || !rows.is_empty() {
        Ok(QueryOutput::Rows(rows))
    } else {
        Ok(QueryOutput::Mutation(summary))
    }
}
