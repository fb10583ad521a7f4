//! The execution facade.
//!
//! [`Db`] validates its inputs, renders SQL through [`crate::qb`] and runs it on a
//! connection borrowed from its pool. The connection is returned to the pool before
//! any result or error reaches the caller.
//!
//! Every operation checks its inputs before it looks at the pool, so a malformed
//! call fails the same way on an attached and on an unattached facade.

use crate::condition::Values;
use crate::error::{DbError, DbResult};
use crate::escape::escape_literal;
use crate::log::{Logger, TracingLogger};
use crate::pool::{ConnectionPool, MutationSummary, PooledConnection, QueryOutput};
use crate::qb::{self, SelectSpec, TableOptions, TableSchema};
use crate::row::{FromRow, Row};
use crate::value::{Scalar, Value};
use std::sync::Arc;

enum PoolState<P> {
    Uninitialized,
    Ready(P),
}

/// Query facade over a [`ConnectionPool`].
///
/// `Db` is `Send + Sync`; share it behind an `Arc` (or clone the pool) rather than
/// creating one per request.
pub struct Db<P> {
    state: PoolState<P>,
    logger: Arc<dyn Logger>,
}

impl<P> std::fmt::Debug for Db<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = match self.state {
            PoolState::Uninitialized => "uninitialized",
            PoolState::Ready(_) => "ready",
        };
        f.debug_struct("Db").field("state", &state).finish_non_exhaustive()
    }
}

impl<P: ConnectionPool> Default for Db<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: ConnectionPool> Db<P> {
    /// A facade with no pool. Every query fails with [`DbError::NotInitialized`] until
    /// [`Db::attach`] is called.
    pub fn new() -> Self {
        Self {
            state: PoolState::Uninitialized,
            logger: Arc::new(TracingLogger::new()),
        }
    }

    /// A ready facade around an existing pool.
    pub fn from_pool(pool: P) -> Self {
        Self {
            state: PoolState::Ready(pool),
            logger: Arc::new(TracingLogger::new()),
        }
    }

    /// Replace the logger.
    pub fn with_logger(mut self, logger: impl Logger + 'static) -> Self {
        self.logger = Arc::new(logger);
        self
    }

    /// Attach a pool, replacing any previous one.
    pub fn attach(&mut self, pool: P) {
        self.state = PoolState::Ready(pool);
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, PoolState::Ready(_))
    }

    /// Borrow the pool.
    pub fn pool(&self) -> DbResult<&P> {
        match &self.state {
            PoolState::Ready(pool) => Ok(pool),
            PoolState::Uninitialized => Err(DbError::NotInitialized),
        }
    }

    pub fn logger(&self) -> &Arc<dyn Logger> {
        &self.logger
    }

    /// Escape a value the way every generated statement does.
    pub fn escape(&self, value: impl Into<Scalar>) -> DbResult<String> {
        escape_literal(&value.into())
    }

    // ==================== Execution ====================

    /// Run one statement on a pooled connection.
    ///
    /// With non-empty `values`, each `?` placeholder in `sql` is bound to the matching
    /// value. The connection is released on every exit path.
    ///
    /// Whenever the server sends rows the result is [`QueryOutput::Rows`], so `CALL`
    /// and `/*! ... */` statements keep their result sets. A statement that sends no
    /// rows is a [`QueryOutput::Mutation`] unless it starts with a read keyword.
    pub async fn query(&self, sql: &str, values: &[Scalar]) -> DbResult<QueryOutput> {
        if sql.trim().is_empty() {
            return Err(DbError::missing_field("sql statement is empty"));
        }
        let pool = self.pool()?;

        let mut conn = match pool.acquire().await {
            Ok(conn) => conn,
            Err(e) => {
                self.logger.error(&format!("failed to acquire connection: {e}"));
                return Err(e);
            }
        };

        if values.is_empty() {
            self.logger.debug(sql);
        } else {
            self.logger.debug(&format!("{sql} -- values: {values:?}"));
        }

        let result = conn.execute(sql, values).await;
        drop(conn);

        if let Err(e) = &result {
            self.logger.error(&format!("query failed ({}): {e}", e.code()));
        }
        result
    }

    /// Run a hand-written statement. Same as [`Db::query`].
    pub async fn execute_sql(&self, sql: &str, values: &[Scalar]) -> DbResult<QueryOutput> {
        self.query(sql, values).await
    }

    // ==================== DDL ====================

    pub async fn create_table(
        &self,
        table: &str,
        schema: &TableSchema,
        options: &TableOptions,
    ) -> DbResult<()> {
        let sql = qb::render_create_table(table, schema, options)?;
        self.query(&sql, &[]).await.map(|_| ())
    }

    pub async fn drop_table(&self, table: &str) -> DbResult<()> {
        let sql = qb::render_drop_table(table)?;
        self.query(&sql, &[]).await.map(|_| ())
    }

    // ==================== Reads ====================

    /// Rows matching `spec`.
    pub async fn select_rows(&self, spec: &SelectSpec) -> DbResult<Vec<Row>> {
        let sql = qb::render_select(spec)?;
        self.query(&sql, &[]).await?.into_rows()
    }

    /// Rows matching `spec`, mapped through [`FromRow`].
    pub async fn fetch_all<T: FromRow>(&self, spec: &SelectSpec) -> DbResult<Vec<T>> {
        self.select_rows(spec)
            .await?
            .iter()
            .map(T::from_row)
            .collect()
    }

    /// `COUNT(*)` of the rows matching `spec`'s table and conditions.
    ///
    /// Projection, ordering and pagination are ignored.
    pub async fn get_count(&self, spec: &SelectSpec) -> DbResult<u64> {
        let sql = qb::render_count(&spec.table, &spec.conditions)?;
        let rows = self.query(&sql, &[]).await?.into_rows()?;
        first_count(&rows)
    }

    /// First column of the first row of a hand-written count query.
    pub async fn get_count_with_sql(&self, sql: &str) -> DbResult<u64> {
        let rows = self.query(sql, &[]).await?.into_rows()?;
        first_count(&rows)
    }

    // ==================== Writes ====================

    /// `INSERT [IGNORE] INTO`. With `ignore_duplicates`, a row that collides with a
    /// unique key is skipped and reported as `affected_rows == 0`.
    pub async fn insert(
        &self,
        table: &str,
        payload: &Values,
        ignore_duplicates: bool,
    ) -> DbResult<MutationSummary> {
        let sql = qb::render_insert(table, payload, ignore_duplicates)?;
        self.mutate(&sql).await
    }

    /// Insert one row and return its AUTO_INCREMENT id.
    pub async fn insert_and_return_id(&self, table: &str, payload: &Values) -> DbResult<u64> {
        Ok(self.insert(table, payload, false).await?.insert_id)
    }

    /// `UPDATE ... SET ... WHERE <conditions>`.
    ///
    /// Empty `conditions` update every row of the table; a warning is logged.
    pub async fn update(
        &self,
        table: &str,
        conditions: &Values,
        set_values: &Values,
    ) -> DbResult<MutationSummary> {
        let sql = qb::render_update(table, conditions, set_values)?;
        if conditions.is_empty() {
            self.logger
                .warn(&format!("UPDATE on `{table}` without conditions affects every row"));
        }
        self.mutate(&sql).await
    }

    /// `DELETE FROM ... WHERE <conditions>`. Empty `conditions` are rejected before any
    /// connection is acquired.
    pub async fn delete(&self, table: &str, conditions: &Values) -> DbResult<MutationSummary> {
        let sql = qb::render_delete(table, conditions)?;
        self.mutate(&sql).await
    }

    pub async fn replace(&self, table: &str, payload: &Values) -> DbResult<MutationSummary> {
        let sql = qb::render_replace(table, payload)?;
        self.mutate(&sql).await
    }

    /// Insert, or update `set_values` when `key_values` collide with a unique key.
    pub async fn upsert(
        &self,
        table: &str,
        key_values: &Values,
        set_values: &Values,
    ) -> DbResult<MutationSummary> {
        let sql = qb::render_upsert(table, key_values, set_values)?;
        self.mutate(&sql).await
    }

    async fn mutate(&self, sql: &str) -> DbResult<MutationSummary> {
        self.query(sql, &[]).await?.into_mutation()
    }
}

fn first_count(rows: &[Row]) -> DbResult<u64> {
    let value = rows
        .first()
        .and_then(|row| row.get_index(0))
        .ok_or_else(|| DbError::decode("COUNT(*)", "count query returned no rows"))?;

    match value {
        Value::Int(_) | Value::UInt(_) => value
            .as_u64()
            .ok_or_else(|| DbError::decode("COUNT(*)", "negative count")),
        Value::Text(text) => text
            .trim()
            .parse()
            .map_err(|_| DbError::decode("COUNT(*)", format!("not a count: {text}"))),
        other => Err(DbError::decode(
            "COUNT(*)",
            format!("expected an integer, got {other:?}"),
        )),
    }
}

#[cfg(feature = "mysql")]
mod mysql_facade {
    use super::*;
    use crate::config::DbConfig;
    use crate::mysql::{MySqlPool, PoolStatus};

    impl Db<MySqlPool> {
        /// Validate `config` and build a ready facade over a MySQL pool.
        ///
        /// Connections are opened lazily, so this does not touch the network.
        pub fn connect(config: &DbConfig) -> DbResult<Self> {
            Self::connect_with_logger(config, TracingLogger::new())
        }

        pub fn connect_with_logger(
            config: &DbConfig,
            logger: impl Logger + 'static,
        ) -> DbResult<Self> {
            let logger: Arc<dyn Logger> = Arc::new(logger);
            let pool = MySqlPool::new(config, logger.clone())?;
            logger.info(&format!(
                "mysql pool created for {}:{}/{} (limit {})",
                config.host, config.port, config.database, config.connection_limit
            ));
            Ok(Self {
                state: PoolState::Ready(pool),
                logger,
            })
        }

        /// Close the pool. Later queries fail with [`DbError::PoolExhausted`].
        pub fn close(&self) -> DbResult<()> {
            self.pool()?.close();
            Ok(())
        }

        pub fn status(&self) -> DbResult<PoolStatus> {
            Ok(self.pool()?.status())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_count_accepts_ints_and_text() {
        let int = vec![Row::new().with("COUNT(*)", Value::Int(3))];
        assert_eq!(first_count(&int).unwrap(), 3);
        let text = vec![Row::new().with("n", Value::Text("42".into()))];
        assert_eq!(first_count(&text).unwrap(), 42);
        let unsigned = vec![Row::new().with("n", Value::UInt(7))];
        assert_eq!(first_count(&unsigned).unwrap(), 7);
    }

    #[test]
    fn first_count_rejects_empty_and_non_numeric() {
        assert!(matches!(first_count(&[]), Err(DbError::Decode { .. })));
        let null = vec![Row::new().with("n", Value::Null)];
        assert!(matches!(first_count(&null), Err(DbError::Decode { .. })));
        let negative = vec![Row::new().with("n", Value::Int(-1))];
        assert!(matches!(first_count(&negative), Err(DbError::Decode { .. })));
    }
}
