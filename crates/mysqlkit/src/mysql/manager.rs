//! deadpool manager for `sqlx::MySqlConnection`.

use crate::log::Logger;
use deadpool::managed::{self, Metrics, RecycleError, RecycleResult};
use sqlx::mysql::{MySqlConnectOptions, MySqlConnection};
use sqlx::{ConnectOptions, Connection};
use std::sync::Arc;

/// Statement run on every new physical connection.
pub(crate) const SESSION_INIT_SQL: &str = "SET SESSION auto_increment_increment=1";

/// Opens, initializes and health-checks pooled MySQL connections.
pub struct ConnectionManager {
    options: MySqlConnectOptions,
    logger: Arc<dyn Logger>,
}

impl ConnectionManager {
    pub fn new(options: MySqlConnectOptions, logger: Arc<dyn Logger>) -> Self {
        Self { options, logger }
    }
}

impl std::fmt::Debug for ConnectionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionManager").finish_non_exhaustive()
    }
}

impl managed::Manager for ConnectionManager {
    type Type = MySqlConnection;
    type Error = sqlx::Error;

    async fn create(&self) -> Result<MySqlConnection, sqlx::Error> {
        let mut conn = match self.options.connect().await {
            Ok(conn) => conn,
            Err(e) => {
                self.logger.error(&format!("mysql connect failed: {e}"));
                return Err(e);
            }
        };

        if let Err(e) = sqlx::Executor::execute(&mut conn, sqlx::raw_sql(SESSION_INIT_SQL)).await {
            self.logger.error(&format!("mysql session init failed: {e}"));
            return Err(e);
        }
        self.logger.info(&format!(
            "new mysql connection established, ran `{SESSION_INIT_SQL}`"
        ));
        Ok(conn)
    }

    async fn recycle(
        &self,
        conn: &mut MySqlConnection,
        _: &Metrics,
    ) -> RecycleResult<sqlx::Error> {
        conn.ping().await.map_err(RecycleError::Backend)
    }
}
