//! SQLite ledger persistence.
//!
//! Mirrors the whole ledger into the `predictions` table. Each persist
//! upserts every row inside a single transaction, so readers never observe a
//! partially written ledger. The `seq` column preserves insertion order.

use diesel::prelude::*;
use tracing::{debug, warn};

use super::database::connection::{configure_sqlite_connection, create_pool, run_migrations, DbPool};
use super::database::model::PredictionRow;
use super::database::schema::predictions;
use crate::domain::PredictionRecord;
use crate::error::{Error, Result};
use crate::port::LedgerPersistence;

/// SQLite-backed [`LedgerPersistence`].
pub struct SqliteLedger {
    pool: DbPool,
}

impl SqliteLedger {
    /// Wrap an existing pool. Migrations must already have run.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Open the database at `database_url` and apply pending migrations.
    ///
    /// # Errors
    /// Returns an error if the pool cannot be created or migrations fail.
    pub fn open(database_url: &str) -> Result<Self> {
        let pool = create_pool(database_url)?;
        run_migrations(&pool)?;
        debug!(database = database_url, "SQLite ledger ready");
        Ok(Self::new(pool))
    }

    fn conn(
        &self,
    ) -> Result<diesel::r2d2::PooledConnection<diesel::r2d2::ConnectionManager<SqliteConnection>>>
    {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| Error::Connection(e.to_string()))?;
        if let Err(e) = configure_sqlite_connection(&mut conn) {
            warn!(error = %e, "Failed to configure SQLite connection");
        }
        Ok(conn)
    }
}

impl std::fmt::Debug for SqliteLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteLedger")
            .field("connections", &self.pool.state().connections)
            .finish()
    }
}

impl LedgerPersistence for SqliteLedger {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn load(&self) -> Result<Vec<PredictionRecord>> {
        let mut conn = self.conn()?;
        let rows = predictions::table
            .order(predictions::seq.asc())
            .select(PredictionRow::as_select())
            .load::<PredictionRow>(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        rows.into_iter().map(PredictionRow::into_record).collect()
    }

    fn persist(&self, records: &[PredictionRecord]) -> Result<()> {
        let rows = records
            .iter()
            .enumerate()
            .map(|(seq, record)| PredictionRow::from_record(record, seq))
            .collect::<Result<Vec<_>>>()?;

        let mut conn = self.conn()?;
        conn.transaction(|conn| {
            for row in &rows {
                diesel::replace_into(predictions::table)
                    .values(row)
                    .execute(conn)?;
            }
            Ok::<(), diesel::result::Error>(())
        })
        .map_err(|e| Error::Database(e.to_string()))?;

        debug!(rows = rows.len(), "Persisted ledger to SQLite");
        Ok(())
    }
}
