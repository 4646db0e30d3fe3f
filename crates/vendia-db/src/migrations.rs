//! # Database Migrations
//!
//! Embedded SQL migrations for the vendia schema.
//!
//! ## Adding New Migrations
//!
//! 1. Create a new file in `migrations/sqlite/` with the next sequence
//!    number, named `NNN_description.sql`
//! 2. Write idempotent SQL (use `IF NOT EXISTS` where possible)
//! 3. NEVER modify an existing migration — always add a new one

use sqlx::SqlitePool;
use tracing::info;

use crate::error::DbResult;

/// Embedded migrations from the shared `migrations/sqlite` directory.
/// The `sqlx::migrate!()` macro embeds the SQL files into the binary at
/// compile time; no runtime file access is needed.
static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations/sqlite");

/// Runs all pending database migrations.
///
/// Idempotent: applied migrations are tracked in `_sqlx_migrations` and
/// skipped on subsequent runs; each pending migration runs in its own
/// transaction, in filename order.
pub async fn run_migrations(pool: &SqlitePool) -> DbResult<()> {
    info!("Checking for pending migrations");

    MIGRATOR.run(pool).await?;

    info!("All migrations applied");
    Ok(())
}

/// Returns `(total_migrations, applied_migrations)` for diagnostics.
pub async fn migration_status(pool: &SqlitePool) -> DbResult<(usize, usize)> {
    let total = MIGRATOR.migrations.len();

    let applied: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations")
        .fetch_one(pool)
        .await
        .unwrap_or(0);

    Ok((total, applied as usize))
}
