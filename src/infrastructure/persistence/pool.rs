//! SQLite connection pool setup and embedded migrations.

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

/// How long a writer waits on a locked database before failing.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Pool sizing and timeout settings.
#[derive(Debug, Clone, Copy)]
pub struct PoolSettings {
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

/// Opens a SQLite pool, creating the database file (and its directory) if missing.
///
/// The database runs in WAL mode so redirects can read while links are written.
///
/// # Errors
///
/// Returns an error if the URL is malformed, the data directory cannot be
/// created, or the first connection fails.
pub async fn connect(database_url: &str, settings: PoolSettings) -> Result<SqlitePool, sqlx::Error> {
    ensure_parent_dir(database_url)?;

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(BUSY_TIMEOUT);

    SqlitePoolOptions::new()
        .max_connections(settings.max_connections)
        .acquire_timeout(settings.acquire_timeout)
        .connect_with(options)
        .await
}

/// Applies the migrations embedded from `./migrations`.
///
/// # Errors
///
/// Returns an error if a migration fails or the recorded history diverges.
pub async fn migrate(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// Creates the directory holding a file-backed database.
fn ensure_parent_dir(database_url: &str) -> Result<(), sqlx::Error> {
    let Some(path) = database_file_path(database_url) else {
        return Ok(());
    };

    if let Some(parent) = Path::new(path).parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }

    Ok(())
}

/// Extracts the filesystem path from a `sqlite:` URL, or `None` for in-memory databases.
fn database_file_path(database_url: &str) -> Option<&str> {
    let rest = database_url.strip_prefix("sqlite:")?;
    let rest = rest.strip_prefix("//").unwrap_or(rest);
    let path = rest.split('?').next().unwrap_or(rest);

    if path.is_empty() || path == ":memory:" {
        return None;
    }

    Some(path)
}
