//! Read-only aggregate queries against the bot's database.
//!
//! The service never writes here; the pool is opened read-only and a missing
//! or unreachable database degrades the service to file-only mode rather
//! than failing startup.

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

/// Open a read-only connection pool to the bot's SQLite database.
pub async fn init_pool(db_path: &str) -> Result<SqlitePool, sqlx::Error> {
    let opts = SqliteConnectOptions::from_str(&format!("sqlite://{}", db_path))?.read_only(true);

    SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(opts)
        .await
}

/// A bot user row, as stored by the bot process.
#[derive(Debug, sqlx::FromRow)]
pub struct UserRow {
    pub id: i64,
    pub name: String,
    pub surname: String,
    pub username: String,
}

impl std::fmt::Display for UserRow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} ({}) {}", self.name, self.surname, self.username, self.id)
    }
}

/// Total number of registered bot users.
pub async fn count_users(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM botusers")
        .fetch_one(pool)
        .await
}

/// Total number of messages the bot has received.
pub async fn count_messages(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM messages")
        .fetch_one(pool)
        .await
}

/// The user who sent the most recent message, or `None` when there are no
/// messages yet.
pub async fn last_user(pool: &SqlitePool) -> Result<Option<UserRow>, sqlx::Error> {
    sqlx::query_as::<_, UserRow>(
        "SELECT u.id, u.name, u.surname, u.username \
         FROM botusers u JOIN messages m ON m.user_id = u.id \
         ORDER BY m.sent_at DESC, m.id DESC LIMIT 1",
    )
    .fetch_optional(pool)
    .await
}
