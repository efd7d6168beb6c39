use sqlx::{migrate::MigrateDatabase, query, sqlite::SqlitePoolOptions, Sqlite, SqlitePool};

use crate::{config::Config, model::TodoRow};

pub const FETCH_TODOS: &str = "SELECT * FROM todos";

/// Open the connection pool, creating the database file first if it does not exist.
///
/// The `todos` table itself is never created here.
pub async fn connect(config: &Config) -> Result<SqlitePool, sqlx::Error> {
    let url = config.database_url.as_str();

    if !Sqlite::database_exists(url).await.unwrap_or(false) {
        tracing::info!(database_url = url, "Creating database");
        Sqlite::create_database(url).await?;
    }

    SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect(url)
        .await
}

// Fetch every row of the todos table in the store's default scan order
pub async fn fetch_todos(pool: &SqlitePool) -> Result<Vec<TodoRow>, sqlx::Error> {
    let rows = query(FETCH_TODOS).fetch_all(pool).await?;
    rows.iter().map(TodoRow::from_row).collect()
}

// Each connection to `sqlite::memory:` is its own database, so tests pin the pool to one
#[cfg(test)]
pub(crate) async fn memory_pool() -> SqlitePool {
    SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .unwrap()
}

#[cfg(test)]
pub(crate) async fn seed_todos(pool: &SqlitePool, rows: &[(&str, bool)]) {
    query(
        r#"CREATE TABLE IF NOT EXISTS todos (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL,
        done BOOLEAN NOT NULL DEFAULT 0
    );"#,
    )
    .execute(pool)
    .await
    .unwrap();

    for (title, done) in rows {
        query("INSERT INTO todos (title, done) VALUES (?, ?)")
            .bind(*title)
            .bind(*done)
            .execute(pool)
            .await
            .unwrap();
    }
}
