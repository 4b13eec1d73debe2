use sqlx::sqlite::SqliteConnectOptions;

/// Connection options for the single database file; the file is created on first open.
pub fn connect_options(database_path: &str) -> SqliteConnectOptions {
    SqliteConnectOptions::new()
        .filename(database_path)
        .create_if_missing(true)
}
