use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::{Connection, FromRow, SqliteConnection};
use tokio::sync::Mutex;
use tracing::warn;

use crate::data::post_repository::{NewPost, PostPatch, PostRepository};
use crate::domain::error::DomainError;
use crate::domain::post::Post;

/// Opens a fresh connection per call; no handle is shared between tasks.
///
/// Every mutating call holds `write_lock` from connection open through commit, so at most
/// one mutation runs at a time. Reads take no lock and see whatever SQLite's file locking
/// gives them.
#[derive(Debug, Clone)]
pub(crate) struct SqlitePostRepository {
    options: SqliteConnectOptions,
    write_lock: Arc<Mutex<()>>,
}

impl SqlitePostRepository {
    pub(crate) fn new(options: SqliteConnectOptions) -> Self {
        Self {
            options,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    // A connection dropped on an error path is closed by its Drop impl.
    async fn open(&self) -> Result<SqliteConnection, DomainError> {
        SqliteConnection::connect_with(&self.options)
            .await
            .map_err(map_post_db_error)
    }

    async fn close(conn: SqliteConnection) -> Result<(), DomainError> {
        conn.close().await.map_err(map_post_db_error)
    }
}

#[derive(FromRow)]
struct PostRow {
    id: i64,
    title: Option<String>,
    content: Option<String>,
    created_at: Option<NaiveDateTime>,
}

#[async_trait]
impl PostRepository for SqlitePostRepository {
    async fn create_table(&self) -> Result<(), DomainError> {
        let _guard = self.write_lock.lock().await;
        let mut conn = self.open().await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS posts (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                content TEXT NOT NULL,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )
            "#,
        )
        .execute(&mut conn)
        .await
        .map_err(map_post_db_error)?;

        Self::close(conn).await
    }

    async fn add_post(&self, input: NewPost) -> Result<i64, DomainError> {
        let _guard = self.write_lock.lock().await;
        let mut conn = self.open().await?;

        let result = sqlx::query("INSERT INTO posts (title, content) VALUES (?, ?)")
            .bind(&input.title)
            .bind(&input.content)
            .execute(&mut conn)
            .await
            .map_err(map_post_db_error)?;

        Self::close(conn).await?;
        Ok(result.last_insert_rowid())
    }

    async fn get_all_posts(&self) -> Result<Vec<Post>, DomainError> {
        let mut conn = self.open().await?;

        let rows = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT id, title, content, created_at
            FROM posts
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&mut conn)
        .await
        .map_err(map_post_db_error)?;

        Self::close(conn).await?;
        rows.into_iter().map(map_row_to_post).collect()
    }

    async fn get_post_by_id(&self, id: i64) -> Result<Option<Post>, DomainError> {
        let mut conn = self.open().await?;

        let row = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT id, title, content, created_at
            FROM posts
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&mut conn)
        .await
        .map_err(map_post_db_error)?;

        Self::close(conn).await?;
        row.map(map_row_to_post).transpose()
    }

    async fn update_post(&self, id: i64, patch: PostPatch) -> Result<bool, DomainError> {
        let _guard = self.write_lock.lock().await;
        let mut conn = self.open().await?;

        let result = sqlx::query("UPDATE posts SET title = ?, content = ? WHERE id = ?")
            .bind(&patch.title)
            .bind(&patch.content)
            .bind(id)
            .execute(&mut conn)
            .await
            .map_err(map_post_db_error)?;

        Self::close(conn).await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_post(&self, id: i64) -> Result<bool, DomainError> {
        let _guard = self.write_lock.lock().await;
        let mut conn = self.open().await?;

        let result = sqlx::query("DELETE FROM posts WHERE id = ?")
            .bind(id)
            .execute(&mut conn)
            .await
            .map_err(map_post_db_error)?;

        Self::close(conn).await?;
        Ok(result.rows_affected() > 0)
    }

    async fn check_connection(&self) -> bool {
        let probe = async {
            let mut conn = self.open().await?;
            sqlx::query_scalar::<_, i64>("SELECT 1")
                .fetch_one(&mut conn)
                .await
                .map_err(map_post_db_error)?;
            Self::close(conn).await
        };

        match probe.await {
            Ok(()) => true,
            Err(err) => {
                warn!(error = %err, "database liveness probe failed");
                false
            }
        }
    }
}

fn map_row_to_post(row: PostRow) -> Result<Post, DomainError> {
    let id = row.id;
    let missing = |column: &str| DomainError::Integrity(format!("post {id}: {column} is NULL"));

    let title = row.title.ok_or_else(|| missing("title"))?;
    let content = row.content.ok_or_else(|| missing("content"))?;
    let created_at = row.created_at.ok_or_else(|| missing("created_at"))?;

    // Input rules live in Create/UpdatePostRequest; reads return what is stored.
    Ok(Post::new(id, title, content, created_at.and_utc()))
}

fn map_post_db_error(err: sqlx::Error) -> DomainError {
    match err {
        sqlx::Error::ColumnDecode { .. } | sqlx::Error::ColumnNotFound(_) => {
            DomainError::Integrity(err.to_string())
        }
        _ => DomainError::Storage(err.to_string()),
    }
}
