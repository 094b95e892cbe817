use async_trait::async_trait;
use sqlx::PgPool;

use crate::{
    app::{
        errors::DefaultApiError,
        models::api_error::ApiError,
        util::{
            sqlx::{get_code_from_db_err, SqlStateCodes},
            time,
        },
    },
    comments::models::comment::Comment,
    posts::{errors::PostsApiError, models::post::Post},
};

use super::{CommentStore, PostStore};

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn internal_error(e: sqlx::Error) -> ApiError {
    tracing::error!(%e);
    DefaultApiError::InternalServerError.value()
}

/// Builds `UPDATE <table> SET ... WHERE ... RETURNING *` for the columns that
/// are present. `updated_at` is always set and bound right after the present
/// columns, followed by the key columns in order.
fn edit_sql(table: &str, columns: &[(&str, bool)], keys: &[&str]) -> String {
    let mut sql = ["UPDATE ", table, " SET "].concat();
    let mut clauses = Vec::new();

    let mut index: u8 = 1;

    // SET CLAUSES
    for &(column, present) in columns {
        if present {
            clauses.push([column, " = $", &index.to_string()].concat());
            index += 1;
        }
    }
    clauses.push(["updated_at = $", &index.to_string()].concat());
    index += 1;

    sql.push_str(&clauses.join(", "));

    // WHERE CLAUSES
    for (i, &key) in keys.iter().enumerate() {
        sql.push_str(if i == 0 { " WHERE " } else { " AND " });
        sql.push_str(&[key, " = $", &index.to_string()].concat());
        index += 1;
    }

    sql.push_str(" RETURNING *");

    tracing::debug!(sql);

    sql
}

#[async_trait]
impl PostStore for PgStore {
    async fn create_post(&self, title: &str, content: &str) -> Result<Post, ApiError> {
        let post = Post::new(title, content);

        sqlx::query_as::<_, Post>(
            "
            INSERT INTO posts (
                title, content, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4)
            RETURNING *
            ",
        )
        .bind(&post.title)
        .bind(&post.content)
        .bind(post.created_at)
        .bind(post.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(internal_error)
    }

    async fn get_posts(&self) -> Result<Vec<Post>, ApiError> {
        sqlx::query_as::<_, Post>(
            "
            SELECT * FROM posts
            ORDER BY id ASC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(internal_error)
    }

    async fn get_post_by_id(&self, id: i64) -> Result<Option<Post>, ApiError> {
        sqlx::query_as::<_, Post>(
            "
            SELECT * FROM posts
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(internal_error)
    }

    async fn edit_post_by_id(
        &self,
        id: i64,
        title: Option<&str>,
        content: Option<&str>,
    ) -> Result<Option<Post>, ApiError> {
        let sql = edit_sql(
            "posts",
            &[("title", title.is_some()), ("content", content.is_some())],
            &["id"],
        );

        let mut sqlx = sqlx::query_as::<_, Post>(&sql);

        if let Some(title) = title {
            sqlx = sqlx.bind(title);
        }
        if let Some(content) = content {
            sqlx = sqlx.bind(content);
        }
        sqlx = sqlx.bind(time::current_time_in_millis()).bind(id);

        sqlx.fetch_optional(&self.pool).await.map_err(internal_error)
    }

    async fn delete_post_by_id(&self, id: i64) -> Result<bool, ApiError> {
        // comments go with it through ON DELETE CASCADE
        let sqlx_result = sqlx::query(
            "
            DELETE FROM posts
            WHERE id = $1
            ",
        )
        .bind(id)
        .execute(&self.pool)
        .await;

        match sqlx_result {
            Ok(result) => Ok(result.rows_affected() > 0),
            Err(e) => Err(internal_error(e)),
        }
    }
}

#[async_trait]
impl CommentStore for PgStore {
    async fn create_comment(
        &self,
        post_id: i64,
        author: &str,
        content: &str,
    ) -> Result<Comment, ApiError> {
        let comment = Comment::new(post_id, author, content);

        let sqlx_result = sqlx::query_as::<_, Comment>(
            "
            INSERT INTO comments (
                post_id, author, content, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            ",
        )
        .bind(comment.post_id)
        .bind(&comment.author)
        .bind(&comment.content)
        .bind(comment.created_at)
        .bind(comment.updated_at)
        .fetch_one(&self.pool)
        .await;

        match sqlx_result {
            Ok(comment) => Ok(comment),
            Err(e) => {
                let Some(db_err) = e.as_database_error() else {
                    return Err(internal_error(e));
                };

                let Some(code) = get_code_from_db_err(db_err) else {
                    return Err(internal_error(e));
                };

                match code.as_str() {
                    SqlStateCodes::FOREIGN_KEY_VIOLATION => Err(PostsApiError::PostNotFound.value()),
                    _ => Err(internal_error(e)),
                }
            }
        }
    }

    async fn get_comments_by_post_id(&self, post_id: i64) -> Result<Vec<Comment>, ApiError> {
        sqlx::query_as::<_, Comment>(
            "
            SELECT * FROM comments
            WHERE post_id = $1
            ORDER BY created_at DESC, id DESC
            ",
        )
        .bind(post_id)
        .fetch_all(&self.pool)
        .await
        .map_err(internal_error)
    }

    async fn get_comments_by_post_ids(&self, post_ids: &[i64]) -> Result<Vec<Comment>, ApiError> {
        if post_ids.is_empty() {
            return Ok(Vec::new());
        }

        sqlx::query_as::<_, Comment>(
            "
            SELECT * FROM comments
            WHERE post_id = ANY($1)
            ORDER BY id ASC
            ",
        )
        .bind(post_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(internal_error)
    }

    async fn get_comment_by_id(&self, post_id: i64, id: i64) -> Result<Option<Comment>, ApiError> {
        sqlx::query_as::<_, Comment>(
            "
            SELECT * FROM comments
            WHERE id = $1 AND post_id = $2
            ",
        )
        .bind(id)
        .bind(post_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(internal_error)
    }

    async fn edit_comment_by_id(
        &self,
        post_id: i64,
        id: i64,
        author: Option<&str>,
        content: Option<&str>,
    ) -> Result<Option<Comment>, ApiError> {
        let sql = edit_sql(
            "comments",
            &[("author", author.is_some()), ("content", content.is_some())],
            &["id", "post_id"],
        );

        let mut sqlx = sqlx::query_as::<_, Comment>(&sql);

        if let Some(author) = author {
            sqlx = sqlx.bind(author);
        }
        if let Some(content) = content {
            sqlx = sqlx.bind(content);
        }
        sqlx = sqlx
            .bind(time::current_time_in_millis())
            .bind(id)
            .bind(post_id);

        sqlx.fetch_optional(&self.pool).await.map_err(internal_error)
    }

    async fn delete_comment_by_id(&self, post_id: i64, id: i64) -> Result<bool, ApiError> {
        let sqlx_result = sqlx::query(
            "
            DELETE FROM comments
            WHERE id = $1 AND post_id = $2
            ",
        )
        .bind(id)
        .bind(post_id)
        .execute(&self.pool)
        .await;

        match sqlx_result {
            Ok(result) => Ok(result.rows_affected() > 0),
            Err(e) => Err(internal_error(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::edit_sql;

    #[test]
    fn edit_sql_binds_present_columns_then_timestamp_then_keys() {
        let sql = edit_sql("posts", &[("title", true), ("content", true)], &["id"]);

        assert_eq!(
            sql,
            "UPDATE posts SET title = $1, content = $2, updated_at = $3 WHERE id = $4 RETURNING *"
        );
    }

    #[test]
    fn edit_sql_skips_absent_columns() {
        let sql = edit_sql(
            "comments",
            &[("author", false), ("content", true)],
            &["id", "post_id"],
        );

        assert_eq!(
            sql,
            "UPDATE comments SET content = $1, updated_at = $2 WHERE id = $3 AND post_id = $4 RETURNING *"
        );
    }

    #[test]
    fn edit_sql_with_nothing_present_still_touches_updated_at() {
        let sql = edit_sql("posts", &[("title", false), ("content", false)], &["id"]);

        assert_eq!(sql, "UPDATE posts SET updated_at = $1 WHERE id = $2 RETURNING *");
    }
}
