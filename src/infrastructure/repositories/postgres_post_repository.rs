use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::post::Post;
use crate::domain::repositories::{PostRepository, RepositoryError, RepositoryResult};

// Likes live in `post_likes`; they are folded back into an array per post.
const POST_SELECT: &str = r#"
    SELECT
        p.id, p.content, p.image, p.author_id, p.created_at, p.updated_at,
        COALESCE(
            array_agg(l.user_id ORDER BY l.created_at) FILTER (WHERE l.user_id IS NOT NULL),
            '{}'
        ) AS likes
    FROM posts p
    LEFT JOIN post_likes l ON l.post_id = p.id
"#;

#[derive(sqlx::FromRow)]
struct PostRow {
    id: Uuid,
    content: String,
    image: String,
    author_id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    likes: Vec<Uuid>,
}

impl From<PostRow> for Post {
    fn from(r: PostRow) -> Self {
        Post {
            id: r.id,
            content: r.content,
            image: r.image,
            author: r.author_id,
            likes: r.likes,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

/// PostgreSQL implementation of PostRepository
pub struct PostgresPostRepository {
    pool: PgPool,
}

impl PostgresPostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn create(&self, post: &Post) -> RepositoryResult<()> {
        sqlx::query(
            r#"
            INSERT INTO posts (id, content, image, author_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(post.id)
        .bind(&post.content)
        .bind(&post.image)
        .bind(post.author)
        .bind(post.created_at)
        .bind(post.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<Post>> {
        let sql = format!("{} WHERE p.id = $1 GROUP BY p.id", POST_SELECT);
        let row = sqlx::query_as::<_, PostRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Post::from))
    }

    async fn find_all(&self) -> RepositoryResult<Vec<Post>> {
        let sql = format!("{} GROUP BY p.id ORDER BY p.created_at DESC", POST_SELECT);
        let rows = sqlx::query_as::<_, PostRow>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Post::from).collect())
    }

    async fn update(&self, post: &Post) -> RepositoryResult<()> {
        let result = sqlx::query(
            "UPDATE posts SET content = $2, image = $3, updated_at = $4 WHERE id = $1",
        )
        .bind(post.id)
        .bind(&post.content)
        .bind(&post.image)
        .bind(post.updated_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::not_found("Post", post.id));
        }

        Ok(())
    }

    async fn delete(&self, id: Uuid) -> RepositoryResult<()> {
        // post_likes and comments cascade
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::not_found("Post", id));
        }

        Ok(())
    }

    async fn toggle_like(&self, post_id: Uuid, user_id: Uuid) -> RepositoryResult<Vec<Uuid>> {
        let mut tx = self.pool.begin().await?;

        // Row lock serialises concurrent toggles on the same post
        let exists: Option<Uuid> = sqlx::query_scalar("SELECT id FROM posts WHERE id = $1 FOR UPDATE")
            .bind(post_id)
            .fetch_optional(&mut *tx)
            .await?;

        if exists.is_none() {
            return Err(RepositoryError::not_found("Post", post_id));
        }

        let removed = sqlx::query("DELETE FROM post_likes WHERE post_id = $1 AND user_id = $2")
            .bind(post_id)
            .bind(user_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if removed == 0 {
            sqlx::query("INSERT INTO post_likes (post_id, user_id) VALUES ($1, $2)")
                .bind(post_id)
                .bind(user_id)
                .execute(&mut *tx)
                .await?;
        }

        let likes: Vec<Uuid> = sqlx::query_scalar(
            "SELECT user_id FROM post_likes WHERE post_id = $1 ORDER BY created_at",
        )
        .bind(post_id)
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(likes)
    }
}
