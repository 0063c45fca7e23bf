//! PostgreSQL database operations

use sqlx::{postgres::PgPoolOptions, PgPool};
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::models::*;

const ITEM_WITH_PROGRESS_COLUMNS: &str = r#"
    i.id, i.subject_id, i.term, i.definition, i.question, i.choices, i.answer_index,
    i.created_at, i.updated_at,
    p.last_seen, p.last_result, p.times_seen, p.easy_count, p.medium_count,
    p.hard_count, p.next_due
"#;

/// Database wrapper with connection pool
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Connect to PostgreSQL and create connection pool
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    /// Create a pool that connects on first use
    pub fn connect_lazy(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new().connect_lazy(database_url)?;
        Ok(Self { pool })
    }

    /// Run database migrations
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    /// Get the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    // === User Repository ===

    /// Create a user identified by the digest of its bearer token
    pub async fn create_user(
        &self,
        token_hash: &str,
        display_name: Option<&str>,
    ) -> Result<DbUser> {
        let user = sqlx::query_as::<_, DbUser>(
            r#"
            INSERT INTO users (token_hash, display_name)
            VALUES ($1, $2)
            RETURNING id, token_hash, display_name, created_at, last_seen_at
            "#,
        )
        .bind(token_hash)
        .bind(display_name)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    /// Get user by token digest
    pub async fn get_user_by_token_hash(&self, token_hash: &str) -> Result<Option<DbUser>> {
        let user = sqlx::query_as::<_, DbUser>(
            r#"
            SELECT id, token_hash, display_name, created_at, last_seen_at
            FROM users
            WHERE token_hash = $1
            "#,
        )
        .bind(token_hash)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Get user by ID
    pub async fn get_user(&self, user_id: Uuid) -> Result<Option<DbUser>> {
        let user = sqlx::query_as::<_, DbUser>(
            r#"
            SELECT id, token_hash, display_name, created_at, last_seen_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Update user last_seen_at timestamp
    pub async fn update_last_seen(&self, user_id: Uuid) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE users
            SET last_seen_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    // === Subject Repository ===

    /// List a user's subjects, oldest first, with item counts
    pub async fn list_subjects(&self, owner_id: Uuid) -> Result<Vec<DbSubject>> {
        let subjects = sqlx::query_as::<_, DbSubject>(
            r#"
            SELECT s.id, s.owner_id, s.name, s.slug, s.created_at, s.updated_at,
                   COUNT(i.id) AS item_count
            FROM subjects s
            LEFT JOIN items i ON i.subject_id = s.id
            WHERE s.owner_id = $1
            GROUP BY s.id
            ORDER BY s.created_at
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(subjects)
    }

    /// Create a subject. A slug already used by this owner is a conflict.
    pub async fn create_subject(
        &self,
        owner_id: Uuid,
        name: &str,
        slug: &str,
    ) -> Result<DbSubject> {
        sqlx::query_as::<_, DbSubject>(
            r#"
            INSERT INTO subjects (owner_id, name, slug)
            VALUES ($1, $2, $3)
            RETURNING id, owner_id, name, slug, created_at, updated_at, 0::BIGINT AS item_count
            "#,
        )
        .bind(owner_id)
        .bind(name)
        .bind(slug)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            ApiError::conflict_on_unique(e, &format!("Subject '{}' already exists", slug))
        })
    }

    /// Get a subject owned by `owner_id`
    pub async fn get_subject_by_slug(
        &self,
        owner_id: Uuid,
        slug: &str,
    ) -> Result<Option<DbSubject>> {
        let subject = sqlx::query_as::<_, DbSubject>(
            r#"
            SELECT s.id, s.owner_id, s.name, s.slug, s.created_at, s.updated_at,
                   COUNT(i.id) AS item_count
            FROM subjects s
            LEFT JOIN items i ON i.subject_id = s.id
            WHERE s.owner_id = $1 AND s.slug = $2
            GROUP BY s.id
            "#,
        )
        .bind(owner_id)
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?;

        Ok(subject)
    }

    /// Get a subject or fail with NotFound
    pub async fn require_subject(&self, owner_id: Uuid, slug: &str) -> Result<DbSubject> {
        self.get_subject_by_slug(owner_id, slug)
            .await?
            .ok_or_else(|| ApiError::NotFound("Subject not found".to_string()))
    }

    /// Delete a subject; items and progress cascade
    pub async fn delete_subject(&self, owner_id: Uuid, slug: &str) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM subjects
            WHERE owner_id = $1 AND slug = $2
            "#,
        )
        .bind(owner_id)
        .bind(slug)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    // === Item Repository ===

    /// All items of a subject joined with `user_id`'s progress, oldest first
    pub async fn list_items_with_progress(
        &self,
        subject_id: Uuid,
        user_id: Uuid,
    ) -> Result<Vec<ItemWithProgress>> {
        let query = format!(
            r#"
            SELECT {ITEM_WITH_PROGRESS_COLUMNS}
            FROM items i
            LEFT JOIN item_progress p ON p.item_id = i.id AND p.user_id = $2
            WHERE i.subject_id = $1
            ORDER BY i.created_at, i.id
            "#
        );

        let rows = sqlx::query_as::<_, DbItemWithProgress>(&query)
            .bind(subject_id)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(DbItemWithProgress::to_core_item).collect())
    }

    /// One item of a subject joined with `user_id`'s progress
    pub async fn get_item_with_progress(
        &self,
        subject_id: Uuid,
        item_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<ItemWithProgress>> {
        let query = format!(
            r#"
            SELECT {ITEM_WITH_PROGRESS_COLUMNS}
            FROM items i
            LEFT JOIN item_progress p ON p.item_id = i.id AND p.user_id = $3
            WHERE i.subject_id = $1 AND i.id = $2
            "#
        );

        let row = sqlx::query_as::<_, DbItemWithProgress>(&query)
            .bind(subject_id)
            .bind(item_id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(DbItemWithProgress::to_core_item))
    }

    /// Insert an item together with a zeroed progress row for its creator
    pub async fn create_item(
        &self,
        subject_id: Uuid,
        user_id: Uuid,
        input: &ItemInput,
    ) -> Result<ItemWithProgress> {
        let mut tx = self.pool.begin().await?;

        let item_id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO items (subject_id, term, definition, question, choices, answer_index)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(subject_id)
        .bind(&input.term)
        .bind(&input.definition)
        .bind(&input.question)
        .bind(&input.choices)
        .bind(input.answer_index.map(|i| i as i32))
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO item_progress (item_id, user_id)
            VALUES ($1, $2)
            "#,
        )
        .bind(item_id)
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

        sqlx::query("UPDATE subjects SET updated_at = NOW() WHERE id = $1")
            .bind(subject_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        self.get_item_with_progress(subject_id, item_id, user_id)
            .await?
            .ok_or_else(|| ApiError::Internal("Failed to create item".to_string()))
    }

    /// Replace an item's content. Returns false when the item is not in the subject.
    pub async fn update_item(
        &self,
        subject_id: Uuid,
        item_id: Uuid,
        input: &ItemInput,
    ) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE items
            SET term = $3, definition = $4, question = $5, choices = $6,
                answer_index = $7, updated_at = NOW()
            WHERE subject_id = $1 AND id = $2
            "#,
        )
        .bind(subject_id)
        .bind(item_id)
        .bind(&input.term)
        .bind(&input.definition)
        .bind(&input.question)
        .bind(&input.choices)
        .bind(input.answer_index.map(|i| i as i32))
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete an item and its progress
    pub async fn delete_item(&self, subject_id: Uuid, item_id: Uuid) -> Result<bool> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            DELETE FROM item_progress
            WHERE item_id = $1
              AND EXISTS (SELECT 1 FROM items WHERE id = $1 AND subject_id = $2)
            "#,
        )
        .bind(item_id)
        .bind(subject_id)
        .execute(&mut *tx)
        .await?;

        let result = sqlx::query("DELETE FROM items WHERE id = $1 AND subject_id = $2")
            .bind(item_id)
            .bind(subject_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(result.rows_affected() > 0)
    }

    /// Whether `item_id` belongs to a subject owned by `user_id`
    pub async fn item_owned_by(&self, item_id: Uuid, user_id: Uuid) -> Result<bool> {
        let owned: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1
                FROM items i
                JOIN subjects s ON s.id = i.subject_id
                WHERE i.id = $1 AND s.owner_id = $2
            )
            "#,
        )
        .bind(item_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(owned)
    }

    // === Progress Repository ===

    /// Apply a progress patch for (item, user).
    ///
    /// Present fields overwrite, absent fields keep their stored value. Without
    /// an existing row, absent fields take the zero/null defaults.
    pub async fn save_progress(
        &self,
        item_id: Uuid,
        user_id: Uuid,
        patch: &ProgressPatch,
    ) -> Result<StudyItemProgress> {
        let mut tx = self.pool.begin().await?;

        let existing = sqlx::query_as::<_, DbItemProgress>(
            r#"
            SELECT item_id, user_id, last_seen, last_result, times_seen, easy_count,
                   medium_count, hard_count, next_due
            FROM item_progress
            WHERE item_id = $1 AND user_id = $2
            FOR UPDATE
            "#,
        )
        .bind(item_id)
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await?;

        let mut progress = existing
            .as_ref()
            .map(DbItemProgress::to_core_progress)
            .unwrap_or_default();
        patch.apply_to(&mut progress);

        let row = DbItemProgress::from_core_progress(item_id, user_id, &progress)?;

        sqlx::query(
            r#"
            INSERT INTO item_progress (item_id, user_id, last_seen, last_result, times_seen,
                                       easy_count, medium_count, hard_count, next_due)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (item_id, user_id) DO UPDATE SET
                last_seen = EXCLUDED.last_seen,
                last_result = EXCLUDED.last_result,
                times_seen = EXCLUDED.times_seen,
                easy_count = EXCLUDED.easy_count,
                medium_count = EXCLUDED.medium_count,
                hard_count = EXCLUDED.hard_count,
                next_due = EXCLUDED.next_due,
                updated_at = NOW()
            "#,
        )
        .bind(row.item_id)
        .bind(row.user_id)
        .bind(row.last_seen)
        .bind(&row.last_result)
        .bind(row.times_seen)
        .bind(row.easy_count)
        .bind(row.medium_count)
        .bind(row.hard_count)
        .bind(row.next_due)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(progress)
    }
}
