use crate::database::DbError;
use common_types::{NewSubmission, PlaceSubmission};
use sqlx::{Executor, Postgres};
use uuid::Uuid;

const SUBMISSION_COLUMNS: &str = "id, place_name, city, country, name, why_special, photo_url, \
     email, is_featured, status, submitted_at";

pub struct PlaceSubmissionStore;

impl PlaceSubmissionStore {
    //================================================================================
    // Public gallery reads (approved rows only)
    //================================================================================

    /// Raw city values of all approved submissions, untrimmed and with duplicates.
    pub async fn list_city_values(
        executor: impl Executor<'_, Database = Postgres>,
    ) -> Result<Vec<String>, DbError> {
        Ok(sqlx::query_scalar::<_, String>(
            r"
            SELECT city
            FROM place_submissions
            WHERE status = 'approved' AND city IS NOT NULL AND city <> ''
            ",
        )
        .fetch_all(executor)
        .await?)
    }

    /// Newest approved submissions for one city, matched case-insensitively.
    pub async fn find_by_city(
        executor: impl Executor<'_, Database = Postgres>,
        city: &str,
        limit: i64,
    ) -> Result<Vec<PlaceSubmission>, DbError> {
        let query = format!(
            r"
            SELECT {SUBMISSION_COLUMNS}
            FROM place_submissions
            WHERE status = 'approved' AND lower(btrim(city)) = lower(btrim($1))
            ORDER BY submitted_at DESC
            LIMIT $2
            "
        );
        Ok(sqlx::query_as::<_, PlaceSubmission>(&query)
            .bind(city)
            .bind(limit)
            .fetch_all(executor)
            .await?)
    }

    /// Newest approved submissions curated as featured.
    pub async fn find_featured(
        executor: impl Executor<'_, Database = Postgres>,
        limit: i64,
    ) -> Result<Vec<PlaceSubmission>, DbError> {
        let query = format!(
            r"
            SELECT {SUBMISSION_COLUMNS}
            FROM place_submissions
            WHERE status = 'approved' AND is_featured
            ORDER BY submitted_at DESC
            LIMIT $1
            "
        );
        Ok(sqlx::query_as::<_, PlaceSubmission>(&query)
            .bind(limit)
            .fetch_all(executor)
            .await?)
    }

    /// Newest approved submissions whose id is not in `exclude`.
    pub async fn find_latest_excluding(
        executor: impl Executor<'_, Database = Postgres>,
        exclude: &[Uuid],
        limit: i64,
    ) -> Result<Vec<PlaceSubmission>, DbError> {
        if limit <= 0 {
            return Ok(Vec::new());
        }
        let query = format!(
            r"
            SELECT {SUBMISSION_COLUMNS}
            FROM place_submissions
            WHERE status = 'approved' AND NOT (id = ANY($1))
            ORDER BY submitted_at DESC
            LIMIT $2
            "
        );
        Ok(sqlx::query_as::<_, PlaceSubmission>(&query)
            .bind(exclude)
            .bind(limit)
            .fetch_all(executor)
            .await?)
    }

    //================================================================================
    // Submission writes
    //================================================================================

    /// Inserts a submission without email and returns its server-assigned id.
    pub async fn insert(
        executor: impl Executor<'_, Database = Postgres>,
        submission: &NewSubmission,
    ) -> Result<Uuid, DbError> {
        Ok(sqlx::query_scalar::<_, Uuid>(
            r"
            INSERT INTO place_submissions (place_name, city, country, name, why_special, photo_url, email)
            VALUES ($1, $2, $3, $4, $5, $6, NULL)
            RETURNING id
            ",
        )
        .bind(&submission.place_name)
        .bind(&submission.city)
        .bind(&submission.country)
        .bind(&submission.name)
        .bind(&submission.why_special)
        .bind(&submission.photo_url)
        .fetch_one(executor)
        .await?)
    }

    /// Attaches an email to an existing submission. Returns whether a row was updated.
    pub async fn update_email(
        executor: impl Executor<'_, Database = Postgres>,
        id: Uuid,
        email: &str,
    ) -> Result<bool, DbError> {
        let result = sqlx::query(
            r"
            UPDATE place_submissions
            SET email = $1
            WHERE id = $2
            ",
        )
        .bind(email)
        .bind(id)
        .execute(executor)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn find_by_id(
        executor: impl Executor<'_, Database = Postgres>,
        id: Uuid,
    ) -> Result<Option<PlaceSubmission>, DbError> {
        let query = format!("SELECT {SUBMISSION_COLUMNS} FROM place_submissions WHERE id = $1");
        Ok(sqlx::query_as::<_, PlaceSubmission>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await?)
    }
}
