//! PostgreSQL implementation of RatingRepository.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;

use super::column;
use crate::domain::foundation::{
    ClientId, DomainError, ErrorCode, ImageId, RatingId, Timestamp,
};
use crate::domain::rating::{NewRating, Rating, Stars};
use crate::ports::RatingRepository;

const RATING_COLUMNS: &str = "id, image_id, client_id, stars, comment, created_at, updated_at";

/// PostgreSQL implementation of RatingRepository.
#[derive(Clone)]
pub struct PostgresRatingRepository {
    pool: PgPool,
}

impl PostgresRatingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RatingRepository for PostgresRatingRepository {
    async fn upsert(&self, rating: &NewRating) -> Result<Rating, DomainError> {
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO ratings (image_id, client_id, stars, comment, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $5)
            ON CONFLICT (image_id, client_id) DO UPDATE SET
                stars = EXCLUDED.stars,
                comment = EXCLUDED.comment,
                updated_at = EXCLUDED.updated_at
            RETURNING {}
            "#,
            RATING_COLUMNS
        ))
        .bind(rating.image_id.value())
        .bind(rating.client_id.value())
        .bind(rating.stars.value() as i16)
        .bind(rating.comment.as_deref())
        .bind(Timestamp::now().as_datetime())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to save rating", e))?;

        row_to_rating(&row)
    }

    async fn list_by_image(&self, image_id: ImageId) -> Result<Vec<Rating>, DomainError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM ratings WHERE image_id = $1 ORDER BY created_at, id",
            RATING_COLUMNS
        ))
        .bind(image_id.value())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to list ratings", e))?;

        rows.iter().map(row_to_rating).collect()
    }
}

fn row_to_rating(row: &PgRow) -> Result<Rating, DomainError> {
    let stars: i16 = column(row, "stars")?;
    let created_at: chrono::DateTime<chrono::Utc> = column(row, "created_at")?;
    let updated_at: chrono::DateTime<chrono::Utc> = column(row, "updated_at")?;

    Ok(Rating::reconstitute(
        RatingId::new(column(row, "id")?)?,
        ImageId::new(column(row, "image_id")?)?,
        ClientId::new(column(row, "client_id")?)?,
        Stars::new(stars as i64).map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Invalid stored rating: {}", e),
            )
        })?,
        column(row, "comment")?,
        Timestamp::from_datetime(created_at),
        Timestamp::from_datetime(updated_at),
    ))
}
