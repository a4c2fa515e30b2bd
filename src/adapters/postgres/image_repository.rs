//! PostgreSQL implementation of ImageRepository.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;

use super::column;
use crate::domain::foundation::{DomainError, ErrorCode, GalleryId, ImageId, Timestamp};
use crate::domain::image::{Image, NewImage};
use crate::ports::ImageRepository;

const IMAGE_COLUMNS: &str = "id, gallery_id, file_name, url, title, sort_order, created_at";

/// PostgreSQL implementation of ImageRepository.
#[derive(Clone)]
pub struct PostgresImageRepository {
    pool: PgPool,
}

impl PostgresImageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn not_found(id: ImageId) -> DomainError {
    DomainError::new(ErrorCode::ImageNotFound, format!("Image not found: {}", id))
}

#[async_trait]
impl ImageRepository for PostgresImageRepository {
    async fn create(&self, image: &NewImage) -> Result<Image, DomainError> {
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO images (gallery_id, file_name, url, title, sort_order, created_at)
            SELECT $1, $2, $3, $4, COALESCE(MAX(sort_order) + 1, 0), $5
            FROM images WHERE gallery_id = $1
            RETURNING {}
            "#,
            IMAGE_COLUMNS
        ))
        .bind(image.gallery_id.value())
        .bind(&image.file_name)
        .bind(&image.url)
        .bind(image.title.as_deref())
        .bind(Timestamp::now().as_datetime())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to insert image", e))?;

        row_to_image(&row)
    }

    async fn find_by_id(&self, id: ImageId) -> Result<Option<Image>, DomainError> {
        let row = sqlx::query(&format!("SELECT {} FROM images WHERE id = $1", IMAGE_COLUMNS))
            .bind(id.value())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to fetch image", e))?;

        row.as_ref().map(row_to_image).transpose()
    }

    async fn list_by_gallery(&self, gallery_id: GalleryId) -> Result<Vec<Image>, DomainError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM images WHERE gallery_id = $1 ORDER BY sort_order, id",
            IMAGE_COLUMNS
        ))
        .bind(gallery_id.value())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to list images", e))?;

        rows.iter().map(row_to_image).collect()
    }

    async fn update_sort_orders(&self, images: &[Image]) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::database("Failed to begin transaction", e))?;

        for image in images {
            let result = sqlx::query("UPDATE images SET sort_order = $2 WHERE id = $1")
                .bind(image.id().value())
                .bind(image.sort_order() as i32)
                .execute(&mut *tx)
                .await
                .map_err(|e| DomainError::database("Failed to update image order", e))?;

            if result.rows_affected() == 0 {
                return Err(not_found(image.id()));
            }
        }

        tx.commit()
            .await
            .map_err(|e| DomainError::database("Failed to commit image order", e))
    }

    async fn delete(&self, id: ImageId) -> Result<u64, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::database("Failed to begin transaction", e))?;

        let ratings = sqlx::query("DELETE FROM ratings WHERE image_id = $1")
            .bind(id.value())
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::database("Failed to delete image ratings", e))?
            .rows_affected();

        let result = sqlx::query("DELETE FROM images WHERE id = $1")
            .bind(id.value())
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::database("Failed to delete image", e))?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }

        tx.commit()
            .await
            .map_err(|e| DomainError::database("Failed to commit image delete", e))?;

        Ok(ratings)
    }
}

fn row_to_image(row: &PgRow) -> Result<Image, DomainError> {
    let sort_order: i32 = column(row, "sort_order")?;
    let created_at: chrono::DateTime<chrono::Utc> = column(row, "created_at")?;

    Ok(Image::reconstitute(
        ImageId::new(column(row, "id")?)?,
        GalleryId::new(column(row, "gallery_id")?)?,
        column(row, "file_name")?,
        column(row, "url")?,
        column(row, "title")?,
        u32::try_from(sort_order).map_err(|_| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Invalid stored sort order: {}", sort_order),
            )
        })?,
        Timestamp::from_datetime(created_at),
    ))
}
