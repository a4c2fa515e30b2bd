//! PostgreSQL implementation of GalleryRepository.
//!
//! Persists Gallery aggregates to the `galleries` table.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;

use super::{column, escape_like, is_unique_violation};
use crate::domain::foundation::{ClientId, DomainError, ErrorCode, GalleryId, Timestamp};
use crate::domain::gallery::{Gallery, GallerySlug, GalleryStatus, NewGallery};
use crate::ports::{GalleryFilter, GalleryRepository, RemovedContent};

const GALLERY_COLUMNS: &str =
    "id, client_id, name, slug, description, status, created_at, updated_at";

/// PostgreSQL implementation of GalleryRepository.
#[derive(Clone)]
pub struct PostgresGalleryRepository {
    pool: PgPool,
}

impl PostgresGalleryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn write_error(context: &str, slug: &GallerySlug, err: sqlx::Error) -> DomainError {
    if is_unique_violation(&err) {
        return DomainError::new(
            ErrorCode::SlugTaken,
            format!("Gallery slug already in use: {}", slug),
        )
        .with_detail("slug", slug.value());
    }
    DomainError::database(context, err)
}

#[async_trait]
impl GalleryRepository for PostgresGalleryRepository {
    async fn create(&self, gallery: &NewGallery) -> Result<Gallery, DomainError> {
        let now = Timestamp::now();
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO galleries (
                client_id, name, slug, description, status, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $6)
            RETURNING id
            "#,
        )
        .bind(gallery.client_id.value())
        .bind(&gallery.name)
        .bind(gallery.slug.value())
        .bind(gallery.description.as_deref())
        .bind(gallery.status.value())
        .bind(now.as_datetime())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| write_error("Failed to insert gallery", &gallery.slug, e))?;

        Ok(Gallery::from_new(GalleryId::new(id)?, gallery.clone(), now))
    }

    async fn update(&self, gallery: &Gallery) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE galleries SET
                name = $2,
                slug = $3,
                description = $4,
                status = $5,
                updated_at = $6
            WHERE id = $1
            "#,
        )
        .bind(gallery.id().value())
        .bind(gallery.name())
        .bind(gallery.slug().value())
        .bind(gallery.description())
        .bind(gallery.status().value())
        .bind(gallery.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| write_error("Failed to update gallery", gallery.slug(), e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::GalleryNotFound,
                format!("Gallery not found: {}", gallery.id()),
            ));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: GalleryId) -> Result<Option<Gallery>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM galleries WHERE id = $1",
            GALLERY_COLUMNS
        ))
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch gallery", e))?;

        row.as_ref().map(row_to_gallery).transpose()
    }

    async fn find_by_slug(&self, slug: &GallerySlug) -> Result<Option<Gallery>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM galleries WHERE slug = $1",
            GALLERY_COLUMNS
        ))
        .bind(slug.value())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch gallery by slug", e))?;

        row.as_ref().map(row_to_gallery).transpose()
    }

    async fn slugs_starting_with(&self, prefix: &str) -> Result<Vec<String>, DomainError> {
        let pattern = format!("{}%", escape_like(prefix));
        sqlx::query_scalar(r#"SELECT slug FROM galleries WHERE slug LIKE $1 ESCAPE '\'"#)
            .bind(pattern)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to fetch gallery slugs", e))
    }

    async fn list(&self, filter: &GalleryFilter) -> Result<Vec<Gallery>, DomainError> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {} FROM galleries
            WHERE ($1::BIGINT IS NULL OR client_id = $1)
              AND ($2::TEXT IS NULL OR status = $2)
            ORDER BY created_at DESC, id DESC
            "#,
            GALLERY_COLUMNS
        ))
        .bind(filter.client_id.map(|id| id.value()))
        .bind(filter.status.map(|status| status.value()))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to list galleries", e))?;

        rows.iter().map(row_to_gallery).collect()
    }

    async fn count_by_client(&self, client_id: ClientId) -> Result<u32, DomainError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM galleries WHERE client_id = $1")
            .bind(client_id.value())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to count galleries", e))?;

        Ok(count as u32)
    }

    async fn delete(&self, id: GalleryId) -> Result<RemovedContent, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::database("Failed to begin transaction", e))?;

        let ratings = sqlx::query(
            r#"
            DELETE FROM ratings
            WHERE image_id IN (SELECT id FROM images WHERE gallery_id = $1)
            "#,
        )
        .bind(id.value())
        .execute(&mut *tx)
        .await
        .map_err(|e| DomainError::database("Failed to delete gallery ratings", e))?
        .rows_affected();

        let images = sqlx::query("DELETE FROM images WHERE gallery_id = $1")
            .bind(id.value())
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::database("Failed to delete gallery images", e))?
            .rows_affected();

        let result = sqlx::query("DELETE FROM galleries WHERE id = $1")
            .bind(id.value())
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::database("Failed to delete gallery", e))?;

        // Dropping the transaction rolls back the child deletes.
        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::GalleryNotFound,
                format!("Gallery not found: {}", id),
            ));
        }

        tx.commit()
            .await
            .map_err(|e| DomainError::database("Failed to commit gallery delete", e))?;

        Ok(RemovedContent { images, ratings })
    }
}

fn row_to_gallery(row: &PgRow) -> Result<Gallery, DomainError> {
    let slug: String = column(row, "slug")?;
    let status: String = column(row, "status")?;
    let created_at: chrono::DateTime<chrono::Utc> = column(row, "created_at")?;
    let updated_at: chrono::DateTime<chrono::Utc> = column(row, "updated_at")?;

    Ok(Gallery::reconstitute(
        GalleryId::new(column(row, "id")?)?,
        ClientId::new(column(row, "client_id")?)?,
        column(row, "name")?,
        GallerySlug::from_string(&slug).map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Invalid stored slug {}: {}", slug, e),
            )
        })?,
        column(row, "description")?,
        GalleryStatus::from_string(&status).map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Invalid gallery status: {}", e),
            )
        })?,
        Timestamp::from_datetime(created_at),
        Timestamp::from_datetime(updated_at),
    ))
}
