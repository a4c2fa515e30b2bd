//! PostgreSQL implementation of ClientRepository.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;

use super::{column, is_unique_violation};
use crate::domain::client::{Client, ClientDetails, ClientEmail};
use crate::domain::foundation::{ClientId, DomainError, ErrorCode, Timestamp};
use crate::ports::ClientRepository;

const CLIENT_COLUMNS: &str = "id, name, email, phone, notes, created_at, updated_at";

/// PostgreSQL implementation of ClientRepository.
#[derive(Clone)]
pub struct PostgresClientRepository {
    pool: PgPool,
}

impl PostgresClientRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn write_error(context: &str, email: &ClientEmail, err: sqlx::Error) -> DomainError {
    if is_unique_violation(&err) {
        return DomainError::new(
            ErrorCode::Conflict,
            format!("A client with email {} already exists", email),
        )
        .with_detail("email", email.as_str());
    }
    DomainError::database(context, err)
}

#[async_trait]
impl ClientRepository for PostgresClientRepository {
    async fn create(&self, details: &ClientDetails) -> Result<Client, DomainError> {
        let now = Timestamp::now();
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO clients (name, email, phone, notes, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $5)
            RETURNING id
            "#,
        )
        .bind(&details.name)
        .bind(details.email.as_str())
        .bind(details.phone.as_deref())
        .bind(details.notes.as_deref())
        .bind(now.as_datetime())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| write_error("Failed to insert client", &details.email, e))?;

        Ok(Client::reconstitute(ClientId::new(id)?, details.clone(), now, now))
    }

    async fn update(&self, client: &Client) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE clients SET
                name = $2,
                email = $3,
                phone = $4,
                notes = $5,
                updated_at = $6
            WHERE id = $1
            "#,
        )
        .bind(client.id().value())
        .bind(client.name())
        .bind(client.email().as_str())
        .bind(client.phone())
        .bind(client.notes())
        .bind(client.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| write_error("Failed to update client", client.email(), e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::ClientNotFound,
                format!("Client not found: {}", client.id()),
            ));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: ClientId) -> Result<Option<Client>, DomainError> {
        let row = sqlx::query(&format!("SELECT {} FROM clients WHERE id = $1", CLIENT_COLUMNS))
            .bind(id.value())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to fetch client", e))?;

        row.as_ref().map(row_to_client).transpose()
    }

    async fn find_by_email(&self, email: &ClientEmail) -> Result<Option<Client>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM clients WHERE email = $1",
            CLIENT_COLUMNS
        ))
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch client by email", e))?;

        row.as_ref().map(row_to_client).transpose()
    }

    async fn list(&self) -> Result<Vec<Client>, DomainError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM clients ORDER BY name, id",
            CLIENT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to list clients", e))?;

        rows.iter().map(row_to_client).collect()
    }

    async fn delete(&self, id: ClientId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM clients WHERE id = $1")
            .bind(id.value())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to delete client", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::ClientNotFound,
                format!("Client not found: {}", id),
            ));
        }

        Ok(())
    }
}

fn row_to_client(row: &PgRow) -> Result<Client, DomainError> {
    let email: String = column(row, "email")?;
    let created_at: chrono::DateTime<chrono::Utc> = column(row, "created_at")?;
    let updated_at: chrono::DateTime<chrono::Utc> = column(row, "updated_at")?;

    let details = ClientDetails {
        name: column(row, "name")?,
        email: ClientEmail::new(&email).map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Invalid stored email: {}", e),
            )
        })?,
        phone: column(row, "phone")?,
        notes: column(row, "notes")?,
    };

    Ok(Client::reconstitute(
        ClientId::new(column(row, "id")?)?,
        details,
        Timestamp::from_datetime(created_at),
        Timestamp::from_datetime(updated_at),
    ))
}
