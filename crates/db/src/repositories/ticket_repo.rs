//! Repository for the `tickets` table.

use chrono::Utc;
use helpdesk_core::types::DbId;

use crate::models::ticket::{NewTicket, Ticket, TicketPatch};
use crate::DbPool;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, description, status, priority, created_at, updated_at";

/// Provides CRUD operations for tickets.
///
/// Every mutation runs in its own transaction and is committed before the
/// call returns.
pub struct TicketRepo;

impl TicketRepo {
    /// Insert a new ticket, returning the created row.
    ///
    /// `created_at` and `updated_at` are set to the same instant.
    pub async fn create(pool: &DbPool, input: &NewTicket) -> Result<Ticket, sqlx::Error> {
        let now = Utc::now();
        let query = format!(
            "INSERT INTO tickets (title, description, status, priority, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             RETURNING {COLUMNS}"
        );

        let mut tx = pool.begin().await?;
        let ticket = sqlx::query_as::<_, Ticket>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.status.as_str())
            .bind(input.priority.as_str())
            .bind(now)
            .bind(now)
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;

        Ok(ticket)
    }

    /// Find a ticket by its ID.
    pub async fn find_by_id(pool: &DbPool, id: DbId) -> Result<Option<Ticket>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tickets WHERE id = ?1");
        sqlx::query_as::<_, Ticket>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all tickets in insertion order.
    pub async fn list(pool: &DbPool) -> Result<Vec<Ticket>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tickets ORDER BY id ASC");
        sqlx::query_as::<_, Ticket>(&query).fetch_all(pool).await
    }

    /// Apply a partial update. Only `Some` fields in `patch` change;
    /// `updated_at` is always refreshed and never falls below `created_at`.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &DbPool,
        id: DbId,
        patch: &TicketPatch,
    ) -> Result<Option<Ticket>, sqlx::Error> {
        let query = format!(
            "UPDATE tickets SET
                title = COALESCE(?2, title),
                description = COALESCE(?3, description),
                status = COALESCE(?4, status),
                priority = COALESCE(?5, priority),
                updated_at = MAX(?6, created_at)
             WHERE id = ?1
             RETURNING {COLUMNS}"
        );

        let mut tx = pool.begin().await?;
        let ticket = sqlx::query_as::<_, Ticket>(&query)
            .bind(id)
            .bind(&patch.title)
            .bind(&patch.description)
            .bind(patch.status.map(|s| s.as_str()))
            .bind(patch.priority.map(|p| p.as_str()))
            .bind(Utc::now())
            .fetch_optional(&mut *tx)
            .await?;
        tx.commit().await?;

        Ok(ticket)
    }

    /// Permanently delete a ticket by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &DbPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let result = sqlx::query("DELETE FROM tickets WHERE id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        Ok(result.rows_affected() > 0)
    }
}
