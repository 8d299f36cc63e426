//! PostgreSQL implementation of ProposalRepository.
//!
//! Inputs and outputs are stored as JSONB so the wire shape of a saved
//! proposal is exactly what the client submitted and read back.

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{DomainError, ProposalId, Timestamp, UserId};
use crate::domain::pricing::{ProposalInput, ProposalOutput};
use crate::domain::proposal::SavedProposal;
use crate::ports::ProposalRepository;

/// PostgreSQL implementation of ProposalRepository.
#[derive(Clone)]
pub struct PostgresProposalRepository {
    pool: PgPool,
}

impl PostgresProposalRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProposalRepository for PostgresProposalRepository {
    async fn save(&self, proposal: &SavedProposal) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO proposals (id, user_id, inputs, outputs, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(proposal.id.as_uuid())
        .bind(proposal.user_id.as_str())
        .bind(Json(&proposal.inputs))
        .bind(Json(&proposal.outputs))
        .bind(proposal.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to insert proposal: {}", e)))?;

        Ok(())
    }

    async fn find_by_id(&self, id: &ProposalId) -> Result<Option<SavedProposal>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, inputs, outputs, created_at
            FROM proposals
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to fetch proposal: {}", e)))?;

        row.map(row_to_proposal).transpose()
    }

    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<SavedProposal>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, inputs, outputs, created_at
            FROM proposals
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to fetch proposals by user: {}", e)))?;

        rows.into_iter().map(row_to_proposal).collect()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

fn column<'r, T>(row: &'r sqlx::postgres::PgRow, name: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
{
    row.try_get(name)
        .map_err(|e| DomainError::database(format!("Failed to get {}: {}", name, e)))
}

fn row_to_proposal(row: sqlx::postgres::PgRow) -> Result<SavedProposal, DomainError> {
    let id: uuid::Uuid = column(&row, "id")?;
    let user_id: String = column(&row, "user_id")?;
    let Json(inputs): Json<ProposalInput> = column(&row, "inputs")?;
    let Json(outputs): Json<ProposalOutput> = column(&row, "outputs")?;
    let created_at: chrono::DateTime<chrono::Utc> = column(&row, "created_at")?;

    Ok(SavedProposal {
        id: ProposalId::from_uuid(id),
        user_id: UserId::new(user_id)
            .map_err(|e| DomainError::database(format!("Invalid user_id: {}", e)))?,
        inputs,
        outputs,
        created_at: Timestamp::from_datetime(created_at),
    })
}
