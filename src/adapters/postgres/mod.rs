//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresProposalRepository` - saved proposals, JSONB payloads

mod proposal_repository;

pub use proposal_repository::PostgresProposalRepository;
