//! Storage Adapters
//!
//! - **InMemoryProposalRepository** - Stores saved proposals in memory
//!   (no database configured, tests)
//!
//! The PostgreSQL repository lives in `adapters::postgres`.

mod in_memory_proposal_repository;

pub use in_memory_proposal_repository::InMemoryProposalRepository;
