//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (ids, timestamps, errors, currency)
//! - `pricing` - The fee engine and its rate table
//! - `proposal` - Editing, migration, export and storage rules around the engine

pub mod foundation;
pub mod pricing;
pub mod proposal;
