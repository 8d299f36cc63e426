//! Fee Proposal - pricing engine and service for design engagements.
//!
//! The core is a pure fee engine (`domain::pricing`) that turns a project
//! description and a rate table into an itemized fee proposal. Around it sit
//! the rules for editing and exporting proposals, storage for saved
//! proposals, and an HTTP API.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod startup;
