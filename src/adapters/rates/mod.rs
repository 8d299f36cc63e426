//! Rate table adapters.
//!
//! - `StaticRateTableProvider` - built-in studio rates (optionally adjusted)
//! - `FileRateTableProvider` - JSON/YAML table loaded at start-up

mod file_rate_table;
mod static_rate_table;

pub use file_rate_table::FileRateTableProvider;
pub use static_rate_table::StaticRateTableProvider;
