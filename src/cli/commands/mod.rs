//! CLI command implementations.

mod ask;
mod config;
mod doctor;
mod index;
mod query;
mod report;
mod serve;

pub use ask::run_ask;
pub use config::run_config;
pub use doctor::run_doctor;
pub use index::run_index;
pub use query::run_query;
pub use report::run_report;
pub use serve::run_serve;
