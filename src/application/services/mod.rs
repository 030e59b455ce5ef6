//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (FileSystem, HttpClient)
//! but are themselves concrete structs, not traits.

mod config_store;
mod explorer;

pub use config_store::{ConfigKey, ConfigStore};
pub use explorer::ExplorerClient;
