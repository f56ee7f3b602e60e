//! Sonica server library
//!
//! Exposes the internal modules for testing and potential reuse.

pub mod catalog_store;
pub mod server;
pub mod sqlite_persistence;
pub mod subsonic;

// Re-export commonly used types for convenience
pub use catalog_store::{CatalogStore, SqliteCatalogStore, WritableCatalogStore};
pub use server::{make_app, run_server, RequestsLoggingLevel, ServerConfig};
