pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod service;

pub use api::router;
pub use config::AppConfig;
pub use db::{create_pool, DocumentStore, MemoryStore, PgDocumentStore};
pub use error::{StoreError, WorkspaceError};
pub use service::WorkspaceService;
