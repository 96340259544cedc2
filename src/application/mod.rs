// src/application/mod.rs
pub mod bookmark_repository;
pub mod migrator;
pub mod searcher;
pub mod storage;
pub mod transfer;

pub use bookmark_repository::{AddLinkOutcome, BookmarkRepository, RepositoryOptions};
pub use migrator::{MigrationOutcome, SchemaMigrator, SchemaVersion};
pub use searcher::{search, CardView, SearchView};
pub use storage::KeyValueStore;
pub use transfer::{backup_file_name, ImportSummary};
