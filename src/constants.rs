// src/constants.rs
//
// Application-wide constants: storage keys, defaults and file naming.

/// Key holding the current schema (cards keyed by random id).
///
/// Used in: `application/bookmark_repository.rs`, `application/migrator.rs`
pub const STORAGE_KEY: &str = "bookmarkGroups.v3";

/// Legacy schema keys, newest first. Migration consults them in this order
/// and stops at the first one present.
///
/// Used in: `application/migrator.rs`
pub const LEGACY_V2_KEY: &str = "bookmarkGroups.v2";
pub const LEGACY_V1_KEY: &str = "bookmarkGroups.v1";

/// Title given to cards created or imported without one.
pub const DEFAULT_CARD_TITLE: &str = "Untitled";

/// Title of the card created on the fly when a link is added without a
/// destination and its url has no host.
pub const QUICK_CARD_TITLE: &str = "New Card";

/// Blob exported when nothing has been persisted yet.
pub const EMPTY_STORE_JSON: &str = r#"{"groups":{}}"#;

/// Backup file name is `<prefix><UTC timestamp>.json`.
///
/// Used in: `application/transfer.rs`
pub const BACKUP_FILE_PREFIX: &str = "bookmarks-backup-";
pub const BACKUP_TIMESTAMP_FORMAT: &str = "%Y-%m-%d-%H-%M-%S";

/// Directory name under the platform data/config dirs.
pub const APP_DIR_NAME: &str = "linkcards";
