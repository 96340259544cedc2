// src/domain/mod.rs
pub mod error;
pub mod group;
pub mod link;
pub mod store;

pub use error::DomainError;
pub use group::{CardPatch, Group};
pub use link::{host_from, Link, LinkPatch};
pub use store::Store;
