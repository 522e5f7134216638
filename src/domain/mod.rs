// src/domain/mod.rs
pub mod errors;
pub mod record;
pub mod slug;

pub use errors::{DomainError, DomainResult};
pub use record::{QueryScope, RecordId, SlugRepository, Sluggable};
