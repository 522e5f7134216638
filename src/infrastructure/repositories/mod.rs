// src/infrastructure/repositories/mod.rs
mod error;
mod memory;
mod sqlite_slug;

pub use error::map_sqlx;
pub use memory::InMemorySlugRepository;
pub use sqlite_slug::{SqlRecord, SqliteScope, SqliteSlugRepository};
