//! Derive URL-safe slugs for persisted records, keep them unique within the
//! backing table and look records up by slug or id.
//!
//! [`SlugManager`] owns the lifecycle. Record types implement
//! [`domain::record::Sluggable`]; stores, the counter cache and the source of
//! default options are ports with SQLite, Redis and in-memory adapters under
//! [`infrastructure`].

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use application::{ApplicationError, ApplicationResult, SlugManager};
pub use domain::slug::{ReservedSlugs, SlugMethod, SluggableConfig, SluggableOptions};
pub use domain::{DomainError, DomainResult, QueryScope, RecordId, SlugRepository, Sluggable};
