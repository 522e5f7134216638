pub mod config;
pub mod rules;
pub mod uniqueness;

pub use config::{ReservedSlugs, SlugMethod, SluggableConfig, SluggableOptions};
