pub mod entity;
pub mod repository;
pub mod value_objects;

pub use entity::Sluggable;
pub use repository::{QueryScope, SlugRepository};
pub use value_objects::RecordId;
