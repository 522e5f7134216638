use crate::domain::errors::DomainResult;
use crate::domain::record::value_objects::RecordId;
use crate::domain::slug::config::SluggableOptions;
use std::fmt;

/// Capabilities a record type exposes to the slug lifecycle.
///
/// `Display` is the record's default textual representation; it becomes the
/// slug source when no `build_from` fields are configured.
pub trait Sluggable: fmt::Display + Send + Sync + Sized + 'static {
    /// Whether the backing table keeps soft-deleted rows around.
    const SOFT_DELETES: bool = false;

    /// Record-type overrides merged over the provider's defaults.
    fn sluggable() -> SluggableOptions<Self> {
        SluggableOptions::default()
    }

    /// Primary key, `None` until the record has been persisted.
    fn key(&self) -> Option<RecordId>;

    fn exists(&self) -> bool {
        self.key().is_some()
    }

    /// Read an attribute as text. Missing and null attributes are `None`.
    fn attribute(&self, name: &str) -> Option<String>;

    fn set_attribute(&mut self, name: &str, value: String) -> DomainResult<()>;

    /// Whether the attribute was modified locally since the record was loaded.
    fn is_dirty(&self, name: &str) -> bool;

    /// Whether this instance is soft-deleted. Only meaningful with `SOFT_DELETES`.
    fn is_trashed(&self) -> bool {
        false
    }
}
