// tests/support/records.rs
use std::collections::HashSet;
use std::fmt;

use sluggable::domain::slug::{ReservedSlugs, SlugMethod, SluggableOptions};
use sluggable::infrastructure::repositories::SqlRecord;
use sluggable::{DomainError, DomainResult, RecordId, Sluggable};

/* -------------------------------- Post -------------------------------- */

/// Soft-deleting record slugged from its title and subtitle.
#[derive(Debug, Clone, Default, sqlx::FromRow)]
pub struct Post {
    pub id: Option<i64>,
    pub title: String,
    pub subtitle: Option<String>,
    pub slug: Option<String>,
    pub deleted_at: Option<String>,
    #[sqlx(skip)]
    pub dirty: HashSet<String>,
}

impl Post {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            ..Self::default()
        }
    }

    /// A persisted, clean post.
    pub fn stored(id: i64, title: &str, slug: &str) -> Self {
        Self {
            id: Some(id),
            title: title.to_string(),
            slug: Some(slug.to_string()),
            ..Self::default()
        }
    }

    pub fn trashed(mut self) -> Self {
        self.deleted_at = Some("2024-01-01T00:00:00Z".to_string());
        self
    }
}

impl fmt::Display for Post {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "post {}", self.title)
    }
}

impl Sluggable for Post {
    const SOFT_DELETES: bool = true;

    fn sluggable() -> SluggableOptions<Self> {
        SluggableOptions::new().build_from(["title", "subtitle"])
    }

    fn key(&self) -> Option<RecordId> {
        self.id.map(RecordId)
    }

    fn attribute(&self, name: &str) -> Option<String> {
        match name {
            "id" => self.id.map(|id| id.to_string()),
            "title" => Some(self.title.clone()),
            "subtitle" => self.subtitle.clone(),
            "slug" => self.slug.clone(),
            "deleted_at" => self.deleted_at.clone(),
            _ => None,
        }
    }

    fn set_attribute(&mut self, name: &str, value: String) -> DomainResult<()> {
        match name {
            "title" => self.title = value,
            "subtitle" => self.subtitle = Some(value),
            "slug" => self.slug = Some(value),
            other => {
                return Err(DomainError::Validation(format!("post has no field `{other}`")));
            }
        }
        self.dirty.insert(name.to_string());
        Ok(())
    }

    fn is_dirty(&self, name: &str) -> bool {
        self.dirty.contains(name)
    }

    fn is_trashed(&self) -> bool {
        self.deleted_at.is_some()
    }
}

impl SqlRecord for Post {
    const TABLE: &'static str = "posts";
    const COLUMNS: &'static str = "id, title, subtitle, slug, deleted_at";
}

/* -------------------------------- Tag -------------------------------- */

/// Hard-deleting record slugged from its `Display` output with a custom method.
#[derive(Debug, Clone, Default)]
pub struct Tag {
    pub id: Option<i64>,
    pub name: String,
    pub handle: Option<String>,
}

impl Tag {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl Sluggable for Tag {
    fn sluggable() -> SluggableOptions<Self> {
        SluggableOptions::new()
            .save_to("handle")
            .method(SlugMethod::custom(|source, separator| {
                source
                    .split_whitespace()
                    .map(str::to_uppercase)
                    .collect::<Vec<_>>()
                    .join(separator)
            }))
            .reserved(ReservedSlugs::computed(|tag: &Tag| {
                tag.id.is_none().then(|| vec!["ADMIN".to_string()])
            }))
    }

    fn key(&self) -> Option<RecordId> {
        self.id.map(RecordId)
    }

    fn attribute(&self, name: &str) -> Option<String> {
        match name {
            "name" => Some(self.name.clone()),
            "handle" => self.handle.clone(),
            _ => None,
        }
    }

    fn set_attribute(&mut self, name: &str, value: String) -> DomainResult<()> {
        match name {
            "handle" => {
                self.handle = Some(value);
                Ok(())
            }
            other => Err(DomainError::Validation(format!("tag has no field `{other}`"))),
        }
    }

    fn is_dirty(&self, _name: &str) -> bool {
        false
    }
}
