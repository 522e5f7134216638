use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::record::{RecordId, SlugRepository, Sluggable};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

/// Record store kept in process memory.
pub struct InMemorySlugRepository<R> {
    records: Mutex<Vec<R>>,
}

impl<R> Default for InMemorySlugRepository<R> {
    fn default() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
        }
    }
}

impl<R: Sluggable + Clone> InMemorySlugRepository<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<R>) -> Self {
        Self {
            records: Mutex::new(records),
        }
    }

    fn lock(&self) -> DomainResult<MutexGuard<'_, Vec<R>>> {
        self.records
            .lock()
            .map_err(|_| DomainError::Persistence("record store lock poisoned".into()))
    }

    /// Insert `record`, replacing the stored record with the same key.
    pub fn save(&self, record: R) -> DomainResult<()> {
        let key = record
            .key()
            .ok_or_else(|| DomainError::Validation("record must have an id to be stored".into()))?;
        let mut records = self.lock()?;
        match records.iter_mut().find(|stored| stored.key() == Some(key)) {
            Some(stored) => *stored = record,
            None => records.push(record),
        }
        Ok(())
    }

    pub fn records(&self) -> DomainResult<Vec<R>> {
        Ok(self.lock()?.clone())
    }

    fn visible(record: &R, include_trashed: bool) -> bool {
        include_trashed || !R::SOFT_DELETES || !record.is_trashed()
    }
}

#[async_trait]
impl<R: Sluggable + Clone> SlugRepository<R> for InMemorySlugRepository<R> {
    async fn existing_slugs(
        &self,
        field: &str,
        prefix: &str,
        include_trashed: bool,
    ) -> DomainResult<BTreeMap<RecordId, String>> {
        let records = self.lock()?;
        Ok(records
            .iter()
            .filter(|record| Self::visible(record, include_trashed))
            .filter_map(|record| {
                let key = record.key()?;
                let slug = record.attribute(field)?;
                slug.starts_with(prefix).then_some((key, slug))
            })
            .collect())
    }

    async fn find_by_key(&self, key: RecordId) -> DomainResult<Option<R>> {
        let records = self.lock()?;
        Ok(records
            .iter()
            .find(|record| record.key() == Some(key) && Self::visible(record, false))
            .cloned())
    }

    async fn find_by_field(&self, field: &str, value: &str) -> DomainResult<Vec<R>> {
        let records = self.lock()?;
        Ok(records
            .iter()
            .filter(|record| {
                Self::visible(record, false) && record.attribute(field).as_deref() == Some(value)
            })
            .cloned()
            .collect())
    }
}
