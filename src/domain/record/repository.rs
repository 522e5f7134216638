use crate::domain::errors::DomainResult;
use crate::domain::record::entity::Sluggable;
use crate::domain::record::value_objects::RecordId;
use async_trait::async_trait;
use std::collections::BTreeMap;

#[async_trait]
pub trait SlugRepository<R: Sluggable>: Send + Sync {
    /// Every stored value of `field` that starts with `prefix`, keyed by record id.
    async fn existing_slugs(
        &self,
        field: &str,
        prefix: &str,
        include_trashed: bool,
    ) -> DomainResult<BTreeMap<RecordId, String>>;

    async fn find_by_key(&self, key: RecordId) -> DomainResult<Option<R>>;

    /// All records whose `field` equals `value` exactly.
    async fn find_by_field(&self, field: &str, value: &str) -> DomainResult<Vec<R>>;

    async fn first_by_field(&self, field: &str, value: &str) -> DomainResult<Option<R>> {
        Ok(self.find_by_field(field, value).await?.into_iter().next())
    }
}

/// A caller-owned query that slug predicates can be composed into.
pub trait QueryScope: Sized {
    fn where_key(self, key: RecordId) -> Self;
    fn where_field(self, field: &str, value: &str) -> Self;
}
