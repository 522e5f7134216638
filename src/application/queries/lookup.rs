// src/application/queries/lookup.rs
use crate::{
    application::{
        error::{ApplicationError, ApplicationResult},
        services::SlugManager,
    },
    domain::record::{QueryScope, RecordId, Sluggable},
};

impl<R: Sluggable> SlugManager<R> {
    /// Current value of the record's slug field.
    pub fn get_slug(&self, record: &R) -> ApplicationResult<Option<String>> {
        let config = self.config()?;
        Ok(record.attribute(&config.save_to))
    }

    /// Every record whose slug equals `slug`.
    pub async fn get_by_slug(&self, slug: &str) -> ApplicationResult<Vec<R>> {
        let config = self.config()?;
        Ok(self.repository.find_by_field(&config.save_to, slug).await?)
    }

    pub async fn find_by_slug(&self, slug: &str) -> ApplicationResult<Option<R>> {
        let config = self.config()?;
        Ok(self.repository.first_by_field(&config.save_to, slug).await?)
    }

    pub async fn find_by_slug_or_fail(&self, slug: &str) -> ApplicationResult<R> {
        self.find_by_slug(slug)
            .await?
            .ok_or_else(|| ApplicationError::not_found(format!("no record with slug `{slug}`")))
    }

    /// Look up by id when `input` is a positive integer, by slug otherwise.
    pub async fn find_by_slug_or_id(&self, input: &str) -> ApplicationResult<Option<R>> {
        match RecordId::parse_lookup(input) {
            Some(id) => Ok(self.repository.find_by_key(id).await?),
            None => self.find_by_slug(input).await,
        }
    }

    pub async fn find_by_slug_or_id_or_fail(&self, input: &str) -> ApplicationResult<R> {
        match RecordId::parse_lookup(input) {
            Some(id) => self
                .repository
                .find_by_key(id)
                .await?
                .ok_or_else(|| ApplicationError::not_found(format!("no record with id {id}"))),
            None => self.find_by_slug_or_fail(input).await,
        }
    }

    /// Restrict `query` to records whose slug equals `slug`.
    pub fn where_slug<Q: QueryScope>(&self, query: Q, slug: &str) -> ApplicationResult<Q> {
        let config = self.config()?;
        Ok(query.where_field(&config.save_to, slug))
    }

    /// Restrict `query` by id when `input` is a positive integer, by slug otherwise.
    pub fn where_id_or_slug<Q: QueryScope>(&self, query: Q, input: &str) -> ApplicationResult<Q> {
        match RecordId::parse_lookup(input) {
            Some(id) => Ok(query.where_key(id)),
            None => self.where_slug(query, input),
        }
    }
}
