// src/application/commands/sluggify.rs
use tracing::{debug, trace};

use crate::{
    application::{
        ApplicationResult,
        ports::cache::cache_key,
        services::SlugManager,
    },
    domain::{
        errors::DomainError,
        record::Sluggable,
        slug::{
            SlugMethod, SluggableConfig, rules,
            uniqueness::{resolve_collision, with_counter},
        },
    },
};

impl<R: Sluggable> SlugManager<R> {
    /// Generate and store the record's slug when policy asks for it (or `force`).
    pub async fn sluggify<'r>(&self, record: &'r mut R, force: bool) -> ApplicationResult<&'r mut R> {
        let config = self.config()?;

        if !force && !rules::needs_slugging(record, &config) {
            debug!(field = %config.save_to, "slug kept");
            return Ok(record);
        }

        let source = rules::slug_source(record, &config);
        let slug = self.generate_slug(&source, &config)?;
        let slug = rules::validate_reserved(slug, record, &config);
        let slug = self.make_slug_unique(slug, record, &config).await?;

        debug!(field = %config.save_to, slug = %slug, "slug assigned");
        record.set_attribute(&config.save_to, slug)?;
        Ok(record)
    }

    /// Regenerate the slug regardless of the current value.
    pub async fn resluggify<'r>(&self, record: &'r mut R) -> ApplicationResult<&'r mut R> {
        self.sluggify(record, true).await
    }

    /// Convert source text with the configured method, then apply `max_length`.
    pub fn generate_slug(&self, source: &str, config: &SluggableConfig<R>) -> ApplicationResult<String> {
        let slug = match &config.method {
            SlugMethod::Default => self.generator.slugify(source, &config.separator),
            SlugMethod::Custom(method) => method(source, &config.separator),
        };

        if slug.is_empty() {
            return Err(DomainError::Validation(format!(
                "source `{source}` does not produce a slug"
            ))
            .into());
        }

        Ok(rules::truncate(slug, config.max_length))
    }

    /// Make `slug` unique among stored records, through the counter cache or a
    /// prefix query depending on `use_cache`.
    pub async fn make_slug_unique(
        &self,
        slug: String,
        record: &R,
        config: &SluggableConfig<R>,
    ) -> ApplicationResult<String> {
        if !config.unique {
            return Ok(slug);
        }

        if let Some(ttl) = config.use_cache {
            let cache = self.cache.as_ref().ok_or_else(|| {
                DomainError::configuration("use_cache is enabled but no counter cache is configured")
            })?;
            let increment = cache.increment(&cache_key(&slug), ttl).await?;
            trace!(slug = %slug, increment, "slug counter from cache");
            return Ok(with_counter(slug, &config.separator, increment));
        }

        let include_trashed = config.include_trashed && R::SOFT_DELETES;
        let existing = self
            .repository
            .existing_slugs(&config.save_to, &slug, include_trashed)
            .await?;
        trace!(slug = %slug, matches = existing.len(), "existing slugs under prefix");

        Ok(resolve_collision(
            &slug,
            &existing,
            record.key(),
            &config.separator,
        )?)
    }
}
