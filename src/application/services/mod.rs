// src/application/services/mod.rs
use std::sync::Arc;

use crate::{
    application::{
        ApplicationResult,
        ports::{ConfigProviderPort, SlugCounterCachePort, SlugGeneratorPort},
    },
    domain::{
        record::{SlugRepository, Sluggable},
        slug::{SluggableConfig, SluggableOptions},
    },
};

/// Drives the slug lifecycle for one record type and answers slug lookups.
///
/// The command half lives in `application::commands::sluggify`, the query half
/// in `application::queries::lookup`.
pub struct SlugManager<R: Sluggable> {
    pub(crate) repository: Arc<dyn SlugRepository<R>>,
    pub(crate) config_provider: Arc<ConfigProviderPort>,
    pub(crate) generator: Arc<SlugGeneratorPort>,
    pub(crate) cache: Option<Arc<SlugCounterCachePort>>,
}

impl<R: Sluggable> SlugManager<R> {
    pub fn new(
        repository: Arc<dyn SlugRepository<R>>,
        config_provider: Arc<ConfigProviderPort>,
        generator: Arc<SlugGeneratorPort>,
    ) -> Self {
        Self {
            repository,
            config_provider,
            generator,
            cache: None,
        }
    }

    /// Counter cache consulted when `use_cache` is enabled.
    #[must_use]
    pub fn with_cache(mut self, cache: Arc<SlugCounterCachePort>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Provider defaults merged with the record type's overrides.
    pub fn config(&self) -> ApplicationResult<SluggableConfig<R>> {
        let defaults = SluggableOptions::<R>::from_map(&self.config_provider.sluggable_defaults())?;
        Ok(defaults.merge(R::sluggable()).resolve()?)
    }
}
