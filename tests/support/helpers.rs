// tests/support/helpers.rs
use std::sync::Arc;

use once_cell::sync::Lazy;
use serde_json::Value;
use tracing_subscriber::{EnvFilter, fmt};

use sluggable::application::ports::cache::SlugCounterCache;
use sluggable::application::ports::config::StaticConfigProvider;
use sluggable::infrastructure::repositories::InMemorySlugRepository;
use sluggable::infrastructure::util::DefaultSlugGenerator;
use sluggable::{SlugManager, SlugRepository, Sluggable};

static TRACING: Lazy<()> = Lazy::new(|| {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = fmt().with_env_filter(filter).with_test_writer().try_init();
});

pub fn init_tracing() {
    Lazy::force(&TRACING);
}

pub fn provider(defaults: Value) -> Arc<StaticConfigProvider> {
    match defaults {
        Value::Object(map) => Arc::new(StaticConfigProvider::new(map)),
        other => panic!("defaults must be a JSON object, got {other}"),
    }
}

pub fn manager_with<R: Sluggable>(
    repository: Arc<dyn SlugRepository<R>>,
    defaults: Value,
) -> SlugManager<R> {
    init_tracing();
    SlugManager::new(repository, provider(defaults), Arc::new(DefaultSlugGenerator))
}

/// Manager over an in-memory store seeded with `records`.
pub fn memory_manager<R: Sluggable + Clone>(
    records: Vec<R>,
    defaults: Value,
) -> (SlugManager<R>, Arc<InMemorySlugRepository<R>>) {
    let repo = Arc::new(InMemorySlugRepository::with_records(records));
    let manager = manager_with(Arc::clone(&repo) as Arc<dyn SlugRepository<R>>, defaults);
    (manager, repo)
}

pub fn cached_manager<R: Sluggable + Clone>(
    records: Vec<R>,
    defaults: Value,
    cache: Arc<dyn SlugCounterCache>,
) -> SlugManager<R> {
    memory_manager(records, defaults).0.with_cache(cache)
}
