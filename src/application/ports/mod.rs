// src/application/ports/mod.rs
pub mod cache;
pub mod config;
pub mod util;

// Type aliases to make port injection sites more descriptive and reduce `dyn` noise
pub type SlugGeneratorPort = dyn util::SlugGenerator;
pub type SlugCounterCachePort = dyn cache::SlugCounterCache;
pub type ConfigProviderPort = dyn config::SluggableConfigProvider;
