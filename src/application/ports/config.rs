// src/application/ports/config.rs
use serde_json::{Map, Value};

/// Supplies the process-wide default slug options as a key/value mapping.
pub trait SluggableConfigProvider: Send + Sync {
    fn sluggable_defaults(&self) -> Map<String, Value>;
}

/// Provider backed by a fixed mapping.
#[derive(Debug, Clone, Default)]
pub struct StaticConfigProvider {
    defaults: Map<String, Value>,
}

impl StaticConfigProvider {
    pub const fn new(defaults: Map<String, Value>) -> Self {
        Self { defaults }
    }
}

impl SluggableConfigProvider for StaticConfigProvider {
    fn sluggable_defaults(&self) -> Map<String, Value> {
        self.defaults.clone()
    }
}
