// src/application/ports/util.rs
/// Default text-to-slug transform used when no custom method is configured.
pub trait SlugGenerator: Send + Sync {
    fn slugify(&self, input: &str, separator: &str) -> String;
}
