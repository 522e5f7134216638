// src/domain/slug/rules.rs
use crate::domain::record::Sluggable;
use crate::domain::slug::config::SluggableConfig;

/// Decide whether `sluggify` without `force` should (re)generate the slug.
///
/// An empty slug always needs one. A slug edited by hand since load is kept.
/// Otherwise only new records, or all records with `on_update`, are slugged.
pub fn needs_slugging<R: Sluggable>(record: &R, config: &SluggableConfig<R>) -> bool {
    let current = record.attribute(&config.save_to);
    if current.as_deref().is_none_or(str::is_empty) {
        return true;
    }

    if record.is_dirty(&config.save_to) {
        return false;
    }

    !record.exists() || config.on_update
}

/// Text the slug is derived from.
pub fn slug_source<R: Sluggable>(record: &R, config: &SluggableConfig<R>) -> String {
    match &config.build_from {
        None => record.to_string(),
        Some(fields) => fields
            .iter()
            .map(|field| record.attribute(field).unwrap_or_default())
            .collect::<Vec<_>>()
            .join(" "),
    }
}

/// Cut `slug` down to at most `max_length` characters.
///
/// A trailing partial token is kept as-is.
pub fn truncate(slug: String, max_length: Option<usize>) -> String {
    match max_length {
        Some(max) if max > 0 && slug.chars().count() > max => slug.chars().take(max).collect(),
        _ => slug,
    }
}

/// Disambiguate a reserved slug once by appending `separator` and `1`.
///
/// The disambiguated value is not checked against the reserved list again.
pub fn validate_reserved<R>(slug: String, record: &R, config: &SluggableConfig<R>) -> String {
    match config.reserved.resolve(record) {
        Some(reserved) if reserved.iter().any(|word| *word == slug) => {
            format!("{slug}{}1", config.separator)
        }
        _ => slug,
    }
}
