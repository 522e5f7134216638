// src/domain/slug/config.rs
use crate::domain::errors::{DomainError, DomainResult};
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_SAVE_TO: &str = "slug";
pub const DEFAULT_SEPARATOR: &str = "-";
/// TTL used when `use_cache` is enabled with a plain `true`.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(60);

pub type CustomSlugFn = dyn Fn(&str, &str) -> String + Send + Sync;
pub type ReservedFn<R> = dyn Fn(&R) -> Option<Vec<String>> + Send + Sync;

/// How source text is turned into a slug.
#[derive(Clone, Default)]
pub enum SlugMethod {
    /// The injected `SlugGenerator`.
    #[default]
    Default,
    /// Caller supplied `(source, separator) -> slug`; its result is used verbatim.
    Custom(Arc<CustomSlugFn>),
}

impl SlugMethod {
    pub fn custom(f: impl Fn(&str, &str) -> String + Send + Sync + 'static) -> Self {
        Self::Custom(Arc::new(f))
    }
}

impl fmt::Debug for SlugMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => f.write_str("Default"),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Slugs that may not be used as-is.
pub enum ReservedSlugs<R> {
    None,
    List(Vec<String>),
    /// Computed per record; a `None` result disables the check.
    Computed(Arc<ReservedFn<R>>),
}

impl<R> ReservedSlugs<R> {
    pub fn computed(f: impl Fn(&R) -> Option<Vec<String>> + Send + Sync + 'static) -> Self {
        Self::Computed(Arc::new(f))
    }

    pub fn resolve(&self, record: &R) -> Option<Vec<String>> {
        match self {
            Self::None => None,
            Self::List(list) => Some(list.clone()),
            Self::Computed(f) => f(record),
        }
    }
}

impl<R> Clone for ReservedSlugs<R> {
    fn clone(&self) -> Self {
        match self {
            Self::None => Self::None,
            Self::List(list) => Self::List(list.clone()),
            Self::Computed(f) => Self::Computed(Arc::clone(f)),
        }
    }
}

impl<R> fmt::Debug for ReservedSlugs<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::List(list) => f.debug_tuple("List").field(list).finish(),
            Self::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

/// One layer of slug options. Absent keys fall through to the layer below on
/// [`SluggableOptions::merge`]; keys that accept null use a nested `Option` so an
/// explicit null still overrides.
pub struct SluggableOptions<R> {
    build_from: Option<Option<Vec<String>>>,
    save_to: Option<String>,
    method: Option<SlugMethod>,
    separator: Option<String>,
    max_length: Option<Option<usize>>,
    unique: Option<bool>,
    use_cache: Option<Option<Duration>>,
    include_trashed: Option<bool>,
    on_update: Option<bool>,
    reserved: Option<ReservedSlugs<R>>,
}

impl<R> Default for SluggableOptions<R> {
    fn default() -> Self {
        Self {
            build_from: None,
            save_to: None,
            method: None,
            separator: None,
            max_length: None,
            unique: None,
            use_cache: None,
            include_trashed: None,
            on_update: None,
            reserved: None,
        }
    }
}

impl<R> Clone for SluggableOptions<R> {
    fn clone(&self) -> Self {
        Self {
            build_from: self.build_from.clone(),
            save_to: self.save_to.clone(),
            method: self.method.clone(),
            separator: self.separator.clone(),
            max_length: self.max_length,
            unique: self.unique,
            use_cache: self.use_cache,
            include_trashed: self.include_trashed,
            on_update: self.on_update,
            reserved: self.reserved.clone(),
        }
    }
}

impl<R> SluggableOptions<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn build_from<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.build_from = Some(Some(fields.into_iter().map(Into::into).collect()));
        self
    }

    /// Use the record's `Display` output as the slug source.
    pub fn build_from_display(mut self) -> Self {
        self.build_from = Some(None);
        self
    }

    pub fn save_to(mut self, field: impl Into<String>) -> Self {
        self.save_to = Some(field.into());
        self
    }

    pub fn method(mut self, method: SlugMethod) -> Self {
        self.method = Some(method);
        self
    }

    pub fn separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = Some(separator.into());
        self
    }

    pub fn max_length(mut self, max_length: Option<usize>) -> Self {
        self.max_length = Some(max_length.filter(|len| *len > 0));
        self
    }

    pub fn unique(mut self, unique: bool) -> Self {
        self.unique = Some(unique);
        self
    }

    pub fn use_cache(mut self, ttl: Option<Duration>) -> Self {
        self.use_cache = Some(ttl);
        self
    }

    pub fn include_trashed(mut self, include_trashed: bool) -> Self {
        self.include_trashed = Some(include_trashed);
        self
    }

    pub fn on_update(mut self, on_update: bool) -> Self {
        self.on_update = Some(on_update);
        self
    }

    pub fn reserved(mut self, reserved: ReservedSlugs<R>) -> Self {
        self.reserved = Some(reserved);
        self
    }

    /// Shallow override by key: every key set in `overrides` wins.
    #[must_use]
    pub fn merge(self, overrides: Self) -> Self {
        Self {
            build_from: overrides.build_from.or(self.build_from),
            save_to: overrides.save_to.or(self.save_to),
            method: overrides.method.or(self.method),
            separator: overrides.separator.or(self.separator),
            max_length: overrides.max_length.or(self.max_length),
            unique: overrides.unique.or(self.unique),
            use_cache: overrides.use_cache.or(self.use_cache),
            include_trashed: overrides.include_trashed.or(self.include_trashed),
            on_update: overrides.on_update.or(self.on_update),
            reserved: overrides.reserved.or(self.reserved),
        }
    }

    /// Parse a mapping of options as supplied by a configuration provider.
    pub fn from_map(map: &Map<String, Value>) -> DomainResult<Self> {
        let mut options = Self::default();

        for (key, value) in map {
            match key.as_str() {
                "build_from" => options.build_from = Some(parse_build_from(value)?),
                "save_to" => options.save_to = Some(expect_str(key, value)?.to_owned()),
                "method" => {
                    if !value.is_null() {
                        return Err(DomainError::configuration(
                            "sluggable method is not callable or null",
                        ));
                    }
                    options.method = Some(SlugMethod::Default);
                }
                "separator" => options.separator = Some(expect_str(key, value)?.to_owned()),
                "max_length" => options.max_length = Some(parse_max_length(value)?),
                "unique" => options.unique = Some(expect_bool(key, value)?),
                "use_cache" => options.use_cache = Some(parse_use_cache(value)?),
                "include_trashed" => options.include_trashed = Some(expect_bool(key, value)?),
                "on_update" => options.on_update = Some(expect_bool(key, value)?),
                "reserved" => options.reserved = Some(parse_reserved(value)?),
                _ => {}
            }
        }

        Ok(options)
    }

    /// Fill unset keys with the built-in defaults.
    pub fn resolve(self) -> DomainResult<SluggableConfig<R>> {
        let save_to = self.save_to.unwrap_or_else(|| DEFAULT_SAVE_TO.to_owned());
        if !is_identifier(&save_to) {
            return Err(DomainError::configuration(format!(
                "save_to `{save_to}` is not a valid field name"
            )));
        }

        Ok(SluggableConfig {
            build_from: self.build_from.flatten(),
            save_to,
            method: self.method.unwrap_or_default(),
            separator: self
                .separator
                .unwrap_or_else(|| DEFAULT_SEPARATOR.to_owned()),
            max_length: self.max_length.flatten(),
            unique: self.unique.unwrap_or(true),
            use_cache: self.use_cache.flatten(),
            include_trashed: self.include_trashed.unwrap_or(false),
            on_update: self.on_update.unwrap_or(false),
            reserved: self.reserved.unwrap_or(ReservedSlugs::None),
        })
    }
}

/// Fully resolved options for one record type.
pub struct SluggableConfig<R> {
    pub build_from: Option<Vec<String>>,
    pub save_to: String,
    pub method: SlugMethod,
    pub separator: String,
    pub max_length: Option<usize>,
    pub unique: bool,
    pub use_cache: Option<Duration>,
    pub include_trashed: bool,
    pub on_update: bool,
    pub reserved: ReservedSlugs<R>,
}

impl<R> Clone for SluggableConfig<R> {
    fn clone(&self) -> Self {
        Self {
            build_from: self.build_from.clone(),
            save_to: self.save_to.clone(),
            method: self.method.clone(),
            separator: self.separator.clone(),
            max_length: self.max_length,
            unique: self.unique,
            use_cache: self.use_cache,
            include_trashed: self.include_trashed,
            on_update: self.on_update,
            reserved: self.reserved.clone(),
        }
    }
}

impl<R> fmt::Debug for SluggableConfig<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SluggableConfig")
            .field("build_from", &self.build_from)
            .field("save_to", &self.save_to)
            .field("method", &self.method)
            .field("separator", &self.separator)
            .field("max_length", &self.max_length)
            .field("unique", &self.unique)
            .field("use_cache", &self.use_cache)
            .field("include_trashed", &self.include_trashed)
            .field("on_update", &self.on_update)
            .field("reserved", &self.reserved)
            .finish()
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn expect_str<'a>(key: &str, value: &'a Value) -> DomainResult<&'a str> {
    value
        .as_str()
        .ok_or_else(|| DomainError::configuration(format!("sluggable {key} must be a string")))
}

fn expect_bool(key: &str, value: &Value) -> DomainResult<bool> {
    value
        .as_bool()
        .ok_or_else(|| DomainError::configuration(format!("sluggable {key} must be a boolean")))
}

fn string_list(key: &str, items: &[Value]) -> DomainResult<Vec<String>> {
    items
        .iter()
        .map(|item| expect_str(key, item).map(str::to_owned))
        .collect()
}

fn parse_build_from(value: &Value) -> DomainResult<Option<Vec<String>>> {
    match value {
        Value::Null => Ok(None),
        Value::String(field) => Ok(Some(vec![field.clone()])),
        Value::Array(items) => string_list("build_from", items).map(Some),
        _ => Err(DomainError::configuration(
            "sluggable build_from must be null, a field name or a list of field names",
        )),
    }
}

fn parse_max_length(value: &Value) -> DomainResult<Option<usize>> {
    match value {
        Value::Null => Ok(None),
        Value::Number(n) => n
            .as_u64()
            .and_then(|len| usize::try_from(len).ok())
            .map(|len| (len > 0).then_some(len))
            .ok_or_else(|| {
                DomainError::configuration("sluggable max_length must be a non-negative integer")
            }),
        _ => Err(DomainError::configuration(
            "sluggable max_length must be null or an integer",
        )),
    }
}

fn parse_use_cache(value: &Value) -> DomainResult<Option<Duration>> {
    match value {
        Value::Null | Value::Bool(false) => Ok(None),
        Value::Bool(true) => Ok(Some(DEFAULT_CACHE_TTL)),
        Value::Number(n) => n
            .as_u64()
            .map(|secs| (secs > 0).then(|| Duration::from_secs(secs)))
            .ok_or_else(|| {
                DomainError::configuration("sluggable use_cache must be a TTL in whole seconds")
            }),
        _ => Err(DomainError::configuration(
            "sluggable use_cache must be a boolean or a TTL in seconds",
        )),
    }
}

fn parse_reserved<R>(value: &Value) -> DomainResult<ReservedSlugs<R>> {
    match value {
        Value::Null => Ok(ReservedSlugs::None),
        Value::Array(items) => string_list("reserved", items).map(ReservedSlugs::List),
        _ => Err(DomainError::configuration(
            "sluggable reserved is not null, an array, or a closure that returns null/array",
        )),
    }
}
