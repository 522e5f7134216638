// src/domain/slug/uniqueness.rs
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::record::RecordId;
use std::collections::BTreeMap;

/// Resolve `candidate` against the slugs already stored under its prefix.
///
/// The candidate is kept when no stored slug equals it, or when every equal slug
/// belongs to `own_key`. Otherwise the highest numeric suffix found after
/// `candidate + separator` is incremented and appended. A suffix with no
/// successor in `u64` is a [`DomainError::Validation`].
pub fn resolve_collision(
    candidate: &str,
    existing: &BTreeMap<RecordId, String>,
    own_key: Option<RecordId>,
    separator: &str,
) -> DomainResult<String> {
    let collides = existing
        .iter()
        .any(|(id, slug)| slug == candidate && Some(*id) != own_key);
    if !collides {
        return Ok(candidate.to_owned());
    }

    let prefix = format!("{candidate}{separator}");
    let exhausted =
        || DomainError::Validation(format!("no free numeric suffix left for slug `{candidate}`"));
    let highest = existing
        .values()
        .map(|slug| numeric_suffix(slug, &prefix).ok_or_else(exhausted))
        .try_fold(0, |highest, suffix| suffix.map(|n| highest.max(n)))?;
    let next = highest.checked_add(1).ok_or_else(exhausted)?;

    Ok(format!("{candidate}{separator}{next}"))
}

/// Slug handed out for the `increment`-th request of the same base slug.
pub fn with_counter(slug: String, separator: &str, increment: u64) -> String {
    if increment == 0 {
        slug
    } else {
        format!("{slug}{separator}{increment}")
    }
}

/// Leading digits after `prefix`, 0 when there are none, `None` when they do
/// not fit in a `u64`.
fn numeric_suffix(slug: &str, prefix: &str) -> Option<u64> {
    let Some(rest) = slug.strip_prefix(prefix) else {
        return Some(0);
    };
    let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
    if digits.is_empty() {
        Some(0)
    } else {
        digits.parse().ok()
    }
}
