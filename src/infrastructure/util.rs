use crate::application::ports::util::SlugGenerator;
use slug::slugify;

/// `slug` crate transform: transliterated, lowercased, runs of anything outside
/// `[a-z0-9]` collapsed to a single separator.
#[derive(Default, Clone)]
pub struct DefaultSlugGenerator;

impl SlugGenerator for DefaultSlugGenerator {
    fn slugify(&self, input: &str, separator: &str) -> String {
        let slug = slugify(input);
        if separator == "-" {
            slug
        } else {
            slug.replace('-', separator)
        }
    }
}
