use crate::thread::{Comment, ScrapeResult};

/// Select the comments written by `name`, case-insensitively, preserving
/// traversal order. A deleted author never matches; no match is an empty
/// result, not an error.
pub fn filter_by_author<'a>(result: &'a ScrapeResult, name: &str) -> Vec<&'a Comment> {
    let needle = name.to_lowercase();
    result
        .comments
        .iter()
        .filter(|c| {
            c.author
                .as_deref()
                .is_some_and(|a| a.to_lowercase() == needle)
        })
        .collect()
}
