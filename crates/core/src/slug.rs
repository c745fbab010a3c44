//! Heading anchors and page slugs.

use std::collections::HashMap;
use std::path::{Component, Path};

/// Github-slugger style anchor generator with per-document deduplication.
#[derive(Debug, Default)]
pub struct Slugger {
    seen: HashMap<String, usize>,
}

impl Slugger {
    /// Creates a new slugger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a unique anchor for `text`; repeats get `-1`, `-2`, ...
    pub fn slug(&mut self, text: &str) -> String {
        let base = slugify(text);
        let count = self.seen.entry(base.clone()).or_insert(0);
        let slug = if *count == 0 {
            base
        } else {
            format!("{base}-{count}")
        };
        *count += 1;
        slug
    }
}

/// Lowercases, drops punctuation and turns spaces into hyphens. Hyphens are
/// neither collapsed nor trimmed.
pub fn slugify(text: &str) -> String {
    let slug: String = text
        .chars()
        .filter_map(|ch| match ch {
            ' ' => Some('-'),
            '-' | '_' => Some(ch),
            c if c.is_alphanumeric() => Some(c),
            _ => None,
        })
        .flat_map(char::to_lowercase)
        .collect();
    if slug.is_empty() {
        "heading".to_string()
    } else {
        slug
    }
}

/// Page slugs for a document path relative to the content root:
/// `quick-start/intro.mdx` → `["quick-start", "intro"]`,
/// `quick-start/index.mdx` → `["quick-start"]`, `index.mdx` → `[]`.
pub fn page_slugs(relative: &Path) -> Vec<String> {
    let mut slugs: Vec<String> = relative
        .with_extension("")
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    if slugs.last().is_some_and(|last| last == "index") {
        slugs.pop();
    }
    slugs
}
