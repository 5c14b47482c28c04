//! Trait-tag counting over a roster.

use rustc_hash::FxHashMap;

/// Number of team members sharing a tag before it counts as active.
pub const ACTIVE_TAG_THRESHOLD: u32 = 2;

/// Tag occurrence counts, iterated in first-seen order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TagCounts {
    order: Vec<String>,
    counts: FxHashMap<String, u32>,
}

impl TagCounts {
    /// Create an empty count table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Count every tag of every member.
    pub fn from_tag_sets<'a, I, T>(sets: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: IntoIterator<Item = &'a String>,
    {
        let mut counts = Self::new();
        for set in sets {
            for tag in set {
                counts.add(tag);
            }
        }
        counts
    }

    /// Record one occurrence of `tag`.
    pub fn add(&mut self, tag: &str) {
        match self.counts.get_mut(tag) {
            Some(count) => *count += 1,
            None => {
                self.order.push(tag.to_string());
                self.counts.insert(tag.to_string(), 1);
            }
        }
    }

    /// Occurrences of `tag` (0 if never seen).
    #[must_use]
    pub fn count(&self, tag: &str) -> u32 {
        self.counts.get(tag).copied().unwrap_or(0)
    }

    /// True if at least one member carries `tag`.
    #[must_use]
    pub fn contains(&self, tag: &str) -> bool {
        self.counts.contains_key(tag)
    }

    /// Tags with their counts in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.order
            .iter()
            .map(move |tag| (tag.as_str(), self.counts.get(tag).copied().unwrap_or(0)))
    }

    /// Tags carried by at least `ACTIVE_TAG_THRESHOLD` members, first-seen order.
    #[must_use]
    pub fn active(&self) -> Vec<String> {
        self.iter()
            .filter(|&(_, count)| count >= ACTIVE_TAG_THRESHOLD)
            .map(|(tag, _)| tag.to_string())
            .collect()
    }

    /// Number of distinct tags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// True if no tags were counted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
