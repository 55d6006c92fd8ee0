use std::collections::HashSet;
use std::fmt;

use super::completion::FieldBucket;
use super::dispatch::RenderContext;

/// Render function bound to a section.
pub type RenderFn = fn(&mut RenderContext<'_>);

/// Static description of one section of a form.
#[derive(Clone)]
pub struct SectionDescriptor {
    pub id: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
    /// Minimum filled items in `bucket` for the section to count as complete.
    pub min_items: Option<usize>,
    pub bucket: FieldBucket,
    pub render: RenderFn,
}

impl SectionDescriptor {
    pub fn new(id: &'static str, label: &'static str, icon: &'static str, render: RenderFn) -> Self {
        Self {
            id,
            label,
            icon,
            min_items: None,
            bucket: FieldBucket::Empty,
            render,
        }
    }

    pub fn with_bucket(mut self, bucket: FieldBucket) -> Self {
        self.bucket = bucket;
        self
    }

    pub fn with_threshold(mut self, bucket: FieldBucket, min_items: usize) -> Self {
        self.bucket = bucket;
        self.min_items = Some(min_items);
        self
    }
}

impl fmt::Debug for SectionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SectionDescriptor")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("min_items", &self.min_items)
            .field("bucket", &self.bucket)
            .finish_non_exhaustive()
    }
}

/// Ordered, immutable list of sections for one flow.
#[derive(Debug, Clone)]
pub struct SectionRegistry {
    sections: Vec<SectionDescriptor>,
}

impl SectionRegistry {
    /// # Panics
    ///
    /// Panics when `sections` is empty or contains duplicate ids; registries
    /// are built from static tables so either is a programming error.
    pub fn new(sections: Vec<SectionDescriptor>) -> Self {
        assert!(!sections.is_empty(), "a section registry needs at least one section");
        let mut seen = HashSet::new();
        for section in &sections {
            assert!(seen.insert(section.id), "duplicate section id `{}`", section.id);
        }
        Self { sections }
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn first(&self) -> &SectionDescriptor {
        &self.sections[0]
    }

    pub fn get(&self, index: usize) -> Option<&SectionDescriptor> {
        self.sections.get(index)
    }

    /// # Panics
    ///
    /// Panics for an id that is not registered.
    pub fn by_id(&self, id: &str) -> &SectionDescriptor {
        &self.sections[self.index_of(id)]
    }

    /// # Panics
    ///
    /// Panics for an id that is not registered.
    pub fn index_of(&self, id: &str) -> usize {
        self.sections
            .iter()
            .position(|section| section.id == id)
            .unwrap_or_else(|| panic!("unknown section id `{id}`"))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.sections.iter().any(|section| section.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SectionDescriptor> {
        self.sections.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop(_: &mut RenderContext<'_>) {}

    fn registry() -> SectionRegistry {
        SectionRegistry::new(vec![
            SectionDescriptor::new("basics", "Basics", "user", noop),
            SectionDescriptor::new("goals", "Goals", "target", noop),
        ])
    }

    #[test]
    fn lookup_by_index_and_id() {
        let registry = registry();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.first().id, "basics");
        assert_eq!(registry.get(1).map(|s| s.label), Some("Goals"));
        assert!(registry.get(2).is_none());
        assert_eq!(registry.index_of("goals"), 1);
        assert_eq!(registry.by_id("basics").icon, "user");
        assert!(registry.contains("goals"));
        assert!(!registry.contains("sleep"));
    }

    #[test]
    #[should_panic(expected = "unknown section id `sleep`")]
    fn unknown_id_is_fatal() {
        registry().by_id("sleep");
    }

    #[test]
    #[should_panic(expected = "duplicate section id")]
    fn duplicate_ids_are_rejected() {
        SectionRegistry::new(vec![
            SectionDescriptor::new("a", "A", "", noop),
            SectionDescriptor::new("a", "A again", "", noop),
        ]);
    }

    #[test]
    #[should_panic(expected = "at least one section")]
    fn empty_registry_is_rejected() {
        SectionRegistry::new(Vec::new());
    }
}
