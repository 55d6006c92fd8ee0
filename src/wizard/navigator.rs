//! Step navigation state machine shared by every flow.
//!
//! The machine is total: every transition clamps into `[0, len - 1]` and
//! none can fail. Completion marks only ever accumulate.

use std::collections::BTreeSet;

use tracing::debug;

use crate::domain::profile::ProfileData;

use super::completion::is_complete;
use super::registry::SectionRegistry;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigatorState {
    current: usize,
    len: usize,
    completed: BTreeSet<&'static str>,
}

impl NavigatorState {
    /// Starts at the first section with that section already marked complete.
    pub fn new(registry: &SectionRegistry) -> Self {
        let mut completed = BTreeSet::new();
        completed.insert(registry.first().id);
        Self {
            current: 0,
            len: registry.len(),
            completed,
        }
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_first(&self) -> bool {
        self.current == 0
    }

    pub fn is_last(&self) -> bool {
        self.current + 1 >= self.len
    }

    pub fn can_go_next(&self) -> bool {
        !self.is_last()
    }

    pub fn can_go_previous(&self) -> bool {
        !self.is_first()
    }

    /// Advances one step. Returns `false` (and stays put) on the last step.
    pub fn next(&mut self) -> bool {
        self.move_to(self.current + 1)
    }

    /// Steps back once. Returns `false` (and stays put) on the first step.
    pub fn previous(&mut self) -> bool {
        match self.current.checked_sub(1) {
            Some(target) => self.move_to(target),
            None => false,
        }
    }

    /// Jumps to `index` regardless of completion. Indices past the end clamp
    /// to the last step.
    pub fn jump_to(&mut self, index: usize) -> bool {
        self.move_to(index)
    }

    fn move_to(&mut self, target: usize) -> bool {
        let clamped = target.min(self.len.saturating_sub(1));
        if clamped == self.current {
            return false;
        }
        debug!(from = self.current, to = clamped, "navigator moved");
        self.current = clamped;
        true
    }

    pub fn mark_complete(&mut self, section_id: &'static str) -> bool {
        self.completed.insert(section_id)
    }

    pub fn is_completed(&self, section_id: &str) -> bool {
        self.completed.contains(section_id)
    }

    pub fn completed_ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.completed.iter().copied()
    }

    /// Marks every threshold section whose predicate now holds and returns
    /// the ids that were newly marked. Never un-marks.
    pub fn refresh_completion(
        &mut self,
        data: &ProfileData,
        registry: &SectionRegistry,
    ) -> Vec<&'static str> {
        let mut newly = Vec::new();
        for section in registry.iter() {
            if is_complete(data, section) && self.completed.insert(section.id) {
                debug!(section = section.id, "section completed");
                newly.push(section.id);
            }
        }
        newly
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::completion::FieldBucket;
    use crate::wizard::dispatch::RenderContext;
    use crate::wizard::registry::SectionDescriptor;

    const IDS: [&str; 8] = ["s0", "s1", "s2", "s3", "s4", "s5", "s6", "s7"];

    fn noop(_: &mut RenderContext<'_>) {}

    fn registry(len: usize) -> SectionRegistry {
        SectionRegistry::new(
            IDS[..len]
                .iter()
                .map(|id| SectionDescriptor::new(*id, *id, "", noop))
                .collect(),
        )
    }

    #[test]
    fn linear_eight_step_scenario() {
        let mut nav = NavigatorState::new(&registry(8));
        assert_eq!(nav.current_index(), 0);
        assert_eq!(nav.completed_ids().collect::<Vec<_>>(), vec!["s0"]);

        for _ in 0..7 {
            assert!(nav.next());
        }
        assert_eq!(nav.current_index(), 7);
        assert!(!nav.next());
        assert_eq!(nav.current_index(), 7);
    }

    #[test]
    fn previous_is_noop_at_start() {
        let mut nav = NavigatorState::new(&registry(3));
        assert!(!nav.previous());
        assert_eq!(nav.current_index(), 0);
        assert!(nav.is_first());
        assert!(!nav.can_go_previous());
    }

    #[test]
    fn clamps_for_every_transition_sequence() {
        for len in 1..=8 {
            let mut nav = NavigatorState::new(&registry(len));
            // Deterministic pseudo-random walk over next/previous.
            let mut seed: u32 = 0x9e37_79b9 ^ len as u32;
            for _ in 0..200 {
                seed ^= seed << 13;
                seed ^= seed >> 17;
                seed ^= seed << 5;
                if seed % 3 == 0 {
                    nav.previous();
                } else {
                    nav.next();
                }
                assert!(nav.current_index() < len, "len {len} index {}", nav.current_index());
            }
        }
    }

    #[test]
    fn jump_is_unconditional_and_clamped() {
        let mut nav = NavigatorState::new(&registry(5));
        assert!(nav.jump_to(3));
        assert_eq!(nav.current_index(), 3);
        assert!(nav.jump_to(99));
        assert_eq!(nav.current_index(), 4);
        assert!(nav.is_last());
        assert!(nav.jump_to(0));
        assert!(!nav.jump_to(0));
    }

    #[test]
    fn single_section_flow_never_moves() {
        let mut nav = NavigatorState::new(&registry(1));
        assert!(!nav.next());
        assert!(!nav.previous());
        assert!(nav.is_first() && nav.is_last());
    }

    #[test]
    fn completion_is_monotonic() {
        let ids = vec!["glucose", "hdl"];
        let registry = SectionRegistry::new(vec![
            SectionDescriptor::new("intro", "Intro", "", noop),
            SectionDescriptor::new("labs", "Labs", "", noop)
                .with_threshold(FieldBucket::LabResults(ids), 2),
        ]);
        let mut nav = NavigatorState::new(&registry);
        let mut data = ProfileData::new();
        data.lab_results.insert("glucose".into(), 90.0);
        assert!(nav.refresh_completion(&data, &registry).is_empty());

        data.lab_results.insert("hdl".into(), 60.0);
        assert_eq!(nav.refresh_completion(&data, &registry), vec!["labs"]);

        data.lab_results.clear();
        assert!(nav.refresh_completion(&data, &registry).is_empty());
        assert!(nav.is_completed("labs"));
    }
}
