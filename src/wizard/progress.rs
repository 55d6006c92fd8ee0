//! Completion percentages for display.
//!
//! Values are recomputed from the current snapshot on every call.

use crate::domain::biomarker::BiomarkerTier;
use crate::domain::profile::ProfileData;

use super::completion::FieldBucket;
use super::navigator::NavigatorState;

/// Which formula a flow uses for its progress bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressPolicy {
    /// `(index + 1) / total`.
    StepIndex,
    /// `filled / target`, capped at 100.
    Volume { bucket: FieldBucket, target: usize },
}

pub fn progress(data: &ProfileData, nav: &NavigatorState, policy: &ProgressPolicy) -> u8 {
    match policy {
        ProgressPolicy::StepIndex => step_progress(nav.current_index(), nav.len()),
        ProgressPolicy::Volume { bucket, target } => {
            volume_progress(bucket.filled_count(data), *target)
        }
    }
}

pub fn step_progress(index: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let position = (index + 1).min(total);
    percent(position, total)
}

pub fn volume_progress(filled: usize, target: usize) -> u8 {
    if target == 0 {
        return 100;
    }
    percent(filled.min(target), target)
}

fn percent(part: usize, whole: usize) -> u8 {
    ((part as f64 / whole as f64) * 100.0).round().clamp(0.0, 100.0) as u8
}

/// A named accuracy band for the biological-age estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccuracyTier {
    pub tier: BiomarkerTier,
    pub min_count: usize,
    pub percentage: u8,
}

impl AccuracyTier {
    pub fn name(&self) -> &'static str {
        self.tier.label()
    }
}

/// Static lookup table of accuracy tiers, ordered by `min_count`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccuracyTable {
    tiers: Vec<AccuracyTier>,
}

impl AccuracyTable {
    pub fn new(mut tiers: Vec<AccuracyTier>) -> Self {
        tiers.sort_by_key(|tier| tier.min_count);
        Self { tiers }
    }

    pub fn standard() -> Self {
        Self::new(vec![
            AccuracyTier {
                tier: BiomarkerTier::Basic,
                min_count: 8,
                percentage: 60,
            },
            AccuracyTier {
                tier: BiomarkerTier::Extended,
                min_count: 16,
                percentage: 80,
            },
            AccuracyTier {
                tier: BiomarkerTier::Comprehensive,
                min_count: 24,
                percentage: 95,
            },
        ])
    }

    pub fn tiers(&self) -> &[AccuracyTier] {
        &self.tiers
    }

    pub fn min_count_for(&self, tier: BiomarkerTier) -> Option<usize> {
        self.tiers
            .iter()
            .find(|entry| entry.tier == tier)
            .map(|entry| entry.min_count)
    }

    /// Highest tier whose minimum is met. The tier's percentage is reported
    /// as configured, never interpolated.
    pub fn resolve(&self, filled: usize) -> Option<&AccuracyTier> {
        self.tiers.iter().rev().find(|tier| filled >= tier.min_count)
    }

    /// The next tier still out of reach, if any.
    pub fn next_tier(&self, filled: usize) -> Option<&AccuracyTier> {
        self.tiers.iter().find(|tier| filled < tier.min_count)
    }

    pub fn describe(&self, filled: usize) -> String {
        let current = match self.resolve(filled) {
            Some(tier) => format!("{} accuracy ({}%)", tier.name(), tier.percentage),
            None => "Not enough data".to_string(),
        };
        match self.next_tier(filled) {
            Some(next) => format!(
                "{current}; add {} more for {}",
                next.min_count - filled,
                next.name()
            ),
            None => current,
        }
    }
}
