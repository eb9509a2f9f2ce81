//! Placeholder-system exclusion and jump validation.

use std::collections::HashSet;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::{AD_SERIES_PATTERN, V_SERIES_PATTERN};
use crate::model::{Jump, System, TransformedSystem};

lazy_static! {
    static ref EXCLUDED_NAME_PATTERNS: [Regex; 2] = [
        Regex::new(V_SERIES_PATTERN).unwrap(),
        Regex::new(AD_SERIES_PATTERN).unwrap(),
    ];
}

/// Returns true for placeholder names (`V-###`, `AD###`, any case).
///
/// The whole name must match; `V-0001` or `Alpha-001` are kept.
pub fn is_filtered_system(name: &str) -> bool {
    EXCLUDED_NAME_PATTERNS.iter().any(|re| re.is_match(name))
}

/// Systems that survived the name filter plus the number dropped.
#[derive(Debug, Clone, Default)]
pub struct SystemFilterOutcome {
    pub kept: Vec<System>,
    pub excluded: usize,
}

/// Drop placeholder systems, preserving the order of the rest.
pub fn filter_systems(systems: Vec<System>) -> SystemFilterOutcome {
    let mut outcome = SystemFilterOutcome::default();
    for system in systems {
        if is_filtered_system(&system.name) {
            debug!(id = system.id, name = %system.name, "excluding placeholder system");
            outcome.excluded += 1;
        } else {
            outcome.kept.push(system);
        }
    }
    outcome
}

/// Jumps whose endpoints both survived, flattened as `[s0, t0, s1, t1, ...]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JumpValidation {
    pub flat: Vec<i64>,
    pub dropped: usize,
}

impl JumpValidation {
    /// Number of surviving pairs
    pub fn pair_count(&self) -> usize {
        self.flat.len() / 2
    }
}

/// Keep only jumps whose source and target are both in `systems`.
pub fn validate_jumps(jumps: &[Jump], systems: &[TransformedSystem]) -> JumpValidation {
    let valid_ids: HashSet<i64> = systems.iter().map(|s| s.id).collect();

    let mut validation = JumpValidation::default();
    for jump in jumps {
        if valid_ids.contains(&jump.source_id) && valid_ids.contains(&jump.target_id) {
            validation.flat.push(jump.source_id);
            validation.flat.push(jump.target_id);
        } else {
            validation.dropped += 1;
        }
    }
    validation
}
