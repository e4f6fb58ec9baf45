//! Definition templates, slot accounting and candidate presentation.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::errors::domain::{DomainError, ValidationKind};

/// Placeholder marking one blank in a template's definition text.
pub const SLOT: &str = "{}";

/// Number of blanks in a template's definition text.
pub fn count_slots(definition: &str) -> usize {
    definition.matches(SLOT).count()
}

/// Reject filler values whose count differs from the template's slots.
pub fn check_slot_count(definition: &str, values: &[String]) -> Result<(), DomainError> {
    let slots = count_slots(definition);
    if values.len() != slots {
        return Err(DomainError::validation(
            ValidationKind::FillerSlotMismatch,
            format!(
                "Template has {slots} slot(s) but {} value(s) were supplied",
                values.len()
            ),
        ));
    }
    Ok(())
}

/// Fill the template's slots positionally.
pub fn render_definition(definition: &str, values: &[String]) -> Result<String, DomainError> {
    check_slot_count(definition, values)?;

    let mut out = String::with_capacity(definition.len());
    let mut parts = definition.split(SLOT);
    if let Some(first) = parts.next() {
        out.push_str(first);
    }
    for (part, value) in parts.zip(values) {
        out.push_str(value);
        out.push_str(part);
    }
    Ok(out)
}

/// How a turn's `filler_count` candidate rows are sourced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotPlan {
    /// One per non-selector participant
    pub supplier_slots: usize,
    /// Bluffs drawn from the content library once suppliers are done
    pub generated_slots: usize,
    /// Total rows, canonical included
    pub total: usize,
}

/// Validate a game's sizing and derive its per-turn slot plan.
///
/// `filler_count` = 1 canonical + (`match_size` - 1) suppliers + generated bluffs.
pub fn slot_plan(match_size: usize, filler_count: usize) -> Result<SlotPlan, DomainError> {
    if match_size < 2 {
        return Err(DomainError::validation(
            ValidationKind::GameConfig,
            format!("match_size must be at least 2, got {match_size}"),
        ));
    }
    if filler_count < match_size {
        return Err(DomainError::validation(
            ValidationKind::GameConfig,
            format!("filler_count ({filler_count}) must be at least match_size ({match_size})"),
        ));
    }
    Ok(SlotPlan {
        supplier_slots: match_size - 1,
        generated_slots: filler_count - match_size,
        total: filler_count,
    })
}

/// Presentation order for a turn's candidate rows. Seeded by the turn id,
/// so repeated polls see the same order.
pub fn candidate_order(turn_id: i64, ids: &mut [i64]) {
    ids.sort_unstable();
    let mut rng = ChaCha8Rng::seed_from_u64(turn_id as u64);
    ids.shuffle(&mut rng);
}
