//! Word allocation for new turns.

use std::collections::BTreeSet;
use std::sync::Arc;

use rand::seq::IndexedRandom;
use rand::Rng;
use sea_orm::DatabaseTransaction;
use tracing::debug;

use crate::error::AppError;
use crate::errors::domain::{DomainError, ExhaustedKind};
use crate::ports::ContentLibrary;
use crate::repos::turns;

/// Uniform pick from `active − used`.
///
/// Candidates are ordered before sampling, so a seeded `rng` always yields
/// the same word for the same inputs.
pub fn pick_unused_word<R: Rng + ?Sized>(active: &[i64], used: &[i64], rng: &mut R) -> Option<i64> {
    let used: BTreeSet<i64> = used.iter().copied().collect();
    let candidates: Vec<i64> = active
        .iter()
        .copied()
        .collect::<BTreeSet<i64>>()
        .into_iter()
        .filter(|id| !used.contains(id))
        .collect();
    candidates.choose(rng).copied()
}

pub struct WordAllocator {
    content: Arc<dyn ContentLibrary>,
}

impl WordAllocator {
    pub fn new(content: Arc<dyn ContentLibrary>) -> Self {
        Self { content }
    }

    /// A word no turn of the match has used yet, terminal turns included.
    ///
    /// Only words whose template can supply `min_bluffs` generated
    /// candidates are drawn.
    pub async fn choose_word_for_match(
        &self,
        txn: &DatabaseTransaction,
        match_id: i64,
        min_bluffs: usize,
    ) -> Result<i64, AppError> {
        let active = self.content.list_active_word_ids(txn, min_bluffs).await?;
        let used = turns::used_word_ids(txn, match_id).await?;

        let picked = pick_unused_word(&active, &used, &mut rand::rng());
        match picked {
            Some(word_id) => {
                debug!(match_id, word_id, active = active.len(), used = used.len(), "Word chosen");
                Ok(word_id)
            }
            None => Err(DomainError::exhausted(
                ExhaustedKind::Words,
                format!("Match {match_id} has used every available word"),
            )
            .into()),
        }
    }
}
