//! Selector rotation over the roster in join order.

use crate::domain::PlayerId;
use crate::errors::domain::{DomainError, InfraErrorKind};

/// Index of the next selector.
///
/// `None` means no prior selector (first turn of the match) and yields 0;
/// `Some(i)` yields the participant after `i`, wrapping. Returns `None` for
/// an empty roster.
pub fn next_selector_index(prior: Option<usize>, roster_len: usize) -> Option<usize> {
    if roster_len == 0 {
        return None;
    }
    match prior {
        None => Some(0),
        Some(i) => Some((i + 1) % roster_len),
    }
}

/// Next selector's player id given the roster in join order and the prior
/// turn's selector, if any.
pub fn next_selector(
    roster: &[PlayerId],
    prior_selector: Option<PlayerId>,
) -> Result<PlayerId, DomainError> {
    let prior_index = match prior_selector {
        None => None,
        Some(id) => Some(roster.iter().position(|p| *p == id).ok_or_else(|| {
            DomainError::infra(
                InfraErrorKind::DataCorruption,
                format!("Prior selector {id} is not on the match roster"),
            )
        })?),
    };

    next_selector_index(prior_index, roster.len())
        .map(|i| roster[i])
        .ok_or_else(|| {
            DomainError::infra(
                InfraErrorKind::DataCorruption,
                "Cannot rotate selector over an empty roster",
            )
        })
}
