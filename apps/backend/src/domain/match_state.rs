//! Match lifecycle: WAITING -> STARTED -> {CANCELED, COMPLETED}, or WAITING -> CANCELED.

use serde::Serialize;

use crate::errors::domain::{DomainError, InvalidStateKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchState {
    Waiting,
    Started,
    Canceled,
    Completed,
}

impl MatchState {
    pub fn is_terminal(self) -> bool {
        matches!(self, MatchState::Canceled | MatchState::Completed)
    }

    /// Only WAITING matches take new players.
    pub fn accepts_players(self) -> bool {
        self == MatchState::Waiting
    }

    pub fn can_transition_to(self, next: MatchState) -> bool {
        use MatchState::*;
        matches!(
            (self, next),
            (Waiting, Started) | (Waiting, Canceled) | (Started, Canceled) | (Started, Completed)
        )
    }

    pub fn transition(self, next: MatchState) -> Result<MatchState, DomainError> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(DomainError::invalid_state(
                InvalidStateKind::Match,
                format!("Match cannot move from {self:?} to {next:?}"),
            ))
        }
    }
}

/// State a WAITING match lands in after its roster grows to `joined`.
///
/// Auto-start happens exactly when the roster reaches `match_size`.
pub fn state_after_join(joined: usize, match_size: usize) -> MatchState {
    if joined >= match_size {
        MatchState::Started
    } else {
        MatchState::Waiting
    }
}
