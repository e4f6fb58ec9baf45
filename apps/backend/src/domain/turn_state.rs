//! Turn lifecycle: SUPPLYING -> SELECTING -> COMPLETED, with CANCELED from any open state.

use serde::Serialize;

use crate::errors::domain::{DomainError, InvalidStateKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TurnState {
    Supplying,
    Selecting,
    Canceled,
    Completed,
}

impl TurnState {
    pub fn is_open(self) -> bool {
        matches!(self, TurnState::Supplying | TurnState::Selecting)
    }

    pub fn can_transition_to(self, next: TurnState) -> bool {
        use TurnState::*;
        matches!(
            (self, next),
            (Supplying, Selecting)
                | (Selecting, Completed)
                | (Supplying, Canceled)
                | (Selecting, Canceled)
        )
    }

    pub fn transition(self, next: TurnState) -> Result<TurnState, DomainError> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(DomainError::invalid_state(
                InvalidStateKind::Turn,
                format!("Turn cannot move from {self:?} to {next:?}"),
            ))
        }
    }

    /// Guard for actions that require a specific state.
    pub fn require(self, expected: TurnState, action: &str) -> Result<(), DomainError> {
        if self == expected {
            Ok(())
        } else {
            Err(DomainError::invalid_state(
                InvalidStateKind::Turn,
                format!("Cannot {action} while turn is {self:?}"),
            ))
        }
    }
}
