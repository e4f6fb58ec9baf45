//! "What should this player do right now" for a single open turn.
//!
//! The service walks a match's open turns oldest first and asks [`decide`]
//! about each one; the first [`Step::Act`] wins.

use serde::Serialize;

use crate::domain::{PlayerId, TurnState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TurnRole {
    Selector,
    Supplier,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlayerAction {
    /// Supplier has a filler to submit
    Supply,
    /// Selector waits on suppliers
    AwaitSupplies,
    /// Selector picks a candidate
    Select,
    /// Supplier observes the selection
    ViewOutcome,
}

/// Facts about one turn as seen by one participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnProgress {
    pub state: TurnState,
    pub player_id: PlayerId,
    pub is_selector: bool,
    pub has_supplied: bool,
    pub selection_made: bool,
    pub viewed_outcome: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Return this turn to the player
    Act(TurnRole, PlayerAction),
    /// Selector finished the newest turn; start the next one and keep walking
    CreateNext,
    /// Nothing for this player here
    Continue,
}

pub fn decide(progress: &TurnProgress, is_last: bool) -> Step {
    if progress.is_selector {
        return match (progress.state, progress.selection_made) {
            (TurnState::Supplying, _) => Step::Act(TurnRole::Selector, PlayerAction::AwaitSupplies),
            (TurnState::Selecting, false) => Step::Act(TurnRole::Selector, PlayerAction::Select),
            (TurnState::Selecting, true) if is_last => Step::CreateNext,
            _ => Step::Continue,
        };
    }

    if !progress.has_supplied {
        return Step::Act(TurnRole::Supplier, PlayerAction::Supply);
    }
    if progress.selection_made && !progress.viewed_outcome {
        return Step::Act(TurnRole::Supplier, PlayerAction::ViewOutcome);
    }
    Step::Continue
}
