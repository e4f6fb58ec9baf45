//! DTOs for matches_sea adapter.

use time::OffsetDateTime;

use crate::entities::matches::MatchState;

/// DTO for opening a new WAITING match.
#[derive(Debug, Clone, Copy)]
pub struct MatchCreate {
    pub game_id: i64,
    pub player_count: i16,
    pub reserved_count: i16,
}

/// Unified DTO for updating match fields with optimistic locking.
///
/// Only `Some` fields are written; every update bumps `version` once.
/// `expected_version` must match the stored version for the update to apply.
#[derive(Debug, Clone)]
pub struct MatchUpdate {
    pub id: i64,
    pub state: Option<MatchState>,
    pub player_count: Option<i16>,
    pub reserved_count: Option<i16>,
    pub started_at: Option<OffsetDateTime>,
    pub canceled_at: Option<OffsetDateTime>,
    pub completed_at: Option<OffsetDateTime>,
    pub expected_version: i32,
}

impl MatchUpdate {
    pub fn new(id: i64, expected_version: i32) -> Self {
        Self {
            id,
            state: None,
            player_count: None,
            reserved_count: None,
            started_at: None,
            canceled_at: None,
            completed_at: None,
            expected_version,
        }
    }

    pub fn with_state(mut self, state: MatchState) -> Self {
        self.state = Some(state);
        self
    }

    pub fn with_player_count(mut self, count: i16) -> Self {
        self.player_count = Some(count);
        self
    }

    pub fn with_reserved_count(mut self, count: i16) -> Self {
        self.reserved_count = Some(count);
        self
    }

    pub fn with_started_at(mut self, at: OffsetDateTime) -> Self {
        self.started_at = Some(at);
        self
    }

    pub fn with_canceled_at(mut self, at: OffsetDateTime) -> Self {
        self.canceled_at = Some(at);
        self
    }

    pub fn with_completed_at(mut self, at: OffsetDateTime) -> Self {
        self.completed_at = Some(at);
        self
    }
}
