//! DTOs for turns_sea adapter.

use time::OffsetDateTime;

use crate::entities::turns::TurnState;

#[derive(Debug, Clone, Copy)]
pub struct TurnCreate {
    pub match_id: i64,
    pub seq: i32,
    pub word_id: i64,
    pub definition_template_id: i64,
    pub selector_id: i64,
}

/// Optimistic turn update; `None` fields are left alone but the version is
/// always bumped, so an empty update still claims the row.
#[derive(Debug, Clone)]
pub struct TurnUpdate {
    pub id: i64,
    pub state: Option<TurnState>,
    pub canceled_at: Option<OffsetDateTime>,
    pub completed_at: Option<OffsetDateTime>,
    pub expected_version: i32,
}

impl TurnUpdate {
    pub fn new(id: i64, expected_version: i32) -> Self {
        Self {
            id,
            state: None,
            canceled_at: None,
            completed_at: None,
            expected_version,
        }
    }

    pub fn with_state(mut self, state: TurnState) -> Self {
        self.state = Some(state);
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
