//! DTOs for memberships_sea adapter.

use crate::entities::match_players::MembershipStatus;

#[derive(Debug, Clone, Copy)]
pub struct MembershipCreate {
    pub match_id: i64,
    pub player_id: i64,
    pub status: MembershipStatus,
    /// Required for JOINED rows, absent for INVITED
    pub join_seq: Option<i16>,
}

impl MembershipCreate {
    pub fn joined(match_id: i64, player_id: i64, join_seq: i16) -> Self {
        Self {
            match_id,
            player_id,
            status: MembershipStatus::Joined,
            join_seq: Some(join_seq),
        }
    }

    pub fn invited(match_id: i64, player_id: i64) -> Self {
        Self {
            match_id,
            player_id,
            status: MembershipStatus::Invited,
            join_seq: None,
        }
    }
}
