//! Match roster repository functions.

use sea_orm::ConnectionTrait;

use crate::adapters::memberships_sea as memberships_adapter;
use crate::entities::match_players;
pub use crate::entities::match_players::MembershipStatus;
use crate::errors::domain::DomainError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Membership {
    pub id: i64,
    pub match_id: i64,
    pub player_id: i64,
    pub status: MembershipStatus,
    pub join_seq: Option<i16>,
}

impl Membership {
    pub fn is_joined(&self) -> bool {
        self.status == MembershipStatus::Joined
    }
}

impl From<match_players::Model> for Membership {
    fn from(model: match_players::Model) -> Self {
        Self {
            id: model.id,
            match_id: model.match_id,
            player_id: model.player_id,
            status: model.status,
            join_seq: model.join_seq,
        }
    }
}

pub async fn find_membership<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
    player_id: i64,
) -> Result<Option<Membership>, DomainError> {
    let membership = memberships_adapter::find_membership(conn, match_id, player_id).await?;
    Ok(membership.map(Membership::from))
}

pub async fn add_joined<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
    player_id: i64,
    join_seq: i16,
) -> Result<Membership, DomainError> {
    let dto = memberships_adapter::MembershipCreate::joined(match_id, player_id, join_seq);
    let membership = memberships_adapter::create_membership(conn, dto).await?;
    Ok(Membership::from(membership))
}

pub async fn add_invited<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
    player_id: i64,
) -> Result<Membership, DomainError> {
    let dto = memberships_adapter::MembershipCreate::invited(match_id, player_id);
    let membership = memberships_adapter::create_membership(conn, dto).await?;
    Ok(Membership::from(membership))
}

pub async fn promote_to_joined<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    membership_id: i64,
    join_seq: i16,
) -> Result<Membership, DomainError> {
    let membership = memberships_adapter::promote_to_joined(conn, membership_id, join_seq).await?;
    Ok(Membership::from(membership))
}

pub async fn find_all_by_match<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
) -> Result<Vec<Membership>, DomainError> {
    let rows = memberships_adapter::find_all_by_match(conn, match_id).await?;
    Ok(rows.into_iter().map(Membership::from).collect())
}

/// Player ids of the joined roster in join order.
pub async fn roster_player_ids<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
) -> Result<Vec<i64>, DomainError> {
    let rows = memberships_adapter::find_roster(conn, match_id).await?;
    Ok(rows.into_iter().map(|m| m.player_id).collect())
}
