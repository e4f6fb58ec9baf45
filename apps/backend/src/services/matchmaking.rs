//! Match registry: random and opponent-targeted matchmaking, match reads and
//! lifecycle hooks.
//!
//! Requests for the same game are serialized by a claim on the game row,
//! taken before the candidate search, so two first requests cannot each
//! open a match. Every roster change is also a compare-and-swap on
//! `matches.version`; the winner's `player_count + 1` becomes the
//! newcomer's `join_seq`, so join order equals commit order.

use std::sync::Arc;

use sea_orm::DatabaseTransaction;
use serde::Serialize;
use time::OffsetDateTime;
use tracing::{debug, info};

use crate::domain::match_state::state_after_join;
use crate::domain::{MatchState, TurnState};
use crate::error::AppError;
use crate::errors::domain::{DomainError, InvalidStateKind, NotFoundKind, ValidationKind};
use crate::ports::PlayerDirectory;
use crate::repos::games::{self, Game};
use crate::repos::matches::{self, Match, MatchChanges};
use crate::repos::memberships::{self, Membership};
use crate::repos::turns;

/// Read model for a match and its roster.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchView {
    pub id: i64,
    pub game_id: i64,
    pub state: MatchState,
    /// Joined players in join order
    pub players: Vec<i64>,
    /// Players holding a reserved seat who have not requested yet
    pub invited: Vec<i64>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    pub started_at: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub canceled_at: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub completed_at: Option<OffsetDateTime>,
    pub version: i32,
}

impl MatchView {
    fn build(m: Match, mut rows: Vec<Membership>) -> Self {
        rows.sort_by_key(|r| (r.join_seq, r.id));
        let (joined, invited): (Vec<_>, Vec<_>) = rows.into_iter().partition(|r| r.is_joined());
        Self {
            id: m.id,
            game_id: m.game_id,
            state: m.state,
            players: joined.into_iter().map(|r| r.player_id).collect(),
            invited: invited.into_iter().map(|r| r.player_id).collect(),
            created_at: m.created_at,
            started_at: m.started_at,
            canceled_at: m.canceled_at,
            completed_at: m.completed_at,
            version: m.version,
        }
    }
}

pub struct MatchRegistry {
    players: Arc<dyn PlayerDirectory>,
}

impl MatchRegistry {
    pub fn new(players: Arc<dyn PlayerDirectory>) -> Self {
        Self { players }
    }

    /// Targeted request when `opponent_id` is given, random otherwise.
    pub async fn request_match(
        &self,
        txn: &DatabaseTransaction,
        game_id: i64,
        requester_id: i64,
        opponent_id: Option<i64>,
    ) -> Result<MatchView, AppError> {
        match opponent_id {
            Some(opponent_id) => {
                self.request_opponent_match(txn, game_id, requester_id, opponent_id)
                    .await
            }
            None => self.request_random_match(txn, game_id, requester_id).await,
        }
    }

    /// Join the oldest WAITING match of the game with a free seat, or open a
    /// new one.
    pub async fn request_random_match(
        &self,
        txn: &DatabaseTransaction,
        game_id: i64,
        requester_id: i64,
    ) -> Result<MatchView, AppError> {
        games::claim_for_matchmaking(txn, game_id).await?;
        let game = self.playable_game(txn, game_id).await?;
        self.require_player(txn, requester_id, NotFoundKind::Player)
            .await?;

        let candidate = matches::find_random_candidate(
            txn,
            game.id,
            requester_id,
            game.match_size_i16(),
        )
        .await?;

        let m = match candidate {
            Some(m) => self.take_seat(txn, &game, m, requester_id, None).await?,
            None => self.open_match(txn, &game, requester_id, None).await?,
        };
        self.view(txn, m).await
    }

    /// Join a WAITING match the opponent is in, or open one holding a seat
    /// for them. The opponent's seat is only an invitation; the match waits
    /// for their own request before it can start.
    pub async fn request_opponent_match(
        &self,
        txn: &DatabaseTransaction,
        game_id: i64,
        requester_id: i64,
        opponent_id: i64,
    ) -> Result<MatchView, AppError> {
        if requester_id == opponent_id {
            return Err(DomainError::validation(
                ValidationKind::SelfOpponent,
                "A player cannot request a match against themselves",
            )
            .into());
        }
        games::claim_for_matchmaking(txn, game_id).await?;
        let game = self.playable_game(txn, game_id).await?;
        self.require_player(txn, requester_id, NotFoundKind::Player)
            .await?;
        self.require_player(txn, opponent_id, NotFoundKind::Opponent)
            .await?;

        let candidate = matches::find_opponent_candidate(
            txn,
            game.id,
            requester_id,
            opponent_id,
            game.match_size_i16(),
        )
        .await?;

        let m = match candidate {
            Some(m) => {
                let invitation = memberships::find_membership(txn, m.id, requester_id)
                    .await?
                    .filter(|row| !row.is_joined());
                self.take_seat(txn, &game, m, requester_id, invitation)
                    .await?
            }
            None => {
                self.open_match(txn, &game, requester_id, Some(opponent_id))
                    .await?
            }
        };
        self.view(txn, m).await
    }

    pub async fn get_match(
        &self,
        txn: &DatabaseTransaction,
        match_id: i64,
    ) -> Result<MatchView, AppError> {
        let m = matches::require_match(txn, match_id).await?;
        debug!(match_id, state = ?m.state, "Loaded match");
        self.view(txn, m).await
    }

    /// Matches of `game_id` the player has joined, newest first.
    pub async fn list_matches_for_player(
        &self,
        txn: &DatabaseTransaction,
        game_id: i64,
        player_id: i64,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<MatchView>, AppError> {
        let rows = matches::list_for_player(txn, game_id, player_id, limit, offset).await?;
        debug!(game_id, player_id, count = rows.len(), "Listed matches");
        let mut views = Vec::with_capacity(rows.len());
        for m in rows {
            views.push(self.view(txn, m).await?);
        }
        Ok(views)
    }

    pub async fn cancel_match(
        &self,
        txn: &DatabaseTransaction,
        match_id: i64,
    ) -> Result<MatchView, AppError> {
        let m = matches::require_match(txn, match_id).await?;
        let m = self.close_match(txn, m, MatchState::Canceled).await?;
        self.view(txn, m).await
    }

    /// Integration hook for end-of-game; only a STARTED match can complete.
    pub async fn complete_match(
        &self,
        txn: &DatabaseTransaction,
        match_id: i64,
    ) -> Result<MatchView, AppError> {
        let m = matches::require_match(txn, match_id).await?;
        let m = self.close_match(txn, m, MatchState::Completed).await?;
        self.view(txn, m).await
    }

    /// Cancel WAITING matches not touched since `cutoff`; returns their ids.
    pub async fn cancel_abandoned_matches(
        &self,
        txn: &DatabaseTransaction,
        cutoff: OffsetDateTime,
    ) -> Result<Vec<i64>, AppError> {
        let stale = matches::find_stale_waiting(txn, cutoff).await?;
        let mut canceled = Vec::with_capacity(stale.len());
        for m in stale {
            let m = self.close_match(txn, m, MatchState::Canceled).await?;
            canceled.push(m.id);
        }
        if !canceled.is_empty() {
            info!(count = canceled.len(), match_ids = ?canceled, "Canceled abandoned matches");
        }
        Ok(canceled)
    }

    async fn playable_game(
        &self,
        txn: &DatabaseTransaction,
        game_id: i64,
    ) -> Result<Game, AppError> {
        let game = games::require_active(txn, game_id).await?;
        game.slot_plan()?;
        Ok(game)
    }

    /// Unknown and inactive players are both reported as `kind` not found.
    async fn require_player(
        &self,
        txn: &DatabaseTransaction,
        player_id: i64,
        kind: NotFoundKind,
    ) -> Result<(), AppError> {
        match self.players.get_player(txn, player_id).await? {
            Some(player) if player.is_active => Ok(()),
            _ => Err(DomainError::not_found(kind, format!("Player {player_id} not found")).into()),
        }
    }

    /// Open a WAITING match with the requester as first joiner, optionally
    /// reserving a seat for an invited opponent.
    async fn open_match(
        &self,
        txn: &DatabaseTransaction,
        game: &Game,
        requester_id: i64,
        invite: Option<i64>,
    ) -> Result<Match, AppError> {
        let reserved = if invite.is_some() { 2 } else { 1 };
        let m = matches::create_match(txn, game.id, 1, reserved).await?;
        memberships::add_joined(txn, m.id, requester_id, 1).await?;
        if let Some(opponent_id) = invite {
            memberships::add_invited(txn, m.id, opponent_id).await?;
        }
        info!(
            match_id = m.id,
            game_id = game.id,
            player_id = requester_id,
            invited = ?invite,
            "Opened match"
        );
        Ok(m)
    }

    /// Add the requester to `m` as the next joiner. An existing invitation is
    /// promoted in place; otherwise a free seat is consumed. Starts the
    /// match when the roster fills.
    async fn take_seat(
        &self,
        txn: &DatabaseTransaction,
        game: &Game,
        m: Match,
        requester_id: i64,
        invitation: Option<Membership>,
    ) -> Result<Match, AppError> {
        if !m.state.accepts_players() {
            return Err(DomainError::invalid_state(
                InvalidStateKind::Match,
                format!("Match {} is {:?} and not accepting players", m.id, m.state),
            )
            .into());
        }

        let join_seq = m.player_count + 1;
        let reserved = if invitation.is_some() {
            m.reserved_count
        } else {
            m.reserved_count + 1
        };
        let next_state = state_after_join(usize::try_from(join_seq).unwrap_or(0), game.match_size);

        let mut changes = MatchChanges {
            player_count: Some(join_seq),
            reserved_count: Some(reserved),
            ..MatchChanges::default()
        };
        if next_state != m.state {
            changes.state = Some(m.state.transition(next_state)?);
        }

        // Claim the seat first; a lost race surfaces as an optimistic-lock conflict
        let updated = matches::update_match(txn, m.id, m.version, changes).await?;

        match invitation {
            Some(row) => {
                memberships::promote_to_joined(txn, row.id, join_seq).await?;
            }
            None => {
                memberships::add_joined(txn, m.id, requester_id, join_seq).await?;
            }
        }

        info!(
            match_id = m.id,
            player_id = requester_id,
            join_seq,
            state = ?updated.state,
            "Player joined match"
        );
        if updated.state == MatchState::Started {
            info!(match_id = m.id, players = join_seq, "Match started");
        }
        Ok(updated)
    }

    /// Move the match to a terminal state and cancel its open turns.
    async fn close_match(
        &self,
        txn: &DatabaseTransaction,
        m: Match,
        target: MatchState,
    ) -> Result<Match, AppError> {
        let target = m.state.transition(target)?;
        let updated = matches::update_match(
            txn,
            m.id,
            m.version,
            MatchChanges {
                state: Some(target),
                ..MatchChanges::default()
            },
        )
        .await?;

        for turn in turns::find_open_by_match(txn, m.id).await? {
            turns::transition(txn, &turn, TurnState::Canceled).await?;
            debug!(match_id = m.id, turn_id = turn.id, "Canceled open turn");
        }

        info!(match_id = m.id, from = ?m.state, to = ?target, "Match closed");
        Ok(updated)
    }

    async fn view(&self, txn: &DatabaseTransaction, m: Match) -> Result<MatchView, AppError> {
        let rows = memberships::find_all_by_match(txn, m.id).await?;
        Ok(MatchView::build(m, rows))
    }
}
