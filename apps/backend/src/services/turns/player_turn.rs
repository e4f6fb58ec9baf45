use sea_orm::DatabaseTransaction;
use tracing::debug;

use super::{PlayerTurn, TurnEngine};
use crate::domain::player_turn::decide;
use crate::domain::{MatchState, Step, TurnProgress};
use crate::error::AppError;
use crate::errors::domain::{DomainError, InvalidStateKind, NotFoundKind};
use crate::repos::turns::{self, Turn};
use crate::repos::{matches, memberships, turn_fillers, turn_players};

impl TurnEngine {
    /// The turn that needs `player_id` right now, and what they should do in it.
    ///
    /// Open turns are walked oldest first. When the player is the selector of
    /// the newest turn and has already chosen, the next turn is created and
    /// the walk continues into it. Nothing to do is `TurnNotFound`.
    pub async fn get_player_turn(
        &self,
        txn: &DatabaseTransaction,
        match_id: i64,
        player_id: i64,
    ) -> Result<PlayerTurn, AppError> {
        let m = matches::require_match(txn, match_id).await?;
        let is_member = memberships::find_membership(txn, match_id, player_id)
            .await?
            .is_some_and(|row| row.is_joined());
        if !is_member {
            return Err(DomainError::not_found(
                NotFoundKind::Match,
                format!("Match {match_id} not found for player {player_id}"),
            )
            .into());
        }
        if m.state != MatchState::Started {
            return Err(DomainError::invalid_state(
                InvalidStateKind::Match,
                format!("Match {match_id} is {:?}, not STARTED", m.state),
            )
            .into());
        }
        let game = self.game_of(txn, m.game_id).await?;

        let mut open = turns::find_open_by_match(txn, match_id).await?;
        if open.is_empty() {
            open.push(self.create_next_turn(txn, &m, &game).await?);
        }

        let mut idx = 0;
        while idx < open.len() {
            let turn = open[idx].clone();
            let is_last = idx + 1 == open.len();

            if let Some(progress) = self.progress(txn, &turn, player_id).await? {
                match decide(&progress, is_last) {
                    Step::Act(role, action) => {
                        debug!(
                            match_id,
                            turn_id = turn.id,
                            player_id,
                            ?role,
                            ?action,
                            "Turn found for player"
                        );
                        let template = self.content.get_template(txn, turn.template_id).await?;
                        let rows = turn_fillers::find_by_turn(txn, turn.id).await?;
                        return Ok(PlayerTurn::build(&turn, role, action, &template, &rows)?);
                    }
                    Step::CreateNext => {
                        let next = self.create_next_turn(txn, &m, &game).await?;
                        open.push(next);
                    }
                    Step::Continue => {}
                }
            }
            idx += 1;
        }

        debug!(match_id, player_id, open_turns = open.len(), "No turn needs player");
        Err(DomainError::not_found(
            NotFoundKind::Turn,
            format!("No turn in match {match_id} needs player {player_id} right now"),
        )
        .into())
    }

    /// `None` when the player has no row in this turn.
    async fn progress(
        &self,
        txn: &DatabaseTransaction,
        turn: &Turn,
        player_id: i64,
    ) -> Result<Option<TurnProgress>, AppError> {
        let Some(tp) = turn_players::find_turn_player(txn, turn.id, player_id).await? else {
            return Ok(None);
        };
        let rows = turn_fillers::find_by_turn(txn, turn.id).await?;
        Ok(Some(TurnProgress {
            state: turn.state,
            player_id,
            is_selector: tp.is_selector,
            has_supplied: rows.iter().any(|r| r.supplier_id == Some(player_id)),
            selection_made: rows.iter().any(|r| r.selector_id.is_some()),
            viewed_outcome: tp.viewed_outcome,
        }))
    }
}
