use sea_orm::DatabaseTransaction;
use tracing::{debug, info};

use super::{TurnEngine, TurnSummary};
use crate::domain::fillers::check_slot_count;
use crate::domain::TurnState;
use crate::error::AppError;
use crate::errors::domain::{
    ConflictKind, DomainError, ExhaustedKind, InvalidStateKind, NotFoundKind,
};
use crate::repos::matches;
use crate::repos::turn_fillers::{self, FillerSource};
use crate::repos::turn_players::{self, TurnPlayer};
use crate::repos::turns::{self, Turn};

fn role_error(detail: impl Into<String>) -> AppError {
    DomainError::invalid_state(InvalidStateKind::Role, detail).into()
}

impl TurnEngine {
    /// Record a supplier's filler. Once every supplier has submitted, the
    /// remaining slots are filled with generated bluffs and the turn moves
    /// to SELECTING.
    pub async fn submit_filler(
        &self,
        txn: &DatabaseTransaction,
        turn_id: i64,
        player_id: i64,
        values: Vec<String>,
    ) -> Result<TurnSummary, AppError> {
        let turn = turns::require_turn(txn, turn_id).await?;
        turn.state.require(TurnState::Supplying, "submit a filler")?;

        let me = self.participant(txn, &turn, player_id).await?;
        if me.is_selector {
            return Err(role_error(format!(
                "Player {player_id} is the selector of turn {turn_id} and cannot supply"
            )));
        }

        let rows = turn_fillers::find_by_turn(txn, turn_id).await?;
        if rows.iter().any(|r| r.supplier_id == Some(player_id)) {
            return Err(DomainError::invalid_state(
                InvalidStateKind::AlreadySupplied,
                format!("Player {player_id} already supplied a filler for turn {turn_id}"),
            )
            .into());
        }

        let template = self.content.get_template(txn, turn.template_id).await?;
        check_slot_count(&template.definition, &values)?;

        // Version check makes the count-then-transition below atomic
        let turn = turns::touch(txn, &turn).await?;
        turn_fillers::add_filler(
            txn,
            turn.id,
            template.id,
            values,
            FillerSource::Supplier(player_id),
        )
        .await?;
        info!(turn_id, player_id, "Filler supplied");

        let participants = turn_players::find_by_turn(txn, turn_id).await?;
        let suppliers = participants.iter().filter(|p| !p.is_selector).count();
        let supplied = rows.iter().filter(|r| r.supplier_id.is_some()).count() + 1;
        if supplied < suppliers {
            debug!(turn_id, supplied, suppliers, "Waiting on remaining suppliers");
            return Ok(TurnSummary::from(&turn));
        }

        let m = matches::require_match(txn, turn.match_id).await?;
        let game = self.game_of(txn, m.game_id).await?;
        let have = rows.len() + 1;
        let needed = game.filler_count.saturating_sub(have);

        let bluffs = self
            .content
            .get_bluff_fillers(txn, template.id, needed)
            .await?;
        if bluffs.len() < needed {
            return Err(DomainError::exhausted(
                ExhaustedKind::BluffFillers,
                format!(
                    "Template {} has {} bluff filler(s), turn {turn_id} needs {needed}",
                    template.id,
                    bluffs.len()
                ),
            )
            .into());
        }
        for bluff in bluffs.into_iter().take(needed) {
            check_slot_count(&template.definition, &bluff.values)?;
            turn_fillers::add_filler(
                txn,
                turn.id,
                template.id,
                bluff.values,
                FillerSource::Generated,
            )
            .await?;
        }

        let turn = turns::transition(txn, &turn, TurnState::Selecting).await?;
        info!(turn_id, candidates = have + needed, generated = needed, "Turn ready for selection");
        Ok(TurnSummary::from(&turn))
    }

    /// Record the selector's choice. One-time: a second selection is rejected
    /// and the first stays in place.
    pub async fn submit_selection(
        &self,
        txn: &DatabaseTransaction,
        turn_id: i64,
        player_id: i64,
        filler_id: i64,
    ) -> Result<TurnSummary, AppError> {
        let turn = turns::require_turn(txn, turn_id).await?;
        turn.state.require(TurnState::Selecting, "submit a selection")?;

        let me = self.participant(txn, &turn, player_id).await?;
        if !me.is_selector {
            return Err(role_error(format!(
                "Player {player_id} is not the selector of turn {turn_id}"
            )));
        }

        let rows = turn_fillers::find_by_turn(txn, turn_id).await?;
        if !rows.iter().any(|r| r.id == filler_id) {
            return Err(DomainError::not_found(
                NotFoundKind::Filler,
                format!("Candidate {filler_id} is not part of turn {turn_id}"),
            )
            .into());
        }
        if rows.iter().any(|r| r.selector_id.is_some()) {
            return Err(DomainError::invalid_state(
                InvalidStateKind::AlreadySelected,
                format!("Turn {turn_id} already has a selection"),
            )
            .into());
        }

        let turn = turns::touch(txn, &turn).await?;
        if !turn_fillers::claim_selection(txn, turn_id, filler_id, player_id).await? {
            return Err(DomainError::conflict(
                ConflictKind::SelectionTaken,
                format!("Turn {turn_id} was selected by a concurrent request"),
            )
            .into());
        }
        turn_players::mark_viewed(txn, turn_id, player_id).await?;
        info!(turn_id, player_id, filler_id, "Selection recorded");

        let turn = self.complete_if_all_viewed(txn, turn).await?;
        Ok(TurnSummary::from(&turn))
    }

    /// Mark that the player has seen the selection. The turn completes once
    /// every participant has.
    pub async fn mark_outcome_viewed(
        &self,
        txn: &DatabaseTransaction,
        turn_id: i64,
        player_id: i64,
    ) -> Result<TurnSummary, AppError> {
        let turn = turns::require_turn(txn, turn_id).await?;
        turn.state.require(TurnState::Selecting, "view the outcome")?;
        self.participant(txn, &turn, player_id).await?;

        let rows = turn_fillers::find_by_turn(txn, turn_id).await?;
        if !rows.iter().any(|r| r.selector_id.is_some()) {
            return Err(DomainError::invalid_state(
                InvalidStateKind::Turn,
                format!("Turn {turn_id} has no selection to view yet"),
            )
            .into());
        }

        let turn = turns::touch(txn, &turn).await?;
        if turn_players::mark_viewed(txn, turn_id, player_id).await? {
            debug!(turn_id, player_id, "Outcome viewed");
        }
        let turn = self.complete_if_all_viewed(txn, turn).await?;
        Ok(TurnSummary::from(&turn))
    }

    /// External cancellation of an open turn.
    pub async fn cancel_turn(
        &self,
        txn: &DatabaseTransaction,
        turn_id: i64,
    ) -> Result<TurnSummary, AppError> {
        let turn = turns::require_turn(txn, turn_id).await?;
        let turn = turns::transition(txn, &turn, TurnState::Canceled).await?;
        info!(turn_id, match_id = turn.match_id, "Turn canceled");
        Ok(TurnSummary::from(&turn))
    }

    async fn participant(
        &self,
        txn: &DatabaseTransaction,
        turn: &Turn,
        player_id: i64,
    ) -> Result<TurnPlayer, AppError> {
        turn_players::find_turn_player(txn, turn.id, player_id)
            .await?
            .ok_or_else(|| {
                role_error(format!(
                    "Player {player_id} does not participate in turn {}",
                    turn.id
                ))
            })
    }

    async fn complete_if_all_viewed(
        &self,
        txn: &DatabaseTransaction,
        turn: Turn,
    ) -> Result<Turn, AppError> {
        let participants = turn_players::find_by_turn(txn, turn.id).await?;
        if !participants.iter().all(|p| p.viewed_outcome) {
            return Ok(turn);
        }
        let turn = turns::transition(txn, &turn, TurnState::Completed).await?;
        info!(turn_id = turn.id, match_id = turn.match_id, "Turn completed");
        Ok(turn)
    }
}
