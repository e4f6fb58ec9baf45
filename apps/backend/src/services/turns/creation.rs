use sea_orm::DatabaseTransaction;
use tracing::info;

use super::TurnEngine;
use crate::adapters::turns_sea::TurnCreate;
use crate::domain::fillers::check_slot_count;
use crate::domain::rotation::next_selector;
use crate::error::AppError;
use crate::repos::games::Game;
use crate::repos::matches::{self, Match};
use crate::repos::turn_fillers::{self, FillerSource};
use crate::repos::turns::{self, Turn};
use crate::repos::{memberships, turn_players};

impl TurnEngine {
    /// Start the match's next turn: pick an unused word and its template,
    /// rotate the selector, seed the dictionary candidate and one row per
    /// participant.
    ///
    /// `UNIQUE(match_id, seq)` makes this create-if-absent: a concurrent
    /// creator of the same `seq` gets `Conflict(TurnAlreadyCreated)`.
    pub(super) async fn create_next_turn(
        &self,
        txn: &DatabaseTransaction,
        m: &Match,
        game: &Game,
    ) -> Result<Turn, AppError> {
        let plan = game.slot_plan()?;
        let roster = memberships::roster_player_ids(txn, m.id).await?;
        let prior = turns::find_last_not_canceled(txn, m.id)
            .await?
            .map(|t| t.selector_id);
        let selector_id = next_selector(&roster, prior)?;

        let word_id = self
            .words
            .choose_word_for_match(txn, m.id, plan.generated_slots)
            .await?;
        let template = self
            .content
            .choose_template(txn, word_id, plan.generated_slots)
            .await?;
        let canonical = self.content.get_canonical_filler(txn, template.id).await?;
        check_slot_count(&template.definition, &canonical.values)?;

        let seq = turns::next_seq(txn, m.id).await?;
        let turn = turns::create_turn(
            txn,
            TurnCreate {
                match_id: m.id,
                seq,
                word_id,
                definition_template_id: template.id,
                selector_id,
            },
        )
        .await?;

        turn_players::create_for_roster(txn, turn.id, &roster, selector_id).await?;
        turn_fillers::add_filler(
            txn,
            turn.id,
            template.id,
            canonical.values,
            FillerSource::Dictionary,
        )
        .await?;

        info!(
            match_id = m.id,
            turn_id = turn.id,
            seq,
            word_id,
            template_id = template.id,
            selector_id,
            slots = plan.total,
            "Turn created"
        );
        Ok(turn)
    }

    /// The word the match's next turn would draw, without creating it.
    pub async fn choose_word_for_match(
        &self,
        txn: &DatabaseTransaction,
        match_id: i64,
    ) -> Result<i64, AppError> {
        let m = matches::require_match(txn, match_id).await?;
        let plan = self.game_of(txn, m.game_id).await?.slot_plan()?;
        self.words
            .choose_word_for_match(txn, match_id, plan.generated_slots)
            .await
    }
}
