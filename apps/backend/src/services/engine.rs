//! Public entry points. Each operation runs in its own transaction and is
//! re-run from scratch when it loses a concurrent race.

use std::sync::Arc;

use sea_orm::DatabaseConnection;
use time::OffsetDateTime;

use super::matchmaking::{MatchRegistry, MatchView};
use super::turns::{PlayerTurn, TurnEngine, TurnSummary};
use crate::config::engine::EngineConfig;
use crate::db::with_txn_retry;
use crate::error::AppError;
use crate::ports::{ContentLibrary, PlayerDirectory, SeaContentLibrary, SeaPlayerDirectory};
use crate::state::app_state::AppState;

#[derive(Clone)]
pub struct Engine {
    db: DatabaseConnection,
    config: EngineConfig,
    registry: Arc<MatchRegistry>,
    turns: Arc<TurnEngine>,
}

impl Engine {
    /// Engine over the database-backed content library and player directory.
    pub fn new(state: &AppState) -> Self {
        Self::with_collaborators(
            state,
            Arc::new(SeaContentLibrary),
            Arc::new(SeaPlayerDirectory),
        )
    }

    pub fn with_collaborators(
        state: &AppState,
        content: Arc<dyn ContentLibrary>,
        players: Arc<dyn PlayerDirectory>,
    ) -> Self {
        Self {
            db: state.db().clone(),
            config: state.config().clone(),
            registry: Arc::new(MatchRegistry::new(players)),
            turns: Arc::new(TurnEngine::new(content)),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub async fn request_match(
        &self,
        game_id: i64,
        player_id: i64,
        opponent_id: Option<i64>,
    ) -> Result<MatchView, AppError> {
        with_txn_retry(
            &self.db,
            self.registry.as_ref(),
            self.config.conflict_retries,
            "request_match",
            move |registry, txn| {
                Box::pin(async move {
                    registry
                        .request_match(txn, game_id, player_id, opponent_id)
                        .await
                })
            },
        )
        .await
    }

    pub async fn get_match(&self, match_id: i64) -> Result<MatchView, AppError> {
        with_txn_retry(
            &self.db,
            self.registry.as_ref(),
            self.config.conflict_retries,
            "get_match",
            move |registry, txn| Box::pin(async move { registry.get_match(txn, match_id).await }),
        )
        .await
    }

    pub async fn list_matches_for_player(
        &self,
        game_id: i64,
        player_id: i64,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<MatchView>, AppError> {
        with_txn_retry(
            &self.db,
            self.registry.as_ref(),
            self.config.conflict_retries,
            "list_matches_for_player",
            move |registry, txn| {
                Box::pin(async move {
                    registry
                        .list_matches_for_player(txn, game_id, player_id, limit, offset)
                        .await
                })
            },
        )
        .await
    }

    pub async fn cancel_match(&self, match_id: i64) -> Result<MatchView, AppError> {
        with_txn_retry(
            &self.db,
            self.registry.as_ref(),
            self.config.conflict_retries,
            "cancel_match",
            move |registry, txn| {
                Box::pin(async move { registry.cancel_match(txn, match_id).await })
            },
        )
        .await
    }

    pub async fn complete_match(&self, match_id: i64) -> Result<MatchView, AppError> {
        with_txn_retry(
            &self.db,
            self.registry.as_ref(),
            self.config.conflict_retries,
            "complete_match",
            move |registry, txn| {
                Box::pin(async move { registry.complete_match(txn, match_id).await })
            },
        )
        .await
    }

    /// Cancel WAITING matches idle for longer than the configured timeout.
    pub async fn cancel_abandoned_matches(&self) -> Result<Vec<i64>, AppError> {
        let cutoff = OffsetDateTime::now_utc() - self.config.waiting_timeout;
        with_txn_retry(
            &self.db,
            self.registry.as_ref(),
            self.config.conflict_retries,
            "cancel_abandoned_matches",
            move |registry, txn| {
                Box::pin(async move { registry.cancel_abandoned_matches(txn, cutoff).await })
            },
        )
        .await
    }

    pub async fn get_player_turn(
        &self,
        match_id: i64,
        player_id: i64,
    ) -> Result<PlayerTurn, AppError> {
        with_txn_retry(
            &self.db,
            self.turns.as_ref(),
            self.config.conflict_retries,
            "get_player_turn",
            move |turns, txn| {
                Box::pin(async move { turns.get_player_turn(txn, match_id, player_id).await })
            },
        )
        .await
    }

    pub async fn submit_filler(
        &self,
        turn_id: i64,
        player_id: i64,
        values: Vec<String>,
    ) -> Result<TurnSummary, AppError> {
        with_txn_retry(
            &self.db,
            self.turns.as_ref(),
            self.config.conflict_retries,
            "submit_filler",
            move |turns, txn| {
                let values = values.clone();
                Box::pin(async move { turns.submit_filler(txn, turn_id, player_id, values).await })
            },
        )
        .await
    }

    pub async fn submit_selection(
        &self,
        turn_id: i64,
        player_id: i64,
        filler_id: i64,
    ) -> Result<TurnSummary, AppError> {
        with_txn_retry(
            &self.db,
            self.turns.as_ref(),
            self.config.conflict_retries,
            "submit_selection",
            move |turns, txn| {
                Box::pin(async move {
                    turns
                        .submit_selection(txn, turn_id, player_id, filler_id)
                        .await
                })
            },
        )
        .await
    }

    pub async fn mark_outcome_viewed(
        &self,
        turn_id: i64,
        player_id: i64,
    ) -> Result<TurnSummary, AppError> {
        with_txn_retry(
            &self.db,
            self.turns.as_ref(),
            self.config.conflict_retries,
            "mark_outcome_viewed",
            move |turns, txn| {
                Box::pin(async move { turns.mark_outcome_viewed(txn, turn_id, player_id).await })
            },
        )
        .await
    }

    pub async fn cancel_turn(&self, turn_id: i64) -> Result<TurnSummary, AppError> {
        with_txn_retry(
            &self.db,
            self.turns.as_ref(),
            self.config.conflict_retries,
            "cancel_turn",
            move |turns, txn| Box::pin(async move { turns.cancel_turn(txn, turn_id).await }),
        )
        .await
    }

    /// Word a new turn of the match would draw; read-only.
    pub async fn choose_word_for_match(&self, match_id: i64) -> Result<i64, AppError> {
        with_txn_retry(
            &self.db,
            self.turns.as_ref(),
            self.config.conflict_retries,
            "choose_word_for_match",
            move |turns, txn| {
                Box::pin(async move { turns.choose_word_for_match(txn, match_id).await })
            },
        )
        .await
    }
}
