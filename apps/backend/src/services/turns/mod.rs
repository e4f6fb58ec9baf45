//! Turn engine - creates turns, rotates the selector, answers "what should
//! this player do now" and applies supply, selection and outcome events.

mod actions;
mod creation;
mod player_turn;
pub mod view;

use std::sync::Arc;

use sea_orm::DatabaseTransaction;

use crate::error::AppError;
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::ports::ContentLibrary;
use crate::repos::games::{self, Game};
use crate::services::words::WordAllocator;

pub use view::{Candidate, Outcome, PlayerTurn, TemplateView, TurnSummary};

pub struct TurnEngine {
    content: Arc<dyn ContentLibrary>,
    words: WordAllocator,
}

impl TurnEngine {
    pub fn new(content: Arc<dyn ContentLibrary>) -> Self {
        Self {
            words: WordAllocator::new(Arc::clone(&content)),
            content,
        }
    }

    /// The game a match belongs to, active or not; a running match keeps
    /// playing under the configuration it started with.
    async fn game_of(&self, txn: &DatabaseTransaction, game_id: i64) -> Result<Game, AppError> {
        games::find_by_id(txn, game_id).await?.ok_or_else(|| {
            DomainError::not_found(NotFoundKind::Game, format!("Game {game_id} not found")).into()
        })
    }
}
