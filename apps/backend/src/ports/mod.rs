//! Collaborator interfaces consumed by the engine.
//!
//! The engine reads content and player identity only through these traits.
//! Every method receives the caller's transaction so collaborator reads see
//! the same snapshot as the operation that needs them.

use async_trait::async_trait;
use sea_orm::DatabaseTransaction;

use crate::error::AppError;
use crate::repos::content::{Filler, Template};
use crate::repos::players::Player;

pub mod sea;

pub use sea::{SeaContentLibrary, SeaPlayerDirectory};

/// Words, definition templates and their fillers.
#[async_trait]
pub trait ContentLibrary: Send + Sync {
    /// Ids of words that can be played, ascending.
    ///
    /// A playable word has a template with its dictionary filler and at
    /// least `min_bluffs` bluff fillers.
    async fn list_active_word_ids(
        &self,
        txn: &DatabaseTransaction,
        min_bluffs: usize,
    ) -> Result<Vec<i64>, AppError>;

    /// Template to use for a turn on `word_id`, under the same rule as
    /// [`ContentLibrary::list_active_word_ids`].
    ///
    /// Fails with `TEMPLATE_NOT_FOUND` when the word has no usable template.
    async fn choose_template(
        &self,
        txn: &DatabaseTransaction,
        word_id: i64,
        min_bluffs: usize,
    ) -> Result<Template, AppError>;

    async fn get_template(
        &self,
        txn: &DatabaseTransaction,
        template_id: i64,
    ) -> Result<Template, AppError>;

    /// The dictionary filler for the template.
    async fn get_canonical_filler(
        &self,
        txn: &DatabaseTransaction,
        template_id: i64,
    ) -> Result<Filler, AppError>;

    /// Up to `count` non-dictionary fillers; fewer when the template runs short.
    async fn get_bluff_fillers(
        &self,
        txn: &DatabaseTransaction,
        template_id: i64,
        count: usize,
    ) -> Result<Vec<Filler>, AppError>;
}

/// Player identity and liveness.
#[async_trait]
pub trait PlayerDirectory: Send + Sync {
    /// `None` for unknown ids. Inactive players are returned as-is.
    async fn get_player(
        &self,
        txn: &DatabaseTransaction,
        player_id: i64,
    ) -> Result<Option<Player>, AppError>;
}
