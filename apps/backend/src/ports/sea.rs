//! Database-backed collaborators over the content and player tables.

use async_trait::async_trait;
use sea_orm::DatabaseTransaction;

use super::{ContentLibrary, PlayerDirectory};
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::repos::content::{self as content_repo, Filler, Template};
use crate::repos::players::{self as players_repo, Player};

/// Picks the oldest playable template of a word and the oldest active bluffs.
#[derive(Debug, Clone, Copy, Default)]
pub struct SeaContentLibrary;

#[async_trait]
impl ContentLibrary for SeaContentLibrary {
    async fn list_active_word_ids(
        &self,
        txn: &DatabaseTransaction,
        min_bluffs: usize,
    ) -> Result<Vec<i64>, AppError> {
        Ok(content_repo::list_playable_word_ids(txn, min_bluffs).await?)
    }

    async fn choose_template(
        &self,
        txn: &DatabaseTransaction,
        word_id: i64,
        min_bluffs: usize,
    ) -> Result<Template, AppError> {
        content_repo::playable_templates_for_word(txn, word_id, min_bluffs)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| {
                AppError::not_found(
                    ErrorCode::TemplateNotFound,
                    format!("Word {word_id} has no playable definition template"),
                )
            })
    }

    async fn get_template(
        &self,
        txn: &DatabaseTransaction,
        template_id: i64,
    ) -> Result<Template, AppError> {
        content_repo::find_template(txn, template_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(
                    ErrorCode::TemplateNotFound,
                    format!("Definition template {template_id} not found"),
                )
            })
    }

    async fn get_canonical_filler(
        &self,
        txn: &DatabaseTransaction,
        template_id: i64,
    ) -> Result<Filler, AppError> {
        content_repo::find_canonical_filler(txn, template_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(
                    ErrorCode::FillerNotFound,
                    format!("Template {template_id} has no dictionary filler"),
                )
            })
    }

    async fn get_bluff_fillers(
        &self,
        txn: &DatabaseTransaction,
        template_id: i64,
        count: usize,
    ) -> Result<Vec<Filler>, AppError> {
        if count == 0 {
            return Ok(Vec::new());
        }
        Ok(content_repo::find_bluff_fillers(txn, template_id, count).await?)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SeaPlayerDirectory;

#[async_trait]
impl PlayerDirectory for SeaPlayerDirectory {
    async fn get_player(
        &self,
        txn: &DatabaseTransaction,
        player_id: i64,
    ) -> Result<Option<Player>, AppError> {
        Ok(players_repo::find_by_id(txn, player_id).await?)
    }
}
