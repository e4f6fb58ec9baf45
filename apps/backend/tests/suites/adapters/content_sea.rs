//! Playable-content filters over words, templates and fillers.

use lexibluff::repos::content;
use lexibluff::AppError;

use crate::common::test_state;
use crate::support::{seed_content, seed_word_without_dictionary};

#[tokio::test]
async fn word_needs_dictionary_filler_to_be_playable() -> Result<(), AppError> {
    let state = test_state().await?;
    let words = seed_content(state.db(), 1, 0).await?;
    let orphan = seed_word_without_dictionary(state.db()).await?;

    let playable = content::list_playable_word_ids(state.db(), 0).await?;
    assert_eq!(playable, vec![words[0].word_id]);

    assert!(content::playable_templates_for_word(state.db(), orphan, 0)
        .await?
        .is_empty());
    Ok(())
}

#[tokio::test]
async fn bluff_minimum_filters_words_and_templates() -> Result<(), AppError> {
    let state = test_state().await?;
    let rich = seed_content(state.db(), 1, 3).await?;
    let poor = seed_content(state.db(), 1, 1).await?;
    let (rich, poor) = (&rich[0], &poor[0]);

    let mut all = content::list_playable_word_ids(state.db(), 1).await?;
    all.sort_unstable();
    assert_eq!(all, vec![rich.word_id, poor.word_id]);

    assert_eq!(
        content::list_playable_word_ids(state.db(), 2).await?,
        vec![rich.word_id]
    );
    assert!(content::list_playable_word_ids(state.db(), 4)
        .await?
        .is_empty());

    let templates = content::playable_templates_for_word(state.db(), poor.word_id, 2).await?;
    assert!(templates.is_empty());
    let templates = content::playable_templates_for_word(state.db(), rich.word_id, 2).await?;
    assert_eq!(templates.len(), 1);
    assert_eq!(templates[0].id, rich.template_id);
    Ok(())
}
