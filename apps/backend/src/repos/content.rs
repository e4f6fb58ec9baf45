//! Content library repository: words, templates and fillers.

use sea_orm::ConnectionTrait;

use crate::adapters::content_sea as content_adapter;
use crate::domain::fillers::count_slots;
use crate::entities::words::LexicalClass;
use crate::entities::{definition_fillers, definition_templates, words};
use crate::errors::domain::{DomainError, InfraErrorKind, ValidationKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    pub id: i64,
    pub lexeme_form: String,
    pub lexical_class: LexicalClass,
    pub is_active: bool,
}

impl From<words::Model> for Word {
    fn from(model: words::Model) -> Self {
        Self {
            id: model.id,
            lexeme_form: model.lexeme_form,
            lexical_class: model.lexical_class,
            is_active: model.is_active,
        }
    }
}

/// Definition text with `{}` slots and the lexical class each slot expects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    pub id: i64,
    pub word_id: i64,
    pub definition: String,
    pub slot_classes: Vec<LexicalClass>,
}

impl TryFrom<definition_templates::Model> for Template {
    type Error = DomainError;

    fn try_from(model: definition_templates::Model) -> Result<Self, Self::Error> {
        let slot_classes: Vec<LexicalClass> =
            serde_json::from_value(model.filler_lexical_classes).map_err(|e| {
                DomainError::infra(
                    InfraErrorKind::DataCorruption,
                    format!("Template {} has malformed lexical classes: {e}", model.id),
                )
            })?;
        Ok(Self {
            id: model.id,
            word_id: model.word_id,
            definition: model.definition,
            slot_classes,
        })
    }
}

/// One set of slot values for a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filler {
    pub id: i64,
    pub template_id: i64,
    pub values: Vec<String>,
    pub is_dictionary: bool,
}

impl TryFrom<definition_fillers::Model> for Filler {
    type Error = DomainError;

    fn try_from(model: definition_fillers::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            template_id: model.template_id,
            values: decode_values(model.filler, model.id)?,
            is_dictionary: model.is_dictionary,
        })
    }
}

/// Slot values are stored as a JSON array of strings.
pub(crate) fn decode_values(
    json: serde_json::Value,
    row_id: i64,
) -> Result<Vec<String>, DomainError> {
    serde_json::from_value(json).map_err(|e| {
        DomainError::infra(
            InfraErrorKind::DataCorruption,
            format!("Filler row {row_id} has malformed values: {e}"),
        )
    })
}

/// Words with a template that has its dictionary filler and `min_bluffs`
/// active bluffs.
pub async fn list_playable_word_ids<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    min_bluffs: usize,
) -> Result<Vec<i64>, DomainError> {
    let min_bluffs = i64::try_from(min_bluffs).unwrap_or(i64::MAX);
    Ok(content_adapter::list_playable_word_ids(conn, min_bluffs).await?)
}

pub async fn find_word<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    word_id: i64,
) -> Result<Option<Word>, DomainError> {
    let word = content_adapter::find_word(conn, word_id).await?;
    Ok(word.map(Word::from))
}

pub async fn create_word<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    lexeme_form: &str,
    lexical_class: LexicalClass,
) -> Result<Word, DomainError> {
    let dto = content_adapter::WordCreate {
        lexeme_form: lexeme_form.to_string(),
        lexical_class,
    };
    let word = content_adapter::create_word(conn, dto).await?;
    Ok(Word::from(word))
}

pub async fn find_template<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    template_id: i64,
) -> Result<Option<Template>, DomainError> {
    content_adapter::find_template(conn, template_id)
        .await?
        .map(Template::try_from)
        .transpose()
}

pub async fn playable_templates_for_word<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    word_id: i64,
    min_bluffs: usize,
) -> Result<Vec<Template>, DomainError> {
    let min_bluffs = i64::try_from(min_bluffs).unwrap_or(i64::MAX);
    content_adapter::playable_templates_for_word(conn, word_id, min_bluffs)
        .await?
        .into_iter()
        .map(Template::try_from)
        .collect()
}

/// Store a template; the slot count in `definition` must match the classes.
pub async fn create_template<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    word_id: i64,
    definition: &str,
    slot_classes: Vec<LexicalClass>,
) -> Result<Template, DomainError> {
    let slots = count_slots(definition);
    if slots != slot_classes.len() {
        return Err(DomainError::validation(
            ValidationKind::Template,
            format!(
                "Definition has {slots} slot(s) but {} lexical class(es) were given",
                slot_classes.len()
            ),
        ));
    }
    let dto = content_adapter::TemplateCreate {
        word_id,
        definition: definition.to_string(),
        filler_lexical_classes: slot_classes,
    };
    let template = content_adapter::create_template(conn, dto).await?;
    Template::try_from(template)
}

pub async fn find_canonical_filler<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    template_id: i64,
) -> Result<Option<Filler>, DomainError> {
    content_adapter::find_canonical_filler(conn, template_id)
        .await?
        .map(Filler::try_from)
        .transpose()
}

pub async fn find_bluff_fillers<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    template_id: i64,
    limit: usize,
) -> Result<Vec<Filler>, DomainError> {
    content_adapter::find_bluff_fillers(conn, template_id, limit as u64)
        .await?
        .into_iter()
        .map(Filler::try_from)
        .collect()
}

pub async fn create_filler<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: content_adapter::FillerCreate,
) -> Result<Filler, DomainError> {
    let filler = content_adapter::create_filler(conn, dto).await?;
    Filler::try_from(filler)
}
