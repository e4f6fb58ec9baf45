//! SeaORM adapter for the content library: words, definition templates and
//! their fillers.

use sea_orm::sea_query::{Expr, Func, Query, SelectStatement};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, NotSet, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

use crate::entities::{definition_fillers, definition_templates, words};

pub mod dto;

pub use dto::{FillerCreate, TemplateCreate, WordCreate};

fn templates_with_canonical() -> SelectStatement {
    Query::select()
        .column(definition_fillers::Column::TemplateId)
        .from(definition_fillers::Entity)
        .and_where(definition_fillers::Column::IsDictionary.eq(true))
        .and_where(definition_fillers::Column::IsActive.eq(true))
        .to_owned()
}

fn templates_with_bluffs(min_bluffs: i64) -> SelectStatement {
    Query::select()
        .column(definition_fillers::Column::TemplateId)
        .from(definition_fillers::Entity)
        .and_where(definition_fillers::Column::IsDictionary.eq(false))
        .and_where(definition_fillers::Column::IsActive.eq(true))
        .group_by_col(definition_fillers::Column::TemplateId)
        .and_having(
            Expr::expr(Func::count(Expr::col(definition_fillers::Column::Id))).gte(min_bluffs),
        )
        .to_owned()
}

/// A template a turn can be built from: active, with an active dictionary
/// filler and at least `min_bluffs` active bluffs.
fn playable_template(min_bluffs: i64) -> Condition {
    Condition::all()
        .add(definition_templates::Column::IsActive.eq(true))
        .add(definition_templates::Column::Id.in_subquery(templates_with_canonical()))
        .add_option(
            (min_bluffs > 0).then(|| {
                definition_templates::Column::Id.in_subquery(templates_with_bluffs(min_bluffs))
            }),
        )
}

/// Ids of active words with at least one playable template, ascending.
pub async fn list_playable_word_ids<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    min_bluffs: i64,
) -> Result<Vec<i64>, sea_orm::DbErr> {
    let with_template = Query::select()
        .column(definition_templates::Column::WordId)
        .from(definition_templates::Entity)
        .cond_where(playable_template(min_bluffs))
        .to_owned();

    words::Entity::find()
        .select_only()
        .column(words::Column::Id)
        .filter(words::Column::IsActive.eq(true))
        .filter(words::Column::Id.in_subquery(with_template))
        .order_by_asc(words::Column::Id)
        .into_tuple::<i64>()
        .all(conn)
        .await
}

pub async fn find_word<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    word_id: i64,
) -> Result<Option<words::Model>, sea_orm::DbErr> {
    words::Entity::find_by_id(word_id).one(conn).await
}

pub async fn create_word<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: WordCreate,
) -> Result<words::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    words::ActiveModel {
        id: NotSet,
        lexeme_form: Set(dto.lexeme_form),
        lexical_class: Set(dto.lexical_class),
        is_active: Set(true),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(conn)
    .await
}

pub async fn find_template<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    template_id: i64,
) -> Result<Option<definition_templates::Model>, sea_orm::DbErr> {
    definition_templates::Entity::find_by_id(template_id)
        .one(conn)
        .await
}

/// Playable templates of a word, oldest first.
pub async fn playable_templates_for_word<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    word_id: i64,
    min_bluffs: i64,
) -> Result<Vec<definition_templates::Model>, sea_orm::DbErr> {
    definition_templates::Entity::find()
        .filter(definition_templates::Column::WordId.eq(word_id))
        .filter(playable_template(min_bluffs))
        .order_by_asc(definition_templates::Column::Id)
        .all(conn)
        .await
}

pub async fn create_template<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: TemplateCreate,
) -> Result<definition_templates::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    definition_templates::ActiveModel {
        id: NotSet,
        word_id: Set(dto.word_id),
        definition: Set(dto.definition),
        filler_lexical_classes: Set(serde_json::json!(dto.filler_lexical_classes)),
        is_active: Set(true),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(conn)
    .await
}

pub async fn find_canonical_filler<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    template_id: i64,
) -> Result<Option<definition_fillers::Model>, sea_orm::DbErr> {
    definition_fillers::Entity::find()
        .filter(definition_fillers::Column::TemplateId.eq(template_id))
        .filter(definition_fillers::Column::IsDictionary.eq(true))
        .filter(definition_fillers::Column::IsActive.eq(true))
        .order_by_asc(definition_fillers::Column::Id)
        .one(conn)
        .await
}

/// Up to `limit` active non-dictionary fillers for the template, oldest first.
pub async fn find_bluff_fillers<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    template_id: i64,
    limit: u64,
) -> Result<Vec<definition_fillers::Model>, sea_orm::DbErr> {
    definition_fillers::Entity::find()
        .filter(definition_fillers::Column::TemplateId.eq(template_id))
        .filter(definition_fillers::Column::IsDictionary.eq(false))
        .filter(definition_fillers::Column::IsActive.eq(true))
        .order_by_asc(definition_fillers::Column::Id)
        .limit(limit)
        .all(conn)
        .await
}

pub async fn create_filler<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: FillerCreate,
) -> Result<definition_fillers::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    definition_fillers::ActiveModel {
        id: NotSet,
        template_id: Set(dto.template_id),
        filler: Set(serde_json::json!(dto.values)),
        is_dictionary: Set(dto.is_dictionary),
        is_active: Set(true),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(conn)
    .await
}
