use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum TurnState {
    #[sea_orm(string_value = "SUPPLYING")]
    Supplying,
    #[sea_orm(string_value = "SELECTING")]
    Selecting,
    #[sea_orm(string_value = "CANCELED")]
    Canceled,
    #[sea_orm(string_value = "COMPLETED")]
    Completed,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "turns")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "match_id")]
    pub match_id: i64,
    /// 1-based turn number within the match
    pub seq: i32,
    #[sea_orm(column_name = "word_id")]
    pub word_id: i64,
    #[sea_orm(column_name = "definition_template_id")]
    pub definition_template_id: i64,
    #[sea_orm(column_name = "selector_id")]
    pub selector_id: i64,
    pub state: TurnState,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
    #[sea_orm(column_name = "updated_at")]
    pub updated_at: OffsetDateTime,
    #[sea_orm(column_name = "canceled_at")]
    pub canceled_at: Option<OffsetDateTime>,
    #[sea_orm(column_name = "completed_at")]
    pub completed_at: Option<OffsetDateTime>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::matches::Entity",
        from = "Column::MatchId",
        to = "super::matches::Column::Id"
    )]
    Match,
    #[sea_orm(
        belongs_to = "super::words::Entity",
        from = "Column::WordId",
        to = "super::words::Column::Id"
    )]
    Word,
    #[sea_orm(has_many = "super::turn_players::Entity")]
    TurnPlayers,
    #[sea_orm(has_many = "super::turn_definition_fillers::Entity")]
    TurnDefinitionFillers,
}

impl Related<super::matches::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Match.def()
    }
}

impl Related<super::words::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Word.def()
    }
}

impl Related<super::turn_players::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TurnPlayers.def()
    }
}

impl Related<super::turn_definition_fillers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TurnDefinitionFillers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
