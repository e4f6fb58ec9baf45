use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "definition_templates")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "word_id")]
    pub word_id: i64,
    /// Definition text with one `{}` per slot
    #[sea_orm(column_type = "Text")]
    pub definition: String,
    /// JSON array of lexical class names, one per slot
    #[sea_orm(column_name = "filler_lexical_classes")]
    pub filler_lexical_classes: Json,
    #[sea_orm(column_name = "is_active")]
    pub is_active: bool,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
    #[sea_orm(column_name = "updated_at")]
    pub updated_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::words::Entity",
        from = "Column::WordId",
        to = "super::words::Column::Id"
    )]
    Word,
    #[sea_orm(has_many = "super::definition_fillers::Entity")]
    DefinitionFillers,
}

impl Related<super::words::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Word.def()
    }
}

impl Related<super::definition_fillers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DefinitionFillers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
