use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum LexicalClass {
    #[sea_orm(string_value = "noun")]
    Noun,
    #[sea_orm(string_value = "pronoun")]
    Pronoun,
    #[sea_orm(string_value = "adjective")]
    Adjective,
    #[sea_orm(string_value = "verb")]
    Verb,
    #[sea_orm(string_value = "adverb")]
    Adverb,
    #[sea_orm(string_value = "preposition")]
    Preposition,
    #[sea_orm(string_value = "conjunction")]
    Conjunction,
    #[sea_orm(string_value = "interjection")]
    Interjection,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "words")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "lexeme_form", unique)]
    pub lexeme_form: String,
    #[sea_orm(column_name = "lexical_class")]
    pub lexical_class: LexicalClass,
    #[sea_orm(column_name = "is_active")]
    pub is_active: bool,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
    #[sea_orm(column_name = "updated_at")]
    pub updated_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::definition_templates::Entity")]
    DefinitionTemplates,
}

impl Related<super::definition_templates::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DefinitionTemplates.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
