use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::{ColumnDef, ForeignKeyAction, Index, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

// ----- Iden enums for tables & columns -----
#[derive(Iden)]
enum Players {
    Table,
    Id,
    Username,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Games {
    Table,
    Id,
    Name,
    Description,
    MatchSize,
    FillerCount,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Words {
    Table,
    Id,
    LexemeForm,
    LexicalClass,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum DefinitionTemplates {
    Table,
    Id,
    WordId,
    Definition,
    FillerLexicalClasses,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum DefinitionFillers {
    Table,
    Id,
    TemplateId,
    Filler,
    IsDictionary,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Matches {
    Table,
    Id,
    GameId,
    State,
    PlayerCount,
    ReservedCount,
    CreatedAt,
    UpdatedAt,
    StartedAt,
    CanceledAt,
    CompletedAt,
    Version,
}

#[derive(Iden)]
enum MatchPlayers {
    Table,
    Id,
    MatchId,
    PlayerId,
    Status,
    JoinSeq,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Turns {
    Table,
    Id,
    MatchId,
    Seq,
    WordId,
    DefinitionTemplateId,
    SelectorId,
    State,
    CreatedAt,
    UpdatedAt,
    CanceledAt,
    CompletedAt,
    Version,
}

#[derive(Iden)]
enum TurnPlayers {
    Table,
    Id,
    TurnId,
    PlayerId,
    IsSelector,
    Score,
    ViewedReplay,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum TurnDefinitionFillers {
    Table,
    Id,
    TurnId,
    TemplateId,
    Filler,
    IsDictionary,
    SupplierId,
    SelectorId,
    CreatedAt,
    UpdatedAt,
}

fn id_col<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col)
        .big_integer()
        .not_null()
        .primary_key()
        .auto_increment()
        .to_owned()
}

fn ts_col<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col)
        .timestamp_with_time_zone()
        .not_null()
        .to_owned()
}

fn nullable_ts_col<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col)
        .timestamp_with_time_zone()
        .null()
        .to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // players
        manager
            .create_table(
                Table::create()
                    .table(Players::Table)
                    .if_not_exists()
                    .col(id_col(Players::Id))
                    .col(
                        ColumnDef::new(Players::Username)
                            .string_len(64)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Players::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ts_col(Players::CreatedAt))
                    .col(ts_col(Players::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        // games
        manager
            .create_table(
                Table::create()
                    .table(Games::Table)
                    .if_not_exists()
                    .col(id_col(Games::Id))
                    .col(
                        ColumnDef::new(Games::Name)
                            .string_len(128)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Games::Description).text().not_null().default(""))
                    .col(
                        ColumnDef::new(Games::MatchSize)
                            .small_integer()
                            .not_null()
                            .default(2),
                    )
                    .col(
                        ColumnDef::new(Games::FillerCount)
                            .small_integer()
                            .not_null()
                            .default(4),
                    )
                    .col(
                        ColumnDef::new(Games::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ts_col(Games::CreatedAt))
                    .col(ts_col(Games::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        // words
        manager
            .create_table(
                Table::create()
                    .table(Words::Table)
                    .if_not_exists()
                    .col(id_col(Words::Id))
                    .col(
                        ColumnDef::new(Words::LexemeForm)
                            .string_len(128)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Words::LexicalClass).string_len(16).not_null())
                    .col(
                        ColumnDef::new(Words::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ts_col(Words::CreatedAt))
                    .col(ts_col(Words::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        // definition_templates
        manager
            .create_table(
                Table::create()
                    .table(DefinitionTemplates::Table)
                    .if_not_exists()
                    .col(id_col(DefinitionTemplates::Id))
                    .col(
                        ColumnDef::new(DefinitionTemplates::WordId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DefinitionTemplates::Definition)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DefinitionTemplates::FillerLexicalClasses)
                            .json()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DefinitionTemplates::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ts_col(DefinitionTemplates::CreatedAt))
                    .col(ts_col(DefinitionTemplates::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_definition_templates_word_id")
                            .from(DefinitionTemplates::Table, DefinitionTemplates::WordId)
                            .to(Words::Table, Words::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_definition_templates_word_id")
                    .table(DefinitionTemplates::Table)
                    .col(DefinitionTemplates::WordId)
                    .to_owned(),
            )
            .await?;

        // definition_fillers
        manager
            .create_table(
                Table::create()
                    .table(DefinitionFillers::Table)
                    .if_not_exists()
                    .col(id_col(DefinitionFillers::Id))
                    .col(
                        ColumnDef::new(DefinitionFillers::TemplateId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(DefinitionFillers::Filler).json().not_null())
                    .col(
                        ColumnDef::new(DefinitionFillers::IsDictionary)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(DefinitionFillers::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ts_col(DefinitionFillers::CreatedAt))
                    .col(ts_col(DefinitionFillers::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_definition_fillers_template_id")
                            .from(DefinitionFillers::Table, DefinitionFillers::TemplateId)
                            .to(DefinitionTemplates::Table, DefinitionTemplates::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_definition_fillers_template_id")
                    .table(DefinitionFillers::Table)
                    .col(DefinitionFillers::TemplateId)
                    .to_owned(),
            )
            .await?;

        // matches
        manager
            .create_table(
                Table::create()
                    .table(Matches::Table)
                    .if_not_exists()
                    .col(id_col(Matches::Id))
                    .col(ColumnDef::new(Matches::GameId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Matches::State)
                            .string_len(16)
                            .not_null()
                            .default("WAITING"),
                    )
                    .col(
                        ColumnDef::new(Matches::PlayerCount)
                            .small_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Matches::ReservedCount)
                            .small_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ts_col(Matches::CreatedAt))
                    .col(ts_col(Matches::UpdatedAt))
                    .col(nullable_ts_col(Matches::StartedAt))
                    .col(nullable_ts_col(Matches::CanceledAt))
                    .col(nullable_ts_col(Matches::CompletedAt))
                    .col(
                        ColumnDef::new(Matches::Version)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_matches_game_id")
                            .from(Matches::Table, Matches::GameId)
                            .to(Games::Table, Games::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // FIFO candidate scans filter on (game_id, state)
        manager
            .create_index(
                Index::create()
                    .name("ix_matches_game_state")
                    .table(Matches::Table)
                    .col(Matches::GameId)
                    .col(Matches::State)
                    .to_owned(),
            )
            .await?;

        // match_players
        manager
            .create_table(
                Table::create()
                    .table(MatchPlayers::Table)
                    .if_not_exists()
                    .col(id_col(MatchPlayers::Id))
                    .col(ColumnDef::new(MatchPlayers::MatchId).big_integer().not_null())
                    .col(ColumnDef::new(MatchPlayers::PlayerId).big_integer().not_null())
                    .col(
                        ColumnDef::new(MatchPlayers::Status)
                            .string_len(16)
                            .not_null()
                            .default("JOINED"),
                    )
                    .col(ColumnDef::new(MatchPlayers::JoinSeq).small_integer().null())
                    .col(ts_col(MatchPlayers::CreatedAt))
                    .col(ts_col(MatchPlayers::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_match_players_match_id")
                            .from(MatchPlayers::Table, MatchPlayers::MatchId)
                            .to(Matches::Table, Matches::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_match_players_player_id")
                            .from(MatchPlayers::Table, MatchPlayers::PlayerId)
                            .to(Players::Table, Players::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_match_players_match_player")
                    .table(MatchPlayers::Table)
                    .col(MatchPlayers::MatchId)
                    .col(MatchPlayers::PlayerId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // NULL join_seq (invited rows) never collides
        manager
            .create_index(
                Index::create()
                    .name("ux_match_players_match_join_seq")
                    .table(MatchPlayers::Table)
                    .col(MatchPlayers::MatchId)
                    .col(MatchPlayers::JoinSeq)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_match_players_player_id")
                    .table(MatchPlayers::Table)
                    .col(MatchPlayers::PlayerId)
                    .to_owned(),
            )
            .await?;

        // turns
        manager
            .create_table(
                Table::create()
                    .table(Turns::Table)
                    .if_not_exists()
                    .col(id_col(Turns::Id))
                    .col(ColumnDef::new(Turns::MatchId).big_integer().not_null())
                    .col(ColumnDef::new(Turns::Seq).integer().not_null())
                    .col(ColumnDef::new(Turns::WordId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Turns::DefinitionTemplateId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Turns::SelectorId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Turns::State)
                            .string_len(16)
                            .not_null()
                            .default("SUPPLYING"),
                    )
                    .col(ts_col(Turns::CreatedAt))
                    .col(ts_col(Turns::UpdatedAt))
                    .col(nullable_ts_col(Turns::CanceledAt))
                    .col(nullable_ts_col(Turns::CompletedAt))
                    .col(
                        ColumnDef::new(Turns::Version)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_turns_match_id")
                            .from(Turns::Table, Turns::MatchId)
                            .to(Matches::Table, Matches::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_turns_word_id")
                            .from(Turns::Table, Turns::WordId)
                            .to(Words::Table, Words::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_turns_definition_template_id")
                            .from(Turns::Table, Turns::DefinitionTemplateId)
                            .to(DefinitionTemplates::Table, DefinitionTemplates::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // Claim for "create next turn": concurrent creators collide here
        manager
            .create_index(
                Index::create()
                    .name("ux_turns_match_seq")
                    .table(Turns::Table)
                    .col(Turns::MatchId)
                    .col(Turns::Seq)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // turn_players
        manager
            .create_table(
                Table::create()
                    .table(TurnPlayers::Table)
                    .if_not_exists()
                    .col(id_col(TurnPlayers::Id))
                    .col(ColumnDef::new(TurnPlayers::TurnId).big_integer().not_null())
                    .col(ColumnDef::new(TurnPlayers::PlayerId).big_integer().not_null())
                    .col(
                        ColumnDef::new(TurnPlayers::IsSelector)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(TurnPlayers::Score)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(TurnPlayers::ViewedReplay)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ts_col(TurnPlayers::CreatedAt))
                    .col(ts_col(TurnPlayers::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_turn_players_turn_id")
                            .from(TurnPlayers::Table, TurnPlayers::TurnId)
                            .to(Turns::Table, Turns::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_turn_players_player_id")
                            .from(TurnPlayers::Table, TurnPlayers::PlayerId)
                            .to(Players::Table, Players::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_turn_players_turn_player")
                    .table(TurnPlayers::Table)
                    .col(TurnPlayers::TurnId)
                    .col(TurnPlayers::PlayerId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // turn_definition_fillers
        manager
            .create_table(
                Table::create()
                    .table(TurnDefinitionFillers::Table)
                    .if_not_exists()
                    .col(id_col(TurnDefinitionFillers::Id))
                    .col(
                        ColumnDef::new(TurnDefinitionFillers::TurnId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TurnDefinitionFillers::TemplateId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(TurnDefinitionFillers::Filler).json().not_null())
                    .col(
                        ColumnDef::new(TurnDefinitionFillers::IsDictionary)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(TurnDefinitionFillers::SupplierId)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(TurnDefinitionFillers::SelectorId)
                            .big_integer()
                            .null(),
                    )
                    .col(ts_col(TurnDefinitionFillers::CreatedAt))
                    .col(ts_col(TurnDefinitionFillers::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_turn_definition_fillers_turn_id")
                            .from(TurnDefinitionFillers::Table, TurnDefinitionFillers::TurnId)
                            .to(Turns::Table, Turns::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_turn_definition_fillers_template_id")
                            .from(
                                TurnDefinitionFillers::Table,
                                TurnDefinitionFillers::TemplateId,
                            )
                            .to(DefinitionTemplates::Table, DefinitionTemplates::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // One submission per supplier per turn; NULL suppliers (canonical/generated) are unconstrained
        manager
            .create_index(
                Index::create()
                    .name("ux_turn_definition_fillers_turn_supplier")
                    .table(TurnDefinitionFillers::Table)
                    .col(TurnDefinitionFillers::TurnId)
                    .col(TurnDefinitionFillers::SupplierId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // drop in reverse order; indexes go with their tables
        manager
            .drop_table(Table::drop().table(TurnDefinitionFillers::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TurnPlayers::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Turns::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(MatchPlayers::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Matches::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(DefinitionFillers::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(DefinitionTemplates::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Words::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Games::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Players::Table).if_exists().to_owned())
            .await?;

        Ok(())
    }
}
