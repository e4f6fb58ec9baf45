pub mod definition_fillers;
pub mod definition_templates;
pub mod games;
pub mod match_players;
pub mod matches;
pub mod players;
pub mod turn_definition_fillers;
pub mod turn_players;
pub mod turns;
pub mod words;

pub use definition_fillers::Entity as DefinitionFillers;
pub use definition_fillers::Model as DefinitionFiller;
pub use definition_templates::Entity as DefinitionTemplates;
pub use definition_templates::Model as DefinitionTemplate;
pub use games::Entity as Games;
pub use games::Model as Game;
pub use match_players::Entity as MatchPlayers;
pub use match_players::Model as MatchPlayer;
pub use matches::Entity as Matches;
pub use matches::Model as Match;
pub use players::Entity as Players;
pub use players::Model as Player;
pub use turn_definition_fillers::Entity as TurnDefinitionFillers;
pub use turn_definition_fillers::Model as TurnDefinitionFiller;
pub use turn_players::Entity as TurnPlayers;
pub use turn_players::Model as TurnPlayer;
pub use turns::Entity as Turns;
pub use turns::Model as Turn;
pub use words::Entity as Words;
pub use words::Model as Word;
