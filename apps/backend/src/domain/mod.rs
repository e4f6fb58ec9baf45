//! Domain layer: pure match and turn logic, no persistence.

pub mod fillers;
pub mod match_state;
pub mod player_turn;
pub mod rotation;
pub mod turn_state;

pub use match_state::MatchState;
pub use player_turn::{PlayerAction, Step, TurnProgress, TurnRole};
pub use turn_state::TurnState;

pub type PlayerId = i64;
