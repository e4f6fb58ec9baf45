//! Engine services. Each `*_in`-style method on the registry and turn engine
//! runs against a caller-owned transaction; [`Engine`] owns the transaction
//! and conflict-retry policy around them.

pub mod engine;
pub mod matchmaking;
pub mod turns;
pub mod words;

pub use engine::Engine;
pub use matchmaking::{MatchRegistry, MatchView};
pub use turns::{Candidate, Outcome, PlayerTurn, TemplateView, TurnEngine, TurnSummary};
pub use words::WordAllocator;
