//! Error codes surfaced by the engine.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! All codes are SCREAMING_SNAKE_CASE.

use core::fmt;

/// Centralized error codes.
///
/// Each variant maps to one canonical SCREAMING_SNAKE_CASE string that
/// integrators can match on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Request Validation
    /// General validation error
    ValidationError,
    /// Requested oneself as opponent
    SelfOpponent,
    /// Filler value count does not match template slots
    FillerSlotMismatch,
    /// Game configuration violates match/filler sizing
    InvalidGameConfig,
    /// Template text and lexical classes disagree
    InvalidTemplate,

    // Resource Not Found
    /// Game not found
    GameNotFound,
    /// Requesting player not found
    PlayerNotFound,
    /// Targeted opponent not found
    OpponentNotFound,
    /// Match not found (or caller is not a member)
    MatchNotFound,
    /// No turn needs the caller right now
    TurnNotFound,
    /// Word not found
    WordNotFound,
    /// Definition template not found
    TemplateNotFound,
    /// Candidate filler not found on the turn
    FillerNotFound,
    /// General not found error
    NotFound,

    // Invalid State
    /// Match is not in a state that allows the action
    MatchStateInvalid,
    /// Turn is not in a state that allows the action
    TurnStateInvalid,
    /// Player's role in the turn does not allow the action
    RoleMismatch,
    /// Filler already submitted by this supplier
    AlreadySupplied,
    /// Selection already recorded for the turn
    AlreadySelected,
    /// General invalid state
    InvalidState,

    // Concurrency
    /// Row version changed concurrently
    OptimisticLock,
    /// Next turn created concurrently
    TurnAlreadyCreated,
    /// General conflict
    Conflict,

    // Exhaustion
    /// No unused word left for the match
    WordsExhausted,
    /// Not enough bluff material for the template
    BluffFillersExhausted,

    // Persistence
    /// Unique constraint rejected the save
    UniqueViolation,
    /// Foreign key rejected the save
    FkViolation,
    /// Check constraint rejected the save
    CheckViolation,
    /// Record not found at the persistence layer
    RecordNotFound,
    /// Database error
    DbError,
    /// Database unreachable
    DbUnavailable,
    /// Database timed out
    DbTimeout,
    /// Stored data violates engine invariants
    DataCorruption,

    /// Configuration error
    ConfigError,
    /// Internal error
    Internal,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            // Request Validation
            Self::ValidationError => "VALIDATION_ERROR",
            Self::SelfOpponent => "SELF_OPPONENT",
            Self::FillerSlotMismatch => "FILLER_SLOT_MISMATCH",
            Self::InvalidGameConfig => "INVALID_GAME_CONFIG",
            Self::InvalidTemplate => "INVALID_TEMPLATE",

            // Resource Not Found
            Self::GameNotFound => "GAME_NOT_FOUND",
            Self::PlayerNotFound => "PLAYER_NOT_FOUND",
            Self::OpponentNotFound => "OPPONENT_NOT_FOUND",
            Self::MatchNotFound => "MATCH_NOT_FOUND",
            Self::TurnNotFound => "TURN_NOT_FOUND",
            Self::WordNotFound => "WORD_NOT_FOUND",
            Self::TemplateNotFound => "TEMPLATE_NOT_FOUND",
            Self::FillerNotFound => "FILLER_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            // Invalid State
            Self::MatchStateInvalid => "MATCH_STATE_INVALID",
            Self::TurnStateInvalid => "TURN_STATE_INVALID",
            Self::RoleMismatch => "ROLE_MISMATCH",
            Self::AlreadySupplied => "ALREADY_SUPPLIED",
            Self::AlreadySelected => "ALREADY_SELECTED",
            Self::InvalidState => "INVALID_STATE",

            // Concurrency
            Self::OptimisticLock => "OPTIMISTIC_LOCK",
            Self::TurnAlreadyCreated => "TURN_ALREADY_CREATED",
            Self::Conflict => "CONFLICT",

            // Exhaustion
            Self::WordsExhausted => "WORDS_EXHAUSTED",
            Self::BluffFillersExhausted => "BLUFF_FILLERS_EXHAUSTED",

            // Persistence
            Self::UniqueViolation => "UNIQUE_VIOLATION",
            Self::FkViolation => "FK_VIOLATION",
            Self::CheckViolation => "CHECK_VIOLATION",
            Self::RecordNotFound => "RECORD_NOT_FOUND",
            Self::DbError => "DB_ERROR",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::DbTimeout => "DB_TIMEOUT",
            Self::DataCorruption => "DATA_CORRUPTION",

            Self::ConfigError => "CONFIG_ERROR",
            Self::Internal => "INTERNAL",
        }
    }

    /// Every code, in declaration order.
    pub const ALL: &'static [ErrorCode] = &[
        Self::ValidationError,
        Self::SelfOpponent,
        Self::FillerSlotMismatch,
        Self::InvalidGameConfig,
        Self::InvalidTemplate,
        Self::GameNotFound,
        Self::PlayerNotFound,
        Self::OpponentNotFound,
        Self::MatchNotFound,
        Self::TurnNotFound,
        Self::WordNotFound,
        Self::TemplateNotFound,
        Self::FillerNotFound,
        Self::NotFound,
        Self::MatchStateInvalid,
        Self::TurnStateInvalid,
        Self::RoleMismatch,
        Self::AlreadySupplied,
        Self::AlreadySelected,
        Self::InvalidState,
        Self::OptimisticLock,
        Self::TurnAlreadyCreated,
        Self::Conflict,
        Self::WordsExhausted,
        Self::BluffFillersExhausted,
        Self::UniqueViolation,
        Self::FkViolation,
        Self::CheckViolation,
        Self::RecordNotFound,
        Self::DbError,
        Self::DbUnavailable,
        Self::DbTimeout,
        Self::DataCorruption,
        Self::ConfigError,
        Self::Internal,
    ];
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
