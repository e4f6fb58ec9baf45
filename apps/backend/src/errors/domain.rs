//! Domain-level error type used across repos, domain logic and services.
//!
//! This error type is DB-agnostic. Services return
//! `Result<T, crate::error::AppError>` and convert from `DomainError`
//! using the provided `From<DomainError> for AppError` implementation.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Infra error kinds to distinguish operational failures
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InfraErrorKind {
    Timeout,
    DbUnavailable,
    DataCorruption,
    Other(String),
}

/// Rejected input, keyed by the rule it broke
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationKind {
    SelfOpponent,
    FillerSlotMismatch,
    GameConfig,
    Template,
    Other(String),
}

/// Which state guard refused the action
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InvalidStateKind {
    Match,
    Turn,
    Role,
    AlreadySupplied,
    AlreadySelected,
}

/// Entities the engine can fail to find
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotFoundKind {
    Game,
    Player,
    Opponent,
    Match,
    Turn,
    Word,
    Template,
    Filler,
    Other(String),
}

/// Lost races and duplicate claims
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConflictKind {
    /// Version column moved between read and conditional update
    OptimisticLock,
    /// Another request created the same turn sequence number first
    TurnAlreadyCreated,
    /// Selection was recorded by a concurrent request
    SelectionTaken,
    Other(String),
}

/// Pools the engine draws from that can run dry
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ExhaustedKind {
    Words,
    BluffFillers,
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Input or business rule violation
    Validation(ValidationKind, String),
    /// Action not legal in the current match or turn state
    InvalidState(InvalidStateKind, String),
    /// Lost a concurrent race; retryable
    Conflict(ConflictKind, String),
    /// Missing resource in domain terms
    NotFound(NotFoundKind, String),
    /// Nothing left to draw from
    Exhausted(ExhaustedKind, String),
    /// Persistence rejected the save
    Integrity(String),
    /// Infrastructure/operational failures
    Infra(InfraErrorKind, String),
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::Validation(kind, d) => write!(f, "validation error {kind:?}: {d}"),
            DomainError::InvalidState(kind, d) => write!(f, "invalid state {kind:?}: {d}"),
            DomainError::Conflict(kind, d) => write!(f, "conflict {kind:?}: {d}"),
            DomainError::NotFound(kind, d) => write!(f, "not found {kind:?}: {d}"),
            DomainError::Exhausted(kind, d) => write!(f, "exhausted {kind:?}: {d}"),
            DomainError::Integrity(d) => write!(f, "integrity failure: {d}"),
            DomainError::Infra(kind, d) => write!(f, "infra {kind:?}: {d}"),
        }
    }
}

impl Error for DomainError {}

impl DomainError {
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation(kind, detail.into())
    }
    pub fn invalid_state(kind: InvalidStateKind, detail: impl Into<String>) -> Self {
        Self::InvalidState(kind, detail.into())
    }
    pub fn conflict(kind: ConflictKind, detail: impl Into<String>) -> Self {
        Self::Conflict(kind, detail.into())
    }
    pub fn not_found(kind: NotFoundKind, detail: impl Into<String>) -> Self {
        Self::NotFound(kind, detail.into())
    }
    pub fn exhausted(kind: ExhaustedKind, detail: impl Into<String>) -> Self {
        Self::Exhausted(kind, detail.into())
    }
    pub fn integrity(detail: impl Into<String>) -> Self {
        Self::Integrity(detail.into())
    }
    pub fn infra(kind: InfraErrorKind, detail: impl Into<String>) -> Self {
        Self::Infra(kind, detail.into())
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, DomainError::Conflict(..))
    }
}
