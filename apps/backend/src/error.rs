use thiserror::Error;

use crate::errors::domain::{
    ConflictKind, DomainError, ExhaustedKind, InfraErrorKind, InvalidStateKind, NotFoundKind,
    ValidationKind,
};
use crate::errors::ErrorCode;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AppError {
    #[error("Validation error: {detail}")]
    Validation { code: ErrorCode, detail: String },
    #[error("Not found: {detail}")]
    NotFound { code: ErrorCode, detail: String },
    #[error("Invalid state: {detail}")]
    InvalidState { code: ErrorCode, detail: String },
    #[error("Conflict: {detail}")]
    Conflict { code: ErrorCode, detail: String },
    #[error("Exhausted: {detail}")]
    Exhausted { code: ErrorCode, detail: String },
    #[error("Integrity failure: {detail}")]
    Integrity { code: ErrorCode, detail: String },
    #[error("Database error: {detail}")]
    Db { code: ErrorCode, detail: String },
    #[error("Database unavailable: {detail}")]
    DbUnavailable { detail: String },
    #[error("Configuration error: {detail}")]
    Config { detail: String },
    #[error("Internal error: {detail}")]
    Internal { detail: String },
}

impl AppError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Validation { code, .. }
            | AppError::NotFound { code, .. }
            | AppError::InvalidState { code, .. }
            | AppError::Conflict { code, .. }
            | AppError::Exhausted { code, .. }
            | AppError::Integrity { code, .. }
            | AppError::Db { code, .. } => *code,
            AppError::DbUnavailable { .. } => ErrorCode::DbUnavailable,
            AppError::Config { .. } => ErrorCode::ConfigError,
            AppError::Internal { .. } => ErrorCode::Internal,
        }
    }

    pub fn detail(&self) -> &str {
        match self {
            AppError::Validation { detail, .. }
            | AppError::NotFound { detail, .. }
            | AppError::InvalidState { detail, .. }
            | AppError::Conflict { detail, .. }
            | AppError::Exhausted { detail, .. }
            | AppError::Integrity { detail, .. }
            | AppError::Db { detail, .. }
            | AppError::DbUnavailable { detail }
            | AppError::Config { detail }
            | AppError::Internal { detail } => detail,
        }
    }

    /// Lost a concurrent race; the whole operation may be re-run.
    pub fn is_retryable_conflict(&self) -> bool {
        matches!(self, AppError::Conflict { .. })
    }

    pub fn invalid(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::Validation {
            code,
            detail: detail.into(),
        }
    }

    pub fn not_found(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::NotFound {
            code,
            detail: detail.into(),
        }
    }

    pub fn invalid_state(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::InvalidState {
            code,
            detail: detail.into(),
        }
    }

    pub fn conflict(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::Conflict {
            code,
            detail: detail.into(),
        }
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal {
            detail: detail.into(),
        }
    }

    pub fn db(detail: impl Into<String>) -> Self {
        Self::Db {
            code: ErrorCode::DbError,
            detail: detail.into(),
        }
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(kind, detail) => {
                let code = match kind {
                    ValidationKind::SelfOpponent => ErrorCode::SelfOpponent,
                    ValidationKind::FillerSlotMismatch => ErrorCode::FillerSlotMismatch,
                    ValidationKind::GameConfig => ErrorCode::InvalidGameConfig,
                    ValidationKind::Template => ErrorCode::InvalidTemplate,
                    ValidationKind::Other(ref k) if k == "ForeignKey" => ErrorCode::FkViolation,
                    ValidationKind::Other(ref k) if k == "Check" => ErrorCode::CheckViolation,
                    ValidationKind::Other(_) => ErrorCode::ValidationError,
                };
                AppError::Validation { code, detail }
            }
            DomainError::InvalidState(kind, detail) => {
                let code = match kind {
                    InvalidStateKind::Match => ErrorCode::MatchStateInvalid,
                    InvalidStateKind::Turn => ErrorCode::TurnStateInvalid,
                    InvalidStateKind::Role => ErrorCode::RoleMismatch,
                    InvalidStateKind::AlreadySupplied => ErrorCode::AlreadySupplied,
                    InvalidStateKind::AlreadySelected => ErrorCode::AlreadySelected,
                };
                AppError::InvalidState { code, detail }
            }
            DomainError::Conflict(kind, detail) => {
                let code = match kind {
                    ConflictKind::OptimisticLock => ErrorCode::OptimisticLock,
                    ConflictKind::TurnAlreadyCreated => ErrorCode::TurnAlreadyCreated,
                    ConflictKind::SelectionTaken => ErrorCode::AlreadySelected,
                    ConflictKind::Other(_) => ErrorCode::Conflict,
                };
                AppError::Conflict { code, detail }
            }
            DomainError::NotFound(kind, detail) => {
                let code = match kind {
                    NotFoundKind::Game => ErrorCode::GameNotFound,
                    NotFoundKind::Player => ErrorCode::PlayerNotFound,
                    NotFoundKind::Opponent => ErrorCode::OpponentNotFound,
                    NotFoundKind::Match => ErrorCode::MatchNotFound,
                    NotFoundKind::Turn => ErrorCode::TurnNotFound,
                    NotFoundKind::Word => ErrorCode::WordNotFound,
                    NotFoundKind::Template => ErrorCode::TemplateNotFound,
                    NotFoundKind::Filler => ErrorCode::FillerNotFound,
                    NotFoundKind::Other(ref k) if k == "Record" => ErrorCode::RecordNotFound,
                    NotFoundKind::Other(_) => ErrorCode::NotFound,
                };
                AppError::NotFound { code, detail }
            }
            DomainError::Exhausted(kind, detail) => {
                let code = match kind {
                    ExhaustedKind::Words => ErrorCode::WordsExhausted,
                    ExhaustedKind::BluffFillers => ErrorCode::BluffFillersExhausted,
                };
                AppError::Exhausted { code, detail }
            }
            DomainError::Integrity(detail) => AppError::Integrity {
                code: ErrorCode::UniqueViolation,
                detail,
            },
            DomainError::Infra(kind, detail) => match kind {
                InfraErrorKind::DbUnavailable => AppError::DbUnavailable { detail },
                InfraErrorKind::Timeout => AppError::Db {
                    code: ErrorCode::DbTimeout,
                    detail,
                },
                InfraErrorKind::DataCorruption => AppError::Db {
                    code: ErrorCode::DataCorruption,
                    detail,
                },
                InfraErrorKind::Other(_) => AppError::Db {
                    code: ErrorCode::DbError,
                    detail,
                },
            },
        }
    }
}

impl From<sea_orm::DbErr> for AppError {
    fn from(e: sea_orm::DbErr) -> Self {
        AppError::from(crate::infra::db_errors::map_db_err(e))
    }
}

impl From<std::env::VarError> for AppError {
    fn from(e: std::env::VarError) -> Self {
        AppError::config(format!("env var error: {e}"))
    }
}
