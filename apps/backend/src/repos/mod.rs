//! Repository functions for the domain layer. Each wraps its `*_sea`
//! adapter, converts entity models into domain structs and maps `DbErr`
//! into `DomainError`.

pub mod content;
pub mod games;
pub mod matches;
pub mod memberships;
pub mod players;
pub mod turn_fillers;
pub mod turn_players;
pub mod turns;
