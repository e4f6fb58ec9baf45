//! SeaORM adapters. Functions are generic over `ConnectionTrait` and return
//! `DbErr`; the repos layer maps to `DomainError`.

pub mod content_sea;
pub mod games_sea;
pub mod matches_sea;
pub mod memberships_sea;
pub mod players_sea;
pub mod turn_fillers_sea;
pub mod turn_players_sea;
pub mod turns_sea;
