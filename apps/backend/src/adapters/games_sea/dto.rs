//! DTOs for games_sea adapter.

/// DTO for creating a new game.
#[derive(Debug, Clone)]
pub struct GameCreate {
    pub name: String,
    pub description: String,
    pub match_size: i16,
    pub filler_count: i16,
}

impl GameCreate {
    pub fn new(name: impl Into<String>, match_size: i16, filler_count: i16) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            match_size,
            filler_count,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}
