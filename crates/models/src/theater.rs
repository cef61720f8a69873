use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::entity::{require_text, Entity, EntityMeta};
use crate::errors::ModelError;

pub const MAX_CAPACITY: u32 = 1000;

/// A screening hall. `current_movie_ids` keeps insertion order and never holds duplicates.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theater {
    #[serde(flatten)]
    pub meta: EntityMeta,
    pub name: String,
    pub capacity: u32,
    pub screen_type: String,
    #[serde(default = "default_wheelchair_access")]
    pub has_wheelchair_access: bool,
    #[serde(default, deserialize_with = "dedup_ids")]
    current_movie_ids: Vec<u64>,
}

fn default_wheelchair_access() -> bool { true }

fn dedup_ids<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<u64>, D::Error> {
    // null reads as an empty schedule
    let raw = Option::<Vec<u64>>::deserialize(d)?.unwrap_or_default();
    let mut ids = Vec::with_capacity(raw.len());
    for id in raw {
        if !ids.contains(&id) {
            ids.push(id);
        }
    }
    Ok(ids)
}

impl Theater {
    pub fn new(name: impl Into<String>, capacity: u32, screen_type: impl Into<String>) -> Self {
        Self {
            meta: EntityMeta::new(),
            name: name.into(),
            capacity,
            screen_type: screen_type.into(),
            has_wheelchair_access: true,
            current_movie_ids: Vec::new(),
        }
    }

    pub fn current_movie_ids(&self) -> &[u64] { &self.current_movie_ids }

    pub fn is_showing(&self, movie_id: u64) -> bool {
        self.current_movie_ids.contains(&movie_id)
    }

    /// Schedule a movie; returns `false` when it was already scheduled.
    pub fn add_movie(&mut self, movie_id: u64) -> bool {
        if self.is_showing(movie_id) {
            return false;
        }
        self.current_movie_ids.push(movie_id);
        self.touch();
        true
    }

    /// Unschedule a movie; returns `false` when it was not scheduled.
    pub fn remove_movie(&mut self, movie_id: u64) -> bool {
        let before = self.current_movie_ids.len();
        self.current_movie_ids.retain(|id| *id != movie_id);
        if self.current_movie_ids.len() == before {
            return false;
        }
        self.touch();
        true
    }

    pub fn has_available_seats(&self, requested_seats: u32) -> bool {
        requested_seats <= self.capacity
    }
}

impl Entity for Theater {
    const KIND: &'static str = "Theater";

    fn meta(&self) -> &EntityMeta { &self.meta }
    fn meta_mut(&mut self) -> &mut EntityMeta { &mut self.meta }

    fn validate(&self) -> Result<(), ModelError> {
        require_text(&self.name, "Theater name cannot be empty")?;
        if self.capacity == 0 {
            return Err(ModelError::validation("Theater capacity must be positive"));
        }
        if self.capacity > MAX_CAPACITY {
            return Err(ModelError::validation(format!(
                "Theater capacity seems unrealistic (max {MAX_CAPACITY} seats)"
            )));
        }
        require_text(&self.screen_type, "Theater screen type cannot be empty")?;
        Ok(())
    }
}

impl fmt::Display for Theater {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Theater[id={}, name='{}', capacity={}, screenType={}, movies={}]",
            self.meta.id.map_or_else(|| "-".to_string(), |id| id.to_string()),
            self.name,
            self.capacity,
            self.screen_type,
            self.current_movie_ids.len(),
        )
    }
}
