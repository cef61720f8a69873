use std::fmt;

use serde::{Deserialize, Serialize};

use crate::entity::{require_text, Entity, EntityMeta};
use crate::errors::ModelError;

pub const MAX_DURATION_MINUTES: u32 = 500;
pub const MIN_RATING: f64 = 0.0;
pub const MAX_RATING: f64 = 10.0;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    #[serde(flatten)]
    pub meta: EntityMeta,
    pub title: String,
    pub genre: String,
    pub duration_minutes: u32,
    #[serde(default)]
    pub director: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub description: Option<String>,
}

impl Movie {
    pub fn new(
        title: impl Into<String>,
        genre: impl Into<String>,
        duration_minutes: u32,
        director: Option<String>,
        language: Option<String>,
    ) -> Self {
        Self {
            meta: EntityMeta::new(),
            title: title.into(),
            genre: genre.into(),
            duration_minutes,
            director,
            language,
            rating: MIN_RATING,
            description: None,
        }
    }

    /// `2h 15min`, or just `45min` under an hour.
    pub fn formatted_duration(&self) -> String {
        let hours = self.duration_minutes / 60;
        let minutes = self.duration_minutes % 60;
        if hours > 0 {
            format!("{hours}h {minutes}min")
        } else {
            format!("{minutes}min")
        }
    }
}

impl Entity for Movie {
    const KIND: &'static str = "Movie";

    fn meta(&self) -> &EntityMeta { &self.meta }
    fn meta_mut(&mut self) -> &mut EntityMeta { &mut self.meta }

    fn validate(&self) -> Result<(), ModelError> {
        require_text(&self.title, "Movie title cannot be empty")?;
        require_text(&self.genre, "Movie genre cannot be empty")?;
        if self.duration_minutes == 0 {
            return Err(ModelError::validation("Movie duration must be positive"));
        }
        if self.duration_minutes > MAX_DURATION_MINUTES {
            return Err(ModelError::validation(format!(
                "Movie duration seems unrealistic (max {MAX_DURATION_MINUTES} minutes)"
            )));
        }
        // NaN fails the range check too
        if !(MIN_RATING..=MAX_RATING).contains(&self.rating) {
            return Err(ModelError::validation("Movie rating must be between 0.0 and 10.0"));
        }
        Ok(())
    }
}

impl fmt::Display for Movie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Movie[id={}, title='{}', genre={}, duration={}, director={}, rating={:.1}]",
            self.meta.id.map_or_else(|| "-".to_string(), |id| id.to_string()),
            self.title,
            self.genre,
            self.formatted_duration(),
            self.director.as_deref().unwrap_or("N/A"),
            self.rating,
        )
    }
}
