use tracing::{info, instrument};

use models::Movie;

use crate::domain::{non_blank, patch_optional, MovieUpdate};
use crate::errors::ServiceError;
use crate::file::MovieRepository;
use crate::repository::Repository;

/// Movie catalogue operations.
#[derive(Debug)]
pub struct MovieService {
    repo: MovieRepository,
}

impl MovieService {
    pub fn new(repo: MovieRepository) -> Self { Self { repo } }

    #[instrument(skip(self))]
    pub fn create_movie(
        &mut self,
        title: &str,
        genre: &str,
        duration_minutes: u32,
        director: Option<String>,
        language: Option<String>,
    ) -> Result<Movie, ServiceError> {
        let movie = Movie::new(title, genre, duration_minutes, non_blank(director), non_blank(language));
        let saved = self.repo.save(movie)?;
        info!(id = ?saved.meta.id, "movie_created");
        Ok(saved)
    }

    pub fn get_movie_by_id(&self, id: u64) -> Result<Movie, ServiceError> {
        self.repo.find_by_id(id).ok_or_else(|| ServiceError::not_found("Movie", id))
    }

    pub fn get_all_movies(&self) -> Vec<Movie> { self.repo.find_all() }

    #[instrument(skip(self, changes))]
    pub fn update_movie(&mut self, id: u64, changes: MovieUpdate) -> Result<Movie, ServiceError> {
        let mut movie = self.get_movie_by_id(id)?;
        if let Some(v) = changes.title { movie.title = v; }
        if let Some(v) = changes.genre { movie.genre = v; }
        if let Some(v) = changes.duration_minutes { movie.duration_minutes = v; }
        if let Some(v) = changes.rating { movie.rating = v; }
        patch_optional(&mut movie.director, changes.director);
        patch_optional(&mut movie.language, changes.language);
        patch_optional(&mut movie.description, changes.description);
        let updated = self.repo.update(movie)?;
        info!(id, "movie_updated");
        Ok(updated)
    }

    /// Remove a movie. Theaters that still list it keep the reference.
    #[instrument(skip(self))]
    pub fn delete_movie(&mut self, id: u64) -> Result<(), ServiceError> {
        if !self.repo.delete_by_id(id)? {
            return Err(ServiceError::not_found("Movie", id));
        }
        info!(id, "movie_deleted");
        Ok(())
    }

    /// Movies whose title contains `query`.
    pub fn search_movies(&self, query: &str) -> Vec<Movie> { self.repo.search_by_title(query) }

    pub fn get_movies_by_genre(&self, genre: &str) -> Vec<Movie> { self.repo.find_by_genre(genre) }

    pub fn get_movies_by_director(&self, director: &str) -> Vec<Movie> { self.repo.find_by_director(director) }

    #[instrument(skip(self))]
    pub fn update_rating(&mut self, id: u64, rating: f64) -> Result<Movie, ServiceError> {
        let mut movie = self.get_movie_by_id(id)?;
        movie.rating = rating;
        self.repo.update(movie)
    }

    pub fn get_movie_count(&self) -> usize { self.repo.count() }
}
