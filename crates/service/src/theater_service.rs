use tracing::{debug, info, instrument};

use models::Theater;

use crate::domain::TheaterUpdate;
use crate::errors::ServiceError;
use crate::file::TheaterRepository;
use crate::repository::Repository;

/// Theater management, including each theater's movie schedule.
///
/// Movie ids are stored as given; they are not checked against the movie store.
#[derive(Debug)]
pub struct TheaterService {
    repo: TheaterRepository,
}

impl TheaterService {
    pub fn new(repo: TheaterRepository) -> Self { Self { repo } }

    #[instrument(skip(self))]
    pub fn create_theater(&mut self, name: &str, capacity: u32, screen_type: &str) -> Result<Theater, ServiceError> {
        let saved = self.repo.save(Theater::new(name, capacity, screen_type))?;
        info!(id = ?saved.meta.id, "theater_created");
        Ok(saved)
    }

    pub fn get_theater_by_id(&self, id: u64) -> Result<Theater, ServiceError> {
        self.repo.find_by_id(id).ok_or_else(|| ServiceError::not_found("Theater", id))
    }

    pub fn get_all_theaters(&self) -> Vec<Theater> { self.repo.find_all() }

    #[instrument(skip(self, changes))]
    pub fn update_theater(&mut self, id: u64, changes: TheaterUpdate) -> Result<Theater, ServiceError> {
        let mut theater = self.get_theater_by_id(id)?;
        if let Some(v) = changes.name { theater.name = v; }
        if let Some(v) = changes.capacity { theater.capacity = v; }
        if let Some(v) = changes.screen_type { theater.screen_type = v; }
        if let Some(v) = changes.has_wheelchair_access { theater.has_wheelchair_access = v; }
        let updated = self.repo.update(theater)?;
        info!(id, "theater_updated");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub fn delete_theater(&mut self, id: u64) -> Result<(), ServiceError> {
        if !self.repo.delete_by_id(id)? {
            return Err(ServiceError::not_found("Theater", id));
        }
        info!(id, "theater_deleted");
        Ok(())
    }

    /// Schedule `movie_id` in a theater. Scheduling it twice has no effect.
    #[instrument(skip(self))]
    pub fn add_movie_to_theater(&mut self, theater_id: u64, movie_id: u64) -> Result<Theater, ServiceError> {
        let mut theater = self.get_theater_by_id(theater_id)?;
        if !theater.add_movie(movie_id) {
            debug!(theater_id, movie_id, "movie already scheduled");
        }
        self.repo.update(theater)
    }

    #[instrument(skip(self))]
    pub fn remove_movie_from_theater(&mut self, theater_id: u64, movie_id: u64) -> Result<Theater, ServiceError> {
        let mut theater = self.get_theater_by_id(theater_id)?;
        if !theater.remove_movie(movie_id) {
            debug!(theater_id, movie_id, "movie was not scheduled");
        }
        self.repo.update(theater)
    }

    pub fn search_theaters(&self, query: &str) -> Vec<Theater> { self.repo.search_by_name(query) }

    pub fn get_theaters_by_screen_type(&self, screen_type: &str) -> Vec<Theater> {
        self.repo.find_by_screen_type(screen_type)
    }

    pub fn get_theater_count(&self) -> usize { self.repo.count() }
}
