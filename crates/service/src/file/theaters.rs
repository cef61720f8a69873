use std::path::PathBuf;

use models::Theater;

use crate::errors::ServiceError;
use crate::repository::Repository;
use crate::storage::{JsonListStore, WriteMode};

/// File-backed theater repository.
#[derive(Debug)]
pub struct TheaterRepository {
    store: JsonListStore<Theater>,
}

impl TheaterRepository {
    pub fn open<P: Into<PathBuf>>(path: P, write_mode: WriteMode) -> Result<Self, ServiceError> {
        Ok(Self { store: JsonListStore::open_with(path, write_mode)? })
    }

    pub fn find_by_screen_type(&self, screen_type: &str) -> Vec<Theater> {
        let wanted = screen_type.to_lowercase();
        self.store.iter().filter(|t| t.screen_type.to_lowercase() == wanted).cloned().collect()
    }

    pub fn find_by_min_capacity(&self, min_capacity: u32) -> Vec<Theater> {
        self.store.iter().filter(|t| t.capacity >= min_capacity).cloned().collect()
    }

    pub fn find_with_wheelchair_access(&self) -> Vec<Theater> {
        self.store.iter().filter(|t| t.has_wheelchair_access).cloned().collect()
    }

    /// Theaters whose schedule includes `movie_id`.
    pub fn find_by_movie_id(&self, movie_id: u64) -> Vec<Theater> {
        self.store.iter().filter(|t| t.is_showing(movie_id)).cloned().collect()
    }

    pub fn search_by_name(&self, query: &str) -> Vec<Theater> {
        let q = query.to_lowercase();
        self.store.iter().filter(|t| t.name.to_lowercase().contains(&q)).cloned().collect()
    }
}

impl Repository<Theater> for TheaterRepository {
    fn save(&mut self, entity: Theater) -> Result<Theater, ServiceError> { self.store.save(entity) }
    fn find_by_id(&self, id: u64) -> Option<Theater> { self.store.find_by_id(id) }
    fn find_all(&self) -> Vec<Theater> { self.store.find_all() }
    fn update(&mut self, entity: Theater) -> Result<Theater, ServiceError> { self.store.update(entity) }
    fn delete_by_id(&mut self, id: u64) -> Result<bool, ServiceError> { self.store.delete_by_id(id) }
    fn exists_by_id(&self, id: u64) -> bool { self.store.exists_by_id(id) }
    fn count(&self) -> usize { self.store.count() }
    fn delete_all(&mut self) -> Result<(), ServiceError> { self.store.delete_all() }
}
