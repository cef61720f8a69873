use std::path::PathBuf;

use models::Movie;

use crate::errors::ServiceError;
use crate::repository::Repository;
use crate::storage::{JsonListStore, WriteMode};

/// File-backed movie repository.
#[derive(Debug)]
pub struct MovieRepository {
    store: JsonListStore<Movie>,
}

fn same_text(value: Option<&str>, wanted: &str) -> bool {
    value.is_some_and(|v| v.to_lowercase() == wanted)
}

impl MovieRepository {
    pub fn open<P: Into<PathBuf>>(path: P, write_mode: WriteMode) -> Result<Self, ServiceError> {
        Ok(Self { store: JsonListStore::open_with(path, write_mode)? })
    }

    pub fn find_by_genre(&self, genre: &str) -> Vec<Movie> {
        let wanted = genre.to_lowercase();
        self.store.iter().filter(|m| m.genre.to_lowercase() == wanted).cloned().collect()
    }

    /// Movies without a director never match.
    pub fn find_by_director(&self, director: &str) -> Vec<Movie> {
        let wanted = director.to_lowercase();
        self.store.iter().filter(|m| same_text(m.director.as_deref(), &wanted)).cloned().collect()
    }

    pub fn find_by_language(&self, language: &str) -> Vec<Movie> {
        let wanted = language.to_lowercase();
        self.store.iter().filter(|m| same_text(m.language.as_deref(), &wanted)).cloned().collect()
    }

    pub fn search_by_title(&self, query: &str) -> Vec<Movie> {
        let q = query.to_lowercase();
        self.store.iter().filter(|m| m.title.to_lowercase().contains(&q)).cloned().collect()
    }

    pub fn find_by_min_rating(&self, min_rating: f64) -> Vec<Movie> {
        self.store.iter().filter(|m| m.rating >= min_rating).cloned().collect()
    }
}

impl Repository<Movie> for MovieRepository {
    fn save(&mut self, entity: Movie) -> Result<Movie, ServiceError> { self.store.save(entity) }
    fn find_by_id(&self, id: u64) -> Option<Movie> { self.store.find_by_id(id) }
    fn find_all(&self) -> Vec<Movie> { self.store.find_all() }
    fn update(&mut self, entity: Movie) -> Result<Movie, ServiceError> { self.store.update(entity) }
    fn delete_by_id(&mut self, id: u64) -> Result<bool, ServiceError> { self.store.delete_by_id(id) }
    fn exists_by_id(&self, id: u64) -> bool { self.store.exists_by_id(id) }
    fn count(&self) -> usize { self.store.count() }
    fn delete_all(&mut self) -> Result<(), ServiceError> { self.store.delete_all() }
}
