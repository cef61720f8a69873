use std::path::PathBuf;

use models::Customer;

use crate::errors::ServiceError;
use crate::repository::Repository;
use crate::storage::{JsonListStore, WriteMode};

/// File-backed customer repository with name, email and loyalty lookups.
#[derive(Debug)]
pub struct CustomerRepository {
    store: JsonListStore<Customer>,
}

impl CustomerRepository {
    /// Open the repository from the given file path. A missing file is an empty list.
    pub fn open<P: Into<PathBuf>>(path: P, write_mode: WriteMode) -> Result<Self, ServiceError> {
        Ok(Self { store: JsonListStore::open_with(path, write_mode)? })
    }

    /// Customers whose last name equals `last_name`, ignoring case.
    pub fn find_by_last_name(&self, last_name: &str) -> Vec<Customer> {
        let wanted = last_name.to_lowercase();
        self.store.iter().filter(|c| c.last_name.to_lowercase() == wanted).cloned().collect()
    }

    /// First customer whose email equals `email`, ignoring case.
    pub fn find_by_email(&self, email: &str) -> Option<Customer> {
        let wanted = email.to_lowercase();
        self.store
            .iter()
            .find(|c| c.email.as_deref().is_some_and(|e| e.to_lowercase() == wanted))
            .cloned()
    }

    /// Customers whose first or last name contains `query`, ignoring case.
    pub fn search_by_name(&self, query: &str) -> Vec<Customer> {
        let q = query.to_lowercase();
        self.store
            .iter()
            .filter(|c| c.first_name.to_lowercase().contains(&q) || c.last_name.to_lowercase().contains(&q))
            .cloned()
            .collect()
    }

    pub fn find_by_min_loyalty_points(&self, min_points: u32) -> Vec<Customer> {
        self.store.iter().filter(|c| c.loyalty_points() >= min_points).cloned().collect()
    }
}

impl Repository<Customer> for CustomerRepository {
    fn save(&mut self, entity: Customer) -> Result<Customer, ServiceError> { self.store.save(entity) }
    fn find_by_id(&self, id: u64) -> Option<Customer> { self.store.find_by_id(id) }
    fn find_all(&self) -> Vec<Customer> { self.store.find_all() }
    fn update(&mut self, entity: Customer) -> Result<Customer, ServiceError> { self.store.update(entity) }
    fn delete_by_id(&mut self, id: u64) -> Result<bool, ServiceError> { self.store.delete_by_id(id) }
    fn exists_by_id(&self, id: u64) -> bool { self.store.exists_by_id(id) }
    fn count(&self) -> usize { self.store.count() }
    fn delete_all(&mut self) -> Result<(), ServiceError> { self.store.delete_all() }
}
