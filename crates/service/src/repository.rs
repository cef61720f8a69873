use models::Entity;

use crate::errors::ServiceError;
use crate::storage::JsonListStore;

/// CRUD contract shared by the generic store and every per-entity repository.
pub trait Repository<T: Entity> {
    fn save(&mut self, entity: T) -> Result<T, ServiceError>;
    fn find_by_id(&self, id: u64) -> Option<T>;
    fn find_all(&self) -> Vec<T>;
    fn update(&mut self, entity: T) -> Result<T, ServiceError>;
    fn delete_by_id(&mut self, id: u64) -> Result<bool, ServiceError>;
    fn exists_by_id(&self, id: u64) -> bool;
    fn count(&self) -> usize;
    fn delete_all(&mut self) -> Result<(), ServiceError>;
}

impl<T: Entity> Repository<T> for JsonListStore<T> {
    fn save(&mut self, entity: T) -> Result<T, ServiceError> { self.save(entity) }
    fn find_by_id(&self, id: u64) -> Option<T> { self.find_by_id(id) }
    fn find_all(&self) -> Vec<T> { self.find_all() }
    fn update(&mut self, entity: T) -> Result<T, ServiceError> { self.update(entity) }
    fn delete_by_id(&mut self, id: u64) -> Result<bool, ServiceError> { self.delete_by_id(id) }
    fn exists_by_id(&self, id: u64) -> bool { self.exists_by_id(id) }
    fn count(&self) -> usize { self.count() }
    fn delete_all(&mut self) -> Result<(), ServiceError> { self.delete_all() }
}
