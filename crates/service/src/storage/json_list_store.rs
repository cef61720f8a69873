use std::{
    fs::{self, File},
    io::{self, Write},
    path::{Path, PathBuf},
};

use models::Entity;
use tracing::{debug, info, warn};

use crate::errors::ServiceError;

/// How the backing file is rewritten after a mutation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WriteMode {
    /// Truncate and rewrite the file in place.
    #[default]
    Rewrite,
    /// Write a sibling temp file, sync it, then rename it over the target.
    AtomicReplace,
}

/// Generic JSON file-backed list store.
///
/// Holds the whole collection in memory and rewrites the file as a JSON array
/// after every mutation. Reads never touch disk after [`JsonListStore::open`].
/// Identifiers come from a counter seeded with the largest id on disk; they are
/// never handed out twice, even after deletes.
///
/// A failed write is reported as [`ServiceError::Persistence`] but the in-memory
/// change that triggered it is kept.
#[derive(Debug)]
pub struct JsonListStore<T> {
    entities: Vec<T>,
    file_path: PathBuf,
    last_id: u64,
    write_mode: WriteMode,
}

impl<T: Entity> JsonListStore<T> {
    /// Load the store from a path. A missing file means an empty collection.
    pub fn open<P: Into<PathBuf>>(path: P) -> Result<Self, ServiceError> {
        Self::open_with(path, WriteMode::default())
    }

    pub fn open_with<P: Into<PathBuf>>(path: P, write_mode: WriteMode) -> Result<Self, ServiceError> {
        let file_path = path.into();
        let mut entities = read_entities::<T>(&file_path)?;

        let mut last_id = entities.iter().filter_map(Entity::id).max().unwrap_or(0);
        for entity in entities.iter_mut().filter(|e| e.id().is_none()) {
            last_id += 1;
            entity.meta_mut().id = Some(last_id);
            warn!(kind = T::KIND, id = last_id, path = %file_path.display(), "record without id on disk; assigned one");
        }

        info!(kind = T::KIND, count = entities.len(), last_id, path = %file_path.display(), "store loaded");
        Ok(Self { entities, file_path, last_id, write_mode })
    }

    /// Highest identifier handed out or seen so far.
    pub fn last_id(&self) -> u64 { self.last_id }

    /// Borrow the records in stored order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> { self.entities.iter() }

    fn persist(&self) -> Result<(), ServiceError> {
        let data = serde_json::to_vec_pretty(&self.entities)
            .map_err(|e| ServiceError::Persistence(format!("cannot serialize {} list: {e}", T::KIND)))?;
        write_file(&self.file_path, &data, self.write_mode).map_err(|e| {
            ServiceError::Persistence(format!("failed to save to file {}: {e}", self.file_path.display()))
        })?;
        debug!(kind = T::KIND, count = self.entities.len(), path = %self.file_path.display(), "store written");
        Ok(())
    }

    /// Validate, assign an id when missing, append and persist.
    ///
    /// Validation runs before the id is taken: a rejected record leaves the
    /// store unchanged, counter included, so it consumes no id.
    pub fn save(&mut self, mut entity: T) -> Result<T, ServiceError> {
        entity.validate()?;
        match entity.id() {
            Some(id) if self.exists_by_id(id) => {
                return Err(ServiceError::InvalidOperation(format!("{} with ID {id} already exists", T::KIND)));
            }
            Some(id) => self.last_id = self.last_id.max(id),
            None => {
                self.last_id += 1;
                entity.meta_mut().id = Some(self.last_id);
            }
        }
        self.entities.push(entity.clone());
        self.persist()?;
        info!(kind = T::KIND, id = ?entity.id(), "saved");
        Ok(entity)
    }

    pub fn find_by_id(&self, id: u64) -> Option<T> {
        self.entities.iter().find(|e| e.id() == Some(id)).cloned()
    }

    pub fn find_all(&self) -> Vec<T> { self.entities.clone() }

    /// Replace the stored record with the same id and persist.
    pub fn update(&mut self, mut entity: T) -> Result<T, ServiceError> {
        let id = entity
            .id()
            .ok_or_else(|| ServiceError::InvalidOperation(format!("Cannot update {} without ID", T::KIND)))?;
        entity.validate()?;
        let slot = self
            .entities
            .iter_mut()
            .find(|e| e.id() == Some(id))
            .ok_or_else(|| ServiceError::not_found(T::KIND, id))?;
        entity.touch();
        *slot = entity.clone();
        self.persist()?;
        info!(kind = T::KIND, id, "updated");
        Ok(entity)
    }

    /// Remove every record with `id`; the file is only rewritten when something went.
    pub fn delete_by_id(&mut self, id: u64) -> Result<bool, ServiceError> {
        let before = self.entities.len();
        self.entities.retain(|e| e.id() != Some(id));
        let removed = self.entities.len() != before;
        if removed {
            self.persist()?;
            info!(kind = T::KIND, id, "deleted");
        }
        Ok(removed)
    }

    pub fn exists_by_id(&self, id: u64) -> bool {
        self.entities.iter().any(|e| e.id() == Some(id))
    }

    pub fn count(&self) -> usize { self.entities.len() }

    /// Empty the collection. The id counter is not reset.
    pub fn delete_all(&mut self) -> Result<(), ServiceError> {
        self.entities.clear();
        self.persist()?;
        info!(kind = T::KIND, "deleted all");
        Ok(())
    }
}

fn read_entities<T: Entity>(path: &Path) -> Result<Vec<T>, ServiceError> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            warn!(kind = T::KIND, path = %path.display(), "file not found; starting with an empty store");
            return Ok(Vec::new());
        }
        Err(e) => {
            return Err(ServiceError::Persistence(format!("cannot read {}: {e}", path.display())));
        }
    };
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }
    serde_json::from_slice(&bytes)
        .map_err(|e| ServiceError::Persistence(format!("cannot parse {}: {e}", path.display())))
}

fn write_file(path: &Path, data: &[u8], mode: WriteMode) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    match mode {
        WriteMode::Rewrite => fs::write(path, data),
        WriteMode::AtomicReplace => {
            let mut tmp_name = path.file_name().unwrap_or_default().to_os_string();
            tmp_name.push(".tmp");
            let tmp_path = path.with_file_name(tmp_name);
            let mut file = File::create(&tmp_path)?;
            file.write_all(data)?;
            file.sync_all()?;
            drop(file);
            fs::rename(&tmp_path, path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::temp_path;
    use models::{Customer, Movie, Theater};

    fn movie(title: &str, duration: u32) -> Movie {
        Movie::new(title, "Drama", duration, None, None)
    }

    #[test]
    fn missing_file_is_empty_store() -> Result<(), anyhow::Error> {
        let tmp = temp_path("missing");
        let store = JsonListStore::<Movie>::open(&tmp)?;
        assert_eq!(store.count(), 0);
        assert_eq!(store.last_id(), 0);
        // opening does not create the file
        assert!(!tmp.exists());
        Ok(())
    }

    #[test]
    fn save_then_find_returns_equal_record() -> Result<(), anyhow::Error> {
        let tmp = temp_path("save_find");
        let mut store = JsonListStore::<Movie>::open(&tmp)?;
        let saved = store.save(movie("Heat", 170))?;
        let id = saved.id().expect("id assigned");
        assert_eq!(store.find_by_id(id), Some(saved));
        assert!(store.exists_by_id(id));
        assert!(store.find_by_id(id + 1).is_none());
        let _ = fs::remove_file(&tmp);
        Ok(())
    }

    #[test]
    fn ids_are_monotonic_and_never_reused() -> Result<(), anyhow::Error> {
        let tmp = temp_path("monotonic");
        let mut store = JsonListStore::<Movie>::open(&tmp)?;
        let ids: Vec<u64> = (0..5)
            .map(|i| store.save(movie(&format!("Film {i}"), 90)).map(|m| m.id().unwrap_or(0)))
            .collect::<Result<_, _>>()?;
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);

        assert!(store.delete_by_id(5)?);
        store.delete_all()?;
        let next = store.save(movie("After wipe", 90))?;
        assert_eq!(next.id(), Some(6));
        let _ = fs::remove_file(&tmp);
        Ok(())
    }

    #[test]
    fn explicit_id_advances_counter_and_duplicates_are_rejected() -> Result<(), anyhow::Error> {
        let tmp = temp_path("explicit_id");
        let mut store = JsonListStore::<Movie>::open(&tmp)?;
        let mut m = movie("Imported", 100);
        m.meta.id = Some(40);
        store.save(m.clone())?;
        assert_eq!(store.last_id(), 40);
        assert!(matches!(store.save(m), Err(ServiceError::InvalidOperation(_))));
        assert_eq!(store.count(), 1);
        assert_eq!(store.save(movie("Next", 100))?.id(), Some(41));
        let _ = fs::remove_file(&tmp);
        Ok(())
    }

    #[test]
    fn validation_failure_leaves_store_untouched() -> Result<(), anyhow::Error> {
        let tmp = temp_path("invalid");
        let mut store = JsonListStore::<Movie>::open(&tmp)?;
        assert!(matches!(store.save(movie("Too short", 0)), Err(ServiceError::Validation(_))));
        assert!(matches!(store.save(movie("Too long", 600)), Err(ServiceError::Validation(_))));
        assert_eq!(store.count(), 0);
        assert_eq!(store.last_id(), 0);
        assert!(!tmp.exists());

        let saved = store.save(movie("Fine", 95))?;
        let mut bad = saved.clone();
        bad.rating = 10.1;
        assert!(matches!(store.update(bad), Err(ServiceError::Validation(_))));
        assert_eq!(store.find_by_id(1), Some(saved.clone()));

        let mut top = saved;
        top.rating = 10.0;
        assert_eq!(store.update(top)?.rating, 10.0);
        let _ = fs::remove_file(&tmp);
        Ok(())
    }

    #[test]
    fn update_requires_known_id() -> Result<(), anyhow::Error> {
        let tmp = temp_path("update_unknown");
        let mut store = JsonListStore::<Theater>::open(&tmp)?;
        let saved = store.save(Theater::new("Hall A", 120, "IMAX"))?;

        assert!(matches!(
            store.update(Theater::new("No id", 10, "3D")),
            Err(ServiceError::InvalidOperation(_))
        ));

        let mut ghost = saved.clone();
        ghost.meta.id = Some(99);
        ghost.name = "Ghost".into();
        assert!(matches!(store.update(ghost), Err(ServiceError::NotFound(_))));
        assert_eq!(store.find_all(), vec![saved]);
        let _ = fs::remove_file(&tmp);
        Ok(())
    }

    #[test]
    fn update_replaces_in_place_and_touches() -> Result<(), anyhow::Error> {
        let tmp = temp_path("update_in_place");
        let mut store = JsonListStore::<Theater>::open(&tmp)?;
        store.save(Theater::new("Hall A", 120, "IMAX"))?;
        let b = store.save(Theater::new("Hall B", 60, "Standard"))?;
        store.save(Theater::new("Hall C", 90, "3D"))?;

        let mut changed = b.clone();
        changed.capacity = 75;
        let updated = store.update(changed)?;
        assert!(updated.meta.updated_at >= b.meta.updated_at);
        assert_eq!(updated.meta.created_at, b.meta.created_at);

        let names: Vec<_> = store.iter().map(|t| (t.name.clone(), t.capacity)).collect();
        assert_eq!(
            names,
            vec![("Hall A".to_string(), 120), ("Hall B".to_string(), 75), ("Hall C".to_string(), 90)]
        );
        let _ = fs::remove_file(&tmp);
        Ok(())
    }

    #[test]
    fn delete_reports_whether_something_went() -> Result<(), anyhow::Error> {
        let tmp = temp_path("delete");
        let mut store = JsonListStore::<Customer>::open(&tmp)?;
        store.save(Customer::new("Ann", "Lee", None, None))?;
        store.save(Customer::new("Bob", "Ray", None, None))?;

        assert!(!store.delete_by_id(42)?);
        assert_eq!(store.count(), 2);

        assert!(store.delete_by_id(1)?);
        assert_eq!(store.count(), 1);
        assert!(store.find_by_id(1).is_none());
        let _ = fs::remove_file(&tmp);
        Ok(())
    }

    #[test]
    fn reload_reproduces_list_and_counter() -> Result<(), anyhow::Error> {
        let tmp = temp_path("reload");
        let mut store = JsonListStore::<Theater>::open(&tmp)?;
        let mut a = Theater::new("Hall A", 120, "IMAX");
        a.add_movie(7);
        a.add_movie(2);
        store.save(a)?;
        store.save(Theater::new("Hall B", 60, "Standard"))?;
        store.save(Theater::new("Hall C", 30, "4DX"))?;
        store.delete_by_id(2)?;

        let reloaded = JsonListStore::<Theater>::open_with(&tmp, WriteMode::AtomicReplace)?;
        assert_eq!(reloaded.find_all(), store.find_all());
        assert_eq!(reloaded.last_id(), 3);
        let _ = fs::remove_file(&tmp);
        Ok(())
    }

    #[test]
    fn atomic_replace_leaves_no_temp_file() -> Result<(), anyhow::Error> {
        let tmp = temp_path("atomic");
        let mut store = JsonListStore::<Movie>::open_with(&tmp, WriteMode::AtomicReplace)?;
        store.save(movie("Ran", 162))?;
        store.save(movie("Ikiru", 143))?;

        let mut tmp_name = tmp.file_name().unwrap_or_default().to_os_string();
        tmp_name.push(".tmp");
        assert!(!tmp.with_file_name(tmp_name).exists());

        let on_disk: Vec<Movie> = serde_json::from_slice(&fs::read(&tmp)?)?;
        assert_eq!(on_disk.len(), 2);
        let _ = fs::remove_file(&tmp);
        Ok(())
    }

    #[test]
    fn corrupt_file_is_a_persistence_error() -> Result<(), anyhow::Error> {
        let tmp = temp_path("corrupt");
        fs::write(&tmp, b"{ not json")?;
        assert!(matches!(JsonListStore::<Movie>::open(&tmp), Err(ServiceError::Persistence(_))));

        fs::write(&tmp, b"  \n")?;
        assert_eq!(JsonListStore::<Movie>::open(&tmp)?.count(), 0);
        let _ = fs::remove_file(&tmp);
        Ok(())
    }

    #[test]
    fn records_without_ids_get_one_on_load() -> Result<(), anyhow::Error> {
        let tmp = temp_path("no_ids");
        fs::write(
            &tmp,
            br#"[
              {"id": 4, "createdAt": "2024-05-01 10:00:00", "updatedAt": "2024-05-01 10:00:00",
               "title": "Known", "genre": "Drama", "durationMinutes": 100},
              {"createdAt": "2024-05-01 10:00:00", "updatedAt": "2024-05-01 10:00:00",
               "title": "Unknown", "genre": "Drama", "durationMinutes": 100}
            ]"#,
        )?;
        let store = JsonListStore::<Movie>::open(&tmp)?;
        let ids: Vec<_> = store.iter().map(|m| m.id()).collect();
        assert_eq!(ids, vec![Some(4), Some(5)]);
        assert_eq!(store.last_id(), 5);
        let _ = fs::remove_file(&tmp);
        Ok(())
    }

    #[test]
    fn failed_write_keeps_in_memory_change() -> Result<(), anyhow::Error> {
        // a directory where the file should be makes every write fail
        let tmp = temp_path("blocked");
        fs::create_dir_all(&tmp)?;
        let mut store = JsonListStore::<Movie> {
            entities: Vec::new(),
            file_path: tmp.clone(),
            last_id: 0,
            write_mode: WriteMode::Rewrite,
        };
        assert!(matches!(store.save(movie("Kept", 100)), Err(ServiceError::Persistence(_))));
        assert_eq!(store.count(), 1);
        assert_eq!(store.last_id(), 1);
        let _ = fs::remove_dir_all(&tmp);
        Ok(())
    }
}
