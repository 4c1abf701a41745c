//! Saved palettes, mirrored in memory and written through to storage on every change.

use crate::error::{AppError, AppResult};
use crate::log;
use crate::palette::types::Palette;
use crate::storage::FavoritesBackend;

pub struct FavoritesStore {
    palettes: Vec<Palette>,
    backend: Box<dyn FavoritesBackend>,
}

impl std::fmt::Debug for FavoritesStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FavoritesStore")
            .field("palettes", &self.palettes)
            .finish_non_exhaustive()
    }
}

impl FavoritesStore {
    /// Starts with whatever the backend holds. An unreadable backend yields an empty list.
    pub fn load(backend: Box<dyn FavoritesBackend>) -> Self {
        let palettes = match backend.load() {
            Ok(palettes) => {
                log(&format!("Loaded {} favorite palettes", palettes.len()));
                palettes
            }
            Err(e) => {
                log(&format!("Failed to load favorites: {:#}. Starting empty.", e));
                Vec::new()
            }
        };
        Self { palettes, backend }
    }

    pub fn list(&self) -> &[Palette] {
        &self.palettes
    }

    pub fn len(&self) -> usize {
        self.palettes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.palettes.is_empty()
    }

    /// True if a palette with this name is saved.
    pub fn contains(&self, name: &str) -> bool {
        self.palettes.iter().any(|p| p.name == name)
    }

    /// Appends a copy of `palette`. Duplicate names are not rejected here.
    pub fn add(&mut self, palette: Palette) -> AppResult<()> {
        self.mutate(|list| {
            list.push(palette);
            true
        })
        .map(|_| ())
    }

    /// Removes the first palette named `name`. Returns whether one was removed.
    pub fn remove(&mut self, name: &str) -> AppResult<bool> {
        self.mutate(|list| match list.iter().position(|p| p.name == name) {
            Some(index) => {
                list.remove(index);
                true
            }
            None => false,
        })
    }

    /// Removes the palette at `index` in list order.
    pub fn remove_at(&mut self, index: usize) -> AppResult<Palette> {
        let palette = self
            .palettes
            .get(index)
            .cloned()
            .ok_or(AppError::IndexOutOfRange {
                index,
                len: self.palettes.len(),
            })?;
        self.mutate(|list| {
            list.remove(index);
            true
        })?;
        Ok(palette)
    }

    /// Applies `change`, then persists the whole list. Restores the previous list if
    /// persisting fails. Nothing is written when `change` reports no modification.
    fn mutate(&mut self, change: impl FnOnce(&mut Vec<Palette>) -> bool) -> AppResult<bool> {
        let previous = self.palettes.clone();
        if !change(&mut self.palettes) {
            return Ok(false);
        }

        if let Err(e) = self.backend.save(&self.palettes) {
            self.palettes = previous;
            log(&format!("Failed to save favorites: {:#}", e));
            return Err(AppError::persistence(&e));
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::types::ColorTriple;
    use anyhow::{anyhow, Result};
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    /// In-memory backend; `fail` makes every save error.
    #[derive(Default)]
    struct MemoryBackend {
        saved: Rc<RefCell<Vec<Palette>>>,
        fail: Rc<Cell<bool>>,
    }

    impl FavoritesBackend for MemoryBackend {
        fn save(&self, favorites: &[Palette]) -> Result<()> {
            if self.fail.get() {
                return Err(anyhow!("storage offline"));
            }
            *self.saved.borrow_mut() = favorites.to_vec();
            Ok(())
        }

        fn load(&self) -> Result<Vec<Palette>> {
            Ok(self.saved.borrow().clone())
        }
    }

    fn palette(name: &str) -> Palette {
        Palette::new(name, [ColorTriple::new(0.5, 0.5, 0.5); 5])
    }

    #[test]
    fn test_add_then_contains() {
        let backend = MemoryBackend::default();
        let saved = backend.saved.clone();
        let mut store = FavoritesStore::load(Box::new(backend));

        store.add(palette("Palette 1")).unwrap();

        assert!(store.contains("Palette 1"));
        assert_eq!(saved.borrow().len(), 1);
    }

    #[test]
    fn test_remove_then_not_contains() {
        let mut store = FavoritesStore::load(Box::new(MemoryBackend::default()));
        store.add(palette("Palette 1")).unwrap();

        assert_eq!(store.remove("Palette 1"), Ok(true));
        assert!(!store.contains("Palette 1"));
        assert_eq!(store.remove("Palette 1"), Ok(false));
    }

    #[test]
    fn test_remove_only_first_duplicate() {
        let mut store = FavoritesStore::load(Box::new(MemoryBackend::default()));
        store.add(palette("dup")).unwrap();
        store.add(palette("other")).unwrap();
        store.add(palette("dup")).unwrap();

        store.remove("dup").unwrap();

        let names: Vec<&str> = store.list().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["other", "dup"]);
    }

    #[test]
    fn test_failed_persist_rolls_back() {
        let backend = MemoryBackend::default();
        let fail = backend.fail.clone();
        let saved = backend.saved.clone();
        let mut store = FavoritesStore::load(Box::new(backend));
        store.add(palette("kept")).unwrap();

        fail.set(true);
        let err = store.add(palette("lost")).unwrap_err();
        assert!(matches!(err, AppError::PersistenceError(_)));
        assert_eq!(store.list(), &[palette("kept")]);

        assert!(store.remove("kept").is_err());
        assert!(store.contains("kept"));
        assert!(store.remove_at(0).is_err());
        assert_eq!(store.len(), 1);
        assert_eq!(saved.borrow().len(), 1);
    }

    #[test]
    fn test_remove_at() {
        let mut store = FavoritesStore::load(Box::new(MemoryBackend::default()));
        store.add(palette("a")).unwrap();
        store.add(palette("b")).unwrap();

        assert_eq!(store.remove_at(0).unwrap().name, "a");
        assert_eq!(
            store.remove_at(5),
            Err(AppError::IndexOutOfRange { index: 5, len: 1 })
        );
    }

    #[test]
    fn test_load_existing() {
        let backend = MemoryBackend::default();
        backend.saved.borrow_mut().push(palette("restored"));

        let store = FavoritesStore::load(Box::new(backend));
        assert!(store.contains("restored"));
    }
}
