use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::errors::CoreError;
use crate::models::taxonomy::Taxonomy;

use super::file;
use super::format;

/// Durable storage of the category taxonomy in one JSON document.
///
/// Keeps the current taxonomy in memory and rewrites the whole document on
/// every change. A change is applied to a copy first and only becomes
/// visible once the document has been written, so a rejected or failed
/// operation leaves both memory and disk as they were.
#[derive(Debug)]
pub struct CategoryStore {
    path: PathBuf,
    taxonomy: Mutex<Taxonomy>,
}

impl CategoryStore {
    /// Open the store at `path`, seeding the built-in taxonomy if the
    /// document does not exist yet.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, CoreError> {
        let path = path.into();
        let taxonomy = read_or_seed(&path)?;
        Ok(Self {
            path,
            taxonomy: Mutex::new(taxonomy),
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Re-read the document from disk (seeding it if it has disappeared)
    /// and return it.
    pub fn load(&self) -> Result<Taxonomy, CoreError> {
        let mut guard = self.lock();
        let taxonomy = read_or_seed(&self.path)?;
        *guard = taxonomy.clone();
        Ok(taxonomy)
    }

    /// Overwrite the document with `taxonomy`.
    pub fn save(&self, taxonomy: &Taxonomy) -> Result<(), CoreError> {
        taxonomy.validate()?;
        let mut guard = self.lock();
        write(&self.path, taxonomy)?;
        *guard = taxonomy.clone();
        Ok(())
    }

    // ── Queries ─────────────────────────────────────────────────────

    /// Snapshot of the current taxonomy.
    #[must_use]
    pub fn taxonomy(&self) -> Taxonomy {
        self.lock().clone()
    }

    /// Category names in display order.
    #[must_use]
    pub fn category_names(&self) -> Vec<String> {
        self.lock()
            .category_names()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Subcategories of `category` in display order. Empty for an unknown
    /// category.
    #[must_use]
    pub fn subcategories(&self, category: &str) -> Vec<String> {
        self.lock()
            .subcategories(category)
            .map(<[String]>::to_vec)
            .unwrap_or_default()
    }

    // ── Mutations ───────────────────────────────────────────────────

    pub fn add_category(&self, name: &str) -> Result<(), CoreError> {
        self.mutate("add category", |t| t.add_category(name))
    }

    /// Remove a category and all of its subcategories. Irreversible; the
    /// caller confirms with the user first.
    pub fn remove_category(&self, name: &str) -> Result<(), CoreError> {
        self.mutate("remove category", |t| t.remove_category(name).map(drop))
    }

    pub fn add_subcategory(&self, category: &str, name: &str) -> Result<(), CoreError> {
        self.mutate("add subcategory", |t| t.add_subcategory(category, name))
    }

    pub fn remove_subcategory(&self, category: &str, name: &str) -> Result<(), CoreError> {
        self.mutate("remove subcategory", |t| t.remove_subcategory(category, name))
    }

    // ── Internal ────────────────────────────────────────────────────

    fn mutate<F>(&self, action: &str, op: F) -> Result<(), CoreError>
    where
        F: FnOnce(&mut Taxonomy) -> Result<(), CoreError>,
    {
        let mut guard = self.lock();
        let mut next = guard.clone();
        if let Err(e) = op(&mut next) {
            tracing::warn!("{action} rejected: {e}");
            return Err(e);
        }
        write(&self.path, &next)?;
        *guard = next;
        tracing::info!("{action}: saved {} categories to {}", guard.len(), self.path.display());
        Ok(())
    }

    fn lock(&self) -> MutexGuard<'_, Taxonomy> {
        // The guarded value is only replaced wholesale, never left half-updated
        self.taxonomy.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn read_or_seed(path: &Path) -> Result<Taxonomy, CoreError> {
    match file::read_if_exists(path)? {
        Some(bytes) => {
            let taxonomy = format::read_taxonomy(&bytes)?;
            tracing::debug!("loaded {} categories from {}", taxonomy.len(), path.display());
            Ok(taxonomy)
        }
        None => {
            let taxonomy = Taxonomy::builtin();
            write(path, &taxonomy)?;
            tracing::info!("created default categories at {}", path.display());
            Ok(taxonomy)
        }
    }
}

fn write(path: &Path, taxonomy: &Taxonomy) -> Result<(), CoreError> {
    let bytes = format::write_taxonomy(taxonomy)?;
    file::write_atomic(path, &bytes)
}
