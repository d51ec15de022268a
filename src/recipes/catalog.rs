//! Recipe Catalog Loader
//!
//! The catalog is a read-only JSON document. It is read on first access and
//! cached for the life of the [`RecipeCatalog`]; a failed load is not cached,
//! so the next access retries.

use super::models::Recipe;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::sync::OnceCell;

/// Failures while loading the recipe catalog
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read recipe catalog {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed recipe catalog {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Lazily loaded, immutable recipe collection
pub struct RecipeCatalog {
    path: Option<PathBuf>,
    recipes: OnceCell<Vec<Recipe>>,
}

impl RecipeCatalog {
    /// Creates a catalog backed by a JSON file. Nothing is read until the
    /// first call to [`RecipeCatalog::recipes`].
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            recipes: OnceCell::new(),
        }
    }

    /// Creates an already-loaded catalog.
    pub fn from_recipes(recipes: Vec<Recipe>) -> Self {
        Self {
            path: None,
            recipes: OnceCell::new_with(Some(recipes)),
        }
    }

    /// Returns the cached recipes, loading them on first access.
    pub async fn recipes(&self) -> Result<&[Recipe], CatalogError> {
        let recipes = self
            .recipes
            .get_or_try_init(|| async move {
                // A preloaded catalog always has its cell populated.
                let path = self.path.clone().unwrap_or_default();
                load_recipes(&path).await
            })
            .await?;
        Ok(recipes.as_slice())
    }
}

/// Reads and parses a catalog file.
pub async fn load_recipes(path: &Path) -> Result<Vec<Recipe>, CatalogError> {
    let data = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;

    let recipes: Vec<Recipe> =
        serde_json::from_str(&data).map_err(|source| CatalogError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    tracing::info!(path = %path.display(), count = recipes.len(), "recipe catalog loaded");
    Ok(recipes)
}

/// Locates the catalog file.
///
/// Strategy:
/// 1. the configured path, if it exists (or is absolute)
/// 2. the same relative path under the parent of `base` (running from a subdir)
/// 3. the configured path as given
pub fn resolve_catalog_path(configured: &Path, base: &Path) -> PathBuf {
    if configured.is_absolute() {
        return configured.to_path_buf();
    }

    let direct = base.join(configured);
    if direct.exists() {
        return direct;
    }

    if let Some(parent) = base.parent() {
        let candidate = parent.join(configured);
        if candidate.exists() {
            return candidate;
        }
    }

    configured.to_path_buf()
}
