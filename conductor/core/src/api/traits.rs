//! Catalog Trait
//!
//! Trait definition for the remote catalog. The Conductor only talks to this
//! trait, so it works with the HTTP client, an in-memory catalog for tests,
//! or any other provider with the same five operations.

use async_trait::async_trait;

use crate::error::CatalogError;
use crate::models::{Breed, BreedImage, Favorite};

/// Remote catalog of breeds, images, and favourites
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Get the catalog name (e.g., "TheCatAPI")
    fn name(&self) -> &str;

    /// List all breeds, in the order the catalog returns them
    async fn list_breeds(&self) -> Result<Vec<Breed>, CatalogError>;

    /// Search images of one breed
    ///
    /// An empty result is a normal outcome, not an error.
    async fn search_images(
        &self,
        breed_id: &str,
        limit: u32,
    ) -> Result<Vec<BreedImage>, CatalogError>;

    /// List the current favourites
    async fn list_favorites(&self) -> Result<Vec<Favorite>, CatalogError>;

    /// Mark an image as favourite, returning the created record
    async fn add_favorite(&self, image_id: &str) -> Result<Favorite, CatalogError>;

    /// Delete a favourite record by its record id (not the image id)
    async fn remove_favorite(&self, favorite_id: &str) -> Result<(), CatalogError>;

    /// Find the favourite record for an image
    async fn find_favorite(&self, image_id: &str) -> Result<Option<Favorite>, CatalogError> {
        let favorites = self.list_favorites().await?;
        Ok(favorites.into_iter().find(|f| f.image_id == image_id))
    }
}
