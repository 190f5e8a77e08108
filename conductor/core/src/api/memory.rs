//! In-Memory Catalog
//!
//! A [`CatalogApi`] backed by plain collections. Used to drive the Conductor
//! in tests and headless runs without a network: canned breeds and images,
//! a mutable favourites list, per-endpoint failure injection, and per-breed
//! search delays for exercising overlapping flows.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use reqwest::StatusCode;

use super::traits::CatalogApi;
use crate::error::{CatalogError, Endpoint};
use crate::models::{Breed, BreedImage, Favorite};

#[derive(Default)]
struct Inner {
    breeds: Vec<Breed>,
    images: HashMap<String, Vec<BreedImage>>,
    favorites: Vec<Favorite>,
    next_favorite_id: u64,
    failures: HashMap<Endpoint, StatusCode>,
    search_delays: HashMap<String, Duration>,
    calls: Vec<Endpoint>,
}

/// In-memory catalog
#[derive(Default)]
pub struct InMemoryCatalog {
    inner: Mutex<Inner>,
}

impl InMemoryCatalog {
    /// Create an empty catalog
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the breed list
    #[must_use]
    pub fn with_breeds(self, breeds: Vec<Breed>) -> Self {
        self.inner.lock().breeds = breeds;
        self
    }

    /// Set the search result for one breed
    #[must_use]
    pub fn with_images(self, breed_id: impl Into<String>, images: Vec<BreedImage>) -> Self {
        self.inner.lock().images.insert(breed_id.into(), images);
        self
    }

    /// Seed an existing favourite record
    #[must_use]
    pub fn with_favorite(self, favorite: Favorite) -> Self {
        self.inner.lock().favorites.push(favorite);
        self
    }

    /// Delay the search for one breed (applied before the result is read)
    #[must_use]
    pub fn with_search_delay(self, breed_id: impl Into<String>, delay: Duration) -> Self {
        self.inner.lock().search_delays.insert(breed_id.into(), delay);
        self
    }

    /// Make every call to `endpoint` fail with `status`
    pub fn fail(&self, endpoint: Endpoint, status: StatusCode) {
        self.inner.lock().failures.insert(endpoint, status);
    }

    /// Stop failing calls to `endpoint`
    pub fn recover(&self, endpoint: Endpoint) {
        self.inner.lock().failures.remove(&endpoint);
    }

    /// Snapshot of the current favourites
    pub fn favorites(&self) -> Vec<Favorite> {
        self.inner.lock().favorites.clone()
    }

    /// Whether an image currently has a favourite record
    pub fn is_favorite(&self, image_id: &str) -> bool {
        self.inner
            .lock()
            .favorites
            .iter()
            .any(|f| f.image_id == image_id)
    }

    /// Every call made so far, in order
    pub fn calls(&self) -> Vec<Endpoint> {
        self.inner.lock().calls.clone()
    }

    /// Number of calls made to one endpoint
    pub fn call_count(&self, endpoint: Endpoint) -> usize {
        self.inner
            .lock()
            .calls
            .iter()
            .filter(|&&e| e == endpoint)
            .count()
    }

    /// Record the call and apply injected failures
    fn enter(&self, endpoint: Endpoint) -> Result<(), CatalogError> {
        let mut inner = self.inner.lock();
        inner.calls.push(endpoint);
        match inner.failures.get(&endpoint) {
            Some(&status) => Err(CatalogError::Remote { status, endpoint }),
            None => Ok(()),
        }
    }

    fn image_url(inner: &Inner, image_id: &str) -> Option<String> {
        inner
            .images
            .values()
            .flatten()
            .find(|image| image.id == image_id)
            .map(|image| image.url.clone())
    }
}

#[async_trait]
impl CatalogApi for InMemoryCatalog {
    fn name(&self) -> &str {
        "InMemory"
    }

    async fn list_breeds(&self) -> Result<Vec<Breed>, CatalogError> {
        self.enter(Endpoint::ListBreeds)?;
        Ok(self.inner.lock().breeds.clone())
    }

    async fn search_images(
        &self,
        breed_id: &str,
        limit: u32,
    ) -> Result<Vec<BreedImage>, CatalogError> {
        let delay = self.inner.lock().search_delays.get(breed_id).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        self.enter(Endpoint::SearchImages)?;
        let limit = usize::try_from(limit).unwrap_or(usize::MAX);
        Ok(self
            .inner
            .lock()
            .images
            .get(breed_id)
            .map(|images| images.iter().take(limit).cloned().collect())
            .unwrap_or_default())
    }

    async fn list_favorites(&self) -> Result<Vec<Favorite>, CatalogError> {
        self.enter(Endpoint::ListFavourites)?;
        Ok(self.inner.lock().favorites.clone())
    }

    async fn add_favorite(&self, image_id: &str) -> Result<Favorite, CatalogError> {
        self.enter(Endpoint::AddFavourite)?;

        let mut inner = self.inner.lock();
        inner.next_favorite_id += 1;
        let id = inner.next_favorite_id.to_string();

        let mut stored = Favorite::new(id.clone(), image_id);
        if let Some(url) = Self::image_url(&inner, image_id) {
            stored = stored.with_image(image_id, url);
        }
        inner.favorites.push(stored);

        Ok(Favorite::new(id, image_id))
    }

    async fn remove_favorite(&self, favorite_id: &str) -> Result<(), CatalogError> {
        self.enter(Endpoint::RemoveFavourite)?;

        let mut inner = self.inner.lock();
        let before = inner.favorites.len();
        inner.favorites.retain(|f| f.id != favorite_id);
        if inner.favorites.len() == before {
            return Err(CatalogError::Remote {
                status: StatusCode::NOT_FOUND,
                endpoint: Endpoint::RemoveFavourite,
            });
        }
        Ok(())
    }
}
