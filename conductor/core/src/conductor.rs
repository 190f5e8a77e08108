//! Conductor - The Synchronization Flow
//!
//! The Conductor keeps the carousel, the info panel, and favourite status
//! consistent with what the remote catalog answers. It orchestrates:
//! - Initial breed-list load and selector population
//! - Breed-change-triggered image reload
//! - Favourite toggle
//! - Favourites view reload
//!
//! # Design Philosophy
//!
//! The Conductor is UI-agnostic. It communicates through:
//! - `GalleryMessage`: Commands sent TO the surface
//! - `SurfaceEvent`: Events received FROM the surface
//!
//! Every flow catches catalog failures at its own boundary, logs them, and
//! leaves the surface as it was before the failing call. Nothing is retried.
//!
//! # Overlapping flows
//!
//! `Conductor` is a cheap cloneable handle, so a surface may spawn one task
//! per event. Carousel-mode flows (image reload, favourites view) take a
//! [`Generation`] ticket when they begin and commit it right before their
//! first surface command: after a successful fetch, or before the fetch when
//! the carousel is cleared first. A flow whose ticket is older than the
//! newest committed one stops emitting, so a slow response can never
//! overwrite a newer load, and a flow that fails before committing leaves
//! any other flow alone.
//! Favourite toggles are read-then-write and not atomic: two concurrent
//! toggles of the same image can both add a record.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::mpsc;

use crate::api::CatalogApi;
use crate::config::FlowConfig;
use crate::error::CatalogError;
use crate::events::SurfaceEvent;
use crate::messages::{FlowState, GalleryMessage, Generation};
use crate::models::{Breed, BreedImage, BreedOption, CarouselItem, InfoPanel};

/// Result of an image reload
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReloadOutcome {
    /// Carousel filled with this many items
    Loaded {
        /// Items appended
        items: usize,
    },
    /// The search returned nothing; the "no images" panel is shown
    NoImages,
    /// No breed is selected
    NoSelection,
    /// A newer flow reached the surface first
    Superseded,
}

/// Result of a favourites view reload
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FavouritesOutcome {
    /// Carousel filled with this many items
    Loaded {
        /// Items appended
        items: usize,
    },
    /// No favourites; carousel left untouched
    Empty,
    /// A newer flow reached the surface first
    Superseded,
}

/// Direction a favourite toggle went
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FavoriteToggle {
    /// A record was created
    Added {
        /// Created record id
        favorite_id: String,
    },
    /// An existing record was deleted
    Removed {
        /// Deleted record id
        favorite_id: String,
    },
}

impl FavoriteToggle {
    /// Whether the image is a favourite after the toggle
    pub fn favorited(&self) -> bool {
        matches!(self, Self::Added { .. })
    }
}

#[derive(Default)]
struct FlowContext {
    state: FlowState,
    breeds: Vec<Breed>,
    selected: Option<String>,
}

/// The Conductor - headless synchronization flow
pub struct Conductor<A: CatalogApi> {
    /// Flow configuration
    config: FlowConfig,
    /// Remote catalog
    api: Arc<A>,
    /// Channel to send messages to the surface
    tx: mpsc::Sender<GalleryMessage>,
    /// Loaded breeds, selection, and flow state
    context: Arc<RwLock<FlowContext>>,
    /// Last issued generation ticket
    tickets: Arc<AtomicU64>,
    /// Newest committed carousel generation
    generation: Arc<AtomicU64>,
}

impl<A: CatalogApi> Clone for Conductor<A> {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            api: Arc::clone(&self.api),
            tx: self.tx.clone(),
            context: Arc::clone(&self.context),
            tickets: Arc::clone(&self.tickets),
            generation: Arc::clone(&self.generation),
        }
    }
}

impl<A: CatalogApi + 'static> Conductor<A> {
    /// Create a new Conductor with the given catalog
    pub fn new(api: A, config: FlowConfig, tx: mpsc::Sender<GalleryMessage>) -> Self {
        Self::with_shared_api(Arc::new(api), config, tx)
    }

    /// Create a Conductor over a catalog that is also used elsewhere
    pub fn with_shared_api(
        api: Arc<A>,
        config: FlowConfig,
        tx: mpsc::Sender<GalleryMessage>,
    ) -> Self {
        Self {
            config,
            api,
            tx,
            context: Arc::new(RwLock::new(FlowContext::default())),
            tickets: Arc::new(AtomicU64::new(0)),
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Get current state
    pub fn state(&self) -> FlowState {
        self.context.read().state
    }

    /// Get the selected breed id
    pub fn selected_breed(&self) -> Option<String> {
        self.context.read().selected.clone()
    }

    /// Get the loaded breeds
    pub fn breeds(&self) -> Vec<Breed> {
        self.context.read().breeds.clone()
    }

    /// Get the newest committed generation
    pub fn generation(&self) -> Generation {
        Generation(self.generation.load(Ordering::SeqCst))
    }

    /// Initial load: fetch breeds, populate the selector, show the first breed
    ///
    /// Runs once. On failure the selector stays empty and nothing is retried.
    pub async fn start(&self) {
        if self.state().breeds_loaded() {
            tracing::warn!("Breeds already loaded, ignoring start");
            return;
        }

        let breeds = match self.api.list_breeds().await {
            Ok(breeds) => breeds,
            Err(e) => {
                tracing::error!(error = %e, catalog = self.api.name(), "Error loading breeds");
                return;
            }
        };

        let options: Vec<BreedOption> = breeds.iter().map(BreedOption::from).collect();
        let selected = breeds.first().map(|b| b.id.clone());
        {
            let mut context = self.context.write();
            context.breeds = breeds;
            context.selected.clone_from(&selected);
            context.state = FlowState::BreedsLoaded;
        }

        tracing::info!(count = options.len(), "Breeds loaded");
        self.send(GalleryMessage::PopulateBreeds { options }).await;
        self.send(GalleryMessage::State {
            state: FlowState::BreedsLoaded,
        })
        .await;

        if selected.is_some() {
            self.reload_images().await;
        } else {
            tracing::warn!("Breed list is empty, nothing to show");
        }
    }

    /// Handle an event from the surface
    pub async fn handle_event(&self, event: SurfaceEvent) {
        tracing::debug!(event = event.name(), "Handling surface event");

        match event {
            SurfaceEvent::BreedSelected { breed_id } => {
                self.select_breed(&breed_id).await;
            }
            SurfaceEvent::FavoriteToggled { image_id } => {
                self.toggle_favorite(&image_id).await;
            }
            SurfaceEvent::FavouritesRequested => {
                self.show_favourites().await;
            }
            SurfaceEvent::QuitRequested => {
                tracing::info!("Quit requested");
            }
        }
    }

    /// Change the selected breed and reload its images
    ///
    /// Ignored until the initial load has succeeded, and for ids that are not
    /// in the loaded breed list.
    pub async fn select_breed(&self, breed_id: &str) -> Option<ReloadOutcome> {
        {
            let mut context = self.context.write();
            if !context.state.breeds_loaded() {
                tracing::warn!(breed_id, "Breed selected before breeds were loaded");
                return None;
            }
            if !context.breeds.iter().any(|b| b.id == breed_id) {
                tracing::warn!(breed_id, "Unknown breed selected");
                return None;
            }
            context.selected = Some(breed_id.to_string());
        }

        self.reload_images().await
    }

    /// Reload the carousel with images of the selected breed
    ///
    /// Returns `None` if the catalog call failed (the error is logged).
    pub async fn reload_images(&self) -> Option<ReloadOutcome> {
        match self.try_reload_images().await {
            Ok(outcome) => Some(outcome),
            Err(e) => {
                tracing::error!(error = %e, "Error loading breed images");
                None
            }
        }
    }

    async fn try_reload_images(&self) -> Result<ReloadOutcome, CatalogError> {
        let Some(breed_id) = self.selected_breed() else {
            tracing::warn!("No breed selected, skipping image reload");
            return Ok(ReloadOutcome::NoSelection);
        };

        let generation = self.issue_ticket();
        let clear_first = self.config.clear_before_fetch;

        if clear_first
            && !(self.commit(generation)
                && self.emit(GalleryMessage::ClearCarousel { generation }).await)
        {
            return Ok(ReloadOutcome::Superseded);
        }

        let images = self
            .api
            .search_images(&breed_id, self.config.page_size)
            .await?;

        if !clear_first
            && !(self.commit(generation)
                && self.emit(GalleryMessage::ClearCarousel { generation }).await)
        {
            return Ok(ReloadOutcome::Superseded);
        }

        if images.is_empty() {
            tracing::warn!(breed_id = %breed_id, "No images found for this breed");
            let panel = InfoPanel::NoImages;
            if !self.emit(GalleryMessage::Info { generation, panel }).await {
                return Ok(ReloadOutcome::Superseded);
            }
            self.enter_state(generation, FlowState::ImagesLoaded).await;
            return Ok(ReloadOutcome::NoImages);
        }

        for image in &images {
            let item = CarouselItem::from(image);
            if !self
                .emit(GalleryMessage::AppendCarousel { generation, item })
                .await
            {
                return Ok(ReloadOutcome::Superseded);
            }
        }

        let panel = images
            .first()
            .and_then(BreedImage::primary_breed)
            .map_or(InfoPanel::NoAdditionalInfo, InfoPanel::breed_details);

        if !self.emit(GalleryMessage::Info { generation, panel }).await
            || !self.emit(GalleryMessage::StartCarousel { generation }).await
        {
            return Ok(ReloadOutcome::Superseded);
        }

        self.enter_state(generation, FlowState::ImagesLoaded).await;
        tracing::info!(
            breed_id = %breed_id,
            items = images.len(),
            %generation,
            "Breed images loaded"
        );

        Ok(ReloadOutcome::Loaded {
            items: images.len(),
        })
    }

    /// Toggle the favourite status of an image
    ///
    /// Looks the image up in the current favourites and deletes its record if
    /// found, otherwise creates one. Returns `None` if any catalog call failed.
    pub async fn toggle_favorite(&self, image_id: &str) -> Option<FavoriteToggle> {
        match self.try_toggle_favorite(image_id).await {
            Ok(toggle) => {
                match &toggle {
                    FavoriteToggle::Added { favorite_id } => {
                        tracing::info!(image_id, favorite_id = %favorite_id, "Favourite added");
                    }
                    FavoriteToggle::Removed { favorite_id } => {
                        tracing::info!(image_id, favorite_id = %favorite_id, "Favourite removed");
                    }
                }
                self.send(GalleryMessage::FavoriteChanged {
                    image_id: image_id.to_string(),
                    favorited: toggle.favorited(),
                })
                .await;
                Some(toggle)
            }
            Err(e) => {
                tracing::error!(error = %e, image_id, "Error toggling favourite");
                None
            }
        }
    }

    async fn try_toggle_favorite(&self, image_id: &str) -> Result<FavoriteToggle, CatalogError> {
        match self.api.find_favorite(image_id).await? {
            Some(existing) => {
                self.api.remove_favorite(&existing.id).await?;
                Ok(FavoriteToggle::Removed {
                    favorite_id: existing.id,
                })
            }
            None => {
                let created = self.api.add_favorite(image_id).await?;
                Ok(FavoriteToggle::Added {
                    favorite_id: created.id,
                })
            }
        }
    }

    /// Show the user's favourites in the carousel
    ///
    /// With no favourites only the info panel changes; the carousel is not
    /// cleared. Returns `None` if the catalog call failed.
    pub async fn show_favourites(&self) -> Option<FavouritesOutcome> {
        match self.try_show_favourites().await {
            Ok(outcome) => Some(outcome),
            Err(e) => {
                tracing::error!(error = %e, "Error loading favourites");
                None
            }
        }
    }

    async fn try_show_favourites(&self) -> Result<FavouritesOutcome, CatalogError> {
        let generation = self.issue_ticket();
        let favorites = self.api.list_favorites().await?;

        if !self.commit(generation) {
            return Ok(FavouritesOutcome::Superseded);
        }

        if favorites.is_empty() {
            tracing::warn!("No favourites found");
            let panel = InfoPanel::NoFavourites;
            return Ok(if self.emit(GalleryMessage::Info { generation, panel }).await {
                FavouritesOutcome::Empty
            } else {
                FavouritesOutcome::Superseded
            });
        }

        if !self.emit(GalleryMessage::ClearCarousel { generation }).await {
            return Ok(FavouritesOutcome::Superseded);
        }

        let mut items = 0;
        for favorite in &favorites {
            let Some(image) = favorite.displayable_image() else {
                tracing::warn!(favorite_id = %favorite.id, "Favourite has no displayable image");
                continue;
            };
            let item = CarouselItem::from(image);
            if !self
                .emit(GalleryMessage::AppendCarousel { generation, item })
                .await
            {
                return Ok(FavouritesOutcome::Superseded);
            }
            items += 1;
        }

        let panel = InfoPanel::Favourites;
        if !self.emit(GalleryMessage::Info { generation, panel }).await
            || !self.emit(GalleryMessage::StartCarousel { generation }).await
        {
            return Ok(FavouritesOutcome::Superseded);
        }

        self.enter_state(generation, FlowState::FavoritesLoaded).await;
        tracing::info!(items, %generation, "Favourites loaded");

        Ok(FavouritesOutcome::Loaded { items })
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    fn issue_ticket(&self) -> Generation {
        Generation(self.tickets.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Make `generation` the current one unless a newer flow already committed
    fn commit(&self, generation: Generation) -> bool {
        let previous = self.generation.fetch_max(generation.0, Ordering::SeqCst);
        if previous > generation.0 {
            tracing::debug!(%generation, current = previous, "Flow superseded before commit");
            return false;
        }
        true
    }

    fn is_current(&self, generation: Generation) -> bool {
        self.generation.load(Ordering::SeqCst) == generation.0
    }

    /// Send a carousel-scoped message if `generation` is still the newest
    async fn emit(&self, msg: GalleryMessage) -> bool {
        if let Some(generation) = msg.generation() {
            if !self.is_current(generation) {
                tracing::debug!(
                    %generation,
                    current = %self.generation(),
                    "Dropping output of superseded flow"
                );
                return false;
            }
        }
        self.send(msg).await;
        true
    }

    async fn enter_state(&self, generation: Generation, state: FlowState) {
        if !self.is_current(generation) {
            return;
        }
        self.context.write().state = state;
        self.send(GalleryMessage::State { state }).await;
    }

    /// Send a message to the surface
    async fn send(&self, msg: GalleryMessage) {
        if let Err(e) = self.tx.send(msg).await {
            tracing::warn!("Failed to send message to surface: {}", e);
        }
    }
}
