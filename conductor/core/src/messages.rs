//! Gallery Messages
//!
//! Messages sent from the Conductor to presentation surfaces.
//!
//! # Design Philosophy
//!
//! Surfaces are pure renderers: they clear, fill, and start the carousel and
//! the info panel exactly as they are told. The decision of what to render
//! for a given catalog answer lives in the Conductor.
//!
//! Carousel-affecting messages carry the [`Generation`] of the flow that
//! produced them. A surface may drop messages from a generation older than
//! the newest it has seen.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::{BreedOption, CarouselItem, InfoPanel};

/// Sequence number of a carousel-mode flow
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Generation(pub u64);

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "gen{}", self.0)
    }
}

/// Synchronization flow state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlowState {
    /// Breeds not loaded yet (or the initial load failed)
    #[default]
    Uninitialized,
    /// Breed selector populated, carousel not filled yet
    BreedsLoaded,
    /// Carousel shows images of the selected breed
    ImagesLoaded,
    /// Carousel shows the user's favourites
    FavoritesLoaded,
}

impl FlowState {
    /// Whether breeds have been loaded (selector populated)
    pub fn breeds_loaded(self) -> bool {
        !matches!(self, Self::Uninitialized)
    }

    /// Whether the carousel is in one of its two display modes
    pub fn is_carousel_mode(self) -> bool {
        matches!(self, Self::ImagesLoaded | Self::FavoritesLoaded)
    }
}

impl fmt::Display for FlowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Uninitialized => "uninitialized",
            Self::BreedsLoaded => "breeds loaded",
            Self::ImagesLoaded => "images loaded",
            Self::FavoritesLoaded => "favourites loaded",
        };
        f.write_str(name)
    }
}

/// Messages from Conductor to surface
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GalleryMessage {
    /// Flow state changed
    State {
        /// New state
        state: FlowState,
    },

    /// Fill the breed selector; the first option is selected
    PopulateBreeds {
        /// Options in display order
        options: Vec<BreedOption>,
    },

    /// Remove every carousel item and stop playback
    ClearCarousel {
        /// Flow that issued the command
        generation: Generation,
    },

    /// Append one item to the carousel
    AppendCarousel {
        /// Flow that issued the command
        generation: Generation,
        /// The item to append
        item: CarouselItem,
    },

    /// Start (or restart) carousel playback from the first item
    StartCarousel {
        /// Flow that issued the command
        generation: Generation,
    },

    /// Replace the info panel content
    Info {
        /// Flow that issued the command
        generation: Generation,
        /// New panel content
        panel: InfoPanel,
    },

    /// The remote favourite state of an image changed
    FavoriteChanged {
        /// Image that was toggled
        image_id: String,
        /// Whether the image is now a favourite
        favorited: bool,
    },
}

impl GalleryMessage {
    /// Generation of the flow that produced this message, if it is carousel-scoped
    pub fn generation(&self) -> Option<Generation> {
        match self {
            Self::ClearCarousel { generation }
            | Self::AppendCarousel { generation, .. }
            | Self::StartCarousel { generation }
            | Self::Info { generation, .. } => Some(*generation),
            Self::State { .. } | Self::PopulateBreeds { .. } | Self::FavoriteChanged { .. } => {
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flow_state_predicates() {
        assert!(!FlowState::Uninitialized.breeds_loaded());
        assert!(FlowState::BreedsLoaded.breeds_loaded());
        assert!(!FlowState::BreedsLoaded.is_carousel_mode());
        assert!(FlowState::ImagesLoaded.is_carousel_mode());
        assert!(FlowState::FavoritesLoaded.is_carousel_mode());
    }

    #[test]
    fn test_generation_ordering() {
        assert!(Generation(2) > Generation(1));
        assert_eq!(Generation(7).to_string(), "gen7");
    }

    #[test]
    fn test_message_generation() {
        let msg = GalleryMessage::AppendCarousel {
            generation: Generation(3),
            item: CarouselItem::new("u", "", "id"),
        };
        assert_eq!(msg.generation(), Some(Generation(3)));

        let msg = GalleryMessage::FavoriteChanged {
            image_id: "id".to_string(),
            favorited: true,
        };
        assert_eq!(msg.generation(), None);
    }

    #[test]
    fn test_message_serialization() {
        let msg = GalleryMessage::Info {
            generation: Generation(1),
            panel: InfoPanel::NoImages,
        };
        let json = serde_json::to_string(&msg).unwrap();
        let parsed: GalleryMessage = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, msg);
    }
}
