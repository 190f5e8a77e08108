//! Surface Events
//!
//! Events sent from presentation surfaces to the Conductor.
//!
//! Surfaces forward what the user did without interpreting it; the Conductor
//! decides which catalog calls to make and what to render.

use serde::{Deserialize, Serialize};

/// Events from surface to Conductor
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SurfaceEvent {
    /// The breed selector value changed
    BreedSelected {
        /// Newly selected breed id
        breed_id: String,
    },

    /// The favourite control of a carousel item was activated
    FavoriteToggled {
        /// Image shown by that item
        image_id: String,
    },

    /// The "get favourites" control was activated
    FavouritesRequested,

    /// User requested quit
    QuitRequested,
}

impl SurfaceEvent {
    /// Short event name for logs
    pub fn name(&self) -> &'static str {
        match self {
            Self::BreedSelected { .. } => "breed_selected",
            Self::FavoriteToggled { .. } => "favorite_toggled",
            Self::FavouritesRequested => "favourites_requested",
            Self::QuitRequested => "quit_requested",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names() {
        let event = SurfaceEvent::BreedSelected {
            breed_id: "abys".to_string(),
        };
        assert_eq!(event.name(), "breed_selected");
        assert_eq!(SurfaceEvent::FavouritesRequested.name(), "favourites_requested");
    }

    #[test]
    fn test_event_round_trip() {
        let event = SurfaceEvent::FavoriteToggled {
            image_id: "img1".to_string(),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(serde_json::from_str::<SurfaceEvent>(&json).unwrap(), event);
    }
}
