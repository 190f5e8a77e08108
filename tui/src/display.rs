//! Display State Types
//!
//! State the TUI renders, derived from `GalleryMessage`s.
//!
//! # Design Philosophy
//!
//! The TUI is a "thin client" - it just renders what the Conductor tells it to.
//! `GalleryDisplay` is the bridge between messages and rendering:
//!
//! - breed selector options and cursor
//! - carousel items, current position, and playback
//! - info panel content
//! - favourite markers reported by the Conductor
//!
//! Carousel-scoped messages older than the newest generation seen are dropped.

use std::collections::HashSet;
use std::time::{Duration, Instant};

use whiskers_core::{
    BreedOption, CarouselItem, FlowState, GalleryMessage, Generation, InfoPanel,
};

/// Carousel contents and playback position
#[derive(Clone, Debug, Default)]
pub struct Carousel {
    /// Items in append order
    pub items: Vec<CarouselItem>,
    /// Index of the item on screen
    pub position: usize,
    /// Whether auto-advance is running
    pub playing: bool,
    /// When the carousel last advanced (or started)
    last_advance: Option<Instant>,
}

impl Carousel {
    /// The item on screen
    pub fn current(&self) -> Option<&CarouselItem> {
        self.items.get(self.position)
    }

    /// Remove every item and stop playback
    pub fn clear(&mut self) {
        self.items.clear();
        self.position = 0;
        self.playing = false;
        self.last_advance = None;
    }

    /// Start playback from the first item
    pub fn start(&mut self, now: Instant) {
        self.position = 0;
        self.playing = !self.items.is_empty();
        self.last_advance = Some(now);
    }

    /// Step forward, wrapping around
    pub fn next(&mut self) {
        if !self.items.is_empty() {
            self.position = (self.position + 1) % self.items.len();
        }
    }

    /// Step back, wrapping around
    pub fn previous(&mut self) {
        if !self.items.is_empty() {
            self.position = self
                .position
                .checked_sub(1)
                .unwrap_or(self.items.len() - 1);
        }
    }

    /// Advance if playing and `interval` has elapsed since the last advance
    ///
    /// Returns true if the carousel moved.
    pub fn tick(&mut self, now: Instant, interval: Duration) -> bool {
        if !self.playing || self.items.len() < 2 {
            return false;
        }
        match self.last_advance {
            Some(last) if now.duration_since(last) >= interval => {
                self.next();
                self.last_advance = Some(now);
                true
            }
            Some(_) => false,
            None => {
                self.last_advance = Some(now);
                false
            }
        }
    }

    /// Restart the auto-advance timer (after a manual step)
    pub fn touch(&mut self, now: Instant) {
        if self.playing {
            self.last_advance = Some(now);
        }
    }
}

/// Complete display state for the gallery
#[derive(Clone, Debug, Default)]
pub struct GalleryDisplay {
    /// Flow state reported by the Conductor
    pub state: FlowState,
    /// Breed selector options
    pub breeds: Vec<BreedOption>,
    /// Highlighted selector option
    pub cursor: usize,
    /// The carousel
    pub carousel: Carousel,
    /// Info panel content
    pub info: Option<InfoPanel>,
    /// Image ids the Conductor reported as favourited
    pub favorites: HashSet<String>,
    /// Newest carousel generation applied
    generation: Generation,
}

impl GalleryDisplay {
    /// Create empty display state
    pub fn new() -> Self {
        Self::default()
    }

    /// Newest carousel generation applied
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Apply a message from the Conductor
    ///
    /// Returns false if the message was dropped as stale.
    pub fn apply_message(&mut self, msg: GalleryMessage, now: Instant) -> bool {
        if let Some(generation) = msg.generation() {
            if generation < self.generation {
                tracing::debug!(%generation, newest = %self.generation, "Ignoring stale message");
                return false;
            }
            self.generation = generation;
        }

        match msg {
            GalleryMessage::State { state } => {
                self.state = state;
            }
            GalleryMessage::PopulateBreeds { options } => {
                self.breeds = options;
                self.cursor = 0;
            }
            GalleryMessage::ClearCarousel { .. } => {
                self.carousel.clear();
            }
            GalleryMessage::AppendCarousel { item, .. } => {
                self.carousel.items.push(item);
            }
            GalleryMessage::StartCarousel { .. } => {
                self.carousel.start(now);
            }
            GalleryMessage::Info { panel, .. } => {
                self.info = Some(panel);
            }
            GalleryMessage::FavoriteChanged {
                image_id,
                favorited,
            } => {
                if favorited {
                    self.favorites.insert(image_id);
                } else {
                    self.favorites.remove(&image_id);
                }
            }
        }
        true
    }

    /// Move the selector cursor down; returns the newly selected breed id
    pub fn select_next_breed(&mut self) -> Option<String> {
        if self.cursor + 1 >= self.breeds.len() {
            return None;
        }
        self.cursor += 1;
        self.selected_breed().map(|b| b.value.clone())
    }

    /// Move the selector cursor up; returns the newly selected breed id
    pub fn select_previous_breed(&mut self) -> Option<String> {
        if self.cursor == 0 || self.breeds.is_empty() {
            return None;
        }
        self.cursor -= 1;
        self.selected_breed().map(|b| b.value.clone())
    }

    /// The highlighted selector option
    pub fn selected_breed(&self) -> Option<&BreedOption> {
        self.breeds.get(self.cursor)
    }

    /// Whether the item on screen is a known favourite
    pub fn current_is_favorite(&self) -> bool {
        self.carousel
            .current()
            .is_some_and(|item| self.favorites.contains(&item.id))
    }

    /// Position label like "2/10", empty when the carousel is empty
    pub fn position_label(&self) -> String {
        if self.carousel.items.is_empty() {
            String::new()
        } else {
            format!(
                "{}/{}",
                self.carousel.position + 1,
                self.carousel.items.len()
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn item(id: &str) -> CarouselItem {
        CarouselItem::new(format!("https://cdn/{id}.jpg"), "", id)
    }

    fn fill(display: &mut GalleryDisplay, generation: u64, ids: &[&str], now: Instant) {
        let generation = Generation(generation);
        display.apply_message(GalleryMessage::ClearCarousel { generation }, now);
        for id in ids {
            display.apply_message(
                GalleryMessage::AppendCarousel {
                    generation,
                    item: item(id),
                },
                now,
            );
        }
        display.apply_message(GalleryMessage::StartCarousel { generation }, now);
    }

    #[test]
    fn test_fill_and_start() {
        let now = Instant::now();
        let mut display = GalleryDisplay::new();
        fill(&mut display, 1, &["a", "b", "c"], now);

        assert_eq!(display.carousel.items.len(), 3);
        assert!(display.carousel.playing);
        assert_eq!(display.carousel.current().map(|i| i.id.as_str()), Some("a"));
        assert_eq!(display.position_label(), "1/3");
    }

    #[test]
    fn test_stale_generation_dropped() {
        let now = Instant::now();
        let mut display = GalleryDisplay::new();
        fill(&mut display, 2, &["new"], now);

        let applied = display.apply_message(
            GalleryMessage::AppendCarousel {
                generation: Generation(1),
                item: item("old"),
            },
            now,
        );

        assert!(!applied);
        assert_eq!(display.carousel.items.len(), 1);
        assert_eq!(display.generation(), Generation(2));
    }

    #[test]
    fn test_clear_stops_playback() {
        let now = Instant::now();
        let mut display = GalleryDisplay::new();
        fill(&mut display, 1, &["a", "b"], now);

        display.apply_message(
            GalleryMessage::ClearCarousel {
                generation: Generation(2),
            },
            now,
        );

        assert!(display.carousel.items.is_empty());
        assert!(!display.carousel.playing);
        assert_eq!(display.position_label(), "");
    }

    #[test]
    fn test_auto_advance_wraps() {
        let start = Instant::now();
        let interval = Duration::from_secs(3);
        let mut display = GalleryDisplay::new();
        fill(&mut display, 1, &["a", "b"], start);

        assert!(!display.carousel.tick(start + Duration::from_secs(1), interval));
        assert!(display.carousel.tick(start + Duration::from_secs(3), interval));
        assert_eq!(display.carousel.position, 1);
        assert!(display.carousel.tick(start + Duration::from_secs(6), interval));
        assert_eq!(display.carousel.position, 0);
    }

    #[test]
    fn test_manual_step_wraps_backwards() {
        let now = Instant::now();
        let mut display = GalleryDisplay::new();
        fill(&mut display, 1, &["a", "b", "c"], now);

        display.carousel.previous();
        assert_eq!(display.carousel.position, 2);
        display.carousel.next();
        assert_eq!(display.carousel.position, 0);
    }

    #[test]
    fn test_breed_cursor_bounds() {
        let now = Instant::now();
        let mut display = GalleryDisplay::new();
        assert_eq!(display.select_next_breed(), None);

        display.apply_message(
            GalleryMessage::PopulateBreeds {
                options: vec![
                    BreedOption {
                        value: "abys".to_string(),
                        label: "Abyssinian".to_string(),
                    },
                    BreedOption {
                        value: "beng".to_string(),
                        label: "Bengal".to_string(),
                    },
                ],
            },
            now,
        );

        assert_eq!(display.select_previous_breed(), None);
        assert_eq!(display.select_next_breed().as_deref(), Some("beng"));
        assert_eq!(display.select_next_breed(), None);
        assert_eq!(display.select_previous_breed().as_deref(), Some("abys"));
    }

    #[test]
    fn test_favorite_markers() {
        let now = Instant::now();
        let mut display = GalleryDisplay::new();
        fill(&mut display, 1, &["a"], now);

        display.apply_message(
            GalleryMessage::FavoriteChanged {
                image_id: "a".to_string(),
                favorited: true,
            },
            now,
        );
        assert!(display.current_is_favorite());

        display.apply_message(
            GalleryMessage::FavoriteChanged {
                image_id: "a".to_string(),
                favorited: false,
            },
            now,
        );
        assert!(!display.current_is_favorite());
    }

    #[test]
    fn test_favorite_change_ignores_generation() {
        let now = Instant::now();
        let mut display = GalleryDisplay::new();
        fill(&mut display, 5, &["a"], now);

        assert!(display.apply_message(
            GalleryMessage::FavoriteChanged {
                image_id: "b".to_string(),
                favorited: true,
            },
            now,
        ));
        assert!(display.favorites.contains("b"));
    }
}
