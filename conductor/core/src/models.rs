//! Catalog Records
//!
//! Records decoded from TheCatAPI responses, plus the presentation-only
//! projections the Conductor hands to surfaces.
//!
//! Decoding is lenient about identifier types: TheCatAPI returns favourite
//! record ids as JSON numbers and image ids as strings, so every id is
//! normalized to a `String` at this boundary. Nested data that is malformed
//! (a breed without a name inside an image, an empty `image: {}` on a
//! favourite whose image was deleted) is dropped rather than failing the
//! enclosing record.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Normalizes string-or-number identifiers to `String`.
mod remote_id {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(serde_json::Number),
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(text) => text,
            RawId::Number(number) => number.to_string(),
        })
    }
}

/// A cat breed
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breed {
    /// Breed identifier (e.g. `abys`)
    #[serde(deserialize_with = "remote_id::deserialize")]
    pub id: String,
    /// Display name
    pub name: String,
    /// Country of origin
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    /// Comma-separated temperament traits
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperament: Option<String>,
    /// Free-text description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Breed {
    /// Create a breed with only the required fields
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            origin: None,
            temperament: None,
            description: None,
        }
    }

    /// Set origin
    #[must_use]
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    /// Set temperament
    #[must_use]
    pub fn with_temperament(mut self, temperament: impl Into<String>) -> Self {
        self.temperament = Some(temperament.into());
        self
    }

    /// Set description
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// An image returned by the breed image search
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreedImage {
    /// Image identifier
    #[serde(deserialize_with = "remote_id::deserialize")]
    pub id: String,
    /// Image URL
    pub url: String,
    /// Breeds attached to this image (may be empty)
    #[serde(default, deserialize_with = "lenient_breeds")]
    pub breeds: Vec<Breed>,
}

impl BreedImage {
    /// Create an image with no breed metadata
    pub fn new(id: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
            breeds: Vec::new(),
        }
    }

    /// Attach a breed
    #[must_use]
    pub fn with_breed(mut self, breed: Breed) -> Self {
        self.breeds.push(breed);
        self
    }

    /// The first associated breed, if any
    pub fn primary_breed(&self) -> Option<&Breed> {
        self.breeds.first()
    }

    /// Carousel caption: the primary breed's description, or empty
    pub fn caption(&self) -> &str {
        self.primary_breed()
            .and_then(|b| b.description.as_deref())
            .unwrap_or("")
    }
}

fn lenient_breeds<'de, D>(deserializer: D) -> Result<Vec<Breed>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Vec<Value>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .filter_map(|v| serde_json::from_value(v).ok())
        .collect())
}

/// The image nested inside a favourite record
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteImage {
    /// Image identifier
    #[serde(deserialize_with = "remote_id::deserialize")]
    pub id: String,
    /// Image URL
    pub url: String,
}

/// A favourite record
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Favorite {
    /// Favourite record identifier (used for deletion)
    #[serde(deserialize_with = "remote_id::deserialize")]
    pub id: String,
    /// The favourited image
    #[serde(deserialize_with = "remote_id::deserialize")]
    pub image_id: String,
    /// Nested image, absent on create responses and for deleted images
    #[serde(
        default,
        deserialize_with = "lenient_image",
        skip_serializing_if = "Option::is_none"
    )]
    pub image: Option<FavoriteImage>,
}

impl Favorite {
    /// Create a favourite record without a nested image
    pub fn new(id: impl Into<String>, image_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            image_id: image_id.into(),
            image: None,
        }
    }

    /// Attach a nested image
    #[must_use]
    pub fn with_image(mut self, id: impl Into<String>, url: impl Into<String>) -> Self {
        self.image = Some(FavoriteImage {
            id: id.into(),
            url: url.into(),
        });
        self
    }

    /// The nested image if it can be displayed (has a non-empty url)
    pub fn displayable_image(&self) -> Option<&FavoriteImage> {
        self.image.as_ref().filter(|image| !image.url.is_empty())
    }
}

fn lenient_image<'de, D>(deserializer: D) -> Result<Option<FavoriteImage>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Value> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|v| serde_json::from_value(v).ok()))
}

// ============================================================================
// Presentation projections
// ============================================================================

/// A single carousel entry
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarouselItem {
    /// Image URL
    pub url: String,
    /// Caption text (may be empty)
    pub description: String,
    /// Image identifier, reported back on favourite toggles
    pub id: String,
}

impl CarouselItem {
    /// Carousel item factory
    pub fn new(
        url: impl Into<String>,
        description: impl Into<String>,
        id: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            description: description.into(),
            id: id.into(),
        }
    }
}

impl From<&BreedImage> for CarouselItem {
    fn from(image: &BreedImage) -> Self {
        Self::new(image.url.clone(), image.caption(), image.id.clone())
    }
}

impl From<&FavoriteImage> for CarouselItem {
    fn from(image: &FavoriteImage) -> Self {
        Self::new(image.url.clone(), "", image.id.clone())
    }
}

/// One entry of the breed selector
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreedOption {
    /// Option value (breed id)
    pub value: String,
    /// Option label (breed name)
    pub label: String,
}

impl From<&Breed> for BreedOption {
    fn from(breed: &Breed) -> Self {
        Self {
            value: breed.id.clone(),
            label: breed.name.clone(),
        }
    }
}

/// Content of the informational panel
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum InfoPanel {
    /// Metadata of the breed shown in the carousel
    BreedDetails {
        /// Country of origin
        origin: Option<String>,
        /// Temperament traits
        temperament: Option<String>,
        /// Description
        description: Option<String>,
    },
    /// The image search came back empty
    NoImages,
    /// Images were found but none carried breed metadata
    NoAdditionalInfo,
    /// The favourites list is empty
    NoFavourites,
    /// Header shown above the favourites carousel
    Favourites,
}

impl InfoPanel {
    /// Panel showing a breed's metadata
    pub fn breed_details(breed: &Breed) -> Self {
        Self::BreedDetails {
            origin: breed.origin.clone(),
            temperament: breed.temperament.clone(),
            description: breed.description.clone(),
        }
    }

    /// Render the panel as display lines
    pub fn lines(&self) -> Vec<String> {
        fn field(label: &str, value: Option<&String>) -> String {
            format!("{label}: {}", value.map_or("Unknown", String::as_str))
        }

        match self {
            Self::BreedDetails {
                origin,
                temperament,
                description,
            } => vec![
                field("Origin", origin.as_ref()),
                field("Temperament", temperament.as_ref()),
                field("Description", description.as_ref()),
            ],
            Self::NoImages => vec!["No images available for this breed.".to_string()],
            Self::NoAdditionalInfo => {
                vec!["No additional information available for this breed.".to_string()]
            }
            Self::NoFavourites => vec!["You have no favourite images.".to_string()],
            Self::Favourites => vec!["These are your favourites.".to_string()],
        }
    }
}

impl fmt::Display for InfoPanel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.lines().join("\n"))
    }
}
