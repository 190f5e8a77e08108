//! Catalog Errors
//!
//! Every remote call fails with a [`CatalogError`] naming the [`Endpoint`]
//! it was talking to. Malformed elements inside an otherwise valid array are
//! not errors; they are reported as [`ElementSkipped`] and dropped.

use std::fmt;

use reqwest::StatusCode;
use thiserror::Error;

/// The remote operations the catalog client performs
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// `GET /v1/breeds`
    ListBreeds,
    /// `GET /v1/images/search`
    SearchImages,
    /// `GET /v1/favourites`
    ListFavourites,
    /// `POST /v1/favourites`
    AddFavourite,
    /// `DELETE /v1/favourites/{id}`
    RemoveFavourite,
}

impl Endpoint {
    /// HTTP method name
    pub fn method(self) -> &'static str {
        match self {
            Self::ListBreeds | Self::SearchImages | Self::ListFavourites => "GET",
            Self::AddFavourite => "POST",
            Self::RemoveFavourite => "DELETE",
        }
    }

    /// Path template
    pub fn path(self) -> &'static str {
        match self {
            Self::ListBreeds => "/v1/breeds",
            Self::SearchImages => "/v1/images/search",
            Self::ListFavourites | Self::AddFavourite => "/v1/favourites",
            Self::RemoveFavourite => "/v1/favourites/{id}",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method(), self.path())
    }
}

/// Errors from the remote catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The server answered with a non-success status
    #[error("{endpoint} returned HTTP {status}")]
    Remote {
        /// Response status
        status: StatusCode,
        /// Endpoint that failed
        endpoint: Endpoint,
    },

    /// The body parsed but did not have the expected structure
    #[error("{endpoint} returned an unexpected response shape")]
    Shape {
        /// Endpoint that failed
        endpoint: Endpoint,
    },

    /// The request could not be sent or the body could not be read
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        /// Endpoint that failed
        endpoint: Endpoint,
        /// Underlying HTTP error
        #[source]
        source: reqwest::Error,
    },

    /// The body was not JSON
    #[error("{endpoint} returned invalid JSON: {source}")]
    Decode {
        /// Endpoint that failed
        endpoint: Endpoint,
        /// Underlying parse error
        #[source]
        source: serde_json::Error,
    },

    /// A request URL could not be built from the configured base URL
    #[error("cannot build a URL for {endpoint} from {base_url:?}")]
    InvalidUrl {
        /// Endpoint whose URL was being built
        endpoint: Endpoint,
        /// Configured base URL
        base_url: String,
    },

    /// The HTTP client could not be constructed
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl CatalogError {
    /// Endpoint the error came from, if any
    pub fn endpoint(&self) -> Option<Endpoint> {
        match self {
            Self::Remote { endpoint, .. }
            | Self::Shape { endpoint }
            | Self::Transport { endpoint, .. }
            | Self::Decode { endpoint, .. }
            | Self::InvalidUrl { endpoint, .. } => Some(*endpoint),
            Self::Client(_) => None,
        }
    }

    /// HTTP status for [`CatalogError::Remote`]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// A malformed array element that was dropped
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ElementSkipped {
    /// Endpoint whose response contained the element
    pub endpoint: Endpoint,
    /// Position in the response array
    pub index: usize,
    /// Why the element was rejected
    pub reason: String,
}

impl fmt::Display for ElementSkipped {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "skipped element {} from {}: {}",
            self.index, self.endpoint, self.reason
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_display() {
        assert_eq!(Endpoint::ListBreeds.to_string(), "GET /v1/breeds");
        assert_eq!(Endpoint::AddFavourite.to_string(), "POST /v1/favourites");
        assert_eq!(
            Endpoint::RemoveFavourite.to_string(),
            "DELETE /v1/favourites/{id}"
        );
    }

    #[test]
    fn test_remote_error_accessors() {
        let err = CatalogError::Remote {
            status: StatusCode::UNAUTHORIZED,
            endpoint: Endpoint::ListFavourites,
        };

        assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));
        assert_eq!(err.endpoint(), Some(Endpoint::ListFavourites));
        assert_eq!(
            err.to_string(),
            "GET /v1/favourites returned HTTP 401 Unauthorized"
        );
    }

    #[test]
    fn test_shape_error_display() {
        let err = CatalogError::Shape {
            endpoint: Endpoint::SearchImages,
        };
        assert!(err.status().is_none());
        assert_eq!(
            err.to_string(),
            "GET /v1/images/search returned an unexpected response shape"
        );
    }

    #[test]
    fn test_element_skipped_display() {
        let skipped = ElementSkipped {
            endpoint: Endpoint::ListBreeds,
            index: 3,
            reason: "missing field `name`".to_string(),
        };
        assert_eq!(
            skipped.to_string(),
            "skipped element 3 from GET /v1/breeds: missing field `name`"
        );
    }
}
