//! Response Shape Validation
//!
//! Array responses are validated in two stages: the body must be a JSON
//! array, then each element is converted on its own. A bad element is
//! reported as [`ElementSkipped`] and dropped; only a non-array body fails
//! the whole call.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{CatalogError, ElementSkipped, Endpoint};
use crate::models::{Breed, BreedImage, Favorite};

/// A record that can be decoded from one element of an array response
pub trait RemoteRecord: DeserializeOwned {
    /// Check required fields that deserialization alone cannot enforce
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }
}

fn require(field: &str, value: &str) -> Result<(), String> {
    if value.is_empty() {
        Err(format!("empty `{field}`"))
    } else {
        Ok(())
    }
}

impl RemoteRecord for Breed {
    fn validate(&self) -> Result<(), String> {
        require("id", &self.id)?;
        require("name", &self.name)
    }
}

impl RemoteRecord for BreedImage {
    fn validate(&self) -> Result<(), String> {
        require("id", &self.id)?;
        require("url", &self.url)
    }
}

impl RemoteRecord for Favorite {
    fn validate(&self) -> Result<(), String> {
        require("id", &self.id)?;
        require("image_id", &self.image_id)
    }
}

/// Records decoded from an array response
#[derive(Debug)]
pub struct Decoded<T> {
    /// Elements that passed validation, in response order
    pub records: Vec<T>,
    /// Elements that were dropped
    pub skipped: Vec<ElementSkipped>,
}

impl<T> Decoded<T> {
    /// Log every skipped element and return the records
    pub fn into_records(self) -> Vec<T> {
        for skipped in &self.skipped {
            tracing::warn!(
                endpoint = %skipped.endpoint,
                index = skipped.index,
                reason = %skipped.reason,
                "Skipping malformed element"
            );
        }
        self.records
    }
}

/// Decode an array response body
///
/// # Errors
///
/// [`CatalogError::Decode`] if the body is not JSON, [`CatalogError::Shape`]
/// if it is JSON but not an array.
pub fn decode_array<T: RemoteRecord>(
    endpoint: Endpoint,
    body: &[u8],
) -> Result<Decoded<T>, CatalogError> {
    let value: Value =
        serde_json::from_slice(body).map_err(|source| CatalogError::Decode { endpoint, source })?;

    let Value::Array(elements) = value else {
        return Err(CatalogError::Shape { endpoint });
    };

    let mut records = Vec::with_capacity(elements.len());
    let mut skipped = Vec::new();

    for (index, element) in elements.into_iter().enumerate() {
        let record = serde_json::from_value::<T>(element)
            .map_err(|e| e.to_string())
            .and_then(|record| record.validate().map(|()| record));

        match record {
            Ok(record) => records.push(record),
            Err(reason) => skipped.push(ElementSkipped {
                endpoint,
                index,
                reason,
            }),
        }
    }

    Ok(Decoded { records, skipped })
}
