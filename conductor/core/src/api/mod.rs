//! Remote Catalog Integration
//!
//! This module provides access to the cat catalog (TheCatAPI) through a
//! common trait interface, so the Conductor can be driven by the real HTTP
//! client or by an in-memory catalog in tests.
//!
//! # Available Catalogs
//!
//! - **TheCatAPI**: [`CatApiClient`], the remote REST catalog (default)
//! - **In-memory**: [`InMemoryCatalog`], canned data with failure injection
//!
//! # Usage
//!
//! ```ignore
//! use whiskers_core::api::{CatApiClient, CatalogApi};
//! use whiskers_core::config::ApiConfig;
//!
//! let client = CatApiClient::new(&ApiConfig::from_env())?;
//! let breeds = client.list_breeds().await?;
//! let images = client.search_images(&breeds[0].id, 10).await?;
//! ```

mod decode;
mod http;
mod memory;
mod traits;

pub use decode::{decode_array, Decoded, RemoteRecord};
pub use http::CatApiClient;
pub use memory::InMemoryCatalog;
pub use traits::CatalogApi;
