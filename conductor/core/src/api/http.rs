//! TheCatAPI Client
//!
//! HTTP implementation of [`CatalogApi`] for TheCatAPI.
//!
//! # TheCatAPI
//!
//! - `GET /v1/breeds` - List breeds
//! - `GET /v1/images/search?breed_id=&limit=` - Images of one breed
//! - `GET /v1/favourites` - List favourites
//! - `POST /v1/favourites` - Create a favourite (`{"image_id": ...}`)
//! - `DELETE /v1/favourites/{id}` - Delete a favourite
//!
//! Every request carries the API key as the `api_key` query parameter.

use async_trait::async_trait;
use reqwest::RequestBuilder;
use serde::Deserialize;
use serde_json::Value;

use super::decode::decode_array;
use super::traits::CatalogApi;
use crate::config::ApiConfig;
use crate::error::{CatalogError, Endpoint};
use crate::models::{Breed, BreedImage, Favorite};

/// Body of a successful `POST /v1/favourites`
#[derive(Debug, Deserialize)]
struct CreatedFavorite {
    id: Value,
    #[serde(default)]
    message: Option<String>,
}

/// TheCatAPI client
#[derive(Clone)]
pub struct CatApiClient {
    /// Base URL without trailing slash
    base_url: String,
    /// API key sent with every request
    api_key: String,
    /// HTTP client
    http_client: reqwest::Client,
}

impl std::fmt::Debug for CatApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatApiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl CatApiClient {
    /// Create a client from configuration
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Client`] if the HTTP client cannot be built.
    pub fn new(config: &ApiConfig) -> Result<Self, CatalogError> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(CatalogError::Client)?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            http_client,
        })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// URL of a single record under the favourites collection
    ///
    /// The id is appended as one escaped path segment.
    fn record_url(&self, endpoint: Endpoint, id: &str) -> Result<reqwest::Url, CatalogError> {
        let invalid = || CatalogError::InvalidUrl {
            endpoint,
            base_url: self.base_url.clone(),
        };
        let mut url = reqwest::Url::parse(&self.url(Endpoint::ListFavourites.path()))
            .map_err(|_| invalid())?;
        url.path_segments_mut()
            .map_err(|()| invalid())?
            .pop_if_empty()
            .push(id);
        Ok(url)
    }

    /// Attach the key, send, and return the body of a successful response
    async fn execute(
        &self,
        endpoint: Endpoint,
        request: RequestBuilder,
    ) -> Result<Vec<u8>, CatalogError> {
        let response = request
            .query(&[("api_key", self.api_key.as_str())])
            .send()
            .await
            .map_err(|source| CatalogError::Transport { endpoint, source })?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(endpoint = %endpoint, status = %status, "Catalog request failed");
            return Err(CatalogError::Remote { status, endpoint });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| CatalogError::Transport { endpoint, source })?;
        Ok(body.to_vec())
    }
}

#[async_trait]
impl CatalogApi for CatApiClient {
    fn name(&self) -> &str {
        "TheCatAPI"
    }

    async fn list_breeds(&self) -> Result<Vec<Breed>, CatalogError> {
        let endpoint = Endpoint::ListBreeds;
        let request = self.http_client.get(self.url(endpoint.path()));
        let body = self.execute(endpoint, request).await?;
        Ok(decode_array(endpoint, &body)?.into_records())
    }

    async fn search_images(
        &self,
        breed_id: &str,
        limit: u32,
    ) -> Result<Vec<BreedImage>, CatalogError> {
        let endpoint = Endpoint::SearchImages;
        let request = self
            .http_client
            .get(self.url(endpoint.path()))
            .query(&[("breed_id", breed_id.to_string()), ("limit", limit.to_string())]);
        let body = self.execute(endpoint, request).await?;
        Ok(decode_array(endpoint, &body)?.into_records())
    }

    async fn list_favorites(&self) -> Result<Vec<Favorite>, CatalogError> {
        let endpoint = Endpoint::ListFavourites;
        let request = self.http_client.get(self.url(endpoint.path()));
        let body = self.execute(endpoint, request).await?;
        Ok(decode_array(endpoint, &body)?.into_records())
    }

    async fn add_favorite(&self, image_id: &str) -> Result<Favorite, CatalogError> {
        let endpoint = Endpoint::AddFavourite;
        let request = self
            .http_client
            .post(self.url(endpoint.path()))
            .json(&serde_json::json!({ "image_id": image_id }));
        let body = self.execute(endpoint, request).await?;

        let created: CreatedFavorite = serde_json::from_slice::<Value>(&body)
            .map_err(|source| CatalogError::Decode { endpoint, source })
            .and_then(|v| {
                serde_json::from_value(v).map_err(|_| CatalogError::Shape { endpoint })
            })?;

        let id = match created.id {
            Value::String(id) if !id.is_empty() => id,
            Value::Number(id) => id.to_string(),
            _ => return Err(CatalogError::Shape { endpoint }),
        };

        tracing::debug!(
            favorite_id = %id,
            message = created.message.as_deref().unwrap_or(""),
            "Favourite record created"
        );

        Ok(Favorite::new(id, image_id))
    }

    async fn remove_favorite(&self, favorite_id: &str) -> Result<(), CatalogError> {
        let endpoint = Endpoint::RemoveFavourite;
        let request = self.http_client.delete(self.record_url(endpoint, favorite_id)?);
        self.execute(endpoint, request).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use httpmock::prelude::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn client_for(server: &MockServer) -> CatApiClient {
        let config = ApiConfig {
            base_url: server.base_url(),
            api_key: "test-key".to_string(),
            timeout: Duration::from_secs(5),
        };
        CatApiClient::new(&config).unwrap()
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let config = ApiConfig {
            base_url: "https://api.thecatapi.com/".to_string(),
            ..ApiConfig::default()
        };
        let client = CatApiClient::new(&config).unwrap();
        assert_eq!(client.base_url(), "https://api.thecatapi.com");
        assert_eq!(client.url("/v1/breeds"), "https://api.thecatapi.com/v1/breeds");
    }

    #[tokio::test]
    async fn test_list_breeds_sends_key_and_skips_malformed() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/v1/breeds")
                    .query_param("api_key", "test-key");
                then.status(200).json_body(json!([
                    {"id": "abys", "name": "Abyssinian", "origin": "Egypt"},
                    {"id": "nameless"},
                    {"id": "beng", "name": "Bengal"}
                ]));
            })
            .await;

        let breeds = client_for(&server).list_breeds().await.unwrap();

        mock.assert_async().await;
        let names: Vec<_> = breeds.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["Abyssinian", "Bengal"]);
        assert_eq!(breeds[0].origin.as_deref(), Some("Egypt"));
    }

    #[tokio::test]
    async fn test_search_images_query() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/v1/images/search")
                    .query_param("breed_id", "abys")
                    .query_param("limit", "10")
                    .query_param("api_key", "test-key");
                then.status(200).json_body(json!([
                    {
                        "id": "a1",
                        "url": "https://cdn/a1.jpg",
                        "breeds": [{"id": "abys", "name": "Abyssinian", "description": "Active"}]
                    },
                    {"id": "a2", "url": "https://cdn/a2.jpg"}
                ]));
            })
            .await;

        let images = client_for(&server).search_images("abys", 10).await.unwrap();

        mock.assert_async().await;
        assert_eq!(images.len(), 2);
        assert_eq!(images[0].caption(), "Active");
        assert!(images[1].breeds.is_empty());
    }

    #[tokio::test]
    async fn test_search_images_empty_is_ok() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/v1/images/search");
                then.status(200).json_body(json!([]));
            })
            .await;

        let images = client_for(&server).search_images("none", 10).await.unwrap();
        assert!(images.is_empty());
    }

    #[tokio::test]
    async fn test_non_success_status_is_remote_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/v1/favourites");
                then.status(401).body("AUTHENTICATION_ERROR");
            })
            .await;

        let err = client_for(&server).list_favorites().await.unwrap_err();
        assert_eq!(err.status(), Some(reqwest::StatusCode::UNAUTHORIZED));
        assert_eq!(err.endpoint(), Some(Endpoint::ListFavourites));
    }

    #[tokio::test]
    async fn test_object_body_is_shape_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/v1/breeds");
                then.status(200).json_body(json!({"message": "nope"}));
            })
            .await;

        let err = client_for(&server).list_breeds().await.unwrap_err();
        assert!(matches!(err, CatalogError::Shape { .. }));
    }

    #[tokio::test]
    async fn test_add_favorite_posts_json() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/v1/favourites")
                    .query_param("api_key", "test-key")
                    .header("content-type", "application/json")
                    .json_body(json!({"image_id": "img1"}));
                then.status(200)
                    .json_body(json!({"message": "SUCCESS", "id": 232_413_577}));
            })
            .await;

        let favorite = client_for(&server).add_favorite("img1").await.unwrap();

        mock.assert_async().await;
        assert_eq!(favorite, Favorite::new("232413577", "img1"));
    }

    #[tokio::test]
    async fn test_add_favorite_without_id_is_shape_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/v1/favourites");
                then.status(200).json_body(json!({"message": "SUCCESS"}));
            })
            .await;

        let err = client_for(&server).add_favorite("img1").await.unwrap_err();
        assert!(matches!(
            err,
            CatalogError::Shape {
                endpoint: Endpoint::AddFavourite
            }
        ));
    }

    #[tokio::test]
    async fn test_remove_favorite_deletes_by_record_id() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(DELETE)
                    .path("/v1/favourites/42")
                    .query_param("api_key", "test-key");
                then.status(200).json_body(json!({"message": "SUCCESS"}));
            })
            .await;

        client_for(&server).remove_favorite("42").await.unwrap();
        mock.assert_async().await;
    }

    #[test]
    fn test_record_url_escapes_id() {
        let client = CatApiClient::new(&ApiConfig {
            base_url: "https://api.thecatapi.com/".to_string(),
            api_key: "k".to_string(),
            timeout: Duration::from_secs(5),
        })
        .unwrap();

        let url = client
            .record_url(Endpoint::RemoveFavourite, "a/b?c")
            .unwrap();
        assert_eq!(url.path(), "/v1/favourites/a%2Fb%3Fc");
        assert_eq!(url.query(), None);
    }

    #[test]
    fn test_record_url_rejects_unusable_base() {
        let client = CatApiClient::new(&ApiConfig {
            base_url: "not a url".to_string(),
            api_key: "k".to_string(),
            timeout: Duration::from_secs(5),
        })
        .unwrap();

        let err = client.record_url(Endpoint::RemoveFavourite, "42").unwrap_err();
        assert!(matches!(
            err,
            CatalogError::InvalidUrl {
                endpoint: Endpoint::RemoveFavourite,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_remove_favorite_failure() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(DELETE).path("/v1/favourites/42");
                then.status(404);
            })
            .await;

        let err = client_for(&server).remove_favorite("42").await.unwrap_err();
        assert_eq!(err.status(), Some(reqwest::StatusCode::NOT_FOUND));
    }

    #[tokio::test]
    async fn test_find_favorite_matches_image_id() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/v1/favourites");
                then.status(200).json_body(json!([
                    {"id": 1, "image_id": "other"},
                    {"id": 2, "image_id": "img1", "image": {"id": "img1", "url": "https://cdn/1.jpg"}}
                ]));
            })
            .await;

        let client = client_for(&server);
        let found = client.find_favorite("img1").await.unwrap();
        assert_eq!(found.map(|f| f.id), Some("2".to_string()));
        assert!(client.find_favorite("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_unreachable_server_is_transport_error() {
        let config = ApiConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            api_key: String::new(),
            timeout: Duration::from_secs(2),
        };
        let client = CatApiClient::new(&config).unwrap();

        let err = client.list_breeds().await.unwrap_err();
        assert!(matches!(err, CatalogError::Transport { .. }));
    }
}
