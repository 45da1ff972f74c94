//! # Remote Data Client
//!
//! Read-only client for the character API. Wraps a shared
//! [`reqwest::Client`] with the base URL, a request timeout, and the
//! transport-to-domain error mapping.
//!
//! Two behaviors matter to callers:
//!
//! - A 404 on a *collection* query under active filters means "nothing
//!   matched" and resolves to an empty page, not an error. A 404 on a
//!   *single entity* is a genuine [`ChardexError::NotFound`].
//! - Every request takes a cancellation token. A cancelled request
//!   resolves to [`ChardexError::Aborted`], which callers must treat as a
//!   neutral outcome. Superseded fetches are aborted so stale responses
//!   never overwrite fresher state.

use crate::error::{ChardexError, Result};
use crate::model::{Character, CharacterPage, FilterCriteria};
use reqwest::StatusCode;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

pub const DEFAULT_BASE_URL: &str = "https://rickandmortyapi.com/api";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client for the remote character catalog.
pub struct CharacterClient {
    http: reqwest::Client,
    base_url: String,
}

impl CharacterClient {
    pub fn new() -> Result<Self> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ChardexError::Network(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Fetch one page of characters matching the filters. A 404 here is
    /// the API's way of saying "no results" and resolves to an empty page.
    pub async fn list(
        &self,
        filters: &FilterCriteria,
        cancel: &CancellationToken,
    ) -> Result<CharacterPage> {
        let url = format!("{}/character", self.base_url);
        let params = filters.query_params();
        tracing::debug!(%url, ?params, "fetching character page");

        let response = self.send(self.http.get(&url).query(&params), cancel).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(CharacterPage::empty());
        }
        let response = check_status(response)?;

        response
            .json::<CharacterPage>()
            .await
            .map_err(|e| ChardexError::Network(format!("malformed list response: {e}")))
    }

    /// Fetch a single character. A 404 here is a genuine not-found.
    pub async fn get_by_id(&self, id: u32, cancel: &CancellationToken) -> Result<Character> {
        let url = format!("{}/character/{}", self.base_url, id);
        tracing::debug!(%url, "fetching character");

        let response = self.send(self.http.get(&url), cancel).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(ChardexError::NotFound(format!("character {}", id)));
        }
        let response = check_status(response)?;

        response
            .json::<Character>()
            .await
            .map_err(|e| ChardexError::Network(format!("malformed character response: {e}")))
    }

    async fn send(
        &self,
        request: reqwest::RequestBuilder,
        cancel: &CancellationToken,
    ) -> Result<reqwest::Response> {
        tokio::select! {
            _ = cancel.cancelled() => Err(ChardexError::Aborted),
            response = request.send() => response.map_err(|e| {
                if e.is_timeout() {
                    ChardexError::Timeout
                } else {
                    ChardexError::Network(e.to_string())
                }
            }),
        }
    }
}

fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_client_error() || status.is_server_error() {
        return Err(ChardexError::Network(format!("HTTP {}", status)));
    }
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CharacterStatus;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn character_json(id: u32, name: &str) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "name": name,
            "status": "Alive",
            "species": "Human",
            "type": "",
            "gender": "Male",
            "origin": { "name": "Earth (C-137)", "url": "" },
            "location": { "name": "Citadel of Ricks", "url": "" },
            "image": format!("https://example.test/avatar/{id}.jpeg"),
            "episode": ["https://example.test/episode/1"],
            "url": format!("https://example.test/character/{id}"),
            "created": "2017-11-04T18:48:46.250Z"
        })
    }

    async fn client(server: &MockServer) -> CharacterClient {
        CharacterClient::with_base_url(server.uri()).unwrap()
    }

    #[tokio::test]
    async fn list_parses_page_and_sends_filters() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/character"))
            .and(query_param("name", "Rick"))
            .and(query_param("status", "alive"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "info": { "count": 1, "pages": 1, "next": null, "prev": null },
                "results": [character_json(1, "Rick Sanchez")]
            })))
            .mount(&server)
            .await;

        let filters = FilterCriteria {
            name: Some("Rick".to_string()),
            status: Some(CharacterStatus::Alive),
            ..Default::default()
        };
        let page = client(&server)
            .await
            .list(&filters, &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(page.info.count, 1);
        assert_eq!(page.results[0].name, "Rick Sanchez");
    }

    #[tokio::test]
    async fn list_404_means_zero_results_not_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/character"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(serde_json::json!({ "error": "There is nothing here" })),
            )
            .mount(&server)
            .await;

        let filters = FilterCriteria {
            species: Some("Nonexistent".to_string()),
            ..Default::default()
        };
        let page = client(&server)
            .await
            .list(&filters, &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(page.info.count, 0);
        assert_eq!(page.info.pages, 0);
        assert!(page.results.is_empty());
    }

    #[tokio::test]
    async fn detail_404_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/character/9999"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = client(&server)
            .await
            .get_by_id(9999, &CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, ChardexError::NotFound(_)));
    }

    #[tokio::test]
    async fn detail_parses_a_character() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/character/1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(character_json(1, "Rick Sanchez")))
            .mount(&server)
            .await;

        let character = client(&server)
            .await
            .get_by_id(1, &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(character.id, 1);
        assert_eq!(character.status, CharacterStatus::Alive);
    }

    #[tokio::test]
    async fn server_error_maps_to_network() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/character"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let err = client(&server)
            .await
            .list(&FilterCriteria::default(), &CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, ChardexError::Network(_)));
    }

    #[tokio::test]
    async fn cancellation_resolves_to_aborted() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/character"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_delay(Duration::from_secs(30))
                    .set_body_json(serde_json::json!({
                        "info": { "count": 0, "pages": 0, "next": null, "prev": null },
                        "results": []
                    })),
            )
            .mount(&server)
            .await;

        let client = client(&server).await;
        let cancel = CancellationToken::new();
        let filters = FilterCriteria::default();
        let pending = client.list(&filters, &cancel);
        cancel.cancel();

        let err = pending.await.unwrap_err();
        assert!(err.is_aborted());
    }

    #[tokio::test]
    async fn superseding_fetch_aborts_the_first() {
        // The first request is slow; issuing a second one cancels it, so
        // only the second response can ever reach visible state.
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/character"))
            .and(query_param("name", "slow"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_delay(Duration::from_secs(30))
                    .set_body_json(serde_json::json!({
                        "info": { "count": 1, "pages": 1, "next": null, "prev": null },
                        "results": [character_json(1, "Slow")]
                    })),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/character"))
            .and(query_param("name", "fast"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "info": { "count": 1, "pages": 1, "next": null, "prev": null },
                "results": [character_json(2, "Fast")]
            })))
            .mount(&server)
            .await;

        let client = client(&server).await;
        let first_cancel = CancellationToken::new();
        let slow_filters = FilterCriteria {
            name: Some("slow".to_string()),
            ..Default::default()
        };
        let first = client.list(&slow_filters, &first_cancel);

        // Supersede: abort the in-flight request, then fetch fresh.
        first_cancel.cancel();
        let second = client
            .list(
                &FilterCriteria {
                    name: Some("fast".to_string()),
                    ..Default::default()
                },
                &CancellationToken::new(),
            )
            .await
            .unwrap();

        assert!(first.await.unwrap_err().is_aborted());
        assert_eq!(second.results[0].name, "Fast");
    }
}
