mod error;

pub use error::ApiError;

use crate::config::NetworkConfig;
use crate::internal::models::{
    Article, Category, CommentPayload, DepartmentDetail, Envelope, Event, Gallery, OrgNode,
    Paginated, PeriodSummary, Podcast, Sotm,
};
use reqwest::Client;
use reqwest::header::ACCEPT;
use serde::de::DeserializeOwned;
use std::time::{Duration, Instant};

pub const DEFAULT_API_BASE_URL: &str = "https://data.genbipurwokerto.com";

/// HTTP client for the GenBI content API.
///
/// Every GET goes through [`ApiService::get_envelope`], which maps transport
/// failures, non-2xx statuses, `success: false` envelopes and undecodable
/// bodies onto [`ApiError`]. The service is cheap to clone and is shared by
/// every spawned request task.
#[derive(Clone)]
pub struct ApiService {
    client: Client,
    base_url: String,
    enable_performance_metrics: bool,
}

impl ApiService {
    pub fn new(
        base_url: impl Into<String>,
        network: &NetworkConfig,
        enable_performance_metrics: bool,
    ) -> Self {
        let client = match Client::builder()
            .timeout(Duration::from_secs(network.timeout_secs))
            .user_agent(network.user_agent.clone())
            .build()
        {
            Ok(client) => client,
            Err(e) => {
                tracing::warn!("Failed to build configured HTTP client, using defaults: {}", e);
                Client::new()
            }
        };

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            enable_performance_metrics,
        }
    }

    /// Service with default network settings, used by tests against a mock server.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self::new(base_url, &NetworkConfig::default(), false)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET `path` and unwrap the `{success, data, message}` envelope.
    #[tracing::instrument(skip(self), fields(base = %self.base_url))]
    async fn get_envelope<T>(&self, path: &str) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let start = Instant::now();
        let url = self.endpoint(path);
        let resp = self
            .client
            .get(&url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            tracing::warn!(%url, status = status.as_u16(), "request failed");
            return Err(ApiError::Status(status.as_u16()));
        }

        let bytes = resp.bytes().await?;
        let envelope: Envelope<T> =
            serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))?;

        if self.enable_performance_metrics {
            tracing::debug!(elapsed = ?start.elapsed(), %url, "api.get");
        }

        envelope.into_result()
    }

    /// One page of the article listing; `page` starts at 1.
    pub async fn fetch_articles_page(&self, page: u32) -> Result<Paginated<Article>, ApiError> {
        self.get_envelope(&format!("/api/artikel?page={}", page))
            .await
    }

    pub async fn fetch_recommended_articles(&self) -> Result<Vec<Article>, ApiError> {
        self.get_envelope("/api/artikel/rekomendasi").await
    }

    pub async fn fetch_trending_articles(&self) -> Result<Vec<Article>, ApiError> {
        self.get_envelope("/api/artikel/trending-monthly").await
    }

    pub async fn fetch_article(&self, slug: &str) -> Result<Article, ApiError> {
        self.get_envelope(&format!("/api/artikel/{}", slug)).await
    }

    /// Latest articles shown in the sidebar of an article page.
    pub async fn fetch_latest_for_detail(&self) -> Result<Vec<Article>, ApiError> {
        self.get_envelope("/api/artikel/artikelTerbaruDetailArtikel")
            .await
    }

    /// Random recommendations shown under an article.
    pub async fn fetch_random_articles(&self) -> Result<Vec<Article>, ApiError> {
        self.get_envelope("/api/artikel/rekomendasi-per-page").await
    }

    pub async fn fetch_home_articles(&self) -> Result<Vec<Article>, ApiError> {
        self.get_envelope("/api/artikel/homeArtikel").await
    }

    pub async fn fetch_categories(&self) -> Result<Vec<Category>, ApiError> {
        self.get_envelope("/api/kategori-artikel").await
    }

    pub async fn fetch_events(&self) -> Result<Vec<Event>, ApiError> {
        self.get_envelope("/api/event").await
    }

    pub async fn fetch_event(&self, slug: &str) -> Result<Event, ApiError> {
        self.get_envelope(&format!("/api/event/{}", slug)).await
    }

    pub async fn fetch_recommended_events(&self) -> Result<Vec<Event>, ApiError> {
        self.get_envelope("/api/event/rekomendasiEvent").await
    }

    pub async fn fetch_home_events(&self) -> Result<Vec<Event>, ApiError> {
        self.get_envelope("/api/event/homeEvent").await
    }

    pub async fn fetch_galleries(&self) -> Result<Vec<Gallery>, ApiError> {
        self.get_envelope("/api/galeri").await
    }

    pub async fn fetch_gallery(&self, slug: &str) -> Result<Gallery, ApiError> {
        self.get_envelope(&format!("/api/galeri/{}", slug)).await
    }

    /// Current board structure.
    pub async fn fetch_structure(&self) -> Result<Vec<OrgNode>, ApiError> {
        self.get_envelope("/api/struktur").await
    }

    /// Board structure of a past period.
    pub async fn fetch_period_structure(&self, periode: &str) -> Result<Vec<OrgNode>, ApiError> {
        self.get_envelope(&format!("/api/struktur/{}", periode))
            .await
    }

    pub async fn fetch_department(
        &self,
        periode: &str,
        department: &str,
    ) -> Result<DepartmentDetail, ApiError> {
        self.get_envelope(&format!("/api/struktur/{}/{}", periode, department))
            .await
    }

    pub async fn fetch_board_history(&self) -> Result<Vec<PeriodSummary>, ApiError> {
        self.get_envelope("/api/sejarah-kepengurusan").await
    }

    pub async fn fetch_podcasts(&self) -> Result<Vec<Podcast>, ApiError> {
        self.get_envelope("/api/podcast").await
    }

    pub async fn fetch_sotm(&self) -> Result<Vec<Sotm>, ApiError> {
        self.get_envelope("/api/sotm").await
    }

    /// POST a comment. Only the status is inspected; the body is ignored.
    #[tracing::instrument(skip(self, payload), fields(artikel_id = payload.artikel_id))]
    pub async fn submit_comment(&self, payload: &CommentPayload) -> Result<(), ApiError> {
        let url = self.endpoint("/api/komen");
        let resp = self.client.post(&url).json(payload).send().await?;
        let status = resp.status();
        match status.is_success() {
            true => {
                tracing::info!("comment submitted");
                Ok(())
            }
            false => {
                tracing::warn!(status = status.as_u16(), "comment submission rejected");
                Err(ApiError::Status(status.as_u16()))
            }
        }
    }

    /// Absolute URL of a file under the API's `/storage/` prefix.
    pub fn storage_url(&self, path: Option<&str>) -> String {
        crate::utils::url::storage_url(&self.base_url, path)
    }
}

impl Default for ApiService {
    fn default() -> Self {
        Self::with_base_url(DEFAULT_API_BASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    #[test]
    fn test_trailing_slash_trimmed() {
        let service = ApiService::with_base_url("http://localhost:8000/");
        assert_eq!(service.base_url(), "http://localhost:8000");
        assert_eq!(
            service.endpoint("/api/event"),
            "http://localhost:8000/api/event"
        );
    }

    #[tokio::test]
    async fn test_fetch_articles_page_success() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/artikel")
            .match_query(Matcher::UrlEncoded("page".into(), "2".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"success":true,"data":{"current_page":2,"last_page":3,"data":[{"id":5,"slug":"e","title":"E"}]}}"#,
            )
            .create_async()
            .await;

        let service = ApiService::with_base_url(server.url());
        let page = service.fetch_articles_page(2).await.unwrap();

        mock.assert_async().await;
        assert_eq!(page.data.len(), 1);
        assert_eq!(page.last_page, Some(3));
    }

    #[tokio::test]
    async fn test_application_failure_keeps_message() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/api/galeri/tidak-ada")
            .with_status(200)
            .with_body(r#"{"success":false,"message":"Galeri tidak ditemukan"}"#)
            .create_async()
            .await;

        let service = ApiService::with_base_url(server.url());
        let err = service.fetch_gallery("tidak-ada").await.unwrap_err();
        assert_eq!(err.to_string(), "Galeri tidak ditemukan");
    }

    #[tokio::test]
    async fn test_fetch_sotm() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/api/sotm")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"success":true,"data":[{"id":1,"jenis":"deputi","image":"sotm/a.jpg"},{"id":2,"jenis":"staff","image":"sotm/b.jpg"}]}"#,
            )
            .create_async()
            .await;

        let service = ApiService::with_base_url(server.url());
        let posters = service.fetch_sotm().await.unwrap();
        assert_eq!(posters.len(), 2);
        assert_eq!(posters[0].kind.as_deref(), Some("deputi"));
        assert_eq!(posters[1].image.as_deref(), Some("sotm/b.jpg"));
    }

    #[tokio::test]
    async fn test_non_2xx_is_status_error() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/api/event")
            .with_status(500)
            .with_body("oops")
            .create_async()
            .await;

        let service = ApiService::with_base_url(server.url());
        let err = service.fetch_events().await.unwrap_err();
        assert!(matches!(err, ApiError::Status(500)));
    }

    #[tokio::test]
    async fn test_invalid_json_is_decode_error() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/api/podcast")
            .with_status(200)
            .with_body("invalid json")
            .create_async()
            .await;

        let service = ApiService::with_base_url(server.url());
        let err = service.fetch_podcasts().await.unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[tokio::test]
    async fn test_network_error_is_transport() {
        let service = ApiService::with_base_url("http://localhost:1");
        let err = service.fetch_structure().await.unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
        assert!(err.to_string().starts_with("Fetch error"));
    }

    #[tokio::test]
    async fn test_submit_comment_posts_json() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/komen")
            .match_header("content-type", "application/json")
            .match_body(Matcher::Json(serde_json::json!({
                "artikel_id": 9,
                "nama": "Sari",
                "email": "sari@mail.id",
                "komentar": "Bagus"
            })))
            .with_status(201)
            .create_async()
            .await;

        let service = ApiService::with_base_url(server.url());
        let payload = CommentPayload {
            artikel_id: 9,
            nama: "Sari".to_string(),
            email: "sari@mail.id".to_string(),
            komentar: "Bagus".to_string(),
        };
        service.submit_comment(&payload).await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_submit_comment_rejected() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("POST", "/api/komen")
            .with_status(422)
            .with_body(r#"{"errors":{"email":["invalid"]}}"#)
            .create_async()
            .await;

        let service = ApiService::with_base_url(server.url());
        let payload = CommentPayload {
            artikel_id: 1,
            nama: "a".to_string(),
            email: "a@b.cd".to_string(),
            komentar: "x".to_string(),
        };
        assert!(matches!(
            service.submit_comment(&payload).await,
            Err(ApiError::Status(422))
        ));
    }
}
