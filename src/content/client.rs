//! HTTP clients for the API router and the table renderer.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::{
    AdHocDocument, Breadcrumb, BulletinDocument, ContentError, ContentSource, Figure,
    HomepageContent, Scope, TableRenderer,
};

const ACCESS_TOKEN_HEADER: &str = "X-Florence-Token";
const COLLECTION_ID_HEADER: &str = "Collection-Id";

#[derive(Deserialize)]
struct FileSize {
    #[serde(rename = "fileSize")]
    size: u64,
}

/// Client for the articles API and the content store behind the API router.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ContentError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ContentError::Client)?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Content store endpoints are scoped to a collection when previewing.
    fn content_path(endpoint: &str, scope: &Scope) -> String {
        match scope.collection_id.as_deref() {
            Some(id) if !id.is_empty() => format!("/{}/{}", endpoint, id),
            _ => format!("/{}", endpoint),
        }
    }

    fn request(&self, scope: &Scope, path: &str, query: &[(&str, &str)]) -> (String, RequestBuilder) {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.http.get(&url).query(query);
        if let Some(token) = scope.access_token.as_deref().filter(|t| !t.is_empty()) {
            request = request.header(ACCESS_TOKEN_HEADER, token);
        }
        if let Some(id) = scope.collection_id.as_deref().filter(|c| !c.is_empty()) {
            request = request.header(COLLECTION_ID_HEADER, id);
        }
        (url, request)
    }

    async fn get_bytes(
        &self,
        scope: &Scope,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<Vec<u8>, ContentError> {
        let (url, request) = self.request(scope, path, query);
        debug!(%url, ?query, "fetching upstream content");

        let response = request
            .send()
            .await
            .map_err(|source| ContentError::Transport {
                url: url.clone(),
                source,
            })?;
        let body = read_body(&url, response).await?;
        Ok(body)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        scope: &Scope,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ContentError> {
        let body = self.get_bytes(scope, path, query).await?;
        serde_json::from_slice(&body).map_err(|source| ContentError::Decode {
            url: format!("{}{}", self.base_url, path),
            source,
        })
    }
}

/// Read a response body, classifying non-success statuses.
async fn read_body(url: &str, response: reqwest::Response) -> Result<Vec<u8>, ContentError> {
    let status = response.status();
    if status == StatusCode::NOT_FOUND {
        return Err(ContentError::NotFound(url.to_string()));
    }
    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        return Err(ContentError::Upstream {
            url: url.to_string(),
            status: status.as_u16(),
            message: message.chars().take(200).collect(),
        });
    }

    response
        .bytes()
        .await
        .map(|bytes| bytes.to_vec())
        .map_err(|source| ContentError::Transport {
            url: url.to_string(),
            source,
        })
}

#[async_trait]
impl ContentSource for ApiClient {
    async fn get_bulletin(
        &self,
        scope: &Scope,
        uri: &str,
    ) -> Result<BulletinDocument, ContentError> {
        self.get_json(
            scope,
            "/articles/legacy",
            &[("url", uri), ("lang", scope.language.as_str())],
        )
        .await
    }

    async fn get_adhoc(&self, scope: &Scope, uri: &str) -> Result<AdHocDocument, ContentError> {
        let path = Self::content_path("data", scope);
        self.get_json(scope, &path, &[("uri", uri), ("lang", scope.language.as_str())])
            .await
    }

    async fn get_breadcrumb(
        &self,
        scope: &Scope,
        uri: &str,
    ) -> Result<Vec<Breadcrumb>, ContentError> {
        let path = Self::content_path("parents", scope);
        self.get_json(scope, &path, &[("uri", uri), ("lang", scope.language.as_str())])
            .await
    }

    async fn get_homepage_content(
        &self,
        scope: &Scope,
        path: &str,
    ) -> Result<HomepageContent, ContentError> {
        let endpoint = Self::content_path("data", scope);
        self.get_json(scope, &endpoint, &[("uri", path), ("lang", scope.language.as_str())])
            .await
    }

    async fn get_figure(&self, scope: &Scope, path: &str) -> Result<Figure, ContentError> {
        let endpoint = Self::content_path("data", scope);
        self.get_json(scope, &endpoint, &[("uri", path), ("lang", scope.language.as_str())])
            .await
    }

    async fn get_resource_body(&self, scope: &Scope, path: &str) -> Result<Vec<u8>, ContentError> {
        let endpoint = Self::content_path("resource", scope);
        self.get_bytes(scope, &endpoint, &[("uri", path)]).await
    }

    async fn get_file_size(&self, scope: &Scope, path: &str) -> Result<u64, ContentError> {
        let endpoint = Self::content_path("filesize", scope);
        let size: FileSize = self.get_json(scope, &endpoint, &[("uri", path)]).await?;
        Ok(size.size)
    }
}

/// Client for the table rendering service.
#[derive(Debug, Clone)]
pub struct TableRendererClient {
    http: Client,
    base_url: String,
}

impl TableRendererClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ContentError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ContentError::Client)?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl TableRenderer for TableRendererClient {
    async fn render_table(&self, table: Vec<u8>) -> Result<String, ContentError> {
        let url = format!("{}/render/html", self.base_url);
        debug!(%url, bytes = table.len(), "rendering table");

        let response = self
            .http
            .post(&url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(table)
            .send()
            .await
            .map_err(|source| ContentError::Transport {
                url: url.clone(),
                source,
            })?;
        let body = read_body(&url, response).await?;
        Ok(String::from_utf8_lossy(&body).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use axum::Router;
    use axum::extract::Query;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::{get, post};

    use super::*;

    /// Serve the router on an ephemeral port and return its base URL.
    async fn spawn(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn scope() -> Scope {
        Scope {
            access_token: Some("token".to_string()),
            collection_id: Some("collection".to_string()),
            language: "cy".to_string(),
        }
    }

    #[tokio::test]
    async fn test_get_bulletin_sends_scope() {
        let app = Router::new().route(
            "/articles/legacy",
            get(
                |headers: HeaderMap, Query(query): Query<HashMap<String, String>>| async move {
                    assert_eq!(headers["X-Florence-Token"], "token");
                    assert_eq!(headers["Collection-Id"], "collection");
                    assert_eq!(query["lang"], "cy");
                    format!(
                        r#"{{"uri": "{}", "type": "bulletin", "description": {{"title": "GDP"}}}}"#,
                        query["url"]
                    )
                },
            ),
        );
        let client = ApiClient::new(&spawn(app).await, Duration::from_secs(5)).unwrap();

        let bulletin = client.get_bulletin(&scope(), "/a/b").await.unwrap();

        assert_eq!(bulletin.uri, "/a/b");
        assert_eq!(bulletin.description.title, "GDP");
    }

    #[tokio::test]
    async fn test_not_found_is_classified() {
        let app = Router::new().route(
            "/parents/collection",
            get(|| async { StatusCode::NOT_FOUND }),
        );
        let client = ApiClient::new(&spawn(app).await, Duration::from_secs(5)).unwrap();

        let result = client.get_breadcrumb(&scope(), "/missing").await;

        assert!(matches!(result, Err(ContentError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_server_error_is_upstream_failure() {
        let app = Router::new().route(
            "/data",
            get(|| async { (StatusCode::BAD_GATEWAY, "boom") }),
        );
        let client = ApiClient::new(&spawn(app).await, Duration::from_secs(5)).unwrap();

        let result = client.get_homepage_content(&Scope::default(), "/").await;

        match result {
            Err(ContentError::Upstream { status, message, .. }) => {
                assert_eq!(status, 502);
                assert_eq!(message, "boom");
            }
            other => panic!("expected upstream failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_invalid_json_is_decode_error() {
        let app = Router::new().route("/data", get(|| async { "not json" }));
        let client = ApiClient::new(&spawn(app).await, Duration::from_secs(5)).unwrap();

        let result = client.get_figure(&Scope::default(), "/a/chart").await;

        assert!(matches!(result, Err(ContentError::Decode { .. })));
    }

    #[tokio::test]
    async fn test_file_size_and_resource_body() {
        let app = Router::new()
            .route("/filesize", get(|| async { r#"{"fileSize": 2048}"# }))
            .route(
                "/resource",
                get(|Query(query): Query<HashMap<String, String>>| async move {
                    format!("body of {}", query["uri"])
                }),
            );
        let client = ApiClient::new(&spawn(app).await, Duration::from_secs(5)).unwrap();

        let size = client
            .get_file_size(&Scope::default(), "/a/img.png")
            .await
            .unwrap();
        let body = client
            .get_resource_body(&Scope::default(), "/a/eq.svg")
            .await
            .unwrap();

        assert_eq!(size, 2048);
        assert_eq!(body, b"body of /a/eq.svg");
    }

    #[tokio::test]
    async fn test_render_table_posts_json() {
        let app = Router::new().route(
            "/render/html",
            post(|headers: HeaderMap, body: String| async move {
                assert_eq!(headers["content-type"], "application/json");
                format!("<table><caption>{}</caption></table>", body)
            }),
        );
        let client = TableRendererClient::new(&spawn(app).await, Duration::from_secs(5)).unwrap();

        let html = client.render_table(b"{}".to_vec()).await.unwrap();

        assert_eq!(html, "<table><caption>{}</caption></table>");
    }
}
