//! HTTP client
//!
//! `reqwest`-backed client bound to a [`ClientConfig`]. The config is frozen
//! at construction: [`ApiClient::reconfigure`] builds a new client and leaves
//! every existing handle (and its in-flight requests) untouched.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use url::Url;

use super::config::{resolve_url, ClientConfig, RequestOverrides};
use super::error::{ClientError, ClientResult};

/// Pre-configured client for the evaluation backend
///
/// Cloning is cheap and clones share the connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    config: Arc<ClientConfig>,
}

impl ApiClient {
    /// Create a client. The base URL is not validated here.
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .default_headers(header_map(&config.headers)?)
            .build()
            .map_err(ClientError::Build)?;

        tracing::debug!(base_url = %config.base_url, "API client created");

        Ok(Self {
            client,
            config: Arc::new(config),
        })
    }

    /// Build a new client from `config`; `self` keeps its configuration
    pub fn reconfigure(&self, config: ClientConfig) -> ClientResult<Self> {
        tracing::info!(
            from = %self.config.base_url,
            to = %config.base_url,
            "Reconfiguring API client"
        );
        Self::new(config)
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Resolve a request path against the base URL
    pub fn url(&self, path: &str) -> String {
        self.config.url(path)
    }

    pub async fn get(&self, path: &str) -> ClientResult<Response> {
        self.get_with(path, &RequestOverrides::default()).await
    }

    pub async fn get_with(
        &self,
        path: &str,
        overrides: &RequestOverrides,
    ) -> ClientResult<Response> {
        self.send::<()>(Method::GET, path, None, overrides).await
    }

    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> ClientResult<Response> {
        self.post_with(path, body, &RequestOverrides::default()).await
    }

    pub async fn post_with<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        overrides: &RequestOverrides,
    ) -> ClientResult<Response> {
        self.send(Method::POST, path, Some(body), overrides).await
    }

    pub async fn put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> ClientResult<Response> {
        self.put_with(path, body, &RequestOverrides::default()).await
    }

    pub async fn put_with<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        overrides: &RequestOverrides,
    ) -> ClientResult<Response> {
        self.send(Method::PUT, path, Some(body), overrides).await
    }

    pub async fn delete(&self, path: &str) -> ClientResult<Response> {
        self.delete_with(path, &RequestOverrides::default()).await
    }

    pub async fn delete_with(
        &self,
        path: &str,
        overrides: &RequestOverrides,
    ) -> ClientResult<Response> {
        self.send::<()>(Method::DELETE, path, None, overrides).await
    }

    /// GET `path` and decode the JSON body
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.get(path)
            .await?
            .json()
            .await
            .map_err(ClientError::Decode)
    }

    /// Send a request, inheriting base URL and default headers unless
    /// `overrides` replaces them
    ///
    /// Non-2xx responses are returned as [`ClientError::Status`].
    pub async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        overrides: &RequestOverrides,
    ) -> ClientResult<Response> {
        let base = overrides
            .base_url
            .as_deref()
            .unwrap_or(&self.config.base_url);
        let raw = resolve_url(base, path);
        let mut url = Url::parse(&raw).map_err(|source| ClientError::InvalidUrl {
            url: raw.clone(),
            source,
        })?;

        if !overrides.query.is_empty() {
            url.query_pairs_mut().extend_pairs(
                overrides
                    .query
                    .iter()
                    .map(|(k, v)| (k.as_str(), v.as_str())),
            );
        }

        let mut request = self.client.request(method.clone(), url.clone());
        if !overrides.headers.is_empty() {
            request = request.headers(header_map(&overrides.headers)?);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        tracing::debug!(method = %method, url = %url, "Sending request");

        let response = request.send().await.map_err(|e| {
            if e.is_connect() {
                ClientError::Unavailable {
                    url: url.to_string(),
                    source: e,
                }
            } else {
                ClientError::Request(e)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::debug!(status = status.as_u16(), url = %url, "Request failed");
            return Err(ClientError::Status {
                status: status.as_u16(),
                url: url.to_string(),
                body,
            });
        }

        Ok(response)
    }
}

fn header_map(headers: &BTreeMap<String, String>) -> ClientResult<HeaderMap> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        let header_name =
            HeaderName::from_bytes(name.as_bytes()).map_err(|e| ClientError::InvalidHeader {
                name: name.clone(),
                message: e.to_string(),
            })?;
        let header_value = HeaderValue::from_str(value).map_err(|e| ClientError::InvalidHeader {
            name: name.clone(),
            message: e.to_string(),
        })?;
        map.insert(header_name, header_value);
    }
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> ApiClient {
        ApiClient::new(ClientConfig::new(format!("{}/api/evaluation", server.uri()))).unwrap()
    }

    #[tokio::test]
    async fn test_every_request_inherits_base_and_content_type() {
        let server = MockServer::start().await;
        Mock::given(header("content-type", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(5)
            .mount(&server)
            .await;

        let client = client_for(&server);
        client.get("/overall").await.unwrap();
        client.post("", &json!({"x": "良好"})).await.unwrap();
        client.put("/7", &json!({"x": "中等"})).await.unwrap();
        client.delete("/7").await.unwrap();
        client.get("radar").await.unwrap();

        let received = server.received_requests().await.unwrap();
        let paths: Vec<_> = received.iter().map(|r| r.url.path().to_string()).collect();
        assert_eq!(
            paths,
            vec![
                "/api/evaluation/overall",
                "/api/evaluation",
                "/api/evaluation/7",
                "/api/evaluation/7",
                "/api/evaluation/radar",
            ]
        );
    }

    #[tokio::test]
    async fn test_post_sends_json_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/evaluation"))
            .and(body_json(json!({"x": "优秀"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1})))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let response = client.post("", &json!({"x": "优秀"})).await.unwrap();
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["id"], 1);
    }

    #[tokio::test]
    async fn test_non_success_status_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let err = client_for(&server).get("/overall").await.unwrap_err();
        match err {
            ClientError::Status { status, body, .. } => {
                assert_eq!(status, 500);
                assert_eq!(body, "boom");
            }
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_overrides_apply_to_one_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/other/ping"))
            .and(header("x-trace", "abc"))
            .and(query_param("page", "2"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/evaluation/ping"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let overrides = RequestOverrides::new()
            .base_url(format!("{}/other", server.uri()))
            .header("X-Trace", "abc")
            .query("page", "2");

        client.get_with("/ping", &overrides).await.unwrap();
        client.get("/ping").await.unwrap();
    }

    #[tokio::test]
    async fn test_reconfigure_returns_independent_client() {
        let first = MockServer::start().await;
        let second = MockServer::start().await;
        for server in [&first, &second] {
            Mock::given(method("GET"))
                .respond_with(ResponseTemplate::new(200))
                .expect(1)
                .mount(server)
                .await;
        }

        let original = client_for(&first);
        let moved = original
            .reconfigure(ClientConfig::new(format!("{}/api/evaluation", second.uri())))
            .unwrap();

        original.get("/overall").await.unwrap();
        moved.get("/overall").await.unwrap();

        assert_eq!(
            original.config().base_url,
            format!("{}/api/evaluation", first.uri())
        );
    }

    #[tokio::test]
    async fn test_malformed_base_url_surfaces_on_request() {
        let client = ApiClient::new(ClientConfig::new("not a url")).unwrap();
        let err = client.get("/overall").await.unwrap_err();
        assert!(matches!(err, ClientError::InvalidUrl { .. }));
    }

    #[tokio::test]
    async fn test_unreachable_backend() {
        let client = ApiClient::new(ClientConfig::new("http://127.0.0.1:1/api")).unwrap();
        let err = client.get("/overall").await.unwrap_err();
        assert!(matches!(err, ClientError::Unavailable { .. }));
    }

    #[test]
    fn test_invalid_header_rejected() {
        let config = ClientConfig::default().header("bad header", "x");
        assert!(matches!(
            ApiClient::new(config),
            Err(ClientError::InvalidHeader { .. })
        ));
    }
}
