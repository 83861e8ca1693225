use super::common::ApiQueryParams;
use super::global_infra::GlobalInfraApi;
use super::infra::InfraApi;
use super::{ApiError, NsxResponseHandler};
use reqwest::{Client as HttpClient, ClientBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use url::Url;

/// Connection settings for an NSX Manager
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Host name or URL; https is assumed when no scheme is given
    pub host: String,
    pub username: String,
    pub password: String,
    pub allow_unverified_ssl: bool,
    pub timeout: Duration,
}

#[derive(Clone)]
pub struct Client {
    http: HttpClient,
    base_url: String,
    username: String,
    password: String,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

impl Client {
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let host = if config.host.contains("://") {
            config.host.clone()
        } else {
            format!("https://{}", config.host)
        };
        let base_url = Url::parse(&host)?;

        let http = ClientBuilder::new()
            .danger_accept_invalid_certs(config.allow_unverified_ssl)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.as_str().trim_end_matches('/').to_string(),
            username: config.username.clone(),
            password: config.password.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Local Manager infra APIs
    pub fn infra(&self) -> InfraApi<'_> {
        InfraApi::new(self)
    }

    /// Global Manager global-infra APIs
    pub fn global_infra(&self) -> GlobalInfraApi<'_> {
        GlobalInfraApi::new(self)
    }

    fn url(&self, path: &str, query: &ApiQueryParams) -> String {
        format!("{}{}{}", self.base_url, path, query.to_query_string())
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &ApiQueryParams,
    ) -> Result<T, ApiError> {
        let url = self.url(path, query);
        tracing::debug!("GET {}", url);

        let response = self
            .http
            .get(url)
            .basic_auth(&self.username, Some(&self.password))
            .send()
            .await?;

        NsxResponseHandler::extract_response(response).await
    }

    /// POST whose response body is not needed, as used by action endpoints
    pub async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &ApiQueryParams,
        body: &B,
    ) -> Result<(), ApiError> {
        let url = self.url(path, query);
        tracing::debug!("POST {}", url);

        let response = self
            .http
            .post(url)
            .basic_auth(&self.username, Some(&self.password))
            .json(body)
            .send()
            .await?;

        NsxResponseHandler::extract_empty_response(response).await
    }
}
