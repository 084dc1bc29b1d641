//! HTTP client for the Omni admin API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{RequestBuilder, Url};
use serde::de::DeserializeOwned;

use crate::error::{AgentError, Result};
use crate::service::DefaultAgentService;
use crate::types::{
    AgentId, AgentRecord, AgentStats, DefaultConfig, InstallRequest, InstallResponse,
    InstallSummary, SyncSummary, UpdateRequest, UpdateSummary,
};

const ADMIN_KEY_HEADER: &str = "x-admin-api-key";
const ROUTE_PREFIX: [&str; 2] = ["admin", "omni-agents"];

/// Default-agent service backed by the Omni admin API.
///
/// Every call maps to exactly one HTTP request; no agent logic runs locally.
#[derive(Debug, Clone)]
pub struct HttpAgentService {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpAgentService {
    /// Create a client for the admin API rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::Config`] if the URL or admin key is unusable, or
    /// [`AgentError::Http`] if the HTTP client cannot be built.
    pub fn new(base_url: &str, admin_key: Option<&str>, timeout: Duration) -> Result<Self> {
        let parsed = Url::parse(base_url)
            .map_err(|e| AgentError::Config(format!("invalid base URL {base_url:?}: {e}")))?;
        if parsed.cannot_be_a_base() {
            return Err(AgentError::Config(format!(
                "base URL {base_url:?} cannot carry a path"
            )));
        }

        let mut headers = HeaderMap::new();
        if let Some(key) = admin_key.filter(|key| !key.is_empty()) {
            let mut value = HeaderValue::from_str(key).map_err(|_| {
                AgentError::Config("admin key is not a valid header value".to_string())
            })?;
            value.set_sensitive(true);
            headers.insert(ADMIN_KEY_HEADER, value);
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: parsed,
        })
    }

    /// Root URL of the admin API.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // Segments are percent-encoded individually, so account ids cannot add path levels
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(ROUTE_PREFIX).extend(segments);
        }
        url
    }

    async fn call<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request.send().await?;
        decode(response).await
    }

    async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T> {
        let url = self.endpoint(segments);
        tracing::debug!(url = %url, "GET omni admin api");
        self.call(self.http.get(url)).await
    }

    async fn post<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T> {
        let url = self.endpoint(segments);
        tracing::debug!(url = %url, "POST omni admin api");
        self.call(self.http.post(url)).await
    }

    async fn post_json<B, T>(&self, segments: &[&str], body: &B) -> Result<T>
    where
        B: serde::Serialize + Sync,
        T: DeserializeOwned,
    {
        let url = self.endpoint(segments);
        tracing::debug!(url = %url, "POST omni admin api");
        self.call(self.http.post(url).json(body)).await
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(AgentError::Api {
            status: status.as_u16(),
            message: body,
        });
    }

    serde_json::from_str(&body).map_err(|e| AgentError::Parse(e.to_string()))
}

#[async_trait]
impl DefaultAgentService for HttpAgentService {
    async fn get_omni_default_config(&self) -> Result<DefaultConfig> {
        self.get(&["default-config"]).await
    }

    async fn sync_all_omni_agents(&self) -> Result<SyncSummary> {
        self.post(&["sync"]).await
    }

    async fn update_all_omni_agents(&self, target_version: Option<&str>) -> Result<UpdateSummary> {
        let body = UpdateRequest {
            target_version: target_version.map(str::to_string),
        };
        self.post_json(&["update"], &body).await
    }

    async fn install_for_all_users(&self) -> Result<InstallSummary> {
        self.post(&["install-all"]).await
    }

    async fn install_omni_agent_for_user(
        &self,
        account_id: &str,
        replace_existing: bool,
    ) -> Result<Option<AgentId>> {
        let body = InstallRequest {
            account_id: account_id.to_string(),
            replace_existing,
        };
        let response: InstallResponse = self.post_json(&["install"], &body).await?;
        Ok(response.agent_id)
    }

    async fn get_omni_agent_for_user(&self, account_id: &str) -> Result<Option<AgentRecord>> {
        // Absence is a `null` body; a 404 means the route itself is wrong
        self.get(&["accounts", account_id]).await
    }

    async fn get_omni_agent_stats(&self) -> Result<AgentStats> {
        self.get(&["stats"]).await
    }
}
